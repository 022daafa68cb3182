#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

pub mod constants;
pub mod error;
pub mod events;
pub mod http;
pub mod kinds;
pub mod oauth;
pub mod resolve;
pub mod resource;
pub mod status;
pub mod store;

pub use crate::constants::*;
pub use crate::error::*;
pub use crate::events::*;
pub use crate::http::*;
pub use crate::kinds::*;
pub use crate::oauth::*;
pub use crate::resolve::*;
pub use crate::resource::*;
pub use crate::status::*;
pub use crate::store::*;
