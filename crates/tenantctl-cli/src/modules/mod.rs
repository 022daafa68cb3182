pub(crate) mod auth;
pub(crate) mod groups;
pub(crate) mod logs;
pub(crate) mod shared;
pub(crate) mod system;
pub(crate) mod themes;
pub(crate) mod users;
