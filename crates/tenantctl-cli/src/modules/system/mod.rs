pub(crate) mod args;
pub(crate) mod config;
pub(crate) mod types;

pub(crate) use config::{ensure_secure_tenant, handle_config_command};
pub(crate) use types::CommandContext;
