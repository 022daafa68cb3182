use tenantctl_core::{HttpExecutor, TenantSession};

use crate::cli_args::OutputFormat;

pub struct CommandContext<'a> {
    pub executor: &'a HttpExecutor,
    pub session: TenantSession,
    pub output: OutputFormat,
}
