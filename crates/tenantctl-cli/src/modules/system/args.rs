use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the current tenant")]
    Current,
    #[command(about = "List tenants with a stored session")]
    List,
    #[command(about = "Make a tenant the current one")]
    Use(UseTenantArgs),
}

#[derive(Args)]
pub struct UseTenantArgs {
    #[arg(id = "use_tenant", value_name = "TENANT", help = "Tenant hostname")]
    pub tenant: String,
}
