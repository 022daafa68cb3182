use clap::{ArgAction, Parser, Subcommand, ValueEnum};

pub use crate::modules::auth::args::*;
pub use crate::modules::groups::args::*;
pub use crate::modules::logs::args::*;
pub use crate::modules::shared::args::*;
pub use crate::modules::system::args::*;
pub use crate::modules::themes::args::*;
pub use crate::modules::users::args::*;

#[derive(Parser)]
#[command(name = "tenantctl")]
#[command(about = "Manage an identity tenant from the command line")]
pub struct Cli {
    #[arg(
        long,
        env = "TENANTCTL_TENANT",
        global = true,
        help = "Tenant to use instead of the current one"
    )]
    pub tenant: Option<String>,
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[arg(
        long,
        global = true,
        help = "Allow http:// tenants and invalid TLS certificates"
    )]
    pub insecure: bool,
    #[arg(short, long, value_enum, default_value = "yaml", global = true)]
    pub output: OutputFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Authenticate against a tenant and store the token")]
    Login(LoginArgs),
    #[command(about = "Forget the stored token for a tenant")]
    Logout(LogoutArgs),
    #[command(about = "Inspect or switch stored tenant sessions")]
    Config(ConfigArgs),
    #[command(about = "Manage SCIM users")]
    User(UserArgs),
    #[command(about = "Manage SCIM groups")]
    Group(GroupArgs),
    #[command(name = "apiclient", about = "Manage API clients")]
    ApiClient(ResourceArgs),
    #[command(name = "identitysource", about = "Manage identity sources")]
    IdentitySource(ResourceArgs),
    #[command(about = "Manage attributes")]
    Attribute(ResourceArgs),
    #[command(about = "Manage applications")]
    Application(ResourceArgs),
    #[command(about = "Manage access policies")]
    Policy(ResourceArgs),
    #[command(about = "Manage branding themes")]
    Theme(ThemeArgs),
    #[command(about = "Query or follow the event log")]
    Logs(LogsArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}
