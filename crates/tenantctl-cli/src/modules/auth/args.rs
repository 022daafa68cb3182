use clap::Args;

#[derive(Args)]
pub struct LoginArgs {
    #[arg(
        id = "login_tenant",
        value_name = "TENANT",
        help = "Tenant hostname, e.g. acme.example.com"
    )]
    pub tenant: String,
    #[arg(long, env = "TENANTCTL_CLIENT_ID")]
    pub client_id: String,
    #[arg(long, env = "TENANTCTL_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,
    #[arg(long, help = "Sign in as a user through the device flow")]
    pub user: bool,
    #[arg(long, help = "Space separated scopes to request")]
    pub scope: Option<String>,
}

#[derive(Args)]
pub struct LogoutArgs {
    #[arg(
        id = "logout_tenant",
        value_name = "TENANT",
        help = "Tenant to forget (defaults to --tenant, then the current tenant)"
    )]
    pub tenant: Option<String>,
}
