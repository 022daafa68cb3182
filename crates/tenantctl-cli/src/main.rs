use clap::Parser;
use tenantctl_core::{CredentialStore, HttpExecutor};
use tracing_subscriber::EnvFilter;

mod cli_args;
mod cli_command;
mod modules;


use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::auth::{handle_login, handle_logout};
use crate::modules::system::{ensure_secure_tenant, handle_config_command, CommandContext};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let executor = HttpExecutor::with_options(cli.insecure)?;
    let mut store = CredentialStore::open_default()?;

    match cli.command {
        Command::Login(args) => {
            handle_login(args, cli.insecure, &executor, &mut store).await?;
            store.persist()?;
        }
        Command::Logout(args) => {
            handle_logout(args, cli.tenant, &mut store)?;
            store.persist()?;
        }
        Command::Config(args) => {
            if handle_config_command(args, &mut store)? {
                store.persist()?;
            }
        }
        command => {
            let session = match cli.tenant.as_deref() {
                Some(tenant) => store.session(tenant)?.clone(),
                None => store.current_session()?.clone(),
            };
            ensure_secure_tenant(&session.tenant, cli.insecure)?;
            let ctx = CommandContext {
                executor: &executor,
                session,
                output: cli.output,
            };
            handle_command(command, &ctx).await?;
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}
