use tenantctl_core::{AccessPolicy, ApiClient, Application, Attribute, IdentitySource};

use crate::cli_args::*;
use crate::modules::groups::handle_group;
use crate::modules::logs::handle_logs;
use crate::modules::shared::handle_resource;
use crate::modules::system::CommandContext;
use crate::modules::themes::handle_theme;
use crate::modules::users::handle_user;

pub(crate) async fn handle_command(command: Command, ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    match command {
        Command::User(args) => handle_user(args, ctx).await?,
        Command::Group(args) => handle_group(args, ctx).await?,
        Command::ApiClient(args) => handle_resource::<ApiClient>(args.command, ctx).await?,
        Command::IdentitySource(args) => {
            handle_resource::<IdentitySource>(args.command, ctx).await?
        }
        Command::Attribute(args) => handle_resource::<Attribute>(args.command, ctx).await?,
        Command::Application(args) => handle_resource::<Application>(args.command, ctx).await?,
        Command::Policy(args) => handle_resource::<AccessPolicy>(args.command, ctx).await?,
        Command::Theme(args) => handle_theme(args, ctx).await?,
        Command::Logs(args) => handle_logs(args, ctx).await?,
        Command::Login(_) | Command::Logout(_) | Command::Config(_) => {
            unreachable!()
        }
    }

    Ok(())
}
