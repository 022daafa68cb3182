use tenantctl_core::User;

use crate::cli_args::*;
use crate::modules::shared::{handle_patch, handle_resource};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_user(args: UserArgs, ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    match args.command {
        UserCommand::Resource(command) => handle_resource::<User>(command, ctx).await,
        UserCommand::Patch(args) => handle_patch::<User>(args, ctx).await,
    }
}
