use tenantctl_core::Group;

use crate::cli_args::*;
use crate::modules::shared::{handle_patch, handle_resource};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_group(args: GroupArgs, ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    match args.command {
        GroupCommand::Resource(command) => handle_resource::<Group>(command, ctx).await,
        GroupCommand::Patch(args) => handle_patch::<Group>(args, ctx).await,
    }
}
