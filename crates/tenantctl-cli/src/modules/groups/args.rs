use clap::{Args, Subcommand};

use crate::modules::shared::args::{PatchArgs, ResourceCommand};

#[derive(Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

#[derive(Subcommand)]
pub enum GroupCommand {
    #[command(flatten)]
    Resource(ResourceCommand),
    #[command(about = "Apply a SCIM patch operation to a group, e.g. add members")]
    Patch(PatchArgs),
}
