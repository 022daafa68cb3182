use clap::{Args, Subcommand};

use crate::modules::shared::args::{PatchArgs, ResourceCommand};

#[derive(Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand)]
pub enum UserCommand {
    #[command(flatten)]
    Resource(ResourceCommand),
    #[command(about = "Apply a SCIM patch operation to a user")]
    Patch(PatchArgs),
}
