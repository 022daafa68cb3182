use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

#[derive(Args)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub command: ResourceCommand,
}

#[derive(Subcommand)]
pub enum ResourceCommand {
    #[command(about = "List resources, optionally filtered server-side")]
    List(ListArgs),
    #[command(about = "Show one resource")]
    Get(TargetArgs),
    #[command(about = "Create a resource from a YAML or JSON file")]
    Create(CreateArgs),
    #[command(about = "Replace a resource with the contents of a file")]
    Update(UpdateArgs),
    #[command(about = "Delete a resource")]
    Delete(TargetArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long, help = "Filter expression passed to the service as is")]
    pub filter: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
}

/// A resource addressed either by its display name or its identifier.
#[derive(Args, Clone)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    #[arg(help = "Resource name")]
    pub name: Option<String>,
    #[arg(long, help = "Resource identifier, skips name lookup")]
    pub id: Option<String>,
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct PatchArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    #[arg(long, value_enum)]
    pub op: PatchOpArg,
    #[arg(long)]
    pub path: Option<String>,
    #[arg(long, help = "Value as YAML, e.g. 'false' or '{givenName: Ada}'")]
    pub value: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PatchOpArg {
    Add,
    Replace,
    Remove,
}
