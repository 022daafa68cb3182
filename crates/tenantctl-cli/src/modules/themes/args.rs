use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::modules::shared::args::ResourceCommand;

#[derive(Args)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: ThemeCommand,
}

#[derive(Subcommand)]
pub enum ThemeCommand {
    #[command(flatten)]
    Resource(ResourceCommand),
    #[command(about = "Upload a theme archive, replacing an existing theme when --id is given")]
    Upload(ThemeUploadArgs),
}

#[derive(Args)]
pub struct ThemeUploadArgs {
    #[arg(short, long, help = "Theme zip archive")]
    pub file: PathBuf,
    #[arg(long, help = "Theme name (defaults to the archive file name)")]
    pub name: Option<String>,
    #[arg(long, help = "Existing theme identifier to replace")]
    pub id: Option<String>,
}
