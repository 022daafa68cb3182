use std::path::Path;

use anyhow::Context;
use serde_json::json;
use tenantctl_core::{MultipartBody, MultipartFile, ResourceClient, Theme};

use crate::cli_args::*;
use crate::modules::shared::handle_resource;
use crate::modules::system::CommandContext;

const THEME_ARCHIVE_TYPE: &str = "application/octet-stream";

pub(crate) async fn handle_theme(args: ThemeArgs, ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    match args.command {
        ThemeCommand::Resource(command) => handle_resource::<Theme>(command, ctx).await,
        ThemeCommand::Upload(args) => upload_theme(args, ctx).await,
    }
}

async fn upload_theme(args: ThemeUploadArgs, ctx: &CommandContext<'_>) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file_name = archive_file_name(&args.file);
    let name = args.name.unwrap_or_else(|| default_theme_name(&file_name));
    let body = theme_upload_body(&name, file_name, bytes)?;

    let client = ResourceClient::<Theme>::new(ctx.executor, &ctx.session);
    match args.id.as_deref() {
        Some(id) => {
            client.update_multipart(id, body).await?;
            println!("Updated theme {id}");
        }
        None => match client.create_multipart(body).await? {
            Some(location) => println!("Created theme: {location}"),
            None => println!("Created theme"),
        },
    }
    Ok(())
}

pub(crate) fn theme_upload_body(
    name: &str,
    file_name: String,
    bytes: Vec<u8>,
) -> anyhow::Result<MultipartBody> {
    let configuration = serde_json::to_string(&json!({ "name": name }))?;
    Ok(MultipartBody::default()
        .field("configuration", configuration)
        .file(MultipartFile {
            field: "files".to_string(),
            file_name,
            content_type: THEME_ARCHIVE_TYPE.to_string(),
            bytes,
        }))
}

fn archive_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "theme.zip".to_string())
}

fn default_theme_name(file_name: &str) -> String {
    file_name
        .strip_suffix(".zip")
        .unwrap_or(file_name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_body_carries_configuration_and_archive() {
        let body = theme_upload_body("dark", "dark.zip".to_string(), b"PK".to_vec())
            .expect("body");
        assert_eq!(body.fields.len(), 1);
        assert_eq!(body.fields[0].0, "configuration");
        assert_eq!(body.fields[0].1, r#"{"name":"dark"}"#);
        assert_eq!(body.files.len(), 1);
        assert_eq!(body.files[0].field, "files");
        assert_eq!(body.files[0].file_name, "dark.zip");
    }

    #[test]
    fn theme_name_defaults_to_archive_stem() {
        assert_eq!(default_theme_name("corporate.zip"), "corporate");
        assert_eq!(default_theme_name("plain"), "plain");
    }
}
