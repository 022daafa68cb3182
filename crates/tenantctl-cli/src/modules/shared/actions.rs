use tenantctl_core::{ListQuery, PatchOp, PatchOperation, ResourceClient, ResourceKind};
use tracing::info;

use crate::cli_args::*;
use crate::modules::shared::{print_value, read_resource_file};
use crate::modules::system::CommandContext;

pub(crate) async fn handle_resource<K: ResourceKind>(
    command: ResourceCommand,
    ctx: &CommandContext<'_>,
) -> anyhow::Result<()> {
    let client = ResourceClient::<K>::new(ctx.executor, &ctx.session);
    match command {
        ResourceCommand::List(args) => {
            let query = ListQuery {
                filter: args.filter,
                limit: args.limit,
            };
            let entries = client.list(&query).await?;
            print_value(&entries, ctx.output)?;
        }
        ResourceCommand::Get(target) => {
            let body = match target_id(&target) {
                Some(id) => client.get(id).await?,
                None => client.get_by_name(target_name(&target)?).await?.1,
            };
            print_value(&body, ctx.output)?;
        }
        ResourceCommand::Create(args) => {
            let body = read_resource_file(&args.file)?;
            match client.create(&body).await? {
                Some(location) => println!("Created {}: {location}", K::KIND),
                None => println!("Created {}", K::KIND),
            }
        }
        ResourceCommand::Update(args) => {
            let body = read_resource_file(&args.file)?;
            let id = resolve_target(&client, &args.target).await?;
            client.update(&id, &body).await?;
            println!("Updated {} {id}", K::KIND);
        }
        ResourceCommand::Delete(target) => {
            let id = resolve_target(&client, &target).await?;
            client.delete(&id).await?;
            info!(kind = K::KIND, id = %id, "deleted");
            println!("Deleted {} {id}", K::KIND);
        }
    }
    Ok(())
}

pub(crate) async fn handle_patch<K: ResourceKind>(
    args: PatchArgs,
    ctx: &CommandContext<'_>,
) -> anyhow::Result<()> {
    let op = match args.op {
        PatchOpArg::Add => PatchOp::Add,
        PatchOpArg::Replace => PatchOp::Replace,
        PatchOpArg::Remove => PatchOp::Remove,
    };
    if op == PatchOp::Remove && args.path.is_none() {
        anyhow::bail!("--path is required for remove");
    }
    let value = args
        .value
        .as_deref()
        .map(serde_yaml::from_str::<serde_json::Value>)
        .transpose()?;
    if op != PatchOp::Remove && value.is_none() {
        anyhow::bail!("--value is required for add and replace");
    }

    let client = ResourceClient::<K>::new(ctx.executor, &ctx.session);
    let id = resolve_target(&client, &args.target).await?;
    let operation = PatchOperation {
        op,
        path: args.path,
        value,
    };
    client.patch(&id, &[operation]).await?;
    println!("Patched {} {id}", K::KIND);
    Ok(())
}

/// The identifier given with `--id`, if any.
pub(crate) fn target_id(target: &TargetArgs) -> Option<&str> {
    target.id.as_deref().filter(|id| !id.is_empty())
}

fn target_name(target: &TargetArgs) -> anyhow::Result<&str> {
    target
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| anyhow::anyhow!("a name or --id is required"))
}

async fn resolve_target<K: ResourceKind>(
    client: &ResourceClient<'_, K>,
    target: &TargetArgs,
) -> anyhow::Result<String> {
    match target_id(target) {
        Some(id) => Ok(id.to_string()),
        None => Ok(client.resolve(target_name(target)?).await?.to_string()),
    }
}
