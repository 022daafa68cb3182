use tenantctl_core::CredentialStore;

use crate::cli_args::{ConfigArgs, ConfigCommand};

/// Returns whether the store changed and should be persisted.
pub(crate) fn handle_config_command(
    args: ConfigArgs,
    store: &mut CredentialStore,
) -> anyhow::Result<bool> {
    match args.command {
        ConfigCommand::Current => {
            if let Some(current) = store.current_tenant() {
                println!("{current}");
            }
            Ok(false)
        }
        ConfigCommand::List => {
            let current = store.current_tenant();
            for session in store.sessions() {
                let marker = if current == Some(session.tenant.as_str()) {
                    "*"
                } else {
                    " "
                };
                let kind = if session.is_user { "user" } else { "client" };
                println!("{marker} {} ({kind})", session.tenant);
            }
            Ok(false)
        }
        ConfigCommand::Use(args) => {
            store.session(&args.tenant)?;
            store.set_current_tenant(&args.tenant);
            Ok(true)
        }
    }
}

pub(crate) fn ensure_secure_tenant(tenant: &str, allow_insecure: bool) -> anyhow::Result<()> {
    if tenant.trim().starts_with("http://") && !allow_insecure {
        anyhow::bail!("refusing to use http:// without --insecure");
    }
    Ok(())
}
