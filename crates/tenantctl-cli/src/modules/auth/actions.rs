use tenantctl_core::{
    client_credentials_token, poll_device_token, request_device_authorization, CredentialStore,
    HttpExecutor, OAuthClient, SessionError,
};
use tracing::info;

use crate::cli_args::*;
use crate::modules::system::ensure_secure_tenant;

pub(crate) async fn handle_login(
    args: LoginArgs,
    allow_insecure: bool,
    executor: &HttpExecutor,
    store: &mut CredentialStore,
) -> anyhow::Result<()> {
    let tenant = args.tenant.trim().trim_end_matches('/').to_string();
    if tenant.is_empty() {
        anyhow::bail!("tenant is required");
    }
    ensure_secure_tenant(&tenant, allow_insecure)?;

    let client = OAuthClient {
        tenant: &tenant,
        client_id: &args.client_id,
        client_secret: args.client_secret.as_deref(),
        scope: args.scope.as_deref(),
    };

    let token = if args.user {
        let device = request_device_authorization(executor, &client).await?;
        println!("Visit: {}", device.verification_url());
        println!("User code: {}", device.user_code);
        poll_device_token(executor, &client, &device).await?
    } else {
        client_credentials_token(executor, &client).await?
    };

    record_session(store, &tenant, &token.access_token, args.user);
    println!("Logged in to {tenant}");
    Ok(())
}

/// Stores the session and makes it current. Returns whether an existing session for the
/// tenant was obtained through the other grant flow.
pub(crate) fn record_session(
    store: &mut CredentialStore,
    tenant: &str,
    token: &str,
    is_user: bool,
) -> bool {
    let flow_changed = store
        .session(tenant)
        .is_ok_and(|previous| previous.is_user != is_user);
    if flow_changed {
        info!(
            tenant = %tenant,
            user = is_user,
            "replacing session obtained through the other grant flow"
        );
    }
    store.add_session(tenant, token, is_user);
    store.set_current_tenant(tenant);
    info!(tenant = %tenant, user = is_user, "session stored");
    flow_changed
}

pub(crate) fn handle_logout(
    args: LogoutArgs,
    tenant_arg: Option<String>,
    store: &mut CredentialStore,
) -> anyhow::Result<()> {
    let tenant = args
        .tenant
        .or(tenant_arg)
        .or_else(|| store.current_tenant().map(str::to_string))
        .ok_or(SessionError::NoCurrentTenant)?;
    if !store.remove_session(&tenant) {
        return Err(SessionError::NoSession { tenant }.into());
    }
    println!("Logged out of {tenant}");
    Ok(())
}
