//! OAuth 2.0 token acquisition against `https://<tenant>/oauth2/*`.
//!
//! Nothing here touches the credential store; callers persist the returned token.

use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::{
    tenant_url, Error, HttpExecutor, RawResponse, Result, DEFAULT_DEVICE_POLL_SECONDS,
    DEVICE_AUTHORIZATION_PATH, DEVICE_CODE_GRANT, SLOW_DOWN_STEP_SECONDS, TOKEN_PATH,
};

#[derive(Debug, Clone, Copy)]
pub struct OAuthClient<'a> {
    pub tenant: &'a str,
    pub client_id: &'a str,
    pub client_secret: Option<&'a str>,
    pub scope: Option<&'a str>,
}

impl<'a> OAuthClient<'a> {
    fn params(&self) -> Vec<(&'a str, &'a str)> {
        let mut params = vec![("client_id", self.client_id)];
        if let Some(secret) = self.client_secret.filter(|s| !s.is_empty()) {
            params.push(("client_secret", secret));
        }
        if let Some(scope) = self.scope.filter(|s| !s.is_empty()) {
            params.push(("scope", scope));
        }
        params
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceAuthorization {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    #[serde(default)]
    pub verification_uri_complete: Option<String>,
    pub expires_in: i64,
    #[serde(default)]
    pub interval: Option<u64>,
}

impl DeviceAuthorization {
    /// URL the operator should open; prefers the variant with the code embedded.
    pub fn verification_url(&self) -> &str {
        self.verification_uri_complete
            .as_deref()
            .unwrap_or(&self.verification_uri)
    }
}

pub async fn client_credentials_token(
    executor: &HttpExecutor,
    client: &OAuthClient<'_>,
) -> Result<TokenResponse> {
    let mut params = vec![("grant_type", "client_credentials")];
    params.extend(client.params());
    let url = tenant_url(client.tenant, TOKEN_PATH);
    let response = send_form(executor, &url, &params).await?;
    if response.status != 200 {
        return Err(token_error("client credentials grant", &response));
    }
    decode_token(&response)
}

pub async fn request_device_authorization(
    executor: &HttpExecutor,
    client: &OAuthClient<'_>,
) -> Result<DeviceAuthorization> {
    let url = tenant_url(client.tenant, DEVICE_AUTHORIZATION_PATH);
    let response = send_form(executor, &url, &client.params()).await?;
    if response.status != 200 {
        return Err(token_error("device authorization", &response));
    }
    response
        .json::<DeviceAuthorization>()
        .map_err(|err| Error::Authentication(format!("invalid device authorization response: {err}")))
}

/// Tuning for the device-code poll loop.
#[derive(Debug, Clone, Copy)]
pub struct DevicePollOptions {
    /// Seconds added to the interval on each `slow_down` answer.
    pub slow_down_step: u64,
}

impl Default for DevicePollOptions {
    fn default() -> Self {
        Self {
            slow_down_step: SLOW_DOWN_STEP_SECONDS,
        }
    }
}

/// Polls the token endpoint until the operator finishes the browser step.
pub async fn poll_device_token(
    executor: &HttpExecutor,
    client: &OAuthClient<'_>,
    device: &DeviceAuthorization,
) -> Result<TokenResponse> {
    poll_device_token_with(executor, client, device, DevicePollOptions::default()).await
}

pub async fn poll_device_token_with(
    executor: &HttpExecutor,
    client: &OAuthClient<'_>,
    device: &DeviceAuthorization,
    options: DevicePollOptions,
) -> Result<TokenResponse> {
    let url = tenant_url(client.tenant, TOKEN_PATH);
    let mut interval = device.interval.unwrap_or(DEFAULT_DEVICE_POLL_SECONDS);
    let expires_at = device_deadline(device.expires_in)?;
    loop {
        if Utc::now() >= expires_at {
            return Err(Error::Authentication("device code expired".to_string()));
        }

        let mut params = vec![
            ("grant_type", DEVICE_CODE_GRANT),
            ("device_code", device.device_code.as_str()),
        ];
        params.extend(client.params());
        let response = send_form(executor, &url, &params).await?;
        if response.status == 200 {
            return decode_token(&response);
        }

        let error = response
            .json::<TokenErrorResponse>()
            .unwrap_or(TokenErrorResponse {
                error: "unknown".to_string(),
                error_description: None,
            });
        match error.error.as_str() {
            "authorization_pending" => {
                debug!(interval, "device authorization pending");
            }
            "slow_down" => {
                interval = interval.saturating_add(options.slow_down_step);
                debug!(interval, "device authorization asked to slow down");
            }
            "access_denied" => return Err(Error::Authentication("access denied".to_string())),
            "expired_token" => {
                return Err(Error::Authentication("device code expired".to_string()))
            }
            _ => {
                let detail = error.error_description.unwrap_or_else(|| response.text());
                return Err(Error::Authentication(format!(
                    "token error: {} {}",
                    error.error, detail
                )));
            }
        }
        tokio::time::sleep(Duration::from_secs(interval)).await;
    }
}

fn device_deadline(expires_in: i64) -> Result<DateTime<Utc>> {
    ChronoDuration::try_seconds(expires_in)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .ok_or_else(|| Error::Authentication("invalid device authorization expiry".to_string()))
}

async fn send_form(
    executor: &HttpExecutor,
    url: &str,
    params: &[(&str, &str)],
) -> Result<RawResponse> {
    executor
        .post_form(url, params)
        .await
        .map_err(|err| Error::Authentication(format!("authorization server unreachable: {err}")))
}

fn decode_token(response: &RawResponse) -> Result<TokenResponse> {
    let token = response
        .json::<TokenResponse>()
        .map_err(|err| Error::Authentication(format!("invalid token response: {err}")))?;
    if token.access_token.is_empty() {
        return Err(Error::Authentication(
            "token response has an empty access_token".to_string(),
        ));
    }
    Ok(token)
}

fn token_error(grant: &str, response: &RawResponse) -> Error {
    match response.json::<TokenErrorResponse>() {
        Ok(err) => Error::Authentication(format!(
            "{grant} rejected ({}): {} {}",
            response.status,
            err.error,
            err.error_description.unwrap_or_default()
        )),
        Err(_) => Error::Authentication(format!(
            "{grant} rejected ({}): {}",
            response.status,
            response.text()
        )),
    }
}
