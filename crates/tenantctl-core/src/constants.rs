use std::time::Duration;

pub const CONFIG_DIR_ENV: &str = "TENANTCTL_CONFIG_DIR";
pub const CONFIG_DIR_NAME: &str = ".tenantctl";
pub const CONFIG_FILE_NAME: &str = "config";
pub const CONFIG_API_VERSION: &str = "1.0";
pub const CONFIG_KIND: &str = "Config";

pub const TOKEN_PATH: &str = "/oauth2/token";
pub const DEVICE_AUTHORIZATION_PATH: &str = "/oauth2/device_authorization";
pub const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";
pub const DEFAULT_DEVICE_POLL_SECONDS: u64 = 5;
pub const SLOW_DOWN_STEP_SECONDS: u64 = 5;

/// Log query endpoints can hold a request open for a long time.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30 * 60);
pub const FOLLOW_INTERVAL: Duration = Duration::from_secs(10);

pub const MEDIA_JSON: &str = "application/json";
pub const MEDIA_SCIM: &str = "application/scim+json";
pub const SCIM_PATCH_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:PatchOp";
