//! On-disk credential store: one bearer token per tenant plus the current tenant.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result, SessionError, CONFIG_API_VERSION, CONFIG_DIR_ENV, CONFIG_DIR_NAME,
    CONFIG_FILE_NAME, CONFIG_KIND,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSession {
    pub tenant: String,
    pub token: String,
    #[serde(rename = "isUser", default)]
    pub is_user: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialFile {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub sessions: Vec<TenantSession>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_tenant: Option<String>,
}

fn default_api_version() -> String {
    CONFIG_API_VERSION.to_string()
}

fn default_kind() -> String {
    CONFIG_KIND.to_string()
}

impl Default for CredentialFile {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            sessions: Vec::new(),
            current_tenant: None,
        }
    }
}

/// Directory holding the credential file: `$TENANTCTL_CONFIG_DIR`, else `~/.tenantctl`.
pub fn default_config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| {
            Error::filesystem(
                "locate",
                CONFIG_DIR_NAME,
                io::Error::new(io::ErrorKind::NotFound, "HOME is not set"),
            )
        })?;
    Ok(Path::new(&home).join(CONFIG_DIR_NAME))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(default_config_dir()?.join(CONFIG_FILE_NAME))
}

/// The credential file loaded in memory. Mutations only reach disk through [`persist`].
///
/// [`persist`]: CredentialStore::persist
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    file: CredentialFile,
}

impl CredentialStore {
    pub fn open_default() -> Result<Self> {
        Self::load(default_config_path()?)
    }

    /// Reads the file at `path`; a missing or empty file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!(path = %path.display(), "credential file not found; starting empty");
            return Ok(Self {
                path,
                file: CredentialFile::default(),
            });
        }
        let contents =
            fs::read_to_string(&path).map_err(|err| Error::filesystem("read", &path, err))?;
        let file = if contents.trim().is_empty() {
            CredentialFile::default()
        } else {
            serde_yaml::from_str(&contents)?
        };
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> &CredentialFile {
        &self.file
    }

    pub fn sessions(&self) -> impl Iterator<Item = &TenantSession> {
        self.file.sessions.iter()
    }

    pub fn current_tenant(&self) -> Option<&str> {
        self.file.current_tenant.as_deref()
    }

    /// Inserts a session, or replaces the token of an existing tenant in place.
    pub fn add_session(&mut self, tenant: &str, token: &str, is_user: bool) {
        let session = TenantSession {
            tenant: tenant.to_string(),
            token: token.to_string(),
            is_user,
        };
        match self.file.sessions.iter_mut().find(|s| s.tenant == tenant) {
            Some(existing) => *existing = session,
            None => self.file.sessions.push(session),
        }
    }

    pub fn remove_session(&mut self, tenant: &str) -> bool {
        let before = self.file.sessions.len();
        self.file.sessions.retain(|s| s.tenant != tenant);
        if self.file.current_tenant.as_deref() == Some(tenant) {
            self.file.current_tenant = None;
        }
        self.file.sessions.len() != before
    }

    /// Does not check that `tenant` has a session.
    pub fn set_current_tenant(&mut self, tenant: &str) {
        self.file.current_tenant = Some(tenant.to_string());
    }

    pub fn session(&self, tenant: &str) -> Result<&TenantSession, SessionError> {
        self.file
            .sessions
            .iter()
            .find(|s| s.tenant == tenant)
            .ok_or_else(|| SessionError::NoSession {
                tenant: tenant.to_string(),
            })
    }

    pub fn current_session(&self) -> Result<&TenantSession, SessionError> {
        let tenant = self
            .file
            .current_tenant
            .as_deref()
            .filter(|tenant| !tenant.is_empty())
            .ok_or(SessionError::NoCurrentTenant)?;
        self.session(tenant)
    }

    /// Writes the whole document to a sibling temp file and renames it over the target.
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_private_dir(parent)?;
        }
        let contents = serde_yaml::to_string(&self.file)?;
        let tmp = self.path.with_extension("tmp");
        write_private_file(&tmp, contents.as_bytes())
            .map_err(|err| Error::filesystem("write", &tmp, err))?;
        fs::rename(&tmp, &self.path).map_err(|err| Error::filesystem("replace", &self.path, err))?;
        debug!(path = %self.path.display(), sessions = self.file.sessions.len(), "credential file saved");
        Ok(())
    }
}

fn create_private_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|err| Error::filesystem("create", dir, err))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
            .map_err(|err| Error::filesystem("restrict", dir, err))?;
    }
    Ok(())
}

fn write_private_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().expect("tempdir");
        let store = CredentialStore::load(dir.path().join("nope").join("config")).expect("load");
        assert_eq!(store.sessions().count(), 0);
        assert_eq!(store.current_tenant(), None);
        assert_eq!(store.file().kind, CONFIG_KIND);
    }

    #[test]
    fn persist_then_load_round_trips() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("cfg").join("config");
        let mut store = CredentialStore::load(&path).expect("load");
        store.add_session("a.example.com", "tok-a", false);
        store.add_session("b.example.com", "tok-b", true);
        store.set_current_tenant("b.example.com");
        store.persist().expect("persist");

        let reloaded = CredentialStore::load(&path).expect("reload");
        assert_eq!(reloaded.file(), store.file());
        assert_eq!(reloaded.current_tenant(), Some("b.example.com"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn add_session_replaces_in_place() {
        let dir = tempdir().expect("tempdir");
        let mut store = CredentialStore::load(dir.path().join("config")).expect("load");
        store.add_session("a", "one", false);
        store.add_session("b", "two", false);
        store.add_session("a", "three", true);

        let sessions: Vec<_> = store.sessions().collect();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].tenant, "a");
        assert_eq!(sessions[0].token, "three");
        assert!(sessions[0].is_user);
        assert_eq!(sessions[1].tenant, "b");
    }

    #[test]
    fn current_session_requires_tenant_and_session() {
        let dir = tempdir().expect("tempdir");
        let mut store = CredentialStore::load(dir.path().join("config")).expect("load");
        assert_eq!(
            store.current_session().unwrap_err(),
            SessionError::NoCurrentTenant
        );

        store.set_current_tenant("ghost");
        assert_eq!(
            store.current_session().unwrap_err(),
            SessionError::NoSession {
                tenant: "ghost".to_string()
            }
        );

        store.add_session("ghost", "tok", false);
        assert_eq!(store.current_session().expect("session").token, "tok");
    }

    #[test]
    fn remove_session_clears_current() {
        let dir = tempdir().expect("tempdir");
        let mut store = CredentialStore::load(dir.path().join("config")).expect("load");
        store.add_session("a", "one", false);
        store.set_current_tenant("a");
        assert!(store.remove_session("a"));
        assert!(!store.remove_session("a"));
        assert_eq!(store.current_tenant(), None);
    }

    #[test]
    fn reads_documented_yaml_layout() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config");
        fs::write(
            &path,
            "apiVersion: \"1.0\"\nkind: Config\nsessions:\n  - tenant: t.example.com\n    token: abc\n    isUser: true\ncurrentTenant: t.example.com\n",
        )
        .expect("write");
        let store = CredentialStore::load(&path).expect("load");
        let session = store.current_session().expect("session");
        assert_eq!(session.token, "abc");
        assert!(session.is_user);
    }

    #[test]
    fn empty_file_loads_empty() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config");
        fs::write(&path, "\n").expect("write");
        let store = CredentialStore::load(&path).expect("load");
        assert_eq!(store.sessions().count(), 0);
    }

    #[test]
    fn garbage_file_is_a_serialization_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config");
        fs::write(&path, "sessions: [this is: not: valid").expect("write");
        let err = CredentialStore::load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[cfg(unix)]
    #[test]
    fn persist_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().expect("tempdir");
        let config_dir = dir.path().join("private");
        let path = config_dir.join("config");
        let mut store = CredentialStore::load(&path).expect("load");
        store.add_session("a", "one", false);
        store.persist().expect("persist");

        let dir_mode = fs::metadata(&config_dir).expect("meta").permissions().mode();
        let file_mode = fs::metadata(&path).expect("meta").permissions().mode();
        assert_eq!(dir_mode & 0o777, 0o700);
        assert_eq!(file_mode & 0o777, 0o600);
    }
}
