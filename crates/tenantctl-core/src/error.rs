use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("refusing to follow redirect from {url} (status {status}) to {location}")]
    Redirect {
        url: String,
        status: u16,
        location: String,
    },
    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Status(#[from] StatusError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error("{action} {}: {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Flat view of [`Error`] for callers that only branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Serialization,
    Authentication,
    Session,
    Status(StatusKind),
    Resolution,
    Filesystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Unauthorized,
    Forbidden,
    NotFound,
    BadRequestWithDetail,
    BadRequestOpaque,
    Generic,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport { .. } | Error::Redirect { .. } | Error::Header(_) => {
                ErrorKind::Transport
            }
            Error::Json(_) | Error::Yaml(_) => ErrorKind::Serialization,
            Error::Authentication(_) => ErrorKind::Authentication,
            Error::Session(_) => ErrorKind::Session,
            Error::Status(err) => ErrorKind::Status(err.kind()),
            Error::Resolution(_) => ErrorKind::Resolution,
            Error::Filesystem { .. } => ErrorKind::Filesystem,
        }
    }

    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        Error::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Error::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no current tenant; run `tenantctl login <tenant>` first")]
    NoCurrentTenant,
    #[error("no session for tenant {tenant}; run `tenantctl login {tenant}`")]
    NoSession { tenant: String },
    #[error("session token is empty; run `tenantctl login` again")]
    EmptyToken,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("{message}: login again, the session is invalid or has expired")]
    Unauthorized { message: String, body: String },
    #[error(
        "{message}: you are not allowed to make this request; check the entitlements granted to the API client or application"
    )]
    Forbidden { message: String, body: String },
    #[error("{message}: resource not found")]
    NotFound { message: String, body: String },
    #[error("{message_id} {message_description}")]
    BadRequest {
        message_id: String,
        message_description: String,
        body: String,
    },
    #[error("{message}: bad request: {body}")]
    BadRequestOpaque { message: String, body: String },
    #[error("unable to {operation}; code={status} body={body}")]
    Generic {
        operation: String,
        status: u16,
        body: String,
    },
}

impl StatusError {
    pub fn kind(&self) -> StatusKind {
        match self {
            StatusError::Unauthorized { .. } => StatusKind::Unauthorized,
            StatusError::Forbidden { .. } => StatusKind::Forbidden,
            StatusError::NotFound { .. } => StatusKind::NotFound,
            StatusError::BadRequest { .. } => StatusKind::BadRequestWithDetail,
            StatusError::BadRequestOpaque { .. } => StatusKind::BadRequestOpaque,
            StatusError::Generic { .. } => StatusKind::Generic,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            StatusError::Unauthorized { .. } => 401,
            StatusError::Forbidden { .. } => 403,
            StatusError::NotFound { .. } => 404,
            StatusError::BadRequest { .. } | StatusError::BadRequestOpaque { .. } => 400,
            StatusError::Generic { status, .. } => *status,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            StatusError::Unauthorized { body, .. }
            | StatusError::Forbidden { body, .. }
            | StatusError::NotFound { body, .. }
            | StatusError::BadRequest { body, .. }
            | StatusError::BadRequestOpaque { body, .. }
            | StatusError::Generic { body, .. } => body,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },
    #[error("{kind} '{name}' has an invalid identifier: {reason}")]
    InvalidFormat {
        kind: &'static str,
        name: String,
        reason: String,
    },
}
