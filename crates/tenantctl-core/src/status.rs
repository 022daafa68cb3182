use serde::Deserialize;

use crate::{RawResponse, Result, StatusError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceErrorDetail {
    message_id: String,
    message_description: String,
}

/// Maps the statuses every command treats the same way to an operator-facing error.
///
/// Returns `None` for anything else (including success codes) so the caller can decide
/// what the status means for its own operation.
pub fn classify(response: &RawResponse, default_message: &str) -> Option<StatusError> {
    let message = default_message.to_string();
    let body = response.text();
    match response.status {
        401 => Some(StatusError::Unauthorized { message, body }),
        403 => Some(StatusError::Forbidden { message, body }),
        404 => Some(StatusError::NotFound { message, body }),
        400 => match serde_json::from_slice::<ServiceErrorDetail>(&response.body) {
            Ok(detail) => Some(StatusError::BadRequest {
                message_id: detail.message_id,
                message_description: detail.message_description,
                body,
            }),
            Err(_) => Some(StatusError::BadRequestOpaque { message, body }),
        },
        _ => None,
    }
}

/// Succeeds only on `expected`; otherwise returns the classified or generic status error.
pub fn expect_status(response: &RawResponse, expected: u16, operation: &str) -> Result<()> {
    if response.is_status(expected) {
        return Ok(());
    }
    if let Some(err) = classify(response, &format!("unable to {operation}")) {
        return Err(err.into());
    }
    Err(StatusError::Generic {
        operation: operation.to_string(),
        status: response.status,
        body: response.text(),
    }
    .into())
}
