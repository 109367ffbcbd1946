//! Error taxonomy for the connector and the HTTP status classification
//! every response goes through.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConnectorError>;

#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Handshake failures and 401/402/403/407 responses.
    #[error("authentication failed: {message}")]
    Authentication {
        message: String,
        status: Option<u16>,
    },

    /// 400/405/406 responses, bad configuration, rejected filter fields.
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        status: Option<u16>,
    },

    /// 404/410 responses.
    #[error("not found: {path} ({status})")]
    NotFound { path: String, status: u16 },

    /// 408 responses and client-side connect/read timeouts.
    #[error("timed out: {message}")]
    Timeout { message: String },

    /// 409 responses: the object already exists.
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// 412 responses.
    #[error("precondition failed: {message}")]
    PreconditionFailed { message: String },

    /// Responses the codec cannot make sense of (missing id, missing
    /// `_embedded` key, invalid JSON).
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// Remaining 4xx/5xx plus connection-level failures (status 0 when the
    /// response never arrived).
    #[error("transport failure (status {status}): {body}")]
    Transport { status: u16, body: String },
}

impl ConnectorError {
    pub fn is_authentication(&self) -> bool {
        matches!(self, ConnectorError::Authentication { .. })
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ConnectorError::Timeout {
                message: err.to_string(),
            }
        } else {
            ConnectorError::Transport {
                status: 0,
                body: err.to_string(),
            }
        }
    }
}

/// Map a final HTTP status onto the taxonomy. `Ok(())` for any 2xx.
pub fn classify_status(status: u16, path: &str, body: &str) -> Result<()> {
    match status {
        200..=299 => Ok(()),
        400 | 405 | 406 => Err(ConnectorError::Validation {
            message: format!("{}: {}", path, truncate(body)),
            status: Some(status),
        }),
        401 | 402 | 403 | 407 => Err(ConnectorError::Authentication {
            message: format!("request rejected for {}", path),
            status: Some(status),
        }),
        404 | 410 => Err(ConnectorError::NotFound {
            path: path.to_owned(),
            status,
        }),
        408 => Err(ConnectorError::Timeout {
            message: format!("server reported timeout for {}", path),
        }),
        409 => Err(ConnectorError::Conflict {
            message: format!("{}: object already exists", path),
        }),
        412 => Err(ConnectorError::PreconditionFailed {
            message: path.to_owned(),
        }),
        other => Err(ConnectorError::Transport {
            status: other,
            body: body.to_owned(),
        }),
    }
}

/// Keep diagnostics readable when a server dumps a full HTML error page.
fn truncate(body: &str) -> &str {
    let cut = body
        .char_indices()
        .nth(512)
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    &body[..cut]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn success_range_is_not_an_error() {
        assert!(classify_status(200, "/p", "").is_ok());
        assert!(classify_status(204, "/p", "").is_ok());
    }

    #[test]
    fn taxonomy_table() {
        assert!(matches!(
            classify_status(400, "/p", "bad").unwrap_err(),
            ConnectorError::Validation { status: Some(400), .. }
        ));
        assert!(matches!(
            classify_status(401, "/p", "").unwrap_err(),
            ConnectorError::Authentication { status: Some(401), .. }
        ));
        assert!(matches!(
            classify_status(403, "/p", "").unwrap_err(),
            ConnectorError::Authentication { status: Some(403), .. }
        ));
        assert!(matches!(
            classify_status(404, "/p", "").unwrap_err(),
            ConnectorError::NotFound { status: 404, .. }
        ));
        assert!(matches!(
            classify_status(408, "/p", "").unwrap_err(),
            ConnectorError::Timeout { .. }
        ));
        assert!(matches!(
            classify_status(409, "/p", "").unwrap_err(),
            ConnectorError::Conflict { .. }
        ));
        assert!(matches!(
            classify_status(410, "/p", "").unwrap_err(),
            ConnectorError::NotFound { status: 410, .. }
        ));
        assert!(matches!(
            classify_status(412, "/p", "").unwrap_err(),
            ConnectorError::PreconditionFailed { .. }
        ));
    }

    #[test]
    fn unmapped_statuses_fall_back_to_transport() {
        let err = classify_status(500, "/p", "boom").unwrap_err();
        match err {
            ConnectorError::Transport { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Transport, got {other:?}"),
        }
        assert!(matches!(
            classify_status(418, "/p", "").unwrap_err(),
            ConnectorError::Transport { status: 418, .. }
        ));
    }
}
