use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::EntityKind;

/// Structured error body a remote service may attach to a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Failure returned by any collaborator call (query, mutation, export).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub status: Option<u16>,
    pub body: Option<ErrorBody>,
    pub reason: String,
}

impl ServiceError {
    /// A failure carrying a server-provided message.
    pub fn server(message: impl Into<String>) -> Self {
        Self {
            status: None,
            body: Some(ErrorBody {
                message: Some(message.into()),
            }),
            reason: String::new(),
        }
    }

    /// A failure with no server body (network, timeout, client-side).
    pub fn transport(reason: impl Into<String>) -> Self {
        Self {
            status: None,
            body: None,
            reason: reason.into(),
        }
    }

    /// Build from a raw response. A body that is not a JSON error object is
    /// kept as the reason instead.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => Self {
                status: Some(status),
                body: Some(parsed),
                reason: format!("request failed with status {}", status),
            },
            Err(_) => Self {
                status: Some(status),
                body: None,
                reason: String::from_utf8_lossy(body).trim().to_string(),
            },
        }
    }

    /// Message to show a user: server message, then reason, then `fallback`.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        let server = self
            .body
            .as_ref()
            .and_then(|body| body.message.as_deref())
            .filter(|message| !message.trim().is_empty());

        match server {
            Some(message) => message,
            None if !self.reason.trim().is_empty() => self.reason.as_str(),
            None => fallback,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.user_message("unknown service error");
        match self.status {
            Some(status) => write!(f, "service error ({}): {}", status, message),
            None => write!(f, "service error: {}", message),
        }
    }
}

impl std::error::Error for ServiceError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Refreshing a collection failed; the previous snapshot is retained.
    Fetch {
        kind: EntityKind,
        source: ServiceError,
    },
    /// A create/update/delete call failed; nothing local changed.
    Mutation {
        kind: EntityKind,
        source: ServiceError,
    },
    /// The export service failed.
    Export(ServiceError),
    /// The export payload was not valid base64.
    Decode(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Fetch { kind, source } => {
                write!(f, "failed to refresh {}: {}", kind.collection(), source)
            }
            CatalogError::Mutation { kind, source } => {
                write!(f, "{} mutation failed: {}", kind, source)
            }
            CatalogError::Export(source) => write!(f, "export failed: {}", source),
            CatalogError::Decode(message) => {
                write!(f, "export payload decode failed: {}", message)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Fetch { source, .. } => Some(source),
            CatalogError::Mutation { source, .. } => Some(source),
            CatalogError::Export(source) => Some(source),
            CatalogError::Decode(_) => None,
        }
    }
}

impl From<base64::DecodeError> for CatalogError {
    fn from(err: base64::DecodeError) -> Self {
        CatalogError::Decode(err.to_string())
    }
}
