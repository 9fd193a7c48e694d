//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the server's `{message}` when present
    #[error("API error {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Api { status: u16, message: Option<String> },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session file could not be read or written
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not logged in")]
    NotLoggedIn,

    /// Refused locally: outside the daily reservation window
    #[error("Reservations closed: {0}")]
    ReservationClosed(String),

    /// Refused locally: the zone still has reserved or occupied slots
    #[error("Zone {zone} has reserved or occupied slots")]
    ZoneInUse { zone: String },

    /// Unknown id in local state
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ClientError {
    /// Text for an error banner: the server's message when it sent one,
    /// local refusals as-is, `fallback` for everything else.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::ReservationClosed(message) => message.clone(),
            ClientError::ZoneInUse { .. } => {
                "Cannot delete a block with reserved or occupied slots".to_string()
            }
            ClientError::NotLoggedIn => "Please log in again".to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Token missing, expired or rejected
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::NotLoggedIn) || self.status() == Some(401)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ClientError::Api {
            status: 400,
            message: Some("At least one admin must remain active".to_string()),
        };
        assert_eq!(
            err.user_message("Failed to toggle admin status"),
            "At least one admin must remain active"
        );

        let bare = ClientError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(
            bare.user_message("Failed to toggle admin status"),
            "Failed to toggle admin status"
        );
    }

    #[test]
    fn unauthorized_detection() {
        let expired = ClientError::Api {
            status: 401,
            message: Some("Invalid or expired token".to_string()),
        };
        assert!(expired.is_unauthorized());
        assert!(ClientError::NotLoggedIn.is_unauthorized());
        assert!(!ClientError::NotFound("slot:a".into()).is_unauthorized());
    }
}
