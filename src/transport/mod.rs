//! The single request/response exchange with the `/ask` endpoint.
//!
//! The widget never talks HTTP directly: it hands an [`AskRequest`] to an
//! [`AskTransport`] and interprets the [`AskResponse`] it gets back. The
//! production transport is [`HttpAskTransport`]; tests substitute their own.
//!
//! # Example
//!
//! ```rust,no_run
//! use ask_widget::transport::{AskRequest, AskTransport, HttpAskTransport};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpAskTransport::new("http://127.0.0.1:5000")?;
//! let response = transport
//!     .ask(AskRequest::Json { question: "Hello!".to_string() })
//!     .await?;
//! println!("{} bytes, status {}", response.body.len(), response.status);
//! # Ok(())
//! # }
//! ```

mod http;

pub use http::{ASK_PATH, HttpAskTransport};

use async_trait::async_trait;
use serde::Serialize;

use crate::widget::PendingAttachment;

/// Outgoing `/ask` request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskRequest {
    /// `application/json` body `{"question": ...}`.
    Json {
        /// The trimmed question.
        question: String,
    },
    /// `multipart/form-data` body with `question` and `file` fields.
    Multipart {
        /// The trimmed question, possibly empty.
        question: String,
        /// The staged file.
        file: PendingAttachment,
    },
}

impl AskRequest {
    /// The question carried by the request.
    #[must_use]
    pub fn question(&self) -> &str {
        match self {
            Self::Json { question } | Self::Multipart { question, .. } => question,
        }
    }

    /// The attached file, if any.
    #[must_use]
    pub fn attachment(&self) -> Option<&PendingAttachment> {
        match self {
            Self::Json { .. } => None,
            Self::Multipart { file, .. } => Some(file),
        }
    }
}

/// JSON body of a text-only request.
#[derive(Debug, Serialize)]
pub(crate) struct AskPayload<'a> {
    pub question: &'a str,
}

/// A completed HTTP exchange, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl AskResponse {
    /// Build a response from a status and a JSON value.
    #[must_use]
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self {
            status,
            body: value.to_string().into_bytes(),
        }
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Canonical reason phrase of the status, e.g. `Internal Server Error`.
    #[must_use]
    pub fn reason(&self) -> Option<&'static str> {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
    }
}

/// The request never completed.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The configured endpoint is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection, DNS, TLS or body read failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure reported by a non-HTTP transport.
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Performs one `/ask` exchange.
#[async_trait]
pub trait AskTransport: Send + Sync + std::fmt::Debug {
    /// Send the request and return the response, whatever its status.
    ///
    /// An `Err` means the request never completed.
    async fn ask(&self, request: AskRequest) -> Result<AskResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_helpers() {
        let ok = AskResponse::json(200, &json!({"answer": "hi"}));
        assert!(ok.is_success());

        let failed = AskResponse::json(500, &json!({"error": "boom"}));
        assert!(!failed.is_success());
        assert_eq!(failed.reason(), Some("Internal Server Error"));
    }

    #[test]
    fn test_request_accessors() {
        let request = AskRequest::Multipart {
            question: String::new(),
            file: PendingAttachment::new("a.txt", b"a".to_vec()),
        };
        assert_eq!(request.question(), "");
        assert_eq!(request.attachment().map(|f| f.name.as_str()), Some("a.txt"));

        let request = AskRequest::Json {
            question: "why".to_string(),
        };
        assert!(request.attachment().is_none());
    }

    #[test]
    fn test_payload_shape() {
        let body = serde_json::to_value(AskPayload { question: "why" }).unwrap();
        assert_eq!(body, json!({"question": "why"}));
    }
}
