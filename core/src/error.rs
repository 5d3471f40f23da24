//! Error type for the Freshdesk API client.
//!
//! # Design
//! The remote service reports failures as a structured object embedded in
//! the response envelope, so `ApiError` is both the wire shape and the
//! error type surfaced to callers. Locally-produced failures (transport,
//! decode) reuse the same shape with the best-known status code. "Not
//! Found" is a fixed value because callers frequently distinguish "the
//! resource does not exist" from "the server returned an unexpected
//! status"; compare it with `==`, not by identity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Structured error returned by every client operation.
///
/// Mirrors the remote error object:
/// `{error, stack, message, i18n_message, developer_message, code, more_info}`.
/// `more_info` maps a field name to its validation messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}:{message}")]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub stack: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub i18n_message: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub developer_message: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub code: u16,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub more_info: HashMap<String, Vec<String>>,
}

fn is_zero(code: &u16) -> bool {
    *code == 0
}

impl ApiError {
    /// The fixed value returned for any HTTP 404, regardless of body.
    pub fn not_found() -> Self {
        Self {
            error: "Not Found".to_string(),
            message: "Not Found".to_string(),
            i18n_message: "not.found".to_string(),
            code: 404,
            ..Self::default()
        }
    }

    /// Transport-level failure (dial, timeout, body read). `code` is the
    /// partial response status when one exists, else 500.
    pub fn transport(message: impl Into<String>, code: u16) -> Self {
        let message = message.into();
        Self {
            error: message.clone(),
            message,
            code,
            ..Self::default()
        }
    }

    /// Envelope or payload (de)serialization failure. The original remote
    /// error detail is unrecoverable at this point, so the parse failure
    /// message is the best available diagnostic.
    pub fn decode(message: impl Into<String>, code: u16) -> Self {
        let message = message.into();
        Self {
            error: message.clone(),
            message,
            code,
            ..Self::default()
        }
    }
}
