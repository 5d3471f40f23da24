//! Response envelope protocol.
//!
//! # Design
//! Every reply from the service is wrapped in the same JSON envelope:
//!
//! ```json
//! { "status": {"code": 0, "message": "...", "i18n_message": "..."},
//!   "response": { ... },
//!   "time_to_process": "..." }
//! ```
//!
//! The shape of `response` depends on the outcome: a typed result on
//! success, the `ApiError` object on failure. Decoding is two-phase —
//! the envelope is parsed with `response` left as raw JSON, and the raw
//! slice is then decoded into the caller's target type or into `ApiError`
//! depending on the HTTP status branch. Decoding is pure: the same body
//! always yields the same result.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::ApiError;

/// Status block carried by every envelope. A zero or absent code means
/// success.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub code: u16,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub i18n_message: String,
}

/// The wire envelope with `response` kept undecoded.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: ApiStatus,

    #[serde(default)]
    pub response: Option<Box<RawValue>>,

    #[serde(default)]
    pub time_to_process: Option<String>,
}

/// Decode a reply into `T`.
///
/// - 404 produces [`ApiError::not_found`] without touching the body.
/// - Other statuses >= 300 produce the `ApiError` embedded in the
///   envelope, or a decode error when the body does not parse.
/// - Statuses < 300 decode `response` into `T`; a missing payload or a
///   parse failure is surfaced as a decode error, never ignored.
pub fn decode_reply<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let envelope = parse_success(status, body)?;
    let raw = envelope
        .response
        .ok_or_else(|| ApiError::decode("envelope has no response payload", 0))?;
    serde_json::from_str(raw.get())
        .map_err(|e| ApiError::decode(format!("unable to decode response payload: {e}"), 0))
}

/// Decode a reply that carries no interesting payload (deletes).
///
/// The envelope must still parse on success statuses; the payload decode
/// is skipped and success is the absence of an error.
pub fn acknowledge(status: u16, body: &str) -> Result<(), ApiError> {
    parse_success(status, body).map(|_| ())
}

fn parse_success(status: u16, body: &str) -> Result<Envelope, ApiError> {
    if status == 404 {
        return Err(ApiError::not_found());
    }
    if status >= 300 {
        return Err(remote_error(status, body));
    }
    serde_json::from_str(body)
        .map_err(|e| ApiError::decode(format!("unable to decode envelope: {e}"), 0))
}

/// Turn a non-2xx body into the error the service embedded in it, falling
/// back to a decode error carrying the HTTP status when the body is not a
/// parseable envelope.
fn remote_error(status: u16, body: &str) -> ApiError {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => return ApiError::decode(format!("unable to decode envelope: {e}"), status),
    };
    let raw = match envelope.response {
        Some(raw) => raw,
        None => return ApiError::decode("error envelope has no response payload", status),
    };
    match serde_json::from_str::<ApiError>(raw.get()) {
        Ok(err) => err,
        Err(e) => ApiError::decode(format!("unable to decode error payload: {e}"), status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::User;

    const USER_BODY: &str =
        r#"{"status":{"code":0},"response":{"id":7,"name":"Ann","email":"a@b.com"}}"#;

    #[test]
    fn success_decodes_into_target_type() {
        let user: User = decode_reply(200, USER_BODY).unwrap();
        assert_eq!(user.id, Some(7));
        assert_eq!(user.name.as_deref(), Some("Ann"));
        assert_eq!(user.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn decoding_is_idempotent() {
        let first: User = decode_reply(200, USER_BODY).unwrap();
        let second: User = decode_reply(200, USER_BODY).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn not_found_ignores_body() {
        for body in ["", "not json", USER_BODY] {
            let err = decode_reply::<User>(404, body).unwrap_err();
            assert_eq!(err, ApiError::not_found());
        }
    }

    #[test]
    fn remote_error_surfaces_embedded_fields() {
        let body = r#"{"status":{"code":400},"response":{"code":400,"message":"bad field","more_info":{"email":["required"]}}}"#;
        let err = decode_reply::<User>(400, body).unwrap_err();
        assert_eq!(err.code, 400);
        assert_eq!(err.message, "bad field");
        assert_eq!(err.more_info["email"], vec!["required"]);
    }

    #[test]
    fn malformed_error_body_becomes_decode_error_with_status() {
        let err = decode_reply::<User>(500, "<html>oops</html>").unwrap_err();
        assert_eq!(err.code, 500);
        assert!(err.message.contains("unable to decode envelope"));
    }

    #[test]
    fn error_envelope_with_unparseable_payload_is_a_decode_error() {
        let body = r#"{"status":{"code":502},"response":"plain text"}"#;
        let err = decode_reply::<User>(502, body).unwrap_err();
        assert_eq!(err.code, 502);
        assert!(err.message.contains("unable to decode error payload"));
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let err = decode_reply::<User>(200, "not json").unwrap_err();
        assert!(err.message.contains("unable to decode envelope"));
        assert_eq!(err.code, 0);
    }

    #[test]
    fn success_without_payload_fails_typed_decode() {
        let err = decode_reply::<User>(200, r#"{"status":{"code":0}}"#).unwrap_err();
        assert!(err.message.contains("no response payload"));
    }

    #[test]
    fn acknowledge_skips_payload_decode() {
        assert!(acknowledge(200, r#"{"status":{"code":0}}"#).is_ok());
        assert!(acknowledge(200, r#"{"status":{"code":0},"response":null}"#).is_ok());
    }

    #[test]
    fn acknowledge_still_reports_not_found() {
        assert_eq!(acknowledge(404, "").unwrap_err(), ApiError::not_found());
    }

    #[test]
    fn time_to_process_is_carried() {
        let body = r#"{"status":{"code":0},"response":{},"time_to_process":"12ms"}"#;
        let envelope: Envelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.time_to_process.as_deref(), Some("12ms"));
        assert_eq!(envelope.status.code, 0);
    }
}
