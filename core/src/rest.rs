//! Generic request executor.
//!
//! # Design
//! `Api` owns the base URL and basic-auth credentials for one remote
//! account and knows how to run a single synchronous round-trip: build
//! the request, send it with a per-call transport client, hand the status
//! and body to the envelope protocol. It carries no mutable state, so a
//! shared reference is safe across threads.
//!
//! Each request disables keep-alive; client instances are short-lived and
//! holding pooled connections open would outlast them.

use std::time::Duration;

use reqwest::header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::envelope;
use crate::error::ApiError;
use crate::http::{self, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_WRITE_TIMEOUT};

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Executes envelope-wrapped HTTP requests with basic authentication.
#[derive(Debug, Clone)]
pub struct Api {
    base_url: String,
    username: String,
    password: String,
    connect_timeout: Duration,
    read_write_timeout: Duration,
    trace_wire: bool,
}

impl Api {
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_write_timeout: DEFAULT_READ_WRITE_TIMEOUT,
            trace_wire: false,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_timeouts(&mut self, connect: Duration, read_write: Duration) {
        self.connect_timeout = connect;
        self.read_write_timeout = read_write;
    }

    /// Log raw request/response pairs at debug level.
    pub fn set_trace_wire(&mut self, on: bool) {
        self.trace_wire = on;
    }

    /// Run a request and decode the envelope payload into `T`.
    pub fn execute<T: DeserializeOwned>(
        &self,
        url: &str,
        method: Method,
        payload: Option<&str>,
        content_type: &str,
    ) -> Result<T, ApiError> {
        let (status, body) = self.round_trip(url, method, payload, content_type)?;
        envelope::decode_reply(status, &body)
    }

    /// Run a request where only success or failure matters (deletes).
    pub fn execute_empty(&self, url: &str, method: Method) -> Result<(), ApiError> {
        let (status, body) = self.round_trip(url, method, None, CONTENT_TYPE_JSON)?;
        envelope::acknowledge(status, &body)
    }

    fn round_trip(
        &self,
        url: &str,
        method: Method,
        payload: Option<&str>,
        content_type: &str,
    ) -> Result<(u16, String), ApiError> {
        if url.contains('%') {
            // Caller bug: a parameter reached the URL without escaping.
            warn!(url, "request url contains a literal percent");
        }

        let client = http::timeout_client(self.connect_timeout, self.read_write_timeout)?;
        let mut request = client
            .request(method.clone(), url.trim())
            .basic_auth(&self.username, Some(&self.password))
            .header(CONNECTION, "close");
        if let Some(payload) = payload.filter(|p| !p.is_empty()) {
            request = request
                .header(CONTENT_TYPE, content_type)
                .header(CONTENT_LENGTH, payload.len())
                .body(payload.to_string());
        }

        let response = request.send().map_err(|e| {
            let code = e.status().map(|s| s.as_u16()).unwrap_or(500);
            ApiError::transport(e.to_string(), code)
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ApiError::transport(e.to_string(), status))?;

        if self.trace_wire {
            debug!(url, %method, status, body = body.as_str(), "wire");
        }
        Ok((status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let api = Api::new("http://localhost:3000/", "user", "pass");
        assert_eq!(api.base_url(), "http://localhost:3000");
    }

    #[test]
    fn timeouts_and_trace_flag_are_settable() {
        let mut api = Api::new("http://localhost:3000", "user", "pass");
        api.set_timeouts(Duration::from_secs(1), Duration::from_secs(2));
        api.set_trace_wire(true);
        assert_eq!(api.connect_timeout, Duration::from_secs(1));
        assert_eq!(api.read_write_timeout, Duration::from_secs(2));
        assert!(api.trace_wire);
    }
}
