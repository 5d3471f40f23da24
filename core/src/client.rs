//! Resource clients for the Freshdesk API.
//!
//! # Design
//! `FreshdeskClient` is a thin layer over [`Api`]: each operation formats
//! one resource URL, optionally wraps a model in the request payload
//! shape, and delegates the round-trip and envelope decoding to the
//! executor. The client holds the executor by composition and carries no
//! state of its own.

use std::time::Duration;

use reqwest::Method;

use crate::error::ApiError;
use crate::rest::{Api, CONTENT_TYPE_JSON};
use crate::types::{Customer, CustomerRequest, User, UserRequest};

/// Client for one Freshdesk account, authenticated with either a
/// username/password pair or an API key used as the username.
#[derive(Debug, Clone)]
pub struct FreshdeskClient {
    api: Api,
}

impl FreshdeskClient {
    /// Client for `https://{domain}.freshdesk.com` (or `http` when
    /// `secure` is false).
    pub fn new(domain: &str, username: &str, password: &str, secure: bool) -> Self {
        let protocol = if secure { "https" } else { "http" };
        Self::with_base_url(
            &format!("{protocol}://{domain}.freshdesk.com"),
            username,
            password,
        )
    }

    /// API-key authentication: the key is sent as the basic-auth username
    /// with a placeholder password.
    pub fn from_api_key(domain: &str, api_key: &str, secure: bool) -> Self {
        Self::new(domain, api_key, "X", secure)
    }

    /// Client against an explicit base URL. Intended for tests and
    /// self-hosted endpoints.
    pub fn with_base_url(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            api: Api::new(base_url, username, password),
        }
    }

    pub fn timeouts(mut self, connect: Duration, read_write: Duration) -> Self {
        self.api.set_timeouts(connect, read_write);
        self
    }

    /// Log raw request/response pairs at debug level.
    pub fn trace_wire(mut self, on: bool) -> Self {
        self.api.set_trace_wire(on);
        self
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    /// POST /contacts.json
    pub fn create_user(&self, name: &str, email: &str) -> Result<User, ApiError> {
        let payload = encode(&UserRequest {
            user: User {
                name: Some(name.to_string()),
                email: Some(email.to_string()),
                ..User::default()
            },
        })?;
        let url = format!("{}/contacts.json", self.api.base_url());
        self.api
            .execute(&url, Method::POST, Some(&payload), CONTENT_TYPE_JSON)
    }

    /// GET /contacts/{id}.json
    pub fn user(&self, id: u64) -> Result<User, ApiError> {
        let url = format!("{}/contacts/{id}.json", self.api.base_url());
        self.api.execute(&url, Method::GET, None, CONTENT_TYPE_JSON)
    }

    /// DELETE /contacts/{id}.json — success is exactly "no error".
    pub fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        let url = format!("{}/contacts/{id}.json", self.api.base_url());
        self.api.execute_empty(&url, Method::DELETE)
    }

    /// POST /customer.json
    pub fn create_customer(
        &self,
        name: &str,
        domains: &str,
        description: &str,
    ) -> Result<Customer, ApiError> {
        let payload = encode(&CustomerRequest {
            customer: Customer {
                name: Some(name.to_string()),
                domains: Some(domains.to_string()),
                description: Some(description.to_string()),
                ..Customer::default()
            },
        })?;
        let url = format!("{}/customer.json", self.api.base_url());
        self.api
            .execute(&url, Method::POST, Some(&payload), CONTENT_TYPE_JSON)
    }

    /// GET /customers.json, optionally filtered by starting letter.
    pub fn customers(&self, letter: Option<&str>) -> Result<Vec<Customer>, ApiError> {
        let mut url = format!("{}/customers.json", self.api.base_url());
        if let Some(letter) = letter.filter(|l| !l.is_empty()) {
            url.push_str("?letter=");
            url.push_str(letter);
        }
        self.api.execute(&url, Method::GET, None, CONTENT_TYPE_JSON)
    }

    /// GET /customers/{id}.json
    pub fn customer(&self, id: u64) -> Result<Customer, ApiError> {
        let url = format!("{}/customers/{id}.json", self.api.base_url());
        self.api.execute(&url, Method::GET, None, CONTENT_TYPE_JSON)
    }

    /// DELETE /customers/{id}.json — success is exactly "no error".
    pub fn delete_customer(&self, id: u64) -> Result<(), ApiError> {
        let url = format!("{}/customers/{id}.json", self.api.base_url());
        self.api.execute_empty(&url, Method::DELETE)
    }
}

fn encode<T: serde::Serialize>(payload: &T) -> Result<String, ApiError> {
    serde_json::to_string(payload)
        .map_err(|e| ApiError::decode(format!("unable to encode request payload: {e}"), 0))
}
