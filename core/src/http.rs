//! Transport configuration for outbound calls.
//!
//! # Design
//! A fresh `reqwest::blocking::Client` is built per call so the connect
//! and read/write timeouts of one call never leak into another. The
//! connect timeout bounds the dial phase; the request timeout is the
//! deadline for the whole round-trip.
//!
//! Deployments that require a TLS client certificate point the
//! `freshdesk_sslcert` / `freshdesk_sslkey` environment variables at PEM
//! files. When either variable is unset or the files fail to load, the
//! default configuration is used; certificate verification of the remote
//! is disabled either way, matching the service's self-signed staging
//! endpoints.

use std::env;
use std::fs;
use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_READ_WRITE_TIMEOUT: Duration = Duration::from_secs(20);

/// Environment variable holding the path of the TLS client certificate.
pub const SSL_CERT_ENV: &str = "freshdesk_sslcert";
/// Environment variable holding the path of the TLS client key.
pub const SSL_KEY_ENV: &str = "freshdesk_sslkey";

/// Build a blocking HTTP client with the given timeouts and the optional
/// TLS client identity from the environment.
pub fn timeout_client(
    connect: Duration,
    read_write: Duration,
) -> Result<reqwest::blocking::Client, ApiError> {
    let mut builder = reqwest::blocking::Client::builder()
        .connect_timeout(connect)
        .timeout(read_write)
        .danger_accept_invalid_certs(true);
    if let Some(identity) = client_identity() {
        builder = builder.identity(identity);
    }
    builder
        .build()
        .map_err(|e| ApiError::transport(format!("unable to build http client: {e}"), 0))
}

/// Load the client certificate and key named by the environment, if both
/// are present and readable. rustls wants one PEM bundle, so the two
/// files are concatenated.
fn client_identity() -> Option<reqwest::Identity> {
    let cert_path = env::var(SSL_CERT_ENV).ok().filter(|v| !v.is_empty())?;
    let key_path = env::var(SSL_KEY_ENV).ok().filter(|v| !v.is_empty())?;
    let mut pem = fs::read(cert_path).ok()?;
    pem.extend(fs::read(key_path).ok()?);
    reqwest::Identity::from_pem(&pem).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_client_builds() {
        assert!(timeout_client(DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_WRITE_TIMEOUT).is_ok());
    }

    #[test]
    fn no_identity_when_env_is_unset() {
        if env::var(SSL_CERT_ENV).is_err() && env::var(SSL_KEY_ENV).is_err() {
            assert!(client_identity().is_none());
        }
    }
}
