//! Synchronous client library for the Freshdesk helpdesk API.
//!
//! # Overview
//! Covers contact and customer create/view/delete over HTTP with basic
//! authentication. Every reply travels in the same JSON envelope — status
//! metadata plus either a typed result or a structured error — and the
//! crate's core is the generic executor/envelope pair that turns one URL
//! and method into one decoded result.
//!
//! # Design
//! - [`FreshdeskClient`] holds a named [`rest::Api`] executor and exposes
//!   one method per resource operation.
//! - The envelope is decoded in two phases: the wrapper with `response`
//!   left raw, then the raw slice into the target type or [`ApiError`]
//!   depending on the HTTP status.
//! - One blocking request per call, no retries, no shared state; timeouts
//!   are the only cancellation mechanism.

pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod rest;
pub mod types;

pub use client::FreshdeskClient;
pub use error::ApiError;
pub use rest::{Api, CONTENT_TYPE_JSON};
pub use types::{Customer, CustomerRequest, User, UserRequest};
