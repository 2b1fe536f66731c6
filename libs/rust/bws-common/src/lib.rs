//! Shared library for cross-cutting concerns in the Bitwarden Secrets Manager
//! Terraform provider.
//!
//! This crate provides centralized implementations for:
//! - HTTP client configuration and building
//! - `tracing` subscriber setup that keeps stdout free for the plugin host

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod http;
pub mod tracing_config;

pub use http::{HttpConfig, build_http_client};
pub use tracing_config::{TracingConfig, init_tracing};
