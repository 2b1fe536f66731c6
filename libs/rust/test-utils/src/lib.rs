//! Shared test utilities for the Secrets Manager provider.
//!
//! This crate provides:
//! - Proptest generators for names, keys and identifiers
//! - An in-memory Secrets Manager client that records every call
//! - Test fixtures with sample data

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
pub use mocks::{MockCall, MockSecretsManagerClient, Operation};
