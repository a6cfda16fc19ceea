//! # neutron-core
//!
//! Core types and utilities shared by OpenStack Neutron client crates.
//!
//! This crate provides the error type, client configuration, and HTTP request
//! plumbing that the per-extension client crates build on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and stable error codes
//! - [`config`] - Configuration structures for Neutron clients
//! - [`client`] - HTTP client utilities shared by extension clients
//! - [`query`] - URL query parameter helper

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod query;

// Re-export commonly used types
pub use error::{Error, Result};
