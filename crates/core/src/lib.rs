//! VTEX Console Core - Shared types library.
//!
//! This crate provides common types used across all VTEX console components:
//! - `admin` - Web console that proxies the VTEX REST APIs
//! - `cli` - Command-line front end for exports, diagnostics and mutations
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no HTTP
//! clients, no file access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed ids, credentials, catalog pagination, order status
//!   and pricing rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
