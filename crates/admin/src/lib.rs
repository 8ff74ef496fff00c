//! VTEX console library.
//!
//! The admin binary and the CLI both build on this crate:
//!
//! - [`vtex`]: authenticated client for the VTEX REST APIs
//! - [`actions`]: catalog, pricing, logistics and order actions wrapped in
//!   the `{success, data | error}` envelope
//! - [`catalog`]: paged catalog browsing over a [`catalog::CatalogSource`]
//! - [`services`]: bulk export and catalog diagnostics
//! - [`spreadsheet`]: `.xlsx` writing and stock file reading
//! - [`settings`]: the local credential store
//! - [`routes`]: HTTP pages, proxy and action endpoints
//!
//! # Security
//!
//! The console holds VTEX app keys with write access to the catalog. Bind
//! it to localhost or a private network only.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod actions;
pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod settings;
pub mod spreadsheet;
pub mod state;
pub mod vtex;

#[cfg(test)]
mod test_support;
