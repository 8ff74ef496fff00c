//! Core types for the VTEX console.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod id;
pub mod page;
pub mod price;
pub mod status;

pub use credential::{CredentialError, VtexCredentials, VtexEnvironment};
pub use id::*;
pub use page::{PAGE_SIZE, PageWindow, page_count};
pub use price::{DEFAULT_MARKUP, PricePlan};
pub use status::OrderStatus;
