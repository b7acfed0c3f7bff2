//! Gully Bazaar Core - Shared types and geospatial kernel.
//!
//! This crate provides common types used across all Gully Bazaar components:
//! - `server` - JSON API serving shopkeepers, admins, and browsing users
//! - `cli` - Command-line tools for seeding and directory queries
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no backend access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, prices, and the
//!   shop/product records stored in the hosted backend
//! - [`geo`] - Great-circle distance and nearby-shop ranking over in-memory
//!   candidate sets

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod geo;
pub mod types;

pub use geo::*;
pub use types::*;
