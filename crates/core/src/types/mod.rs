//! Core types for Gully Bazaar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod geo;
pub mod id;
pub mod phone;
pub mod price;
pub mod product;
pub mod shop;
pub mod status;

pub use email::{Email, EmailError};
pub use geo::GeoPoint;
pub use id::*;
pub use phone::{Phone, PhoneError};
pub use price::{CurrencyCode, Price};
pub use product::{NewProduct, Product};
pub use shop::Shop;
pub use status::*;
