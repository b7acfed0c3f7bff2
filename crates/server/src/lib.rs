//! Gully Bazaar server library.
//!
//! This crate provides the directory API as a library, allowing it to be
//! tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod appwrite;
pub mod config;
pub mod error;
pub mod geo;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
