//! Boutique Core - Shared domain types.
//!
//! This crate provides the types used across all Boutique components:
//! - `storefront` - Catalog pipeline, cart store and form validation
//! - `cli` - Command-line front end over the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product and line item records, prices, sizes, IDs and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
