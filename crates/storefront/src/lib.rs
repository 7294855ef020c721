//! Boutique storefront library.
//!
//! Catalog browsing (filter, search, sort, paginate), the shopping cart and
//! form validation for the Boutique clothing store, independent of any UI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod forms;
pub mod views;
