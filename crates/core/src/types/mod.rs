//! Core types for Boutique.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod id;
pub mod line_item;
pub mod price;
pub mod product;
pub mod size;
pub mod status;

pub use id::*;
pub use line_item::{LineItem, MergeKey, UNKNOWN_ATTRIBUTE};
pub use price::{Price, PriceError};
pub use product::Product;
pub use size::Size;
pub use status::*;
