//! `catalog-core` — domain foundation shared by the catalog crates.
//!
//! Holds the error model and identifiers only; no infrastructure concerns.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
