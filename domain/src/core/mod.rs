//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Provider`] / [`model::ParsedModel`]: provider set and model identifiers
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: UTF-8 safe string helpers

pub mod error;
pub mod model;
pub mod string;
