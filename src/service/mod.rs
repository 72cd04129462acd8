//! Persistence façade and request validation.

pub mod crud;
mod validation;
pub use validation::RequestValidator;
