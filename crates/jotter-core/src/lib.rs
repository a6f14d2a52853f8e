//! # jotter-core
//!
//! Core types, traits, and abstractions for the jotter notes service.
//!
//! This crate provides the note model, the infrastructure error type and the
//! repository traits that the database and API crates depend on.

pub mod defaults;
pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
