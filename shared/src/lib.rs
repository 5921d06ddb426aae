//! Shared types and domain logic for LotWatch
//!
//! This crate contains the types and pure rules shared between the backend
//! service, its report renderers and the auto-export pipeline.

pub mod format;
pub mod i18n;
pub mod models;
pub mod types;
pub mod validation;

pub use format::*;
pub use i18n::*;
pub use models::*;
pub use types::*;
pub use validation::*;
