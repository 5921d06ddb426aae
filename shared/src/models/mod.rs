//! Domain models for LotWatch

mod audit;
mod lot;
mod settings;

pub use audit::*;
pub use lot::*;
pub use settings::*;
