//! HTTP request handlers

pub mod audit;
pub mod export;
pub mod health;
pub mod lot;
pub mod settings;

pub use audit::*;
pub use export::*;
pub use health::*;
pub use lot::*;
pub use settings::*;
