//! Application layer - Use cases and orchestration
//!
//! Contains the prediction services and the port definitions through which
//! they reach weather, soil and notification adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
