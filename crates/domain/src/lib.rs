//! Domain layer for the agro-climatic prediction engine
//!
//! Contains climate, soil and crop entities, value objects, the static
//! knowledge tables they are scored against, and domain errors.
//! This layer performs no I/O.

pub mod catalog;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
