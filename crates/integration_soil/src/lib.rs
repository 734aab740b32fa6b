//! ISRIC SoilGrids integration
//!
//! Client for the SoilGrids v2 REST API (<https://rest.isric.org>).
//! Provides gridded topsoil chemistry and texture without requiring an API key.

pub mod client;
mod models;

pub use client::{SoilClient, SoilConfig, SoilError, SoilGridsClient};
pub use models::{ORGANIC_CARBON_TO_MATTER, SoilProfile, TextureClass};
