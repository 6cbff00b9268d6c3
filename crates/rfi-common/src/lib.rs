//! Shared types for the RFI compliance explorer.
//!
//! This crate contains:
//! - **Value records**: validated band, interferer, and noise parameters
//! - **Validation errors**: the taxonomy every entry point rejects with
//! - **Protocol messages**: JSON request/response shapes of the HTTP API
//! - **Band presets**: the immutable S/X/Ku/K/Ka catalog

pub mod error;
pub mod models;
pub mod presets;
pub mod protocol;

pub use error::ValidationError;
