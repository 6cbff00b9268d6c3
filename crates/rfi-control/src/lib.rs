//! RFI compliance explorer service library.
//!
//! Re-exports the API router, shared state, and configuration so they can
//! be used by integration tests.

pub mod api;
pub mod config;
pub mod state;
