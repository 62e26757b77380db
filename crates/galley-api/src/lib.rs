//! Galley API
//!
//! HTTP surface for the submission pipeline: per-category file uploads,
//! article submission with completeness gating, and read-back of stored
//! articles. All domain logic lives in the library crates; this crate wires
//! state, routes, and error-to-response mapping.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use state::AppState;
