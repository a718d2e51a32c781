//! # Scribe Shared
//!
//! Types shared between the server and its clients: per-route
//! presentation contexts, request payloads, and error bodies.

pub mod context;
pub mod dto;
pub mod response;

pub use response::ErrorResponse;
