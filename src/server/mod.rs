//! The relay: stores uploads, serves them back, and forwards processing and
//! chat requests to the Clarity engine.

pub mod api;
pub mod app;
pub mod errors;
pub mod tracing;
