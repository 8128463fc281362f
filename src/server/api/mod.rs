//! This module contains the API endpoints for the relay.
pub mod chat;
pub mod documents;
pub mod routes;
pub mod state;
pub mod upload;
