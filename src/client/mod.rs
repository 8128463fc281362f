//! The document manager client.
//!
//! [`store::DocumentStore`] owns the document records and persists them to
//! [`storage::LocalStorage`]. [`router::Router`] derives the current view from
//! a path, and [`detail::DocumentView`] holds the chat state of an open
//! document. Everything that talks to the relay goes through
//! [`relay::Relay`].
pub mod browse;
pub mod commands;
pub mod detail;
pub mod document;
pub mod history;
pub mod relay;
pub mod render;
pub mod router;
pub mod storage;
pub mod store;
