//! Helpers shared by the relay, the client and the CLI.
pub mod cli;
pub mod dates;
pub mod http;
pub mod paths;
