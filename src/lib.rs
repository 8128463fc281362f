//! # Clarity
//!
//! Clarity is a document manager: documents are uploaded through a thin
//! relay that stores the file and hands it to the Clarity engine, an external
//! AI service that summarizes the document, splits it into sections and later
//! answers questions about it.
//!
//! The crate has two halves:
//!
//! * [`server`] is the relay. It keeps no state besides the uploads directory
//!   and never transforms what the engine answers.
//! * [`client`] is the document manager itself: a persisted collection of
//!   document records, a path based router with navigation history and the
//!   document detail view with its chat panel.

// =========================================================================
//                  Canonical lints for whole crate
// =========================================================================
// Official docs:
//   https://doc.rust-lang.org/nightly/clippy/lints.html
// Useful app to lookup full details of individual lints:
//   https://rust-lang.github.io/rust-clippy/master/index.html
//
// We set base lints to give the fullest, most pedantic feedback possible.
// They stay warnings during development; build-denial is only enforced in CI.
//
#![warn(
    clippy::all,
    missing_docs,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(
    clippy::blanket_clippy_restriction_lints,
    reason = "Restriction lints are opted into wholesale and allowed one by one below."
)]
#![warn(clippy::restriction)]
//
// =========================================================================
//   Individually blanket-allow single lints relevant to this whole crate
// =========================================================================
#![allow(clippy::implicit_return, reason = "This is idiomatic Rust")]
#![allow(
    clippy::multiple_crate_versions,
    reason = "actix and reqwest pull in different versions of a few shared crates"
)]
#![allow(
    clippy::std_instead_of_alloc,
    reason = "We're not interested in becoming no-std compatible"
)]
#![allow(
    clippy::std_instead_of_core,
    reason = "Import items from std instead of core"
)]
#![allow(
    clippy::mod_module_files,
    reason = "mod.rs is the layout used across the codebase"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Nothing here is hot enough to benefit from explicit inline hints"
)]
#![allow(
    clippy::exhaustive_structs,
    reason = "`#[non_exhaustive]` is for types imported into other crates"
)]
#![allow(
    clippy::exhaustive_enums,
    reason = "`#[non_exhaustive]` is for types imported into other crates"
)]
#![allow(
    clippy::question_mark_used,
    reason = "We rely on propagating errors with question mark extensively"
)]
#![allow(
    clippy::semicolon_outside_block,
    reason = "Opt in to have semicolon in the outside block across codebase"
)]
#![allow(
    clippy::single_call_fn,
    reason = "We tend to break up long functions into smaller ones, so this lint is not useful"
)]
#![allow(
    clippy::arithmetic_side_effects,
    reason = "Arithmetic is limited to id assignment and byte counting"
)]
#![allow(
    clippy::arbitrary_source_item_ordering,
    reason = "Items are ordered by reading flow, not alphabetically"
)]
#![allow(
    clippy::missing_trait_methods,
    reason = "Use implicit trait implementation"
)]

pub mod client;
pub mod config;
pub mod engine;
pub mod server;
pub mod utils;
