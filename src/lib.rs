//! `TurmaBot` - A Discord bot that keeps a class roster
//!
//! This crate tracks which members belong to the current class and which
//! courses each member holds. Course history is inferred from role changes
//! and from moderator commands, persisted as a single JSON document, and
//! mirrored into two panel messages that are edited in place.

#![deny(
    unsafe_code,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
#![warn(
    // poise command macros generate undocumented items, hence warn and not deny
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::match_same_arms,
    clippy::too_many_lines,
    clippy::wildcard_imports,
    rust_2018_idioms,
)]
// Error variants are documented on the enum, not on every fn returning `Result`
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

/// Discord bot interface - commands, handlers, and bot context
pub mod bot;
/// Configuration management - environment settings and the course catalog
pub mod config;
/// Core business logic - framework-agnostic roster, course, and panel operations
pub mod core;
/// Persisted roster document types
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Keep-alive HTTP endpoint
pub mod health;

#[cfg(test)]
pub mod test_utils;
