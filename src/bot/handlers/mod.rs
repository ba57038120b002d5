//! Discord interaction and event handlers
//!
//! This module provides the handlers that are not slash commands: the
//! member-update role sync, panel publishing, guild role changes and
//! autocomplete.

/// Autocomplete handlers for course names
pub mod autocomplete;
/// Guild member role-change handling
pub mod member;
/// Panel publishing and channel announcements
pub mod panels;
/// Guild role grant/revoke
pub mod roles;
