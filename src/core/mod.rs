//! Core roster logic, independent of the chat framework.
//!
//! The bot layer loads the roster through [`store::RosterStore`], calls one
//! of the operations below, and publishes whatever [`panel`] renders.

/// Course name to role mapping
pub mod catalog;
/// Manual course commands and student reports
pub mod courses;
/// Class and course panel rendering
pub mod panel;
/// Role-sync reducer
pub mod reducer;
/// Load/save of the roster document
pub mod store;
/// Role grant/revoke outcome
pub mod sync;
/// Class lifecycle and enrolment
pub mod turma;
