//! Entity module - the roster document and the records it contains.
//! These types mirror the persisted JSON document one-to-one; all behaviour
//! lives in [`crate::core`].

pub mod class;
pub mod roster;
pub mod student;

pub use class::Class;
pub use roster::{PanelState, Roster};
pub use student::{CourseEvent, CourseSource, CourseStatus, Student};
