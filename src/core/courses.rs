//! Course history business logic - manual course commands and student reports.
//!
//! Manual changes are recorded unconditionally: adding a course that is
//! already active appends another `added` event. Only the automatic
//! role-sync path in [`super::reducer`] de-duplicates.

use super::catalog::{Course, CourseCatalog};
use crate::{
    entities::{CourseEvent, CourseSource, CourseStatus, Roster},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};

/// Outcome of a manual course command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualCourseChange {
    /// Catalog entry the command resolved to
    pub course: Course,
    /// Event appended to the student's history
    pub event: CourseEvent,
}

/// Everything known about one student, for the `/aluno ver` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentReport {
    /// Display label (tag or mention)
    pub label: String,
    /// Class the student was last enrolled in
    pub class: Option<String>,
    /// Courses currently held, sorted by name
    pub active_courses: Vec<String>,
    /// Full history, oldest first
    pub history: Vec<CourseEvent>,
}

/// Records a manual course change for `member_id`.
///
/// Fails with `CourseNotFound`, leaving the roster untouched, when
/// `course_name` is not in the catalog.
pub fn record_manual(
    roster: &mut Roster,
    catalog: &CourseCatalog,
    member_id: &str,
    tag: Option<&str>,
    course_name: &str,
    status: CourseStatus,
    now: DateTime<Utc>,
) -> Result<ManualCourseChange> {
    let course = catalog
        .find(course_name)
        .cloned()
        .ok_or_else(|| Error::CourseNotFound {
            name: course_name.trim().to_string(),
        })?;

    let event = CourseEvent {
        course: course.name.clone(),
        source: CourseSource::Command,
        at: now,
        status,
    };
    roster
        .student_mut(member_id, tag)
        .courses
        .push(event.clone());

    Ok(ManualCourseChange { course, event })
}

/// Builds the report for `member_id`, or `None` if the member was never seen.
#[must_use]
pub fn student_report(roster: &Roster, member_id: &str) -> Option<StudentReport> {
    let student = roster.students.get(member_id)?;
    Some(StudentReport {
        label: student.label(member_id),
        class: student.class.clone(),
        active_courses: student.active_courses().into_iter().collect(),
        history: student.courses.clone(),
    })
}
