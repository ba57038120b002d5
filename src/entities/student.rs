//! Student entity - a guild member tracked by the roster ("aluno").
//!
//! Course membership is never stored directly: it is an append-only list of
//! [`CourseEvent`]s, and whether a course is active is derived by folding that
//! list by course name, the last event in array order winning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A student record, keyed by member id in [`super::Roster::students`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Cached display tag, refreshed whenever the member is seen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Name of the class the student was last enrolled in
    #[serde(rename = "turma", default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Chronological course history, append-only
    #[serde(rename = "cursos", default)]
    pub courses: Vec<CourseEvent>,
}

/// One entry of a student's course history
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEvent {
    /// Course display name, as listed in the catalog
    #[serde(rename = "nome")]
    pub course: String,
    /// Which path produced the event
    #[serde(rename = "origem")]
    pub source: CourseSource,
    /// When the event was recorded
    #[serde(rename = "data")]
    pub at: DateTime<Utc>,
    /// Whether the course was gained or lost
    pub status: CourseStatus,
}

/// Origin of a course event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseSource {
    /// Inferred from a role grant/revoke notification
    #[serde(rename = "auto")]
    RoleSync,
    /// Issued through a slash command
    #[serde(rename = "manual")]
    Command,
}

/// Status carried by a course event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    /// The student holds the course
    Added,
    /// The student no longer holds the course
    Removed,
}

impl Student {
    /// Creates an empty record with the given cached tag.
    #[must_use]
    pub fn with_tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            ..Self::default()
        }
    }

    /// Latest status recorded for `course`, or `None` if it never appeared.
    #[must_use]
    pub fn course_status(&self, course: &str) -> Option<CourseStatus> {
        self.courses
            .iter()
            .rev()
            .find(|event| event.course == course)
            .map(|event| event.status)
    }

    /// Whether the fold of the history leaves `course` in the `added` state.
    #[must_use]
    pub fn is_course_active(&self, course: &str) -> bool {
        self.course_status(course) == Some(CourseStatus::Added)
    }

    /// Every course whose latest event is `added`, sorted by name.
    #[must_use]
    pub fn active_courses(&self) -> BTreeSet<String> {
        let mut latest: BTreeMap<&str, CourseStatus> = BTreeMap::new();
        for event in &self.courses {
            latest.insert(event.course.as_str(), event.status);
        }
        latest
            .into_iter()
            .filter(|(_, status)| *status == CourseStatus::Added)
            .map(|(course, _)| course.to_string())
            .collect()
    }

    /// Display label: the cached tag, or a mention built from `member_id`.
    #[must_use]
    pub fn label(&self, member_id: &str) -> String {
        self.tag
            .clone()
            .unwrap_or_else(|| format!("<@{member_id}>"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{course_event, fixed_time};

    #[test]
    fn test_latest_event_wins_regardless_of_history_length() {
        let mut student = Student::default();
        for _ in 0..5 {
            student
                .courses
                .push(course_event("Tiro", CourseStatus::Added, fixed_time(0)));
            student
                .courses
                .push(course_event("Tiro", CourseStatus::Removed, fixed_time(1)));
        }
        assert!(!student.is_course_active("Tiro"));

        student
            .courses
            .push(course_event("Tiro", CourseStatus::Added, fixed_time(2)));
        assert!(student.is_course_active("Tiro"));
        assert_eq!(student.active_courses().len(), 1);
    }

    #[test]
    fn test_array_order_beats_timestamps() {
        let mut student = Student::default();
        student
            .courses
            .push(course_event("Tiro", CourseStatus::Added, fixed_time(10)));
        // Backdated entry appended later still wins
        student
            .courses
            .push(course_event("Tiro", CourseStatus::Removed, fixed_time(0)));
        assert_eq!(student.course_status("Tiro"), Some(CourseStatus::Removed));
    }

    #[test]
    fn test_active_courses_folds_each_name_independently() {
        let mut student = Student::default();
        student
            .courses
            .push(course_event("Tiro", CourseStatus::Added, fixed_time(0)));
        student
            .courses
            .push(course_event("Abordagem", CourseStatus::Added, fixed_time(1)));
        student
            .courses
            .push(course_event("Tiro", CourseStatus::Removed, fixed_time(2)));

        let active = student.active_courses();
        assert_eq!(active.into_iter().collect::<Vec<_>>(), vec!["Abordagem"]);
        assert_eq!(student.course_status("Sobrevivência"), None);
    }

    #[test]
    fn test_label_falls_back_to_mention() {
        assert_eq!(Student::default().label("42"), "<@42>");
        assert_eq!(Student::with_tag("ana").label("42"), "ana");
    }

    #[test]
    fn test_course_event_json_shape() {
        let event = course_event("Tiro", CourseStatus::Added, fixed_time(0));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["nome"], "Tiro");
        assert_eq!(json["origem"], "auto");
        assert_eq!(json["status"], "added");
    }
}
