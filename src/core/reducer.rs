//! Role-sync reducer - turns a member's role changes into roster updates.
//!
//! The reducer is a pure function over the roster: persistence and panel
//! refresh belong to the caller. Roles that are neither the student role nor
//! mapped to a catalog course are ignored entirely.

use super::catalog::CourseCatalog;
use crate::entities::{CourseEvent, CourseSource, CourseStatus, Roster};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Roles a member gained and lost in one update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDelta {
    /// Role ids present now but not before
    pub gained: BTreeSet<u64>,
    /// Role ids present before but not now
    pub lost: BTreeSet<u64>,
}

impl RoleDelta {
    /// Delta between the member's previous and current role lists.
    #[must_use]
    pub fn between(old: &[u64], new: &[u64]) -> Self {
        let old: BTreeSet<u64> = old.iter().copied().collect();
        let new: BTreeSet<u64> = new.iter().copied().collect();
        Self {
            gained: new.difference(&old).copied().collect(),
            lost: old.difference(&new).copied().collect(),
        }
    }

    /// Delta inferred from the roster when the previous role list is unknown.
    ///
    /// Course roles held now but inactive in the history count as gained,
    /// active courses whose role is gone count as lost, and the student role
    /// counts as gained only for members without a record.
    #[must_use]
    pub fn from_history(
        roster: &Roster,
        catalog: &CourseCatalog,
        student_role: Option<u64>,
        member_id: &str,
        current: &[u64],
    ) -> Self {
        let held: BTreeSet<u64> = current.iter().copied().collect();
        let student = roster.students.get(member_id);
        let is_active = |course: &str| student.is_some_and(|s| s.is_course_active(course));

        let mut delta = Self::default();
        for course in catalog.courses() {
            let holds_role = held.contains(&course.role_id);
            let active = is_active(&course.name);
            if holds_role && !active {
                delta.gained.insert(course.role_id);
            } else if !holds_role && active {
                delta.lost.insert(course.role_id);
            }
        }

        if let Some(role) = student_role {
            if held.contains(&role) && student.is_none() {
                delta.gained.insert(role);
            }
        }

        delta
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gained.is_empty() && self.lost.is_empty()
    }
}

/// What a role change did to the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleChangeSummary {
    /// Class the member was enrolled in, when the student role was gained
    /// while a class was open
    pub joined_class: Option<String>,
    /// Course events appended to the member's history
    pub events: Vec<CourseEvent>,
    /// Whether the cached tag of a known student changed
    pub tag_refreshed: bool,
}

impl RoleChangeSummary {
    /// Whether the roster was left as it was.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.joined_class.is_none() && self.events.is_empty() && !self.tag_refreshed
    }
}

/// Applies one member's role delta to the roster.
///
/// A known student's tag is refreshed even when the delta is empty or
/// touches no tracked role.
#[must_use]
pub fn apply_role_change(
    roster: &mut Roster,
    catalog: &CourseCatalog,
    student_role: Option<u64>,
    member_id: &str,
    tag: Option<&str>,
    delta: &RoleDelta,
    now: DateTime<Utc>,
) -> RoleChangeSummary {
    let mut summary = RoleChangeSummary {
        tag_refreshed: tag.is_some_and(|tag| roster.refresh_tag(member_id, tag)),
        ..RoleChangeSummary::default()
    };

    let became_student = student_role.is_some_and(|role| delta.gained.contains(&role));
    let touches_course = delta
        .gained
        .iter()
        .chain(&delta.lost)
        .any(|role| catalog.course_for_role(*role).is_some());
    if !became_student && !touches_course {
        return summary;
    }

    if became_student {
        roster.student_mut(member_id, tag);
        if roster.is_open {
            if let Some(name) = roster.current_class.clone() {
                if let Some(class) = roster.classes.get_mut(&name) {
                    class.enroll(member_id);
                    roster.student_mut(member_id, None).class = Some(name.clone());
                    summary.joined_class = Some(name);
                }
            }
        }
    }

    for course in catalog.courses() {
        let status = if delta.gained.contains(&course.role_id) {
            CourseStatus::Added
        } else if delta.lost.contains(&course.role_id) {
            CourseStatus::Removed
        } else {
            continue;
        };

        let active = roster
            .students
            .get(member_id)
            .is_some_and(|student| student.is_course_active(&course.name));
        let needed = match status {
            CourseStatus::Added => !active,
            CourseStatus::Removed => active,
        };
        if !needed {
            continue;
        }

        let event = CourseEvent {
            course: course.name.clone(),
            source: CourseSource::RoleSync,
            at: now,
            status,
        };
        roster
            .student_mut(member_id, tag)
            .courses
            .push(event.clone());
        summary.events.push(event);
    }

    summary
}
