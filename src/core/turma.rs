//! Class ("turma") business logic - opening, closing and enrolment.
//!
//! These are the manual operations behind the `/turma` and `/aluno` commands.
//! They mutate the roster directly; platform role changes are the caller's
//! concern.

use crate::{
    entities::{Class, Roster},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};

/// Snapshot of the current class pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassStatus {
    /// Name of the current class, if any
    pub name: Option<String>,
    /// Whether the current class is open
    pub is_open: bool,
    /// Members enrolled in the current class
    pub member_count: usize,
}

/// Current class and its members, for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassListing {
    /// Class name
    pub name: String,
    /// Whether the class is open
    pub is_open: bool,
    /// `(member id, display label)` in enrolment order
    pub members: Vec<(String, String)>,
}

/// Result of a manual enrolment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    /// Class the member was enrolled in
    pub class: String,
    /// False when the member was already enrolled
    pub newly_added: bool,
}

/// Opens `name` as the current class, creating its record if needed.
///
/// A previously current class keeps its member list.
pub fn open_class(roster: &mut Roster, name: &str, now: DateTime<Utc>) -> Result<ClassStatus> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput {
            message: "O nome da turma não pode ser vazio.".to_string(),
        });
    }

    roster
        .classes
        .entry(name.to_string())
        .or_insert_with(|| Class::new(now));
    roster.current_class = Some(name.to_string());
    roster.is_open = true;

    Ok(class_status(roster))
}

/// Closes the current class. The class stays current so its status can
/// still be queried.
pub fn close_class(roster: &mut Roster) -> ClassStatus {
    roster.is_open = false;
    class_status(roster)
}

/// Reports the current class pointer.
#[must_use]
pub fn class_status(roster: &Roster) -> ClassStatus {
    ClassStatus {
        name: roster.current_class.clone(),
        is_open: roster.current_class.is_some() && roster.is_open,
        member_count: roster.current().map_or(0, |(_, class)| class.members.len()),
    }
}

/// Lists the members of the current class.
pub fn current_listing(roster: &Roster) -> Result<ClassListing> {
    let name = roster.current_class.as_deref().ok_or(Error::NoCurrentClass)?;
    let class = roster.classes.get(name).ok_or_else(|| Error::ClassNotFound {
        name: name.to_string(),
    })?;

    let members = class
        .members
        .iter()
        .map(|id| {
            let label = roster
                .students
                .get(id)
                .map_or_else(|| format!("<@{id}>"), |student| student.label(id));
            (id.clone(), label)
        })
        .collect();

    Ok(ClassListing {
        name: name.to_string(),
        is_open: roster.is_open,
        members,
    })
}

/// Enrols `member_id` in the current class, which must be open.
pub fn add_student(roster: &mut Roster, member_id: &str, tag: Option<&str>) -> Result<Enrollment> {
    let name = roster.current_class.clone().ok_or(Error::NoCurrentClass)?;
    if !roster.is_open {
        return Err(Error::ClassClosed { name });
    }
    let class = roster
        .classes
        .get_mut(&name)
        .ok_or_else(|| Error::ClassNotFound { name: name.clone() })?;

    let newly_added = class.enroll(member_id);
    roster.student_mut(member_id, tag).class = Some(name.clone());

    Ok(Enrollment {
        class: name,
        newly_added,
    })
}

/// Removes `member_id` from the current class. Returns the class name and
/// whether the member was enrolled.
pub fn remove_student(roster: &mut Roster, member_id: &str) -> Result<(String, bool)> {
    let name = roster.current_class.clone().ok_or(Error::NoCurrentClass)?;
    let class = roster
        .classes
        .get_mut(&name)
        .ok_or_else(|| Error::ClassNotFound { name: name.clone() })?;

    let removed = class.withdraw(member_id);
    if let Some(student) = roster.students.get_mut(member_id) {
        if student.class.as_deref() == Some(name.as_str()) {
            student.class = None;
        }
    }

    Ok((name, removed))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{fixed_time, roster_with_open_class};

    #[test]
    fn test_open_creates_class_once() -> Result<()> {
        let mut roster = Roster::default();
        open_class(&mut roster, "Turma 07", fixed_time(0))?;
        add_student(&mut roster, "1", Some("ana"))?;
        let status = open_class(&mut roster, "Turma 07", fixed_time(5))?;

        assert_eq!(status.member_count, 1);
        assert_eq!(roster.classes["Turma 07"].created_at, Some(fixed_time(0)));
        Ok(())
    }

    #[test]
    fn test_open_rejects_blank_name() {
        let mut roster = Roster::default();
        let result = open_class(&mut roster, "   ", fixed_time(0));
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
        assert_eq!(roster, Roster::default());
    }

    #[test]
    fn test_opening_another_class_keeps_previous_members() -> Result<()> {
        let mut roster = roster_with_open_class("Turma 07");
        add_student(&mut roster, "1", Some("ana"))?;
        add_student(&mut roster, "2", Some("bia"))?;

        let status = open_class(&mut roster, "Turma 08", fixed_time(1))?;

        assert_eq!(status.name.as_deref(), Some("Turma 08"));
        assert_eq!(status.member_count, 0);
        assert_eq!(roster.classes["Turma 07"].members, vec!["1", "2"]);
        Ok(())
    }

    #[test]
    fn test_close_keeps_name_and_members() -> Result<()> {
        let mut roster = roster_with_open_class("Turma 07");
        add_student(&mut roster, "1", None)?;
        let before = class_status(&roster);

        let status = close_class(&mut roster);

        assert_eq!(status.name.as_deref(), Some("Turma 07"));
        assert!(!status.is_open);
        assert_eq!(status.member_count, before.member_count);
        Ok(())
    }

    #[test]
    fn test_close_without_class_reports_nothing_open() {
        let mut roster = Roster::default();
        let status = close_class(&mut roster);
        assert_eq!(status.name, None);
        assert!(!status.is_open);
    }

    #[test]
    fn test_add_twice_keeps_single_entry() -> Result<()> {
        let mut roster = roster_with_open_class("Turma 07");

        let first = add_student(&mut roster, "1", Some("ana"))?;
        let second = add_student(&mut roster, "1", Some("ana"))?;

        assert!(first.newly_added);
        assert!(!second.newly_added);
        assert_eq!(roster.classes["Turma 07"].members, vec!["1"]);
        assert_eq!(roster.students["1"].class.as_deref(), Some("Turma 07"));
        Ok(())
    }

    #[test]
    fn test_add_requires_current_open_class() {
        let mut roster = Roster::default();
        assert!(matches!(
            add_student(&mut roster, "1", None),
            Err(Error::NoCurrentClass)
        ));

        let mut roster = roster_with_open_class("Turma 07");
        close_class(&mut roster);
        assert!(matches!(
            add_student(&mut roster, "1", None),
            Err(Error::ClassClosed { name }) if name == "Turma 07"
        ));
    }

    #[test]
    fn test_remove_reports_missing_class_record() {
        let mut roster = Roster {
            current_class: Some("Fantasma".to_string()),
            is_open: true,
            ..Roster::default()
        };
        assert!(matches!(
            remove_student(&mut roster, "1"),
            Err(Error::ClassNotFound { name }) if name == "Fantasma"
        ));
    }

    #[test]
    fn test_remove_clears_student_class() -> Result<()> {
        let mut roster = roster_with_open_class("Turma 07");
        add_student(&mut roster, "1", Some("ana"))?;

        let (class, removed) = remove_student(&mut roster, "1")?;

        assert_eq!(class, "Turma 07");
        assert!(removed);
        assert!(roster.classes["Turma 07"].members.is_empty());
        assert_eq!(roster.students["1"].class, None);

        let (_, removed_again) = remove_student(&mut roster, "1")?;
        assert!(!removed_again);
        Ok(())
    }

    #[test]
    fn test_listing_uses_tags_with_mention_fallback() -> Result<()> {
        let mut roster = roster_with_open_class("Turma 07");
        add_student(&mut roster, "1", Some("ana"))?;
        roster.classes.get_mut("Turma 07").unwrap().enroll("2");

        let listing = current_listing(&roster)?;

        assert_eq!(listing.name, "Turma 07");
        assert_eq!(
            listing.members,
            vec![
                ("1".to_string(), "ana".to_string()),
                ("2".to_string(), "<@2>".to_string())
            ]
        );
        Ok(())
    }
}
