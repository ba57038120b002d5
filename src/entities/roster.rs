//! Roster entity - the root of the persisted JSON document.

use super::{Class, Student};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The whole roster state, loaded and saved as one document
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Name of the current class, kept after the class is closed
    #[serde(rename = "turmaAtual", default)]
    pub current_class: Option<String>,
    /// Whether the current class accepts students
    #[serde(rename = "turmaAberta", default)]
    pub is_open: bool,
    /// Every class ever opened, by name
    #[serde(rename = "turmas", default)]
    pub classes: BTreeMap<String, Class>,
    /// Every student ever seen, by member id
    #[serde(rename = "alunos", default)]
    pub students: BTreeMap<String, Student>,
    /// Message ids of the published panels
    #[serde(rename = "painel", default)]
    pub panels: PanelState,
}

/// Handles of the panel messages, reused for edit-in-place
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    /// Message id of the class panel
    #[serde(rename = "turmaMsgId", default)]
    pub class_message_id: Option<String>,
    /// Message id of the course panel
    #[serde(rename = "cursosMsgId", default)]
    pub courses_message_id: Option<String>,
}

impl Roster {
    /// The current class record, if one is current and has a record.
    #[must_use]
    pub fn current(&self) -> Option<(&str, &Class)> {
        let name = self.current_class.as_deref()?;
        self.classes.get(name).map(|class| (name, class))
    }

    /// Returns the student for `member_id`, creating it lazily, and refreshes
    /// its cached tag when one is given.
    pub fn student_mut(&mut self, member_id: &str, tag: Option<&str>) -> &mut Student {
        let student = self.students.entry(member_id.to_string()).or_default();
        if let Some(tag) = tag {
            student.tag = Some(tag.to_string());
        }
        student
    }

    /// Updates the cached tag of an existing student. Unknown members get no
    /// record. Returns true when the stored tag changed.
    pub fn refresh_tag(&mut self, member_id: &str, tag: &str) -> bool {
        match self.students.get_mut(member_id) {
            Some(student) if student.tag.as_deref() != Some(tag) => {
                student.tag = Some(tag.to_string());
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_legacy_document_loads() {
        // Shape written by the first version of the bot
        let json = r#"{
            "turmaAtual": "Turma 07",
            "turmaAberta": true,
            "turmas": { "Turma 07": { "alunos": ["1", "2"], "cursos": {} } },
            "alunos": {}
        }"#;
        let roster: Roster = serde_json::from_str(json).unwrap();

        assert_eq!(roster.current_class.as_deref(), Some("Turma 07"));
        assert!(roster.is_open);
        let (name, class) = roster.current().unwrap();
        assert_eq!(name, "Turma 07");
        assert_eq!(class.members, vec!["1", "2"]);
        assert!(class.created_at.is_none());
        assert_eq!(roster.panels, PanelState::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        let roster: Roster = serde_json::from_str("{}").unwrap();
        assert_eq!(roster, Roster::default());
    }

    #[test]
    fn test_student_mut_refreshes_tag() {
        let mut roster = Roster::default();
        roster.student_mut("1", Some("old"));
        roster.student_mut("1", None);
        assert_eq!(roster.students["1"].tag.as_deref(), Some("old"));
        roster.student_mut("1", Some("new"));
        assert_eq!(roster.students["1"].tag.as_deref(), Some("new"));
        assert_eq!(roster.students.len(), 1);
    }

    #[test]
    fn test_refresh_tag_only_touches_known_students() {
        let mut roster = Roster::default();
        assert!(!roster.refresh_tag("1", "ana"));
        assert!(roster.students.is_empty());

        roster.student_mut("1", Some("ana"));
        assert!(!roster.refresh_tag("1", "ana"));
        assert!(roster.refresh_tag("1", "ana.silva"));
        assert_eq!(roster.students["1"].tag.as_deref(), Some("ana.silva"));
    }
}
