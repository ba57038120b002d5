//! Class entity - a cohort ("turma") of students.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A class record, keyed by its name in [`super::Roster::classes`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    /// Member ids enrolled in this class, without duplicates
    #[serde(rename = "alunos", default)]
    pub members: Vec<String>,
    /// When the class was first opened. Absent in documents written before
    /// creation timestamps were recorded.
    #[serde(
        rename = "criadaEm",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Class {
    /// Creates an empty class opened at `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            members: Vec::new(),
            created_at: Some(now),
        }
    }

    /// Whether `member_id` is enrolled.
    #[must_use]
    pub fn contains(&self, member_id: &str) -> bool {
        self.members.iter().any(|id| id == member_id)
    }

    /// Adds `member_id` unless already present. Returns true when the list changed.
    pub fn enroll(&mut self, member_id: &str) -> bool {
        if self.contains(member_id) {
            return false;
        }
        self.members.push(member_id.to_string());
        true
    }

    /// Removes every occurrence of `member_id`. Returns true when the list changed.
    pub fn withdraw(&mut self, member_id: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|id| id != member_id);
        self.members.len() != before
    }
}
