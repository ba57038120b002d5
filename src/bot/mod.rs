//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the roster bot, including
//! all slash commands, the member-update handler, panel publishing and the
//! bot context shared by every invocation.

/// Discord command implementations (turma, curso, aluno, general)
pub mod commands;
/// Discord event handlers (member updates, panels, roles, autocomplete)
pub mod handlers;
/// Framework setup and client startup
pub mod start;

use crate::{config::AppConfig, core::store::RosterStore};
use std::sync::Arc;
use tokio::sync::Mutex;

pub use start::run_bot;

/// Shared data available to all bot commands and event handlers.
/// The roster store is the only state; it is loaded and saved per event.
pub struct BotData {
    /// Settings and course catalog loaded at startup
    pub config: Arc<AppConfig>,
    /// Handle to the persisted roster document
    pub store: RosterStore,
    /// Held for a whole event: roster mutation, role sync and panel refresh.
    pub event_gate: Mutex<()>,
}

impl BotData {
    /// Creates a new `BotData` instance from the startup configuration and
    /// the roster store.
    #[must_use]
    pub fn new(config: Arc<AppConfig>, store: RosterStore) -> Self {
        Self {
            config,
            store,
            event_gate: Mutex::new(()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{config::Settings, core::catalog::CourseCatalog};
    use std::path::PathBuf;

    fn bot_data(dir: &tempfile::TempDir) -> BotData {
        let settings = Settings {
            guild_id: 1,
            student_role_id: None,
            class_channel_id: None,
            courses_channel_id: None,
            roster_path: dir.path().join("database.json"),
            courses_path: PathBuf::from("courses.toml"),
            port: 3000,
        };
        let config = AppConfig {
            settings,
            catalog: CourseCatalog::default(),
        };
        BotData::new(Arc::new(config), RosterStore::new(dir.path().join("database.json")))
    }

    #[tokio::test]
    async fn test_event_gate_admits_one_event_at_a_time() {
        let dir = tempfile::tempdir().unwrap();
        let data = bot_data(&dir);

        let first = data.event_gate.lock().await;
        assert!(data.event_gate.try_lock().is_err());

        drop(first);
        assert!(data.event_gate.try_lock().is_ok());
    }
}
