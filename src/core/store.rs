//! Roster store - loads and saves the roster document as a whole.
//!
//! Every event handler goes through [`RosterStore::update`], which loads the
//! document, applies one mutation and writes it back. An async gate
//! serialises those cycles so only one event touches the document at a time.
//! A mutation that fails writes nothing.

use crate::{entities::Roster, errors::Result};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Handle to the persisted roster document
#[derive(Debug)]
pub struct RosterStore {
    path: PathBuf,
    gate: Mutex<()>,
}

impl RosterStore {
    /// Creates a store backed by the JSON file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            gate: Mutex::new(()),
        }
    }

    /// Location of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads a snapshot of the roster.
    pub async fn read(&self) -> Result<Roster> {
        let _guard = self.gate.lock().await;
        self.load().await
    }

    /// Loads the roster, applies `mutate` and saves the result.
    ///
    /// The document is only written when `mutate` succeeds and actually
    /// changed something.
    pub async fn update<T, F>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Roster) -> Result<T>,
    {
        let _guard = self.gate.lock().await;
        let mut roster = self.load().await?;
        let before = roster.clone();

        let output = mutate(&mut roster)?;

        if roster != before {
            self.save(&roster).await?;
        }
        Ok(output)
    }

    /// Reads the document, creating it with defaults when absent. An
    /// unreadable or malformed document is replaced by the default on the
    /// next save.
    async fn load(&self) -> Result<Roster> {
        match tokio::fs::try_exists(&self.path).await {
            Ok(true) => {}
            Ok(false) => {
                debug!("Roster {:?} not found, creating it", self.path);
                let roster = Roster::default();
                self.save(&roster).await?;
                return Ok(roster);
            }
            Err(e) => {
                warn!("Cannot stat roster {:?}: {}", self.path, e);
                return Ok(Roster::default());
            }
        }

        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read roster {:?}, using empty roster: {}", self.path, e);
                return Ok(Roster::default());
            }
        };

        Ok(serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!("Failed to parse roster {:?}, using empty roster: {}", self.path, e);
            Roster::default()
        }))
    }

    async fn save(&self, roster: &Roster) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(roster)?;
        tokio::fs::write(&self.path, json).await?;
        debug!("Roster saved to {:?}", self.path);
        Ok(())
    }
}
