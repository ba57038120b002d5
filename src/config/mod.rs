//! Configuration management - environment settings and the course catalog.

/// Course catalog loading from courses.toml
pub mod courses;

/// Guild, channel and path settings from environment variables
pub mod settings;

pub use settings::Settings;

use crate::{core::catalog::CourseCatalog, errors::Result};
use tracing::info;

/// Everything the bot needs at runtime, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Environment-derived settings
    pub settings: Settings,
    /// Course display name to role id mapping
    pub catalog: CourseCatalog,
}

/// Loads settings from the process environment and the catalog they point to.
///
/// Fails with `MissingConfiguration` when a required variable is absent.
pub fn load_app_configuration() -> Result<AppConfig> {
    let settings = Settings::from_env()?;
    let catalog = courses::load_catalog(&settings.courses_path)?;
    info!(
        guild_id = settings.guild_id,
        courses = catalog.len(),
        roster_path = %settings.roster_path.display(),
        "Configuration loaded"
    );
    Ok(AppConfig { settings, catalog })
}
