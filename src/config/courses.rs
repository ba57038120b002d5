//! Course catalog loading from courses.toml
//!
//! The catalog maps each course display name to the guild role that grants
//! it. It is static for the lifetime of the process.
//!
//! ```toml
//! [[courses]]
//! name = "Basic Training"
//! role_id = 123456789012345678
//! ```

use crate::{
    core::catalog::{Course, CourseCatalog},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Structure of the whole courses.toml file
#[derive(Debug, Deserialize)]
pub struct CoursesFile {
    /// Courses in display order
    #[serde(default)]
    pub courses: Vec<CourseConfig>,
}

/// Configuration for a single course
#[derive(Debug, Deserialize, Clone)]
pub struct CourseConfig {
    /// Display name of the course
    pub name: String,
    /// Role granted to members holding the course
    pub role_id: u64,
}

/// Parses catalog TOML text.
pub fn parse_catalog(contents: &str) -> Result<CourseCatalog> {
    let file: CoursesFile = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse course catalog: {e}"),
    })?;

    CourseCatalog::new(
        file.courses
            .into_iter()
            .map(|c| Course {
                name: c.name,
                role_id: c.role_id,
            })
            .collect(),
    )
}

/// Loads the catalog from `path`. A missing file yields an empty catalog;
/// an unreadable or malformed one is a configuration error.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CourseCatalog> {
    let path = path.as_ref();
    debug!("Loading course catalog from {:?}", path);

    if !path.exists() {
        warn!(
            "Course catalog {:?} not found, course tracking is disabled",
            path
        );
        return CourseCatalog::new(Vec::new());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read course catalog {path:?}: {e}"),
    })?;
    parse_catalog(&contents)
}
