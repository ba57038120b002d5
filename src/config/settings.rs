//! Settings read from environment variables (optionally via `.env`).
//!
//! Lookup goes through a closure so parsing can be tested without touching
//! the process environment.

use crate::errors::{Error, Result};
use std::path::PathBuf;

const DEFAULT_ROSTER_PATH: &str = "database.json";
const DEFAULT_COURSES_PATH: &str = "courses.toml";
const DEFAULT_PORT: u16 = 3000;

/// Guild-level settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Guild the commands are registered in (`GUILD_ID`)
    pub guild_id: u64,
    /// Role that marks a member as a student (`ROLE_ALUNO_ID`)
    pub student_role_id: Option<u64>,
    /// Channel for class announcements and the class panel (`CHANNEL_TURMAS`)
    pub class_channel_id: Option<u64>,
    /// Channel for the course panel (`CHANNEL_CURSOS`)
    pub courses_channel_id: Option<u64>,
    /// Location of the roster document (`ROSTER_PATH`)
    pub roster_path: PathBuf,
    /// Location of the course catalog (`COURSES_PATH`)
    pub courses_path: PathBuf,
    /// Port of the keep-alive endpoint (`PORT`)
    pub port: u16,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`. Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let guild_id = get("GUILD_ID").ok_or_else(|| Error::MissingConfiguration {
            name: "GUILD_ID".to_string(),
        })?;

        Ok(Self {
            guild_id: parse_id("GUILD_ID", &guild_id)?,
            student_role_id: get("ROLE_ALUNO_ID")
                .map(|v| parse_id("ROLE_ALUNO_ID", &v))
                .transpose()?,
            class_channel_id: get("CHANNEL_TURMAS")
                .map(|v| parse_id("CHANNEL_TURMAS", &v))
                .transpose()?,
            courses_channel_id: get("CHANNEL_CURSOS")
                .map(|v| parse_id("CHANNEL_CURSOS", &v))
                .transpose()?,
            roster_path: get("ROSTER_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_ROSTER_PATH), PathBuf::from),
            courses_path: get("COURSES_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_COURSES_PATH), PathBuf::from),
            port: get("PORT")
                .map(|v| {
                    v.trim().parse::<u16>().map_err(|e| Error::Config {
                        message: format!("PORT must be a port number: {e}"),
                    })
                })
                .transpose()?
                .unwrap_or(DEFAULT_PORT),
        })
    }
}

fn parse_id(name: &str, value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(Error::Config {
            message: format!("{name} must be a Discord id, got 0"),
        }),
        Ok(id) => Ok(id),
        Err(e) => Err(Error::Config {
            message: format!("{name} must be a Discord id: {e}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_missing_guild_id_is_fatal() {
        let result = Settings::from_lookup(lookup_from(&[]));
        assert!(matches!(
            result,
            Err(Error::MissingConfiguration { name }) if name == "GUILD_ID"
        ));
    }

    #[test]
    fn test_blank_guild_id_counts_as_missing() {
        let result = Settings::from_lookup(lookup_from(&[("GUILD_ID", "  ")]));
        assert!(matches!(result, Err(Error::MissingConfiguration { .. })));
    }

    #[test]
    fn test_defaults_apply() {
        let settings = Settings::from_lookup(lookup_from(&[("GUILD_ID", "10")])).unwrap();
        assert_eq!(settings.guild_id, 10);
        assert_eq!(settings.student_role_id, None);
        assert_eq!(settings.roster_path, PathBuf::from("database.json"));
        assert_eq!(settings.courses_path, PathBuf::from("courses.toml"));
        assert_eq!(settings.port, 3000);
    }

    #[test]
    fn test_all_values_parse() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("GUILD_ID", "10"),
            ("ROLE_ALUNO_ID", "20"),
            ("CHANNEL_TURMAS", "30"),
            ("CHANNEL_CURSOS", "40"),
            ("ROSTER_PATH", "/data/roster.json"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(settings.student_role_id, Some(20));
        assert_eq!(settings.class_channel_id, Some(30));
        assert_eq!(settings.courses_channel_id, Some(40));
        assert_eq!(settings.roster_path, PathBuf::from("/data/roster.json"));
        assert_eq!(settings.port, 8080);
    }

    #[test]
    fn test_malformed_id_is_config_error() {
        let result = Settings::from_lookup(lookup_from(&[
            ("GUILD_ID", "10"),
            ("ROLE_ALUNO_ID", "aluno"),
        ]));
        assert!(matches!(result, Err(Error::Config { .. })));

        let zero = Settings::from_lookup(lookup_from(&[("GUILD_ID", "0")]));
        assert!(matches!(zero, Err(Error::Config { .. })));
    }
}
