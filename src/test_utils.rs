//! Shared test utilities for the roster bot.
//!
//! This module provides fixtures with sensible defaults: a small course
//! catalog, rosters with an open class, fixed timestamps, and a fake role
//! gateway that records calls.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        catalog::{Course, CourseCatalog},
        sync::{RoleAction, RoleGateway},
        turma,
    },
    entities::{CourseEvent, CourseSource, CourseStatus, Roster},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Role id used as the student role in tests.
pub const STUDENT_ROLE: u64 = 100;

/// Installs a test-friendly tracing subscriber once.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Catalog with three courses.
///
/// # Defaults
/// * `Basic Training`: role 1
/// * `Abordagem`: role 2
/// * `Tiro`: role 3
pub fn sample_catalog() -> CourseCatalog {
    CourseCatalog::new(vec![
        Course {
            name: "Basic Training".to_string(),
            role_id: 1,
        },
        Course {
            name: "Abordagem".to_string(),
            role_id: 2,
        },
        Course {
            name: "Tiro".to_string(),
            role_id: 3,
        },
    ])
    .unwrap()
}

/// Empty roster with `name` opened as the current class at [`fixed_time`]`(0)`.
pub fn roster_with_open_class(name: &str) -> Roster {
    let mut roster = Roster::default();
    turma::open_class(&mut roster, name, fixed_time(0)).unwrap();
    roster
}

/// A deterministic timestamp, `minutes` after a fixed origin.
pub fn fixed_time(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 19, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// A role-sync course event.
pub fn course_event(course: &str, status: CourseStatus, at: DateTime<Utc>) -> CourseEvent {
    CourseEvent {
        course: course.to_string(),
        source: CourseSource::RoleSync,
        at,
        status,
    }
}

/// Role gateway that records every call and optionally fails them.
#[derive(Debug, Default)]
pub struct FakeGateway {
    fail: bool,
    calls: Mutex<Vec<(String, u64, RoleAction)>>,
}

impl FakeGateway {
    /// A gateway whose calls all fail.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<(String, u64, RoleAction)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, member_id: &str, role_id: u64, action: RoleAction) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((member_id.to_string(), role_id, action));
        if self.fail {
            return Err(Error::ExternalCall {
                action: format!("{action:?}"),
                message: "Missing Permissions".to_string(),
            });
        }
        Ok(())
    }
}

impl RoleGateway for FakeGateway {
    async fn add_role(&self, member_id: &str, role_id: u64) -> Result<()> {
        self.record(member_id, role_id, RoleAction::Grant)
    }

    async fn remove_role(&self, member_id: &str, role_id: u64) -> Result<()> {
        self.record(member_id, role_id, RoleAction::Revoke)
    }
}
