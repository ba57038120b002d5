//! Role synchronisation outcome.
//!
//! After a manual command updates the roster, the bot tries to grant or
//! revoke the matching role on the platform. The roster stays the source of
//! truth: a failed role change is logged and reported as [`RoleSync::Failed`]
//! next to the successful roster update, never turned into an error.

use crate::errors::{Error, Result};
use std::future::Future;
use tracing::warn;

/// Grants and revokes guild roles.
pub trait RoleGateway {
    /// Adds `role_id` to the member.
    fn add_role(&self, member_id: &str, role_id: u64) -> impl Future<Output = Result<()>> + Send;

    /// Removes `role_id` from the member.
    fn remove_role(&self, member_id: &str, role_id: u64)
    -> impl Future<Output = Result<()>> + Send;
}

/// Direction of a role change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAction {
    /// Add the role
    Grant,
    /// Remove the role
    Revoke,
}

/// What happened to the platform role after a roster update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSync {
    /// No role is configured for this change
    Skipped,
    /// The platform accepted the change
    Applied,
    /// The platform call failed; the roster update still stands
    Failed {
        /// Error reported by the platform
        reason: String,
    },
}

impl RoleSync {
    /// Whether the role change was attempted and failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// A roster update paired with the outcome of its role change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome<T> {
    /// Result of the roster mutation
    pub roster: T,
    /// Result of the platform role change
    pub role_sync: RoleSync,
}

/// Applies `action` for `role_id` through `gateway`, turning failures into
/// [`RoleSync::Failed`].
pub async fn sync_role<G: RoleGateway>(
    gateway: &G,
    member_id: &str,
    role_id: Option<u64>,
    action: RoleAction,
) -> RoleSync {
    let Some(role_id) = role_id else {
        return RoleSync::Skipped;
    };

    let result = match action {
        RoleAction::Grant => gateway.add_role(member_id, role_id).await,
        RoleAction::Revoke => gateway.remove_role(member_id, role_id).await,
    };

    match result {
        Ok(()) => RoleSync::Applied,
        Err(e) => {
            let failure = Error::ExternalCall {
                action: format!("{action:?} role {role_id} for member {member_id}"),
                message: e.to_string(),
            };
            warn!("{failure}");
            RoleSync::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{courses, store::RosterStore},
        entities::CourseStatus,
        test_utils::{FakeGateway, fixed_time, sample_catalog},
    };

    #[tokio::test]
    async fn test_missing_role_is_skipped() {
        let gateway = FakeGateway::default();
        let outcome = sync_role(&gateway, "1", None, RoleAction::Grant).await;
        assert_eq!(outcome, RoleSync::Skipped);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_grant_and_revoke() {
        let gateway = FakeGateway::default();

        let granted = sync_role(&gateway, "1", Some(7), RoleAction::Grant).await;
        let revoked = sync_role(&gateway, "1", Some(7), RoleAction::Revoke).await;

        assert_eq!(granted, RoleSync::Applied);
        assert_eq!(revoked, RoleSync::Applied);
        assert_eq!(
            gateway.calls(),
            vec![
                ("1".to_string(), 7, RoleAction::Grant),
                ("1".to_string(), 7, RoleAction::Revoke)
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_grant_keeps_roster_update() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = RosterStore::new(dir.path().join("database.json"));
        let catalog = sample_catalog();
        let gateway = FakeGateway::failing();

        let change = store
            .update(|roster| {
                courses::record_manual(
                    roster,
                    &catalog,
                    "1",
                    Some("ana"),
                    "Tiro",
                    CourseStatus::Added,
                    fixed_time(0),
                )
            })
            .await?;
        let outcome = CommandOutcome {
            role_sync: sync_role(&gateway, "1", Some(change.course.role_id), RoleAction::Grant)
                .await,
            roster: change,
        };

        assert!(outcome.role_sync.is_failed());
        let roster = store.read().await?;
        assert!(roster.students["1"].is_course_active("Tiro"));
        Ok(())
    }
}
