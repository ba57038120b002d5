//! Guild role changes through the Discord HTTP API.

use crate::{
    core::sync::RoleGateway,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;

const AUDIT_REASON: &str = "Roster bot";

/// Grants and revokes roles in one guild.
pub struct GuildRoles<'a> {
    http: &'a serenity::Http,
    guild_id: serenity::GuildId,
}

impl<'a> GuildRoles<'a> {
    /// Role gateway for `guild_id`.
    #[must_use]
    pub const fn new(http: &'a serenity::Http, guild_id: serenity::GuildId) -> Self {
        Self { http, guild_id }
    }
}

fn user_id(member_id: &str) -> Result<serenity::UserId> {
    member_id
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(serenity::UserId::new)
        .ok_or_else(|| Error::MemberNotResolvable {
            user_id: member_id.to_string(),
        })
}

impl RoleGateway for GuildRoles<'_> {
    async fn add_role(&self, member_id: &str, role_id: u64) -> Result<()> {
        self.http
            .add_member_role(
                self.guild_id,
                user_id(member_id)?,
                serenity::RoleId::new(role_id),
                Some(AUDIT_REASON),
            )
            .await?;
        Ok(())
    }

    async fn remove_role(&self, member_id: &str, role_id: u64) -> Result<()> {
        self.http
            .remove_member_role(
                self.guild_id,
                user_id(member_id)?,
                serenity::RoleId::new(role_id),
                Some(AUDIT_REASON),
            )
            .await?;
        Ok(())
    }
}
