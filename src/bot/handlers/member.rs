//! Guild member update handling - the automatic role-sync path.

use super::panels;
use crate::{
    bot::BotData,
    core::reducer::{self, RoleDelta},
    errors::Result,
};
use chrono::Utc;
use poise::serenity_prelude as serenity;
use tracing::{debug, info};

/// Feeds a member's role change through the reducer, persists the result
/// and refreshes the panels when anything changed, including a known
/// student's tag.
///
/// When the previous member state is not cached, the delta is inferred from
/// the roster history instead. The whole update runs under the event gate.
pub async fn handle_member_update(
    ctx: &serenity::Context,
    data: &BotData,
    old: Option<&serenity::Member>,
    update: &serenity::GuildMemberUpdateEvent,
) -> Result<()> {
    let settings = &data.config.settings;
    if update.guild_id.get() != settings.guild_id || update.user.bot {
        return Ok(());
    }

    let _event = data.event_gate.lock().await;

    let member_id = update.user.id.to_string();
    let tag = update.user.tag();
    let current: Vec<u64> = update.roles.iter().map(|role| role.get()).collect();
    let previous: Option<Vec<u64>> =
        old.map(|member| member.roles.iter().map(|role| role.get()).collect());

    let summary = data
        .store
        .update(|roster| {
            let delta = match &previous {
                Some(previous) => RoleDelta::between(previous, &current),
                None => RoleDelta::from_history(
                    roster,
                    &data.config.catalog,
                    settings.student_role_id,
                    &member_id,
                    &current,
                ),
            };
            Ok(reducer::apply_role_change(
                roster,
                &data.config.catalog,
                settings.student_role_id,
                &member_id,
                Some(&tag),
                &delta,
                Utc::now(),
            ))
        })
        .await?;

    if summary.is_noop() {
        debug!("Role update for {} did not touch the roster", tag);
        return Ok(());
    }

    info!(
        member = %member_id,
        events = summary.events.len(),
        joined_class = ?summary.joined_class,
        tag_refreshed = summary.tag_refreshed,
        "Role sync applied for {}",
        tag
    );
    panels::refresh_panels(ctx, data).await;
    Ok(())
}
