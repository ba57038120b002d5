//! Panel publishing - keeps the class and course panels up to date.
//!
//! Each panel is a single message edited in place. Its id lives in the roster
//! document; when no id is stored or Discord no longer has the message, a new
//! one is posted and its id stored back. Failures are logged and swallowed so
//! a panel problem never fails the command that triggered the refresh.

use crate::{
    bot::BotData,
    core::panel::{self, ClassPanel, CourseBlock},
    errors::Error,
};
use poise::serenity_prelude as serenity;
use tracing::{info, warn};

const PANEL_COLOR: u32 = 0x0034_98DB;
/// Discord rejects embeds with more fields than this.
const MAX_EMBED_FIELDS: usize = 25;

/// Builds the class panel embed.
#[must_use]
pub fn class_embed(panel: &ClassPanel) -> serenity::CreateEmbed {
    let total = panel.blocks.len();
    let mut fields: Vec<(String, String, bool)> = panel
        .blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let name = if total == 1 {
                "Alunos".to_string()
            } else {
                format!("Alunos ({}/{total})", i + 1)
            };
            (name, block.clone(), false)
        })
        .collect();
    if let Some(notice) = &panel.truncation_notice {
        fields.push(("…".to_string(), notice.clone(), false));
    }

    let mut description = format!("{}\n{}", panel.status_line, panel.count_line);
    if panel.blocks.is_empty() {
        description.push_str("\n\n_Nenhum aluno ainda_");
    }

    serenity::CreateEmbed::default()
        .title(&panel.title)
        .description(description)
        .color(PANEL_COLOR)
        .fields(fields)
        .timestamp(serenity::Timestamp::now())
}

/// Builds the course panel embed.
#[must_use]
pub fn course_embed(blocks: &[CourseBlock]) -> serenity::CreateEmbed {
    if blocks.len() > MAX_EMBED_FIELDS {
        warn!(
            "Course panel shows only the first {} of {} courses",
            MAX_EMBED_FIELDS,
            blocks.len()
        );
    }

    let fields = blocks.iter().take(MAX_EMBED_FIELDS).map(|block| {
        let value = if block.students.is_empty() {
            "_Nenhum aluno_".to_string()
        } else {
            block
                .students
                .iter()
                .map(|label| format!("• {label}"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        (block.course.clone(), value, false)
    });

    let mut embed = serenity::CreateEmbed::default()
        .title("🎓 Cursos")
        .color(PANEL_COLOR)
        .fields(fields)
        .timestamp(serenity::Timestamp::now());
    if blocks.is_empty() {
        embed = embed.description("_Nenhum curso configurado_");
    }
    embed
}

fn message_id(stored: Option<&str>) -> Option<serenity::MessageId> {
    stored?
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(serenity::MessageId::new)
}

fn is_unknown_message(error: &serenity::Error) -> bool {
    matches!(
        error,
        serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}

/// Edits the stored panel message, or posts a new one when it is missing.
/// Returns the id of the message now showing the panel, `None` on failure.
async fn upsert_panel(
    ctx: &serenity::Context,
    channel_id: serenity::ChannelId,
    stored: Option<&str>,
    embed: serenity::CreateEmbed,
) -> Option<String> {
    if let Some(id) = message_id(stored) {
        let edit = serenity::EditMessage::new().embed(embed.clone());
        match channel_id.edit_message(ctx, id, edit).await {
            Ok(_) => return Some(id.to_string()),
            Err(e) if is_unknown_message(&e) => {
                info!("Panel message {} is gone, posting a new one", id);
            }
            Err(e) => {
                let failure = Error::ExternalCall {
                    action: format!("edit panel {id} in channel {channel_id}"),
                    message: e.to_string(),
                };
                warn!("{failure}");
                return None;
            }
        }
    }

    match channel_id
        .send_message(ctx, serenity::CreateMessage::new().embed(embed))
        .await
    {
        Ok(message) => Some(message.id.to_string()),
        Err(e) => {
            let failure = Error::ExternalCall {
                action: format!("post panel in channel {channel_id}"),
                message: e.to_string(),
            };
            warn!("{failure}");
            None
        }
    }
}

/// Re-renders both panels from the stored roster and publishes them in
/// their configured channels. New message ids are written back.
///
/// Callers hold [`BotData::event_gate`] so the read, the upsert and the id
/// write-back are not interleaved with another refresh.
pub async fn refresh_panels(ctx: &serenity::Context, data: &BotData) {
    let settings = &data.config.settings;
    if settings.class_channel_id.is_none() && settings.courses_channel_id.is_none() {
        return;
    }

    let roster = match data.store.read().await {
        Ok(roster) => roster,
        Err(e) => {
            warn!("Cannot refresh panels, roster unavailable: {}", e);
            return;
        }
    };

    let class_message = match settings.class_channel_id {
        Some(channel) => {
            let embed = class_embed(&panel::render_class_panel(&roster));
            upsert_panel(
                ctx,
                serenity::ChannelId::new(channel),
                roster.panels.class_message_id.as_deref(),
                embed,
            )
            .await
        }
        None => None,
    };

    let courses_message = match settings.courses_channel_id {
        Some(channel) => {
            let blocks = panel::render_course_panel(&roster, &data.config.catalog);
            upsert_panel(
                ctx,
                serenity::ChannelId::new(channel),
                roster.panels.courses_message_id.as_deref(),
                course_embed(&blocks),
            )
            .await
        }
        None => None,
    };

    let result = data
        .store
        .update(|roster| {
            if class_message.is_some() {
                roster.panels.class_message_id.clone_from(&class_message);
            }
            if courses_message.is_some() {
                roster.panels.courses_message_id.clone_from(&courses_message);
            }
            Ok(())
        })
        .await;
    if let Err(e) = result {
        warn!("Failed to store panel message ids: {}", e);
    }
}

/// Posts `content` in the class channel, if one is configured. Failures are
/// logged and swallowed.
pub async fn announce(ctx: &serenity::Context, data: &BotData, content: &str) {
    let Some(channel) = data.config.settings.class_channel_id else {
        return;
    };
    let channel_id = serenity::ChannelId::new(channel);
    if let Err(e) = channel_id.say(ctx, content).await {
        let failure = Error::ExternalCall {
            action: format!("announce in channel {channel_id}"),
            message: e.to_string(),
        };
        warn!("{failure}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_message_id_parsing() {
        assert_eq!(message_id(Some("123")), Some(serenity::MessageId::new(123)));
        assert_eq!(message_id(Some("0")), None);
        assert_eq!(message_id(Some("not-an-id")), None);
        assert_eq!(message_id(None), None);
    }
}
