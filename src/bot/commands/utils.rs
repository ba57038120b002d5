//! Reply and lookup helpers shared by the slash commands.

use crate::{
    bot::BotData,
    core::sync::RoleSync,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;

/// Discord's message length limit, with headroom for a trailing notice.
const MESSAGE_BUDGET: usize = 1900;

/// Sends `content` as a reply, visible only to the invoker when `ephemeral`.
pub async fn reply(
    ctx: poise::Context<'_, BotData, Error>,
    content: impl Into<String>,
    ephemeral: bool,
) -> Result<()> {
    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .ephemeral(ephemeral),
    )
    .await?;
    Ok(())
}

/// The guild the command was invoked in.
pub fn require_guild(ctx: poise::Context<'_, BotData, Error>) -> Result<serenity::GuildId> {
    ctx.guild_id().ok_or_else(|| Error::InvalidInput {
        message: "Este comando só funciona dentro do servidor.".to_string(),
    })
}

/// Fetches `user` as a member of `guild_id`.
pub async fn resolve_member(
    ctx: poise::Context<'_, BotData, Error>,
    guild_id: serenity::GuildId,
    user: &serenity::User,
) -> Result<serenity::Member> {
    guild_id
        .member(ctx.serenity_context(), user.id)
        .await
        .map_err(|_| Error::MemberNotResolvable {
            user_id: user.id.to_string(),
        })
}

/// Suffix added to a reply when the platform role change failed.
#[must_use]
pub const fn role_sync_note(sync: &RoleSync) -> &'static str {
    match sync {
        RoleSync::Failed { .. } => {
            "\n⚠️ Não consegui atualizar o cargo no servidor; o registro foi salvo mesmo assim."
        }
        RoleSync::Skipped | RoleSync::Applied => "",
    }
}

/// Joins `lines` with newlines, stopping before the message budget and
/// noting how many lines were left out.
#[must_use]
pub fn fit_lines(lines: &[String]) -> String {
    let mut out = String::new();
    for (shown, line) in lines.iter().enumerate() {
        if out.len() + line.len() + 1 > MESSAGE_BUDGET {
            out.push_str(&format!("\n… e mais {}", lines.len() - shown));
            return out;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
    }
    out
}
