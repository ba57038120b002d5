//! Class Discord commands - open, close, status and listing.
//!
//! Opening and closing are announced in the class channel; every mutation
//! refreshes the panels.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::utils, handlers::panels},
        core::turma,
        errors::{Error, Result},
    };
    use chrono::Utc;

    /// Parent command for class management.
    #[poise::command(
        slash_command,
        guild_only,
        subcommands("turma_abrir", "turma_fechar", "turma_status", "turma_listar")
    )]
    pub async fn turma(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Comandos de turma:\n\
            `/turma abrir` - Abrir uma turma\n\
            `/turma fechar` - Fechar a turma atual\n\
            `/turma status` - Ver a turma atual\n\
            `/turma listar` - Listar os alunos da turma atual";
        utils::reply(ctx, help_text, true).await
    }

    /// Opens a class and makes it the current one.
    #[poise::command(
        slash_command,
        rename = "abrir",
        guild_only,
        required_permissions = "MANAGE_GUILD"
    )]
    pub async fn turma_abrir(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Nome da turma"] nome: String,
    ) -> Result<()> {
        let data = ctx.data();
        let _event = data.event_gate.lock().await;
        let status = data
            .store
            .update(|roster| turma::open_class(roster, &nome, Utc::now()))
            .await?;
        let name = status.name.unwrap_or_default();

        panels::announce(
            ctx.serenity_context(),
            data,
            &format!("✅ **Turma aberta:** **{name}**\nUse `/aluno adicionar` para adicionar alunos."),
        )
        .await;
        panels::refresh_panels(ctx.serenity_context(), data).await;

        utils::reply(
            ctx,
            format!("✅ Turma **{name}** aberta! ({} alunos)", status.member_count),
            true,
        )
        .await
    }

    /// Closes the current class; it stays current for status queries.
    #[poise::command(
        slash_command,
        rename = "fechar",
        guild_only,
        required_permissions = "MANAGE_GUILD"
    )]
    pub async fn turma_fechar(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let _event = data.event_gate.lock().await;
        let status = data
            .store
            .update(|roster| Ok(turma::close_class(roster)))
            .await?;
        let Some(name) = status.name.as_deref() else {
            return utils::reply(ctx, "ℹ️ Nenhuma turma para fechar.", true).await;
        };

        panels::announce(
            ctx.serenity_context(),
            data,
            &format!("🔒 **Turma fechada:** **{name}**"),
        )
        .await;
        panels::refresh_panels(ctx.serenity_context(), data).await;

        utils::reply(ctx, format!("🔒 Turma **{name}** fechada!"), true).await
    }

    /// Shows the current class and whether it is open.
    #[poise::command(slash_command, rename = "status", guild_only)]
    pub async fn turma_status(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let roster = ctx.data().store.read().await?;
        let status = turma::class_status(&roster);

        let name = status.name.as_deref().unwrap_or("Nenhuma");
        let open = if status.is_open { "Sim" } else { "Não" };
        utils::reply(
            ctx,
            format!(
                "📌 Turma atual: **{name}**\n📖 Turma aberta: **{open}**\n👥 Alunos: **{}**",
                status.member_count
            ),
            true,
        )
        .await
    }

    /// Lists the students of the current class.
    #[poise::command(slash_command, rename = "listar", guild_only)]
    pub async fn turma_listar(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let roster = ctx.data().store.read().await?;
        let listing = turma::current_listing(&roster)?;

        let members = if listing.members.is_empty() {
            "_Nenhum aluno ainda_".to_string()
        } else {
            let lines: Vec<String> = listing
                .members
                .iter()
                .map(|(id, _)| format!("<@{id}>"))
                .collect();
            utils::fit_lines(&lines)
        };

        utils::reply(
            ctx,
            format!(
                "📚 **Turma:** **{}**\n👥 **Alunos ({}):**\n{members}",
                listing.name,
                listing.members.len()
            ),
            false,
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
