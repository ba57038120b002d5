//! Student Discord commands - enrolment in the current class and the
//! per-student report.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::utils, handlers::{panels, roles::GuildRoles}},
        core::{
            courses,
            sync::{self, RoleAction},
            turma,
        },
        entities::{CourseSource, CourseStatus},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::info;

    /// Parent command for student management.
    #[poise::command(
        slash_command,
        guild_only,
        subcommands("aluno_ver", "aluno_adicionar", "aluno_remover")
    )]
    pub async fn aluno(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Comandos de aluno:\n\
            `/aluno ver` - Ver a ficha de um aluno\n\
            `/aluno adicionar` - Adicionar um aluno na turma atual\n\
            `/aluno remover` - Remover um aluno da turma atual";
        utils::reply(ctx, help_text, true).await
    }

    /// Shows a member's class, active courses and course history.
    #[poise::command(slash_command, rename = "ver", guild_only)]
    pub async fn aluno_ver(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Membro"] membro: serenity::User,
    ) -> Result<()> {
        let roster = ctx.data().store.read().await?;
        let member_id = membro.id.to_string();
        let Some(report) = courses::student_report(&roster, &member_id) else {
            return utils::reply(
                ctx,
                format!("ℹ️ <@{member_id}> ainda não tem registro."),
                true,
            )
            .await;
        };

        let class = report.class.as_deref().unwrap_or("Nenhuma");
        let active = if report.active_courses.is_empty() {
            "_Nenhum_".to_string()
        } else {
            report.active_courses.join(", ")
        };

        let history: Vec<String> = report
            .history
            .iter()
            .map(|event| {
                let status = match event.status {
                    CourseStatus::Added => "➕",
                    CourseStatus::Removed => "➖",
                };
                let source = match event.source {
                    CourseSource::RoleSync => "auto",
                    CourseSource::Command => "manual",
                };
                format!(
                    "{status} {} ({source}, {})",
                    event.course,
                    event.at.format("%d/%m/%Y %H:%M")
                )
            })
            .collect();
        let history = if history.is_empty() {
            "_Sem histórico_".to_string()
        } else {
            utils::fit_lines(&history)
        };

        utils::reply(
            ctx,
            format!(
                "👤 **{}**\n📚 Turma: **{class}**\n🎓 Cursos: {active}\n\n🕘 **Histórico:**\n{history}",
                report.label
            ),
            true,
        )
        .await
    }

    /// Enrols a member in the current class and grants the student role.
    #[poise::command(
        slash_command,
        rename = "adicionar",
        guild_only,
        required_permissions = "MANAGE_ROLES"
    )]
    pub async fn aluno_adicionar(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Membro"] membro: serenity::User,
    ) -> Result<()> {
        let guild_id = utils::require_guild(ctx)?;
        let member = utils::resolve_member(ctx, guild_id, &membro).await?;
        let data = ctx.data();
        let _event = data.event_gate.lock().await;
        let member_id = member.user.id.to_string();
        let tag = member.user.tag();

        let enrollment = data
            .store
            .update(|roster| turma::add_student(roster, &member_id, Some(&tag)))
            .await?;
        info!(
            "{} enrolled {} in class {}",
            ctx.author().tag(),
            tag,
            enrollment.class
        );

        let gateway = GuildRoles::new(ctx.http(), guild_id);
        let role_sync = sync::sync_role(
            &gateway,
            &member_id,
            data.config.settings.student_role_id,
            RoleAction::Grant,
        )
        .await;
        panels::refresh_panels(ctx.serenity_context(), data).await;

        let message = if enrollment.newly_added {
            format!(
                "✅ <@{member_id}> adicionado na turma **{}**.",
                enrollment.class
            )
        } else {
            format!(
                "ℹ️ <@{member_id}> já estava na turma **{}**.",
                enrollment.class
            )
        };
        utils::reply(
            ctx,
            format!("{message}{}", utils::role_sync_note(&role_sync)),
            true,
        )
        .await
    }

    /// Removes a member from the current class and revokes the student role.
    #[poise::command(
        slash_command,
        rename = "remover",
        guild_only,
        required_permissions = "MANAGE_ROLES"
    )]
    pub async fn aluno_remover(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Membro"] membro: serenity::User,
    ) -> Result<()> {
        let guild_id = utils::require_guild(ctx)?;
        let data = ctx.data();
        let _event = data.event_gate.lock().await;
        let member_id = membro.id.to_string();

        let (class, removed) = data
            .store
            .update(|roster| turma::remove_student(roster, &member_id))
            .await?;
        info!(
            "{} removed {} from class {} (enrolled: {})",
            ctx.author().tag(),
            membro.tag(),
            class,
            removed
        );

        let gateway = GuildRoles::new(ctx.http(), guild_id);
        let role_sync = sync::sync_role(
            &gateway,
            &member_id,
            data.config.settings.student_role_id,
            RoleAction::Revoke,
        )
        .await;
        panels::refresh_panels(ctx.serenity_context(), data).await;

        let message = if removed {
            format!("🗑️ <@{member_id}> removido da turma **{class}**.")
        } else {
            format!("ℹ️ <@{member_id}> não estava na turma **{class}**.")
        };
        utils::reply(
            ctx,
            format!("{message}{}", utils::role_sync_note(&role_sync)),
            true,
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
