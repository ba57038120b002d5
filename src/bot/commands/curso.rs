//! Course Discord commands - list the catalog and record manual course changes.
//!
//! A manual change is written to the roster first; the course role is then
//! granted or revoked on a best-effort basis.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::utils,
            handlers::{autocomplete::autocomplete_course_name, panels, roles::GuildRoles},
        },
        core::{
            courses::{self, ManualCourseChange},
            sync::{self, CommandOutcome, RoleAction},
        },
        entities::CourseStatus,
        errors::{Error, Result},
    };
    use chrono::Utc;
    use poise::serenity_prelude as serenity;
    use tracing::info;

    /// Parent command for course management.
    #[poise::command(
        slash_command,
        guild_only,
        subcommands("curso_listar", "curso_adicionar", "curso_remover")
    )]
    pub async fn curso(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Comandos de curso:\n\
            `/curso listar` - Listar os cursos disponíveis\n\
            `/curso adicionar` - Registrar um curso para um aluno\n\
            `/curso remover` - Remover um curso de um aluno";
        utils::reply(ctx, help_text, true).await
    }

    /// Lists the configured courses.
    #[poise::command(slash_command, rename = "listar", guild_only)]
    pub async fn curso_listar(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let catalog = &ctx.data().config.catalog;
        if catalog.is_empty() {
            return utils::reply(ctx, "Nenhum curso configurado.", true).await;
        }

        let lines: Vec<String> = catalog
            .courses()
            .iter()
            .map(|course| format!("• {} - <@&{}>", course.name, course.role_id))
            .collect();
        utils::reply(
            ctx,
            format!("🎓 **Cursos ({}):**\n{}", catalog.len(), utils::fit_lines(&lines)),
            true,
        )
        .await
    }

    /// Records a course for a member and grants its role.
    #[poise::command(
        slash_command,
        rename = "adicionar",
        guild_only,
        required_permissions = "MANAGE_ROLES"
    )]
    pub async fn curso_adicionar(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Membro"] membro: serenity::User,
        #[description = "Curso"]
        #[autocomplete = "autocomplete_course_name"]
        curso: String,
    ) -> Result<()> {
        let outcome = change_course(ctx, &membro, &curso, CourseStatus::Added).await?;
        utils::reply(
            ctx,
            format!(
                "✅ Curso **{}** adicionado para <@{}>.{}",
                outcome.roster.course.name,
                membro.id,
                utils::role_sync_note(&outcome.role_sync)
            ),
            true,
        )
        .await
    }

    /// Records a course removal for a member and revokes its role.
    #[poise::command(
        slash_command,
        rename = "remover",
        guild_only,
        required_permissions = "MANAGE_ROLES"
    )]
    pub async fn curso_remover(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Membro"] membro: serenity::User,
        #[description = "Curso"]
        #[autocomplete = "autocomplete_course_name"]
        curso: String,
    ) -> Result<()> {
        let outcome = change_course(ctx, &membro, &curso, CourseStatus::Removed).await?;
        utils::reply(
            ctx,
            format!(
                "🗑️ Curso **{}** removido de <@{}>.{}",
                outcome.roster.course.name,
                membro.id,
                utils::role_sync_note(&outcome.role_sync)
            ),
            true,
        )
        .await
    }

    async fn change_course(
        ctx: poise::Context<'_, BotData, Error>,
        user: &serenity::User,
        course_name: &str,
        status: CourseStatus,
    ) -> Result<CommandOutcome<ManualCourseChange>> {
        let guild_id = utils::require_guild(ctx)?;
        let member = utils::resolve_member(ctx, guild_id, user).await?;
        let data = ctx.data();
        let _event = data.event_gate.lock().await;
        let member_id = member.user.id.to_string();
        let tag = member.user.tag();

        let change = data
            .store
            .update(|roster| {
                courses::record_manual(
                    roster,
                    &data.config.catalog,
                    &member_id,
                    Some(&tag),
                    course_name,
                    status,
                    Utc::now(),
                )
            })
            .await?;
        info!(
            "{} recorded course {} as {:?} for {}",
            ctx.author().tag(),
            change.course.name,
            status,
            tag
        );

        let action = match status {
            CourseStatus::Added => RoleAction::Grant,
            CourseStatus::Removed => RoleAction::Revoke,
        };
        let gateway = GuildRoles::new(ctx.http(), guild_id);
        let role_sync =
            sync::sync_role(&gateway, &member_id, Some(change.course.role_id), action).await;

        panels::refresh_panels(ctx.serenity_context(), data).await;

        Ok(CommandOutcome {
            roster: change,
            role_sync,
        })
    }
}

// Re-export all commands
pub use inner::*;
