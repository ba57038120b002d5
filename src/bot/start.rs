//! Poise framework construction and Discord client startup.

use super::{BotData, commands, handlers};
use crate::{config::AppConfig, core::store::RosterStore, errors::Error};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            if error.is_user_facing() {
                debug!("Command `{}` rejected: {}", ctx.command().name, error);
            } else {
                error!("Error in command `{}`: {:?}", ctx.command().name, error);
            }
            let reply = poise::CreateReply::default()
                .content(error.user_message())
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send error message: {}", e);
            }
        }
        poise::FrameworkError::MissingUserPermissions { ctx, .. } => {
            let reply = poise::CreateReply::default()
                .content("❌ Você não tem permissão para usar este comando.")
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send permission message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<(), Error> {
    if let serenity::FullEvent::GuildMemberUpdate {
        old_if_available,
        event: update,
        ..
    } = event
    {
        handlers::member::handle_member_update(ctx, data, old_if_available.as_ref(), update)
            .await?;
    }
    Ok(())
}

/// Builds the framework, registers the commands in the configured guild and
/// runs the client until it stops.
#[instrument(skip(token, app_config, store))]
pub async fn run_bot(
    token: String,
    app_config: Arc<AppConfig>,
    store: RosterStore,
) -> Result<(), serenity::Error> {
    let guild_id = serenity::GuildId::new(app_config.settings.guild_id);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::turma(),
                commands::curso(),
                commands::aluno(),
            ],
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id)
                    .await?;
                info!("Registered commands in guild {}", guild_id);

                let data = BotData::new(app_config, store);
                handlers::panels::refresh_panels(ctx, &data).await;
                Ok(data)
            })
        })
        .build();

    // GUILD_MEMBERS is privileged and must be enabled in the developer portal
    let intents = serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::GUILD_MEMBERS;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))
}
