//! Autocomplete handlers for Discord slash command parameters.

use crate::{bot::BotData, errors::Error};

/// Suggests catalog course names containing the partial input.
///
/// Suggestions keep catalog order and are capped at Discord's limit of 25.
pub async fn autocomplete_course_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    ctx.data()
        .config
        .catalog
        .courses()
        .iter()
        .filter(|course| course.name.to_lowercase().contains(&partial_lower))
        .map(|course| course.name.clone())
        .take(25) // Discord autocomplete limit
        .collect()
}
