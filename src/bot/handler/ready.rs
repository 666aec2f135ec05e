//! Ready event handler for bot initialization.
//!
//! Fired once the bot completes the gateway handshake. Registers the slash and
//! context-menu commands in the configured guild; registration replaces any
//! commands left over from a previous version.

use serenity::all::{Context, GuildId, Ready};

use crate::{bot::command, state::AppState};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Bot state holding the configured guild
/// - `ctx` - Discord context for registering commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    let guild_id = GuildId::new(state.config.discord_guild_id);
    match guild_id
        .set_commands(&ctx.http, command::definitions())
        .await
    {
        Ok(commands) => tracing::info!(
            "Registered {} commands in guild {}",
            commands.len(),
            guild_id
        ),
        Err(e) => tracing::error!("Failed to register commands in guild {}: {}", guild_id, e),
    }
}
