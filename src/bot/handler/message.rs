use serenity::all::{Context, Message};

use crate::state::AppState;

/// Handle message creation in a channel
///
/// Messages only matter to a pending wait for their channel and author; all
/// others are ignored.
pub async fn handle_message(state: &AppState, _ctx: Context, message: Message) {
    if message.author.bot || message.guild_id.is_none() {
        return;
    }

    let key = (message.channel_id.get(), message.author.id.get());
    if state.collectors.messages.offer(&key, message).is_ok() {
        tracing::debug!(
            "Delivered message from user {} in channel {} to a pending wait",
            key.1,
            key.0
        );
    }
}
