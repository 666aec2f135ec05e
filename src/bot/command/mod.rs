//! Slash and context-menu commands registered in the configured guild.

pub mod application;
pub mod booster_profile;
pub mod setup;

use serenity::all::{CommandInteraction, Context, CreateCommand};

use crate::{error::AppError, state::AppState};

/// Every command the bot registers on ready.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        setup::definition(),
        application::definition(),
        booster_profile::definition(),
    ]
}

/// Routes a command interaction by name.
pub async fn handle_command(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    match command.data.name.as_str() {
        setup::NAME => setup::handle(ctx, command).await,
        application::NAME => application::handle(state, ctx, command).await,
        booster_profile::NAME => booster_profile::handle(state, ctx, command).await,
        name => {
            tracing::warn!("Received unknown command {}", name);
            Ok(())
        }
    }
}
