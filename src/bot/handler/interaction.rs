//! Interaction routing.
//!
//! Components and modals are first offered to the pending collector waits. Only
//! what no wait claims is routed to the command and component handlers, and any
//! error they return is reported back to the user.

use serenity::all::{Context, Interaction};

use crate::{
    bot::{command, component, reply},
    state::AppState,
};

/// Handles an interaction created by a guild member.
///
/// # Arguments
/// - `state` - Shared bot state with the collector registries
/// - `ctx` - Discord context for replying
/// - `interaction` - The command, component or modal interaction
pub async fn handle_interaction(state: &AppState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => {
            tracing::debug!(
                "Command {} invoked by user {}",
                command.data.name,
                command.user.id
            );

            if let Err(err) = command::handle_command(state, &ctx, &command).await {
                reply::report_error(&ctx.http, &command, err).await;
            }
        }
        Interaction::Component(interaction) => {
            let key = interaction.message.id.get();
            let Err(interaction) = state.collectors.components.offer(&key, interaction) else {
                return;
            };

            if let Err(err) = component::handle_component(state, &ctx, &interaction).await {
                reply::report_error(&ctx.http, &interaction, err).await;
            }
        }
        Interaction::Modal(modal) => {
            let key = (modal.user.id.get(), modal.data.custom_id.clone());
            let Err(modal) = state.collectors.modals.offer(&key, modal) else {
                return;
            };

            if let Err(err) = component::handle_modal(state, &ctx, &modal).await {
                reply::report_error(&ctx.http, &modal, err).await;
            }
        }
        _ => {}
    }
}
