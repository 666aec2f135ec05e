//! Button, select-menu and modal handlers.
//!
//! Components are routed by custom ID. Interactions claimed by a pending
//! collector wait never reach these handlers.

pub mod application;
pub mod profile;
pub mod review;
pub mod ticket;

use serenity::all::{ActionRowComponent, ComponentInteraction, Context, ModalInteraction};

use crate::{
    error::AppError,
    service::application::token::{IdentityModalToken, IntakeToken},
    state::AppState,
};

/// Routes a button press or menu selection to its handler.
pub async fn handle_component(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let custom_id = component.data.custom_id.as_str();

    if IntakeToken::matches(custom_id) {
        return application::handle_button(state, ctx, component).await;
    }
    if custom_id == ticket::SELECT_MENU_ID {
        return ticket::handle_select(state, ctx, component).await;
    }
    if custom_id == ticket::CLOSE_BUTTON_ID {
        return ticket::handle_close(state, ctx, component).await;
    }
    if let Some(modal) = ticket::TicketModal::from_report_button(custom_id) {
        return ticket::show_modal(ctx, component, modal).await;
    }
    if review::is_review_button(custom_id) {
        return review::handle_stale_button(state, ctx, component).await;
    }
    if let Some((decision, target)) = profile::parse_button(custom_id) {
        return profile::handle_decision(state, ctx, component, decision, target).await;
    }

    tracing::warn!("Unhandled component interaction {}", custom_id);
    Ok(())
}

/// Routes a modal submission nobody was waiting for.
pub async fn handle_modal(
    state: &AppState,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let custom_id = modal.data.custom_id.as_str();

    if IdentityModalToken::matches(custom_id) {
        return application::handle_expired_identity(ctx, modal).await;
    }
    if let Some(ticket_modal) = ticket::TicketModal::parse(custom_id) {
        return ticket::handle_submit(state, ctx, modal, ticket_modal).await;
    }

    tracing::warn!("Unhandled modal submission {}", custom_id);
    Ok(())
}

/// Text inputs of a submitted modal as `(custom_id, value)` pairs.
pub fn modal_inputs(modal: &ModalInteraction) -> Vec<(&str, &str)> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .filter_map(|component| match component {
            ActionRowComponent::InputText(input) => Some((
                input.custom_id.as_str(),
                input.value.as_deref().unwrap_or_default(),
            )),
            _ => None,
        })
        .collect()
}
