//! *Booster Profile* user context menu.

use serenity::all::{
    CommandInteraction, CommandType, Context, CreateCommand, EditInteractionResponse,
    ResolvedTarget,
};

use crate::{
    bot::component::profile::{is_hiring_manager, profile_buttons, profile_embed},
    error::AppError,
    service::application::profile::ProfileService,
    state::AppState,
};

pub const NAME: &str = "Booster Profile";

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME).kind(CommandType::User)
}

/// Shows the target's booster profile to the invoker.
///
/// Hiring managers also get the approve/reject buttons while the profile is
/// pending.
pub async fn handle(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let Some(ResolvedTarget::User(target, _)) = command.data.target() else {
        tracing::warn!("Booster Profile invoked without a target user");
        return Ok(());
    };

    command.defer_ephemeral(&ctx.http).await?;

    let profile = match ProfileService::new(state.booster_api.as_ref())
        .get(target.id.get())
        .await
    {
        Ok(profile) => profile,
        Err(err) => {
            command
                .edit_response(
                    &ctx.http,
                    EditInteractionResponse::new().content(err.user_message()),
                )
                .await?;
            return Ok(());
        }
    };

    let mut response = EditInteractionResponse::new().embed(profile_embed(target, &profile));
    if profile.is_pending()
        && is_hiring_manager(
            command.member.as_deref(),
            state.config.hiring_manager_role_id,
        )
    {
        response = response.components(vec![profile_buttons(target.id.get())]);
    }

    command.edit_response(&ctx.http, response).await?;

    Ok(())
}
