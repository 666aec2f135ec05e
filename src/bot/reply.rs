//! Interaction reply helpers shared by commands and components.

use serenity::all::{
    CommandInteraction, ComponentInteraction, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, Http, ModalInteraction,
};
use serenity::async_trait;

use crate::error::AppError;

/// Ephemeral text reply.
pub fn ephemeral(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

/// Ephemeral text followup.
pub fn ephemeral_followup(content: impl Into<String>) -> CreateInteractionResponseFollowup {
    CreateInteractionResponseFollowup::new()
        .content(content)
        .ephemeral(true)
}

/// Interactions that can be answered, whatever their kind.
#[async_trait]
pub trait Reply: Sync {
    async fn respond(&self, http: &Http, response: CreateInteractionResponse) -> serenity::Result<()>;

    async fn follow_up(
        &self,
        http: &Http,
        followup: CreateInteractionResponseFollowup,
    ) -> serenity::Result<()>;
}

macro_rules! impl_reply {
    ($($interaction:ty),*) => {
        $(
            #[async_trait]
            impl Reply for $interaction {
                async fn respond(
                    &self,
                    http: &Http,
                    response: CreateInteractionResponse,
                ) -> serenity::Result<()> {
                    self.create_response(http, response).await
                }

                async fn follow_up(
                    &self,
                    http: &Http,
                    followup: CreateInteractionResponseFollowup,
                ) -> serenity::Result<()> {
                    self.create_followup(http, followup).await.map(|_| ())
                }
            }
        )*
    };
}

impl_reply!(CommandInteraction, ComponentInteraction, ModalInteraction);

/// Reports a failed interaction to the user who triggered it.
///
/// Answers with an ephemeral reply, or with a followup when the interaction was
/// already acknowledged.
pub async fn report_error(http: &Http, interaction: &impl Reply, err: AppError) {
    let message = err.user_message();

    if interaction.respond(http, ephemeral(message.clone())).await.is_ok() {
        return;
    }
    if let Err(e) = interaction
        .follow_up(http, ephemeral_followup(message))
        .await
    {
        tracing::error!("Failed to report error to user: {}", e);
    }
}
