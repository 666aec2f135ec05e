//! `/application` reviews staff applications posted by the form webhook.
//!
//! `proceed` turns a form message into a stored application after the invoker
//! confirms it, `approve` and `deny` decide a pending one.

use std::time::Duration;

use serenity::all::{
    ChannelId, CommandInteraction, CommandOptionType, ComponentInteraction, Context,
    CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditInteractionResponse, Embed, MessageId, Permissions,
    ResolvedOption, ResolvedValue, User,
};

use crate::{
    bot::{
        collector::{WaitOutcome, WaitWindow},
        component::review::{
            approved_dm, denied_dm, received_dm, review_buttons, review_embed, send_dm,
            ReviewChannels, CANCEL_BUTTON_ID,
        },
    },
    error::{validation::ValidationError, AppError},
    model::application::{ApplicationDraft, CreateApplicationParams},
    service::application::review::ReviewService,
    state::AppState,
    util::parse::parse_message_link,
};

pub const NAME: &str = "application";

const CONFIRM_WINDOW: Duration = Duration::from_secs(60);

pub fn definition() -> CreateCommand {
    let applicant = || {
        CreateCommandOption::new(CommandOptionType::User, "applicant", "The applicant")
            .required(true)
    };

    CreateCommand::new(NAME)
        .description("Manage staff applications")
        .default_member_permissions(Permissions::MANAGE_GUILD)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "proceed",
                "Proceed with an application",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "messagelink",
                    "Link to the application form message",
                )
                .required(true),
            )
            .add_sub_option(applicant()),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "approve",
                "Approve an application",
            )
            .add_sub_option(applicant()),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "deny", "Deny an application")
                .add_sub_option(applicant())
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "reason",
                        "Reason for the denial",
                    )
                    .required(true),
                ),
        )
}

/// Arguments of one `/application` subcommand.
#[derive(Debug, Default)]
struct Arguments<'a> {
    message_link: Option<&'a str>,
    applicant: Option<&'a User>,
    reason: Option<&'a str>,
}

impl<'a> Arguments<'a> {
    fn from_options(options: Vec<ResolvedOption<'a>>) -> Self {
        let mut arguments = Self::default();
        for option in options {
            match (option.name, option.value) {
                ("messagelink", ResolvedValue::String(link)) => {
                    arguments.message_link = Some(link)
                }
                ("applicant", ResolvedValue::User(user, _)) => arguments.applicant = Some(user),
                ("reason", ResolvedValue::String(reason)) => arguments.reason = Some(reason),
                _ => {}
            }
        }
        arguments
    }
}

pub async fn handle(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let Some(ResolvedOption {
        name: subcommand,
        value: ResolvedValue::SubCommand(options),
        ..
    }) = command.data.options().into_iter().next()
    else {
        tracing::warn!("/application invoked without a subcommand");
        return Ok(());
    };
    let arguments = Arguments::from_options(options);

    command.defer_ephemeral(&ctx.http).await?;

    let Some(applicant) = arguments.applicant else {
        let err = AppError::from(ValidationError::MissingField("applicant"));
        return finish(ctx, command, Err(err)).await;
    };

    match subcommand {
        "proceed" => {
            let link = arguments.message_link.unwrap_or_default();
            proceed(state, ctx, command, link, applicant).await
        }
        "approve" => {
            let result = approve(state, ctx, applicant).await;
            finish(ctx, command, result).await
        }
        "deny" => {
            let reason = arguments.reason.unwrap_or_default().to_string();
            let result = deny(state, ctx, applicant, reason).await;
            finish(ctx, command, result).await
        }
        other => {
            tracing::warn!("Unknown /application subcommand {}", other);
            Ok(())
        }
    }
}

/// Replaces the deferred response with the outcome text.
async fn finish(
    ctx: &Context,
    command: &CommandInteraction,
    result: Result<String, AppError>,
) -> Result<(), AppError> {
    let content = result.unwrap_or_else(|err| err.user_message());
    command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await?;
    Ok(())
}

/// Reads and validates the application in the first embed of a form message.
pub fn read_application(
    embeds: &[Embed],
    applicant: &User,
) -> Result<CreateApplicationParams, ValidationError> {
    let embed = embeds.first().ok_or(ValidationError::MissingEmbed)?;
    let fields = embed
        .fields
        .iter()
        .map(|field| (field.name.as_str(), field.value.as_str()));

    ApplicationDraft::from_embed_fields(applicant.id.get(), applicant.name.clone(), fields)
        .validate()
}

async fn fetch_application(
    ctx: &Context,
    link: &str,
    applicant: &User,
) -> Result<CreateApplicationParams, AppError> {
    let (_, channel_id, message_id) = parse_message_link(link)
        .ok_or_else(|| ValidationError::InvalidMessageLink(link.to_string()))?;

    let message = ChannelId::new(channel_id)
        .message(&ctx.http, MessageId::new(message_id))
        .await?;

    Ok(read_application(&message.embeds, applicant)?)
}

async fn proceed(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
    link: &str,
    applicant: &User,
) -> Result<(), AppError> {
    let params = match fetch_application(ctx, link, applicant).await {
        Ok(params) => params,
        Err(err) => return finish(ctx, command, Err(err)).await,
    };

    // The deferred response already has its final message id; register on it
    // before the buttons become visible.
    let response = command.get_response(&ctx.http).await?;
    let invoker = command.user.id;
    let subscription = state
        .collectors
        .components
        .register_filtered(response.id.get(), move |press: &ComponentInteraction| {
            press.user.id == invoker
        });

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new()
                .embed(review_embed(&params))
                .components(vec![review_buttons()]),
        )
        .await?;

    let press = match subscription.wait(WaitWindow::Bounded(CONFIRM_WINDOW)).await {
        WaitOutcome::Received(press) => press,
        WaitOutcome::TimedOut => {
            command
                .edit_response(
                    &ctx.http,
                    EditInteractionResponse::new()
                        .content("Confirmation not received within 1 minute, cancelling.")
                        .embeds(vec![])
                        .components(vec![]),
                )
                .await?;
            return Ok(());
        }
        WaitOutcome::Superseded => {
            tracing::debug!("Review confirmation {} superseded", response.id);
            return Ok(());
        }
    };

    let settle = |content: &str| {
        CreateInteractionResponse::UpdateMessage(
            CreateInteractionResponseMessage::new()
                .content(content)
                .embeds(vec![])
                .components(vec![]),
        )
    };

    if press.data.custom_id == CANCEL_BUTTON_ID {
        press
            .create_response(&ctx.http, settle("Application process cancelled."))
            .await?;
        return Ok(());
    }

    press
        .create_response(&ctx.http, settle("Processing application..."))
        .await?;

    let provisioner = ReviewChannels::new(ctx.http.clone(), state.config.clone());
    let result = match ReviewService::new(&state.db)
        .proceed(params, &provisioner)
        .await
    {
        Ok((application, channel_id)) => {
            let delivered = send_dm(
                &ctx.http,
                application.discord_id,
                received_dm(&application.discord, channel_id),
            )
            .await;
            Ok(processed_message(channel_id, delivered))
        }
        Err(err) => Err(err),
    };

    finish(ctx, command, result).await
}

fn processed_message(channel_id: u64, dm_delivered: bool) -> String {
    let dm_line = if dm_delivered {
        "DM notification sent"
    } else {
        "DM notification failed, the applicant does not accept DMs"
    };
    format!(
        "✅ Application processed!\n• Private channel created: <#{}>\n• {}",
        channel_id, dm_line
    )
}

async fn approve(state: &AppState, ctx: &Context, applicant: &User) -> Result<String, AppError> {
    let application = ReviewService::new(&state.db)
        .approve(applicant.id.get())
        .await?;

    send_dm(&ctx.http, application.discord_id, approved_dm(&application)).await;

    Ok("Application approved.".to_string())
}

async fn deny(
    state: &AppState,
    ctx: &Context,
    applicant: &User,
    reason: String,
) -> Result<String, AppError> {
    let application = ReviewService::new(&state.db)
        .deny(applicant.id.get(), reason.clone())
        .await?;

    send_dm(&ctx.http, application.discord_id, denied_dm(&reason)).await;

    Ok("Application denied.".to_string())
}
