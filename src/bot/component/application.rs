//! Discord side of the booster application intake.
//!
//! Panel buttons walk the applicant through language, game and region selection by
//! updating one ephemeral message. Region selection opens the Riot ID modal; a
//! valid submission runs the rank check, the backend submission and the channel
//! provisioning. The *Start* button posted in the new channel then collects the
//! applicant's full name and terms agreement from plain messages.

use std::{sync::Arc, time::Duration};

use serenity::all::{
    ButtonStyle, ChannelId, ComponentInteraction, Context, CreateActionRow,
    CreateAllowedMentions, CreateButton, CreateEmbed, CreateEmbedFooter, CreateInputText,
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage, CreateModal,
    EditInteractionResponse, Http, InputTextStyle, Message, ModalInteraction, UserId,
};
use serenity::async_trait;

use crate::{
    bot::{
        channel::{channel_name, create_private_channel, discard_channel, private_overwrites},
        collector::{WaitOutcome, WaitWindow},
        component::modal_inputs,
        reply,
    },
    config::Config,
    error::AppError,
    model::intake::{Game, Language, Region, RiotId},
    service::application::{
        flow::{FlowEvent, FlowSession},
        intake::{terms_match, ChannelProvisioner, IntakeService},
        token::{IdentityModalToken, IntakeChoice, IntakeToken},
    },
    state::AppState,
    util::i18n::{render, terms_link, terms_phrase, Msg, Placeholder},
};

const PANEL_COLOUR: u32 = 0xF1B754;
const IDENTITY_INPUT: &str = "userTagInput";
const IDENTITY_WINDOW: Duration = Duration::from_secs(60);
const NAME_WINDOW: Duration = Duration::from_secs(5 * 60);

const PANEL_DESCRIPTION: &str = "We're always looking for skilled players to join our boosting team, whether you have a main account, you're a long time booster, or you're already working on another platform, we've got a spot for you.\n\n- **Default Application**:\n```For boosters who've got a main account ready to roll.```\n- **Special Application**:\n```For those boosting without a main account or already working on another platform.```\n- **Minimum Requirements**:\n\n- **League of Legends**\n> BR Server: Grand Master+\n> NA/EUW/EUNE Servers: Master 200 LP+\n\n- **Valorant**\n> Immortal 2+\n\n- **Teamfight Tactics**\n> Master+";

/// A button offered at one selection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceButton {
    pub custom_id: String,
    pub label: String,
    pub enabled: bool,
}

impl ChoiceButton {
    fn build(&self) -> CreateButton {
        CreateButton::new(&self.custom_id)
            .label(&self.label)
            .style(ButtonStyle::Secondary)
            .disabled(!self.enabled)
    }
}

fn button_row(choices: &[ChoiceButton]) -> CreateActionRow {
    CreateActionRow::Buttons(choices.iter().map(ChoiceButton::build).collect())
}

/// The recruitment panel posted by `/setup`.
pub fn panel() -> CreateMessage {
    CreateMessage::new()
        .embed(
            CreateEmbed::new()
                .title("Yo, wanna join the squad? 🚀")
                .description(PANEL_DESCRIPTION)
                .colour(PANEL_COLOUR),
        )
        .components(vec![CreateActionRow::Buttons(vec![
            CreateButton::new(IntakeToken::Default.encode())
                .label("Default Application")
                .style(ButtonStyle::Secondary),
            CreateButton::new(IntakeToken::Special.encode())
                .label("Special Application")
                .style(ButtonStyle::Secondary),
        ])])
}

pub fn language_choices() -> Vec<ChoiceButton> {
    [(Language::En, "English"), (Language::Pt, "Português")]
        .into_iter()
        .map(|(language, label)| ChoiceButton {
            custom_id: IntakeToken::Language(language).encode(),
            label: label.to_string(),
            enabled: true,
        })
        .collect()
}

/// Every game, with the ones closed for applications shown but disabled.
pub fn game_choices(language: Language) -> Vec<ChoiceButton> {
    Game::ALL
        .into_iter()
        .map(|game| ChoiceButton {
            custom_id: IntakeToken::Game { language, game }.encode(),
            label: game.display_name().to_string(),
            enabled: game.is_open_for_applications(),
        })
        .collect()
}

pub fn region_choices(language: Language, game: Game) -> Vec<ChoiceButton> {
    Region::ALL
        .into_iter()
        .map(|region| {
            let label = match region {
                Region::Na => Msg::RegionNa,
                Region::Eu => Msg::RegionEu,
                Region::Br => Msg::RegionBr,
            };
            ChoiceButton {
                custom_id: IntakeToken::Region(IntakeChoice {
                    language,
                    game,
                    region,
                })
                .encode(),
                label: render(language, label, &[]),
                enabled: true,
            }
        })
        .collect()
}

fn prompt(title: String, description: String, footer: String) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .footer(CreateEmbedFooter::new(footer))
        .colour(PANEL_COLOUR)
}

fn language_prompt() -> CreateInteractionResponse {
    let lang = Language::En;
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .embed(prompt(
                render(lang, Msg::LanguageTitle, &[]),
                render(lang, Msg::LanguageDescription, &[]),
                render(lang, Msg::LanguageFooter, &[]),
            ))
            .components(vec![button_row(&language_choices())])
            .ephemeral(true),
    )
}

fn game_prompt(language: Language) -> CreateInteractionResponse {
    CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .embed(prompt(
                render(language, Msg::GameTitle, &[]),
                render(language, Msg::GameDescription, &[]),
                render(language, Msg::SelectionFooter, &[]),
            ))
            .components(vec![button_row(&game_choices(language))]),
    )
}

fn region_prompt(language: Language, game: Game) -> CreateInteractionResponse {
    let game_name = [(Placeholder::Game, game.display_name())];
    CreateInteractionResponse::UpdateMessage(
        CreateInteractionResponseMessage::new()
            .embed(prompt(
                render(language, Msg::RegionTitle, &game_name),
                render(language, Msg::RegionDescription, &game_name),
                render(language, Msg::SelectionFooter, &[]),
            ))
            .components(vec![button_row(&region_choices(language, game))]),
    )
}

fn identity_modal(language: Language, custom_id: String) -> CreateInteractionResponse {
    CreateInteractionResponse::Modal(
        CreateModal::new(custom_id, render(language, Msg::IdentityModalTitle, &[])).components(
            vec![CreateActionRow::InputText(
                CreateInputText::new(
                    InputTextStyle::Short,
                    render(language, Msg::IdentityModalLabel, &[]),
                    IDENTITY_INPUT,
                )
                .placeholder("name#tag")
                .required(true),
            )],
        ),
    )
}

/// Handles every `application:` button.
pub async fn handle_button(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let token = IntakeToken::decode(&component.data.custom_id)?;
    let user_id = component.user.id.get();
    let channel_id = component.channel_id.get();

    match token {
        IntakeToken::Default => {
            component.create_response(&ctx.http, language_prompt()).await?;
        }
        IntakeToken::Special => {
            component
                .create_response(
                    &ctx.http,
                    reply::ephemeral(render(Language::En, Msg::SpecialDisabled, &[])),
                )
                .await?;
        }
        IntakeToken::Language(language) => {
            FlowSession::restore(user_id, &token, channel_id)?;
            component.create_response(&ctx.http, game_prompt(language)).await?;
        }
        IntakeToken::Game { language, game } => {
            if !game.is_open_for_applications() {
                tracing::warn!("User {} selected closed game {}", user_id, game.api_name());
                let text = render(
                    language,
                    Msg::GameUnavailable,
                    &[(Placeholder::Game, game.display_name())],
                );
                component
                    .create_response(&ctx.http, reply::ephemeral(text))
                    .await?;
                return Ok(());
            }

            FlowSession::restore(user_id, &token, channel_id)?;
            component
                .create_response(&ctx.http, region_prompt(language, game))
                .await?;
        }
        IntakeToken::Region(choice) => {
            let session = FlowSession::restore(user_id, &token, channel_id)?;
            collect_identity(state, ctx, component, session, choice).await?;
        }
        IntakeToken::Start { choice, applicant } => {
            if user_id != applicant {
                let text = render(choice.language, Msg::NotYourButton, &[]);
                component
                    .create_response(&ctx.http, reply::ephemeral(text))
                    .await?;
                return Ok(());
            }

            let session = FlowSession::restore(user_id, &token, channel_id)?;
            collect_name_and_terms(state, ctx, component, session, choice.language).await?;
        }
    }

    Ok(())
}

/// Shows the Riot ID modal and waits for this user's submission.
async fn collect_identity(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
    mut session: FlowSession,
    choice: IntakeChoice,
) -> Result<(), AppError> {
    let modal_id = IdentityModalToken(choice).encode();
    let subscription = state
        .collectors
        .modals
        .register((session.user_id, modal_id.clone()));

    component
        .create_response(&ctx.http, identity_modal(choice.language, modal_id))
        .await?;

    match subscription.wait(WaitWindow::Bounded(IDENTITY_WINDOW)).await {
        WaitOutcome::Received(modal) => {
            if let Err(err) = submit_identity(state, ctx, &modal, session).await {
                reply::report_error(&ctx.http, &modal, err).await;
            }
        }
        WaitOutcome::TimedOut => {
            session.apply(FlowEvent::TimedOut)?;
            tracing::info!("Riot ID window expired for user {}", session.user_id);
            component
                .create_followup(
                    &ctx.http,
                    reply::ephemeral_followup(render(choice.language, Msg::IdentityExpired, &[])),
                )
                .await?;
        }
        WaitOutcome::Superseded => {
            tracing::debug!("Riot ID wait of user {} superseded", session.user_id);
        }
    }

    Ok(())
}

/// Runs rank check, backend submission and channel provisioning for a submitted
/// Riot ID, reporting progress by editing the deferred reply.
async fn submit_identity(
    state: &AppState,
    ctx: &Context,
    modal: &ModalInteraction,
    mut session: FlowSession,
) -> Result<(), AppError> {
    let lang = session.language_or_default();
    let input = modal_inputs(modal)
        .into_iter()
        .find(|(custom_id, _)| *custom_id == IDENTITY_INPUT)
        .map(|(_, value)| value)
        .unwrap_or_default();

    let riot_id = RiotId::parse(input)?;
    session.apply(FlowEvent::IdentitySubmitted(riot_id))?;

    modal.defer_ephemeral(&ctx.http).await?;
    let edit = |content: String| EditInteractionResponse::new().content(content);

    let intake = IntakeService::new(state.booster_api.as_ref(), state.rank_oracle.as_ref());

    if let Err(err) = intake.check_rank(&mut session).await {
        modal.edit_response(&ctx.http, edit(err.localized(lang))).await?;
        return Ok(());
    }

    modal
        .edit_response(&ctx.http, edit(render(lang, Msg::ChannelCreating, &[])))
        .await?;

    let provisioner = ApplicationChannels::new(ctx.http.clone(), state.config.clone());
    let content = match intake
        .submit_and_provision(&mut session, &provisioner, &modal.user.name)
        .await
    {
        Ok(channel_id) => render(
            lang,
            Msg::ChannelCreated,
            &[(Placeholder::Channel, &format!("<#{}>", channel_id))],
        ),
        Err(err) => err.localized(lang),
    };
    modal.edit_response(&ctx.http, edit(content)).await?;

    Ok(())
}

/// Asks for the applicant's full name, then for the terms confirmation phrase.
///
/// A missed name window leaves the conversation where it is; pressing *Start*
/// again opens a new window. The terms window never expires and ignores every
/// message that is not the exact phrase.
async fn collect_name_and_terms(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
    mut session: FlowSession,
    lang: Language,
) -> Result<(), AppError> {
    let channel_id = component.channel_id;
    let applicant = session.user_id;
    let key = (channel_id.get(), applicant);
    let mention = format!("<@{}>", applicant);

    let name_wait = state
        .collectors
        .messages
        .register_filtered(key, |message: &Message| !message.content.trim().is_empty());

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(
                render(lang, Msg::AskName, &[(Placeholder::User, &mention)]),
            )),
        )
        .await?;

    let message = match name_wait.wait(WaitWindow::Bounded(NAME_WINDOW)).await {
        WaitOutcome::Received(message) => message,
        WaitOutcome::TimedOut => {
            session.apply(FlowEvent::TimedOut)?;
            channel_id
                .say(&ctx.http, render(lang, Msg::NameTimeout, &[]))
                .await?;
            return Ok(());
        }
        WaitOutcome::Superseded => return Ok(()),
    };

    let intake = IntakeService::new(state.booster_api.as_ref(), state.rank_oracle.as_ref());

    let name = match intake.save_name(&mut session, &message.content).await {
        Ok(name) => name,
        Err(err) => {
            tracing::error!("Failed to store full name of user {}: {}", applicant, err);
            channel_id
                .say(&ctx.http, render(lang, Msg::NameUpdateFailed, &[]))
                .await?;
            return Ok(());
        }
    };

    channel_id
        .say(&ctx.http, render(lang, Msg::NameSaved, &[(Placeholder::Name, &name)]))
        .await?;

    let terms_filter = move |message: &Message| terms_match(lang, &message.content);
    let mut terms_wait = state.collectors.messages.register_filtered(key, terms_filter);

    channel_id
        .say(
            &ctx.http,
            render(
                lang,
                Msg::TermsPrompt,
                &[
                    (Placeholder::Link, terms_link(lang)),
                    (Placeholder::Phrase, terms_phrase(lang)),
                ],
            ),
        )
        .await?;

    loop {
        match terms_wait.wait(WaitWindow::Unbounded).await {
            WaitOutcome::Received(_) => {}
            WaitOutcome::TimedOut | WaitOutcome::Superseded => return Ok(()),
        }

        match intake.agree_terms(&mut session).await {
            Ok(()) => {
                let role = format!("<@&{}>", state.config.hiring_manager_role_id);
                channel_id
                    .say(
                        &ctx.http,
                        render(lang, Msg::TermsAccepted, &[(Placeholder::Role, &role)]),
                    )
                    .await?;
                return Ok(());
            }
            Err(err) => {
                tracing::error!("Failed to store terms agreement of user {}: {}", applicant, err);
                terms_wait = state.collectors.messages.register_filtered(key, terms_filter);
                channel_id
                    .say(&ctx.http, render(lang, Msg::TermsUpdateFailed, &[]))
                    .await?;
            }
        }
    }
}

/// Answers a Riot ID submission that arrived after its window closed.
pub async fn handle_expired_identity(
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let lang = IdentityModalToken::decode(&modal.data.custom_id)
        .map(|token| token.0.language)
        .unwrap_or(Language::En);

    tracing::info!("Ignoring late Riot ID submission from user {}", modal.user.id);
    modal
        .create_response(
            &ctx.http,
            reply::ephemeral(render(lang, Msg::IdentityExpired, &[])),
        )
        .await?;

    Ok(())
}

/// Welcome message posted in a new application channel.
pub fn welcome_message(applicant_id: u64, choice: IntakeChoice) -> CreateMessage {
    let lang = choice.language;
    let mention = format!("<@{}>", applicant_id);
    let game = choice.game.display_name().to_uppercase();

    CreateMessage::new()
        .content(&mention)
        .allowed_mentions(CreateAllowedMentions::new().users(vec![UserId::new(applicant_id)]))
        .embed(
            CreateEmbed::new()
                .title(render(lang, Msg::WelcomeTitle, &[(Placeholder::Game, &game)]))
                .description(render(lang, Msg::WelcomeBody, &[(Placeholder::User, &mention)]))
                .colour(PANEL_COLOUR),
        )
        .components(vec![CreateActionRow::Buttons(vec![CreateButton::new(
            IntakeToken::Start {
                choice,
                applicant: applicant_id,
            }
            .encode(),
        )
        .label(render(lang, Msg::StartButton, &[]))
        .style(ButtonStyle::Primary)])])
}

/// Creates application channels through the Discord API.
pub struct ApplicationChannels {
    http: Arc<Http>,
    config: Arc<Config>,
}

impl ApplicationChannels {
    pub fn new(http: Arc<Http>, config: Arc<Config>) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl ChannelProvisioner for ApplicationChannels {
    async fn create_application_channel(
        &self,
        applicant_id: u64,
        username: &str,
        choice: IntakeChoice,
    ) -> Result<u64, AppError> {
        let overwrites = private_overwrites(
            self.config.discord_guild_id,
            &[applicant_id],
            &[self.config.hiring_manager_role_id],
        );
        let channel_id: ChannelId = create_private_channel(
            &self.http,
            self.config.discord_guild_id,
            self.config.application_category_id,
            &channel_name(&[username, "application"]),
            overwrites,
        )
        .await?;

        if let Err(e) = channel_id
            .send_message(&self.http, welcome_message(applicant_id, choice))
            .await
        {
            discard_channel(&self.http, channel_id).await;
            return Err(e.into());
        }

        Ok(channel_id.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the game picker buttons.
    ///
    /// Expected: three buttons carrying the language, Teamfight Tactics disabled
    #[test]
    fn shows_closed_games_disabled() {
        let choices = game_choices(Language::Pt);

        assert_eq!(choices.len(), 3);
        assert_eq!(choices[0].custom_id, "application:game:pt:lol");
        assert!(choices[0].enabled);
        assert!(choices[1].enabled);
        assert_eq!(choices[2].label, "Teamfight Tactics");
        assert!(!choices[2].enabled);
    }

    /// Tests that region buttons carry the earlier choices and localized labels.
    ///
    /// Expected: tokens decode back to the language, game and region
    #[test]
    fn region_buttons_carry_choices() {
        let choices = region_choices(Language::Pt, Game::Valorant);

        assert_eq!(choices[2].label, "Brasil (BR)");
        assert_eq!(
            IntakeToken::decode(&choices[2].custom_id),
            Ok(IntakeToken::Region(IntakeChoice {
                language: Language::Pt,
                game: Game::Valorant,
                region: Region::Br,
            }))
        );
    }

    /// Tests the language picker.
    ///
    /// Expected: English and Portuguese tokens
    #[test]
    fn offers_both_languages() {
        let ids: Vec<String> = language_choices().into_iter().map(|c| c.custom_id).collect();

        assert_eq!(ids, vec!["application:lang:en", "application:lang:pt"]);
    }
}
