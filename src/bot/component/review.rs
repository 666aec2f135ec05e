//! Messages and channels of the staff application review.

use std::sync::Arc;

use serenity::all::{
    ButtonStyle, ComponentInteraction, Context, CreateActionRow, CreateAllowedMentions,
    CreateButton, CreateEmbed, CreateEmbedFooter, CreateMessage, Http, RoleId, Timestamp, UserId,
};
use serenity::async_trait;

use crate::{
    bot::{
        channel::{channel_name, create_private_channel, discard_channel, private_overwrites},
        reply,
    },
    config::Config,
    error::AppError,
    model::{
        application::{Application, AppliedRole, CreateApplicationParams},
        intake::Game,
    },
    service::application::review::ReviewChannelProvisioner,
    state::AppState,
};

const BUTTON_PREFIX: &str = "application_review:";
pub const PROCEED_BUTTON_ID: &str = "application_review:proceed";
pub const CANCEL_BUTTON_ID: &str = "application_review:cancel";

const FOOTER: &str = "EVO Boost Team";
const BOOSTER_MANUAL_URL: &str = "https://docs.google.com/document/d/1txKGTxpGaiHuXX-RUxWcsyndJy5KffvPuV4zFauegGM/edit?tab=t.0#heading=h.9do2jh6rbsrm";

pub fn is_review_button(custom_id: &str) -> bool {
    custom_id.starts_with(BUTTON_PREFIX)
}

/// `league_of_legends` as `LEAGUE OF LEGENDS`.
pub fn game_label(game: Game) -> String {
    game.api_name().replace('_', " ").to_uppercase()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Confirmation embed shown to the staff member before an application is stored.
pub fn review_embed(params: &CreateApplicationParams) -> CreateEmbed {
    CreateEmbed::new()
        .title("Application Review")
        .description("Please review the application details before proceeding.")
        .colour(0x0099FF)
        .field("Role", params.applied_role.as_str().to_uppercase(), true)
        .field("Display Name", &params.display_name, true)
        .field("Discord", &params.discord, true)
        .field("Email", &params.email, true)
        .field("Region", params.region.code().to_uppercase(), true)
        .field(
            "Availability",
            format!("{} hours/week", params.availability.as_str()),
            true,
        )
        .field("Game", game_label(params.game), true)
        .field("Peak Rank", &params.peak_rank, true)
}

pub fn review_buttons() -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(PROCEED_BUTTON_ID)
            .label("Proceed")
            .style(ButtonStyle::Success),
        CreateButton::new(CANCEL_BUTTON_ID)
            .label("Cancel")
            .style(ButtonStyle::Danger),
    ])
}

/// Answers a review button press that no confirmation wait claimed.
pub async fn handle_stale_button(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let text = if state.collectors.components.is_waiting(&component.message.id.get()) {
        "This button is not for you."
    } else {
        "This confirmation is no longer active."
    };

    component
        .create_response(&ctx.http, reply::ephemeral(text))
        .await?;

    Ok(())
}

/// The three summary sections of the application channel embed.
pub fn application_sections(application: &Application) -> [(&'static str, String); 3] {
    [
        (
            "👤 Core Information",
            [
                format!("Display Name: {}", application.display_name),
                format!("Email: {}", application.email),
                format!("Discord: {}", application.discord),
                format!("Region: {}", application.region.code().to_uppercase()),
                format!(
                    "Availability: {} hours/week",
                    application.availability.as_str()
                ),
            ]
            .join("\n"),
        ),
        (
            "👮‍♀️ Legal Information",
            [
                format!("Legal Name: {}", application.legal_name),
                format!("Birth Location: {}", application.birth_location),
                format!("Address: {}, {}", application.street, application.city),
                format!("Postcode: {}", application.postcode),
                format!("Country: {}", application.country.to_uppercase()),
            ]
            .join("\n"),
        ),
        (
            "🎮 Game Experience",
            [
                format!("Game: {}", game_label(application.game)),
                format!("Peak Rank: {}", application.peak_rank),
                format!("Proof: {}", application.proof),
                format!("Experience: {}", application.experience),
            ]
            .join("\n"),
        ),
    ]
}

fn application_message(application: &Application, hiring_manager_role_id: u64) -> CreateMessage {
    let embed = application_sections(application).into_iter().fold(
        CreateEmbed::new()
            .title("📝 New Application")
            .description(format!("Application from <@{}>", application.discord_id))
            .colour(0x0099FF)
            .footer(CreateEmbedFooter::new(format!(
                "Application ID: {}",
                application.id
            )))
            .timestamp(Timestamp::now()),
        |embed, (name, value)| embed.field(name, value, false),
    );

    CreateMessage::new()
        .content(format!(
            "<@{}> <@&{}>",
            application.discord_id, hiring_manager_role_id
        ))
        .allowed_mentions(
            CreateAllowedMentions::new()
                .users(vec![UserId::new(application.discord_id)])
                .roles(vec![RoleId::new(hiring_manager_role_id)]),
        )
        .embed(embed)
}

/// Creates application review channels through the Discord API.
pub struct ReviewChannels {
    http: Arc<Http>,
    config: Arc<Config>,
}

impl ReviewChannels {
    pub fn new(http: Arc<Http>, config: Arc<Config>) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl ReviewChannelProvisioner for ReviewChannels {
    async fn create_review_channel(&self, application: &Application) -> Result<u64, AppError> {
        let overwrites = private_overwrites(
            self.config.discord_guild_id,
            &[application.discord_id],
            &[self.config.hiring_manager_role_id],
        );
        let channel_id = create_private_channel(
            &self.http,
            self.config.discord_guild_id,
            self.config.application_category_id,
            &channel_name(&[&application.discord, "application"]),
            overwrites,
        )
        .await?;

        let message = application_message(application, self.config.hiring_manager_role_id);
        if let Err(e) = channel_id.send_message(&self.http, message).await {
            discard_channel(&self.http, channel_id).await;
            return Err(e.into());
        }

        Ok(channel_id.get())
    }
}

/// DM telling the applicant their application was received.
pub fn received_dm(username: &str, channel_id: u64) -> CreateMessage {
    CreateMessage::new().embed(
        CreateEmbed::new()
            .title("🎉 Application Received!")
            .description(format!(
                "Hello {}! Your application has been successfully processed.",
                username
            ))
            .field(
                "Next Steps",
                "Our team will review your application and contact you for an interview soon.",
                false,
            )
            .field(
                "Application Channel",
                format!("You can track your application status in <#{}>", channel_id),
                false,
            )
            .colour(0x00FF00)
            .footer(CreateEmbedFooter::new(FOOTER))
            .timestamp(Timestamp::now()),
    )
}

/// DM welcoming an approved applicant to the team.
///
/// Boosters also get a link to the booster manual.
pub fn approved_dm(application: &Application) -> CreateMessage {
    let is_booster = application.applied_role == AppliedRole::Booster;
    let manual_note = if is_booster {
        "**Please read the Booster Manual carefully for important information.**"
    } else {
        ""
    };
    let description = [
        "### Congratulations! Your application has been approved! 🌟",
        "",
        "> You are now officially part of our team. We are excited to have you on board!",
        "",
        manual_note,
        "",
        "### Your Application Details:",
    ]
    .join("\n");

    let details = [
        ("Role", application.applied_role.as_str().to_uppercase()),
        ("Game", game_label(application.game)),
        ("Region", application.region.code().to_uppercase()),
        ("Peak Rank", capitalize(&application.peak_rank)),
        (
            "Availability",
            format!("{} hours/week", application.availability.as_str()),
        ),
    ];
    let embed = details.into_iter().fold(
        CreateEmbed::new()
            .title("🎉 Welcome to EVO Boost Team!")
            .description(description)
            .colour(0x00FF00)
            .footer(CreateEmbedFooter::new(FOOTER))
            .timestamp(Timestamp::now()),
        |embed, (name, value)| embed.field(name, value, true),
    );

    let message = CreateMessage::new().embed(embed);
    if is_booster {
        message.components(vec![CreateActionRow::Buttons(vec![CreateButton::new_link(
            BOOSTER_MANUAL_URL,
        )
        .label("Booster Manual")])])
    } else {
        message
    }
}

/// DM telling an applicant their application was denied.
pub fn denied_dm(reason: &str) -> CreateMessage {
    let reason = if reason.trim().is_empty() {
        "No reason provided"
    } else {
        reason
    };

    CreateMessage::new().embed(
        CreateEmbed::new()
            .title("❌ Application Denied")
            .description("Your application has been denied.")
            .field("Reason", reason, false)
            .colour(0xFF0000)
            .footer(CreateEmbedFooter::new(FOOTER))
            .timestamp(Timestamp::now()),
    )
}

/// Sends a DM, logging instead of failing when the user does not accept DMs.
///
/// # Returns
/// - `true` - The DM was delivered
/// - `false` - Discord refused the DM
pub async fn send_dm(http: &Http, user_id: u64, message: CreateMessage) -> bool {
    match UserId::new(user_id).direct_message(http, message).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("Failed to DM user {}: {}", user_id, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::application::{ApplicationStatus, Availability};
    use crate::model::intake::Region;

    fn application() -> Application {
        Application {
            id: 3,
            discord_id: 30,
            applied_role: AppliedRole::Booster,
            display_name: "Bruno".to_string(),
            email: "bruno@example.com".to_string(),
            discord: "bruno".to_string(),
            region: Region::Eu,
            availability: Availability::From20To30,
            legal_name: "Bruno Costa".to_string(),
            birth_location: "pt".to_string(),
            street: "Rua B 2".to_string(),
            city: "Lisboa".to_string(),
            postcode: "1000-001".to_string(),
            country: "pt".to_string(),
            game: Game::LeagueOfLegends,
            peak_rank: "grandmaster".to_string(),
            proof: "https://op.gg/summoners/euw/bruno".to_string(),
            experience: "Coached two amateur teams".to_string(),
            status: ApplicationStatus::Pending,
            hr_review: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Tests the summary sections of the application channel embed.
    ///
    /// Expected: upper-cased region, country and game, address joined
    #[test]
    fn summarizes_application() {
        let [core, legal, game] = application_sections(&application());

        assert_eq!(core.0, "👤 Core Information");
        assert!(core.1.contains("Region: EU"));
        assert!(core.1.ends_with("Availability: 20-30 hours/week"));
        assert!(legal.1.contains("Address: Rua B 2, Lisboa"));
        assert!(legal.1.ends_with("Country: PT"));
        assert!(game.1.starts_with("Game: LEAGUE OF LEGENDS"));
    }

    #[test]
    fn capitalizes_ranks() {
        assert_eq!(capitalize("grandmaster"), "Grandmaster");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn recognizes_review_buttons() {
        assert!(is_review_button(PROCEED_BUTTON_ID));
        assert!(is_review_button(CANCEL_BUTTON_ID));
        assert!(!is_review_button("application:default"));
    }
}
