//! Booster profile card and the HR approve/reject buttons on it.

use serenity::all::{
    ButtonStyle, Colour, ComponentInteraction, Context, CreateActionRow, CreateButton, CreateEmbed,
    CreateEmbedFooter, CreateMessage, EditInteractionResponse, Member, RoleId, Timestamp, User,
    UserId,
};

use crate::{
    bot::{component::review::send_dm, reply},
    error::AppError,
    model::profile::BoosterProfile,
    service::application::profile::{ProfileDecision, ProfileService},
    state::AppState,
};

const BUTTON_NAMESPACE: &str = "profile";
const PROFILE_COLOUR: u32 = 0xF1B754;

fn action(decision: ProfileDecision) -> &'static str {
    match decision {
        ProfileDecision::Approve => "approve",
        ProfileDecision::Reject => "reject",
    }
}

/// `profile:<approve|reject>:<user id>`
pub fn button_id(decision: ProfileDecision, target: u64) -> String {
    format!("{BUTTON_NAMESPACE}:{}:{}", action(decision), target)
}

pub fn parse_button(custom_id: &str) -> Option<(ProfileDecision, u64)> {
    match custom_id.split(':').collect::<Vec<_>>().as_slice() {
        [BUTTON_NAMESPACE, "approve", target] => {
            Some((ProfileDecision::Approve, target.parse().ok()?))
        }
        [BUTTON_NAMESPACE, "reject", target] => {
            Some((ProfileDecision::Reject, target.parse().ok()?))
        }
        _ => None,
    }
}

/// Whether the member holds the hiring manager role.
pub fn is_hiring_manager(member: Option<&Member>, hiring_manager_role_id: u64) -> bool {
    member.is_some_and(|member| member.roles.contains(&RoleId::new(hiring_manager_role_id)))
}

pub fn profile_embed(user: &User, profile: &BoosterProfile) -> CreateEmbed {
    let or_not_set = |value: &Option<String>| value.clone().unwrap_or_else(|| "Not set".to_string());
    let applied_at = profile
        .created_at
        .map(|at| format!("<t:{}:R>", at.timestamp()))
        .unwrap_or_else(|| "Unknown".to_string());

    CreateEmbed::new()
        .title(format!("Booster Profile - {}", user.name))
        .colour(PROFILE_COLOUR)
        .field("🎮 Game", or_not_set(&profile.game), true)
        .field("🌍 Region", or_not_set(&profile.region), true)
        .field("🏆 Rank", or_not_set(&profile.rank), true)
        .field(
            "👤 Full Name",
            profile
                .custom_name
                .clone()
                .unwrap_or_else(|| "Not provided".to_string()),
            true,
        )
        .field("📋 Status", profile.status_label(), true)
        .field("📅 Applied At", applied_at, true)
        .footer(CreateEmbedFooter::new(format!("ID: {}", user.id)))
        .timestamp(Timestamp::now())
}

pub fn profile_buttons(target: u64) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(button_id(ProfileDecision::Approve, target))
            .label("Approve")
            .style(ButtonStyle::Success),
        CreateButton::new(button_id(ProfileDecision::Reject, target))
            .label("Reject")
            .style(ButtonStyle::Danger),
    ])
}

fn decision_dm(decision: ProfileDecision, profile: &BoosterProfile) -> CreateMessage {
    let (title, description, colour) = match decision {
        ProfileDecision::Approve => (
            "🎉 Application Approved!",
            "Congratulations! Your application to become a booster has been approved. Welcome to the team! 🎊",
            Colour::DARK_GREEN,
        ),
        ProfileDecision::Reject => (
            "❌ Application Rejected",
            "We regret to inform you that your application has not been approved at this time. Thank you for your interest.",
            Colour::RED,
        ),
    };
    let or_not_set = |value: &Option<String>| value.clone().unwrap_or_else(|| "Not set".to_string());

    CreateMessage::new().embed(
        CreateEmbed::new()
            .title(title)
            .description(description)
            .colour(colour)
            .field("Game", or_not_set(&profile.game), true)
            .field("Region", or_not_set(&profile.region), true)
            .field("Rank", or_not_set(&profile.rank), true)
            .footer(CreateEmbedFooter::new("EvoBoost Application System"))
            .timestamp(Timestamp::now()),
    )
}

fn decision_embed(decision: ProfileDecision, username: &str) -> CreateEmbed {
    let (title, colour) = match decision {
        ProfileDecision::Approve => ("Application Approved", Colour::DARK_GREEN),
        ProfileDecision::Reject => ("Application Rejected", Colour::RED),
    };

    CreateEmbed::new()
        .title(title)
        .description(format!(
            "Successfully {}d application for {}",
            action(decision),
            username
        ))
        .colour(colour)
        .timestamp(Timestamp::now())
}

/// Applies an approve/reject press on a profile card.
///
/// Only hiring managers may decide. The target is told by DM and the card is
/// replaced by the outcome without buttons.
pub async fn handle_decision(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
    decision: ProfileDecision,
    target: u64,
) -> Result<(), AppError> {
    if !is_hiring_manager(
        component.member.as_ref(),
        state.config.hiring_manager_role_id,
    ) {
        component
            .create_response(&ctx.http, reply::ephemeral("You cannot use these buttons."))
            .await?;
        return Ok(());
    }

    component.defer(&ctx.http).await?;

    let profile = match ProfileService::new(state.booster_api.as_ref())
        .decide(target, decision)
        .await
    {
        Ok(profile) => profile,
        Err(err) => {
            component
                .create_followup(&ctx.http, reply::ephemeral_followup(err.user_message()))
                .await?;
            return Ok(());
        }
    };

    tracing::info!(
        "User {} marked booster profile {} {}",
        component.user.id,
        target,
        decision.status()
    );

    send_dm(&ctx.http, target, decision_dm(decision, &profile)).await;

    let username = match UserId::new(target).to_user(ctx).await {
        Ok(user) => user.name,
        Err(_) => format!("<@{}>", target),
    };

    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new()
                .embed(decision_embed(decision, &username))
                .components(vec![]),
        )
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use test_utils::serenity::create_test_user;

    use super::*;

    #[test]
    fn parses_decision_buttons() {
        assert_eq!(
            parse_button("profile:approve:42"),
            Some((ProfileDecision::Approve, 42))
        );
        assert_eq!(
            parse_button(&button_id(ProfileDecision::Reject, 7)),
            Some((ProfileDecision::Reject, 7))
        );
        assert_eq!(parse_button("profile:approve:someone"), None);
        assert_eq!(parse_button("profile:promote:42"), None);
        assert_eq!(parse_button("application:default"), None);
    }

    /// Tests the profile card of a partially filled profile.
    ///
    /// Expected: defaults for missing fields, relative timestamp, user id footer
    #[test]
    fn renders_profile_card() {
        let user = create_test_user(42, "ana");
        let profile = BoosterProfile {
            game: Some("valorant".to_string()),
            rank: Some("immortal".to_string()),
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
            ..BoosterProfile::default()
        };

        let embed = serde_json::to_value(profile_embed(&user, &profile)).unwrap();

        assert_eq!(embed["title"], "Booster Profile - ana");
        assert_eq!(embed["footer"]["text"], "ID: 42");
        let fields = embed["fields"].as_array().unwrap();
        let value = |name: &str| {
            fields
                .iter()
                .find(|field| field["name"] == name)
                .map(|field| field["value"].as_str().unwrap().to_string())
                .unwrap()
        };
        assert_eq!(value("🎮 Game"), "valorant");
        assert_eq!(value("🌍 Region"), "Not set");
        assert_eq!(value("👤 Full Name"), "Not provided");
        assert_eq!(value("📋 Status"), "Pending");
        assert_eq!(value("📅 Applied At"), "<t:1714564800:R>");
    }

    #[test]
    fn requires_hiring_manager_member() {
        assert!(!is_hiring_manager(None, 5));
    }
}
