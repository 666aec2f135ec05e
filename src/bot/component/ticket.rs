//! Ticket panel, ticket modals and the *Close Ticket* button.

use std::sync::Arc;

use serenity::all::{
    ButtonStyle, ComponentInteraction, ComponentInteractionDataKind, Context, CreateActionRow,
    CreateAllowedMentions, CreateButton, CreateEmbed, CreateInputText, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, CreateModal, CreateSelectMenu,
    CreateSelectMenuKind, CreateSelectMenuOption, EditInteractionResponse, Http, InputTextStyle, ModalInteraction,
    PermissionOverwrite, PermissionOverwriteType, Permissions, Timestamp, UserId,
};
use serenity::async_trait;

use crate::{
    bot::{
        channel::{channel_name, create_private_channel, discard_channel, private_overwrites},
        component::modal_inputs,
        reply,
    },
    config::Config,
    error::{validation::ValidationError, AppError},
    model::ticket::{Ticket, TicketKind, TicketSubmission},
    service::ticket::{already_open_message, TicketChannelProvisioner, TicketService},
    state::AppState,
};

pub const SELECT_MENU_ID: &str = "dropdown_ticket";
pub const CLOSE_BUTTON_ID: &str = "close_ticket";

const PANEL_COLOUR: u32 = 0xF1B754;
const TICKET_COLOUR: u32 = 0x2F3136;
const DISABLED_MESSAGE: &str = "Ticket feature is not available at the moment.";

const ORDER_ID_INPUT: &str = "ticket_order_id";
const USERNAME_INPUT: &str = "ticket_username";
const SUBJECT_INPUT: &str = "ticket_subject";
const DESCRIPTION_INPUT: &str = "ticket_description";

/// The ticket panel posted by `/setup`.
pub fn panel() -> CreateMessage {
    let options = vec![
        CreateSelectMenuOption::new("I need help with an order", "ticket_order")
            .description("Select this option if you have issue with your order")
            .emoji('💸'),
        CreateSelectMenuOption::new("I have a doubt/problem", "ticket_doubt")
            .description("Select this option if you have any questions or issues")
            .emoji('❓'),
        CreateSelectMenuOption::new("I want to report something", "ticket_report")
            .description("Select this option to report an issue or concern")
            .emoji('🚨'),
    ];

    CreateMessage::new()
        .embed(
            CreateEmbed::new()
                .title("Yo, need help?")
                .description(
                    "No worries, Just pick a category, open a ticket.\nGive us all the necessary details about it and let our support team sort things out for you.",
                )
                .colour(PANEL_COLOUR),
        )
        .components(vec![CreateActionRow::SelectMenu(
            CreateSelectMenu::new(SELECT_MENU_ID, CreateSelectMenuKind::String { options })
                .placeholder("Select an option"),
        )])
}

/// The modal a ticket is opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketModal {
    Order,
    Doubt,
    ReportUser,
    ReportOther,
}

impl TicketModal {
    const ALL: [TicketModal; 4] = [
        TicketModal::Order,
        TicketModal::Doubt,
        TicketModal::ReportUser,
        TicketModal::ReportOther,
    ];

    pub fn custom_id(self) -> &'static str {
        match self {
            Self::Order => "modal_ticket_order",
            Self::Doubt => "modal_ticket_doubt",
            Self::ReportUser => "modal_ticket_report:user",
            Self::ReportOther => "modal_ticket_report:something",
        }
    }

    pub fn parse(custom_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|modal| modal.custom_id() == custom_id)
    }

    /// Custom ID of the button that opens a report modal.
    fn report_button_id(self) -> Option<&'static str> {
        match self {
            Self::ReportUser => Some("ticket_button:report_user"),
            Self::ReportOther => Some("ticket_button:report_other"),
            Self::Order | Self::Doubt => None,
        }
    }

    pub fn from_report_button(custom_id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|modal| modal.report_button_id() == Some(custom_id))
    }

    pub fn kind(self) -> TicketKind {
        match self {
            Self::Order => TicketKind::Order,
            Self::Doubt => TicketKind::Doubt,
            Self::ReportUser | Self::ReportOther => TicketKind::Report,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Order => "Order Ticket",
            Self::Doubt => "Doubt Ticket",
            Self::ReportUser | Self::ReportOther => "Report Ticket",
        }
    }

    fn build(self) -> CreateModal {
        let input = |style: InputTextStyle, label: &str, custom_id: &str, placeholder: &str| {
            CreateActionRow::InputText(
                CreateInputText::new(style, label, custom_id)
                    .placeholder(placeholder)
                    .required(true),
            )
        };

        let mut rows = Vec::new();
        match self {
            Self::Order => rows.push(input(
                InputTextStyle::Short,
                "Order Id",
                ORDER_ID_INPUT,
                "Enter your order id here",
            )),
            Self::ReportUser => rows.push(input(
                InputTextStyle::Short,
                "Username",
                USERNAME_INPUT,
                "Enter username here",
            )),
            Self::Doubt | Self::ReportOther => {}
        }
        rows.push(input(
            InputTextStyle::Short,
            "Subject",
            SUBJECT_INPUT,
            "Enter a short subject here",
        ));
        rows.push(input(
            InputTextStyle::Paragraph,
            "Description",
            DESCRIPTION_INPUT,
            "Provide as much detail as you can",
        ));

        CreateModal::new(self.custom_id(), self.title()).components(rows)
    }

    /// Reads the submitted inputs into a ticket submission.
    ///
    /// # Returns
    /// - `Ok(TicketSubmission)` - All inputs of this modal present and non-blank
    /// - `Err(ValidationError::MissingField)` - An input was blank or absent
    pub fn submission(self, inputs: &[(&str, &str)]) -> Result<TicketSubmission, ValidationError> {
        let value = |custom_id: &str, field: &'static str| {
            inputs
                .iter()
                .find(|(id, _)| *id == custom_id)
                .map(|(_, value)| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .ok_or(ValidationError::MissingField(field))
        };

        let order_id = match self {
            Self::Order => Some(value(ORDER_ID_INPUT, "Order Id")?),
            _ => None,
        };
        let reported_user = match self {
            Self::ReportUser => Some(value(USERNAME_INPUT, "Username")?),
            _ => None,
        };

        Ok(TicketSubmission {
            kind: self.kind(),
            subject: value(SUBJECT_INPUT, "Subject")?,
            description: value(DESCRIPTION_INPUT, "Description")?,
            order_id,
            reported_user,
        })
    }
}

fn report_buttons() -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content("Please choose one of the options below to proceed with your report.")
            .components(vec![CreateActionRow::Buttons(vec![
                CreateButton::new("ticket_button:report_user")
                    .label("Report a user")
                    .style(ButtonStyle::Danger),
                CreateButton::new("ticket_button:report_other")
                    .label("Report something else")
                    .style(ButtonStyle::Secondary),
            ])])
            .ephemeral(true),
    )
}

/// Handles a selection on the ticket panel.
pub async fn handle_select(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let ComponentInteractionDataKind::StringSelect { values } = &component.data.kind else {
        return Err(AppError::BadRequest("Unknown choice".to_string()));
    };
    let kind = values
        .first()
        .and_then(|value| TicketKind::from_menu_value(value))
        .ok_or_else(|| AppError::BadRequest("Unknown choice".to_string()))?;

    let service = TicketService::new(&state.db, &state.allocator);
    if let Some(ticket) = service.find_open(component.user.id.get(), kind).await? {
        component
            .create_response(&ctx.http, reply::ephemeral(already_open_message(&ticket)))
            .await?;
        return Ok(());
    }

    let response = match kind {
        TicketKind::Order => CreateInteractionResponse::Modal(TicketModal::Order.build()),
        TicketKind::Doubt => CreateInteractionResponse::Modal(TicketModal::Doubt.build()),
        TicketKind::Report => report_buttons(),
    };
    component.create_response(&ctx.http, response).await?;

    Ok(())
}

/// Opens a report modal from one of the report buttons.
pub async fn show_modal(
    ctx: &Context,
    component: &ComponentInteraction,
    modal: TicketModal,
) -> Result<(), AppError> {
    component
        .create_response(&ctx.http, CreateInteractionResponse::Modal(modal.build()))
        .await?;

    Ok(())
}

/// Opens a ticket from a submitted ticket modal.
pub async fn handle_submit(
    state: &AppState,
    ctx: &Context,
    modal: &ModalInteraction,
    ticket_modal: TicketModal,
) -> Result<(), AppError> {
    if !state.config.tickets_enabled {
        modal
            .create_response(&ctx.http, reply::ephemeral(DISABLED_MESSAGE))
            .await?;
        return Ok(());
    }

    let submission = ticket_modal.submission(&modal_inputs(modal))?;

    modal.defer_ephemeral(&ctx.http).await?;

    let provisioner = TicketChannels::new(ctx.http.clone(), state.config.clone());
    let result = TicketService::new(&state.db, &state.allocator)
        .open(
            modal.user.id.get(),
            &modal.user.name,
            submission,
            &provisioner,
        )
        .await;

    let content = match result {
        Ok(ticket) => match ticket.channel_id {
            Some(channel_id) => format!("Your ticket has been created in <#{}>!", channel_id),
            None => format!("Your ticket {} has been created!", ticket.ticket_id),
        },
        Err(err) => err.user_message(),
    };
    modal
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await?;

    Ok(())
}

/// Text of the summary embed posted in a ticket channel.
pub fn ticket_description(ticket: &Ticket) -> String {
    let mut description = String::new();

    if let Some(order_id) = &ticket.order_id {
        description.push_str(&format!("**Order ID**: `{}`\n", order_id));
    }
    if let Some(reported_user) = &ticket.reported_user {
        description.push_str(&format!("**Reported User**: {}\n", reported_user));
    }
    description.push_str(&format!(
        "**Subject**: {}\n**Description**: {}\n\n**Status**: Open\n**User**: <@{}>\n",
        ticket.subject, ticket.description, ticket.user_id
    ));

    description
}

fn ticket_message(ticket: &Ticket) -> CreateMessage {
    CreateMessage::new()
        .content(format!("<@{}>", ticket.user_id))
        .allowed_mentions(CreateAllowedMentions::new().users(vec![UserId::new(ticket.user_id)]))
        .embed(
            CreateEmbed::new()
                .title(format!(
                    "Ticket #{} - {}",
                    ticket.ticket_id,
                    ticket.kind.heading()
                ))
                .description(ticket_description(ticket))
                .colour(TICKET_COLOUR)
                .timestamp(Timestamp::now()),
        )
        .components(vec![CreateActionRow::Buttons(vec![CreateButton::new(
            CLOSE_BUTTON_ID,
        )
        .label("Close Ticket")
        .style(ButtonStyle::Danger)])])
}

/// Creates ticket channels through the Discord API.
pub struct TicketChannels {
    http: Arc<Http>,
    config: Arc<Config>,
}

impl TicketChannels {
    pub fn new(http: Arc<Http>, config: Arc<Config>) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl TicketChannelProvisioner for TicketChannels {
    async fn create_ticket_channel(
        &self,
        ticket: &Ticket,
        username: &str,
    ) -> Result<u64, AppError> {
        let roles: Vec<u64> = self.config.support_role_id.into_iter().collect();
        let overwrites = private_overwrites(self.config.discord_guild_id, &[ticket.user_id], &roles);

        let channel_id = create_private_channel(
            &self.http,
            self.config.discord_guild_id,
            self.config.ticket_category_id,
            &channel_name(&[ticket.kind.as_str(), username]),
            overwrites,
        )
        .await?;

        if let Err(e) = channel_id
            .send_message(&self.http, ticket_message(ticket))
            .await
        {
            discard_channel(&self.http, channel_id).await;
            return Err(e.into());
        }

        Ok(channel_id.get())
    }
}

/// Closes the ticket of the channel the button was pressed in.
///
/// The opener loses access to the channel; staff keep it for reference.
pub async fn handle_close(
    state: &AppState,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let ticket = TicketService::new(&state.db, &state.allocator)
        .close(component.channel_id.get())
        .await?;

    component
        .create_response(&ctx.http, reply::ephemeral("Ticket closed."))
        .await?;

    let revoke = PermissionOverwrite {
        allow: Permissions::empty(),
        deny: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
        kind: PermissionOverwriteType::Member(UserId::new(ticket.user_id)),
    };
    if let Err(e) = component.channel_id.create_permission(&ctx.http, revoke).await {
        tracing::error!(
            "Failed to revoke access of user {} to ticket {}: {}",
            ticket.user_id,
            ticket.ticket_id,
            e
        );
    }

    component
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(
                CreateEmbed::new()
                    .title(format!("Ticket #{} closed", ticket.ticket_id))
                    .description(format!("Closed by <@{}>.", component.user.id))
                    .colour(TICKET_COLOUR)
                    .timestamp(Timestamp::now()),
            ),
        )
        .await?;

    Ok(())
}
