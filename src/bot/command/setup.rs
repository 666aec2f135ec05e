//! `/setup` posts a module panel into a channel.

use serenity::all::{
    ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, CreateMessage, Permissions, ResolvedValue,
};

use crate::{
    bot::{
        component::{application, ticket},
        reply,
    },
    error::AppError,
};

pub const NAME: &str = "setup";

/// Panel that can be posted with `/setup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupModule {
    Ticket,
    Booster,
}

impl SetupModule {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "ticket" => Some(Self::Ticket),
            "booster" => Some(Self::Booster),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ticket => "Ticket",
            Self::Booster => "Booster",
        }
    }

    fn panel(self) -> CreateMessage {
        match self {
            Self::Ticket => ticket::panel(),
            Self::Booster => application::panel(),
        }
    }
}

pub fn definition() -> CreateCommand {
    CreateCommand::new(NAME)
        .description("Setup modules")
        .default_member_permissions(Permissions::MANAGE_GUILD)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Channel,
                "channel",
                "Channel where you want to setup the module",
            )
            .channel_types(vec![ChannelType::Text])
            .required(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "module",
                "Choose a module from the suggestions",
            )
            .add_string_choice(SetupModule::Ticket.label(), "ticket")
            .add_string_choice(SetupModule::Booster.label(), "booster")
            .required(true),
        )
}

pub async fn handle(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let mut channel_id = None;
    let mut module = None;
    for option in command.data.options() {
        match (option.name, option.value) {
            ("channel", ResolvedValue::Channel(channel)) => channel_id = Some(channel.id),
            ("module", ResolvedValue::String(value)) => module = SetupModule::parse(value),
            _ => {}
        }
    }

    let (Some(channel_id), Some(module)) = (channel_id, module) else {
        command
            .create_response(&ctx.http, reply::ephemeral("Unknown module"))
            .await?;
        return Ok(());
    };

    channel_id.send_message(&ctx.http, module.panel()).await?;
    tracing::info!(
        "User {} posted the {} panel in channel {}",
        command.user.id,
        module.label(),
        channel_id
    );

    command
        .create_response(
            &ctx.http,
            reply::ephemeral(format!(
                "Setup complete in <#{}> for `{}`.",
                channel_id,
                module.label()
            )),
        )
        .await?;

    Ok(())
}
