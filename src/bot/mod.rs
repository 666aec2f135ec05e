//! Discord bot integration for ticketing and booster recruitment.
//!
//! The bot connects to a single guild, registers its slash and context-menu
//! commands on ready, and routes every interaction to a command or component
//! handler. Multi-step conversations suspend on [`collector`] registrations; the
//! event handler offers each incoming modal, button press and message to those
//! registrations before routing it anywhere else.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild and channel events
//! - `GUILD_MESSAGES` - Receive messages typed during the intake conversation
//! - `MESSAGE_CONTENT` - Read the text of those messages (privileged intent)
//!
//! Note: `MESSAGE_CONTENT` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod channel;
pub mod collector;
pub mod command;
pub mod component;
pub mod handler;
pub mod reply;
pub mod start;
