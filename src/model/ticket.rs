//! Ticket domain models and parameters.
//!
//! Tickets are support conversations opened from the ticket panel. Each ticket gets
//! a human-readable identifier from the allocator, a private channel, and a row in
//! the `ticket` table tracking whether it is still open.

use chrono::{DateTime, Utc};

use crate::error::{internal::InternalError, AppError};
use crate::util::parse::parse_u64_from_string;

/// Category of a ticket, selected from the ticket panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketKind {
    Order,
    Doubt,
    Report,
}

impl TicketKind {
    /// Single-letter code used as the ticket identifier prefix.
    pub fn prefix(self) -> TicketPrefix {
        match self {
            Self::Order => TicketPrefix::Order,
            Self::Doubt => TicketPrefix::Support,
            Self::Report => TicketPrefix::Report,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Doubt => "doubt",
            Self::Report => "report",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "order" => Some(Self::Order),
            "doubt" => Some(Self::Doubt),
            "report" => Some(Self::Report),
            _ => None,
        }
    }

    /// Maps the ticket panel select-menu value to a kind.
    pub fn from_menu_value(value: &str) -> Option<Self> {
        match value {
            "ticket_order" => Some(Self::Order),
            "ticket_doubt" => Some(Self::Doubt),
            "ticket_report" => Some(Self::Report),
            _ => None,
        }
    }

    /// Heading shown in the ticket embed title.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Order => "Help with an Order",
            Self::Doubt => "Doubt / Problem",
            Self::Report => "Report",
        }
    }
}

/// Closed set of ticket identifier prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TicketPrefix {
    /// `O` - order tickets
    Order,
    /// `S` - support / doubt tickets
    Support,
    /// `R` - report tickets
    Report,
}

impl TicketPrefix {
    pub fn as_char(self) -> char {
        match self {
            Self::Order => 'O',
            Self::Support => 'S',
            Self::Report => 'R',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    Closed,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Ticket with full data from the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: i32,
    pub ticket_id: String,
    /// Discord channel ID of the ticket channel, `None` until provisioned.
    pub channel_id: Option<u64>,
    pub user_id: u64,
    pub kind: TicketKind,
    pub subject: String,
    pub description: String,
    pub order_id: Option<String>,
    pub reported_user: Option<String>,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Converts an entity model to a ticket domain model.
    ///
    /// This conversion happens at the data layer boundary to ensure entity models
    /// never leak into service or bot layers.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The converted ticket
    /// - `Err(AppError::InternalErr)` - Stored ids or enum values are corrupt
    pub fn from_entity(entity: entity::ticket::Model) -> Result<Self, AppError> {
        let kind = TicketKind::parse(&entity.kind).ok_or(InternalError::UnknownEnumValue {
            column: "ticket.kind",
            value: entity.kind.clone(),
        })?;
        let status =
            TicketStatus::parse(&entity.status).ok_or(InternalError::UnknownEnumValue {
                column: "ticket.status",
                value: entity.status.clone(),
            })?;
        let channel_id = if entity.channel_id.is_empty() {
            None
        } else {
            Some(parse_u64_from_string(entity.channel_id)?)
        };

        Ok(Self {
            id: entity.id,
            ticket_id: entity.ticket_id,
            channel_id,
            user_id: parse_u64_from_string(entity.user_id)?,
            kind,
            subject: entity.subject,
            description: entity.description,
            order_id: entity.order_id,
            reported_user: entity.reported_user,
            status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Parameters for opening a new ticket.
///
/// Collected from one of the ticket modals.
#[derive(Debug, Clone)]
pub struct CreateTicketParams {
    pub ticket_id: String,
    pub user_id: u64,
    pub kind: TicketKind,
    pub subject: String,
    pub description: String,
    pub order_id: Option<String>,
    pub reported_user: Option<String>,
}

/// Fields submitted through a ticket modal, before an identifier is allocated.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketSubmission {
    pub kind: TicketKind,
    pub subject: String,
    pub description: String,
    pub order_id: Option<String>,
    pub reported_user: Option<String>,
}

impl TicketSubmission {
    /// Attaches an allocated identifier and the opener to build insert params.
    pub fn into_params(self, ticket_id: String, user_id: u64) -> CreateTicketParams {
        CreateTicketParams {
            ticket_id,
            user_id,
            kind: self.kind,
            subject: self.subject,
            description: self.description,
            order_id: self.order_id,
            reported_user: self.reported_user,
        }
    }
}
