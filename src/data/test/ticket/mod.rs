use crate::{
    data::ticket::TicketRepository,
    error::AppError,
    model::ticket::{CreateTicketParams, TicketKind, TicketStatus},
};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod close;
mod create;
mod delete;
mod find_by_channel_id;
mod find_by_ticket_id;
mod find_open_by_user_and_kind;
mod set_channel_id;

fn params(ticket_id: &str, user_id: u64, kind: TicketKind) -> CreateTicketParams {
    CreateTicketParams {
        ticket_id: ticket_id.to_string(),
        user_id,
        kind,
        subject: "Order stuck".to_string(),
        description: "My order has not started yet".to_string(),
        order_id: Some("ORD-1".to_string()),
        reported_user: None,
    }
}
