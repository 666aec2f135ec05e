pub mod application;
pub mod ticket;
pub mod ticket_id;
