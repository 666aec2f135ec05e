pub use super::application::Entity as Application;
pub use super::ticket::Entity as Ticket;
