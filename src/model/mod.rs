//! Domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary so the
//! service and bot layers never see raw database rows. Closed sets (ticket kinds,
//! application statuses, games, regions) are enums with explicit string codes.

pub mod application;
pub mod intake;
pub mod profile;
pub mod ticket;
