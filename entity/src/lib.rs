//! SeaORM entities for the bot's relational store.

pub mod prelude;

pub mod application;
pub mod ticket;
