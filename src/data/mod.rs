//! Database repository layer.
//!
//! Repositories borrow the SeaORM connection, perform the queries for one table and
//! convert entity models into domain models before returning them.

pub mod application;
pub mod ticket;

#[cfg(test)]
mod test;
