//! Bot state shared across all event handlers.
//!
//! Initialized once during startup and cloned into the Discord event handler. All
//! fields are cheap to clone: the database connection is a pool, the allocator and
//! collectors share their maps through `Arc`, and the external clients sit behind
//! `Arc<dyn ...>` so tests and alternative backends can be swapped in.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    bot::collector::Collectors,
    config::Config,
    service::{
        application::{api::BoosterApi, oracle::RankOracle},
        ticket_id::TicketIdAllocator,
    },
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for tickets and reviewed applications.
    pub db: DatabaseConnection,

    pub config: Arc<Config>,

    /// Ticket identifier cursors, shared by every ticket submission.
    pub allocator: TicketIdAllocator,

    /// Pending waits for modals, messages and button presses.
    pub collectors: Collectors,

    /// Booster backend API.
    pub booster_api: Arc<dyn BoosterApi>,

    /// Source of applicants' competitive ranks.
    pub rank_oracle: Arc<dyn RankOracle>,
}

impl AppState {
    /// Creates the bot state with empty allocator cursors and no pending waits.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `config` - Loaded configuration
    /// - `booster_api` - Booster backend client
    /// - `rank_oracle` - Rank lookup client
    pub fn new(
        db: DatabaseConnection,
        config: Config,
        booster_api: Arc<dyn BoosterApi>,
        rank_oracle: Arc<dyn RankOracle>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            allocator: TicketIdAllocator::new(),
            collectors: Collectors::default(),
            booster_api,
            rank_oracle,
        }
    }
}
