mod bot;
mod config;
mod data;
mod error;
mod model;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use crate::{
    config::Config,
    error::AppError,
    service::application::{api::BoosterApiClient, oracle::HttpRankOracle},
    state::AppState,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    if let Err(e) = run().await {
        tracing::error!("Bot stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;

    let booster_api = BoosterApiClient::new(
        http_client.clone(),
        config.api_url.clone(),
        config.api_token.clone(),
    );
    let rank_oracle = HttpRankOracle::new(http_client, &config);

    if !config.tickets_enabled {
        tracing::info!("Ticket submissions are disabled");
    }

    let state = AppState::new(db, config, Arc::new(booster_api), Arc::new(rank_oracle));

    bot::start::start_bot(state).await
}
