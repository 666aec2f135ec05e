use crate::{
    data::application::ApplicationRepository,
    error::AppError,
    model::{
        application::{
            ApplicationStatus, AppliedRole, Availability, CreateApplicationParams, HR_REVIEW_MAX,
        },
        intake::{Game, Region},
    },
};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod find_by_discord_id;
mod set_status;

fn params(discord_id: u64, email: &str, discord: &str) -> CreateApplicationParams {
    CreateApplicationParams {
        discord_id,
        applied_role: AppliedRole::Booster,
        display_name: "Ana".to_string(),
        email: email.to_string(),
        discord: discord.to_string(),
        region: Region::Br,
        availability: Availability::From20To30,
        legal_name: "Ana Silva".to_string(),
        birth_location: "br".to_string(),
        street: "Rua A 1".to_string(),
        city: "Recife".to_string(),
        postcode: "50000-000".to_string(),
        country: "br".to_string(),
        game: Game::Valorant,
        peak_rank: "radiant".to_string(),
        proof: "https://tracker.gg/valorant/profile/riot/Ana%23BR1".to_string(),
        experience: "Radiant for three acts in a row".to_string(),
    }
}
