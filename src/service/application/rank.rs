//! Minimum-rank policy for applicants.

use crate::model::intake::Game;

const VALORANT_ACCEPTED: [&str; 3] = ["immortal 2", "immortal 3", "radiant"];
const RIOT_ACCEPTED: [&str; 3] = ["master", "grandmaster", "challenger"];

/// Whether a looked-up rank meets the minimum for `game`.
///
/// The rank string is matched case-insensitively by substring, so decorations such
/// as division or league points (`"MASTER I (40 LP)"`) do not matter.
pub fn meets_requirement(game: Game, rank: &str) -> bool {
    let rank = rank.to_lowercase();
    let accepted: &[&str] = match game {
        Game::Valorant => &VALORANT_ACCEPTED,
        Game::LeagueOfLegends | Game::TeamfightTactics => &RIOT_ACCEPTED,
    };

    accepted.iter().any(|tier| rank.contains(tier))
}
