//! Competitive rank lookups.
//!
//! League of Legends and Teamfight Tactics ranks come from the Riot API: the Riot
//! ID is resolved to a PUUID, the player's platform is found by probing each
//! platform for a summoner, then the ranked entry for the game's solo queue is
//! read. Valorant ranks come from the tracker.gg profile API.

use serde::Deserialize;
use serenity::async_trait;

use crate::config::Config;
use crate::error::flow::RankLookupError;
use crate::model::intake::{Game, RiotId};

/// Platforms probed for a summoner, in order.
const RIOT_PLATFORMS: [&str; 11] = [
    "na1", "euw1", "eun1", "kr", "jp1", "br1", "ru", "tr1", "oc1", "la1", "la2",
];

/// Source of an applicant's current rank.
#[async_trait]
pub trait RankOracle: Send + Sync {
    /// Looks up the rank of `riot_id` in `game` as a display string.
    async fn lookup(&self, game: Game, riot_id: &RiotId) -> Result<String, RankLookupError>;
}

#[derive(Deserialize)]
struct RiotAccount {
    puuid: String,
}

#[derive(Deserialize)]
struct Summoner {
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeagueEntry {
    queue_type: String,
    tier: String,
    rank: String,
    league_points: i32,
}

impl LeagueEntry {
    fn display(&self) -> String {
        format!("{} {} ({} LP)", self.tier, self.rank, self.league_points)
    }
}

#[derive(Deserialize)]
struct TrackerResponse {
    data: TrackerProfile,
}

#[derive(Deserialize)]
struct TrackerProfile {
    #[serde(default)]
    segments: Vec<TrackerSegment>,
}

#[derive(Deserialize)]
struct TrackerSegment {
    #[serde(rename = "type")]
    kind: String,
    stats: TrackerStats,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackerStats {
    #[serde(default)]
    peak_rank: Option<TrackerStat>,
    #[serde(default)]
    rank: Option<TrackerStat>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackerStat {
    metadata: TrackerStatMetadata,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackerStatMetadata {
    tier_name: Option<String>,
}

/// Rank oracle backed by the Riot and tracker.gg HTTP APIs.
pub struct HttpRankOracle {
    http_client: reqwest::Client,
    riot_api_key: Option<String>,
    riot_account_url: String,
    tracker_api_key: Option<String>,
    tracker_url: String,
}

impl HttpRankOracle {
    pub fn new(http_client: reqwest::Client, config: &Config) -> Self {
        Self {
            http_client,
            riot_api_key: config.riot_api_key.clone(),
            riot_account_url: config.riot_account_url.trim_end_matches('/').to_string(),
            tracker_api_key: config.tracker_api_key.clone(),
            tracker_url: config.tracker_url.trim_end_matches('/').to_string(),
        }
    }

    async fn riot_get<T: for<'de> Deserialize<'de>>(
        &self,
        url: String,
    ) -> Result<Option<T>, RankLookupError> {
        let key = self
            .riot_api_key
            .as_deref()
            .ok_or(RankLookupError::Unsupported("Riot games"))?;

        let response = self
            .http_client
            .get(url)
            .header("X-Riot-Token", key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(response.error_for_status()?.json::<T>().await?))
    }

    async fn riot_rank(&self, game: Game, riot_id: &RiotId) -> Result<String, RankLookupError> {
        let (summoner_path, entries_path, queue) = match game {
            Game::TeamfightTactics => (
                "tft/summoner/v1/summoners/by-puuid",
                "tft/league/v1/entries/by-summoner",
                "RANKED_TFT",
            ),
            _ => (
                "lol/summoner/v4/summoners/by-puuid",
                "lol/league/v4/entries/by-summoner",
                "RANKED_SOLO_5x5",
            ),
        };

        let account: RiotAccount = self
            .riot_get(format!(
                "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
                self.riot_account_url,
                url_segment(&riot_id.name),
                url_segment(&riot_id.tag)
            ))
            .await?
            .ok_or_else(|| RankLookupError::PlayerNotFound(riot_id.to_string()))?;

        let mut found = None;
        for platform in RIOT_PLATFORMS {
            let summoner: Option<Summoner> = self
                .riot_get(format!(
                    "https://{}.api.riotgames.com/{}/{}",
                    platform, summoner_path, account.puuid
                ))
                .await?;
            if let Some(summoner) = summoner {
                tracing::debug!("Found {} on platform {}", riot_id, platform);
                found = Some((platform, summoner));
                break;
            }
        }
        let (platform, summoner) =
            found.ok_or_else(|| RankLookupError::PlayerNotFound(riot_id.to_string()))?;

        let entries: Vec<LeagueEntry> = self
            .riot_get(format!(
                "https://{}.api.riotgames.com/{}/{}",
                platform, entries_path, summoner.id
            ))
            .await?
            .unwrap_or_default();

        entries
            .iter()
            .find(|entry| entry.queue_type == queue)
            .map(LeagueEntry::display)
            .ok_or_else(|| RankLookupError::Unranked(riot_id.to_string()))
    }

    async fn valorant_rank(&self, riot_id: &RiotId) -> Result<String, RankLookupError> {
        let key = self
            .tracker_api_key
            .as_deref()
            .ok_or(RankLookupError::Unsupported("Valorant"))?;

        let response = self
            .http_client
            .get(format!(
                "{}/valorant/standard/profile/riot/{}%23{}",
                self.tracker_url,
                url_segment(&riot_id.name),
                url_segment(&riot_id.tag)
            ))
            .header("TRN-Api-Key", key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RankLookupError::PlayerNotFound(riot_id.to_string()));
        }
        let profile: TrackerResponse = response.error_for_status()?.json().await?;

        peak_tier(&profile.data)
            .ok_or_else(|| RankLookupError::Unranked(riot_id.to_string()))
    }
}

/// Peak competitive tier from a tracker.gg profile, falling back to the current tier.
fn peak_tier(profile: &TrackerProfile) -> Option<String> {
    let segment = profile
        .segments
        .iter()
        .find(|segment| segment.kind == "season")
        .or_else(|| profile.segments.first())?;

    segment
        .stats
        .peak_rank
        .as_ref()
        .or(segment.stats.rank.as_ref())
        .and_then(|stat| stat.metadata.tier_name.clone())
}

/// Percent-encodes a single path segment.
fn url_segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[async_trait]
impl RankOracle for HttpRankOracle {
    async fn lookup(&self, game: Game, riot_id: &RiotId) -> Result<String, RankLookupError> {
        match game {
            Game::Valorant => self.valorant_rank(riot_id).await,
            Game::LeagueOfLegends | Game::TeamfightTactics => self.riot_rank(game, riot_id).await,
        }
    }
}
