//! Choices made during the application intake conversation.
//!
//! Each enum is a closed set with a stable short code used in component custom IDs
//! and a long name used by the backend API.

use std::fmt;

use crate::error::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Pt,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Pt => "pt",
        }
    }

    /// Accepts both the short codes and the long names the original panels used.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "en" | "english" => Some(Self::En),
            "pt" | "portuguese" => Some(Self::Pt),
            _ => None,
        }
    }

    /// Name sent to the backend as `applicationLanguage`.
    pub fn api_name(self) -> &'static str {
        match self {
            Self::En => "english",
            Self::Pt => "portuguese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    LeagueOfLegends,
    Valorant,
    TeamfightTactics,
}

impl Game {
    pub const ALL: [Game; 3] = [Game::LeagueOfLegends, Game::Valorant, Game::TeamfightTactics];

    pub fn code(self) -> &'static str {
        match self {
            Self::LeagueOfLegends => "lol",
            Self::Valorant => "val",
            Self::TeamfightTactics => "tft",
        }
    }

    pub fn parse_code(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|game| game.code() == value)
    }

    /// Identifier used by the backend and the `application` table.
    pub fn api_name(self) -> &'static str {
        match self {
            Self::LeagueOfLegends => "league_of_legends",
            Self::Valorant => "valorant",
            Self::TeamfightTactics => "teamfight_tactics",
        }
    }

    pub fn parse_api_name(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|game| game.api_name() == value)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::LeagueOfLegends => "League of Legends",
            Self::Valorant => "Valorant",
            Self::TeamfightTactics => "Teamfight Tactics",
        }
    }

    /// Whether applicants may currently pick this game.
    ///
    /// Teamfight Tactics is shown in the game picker but cannot be selected.
    pub fn is_open_for_applications(self) -> bool {
        !matches!(self, Self::TeamfightTactics)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Na,
    Eu,
    Br,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Na, Region::Eu, Region::Br];

    pub fn code(self) -> &'static str {
        match self {
            Self::Na => "na",
            Self::Eu => "eu",
            Self::Br => "br",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|region| region.code() == value)
    }

    /// Region value sent to the backend for the given game.
    ///
    /// League of Legends uses Riot platform routing values, other games keep the
    /// short code.
    pub fn api_value(self, game: Game) -> &'static str {
        match (game, self) {
            (Game::LeagueOfLegends, Self::Na) => "na1",
            (Game::LeagueOfLegends, Self::Eu) => "euw1",
            (Game::LeagueOfLegends, Self::Br) => "br1",
            (_, region) => region.code(),
        }
    }
}

/// A Riot account identifier in `name#tag` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiotId {
    pub name: String,
    pub tag: String,
}

impl RiotId {
    /// Parses `name#tag`, trimming surrounding whitespace.
    ///
    /// # Returns
    /// - `Ok(RiotId)` - Both parts present and non-empty
    /// - `Err(ValidationError::InvalidRiotId)` - Missing `#`, empty name or tag, or
    ///   more than one `#`
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let invalid = || ValidationError::InvalidRiotId(trimmed.to_string());

        let (name, tag) = trimmed.split_once('#').ok_or_else(invalid)?;
        let (name, tag) = (name.trim(), tag.trim());
        if name.is_empty() || tag.is_empty() || tag.contains('#') {
            return Err(invalid());
        }

        Ok(Self {
            name: name.to_string(),
            tag: tag.to_string(),
        })
    }
}

impl fmt::Display for RiotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.tag)
    }
}
