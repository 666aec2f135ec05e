//! Recruitment application domain models.
//!
//! Applications reach the bot as an embed posted by the external application form.
//! Staff run `/application procceed` on that message, which parses the embed into an
//! [`ApplicationDraft`], validates it into [`CreateApplicationParams`] and stores a
//! pending record. Reviewers later approve or reject it.

use chrono::{DateTime, Utc};
use url::Url;

use crate::error::{internal::InternalError, validation::ValidationError, AppError};
use crate::model::intake::{Game, Region};
use crate::util::parse::parse_u64_from_string;

const EXPERIENCE_MIN: usize = 10;
const EXPERIENCE_MAX: usize = 1000;
pub const HR_REVIEW_MAX: usize = 2000;

/// Two-letter codes accepted for birth location and country.
const COUNTRY_CODES: &[&str] = &[
    "af", "al", "dz", "ar", "au", "at", "be", "br", "ca", "cl", "cn", "co", "dk", "eg", "fi", "fr",
    "de", "gr", "hk", "in", "id", "ie", "il", "it", "jp", "kr", "my", "mx", "nl", "nz", "no", "pk",
    "pe", "ph", "pl", "pt", "ru", "sa", "sg", "za", "es", "se", "ch", "tw", "th", "tr", "ae", "uk",
    "us", "vn",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether a record in this status may move to `next`.
    ///
    /// Only pending applications can be decided, and only once.
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedRole {
    Coach,
    Booster,
}

impl AppliedRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coach => "coach",
            Self::Booster => "booster",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "coach" => Some(Self::Coach),
            "booster" => Some(Self::Booster),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    From10To20,
    From20To30,
    From30To40,
    Over40,
}

impl Availability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::From10To20 => "10-20",
            Self::From20To30 => "20-30",
            Self::From30To40 => "30-40",
            Self::Over40 => "40+",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "10-20" => Some(Self::From10To20),
            "20-30" => Some(Self::From20To30),
            "30-40" => Some(Self::From30To40),
            "40+" => Some(Self::Over40),
            _ => None,
        }
    }
}

/// Application with full data from the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub id: i32,
    pub discord_id: u64,
    pub applied_role: AppliedRole,
    pub display_name: String,
    pub email: String,
    pub discord: String,
    pub region: Region,
    pub availability: Availability,
    pub legal_name: String,
    pub birth_location: String,
    pub street: String,
    pub city: String,
    pub postcode: String,
    pub country: String,
    pub game: Game,
    pub peak_rank: String,
    pub proof: String,
    pub experience: String,
    pub status: ApplicationStatus,
    pub hr_review: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn unknown(column: &'static str, value: &str) -> InternalError {
    InternalError::UnknownEnumValue {
        column,
        value: value.to_string(),
    }
}

impl Application {
    /// Converts an entity model to an application domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(Application)` - The converted application
    /// - `Err(AppError::InternalErr)` - A stored id or enum column holds an unexpected value
    pub fn from_entity(entity: entity::application::Model) -> Result<Self, AppError> {
        let applied_role = AppliedRole::parse(&entity.applied_role)
            .ok_or_else(|| unknown("application.applied_role", &entity.applied_role))?;
        let region = Region::parse(&entity.region)
            .ok_or_else(|| unknown("application.region", &entity.region))?;
        let availability = Availability::parse(&entity.availability)
            .ok_or_else(|| unknown("application.availability", &entity.availability))?;
        let game = Game::parse_api_name(&entity.game)
            .ok_or_else(|| unknown("application.game", &entity.game))?;
        let status = ApplicationStatus::parse(&entity.status)
            .ok_or_else(|| unknown("application.status", &entity.status))?;

        Ok(Self {
            id: entity.id,
            discord_id: parse_u64_from_string(entity.discord_id)?,
            applied_role,
            display_name: entity.display_name,
            email: entity.email,
            discord: entity.discord,
            region,
            availability,
            legal_name: entity.legal_name,
            birth_location: entity.birth_location,
            street: entity.street,
            city: entity.city,
            postcode: entity.postcode,
            country: entity.country,
            game,
            peak_rank: entity.peak_rank,
            proof: entity.proof,
            experience: entity.experience,
            status,
            hr_review: entity.hr_review,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Validated parameters for inserting a pending application.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateApplicationParams {
    pub discord_id: u64,
    pub applied_role: AppliedRole,
    pub display_name: String,
    pub email: String,
    pub discord: String,
    pub region: Region,
    pub availability: Availability,
    pub legal_name: String,
    pub birth_location: String,
    pub street: String,
    pub city: String,
    pub postcode: String,
    pub country: String,
    pub game: Game,
    pub peak_rank: String,
    pub proof: String,
    pub experience: String,
}

/// Raw application fields read from a form embed, not yet validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationDraft {
    pub discord_id: u64,
    pub discord: String,
    pub applied_role: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub region: Option<String>,
    pub availability: Option<String>,
    pub legal_name: Option<String>,
    pub birth_location: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub game: Option<String>,
    pub peak_rank: Option<String>,
    pub proof: Option<String>,
    pub experience: Option<String>,
}

impl ApplicationDraft {
    /// Builds a draft from embed fields of an application form message.
    ///
    /// Each field name is a section heading and its value holds a code block of
    /// `Key: Value` lines. Recognized sections are `Role Information`,
    /// `Personal Information`, `Legal Information` and `<Game> Experience`; other
    /// fields are ignored. The applicant's Discord username is used unless the
    /// embed provides its own `Discord` line.
    ///
    /// # Arguments
    /// - `discord_id` - Discord ID of the applicant
    /// - `discord` - Discord username of the applicant
    /// - `fields` - Embed fields as `(name, value)` pairs
    pub fn from_embed_fields<'f>(
        discord_id: u64,
        discord: impl Into<String>,
        fields: impl IntoIterator<Item = (&'f str, &'f str)>,
    ) -> Self {
        let mut draft = Self {
            discord_id,
            discord: discord.into(),
            ..Self::default()
        };

        for (name, value) in fields {
            let name = name.replace("__", "");
            let name = name.trim();
            let Some(block) = code_block(value) else {
                continue;
            };
            let lines: Vec<(&str, &str)> = block
                .lines()
                .filter_map(|line| line.trim().split_once(": "))
                .collect();

            match name {
                "Role Information" => {
                    draft.applied_role = lines.first().map(|(_, v)| v.trim().to_lowercase());
                }
                "Personal Information" => {
                    for (key, value) in lines {
                        let value = value.trim();
                        match key {
                            "Display Name" => draft.display_name = Some(value.to_string()),
                            "Email" => draft.email = Some(value.to_lowercase()),
                            "Discord" => draft.discord = value.to_string(),
                            "Region" => draft.region = Some(value.to_lowercase()),
                            "Availability" => {
                                draft.availability =
                                    value.split_whitespace().next().map(str::to_string)
                            }
                            _ => {}
                        }
                    }
                }
                "Legal Information" => {
                    for (key, value) in lines {
                        let value = value.trim();
                        match key {
                            "Legal Name" => draft.legal_name = Some(value.to_string()),
                            "Birth Location" => {
                                // "<city>, <country code>"
                                draft.birth_location = value
                                    .split_once(", ")
                                    .map(|(_, code)| code.trim().to_lowercase())
                            }
                            "Street" => draft.street = Some(value.to_string()),
                            "City" => draft.city = Some(value.to_string()),
                            "Postcode" => draft.postcode = Some(value.to_string()),
                            "Country" => draft.country = Some(value.to_lowercase()),
                            _ => {}
                        }
                    }
                }
                section => {
                    let Some(game_name) = section.strip_suffix(" Experience") else {
                        continue;
                    };
                    draft.game = Some(
                        match game_name.to_lowercase().as_str() {
                            "league of legends" => Game::LeagueOfLegends,
                            "teamfight tactics" => Game::TeamfightTactics,
                            _ => Game::Valorant,
                        }
                        .api_name()
                        .to_string(),
                    );

                    for line in block.lines() {
                        if let Some((key, value)) = line.trim().split_once(": ") {
                            match key {
                                "Peak Rank" => draft.peak_rank = Some(value.trim().to_lowercase()),
                                "Proof" => draft.proof = Some(value.trim().to_string()),
                                _ => {}
                            }
                        }
                    }

                    // free text follows the "Experience:" line
                    draft.experience = block
                        .split_once("Experience:")
                        .and_then(|(_, rest)| rest.lines().nth(1))
                        .map(|line| line.trim().to_string());
                }
            }
        }

        draft
    }

    /// Validates the draft into insert parameters.
    ///
    /// # Returns
    /// - `Ok(CreateApplicationParams)` - Every field present and within its allowed set
    /// - `Err(ValidationError)` - The first missing or invalid field
    pub fn validate(self) -> Result<CreateApplicationParams, ValidationError> {
        let applied_role = required("Role", self.applied_role)?;
        let applied_role = AppliedRole::parse(&applied_role).ok_or(ValidationError::InvalidField {
            field: "Role",
            value: applied_role,
        })?;

        let region = required("Region", self.region)?;
        let region = Region::parse(&region).ok_or(ValidationError::InvalidField {
            field: "Region",
            value: region,
        })?;

        let availability = required("Availability", self.availability)?;
        let availability =
            Availability::parse(&availability).ok_or(ValidationError::InvalidField {
                field: "Availability",
                value: availability,
            })?;

        let game = required("Game", self.game)?;
        let game = Game::parse_api_name(&game).ok_or(ValidationError::InvalidField {
            field: "Game",
            value: game,
        })?;

        let email = required("Email", self.email)?;
        if !email.contains('@') {
            return Err(ValidationError::InvalidField {
                field: "Email",
                value: email,
            });
        }

        let proof = required("Proof", self.proof)?;
        let proof_ok = Url::parse(&proof)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !proof_ok {
            return Err(ValidationError::InvalidField {
                field: "Proof",
                value: proof,
            });
        }

        let experience = required("Experience", self.experience)?;
        let len = experience.chars().count();
        if !(EXPERIENCE_MIN..=EXPERIENCE_MAX).contains(&len) {
            return Err(ValidationError::Length {
                field: "Experience",
                min: EXPERIENCE_MIN,
                max: EXPERIENCE_MAX,
            });
        }

        Ok(CreateApplicationParams {
            discord_id: self.discord_id,
            applied_role,
            display_name: required("Display Name", self.display_name)?,
            email,
            discord: self.discord,
            region,
            availability,
            legal_name: required("Legal Name", self.legal_name)?,
            birth_location: country_code("Birth Location", self.birth_location)?,
            street: required("Street", self.street)?,
            city: required("City", self.city)?,
            postcode: required("Postcode", self.postcode)?,
            country: country_code("Country", self.country)?,
            game,
            peak_rank: required("Peak Rank", self.peak_rank)?,
            proof,
            experience,
        })
    }
}

fn code_block(value: &str) -> Option<&str> {
    value.split("```").nth(1).map(str::trim)
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField(field))
}

fn country_code(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    if COUNTRY_CODES.contains(&value.as_str()) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidField { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            ("__Role Information__", "```\nRole: Booster\n```"),
            (
                "__Personal Information__",
                "```\nDisplay Name: Ana\nEmail: Ana@Example.com\nRegion: BR\nAvailability: 20-30 hours/week\n```",
            ),
            (
                "__Legal Information__",
                "```\nLegal Name: Ana Silva\nBirth Location: Recife, BR\nStreet: Rua A 1\nCity: Recife\nPostcode: 50000-000\nCountry: BR\n```",
            ),
            (
                "__League of Legends Experience__",
                "```\nPeak Rank: Master\nProof: https://op.gg/summoners/br/Ana-BR1\nExperience:\nThree seasons boosting in master+ elo\n```",
            ),
        ]
    }

    #[test]
    fn parses_form_embed() {
        let draft = ApplicationDraft::from_embed_fields(42, "ana", sample_fields());

        assert_eq!(draft.applied_role.as_deref(), Some("booster"));
        assert_eq!(draft.email.as_deref(), Some("ana@example.com"));
        assert_eq!(draft.availability.as_deref(), Some("20-30"));
        assert_eq!(draft.birth_location.as_deref(), Some("br"));
        assert_eq!(draft.game.as_deref(), Some("league_of_legends"));
        assert_eq!(draft.peak_rank.as_deref(), Some("master"));
        assert_eq!(
            draft.experience.as_deref(),
            Some("Three seasons boosting in master+ elo")
        );

        let params = draft.validate().unwrap();
        assert_eq!(params.applied_role, AppliedRole::Booster);
        assert_eq!(params.region, Region::Br);
        assert_eq!(params.game, Game::LeagueOfLegends);
        assert_eq!(params.discord, "ana");
    }

    #[test]
    fn rejects_missing_and_invalid_fields() {
        let mut draft = ApplicationDraft::from_embed_fields(42, "ana", sample_fields());
        draft.proof = Some("op.gg/ana".to_string());
        assert!(matches!(
            draft.clone().validate(),
            Err(ValidationError::InvalidField { field: "Proof", .. })
        ));

        draft.proof = None;
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField("Proof"))
        );
    }

    #[test]
    fn rejects_short_experience() {
        let mut draft = ApplicationDraft::from_embed_fields(42, "ana", sample_fields());
        draft.experience = Some("short".to_string());
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::Length { field: "Experience", .. })
        ));
    }

    #[test]
    fn only_pending_can_be_decided() {
        use ApplicationStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Pending.can_transition_to(Pending));
    }
}
