//! Encoding of intake state into component custom IDs.
//!
//! Language, game and region travel between interaction round trips inside the
//! custom IDs of the next buttons and modal. Decoding validates every segment and
//! rejects anything malformed instead of trusting the client.

use std::fmt;

use crate::error::flow::TokenError;
use crate::model::intake::{Game, Language, Region};

const BUTTON_NAMESPACE: &str = "application";
const MODAL_NAMESPACE: &str = "application_modal";

/// Intake choices accumulated so far, carried by every token after region select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntakeChoice {
    pub language: Language,
    pub game: Game,
    pub region: Region,
}

/// A decoded intake button custom ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeToken {
    /// `application:default` on the booster panel
    Default,
    /// `application:special` on the booster panel
    Special,
    /// `application:lang:<language>`
    Language(Language),
    /// `application:game:<language>:<game>`
    Game { language: Language, game: Game },
    /// `application:region:<language>:<game>:<region>`
    Region(IntakeChoice),
    /// `application:start:<language>:<game>:<region>:<applicant>`
    Start { choice: IntakeChoice, applicant: u64 },
}

impl IntakeToken {
    /// Whether a custom ID belongs to the intake buttons at all.
    pub fn matches(custom_id: &str) -> bool {
        custom_id
            .split_once(':')
            .is_some_and(|(namespace, _)| namespace == BUTTON_NAMESPACE)
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    pub fn decode(custom_id: &str) -> Result<Self, TokenError> {
        let mut segments = custom_id.split(':');
        if segments.next() != Some(BUTTON_NAMESPACE) {
            return Err(TokenError::Namespace(custom_id.to_string()));
        }
        let rest: Vec<&str> = segments.collect();
        let arity = || TokenError::Arity(custom_id.to_string());

        match rest.as_slice() {
            ["default"] => Ok(Self::Default),
            ["special"] => Ok(Self::Special),
            ["lang", language] => Ok(Self::Language(language_segment(language)?)),
            ["game", language, game] => Ok(Self::Game {
                language: language_segment(language)?,
                game: game_segment(game)?,
            }),
            ["region", language, game, region] => {
                Ok(Self::Region(choice_segments(language, game, region)?))
            }
            ["start", language, game, region, applicant] => Ok(Self::Start {
                choice: choice_segments(language, game, region)?,
                applicant: applicant.parse().map_err(|_| TokenError::UnknownValue {
                    kind: "applicant",
                    value: applicant.to_string(),
                })?,
            }),
            ["default" | "special", ..]
            | ["lang" | "game" | "region" | "start", ..] => Err(arity()),
            [step, ..] => Err(TokenError::UnknownValue {
                kind: "step",
                value: step.to_string(),
            }),
            [] => Err(arity()),
        }
    }
}

impl fmt::Display for IntakeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "{BUTTON_NAMESPACE}:default"),
            Self::Special => write!(f, "{BUTTON_NAMESPACE}:special"),
            Self::Language(language) => write!(f, "{BUTTON_NAMESPACE}:lang:{}", language.code()),
            Self::Game { language, game } => write!(
                f,
                "{BUTTON_NAMESPACE}:game:{}:{}",
                language.code(),
                game.code()
            ),
            Self::Region(choice) => write!(f, "{BUTTON_NAMESPACE}:region:{}", choice_path(choice)),
            Self::Start { choice, applicant } => write!(
                f,
                "{BUTTON_NAMESPACE}:start:{}:{}",
                choice_path(choice),
                applicant
            ),
        }
    }
}

/// The Riot ID modal shown after region select, `application_modal:<l>:<g>:<r>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityModalToken(pub IntakeChoice);

impl IdentityModalToken {
    pub fn matches(custom_id: &str) -> bool {
        custom_id
            .split_once(':')
            .is_some_and(|(namespace, _)| namespace == MODAL_NAMESPACE)
    }

    pub fn encode(&self) -> String {
        format!("{MODAL_NAMESPACE}:{}", choice_path(&self.0))
    }

    pub fn decode(custom_id: &str) -> Result<Self, TokenError> {
        let mut segments = custom_id.split(':');
        if segments.next() != Some(MODAL_NAMESPACE) {
            return Err(TokenError::Namespace(custom_id.to_string()));
        }

        match segments.collect::<Vec<_>>().as_slice() {
            [language, game, region] => Ok(Self(choice_segments(language, game, region)?)),
            _ => Err(TokenError::Arity(custom_id.to_string())),
        }
    }
}

fn choice_path(choice: &IntakeChoice) -> String {
    format!(
        "{}:{}:{}",
        choice.language.code(),
        choice.game.code(),
        choice.region.code()
    )
}

fn language_segment(value: &str) -> Result<Language, TokenError> {
    Language::parse(value).ok_or_else(|| TokenError::UnknownValue {
        kind: "language",
        value: value.to_string(),
    })
}

fn game_segment(value: &str) -> Result<Game, TokenError> {
    Game::parse_code(value).ok_or_else(|| TokenError::UnknownValue {
        kind: "game",
        value: value.to_string(),
    })
}

fn choice_segments(language: &str, game: &str, region: &str) -> Result<IntakeChoice, TokenError> {
    Ok(IntakeChoice {
        language: language_segment(language)?,
        game: game_segment(game)?,
        region: Region::parse(region).ok_or_else(|| TokenError::UnknownValue {
            kind: "region",
            value: region.to_string(),
        })?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice() -> IntakeChoice {
        IntakeChoice {
            language: Language::Pt,
            game: Game::Valorant,
            region: Region::Br,
        }
    }

    #[test]
    fn encodes_stable_custom_ids() {
        assert_eq!(IntakeToken::Language(Language::En).encode(), "application:lang:en");
        assert_eq!(
            IntakeToken::Start {
                choice: choice(),
                applicant: 42
            }
            .encode(),
            "application:start:pt:val:br:42"
        );
        assert_eq!(
            IdentityModalToken(choice()).encode(),
            "application_modal:pt:val:br"
        );
    }

    #[test]
    fn decodes_what_it_encodes() {
        let tokens = [
            IntakeToken::Default,
            IntakeToken::Game {
                language: Language::En,
                game: Game::LeagueOfLegends,
            },
            IntakeToken::Region(choice()),
        ];
        for token in tokens {
            assert_eq!(IntakeToken::decode(&token.encode()), Ok(token));
        }
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(matches!(
            IntakeToken::decode("ticket_button:close_ticket"),
            Err(TokenError::Namespace(_))
        ));
        assert!(matches!(
            IntakeToken::decode("application:region:en:lol"),
            Err(TokenError::Arity(_))
        ));
        assert!(matches!(
            IntakeToken::decode("application:game:en:csgo"),
            Err(TokenError::UnknownValue { kind: "game", .. })
        ));
        assert!(matches!(
            IntakeToken::decode("application:start:en:lol:na:not-a-user"),
            Err(TokenError::UnknownValue { kind: "applicant", .. })
        ));
        assert!(matches!(
            IdentityModalToken::decode("application_modal:en:lol:na:extra"),
            Err(TokenError::Arity(_))
        ));
    }
}
