use crate::error::{config::ConfigError, AppError};

const DEFAULT_RIOT_ACCOUNT_URL: &str = "https://americas.api.riotgames.com";
const DEFAULT_TRACKER_URL: &str = "https://public-api.tracker.gg/v2";

pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    pub discord_guild_id: u64,

    pub api_url: String,
    pub api_token: String,

    pub application_category_id: u64,
    pub ticket_category_id: u64,
    pub hiring_manager_role_id: u64,
    pub support_role_id: Option<u64>,

    pub riot_api_key: Option<String>,
    pub riot_account_url: String,
    pub tracker_api_key: Option<String>,
    pub tracker_url: String,

    pub tickets_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            discord_guild_id: required_id("DISCORD_GUILD_ID")?,
            api_url: required("API_URL")?.trim_end_matches('/').to_string(),
            api_token: required("API_TOKEN")?,
            application_category_id: required_id("APPLICATION_CATEGORY_ID")?,
            ticket_category_id: required_id("TICKET_CATEGORY_ID")?,
            hiring_manager_role_id: required_id("HIRING_MANAGER_ROLE_ID")?,
            support_role_id: optional("SUPPORT_ROLE_ID")
                .map(|value| parse_id("SUPPORT_ROLE_ID", value))
                .transpose()?,
            riot_api_key: optional("RIOT_API_KEY"),
            riot_account_url: optional("RIOT_ACCOUNT_URL")
                .unwrap_or_else(|| DEFAULT_RIOT_ACCOUNT_URL.to_string()),
            tracker_api_key: optional("TRACKER_API_KEY"),
            tracker_url: optional("TRACKER_URL").unwrap_or_else(|| DEFAULT_TRACKER_URL.to_string()),
            tickets_enabled: optional("TICKETS_ENABLED")
                .map(|value| parse_flag("TICKETS_ENABLED", value))
                .transpose()?
                .unwrap_or(false),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn required_id(name: &str) -> Result<u64, ConfigError> {
    parse_id(name, required(name)?)
}

fn parse_id(name: &str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        })
}

fn parse_flag(name: &str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snowflake_ids() {
        assert_eq!(
            parse_id("TICKET_CATEGORY_ID", " 1318900583318421575 ".to_string()).unwrap(),
            1318900583318421575
        );
        assert!(matches!(
            parse_id("TICKET_CATEGORY_ID", "abc".to_string()),
            Err(ConfigError::InvalidEnvVar { .. })
        ));
    }

    #[test]
    fn parses_flags() {
        assert!(parse_flag("TICKETS_ENABLED", "TRUE".to_string()).unwrap());
        assert!(!parse_flag("TICKETS_ENABLED", "0".to_string()).unwrap());
        assert!(parse_flag("TICKETS_ENABLED", "maybe".to_string()).is_err());
    }
}
