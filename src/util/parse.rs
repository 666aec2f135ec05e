use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses a Discord message link into its guild, channel and message IDs.
///
/// Accepts the stable, PTB and Canary hosts over http or https, with the path
/// `/channels/<guild>/<channel>/<message>` and at most a trailing slash after it.
///
/// # Arguments
/// - `link` - Link copied from the Discord client
///
/// # Returns
/// - `Some((guild_id, channel_id, message_id))` - All three segments parsed
/// - `None` - Not a message link
pub fn parse_message_link(link: &str) -> Option<(u64, u64, u64)> {
    let url = url::Url::parse(link.trim()).ok()?;

    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    if !matches!(
        url.host_str()?,
        "discord.com" | "ptb.discord.com" | "canary.discord.com"
    ) {
        return None;
    }
    if url.query().is_some() || url.fragment().is_some() {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.collect();
    match segments.as_slice() {
        ["channels", guild, channel, message] | ["channels", guild, channel, message, ""] => Some((
            parse_snowflake(guild)?,
            parse_snowflake(channel)?,
            parse_snowflake(message)?,
        )),
        _ => None,
    }
}

/// Discord ids are never zero.
fn parse_snowflake(segment: &str) -> Option<u64> {
    segment.parse().ok().filter(|id| *id != 0)
}
