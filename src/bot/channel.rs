//! Private text channels created for tickets and applications.

use serenity::all::{
    ChannelId, ChannelType, CreateChannel, GuildId, Http, PermissionOverwrite,
    PermissionOverwriteType, Permissions, RoleId, UserId,
};

use crate::error::AppError;

const MAX_CHANNEL_NAME: usize = 100;

/// Permissions granted to everyone who takes part in a private channel.
pub fn participant_permissions() -> Permissions {
    Permissions::VIEW_CHANNEL
        | Permissions::SEND_MESSAGES
        | Permissions::READ_MESSAGE_HISTORY
        | Permissions::ATTACH_FILES
        | Permissions::EMBED_LINKS
        | Permissions::ADD_REACTIONS
}

/// Builds overwrites hiding a channel from @everyone and opening it to the given
/// members and roles.
///
/// Members may not mention @everyone from inside the channel.
///
/// # Arguments
/// - `guild_id` - Guild the channel lives in; its ID is also the @everyone role ID
/// - `members` - Users allowed in the channel
/// - `roles` - Roles allowed in the channel
pub fn private_overwrites(guild_id: u64, members: &[u64], roles: &[u64]) -> Vec<PermissionOverwrite> {
    let mut overwrites = vec![PermissionOverwrite {
        allow: Permissions::empty(),
        deny: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
        kind: PermissionOverwriteType::Role(RoleId::new(guild_id)),
    }];

    overwrites.extend(members.iter().map(|member| PermissionOverwrite {
        allow: participant_permissions(),
        deny: Permissions::MENTION_EVERYONE,
        kind: PermissionOverwriteType::Member(UserId::new(*member)),
    }));

    overwrites.extend(roles.iter().map(|role| PermissionOverwrite {
        allow: participant_permissions(),
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Role(RoleId::new(*role)),
    }));

    overwrites
}

/// Joins name parts with `-` into a valid text channel name.
///
/// Discord lower-cases text channel names and drops most punctuation; doing the
/// same here keeps the created name predictable. Whitespace becomes `-`, anything
/// other than letters, digits, `-` and `_` is removed, and the result is capped at
/// 100 characters.
pub fn channel_name(parts: &[&str]) -> String {
    let mut name = String::new();

    for part in parts {
        let cleaned: String = part
            .trim()
            .chars()
            .flat_map(char::to_lowercase)
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if cleaned.is_empty() {
            continue;
        }
        if !name.is_empty() {
            name.push('-');
        }
        name.push_str(&cleaned);
    }

    name.chars().take(MAX_CHANNEL_NAME).collect()
}

/// Creates a text channel under `category_id` with the given overwrites.
///
/// # Returns
/// - `Ok(ChannelId)` - ID of the new channel
/// - `Err(AppError::DiscordErr)` - Discord refused to create the channel
pub async fn create_private_channel(
    http: &Http,
    guild_id: u64,
    category_id: u64,
    name: &str,
    overwrites: Vec<PermissionOverwrite>,
) -> Result<ChannelId, AppError> {
    let channel = GuildId::new(guild_id)
        .create_channel(
            http,
            CreateChannel::new(name)
                .kind(ChannelType::Text)
                .category(ChannelId::new(category_id))
                .permissions(overwrites),
        )
        .await?;

    tracing::debug!("Created channel {} ({})", channel.name, channel.id);

    Ok(channel.id)
}

/// Deletes a channel whose setup could not be completed.
///
/// Failures are logged; the caller is already reporting the original error.
pub async fn discard_channel(http: &Http, channel_id: ChannelId) {
    if let Err(e) = channel_id.delete(http).await {
        tracing::error!("Failed to delete half-created channel {}: {}", channel_id, e);
    }
}
