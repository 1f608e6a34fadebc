// Channel setup commands - choose monitored, repost and debug channels

use poise::serenity_prelude as serenity;
use serenity::Mentionable;
use tracing::{error, info};

use crate::features::channel_store::StoreError;
use crate::{Context, Error};

/// Reply with `done` if the store saved, or a plain failure notice if not
pub(crate) async fn confirm_saved(
    ctx: Context<'_>,
    result: Result<(), StoreError>,
    done: String,
) -> Result<(), Error> {
    match result {
        Ok(()) => {
            info!("{} (by {})", done, ctx.author().id);
            ctx.say(done).await?;
        }
        Err(e) => {
            error!("Failed to save channel data: {:?}", e);
            ctx.say("Failed to save channel configuration.").await?;
        }
    }
    Ok(())
}

/// Text and announcement channels can hold uploads and reposts
pub fn is_text_channel(kind: serenity::ChannelType) -> bool {
    matches!(kind, serenity::ChannelType::Text | serenity::ChannelType::News)
}

/// Reply and return false unless `channel` is a text channel
async fn require_text(ctx: Context<'_>, channel: &serenity::GuildChannel) -> Result<bool, Error> {
    if is_text_channel(channel.kind) {
        return Ok(true);
    }
    ctx.say(format!("{} is not a text channel.", channel.id.mention())).await?;
    Ok(false)
}

/// Reject non-text channels and channels from other servers.
/// Returns the guild when the channel belongs here.
async fn target_guild(
    ctx: Context<'_>,
    channel: &serenity::GuildChannel,
) -> Result<Option<serenity::GuildId>, Error> {
    if !require_text(ctx, channel).await? {
        return Ok(None);
    }
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say("This command can only be used in a server.").await?;
        return Ok(None);
    };
    if channel.guild_id != guild_id {
        ctx.say("That channel belongs to another server.").await?;
        return Ok(None);
    }
    Ok(Some(guild_id))
}

/// Set the channel where only uploads and links are allowed
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "KICK_MEMBERS"
)]
pub async fn set_monitored_channel(
    ctx: Context<'_>,
    #[description = "Channel to keep for uploads only"]
    #[channel_types("Text", "News")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let Some(guild_id) = target_guild(ctx, &channel).await? else {
        return Ok(());
    };

    let (previous, result) = {
        let mut store = ctx.data().store.write().await;
        (
            store.monitored_channel(guild_id),
            store.set_monitored_channel(guild_id, channel.id),
        )
    };
    if let Some(previous) = previous.filter(|p| *p != channel.id) {
        info!("Guild {} monitored channel replaced: {} -> {}", guild_id, previous, channel.id);
    }
    confirm_saved(
        ctx,
        result,
        format!("Monitored channel set to {}", channel.id.mention()),
    )
    .await
}

/// Set the channel where removed messages are reposted
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "KICK_MEMBERS"
)]
pub async fn set_repost_channel(
    ctx: Context<'_>,
    #[description = "Channel that receives removed messages"]
    #[channel_types("Text", "News")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let Some(guild_id) = target_guild(ctx, &channel).await? else {
        return Ok(());
    };

    let (previous, result) = {
        let mut store = ctx.data().store.write().await;
        (
            store.repost_channel(guild_id),
            store.set_repost_channel(guild_id, channel.id),
        )
    };
    if let Some(previous) = previous.filter(|p| *p != channel.id) {
        info!("Guild {} repost channel replaced: {} -> {}", guild_id, previous, channel.id);
    }
    confirm_saved(
        ctx,
        result,
        format!("Repost channel set to {}", channel.id.mention()),
    )
    .await
}

/// Set the channel for debug reports
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "KICK_MEMBERS"
)]
pub async fn set_debug_channel(
    ctx: Context<'_>,
    #[description = "Channel for debug reports"]
    #[channel_types("Text", "News")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    if !require_text(ctx, &channel).await? {
        return Ok(());
    }

    let result = ctx.data().store.write().await.set_debug_channel(channel.id);
    confirm_saved(
        ctx,
        result,
        format!("Debug channel set to {}", channel.id.mention()),
    )
    .await
}
