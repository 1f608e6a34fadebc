// Debug Report - renders the channel configuration for admins

use poise::serenity_prelude as serenity;
use serenity::Mentionable;
use tracing::{info, warn};

use crate::features::upload_guard::ModerationGateway;
use crate::models::channel_config::ChannelConfig;
use crate::utils::formatters::{channel_label, code_block, id_list, join_or_none};

pub fn debug_not_set(prefix: &str) -> String {
    format!(
        "Debug channel not set. Please use {}set_debug_channel command.",
        prefix
    )
}

pub fn debug_not_found(prefix: &str) -> String {
    format!(
        "Debug channel not found. Please set it again using {}set_debug_channel command.",
        prefix
    )
}

pub fn visibility_line(visible: bool) -> String {
    format!(
        "Debug info is {}.",
        if visible { "visible" } else { "hidden" }
    )
}

async fn labels(
    gateway: &dyn ModerationGateway,
    channels: impl Iterator<Item = serenity::ChannelId>,
) -> Vec<String> {
    let mut out = Vec::new();
    for channel_id in channels {
        let resolved = gateway.channel_exists(channel_id).await;
        out.push(channel_label(channel_id, resolved));
    }
    out
}

/// "Monitored channels: ..." and "Repost channels: ..." lines with resolved mentions
pub async fn channel_report(
    gateway: &dyn ModerationGateway,
    config: &ChannelConfig,
) -> Vec<String> {
    let monitored = labels(gateway, config.monitored_channels()).await;
    let repost = labels(gateway, config.repost_channels()).await;
    vec![
        format!("Monitored channels: {}", join_or_none(&monitored)),
        format!("Repost channels: {}", join_or_none(&repost)),
    ]
}

/// Describe the debug channel, or explain why it can't be used
pub async fn debug_channel_line(
    gateway: &dyn ModerationGateway,
    config: &ChannelConfig,
    prefix: &str,
) -> String {
    let Some(id) = config.debug.channel else {
        return debug_not_set(prefix);
    };
    if gateway.channel_exists(id).await {
        format!("Debug channel: {}", id.mention())
    } else {
        debug_not_found(prefix)
    }
}

/// Raw ID listing wrapped in a code block
pub fn raw_listing(config: &ChannelConfig) -> String {
    let debug = config
        .debug
        .channel
        .map(|c| c.get().to_string())
        .unwrap_or_else(|| "not set".to_string());
    code_block(&format!(
        "Monitored Channels: {}\nRepost Channels: {}\nDebug Channel ID: {}\n",
        id_list(config.monitored_channels()),
        id_list(config.repost_channels()),
        debug
    ))
}

/// Deliver the raw listing and return the replies for the invoker.
///
/// With debug info visible and a resolvable debug channel, the listing goes
/// there and the invoker gets a pointer. Otherwise it is replied in place,
/// after a notice if the debug channel was expected but unusable.
pub async fn route_listing(
    gateway: &dyn ModerationGateway,
    config: &ChannelConfig,
    prefix: &str,
) -> anyhow::Result<Vec<String>> {
    let listing = raw_listing(config);
    if !config.debug.visible {
        return Ok(vec![listing]);
    }

    let Some(debug_id) = config.debug.channel else {
        return Ok(vec![debug_not_set(prefix), listing]);
    };
    if !gateway.channel_exists(debug_id).await {
        return Ok(vec![debug_not_found(prefix), listing]);
    }

    gateway.send(debug_id, "Current monitored and repost channels:").await?;
    gateway.send(debug_id, &listing).await?;
    Ok(vec![format!("Channel data sent to {}", debug_id.mention())])
}

/// Post the channel report into the debug channel when the bot comes online
pub async fn post_startup_report(gateway: &dyn ModerationGateway, config: &ChannelConfig) {
    let Some(debug_id) = config.debug.channel else {
        return;
    };
    if !config.debug.visible {
        return;
    }
    if !gateway.channel_exists(debug_id).await {
        warn!("Debug channel {} not found", debug_id);
        return;
    }

    for line in channel_report(gateway, config).await {
        if let Err(e) = gateway.send(debug_id, &line).await {
            warn!("Failed to post startup report: {:?}", e);
            return;
        }
    }
    info!("Posted channel report to debug channel {}", debug_id);
}
