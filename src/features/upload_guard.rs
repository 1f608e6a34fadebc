// Upload Guard - enforces the upload-only rule on monitored channels
// Reposts the removed text, deletes it, and leaves a short-lived warning

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use serenity::Mentionable;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::features::classifier::{classify, MessageFacts, Verdict};
use crate::utils::config::{MESSAGE_LIMIT, UPLOAD_ONLY_WARNING, WARNING_LIFETIME};
use crate::utils::formatters::truncate;
use crate::Data;

/// The Discord operations the bot needs: channel lookup, send and delete
#[async_trait]
pub trait ModerationGateway: Send + Sync {
    async fn channel_exists(&self, channel_id: serenity::ChannelId) -> bool;

    async fn send(
        &self,
        channel_id: serenity::ChannelId,
        content: &str,
    ) -> anyhow::Result<serenity::MessageId>;

    async fn delete(
        &self,
        channel_id: serenity::ChannelId,
        message_id: serenity::MessageId,
    ) -> anyhow::Result<()>;
}

/// Gateway backed by serenity's HTTP client and cache
#[derive(Clone)]
pub struct SerenityGateway {
    http: Arc<serenity::Http>,
    cache: Arc<serenity::Cache>,
}

impl SerenityGateway {
    pub fn new(ctx: &serenity::Context) -> Self {
        Self {
            http: ctx.http.clone(),
            cache: ctx.cache.clone(),
        }
    }
}

#[async_trait]
impl ModerationGateway for SerenityGateway {
    async fn channel_exists(&self, channel_id: serenity::ChannelId) -> bool {
        if self.cache.channel(channel_id).is_some() {
            return true;
        }
        match self.http.get_channel(channel_id).await {
            Ok(_) => true,
            Err(e) => {
                debug!("Channel {} did not resolve: {:?}", channel_id, e);
                false
            }
        }
    }

    async fn send(
        &self,
        channel_id: serenity::ChannelId,
        content: &str,
    ) -> anyhow::Result<serenity::MessageId> {
        let msg = channel_id.send_message(&self.http, quiet_message(content)).await?;
        Ok(msg.id)
    }

    async fn delete(
        &self,
        channel_id: serenity::ChannelId,
        message_id: serenity::MessageId,
    ) -> anyhow::Result<()> {
        channel_id.delete_message(&self.http, message_id).await?;
        Ok(())
    }
}

/// A message that renders mentions without pinging anyone.
/// Reposted user text may carry `@everyone` or role mentions.
pub fn quiet_message(content: &str) -> serenity::CreateMessage {
    serenity::CreateMessage::new()
        .content(content)
        .allowed_mentions(serenity::CreateAllowedMentions::new())
}

/// Text posted to the repost channel for a removed message
pub fn repost_text(msg: &MessageFacts) -> String {
    let text = format!(
        "Message from {} in {}: {}",
        msg.author_id.mention(),
        msg.channel_id.mention(),
        msg.content
    );
    truncate(&text, MESSAGE_LIMIT)
}

/// Entry point for every inbound message
pub async fn handle_message(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    bot_id: serenity::UserId,
    data: &Data,
) {
    let facts = MessageFacts::from(msg);

    let repost_channel = {
        let store = data.store.read().await;
        if classify(&facts, bot_id, &store) == Verdict::Exempt {
            return;
        }
        facts.guild_id.and_then(|g| store.repost_channel(g))
    };

    info!(
        "Removing non-upload message {} from {} in channel {}",
        facts.id, facts.author_id, facts.channel_id
    );
    let gateway: Arc<dyn ModerationGateway> = Arc::new(SerenityGateway::new(ctx));
    enforce(gateway, &facts, repost_channel).await;
}

/// Act on a violating message.
///
/// Every step is attempted even if an earlier one failed. Returns the handle of
/// the scheduled warning cleanup, if the warning was posted.
pub async fn enforce(
    gateway: Arc<dyn ModerationGateway>,
    msg: &MessageFacts,
    repost_channel: Option<serenity::ChannelId>,
) -> Option<JoinHandle<()>> {
    if let Some(repost_id) = repost_channel {
        if gateway.channel_exists(repost_id).await {
            if let Err(e) = gateway.send(repost_id, &repost_text(msg)).await {
                warn!("Failed to repost message {} to {}: {:?}", msg.id, repost_id, e);
            }
        } else {
            warn!("Repost channel {} not found, skipping repost", repost_id);
        }
    }

    if let Err(e) = gateway.delete(msg.channel_id, msg.id).await {
        warn!("Failed to delete message {}: {:?}", msg.id, e);
    }

    match gateway.send(msg.channel_id, UPLOAD_ONLY_WARNING).await {
        Ok(warning_id) => Some(schedule_delete(
            gateway,
            msg.channel_id,
            warning_id,
            WARNING_LIFETIME,
        )),
        Err(e) => {
            warn!("Failed to send warning in {}: {:?}", msg.channel_id, e);
            None
        }
    }
}

/// Delete a message after `delay` without blocking the caller
pub fn schedule_delete(
    gateway: Arc<dyn ModerationGateway>,
    channel_id: serenity::ChannelId,
    message_id: serenity::MessageId,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        // Someone may have removed it already
        if let Err(e) = gateway.delete(channel_id, message_id).await {
            debug!("Warning {} already gone: {:?}", message_id, e);
        }
    })
}
