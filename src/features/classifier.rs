// Upload-only classifier
// Decides whether a message breaks the "uploads only" rule of a monitored channel

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use poise::serenity_prelude as serenity;
use regex::Regex;

use crate::features::channel_store::ChannelStore;

/// Messages at or before 2024-05-25T00:00:00Z are never moderated
pub const POLICY_CUTOFF_SECS: i64 = 1_716_595_200;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://").expect("valid URL pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Exempt,
    Violating,
}

/// The parts of a Discord message the upload guard looks at
#[derive(Debug, Clone)]
pub struct MessageFacts {
    pub id: serenity::MessageId,
    pub author_id: serenity::UserId,
    pub channel_id: serenity::ChannelId,
    pub guild_id: Option<serenity::GuildId>,
    pub content: String,
    pub attachment_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&serenity::Message> for MessageFacts {
    fn from(msg: &serenity::Message) -> Self {
        Self {
            id: msg.id,
            author_id: msg.author.id,
            channel_id: msg.channel_id,
            guild_id: msg.guild_id,
            content: msg.content.clone(),
            attachment_count: msg.attachments.len(),
            created_at: parse_created_at(
                &msg.timestamp.to_string(),
                msg.timestamp.unix_timestamp(),
            ),
        }
    }
}

/// Parse an RFC 3339 message timestamp, keeping sub-second precision.
/// Falls back to whole seconds if the text does not parse.
pub fn parse_created_at(rfc3339: &str, fallback_secs: i64) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(rfc3339) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(_) => DateTime::<Utc>::from_timestamp(fallback_secs, 0).unwrap_or_default(),
    }
}

pub fn policy_cutoff() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(POLICY_CUTOFF_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn contains_url(content: &str) -> bool {
    URL_PATTERN.is_match(content)
}

/// Classify a message against the upload-only policy
pub fn classify(msg: &MessageFacts, bot_id: serenity::UserId, store: &ChannelStore) -> Verdict {
    if msg.author_id == bot_id {
        return Verdict::Exempt;
    }
    if msg.created_at <= policy_cutoff() {
        return Verdict::Exempt;
    }
    if !store.is_monitored(msg.channel_id) {
        return Verdict::Exempt;
    }

    if msg.attachment_count == 0 && !contains_url(&msg.content) {
        Verdict::Violating
    } else {
        Verdict::Exempt
    }
}
