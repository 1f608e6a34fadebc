// Centralized configuration for the upload guard bot

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use poise::serenity_prelude as serenity;

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_CHANNEL_DATA_PATH: &str = "channel_data.json";

/// How long the "uploads only" warning stays in the channel
pub const WARNING_LIFETIME: Duration = Duration::from_secs(20);

/// Discord rejects messages longer than this
pub const MESSAGE_LIMIT: usize = 2000;

pub const UPLOAD_ONLY_WARNING: &str = concat!(
    "Your message was deleted as you must be uploading either a link or an attachment to ",
    "#uploads! Conversation or questions about something in the #uploads chat can take place ",
    "in #general or #off-topic. This message will be deleted after 20 seconds."
);

/// Discord embed colors
pub mod colors {
    pub const PRIMARY: u32 = 0x00bfff;
}

/// Settings read from the environment (and `.env`) at startup
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub prefix: String,
    pub channel_data_path: PathBuf,
    pub owners: HashSet<serenity::UserId>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        let token = env::var("DISCORD_TOKEN").context("DISCORD_TOKEN must be set")?;
        let prefix = env::var("COMMAND_PREFIX")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let channel_data_path = env::var("CHANNEL_DATA_PATH")
            .unwrap_or_else(|_| DEFAULT_CHANNEL_DATA_PATH.to_string())
            .into();
        let owners = match env::var("OWNER_IDS") {
            Ok(raw) => parse_owner_ids(&raw)?,
            Err(_) => HashSet::new(),
        };

        Ok(Self {
            token,
            prefix,
            channel_data_path,
            owners,
        })
    }
}

/// Parse a comma-separated list of Discord user IDs
pub fn parse_owner_ids(raw: &str) -> Result<HashSet<serenity::UserId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let id: u64 = s
                .parse()
                .with_context(|| format!("invalid owner id {:?}", s))?;
            if id == 0 {
                anyhow::bail!("owner id cannot be 0");
            }
            Ok(serenity::UserId::new(id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_ids() {
        let owners = parse_owner_ids("123, 456,,789 ").unwrap();
        assert_eq!(owners.len(), 3);
        assert!(owners.contains(&serenity::UserId::new(456)));
    }

    #[test]
    fn test_parse_owner_ids_empty() {
        assert!(parse_owner_ids("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_owner_ids_rejects_garbage() {
        assert!(parse_owner_ids("abc").is_err());
        assert!(parse_owner_ids("0").is_err());
    }

    #[test]
    fn test_warning_mentions_lifetime() {
        assert!(UPLOAD_ONLY_WARNING.contains(&format!("{} seconds", WARNING_LIFETIME.as_secs())));
    }
}
