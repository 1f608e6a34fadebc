// Channel configuration models
// `ChannelData` matches the channel_data.json layout, `ChannelConfig` is the in-memory view

use poise::serenity_prelude as serenity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted channel configuration, one JSON object on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelData {
    /// Guild ID -> monitored channel ID
    #[serde(default)]
    pub monitored_channels: BTreeMap<u64, u64>,
    /// Guild ID -> repost channel ID
    #[serde(default)]
    pub repost_channels: BTreeMap<u64, u64>,
    #[serde(default)]
    pub debug_channel_id: Option<u64>,
    #[serde(default)]
    pub show_debug_info: bool,
}

/// Per-guild channel settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub monitored_channel: Option<serenity::ChannelId>,
    pub repost_channel: Option<serenity::ChannelId>,
}

/// Process-wide debug settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugConfig {
    pub channel: Option<serenity::ChannelId>,
    pub visible: bool,
}

/// Everything the bot knows about its channels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelConfig {
    pub servers: BTreeMap<serenity::GuildId, ServerConfig>,
    pub debug: DebugConfig,
}

impl ChannelConfig {
    /// Monitored channel IDs across all guilds, in guild order
    pub fn monitored_channels(&self) -> impl Iterator<Item = serenity::ChannelId> + '_ {
        self.servers.values().filter_map(|s| s.monitored_channel)
    }

    /// Repost channel IDs across all guilds, in guild order
    pub fn repost_channels(&self) -> impl Iterator<Item = serenity::ChannelId> + '_ {
        self.servers.values().filter_map(|s| s.repost_channel)
    }
}

// Discord snowflakes are never zero; serenity panics on a zero ID
fn guild_id(raw: u64) -> Option<serenity::GuildId> {
    (raw != 0).then(|| serenity::GuildId::new(raw))
}

fn channel_id(raw: u64) -> Option<serenity::ChannelId> {
    (raw != 0).then(|| serenity::ChannelId::new(raw))
}

impl From<ChannelData> for ChannelConfig {
    fn from(data: ChannelData) -> Self {
        let mut servers: BTreeMap<serenity::GuildId, ServerConfig> = BTreeMap::new();

        for (guild, channel) in data.monitored_channels {
            if let (Some(guild), Some(channel)) = (guild_id(guild), channel_id(channel)) {
                servers.entry(guild).or_default().monitored_channel = Some(channel);
            }
        }
        for (guild, channel) in data.repost_channels {
            if let (Some(guild), Some(channel)) = (guild_id(guild), channel_id(channel)) {
                servers.entry(guild).or_default().repost_channel = Some(channel);
            }
        }

        Self {
            servers,
            debug: DebugConfig {
                channel: data.debug_channel_id.and_then(channel_id),
                visible: data.show_debug_info,
            },
        }
    }
}

impl From<&ChannelConfig> for ChannelData {
    fn from(config: &ChannelConfig) -> Self {
        let mut data = ChannelData {
            debug_channel_id: config.debug.channel.map(|c| c.get()),
            show_debug_info: config.debug.visible,
            ..Default::default()
        };

        for (guild, server) in &config.servers {
            if let Some(channel) = server.monitored_channel {
                data.monitored_channels.insert(guild.get(), channel.get());
            }
            if let Some(channel) = server.repost_channel {
                data.repost_channels.insert(guild.get(), channel.get());
            }
        }

        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_legacy_file_without_debug_flag() {
        let json = r#"{
            "monitored_channels": {"111": 222},
            "repost_channels": {"111": 333},
            "debug_channel_id": 444
        }"#;
        let data: ChannelData = serde_json::from_str(json).unwrap();
        assert_eq!(data.monitored_channels.get(&111), Some(&222));
        assert_eq!(data.repost_channels.get(&111), Some(&333));
        assert_eq!(data.debug_channel_id, Some(444));
        assert!(!data.show_debug_info);
    }

    #[test]
    fn test_parses_empty_object() {
        let data: ChannelData = serde_json::from_str("{}").unwrap();
        assert_eq!(data, ChannelData::default());
    }

    #[test]
    fn test_writes_all_four_keys() {
        let value = serde_json::to_value(ChannelData::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("monitored_channels"));
        assert!(obj.contains_key("repost_channels"));
        assert!(obj.contains_key("debug_channel_id"));
        assert_eq!(obj.get("show_debug_info"), Some(&serde_json::Value::Bool(false)));
    }

    #[test]
    fn test_config_from_data() {
        let mut data = ChannelData::default();
        data.monitored_channels.insert(1, 10);
        data.repost_channels.insert(2, 20);
        data.debug_channel_id = Some(30);
        data.show_debug_info = true;

        let config = ChannelConfig::from(data);
        let g1 = config.servers.get(&serenity::GuildId::new(1)).unwrap();
        assert_eq!(g1.monitored_channel, Some(serenity::ChannelId::new(10)));
        assert_eq!(g1.repost_channel, None);
        let g2 = config.servers.get(&serenity::GuildId::new(2)).unwrap();
        assert_eq!(g2.repost_channel, Some(serenity::ChannelId::new(20)));
        assert_eq!(config.debug.channel, Some(serenity::ChannelId::new(30)));
        assert!(config.debug.visible);
    }

    #[test]
    fn test_zero_ids_are_dropped() {
        let mut data = ChannelData::default();
        data.monitored_channels.insert(0, 10);
        data.repost_channels.insert(5, 0);
        data.debug_channel_id = Some(0);

        let config = ChannelConfig::from(data);
        assert!(config.servers.is_empty());
        assert_eq!(config.debug.channel, None);
    }

    #[test]
    fn test_data_config_round_trip() {
        let mut data = ChannelData::default();
        data.monitored_channels.insert(1, 10);
        data.monitored_channels.insert(2, 11);
        data.repost_channels.insert(1, 20);
        data.debug_channel_id = Some(99);

        let config = ChannelConfig::from(data.clone());
        assert_eq!(ChannelData::from(&config), data);
        assert_eq!(
            config.monitored_channels().map(|c| c.get()).collect::<Vec<_>>(),
            vec![10, 11]
        );
        assert_eq!(config.repost_channels().map(|c| c.get()).collect::<Vec<_>>(), vec![20]);
    }
}
