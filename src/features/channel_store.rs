// Channel Store
// Owns the channel configuration and keeps channel_data.json in sync with it

use poise::serenity_prelude as serenity;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::models::channel_config::{ChannelConfig, ChannelData, ServerConfig};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize channel data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// In-memory channel configuration backed by a JSON file.
///
/// Memory is authoritative: every setter rewrites the whole file.
#[derive(Debug)]
pub struct ChannelStore {
    path: PathBuf,
    config: ChannelConfig,
}

impl ChannelStore {
    /// Load the store from `path`. A missing file gives an empty configuration.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let config = match fs::read_to_string(&path) {
            Ok(content) => {
                let data: ChannelData = serde_json::from_str(&content).map_err(|source| {
                    StoreError::Parse {
                        path: path.clone(),
                        source,
                    }
                })?;
                ChannelConfig::from(data)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No channel data at {}, starting empty", path.display());
                ChannelConfig::default()
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        Ok(Self { path, config })
    }

    /// Write the full configuration to disk, replacing the previous file
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.state())?;
        write_replace(&self.path, json.as_bytes()).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("Saved channel data to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// The configuration in its on-disk form
    pub fn state(&self) -> ChannelData {
        ChannelData::from(&self.config)
    }

    pub fn monitored_channels(&self) -> impl Iterator<Item = serenity::ChannelId> + '_ {
        self.config.monitored_channels()
    }

    pub fn repost_channels(&self) -> impl Iterator<Item = serenity::ChannelId> + '_ {
        self.config.repost_channels()
    }

    pub fn debug_channel(&self) -> Option<serenity::ChannelId> {
        self.config.debug.channel
    }

    pub fn debug_visible(&self) -> bool {
        self.config.debug.visible
    }

    pub fn server(&self, guild_id: serenity::GuildId) -> Option<&ServerConfig> {
        self.config.servers.get(&guild_id)
    }

    pub fn monitored_channel(&self, guild_id: serenity::GuildId) -> Option<serenity::ChannelId> {
        self.server(guild_id).and_then(|s| s.monitored_channel)
    }

    pub fn repost_channel(&self, guild_id: serenity::GuildId) -> Option<serenity::ChannelId> {
        self.server(guild_id).and_then(|s| s.repost_channel)
    }

    /// Whether `channel_id` is the monitored channel of any guild
    pub fn is_monitored(&self, channel_id: serenity::ChannelId) -> bool {
        self.monitored_channels().any(|c| c == channel_id)
    }

    pub fn set_monitored_channel(
        &mut self,
        guild_id: serenity::GuildId,
        channel_id: serenity::ChannelId,
    ) -> Result<(), StoreError> {
        self.config.servers.entry(guild_id).or_default().monitored_channel = Some(channel_id);
        self.save()
    }

    pub fn set_repost_channel(
        &mut self,
        guild_id: serenity::GuildId,
        channel_id: serenity::ChannelId,
    ) -> Result<(), StoreError> {
        self.config.servers.entry(guild_id).or_default().repost_channel = Some(channel_id);
        self.save()
    }

    pub fn set_debug_channel(&mut self, channel_id: serenity::ChannelId) -> Result<(), StoreError> {
        self.config.debug.channel = Some(channel_id);
        self.save()
    }

    /// Flip debug visibility and return the new value
    pub fn toggle_debug_visibility(&mut self) -> Result<bool, StoreError> {
        self.config.debug.visible = !self.config.debug.visible;
        self.save()?;
        Ok(self.config.debug.visible)
    }
}

/// Write to a sibling temp file, then rename it over `path`
fn write_replace(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}
