// Data models
pub mod channel_config;
