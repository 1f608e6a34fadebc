// Bot features: channel store, upload-only moderation and debug reporting
pub mod channel_store;
pub mod classifier;
pub mod debug_report;
pub mod upload_guard;
