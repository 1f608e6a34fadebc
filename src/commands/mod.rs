// Bot commands
pub mod channels;
pub mod debug;
pub mod help;

use poise::serenity_prelude as serenity;
use tracing::debug;

use crate::features::channel_store::ChannelStore;
use crate::features::classifier::{classify, MessageFacts, Verdict};
use crate::{Context, Data, Error};

/// Every command the bot registers
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        channels::set_monitored_channel(),
        channels::set_repost_channel(),
        channels::set_debug_channel(),
        debug::toggle_debug_info(),
        debug::show_debug_info(),
        debug::debug_channels(),
        help::help(),
    ]
}

/// Global command check: a prefix command posted as a violating message is
/// removed by the upload guard and must not run.
pub async fn upload_gate(ctx: Context<'_>) -> Result<bool, Error> {
    let poise::Context::Prefix(prefix_ctx) = ctx else {
        return Ok(true);
    };

    let facts = MessageFacts::from(prefix_ctx.msg);
    let store = ctx.data().store.read().await;
    let allowed = accepts_command(&facts, ctx.framework().bot_id, &store);
    if !allowed {
        debug!("Ignoring command in removed message {}", facts.id);
    }
    Ok(allowed)
}

/// Whether a prefix command carried by `facts` may run
pub fn accepts_command(
    facts: &MessageFacts,
    bot_id: serenity::UserId,
    store: &ChannelStore,
) -> bool {
    classify(facts, bot_id, store) != Verdict::Violating
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    use crate::features::classifier::policy_cutoff;

    const BOT: u64 = 900;
    const MONITORED: u64 = 10;

    fn monitored_store(dir: &TempDir) -> ChannelStore {
        let mut store = ChannelStore::load(dir.path().join("channel_data.json")).unwrap();
        store
            .set_monitored_channel(serenity::GuildId::new(1), serenity::ChannelId::new(MONITORED))
            .unwrap();
        store
    }

    fn command_message(content: &str, channel: u64) -> MessageFacts {
        MessageFacts {
            id: serenity::MessageId::new(77),
            author_id: serenity::UserId::new(42),
            channel_id: serenity::ChannelId::new(channel),
            guild_id: Some(serenity::GuildId::new(1)),
            content: content.to_string(),
            attachment_count: 0,
            created_at: policy_cutoff() + Duration::hours(1),
        }
    }

    #[test]
    fn test_command_in_removed_message_is_blocked() {
        let dir = TempDir::new().unwrap();
        let store = monitored_store(&dir);
        let msg = command_message("!set_monitored_channel <#10>", MONITORED);
        assert!(!accepts_command(&msg, serenity::UserId::new(BOT), &store));
    }

    #[test]
    fn test_command_with_link_runs() {
        let dir = TempDir::new().unwrap();
        let store = monitored_store(&dir);
        let msg = command_message("!set_monitored_channel <#10> https://example.com", MONITORED);
        assert!(accepts_command(&msg, serenity::UserId::new(BOT), &store));
    }

    #[test]
    fn test_command_outside_monitored_channel_runs() {
        let dir = TempDir::new().unwrap();
        let store = monitored_store(&dir);
        let msg = command_message("!set_monitored_channel <#10>", 11);
        assert!(accepts_command(&msg, serenity::UserId::new(BOT), &store));
    }

    fn find(name: &str) -> poise::Command<Data, Error> {
        all()
            .into_iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("command {} not registered", name))
    }

    #[test]
    fn test_setup_commands_need_kick_members() {
        for name in ["set_monitored_channel", "set_repost_channel", "set_debug_channel"] {
            let cmd = find(name);
            assert!(
                cmd.required_permissions.contains(serenity::Permissions::KICK_MEMBERS),
                "{} must require KICK_MEMBERS",
                name
            );
            assert!(cmd.guild_only, "{} must be guild only", name);
            assert!(!cmd.owners_only);
        }
    }

    #[test]
    fn test_debug_toggles_are_owner_only() {
        for name in ["toggle_debug_info", "show_debug_info"] {
            assert!(find(name).owners_only, "{} must be owner only", name);
        }
    }

    #[test]
    fn test_debug_listing_needs_kick_members() {
        let cmd = find("debug_channels");
        assert!(cmd.required_permissions.contains(serenity::Permissions::KICK_MEMBERS));
    }

    #[test]
    fn test_help_is_public() {
        let cmd = find("help");
        assert!(cmd.required_permissions.is_empty());
        assert!(!cmd.owners_only);
    }
}
