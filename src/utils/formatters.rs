// Formatting utilities

use poise::serenity_prelude as serenity;
use serenity::Mentionable;

/// Truncate string to at most `max_chars` characters, ending with an ellipsis
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Wrap text in a Discord code block
pub fn code_block(s: &str) -> String {
    format!("```{}```", s)
}

/// Mention a channel, or show its raw ID when it no longer resolves
pub fn channel_label(channel_id: serenity::ChannelId, resolved: bool) -> String {
    if resolved {
        channel_id.mention().to_string()
    } else {
        format!("unknown ({})", channel_id)
    }
}

/// Join labels with commas, or "none" when empty
pub fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Join raw IDs with commas
pub fn id_list(ids: impl IntoIterator<Item = serenity::ChannelId>) -> String {
    ids.into_iter()
        .map(|c| c.get().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("こんにちは世界", 5), "こん...");
    }

    #[test]
    fn test_code_block() {
        assert_eq!(code_block("a\nb\n"), "```a\nb\n```");
    }

    #[test]
    fn test_channel_label() {
        assert_eq!(channel_label(serenity::ChannelId::new(1), true), "<#1>");
        assert_eq!(channel_label(serenity::ChannelId::new(1), false), "unknown (1)");
    }

    #[test]
    fn test_join_or_none() {
        assert_eq!(join_or_none(&["<#1>".to_string(), "<#2>".to_string()]), "<#1>, <#2>");
        assert_eq!(join_or_none(&[]), "none");
    }

    #[test]
    fn test_id_list() {
        let ids = vec![serenity::ChannelId::new(5), serenity::ChannelId::new(6)];
        assert_eq!(id_list(ids), "5, 6");
        assert_eq!(id_list(Vec::new()), "");
    }
}
