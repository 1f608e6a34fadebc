// Help command - show usage guide

use poise::serenity_prelude as serenity;
use crate::{Context, Error};
use crate::utils::config::colors;

/// Show help and usage guide
#[poise::command(slash_command, prefix_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let p = &ctx.data().prefix;

    let embed = serenity::CreateEmbed::new()
        .title("📤 Upload Guard - Help")
        .description("Keeps upload channels for attachments and links only")
        .color(colors::PRIMARY)
        .field(
            "⚙️ Setup (Kick Members)",
            format!(
                "`{p}set_monitored_channel #channel` - Only uploads allowed here\n\
                `{p}set_repost_channel #channel` - Removed messages are reposted here\n\
                `{p}set_debug_channel #channel` - Where debug reports go"
            ),
            false,
        )
        .field(
            "🔍 Debug",
            format!(
                "`{p}debug_channels` - List configured channel IDs\n\
                `{p}show_debug_info` - Show all channels (owner)\n\
                `{p}toggle_debug_info` - Post reports to the debug channel (owner)"
            ),
            false,
        )
        .field(
            "📏 Rule",
            "Messages in the monitored channel need an attachment or a link. \
            Anything else is removed and reposted to the repost channel.",
            false,
        )
        .footer(serenity::CreateEmbedFooter::new(
            "Rust Edition • Built with Serenity & Poise",
        ));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
