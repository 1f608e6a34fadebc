// Debug commands - inspect the channel configuration

use tracing::{error, info};

use crate::features::debug_report::{
    channel_report, debug_channel_line, route_listing, visibility_line,
};
use crate::features::upload_guard::SerenityGateway;
use crate::{Context, Error};

/// Turn debug output in the debug channel on or off
#[poise::command(slash_command, prefix_command, owners_only)]
pub async fn toggle_debug_info(ctx: Context<'_>) -> Result<(), Error> {
    let result = ctx.data().store.write().await.toggle_debug_visibility();
    match result {
        Ok(visible) => {
            info!("Debug info visibility set to {} by {}", visible, ctx.author().id);
            ctx.say(visibility_line(visible)).await?;
        }
        Err(e) => {
            error!("Failed to save channel data: {:?}", e);
            ctx.say("Failed to save channel configuration.").await?;
        }
    }
    Ok(())
}

/// Show debug visibility and every configured channel
#[poise::command(slash_command, prefix_command, owners_only)]
pub async fn show_debug_info(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let config = ctx.data().store.read().await.config().clone();
    let gateway = SerenityGateway::new(ctx.serenity_context());

    ctx.say(visibility_line(config.debug.visible)).await?;
    for line in channel_report(&gateway, &config).await {
        ctx.say(line).await?;
    }
    ctx.say(debug_channel_line(&gateway, &config, &ctx.data().prefix).await)
        .await?;

    Ok(())
}

/// List the raw channel IDs, in the debug channel when debug info is visible
#[poise::command(
    slash_command,
    prefix_command,
    aliases("print_debug_info"),
    required_permissions = "KICK_MEMBERS"
)]
pub async fn debug_channels(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let config = ctx.data().store.read().await.config().clone();
    let gateway = SerenityGateway::new(ctx.serenity_context());

    for reply in route_listing(&gateway, &config, &ctx.data().prefix).await? {
        ctx.say(reply).await?;
    }
    Ok(())
}
