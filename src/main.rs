// Upload Guard Bot - Rust Edition
// Keeps upload channels for attachments and links only

mod commands;
mod features;
mod models;
mod utils;

use std::env;
use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::features::channel_store::ChannelStore;
use crate::features::debug_report::post_startup_report;
use crate::features::upload_guard::{self, SerenityGateway};
use crate::utils::config::BotConfig;

/// User data shared across all commands and events
#[derive(Debug)]
pub struct Data {
    pub store: Arc<RwLock<ChannelStore>>,
    pub prefix: String,
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Message { new_message } = event {
        upload_guard::handle_message(ctx, new_message, framework.bot_id, data).await;
    }
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Command error: {:?}", error);
            let _ = ctx.say(format!("❌ Error: {}", error)).await;
        }
        poise::FrameworkError::MissingUserPermissions { ctx, .. } => {
            warn!("{} lacks permissions for {}", ctx.author().id, ctx.command().name);
            let _ = ctx
                .say("You need the Kick Members permission to use this command.")
                .await;
        }
        poise::FrameworkError::NotAnOwner { ctx, .. } => {
            warn!("{} is not an owner, denied {}", ctx.author().id, ctx.command().name);
            let _ = ctx.say("Only the bot owner can use this command.").await;
        }
        poise::FrameworkError::CommandCheckFailed { error: None, ctx, .. } => {
            debug!("Command {} skipped by upload gate", ctx.command().name);
        }
        err => {
            error!("Framework error: {:?}", err);
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "uploadguard_rs=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = BotConfig::from_env().expect("Failed to read bot configuration");

    info!("Starting Upload Guard Bot (Rust Edition)...");

    let store = ChannelStore::load(&config.channel_data_path)
        .expect("Failed to load channel data");
    info!(
        "Loaded channel data from {} ({} monitored, {} repost channels)",
        store.path().display(),
        store.monitored_channels().count(),
        store.repost_channels().count()
    );
    info!(
        "Debug channel: {:?}, debug info visible: {}",
        store.debug_channel(),
        store.debug_visible()
    );
    let data = Data {
        store: Arc::new(RwLock::new(store)),
        prefix: config.prefix.clone(),
    };

    // Setup framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.prefix.clone()),
                ..Default::default()
            },
            owners: config.owners.clone(),
            command_check: Some(|ctx| Box::pin(commands::upload_gate(ctx))),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Commands registered successfully!");

                let snapshot = data.store.read().await.config().clone();
                post_startup_report(&SerenityGateway::new(ctx), &snapshot).await;

                Ok(data)
            })
        })
        .build();

    // MESSAGE_CONTENT is privileged, enable it in the Discord Dev Portal
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&config.token, intents)
        .framework(framework)
        .await
        .expect("Failed to create client");

    // Run with graceful shutdown
    let shard_manager = client.shard_manager.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to register Ctrl+C handler");
        info!("Shutting down...");
        shard_manager.shutdown_all().await;
    });

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }

    info!("Goodbye!");
}
