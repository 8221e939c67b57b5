//! LINE Bot - Main Entry Point
//!
//! Demo bot: greets new followers and logs unfollows.

use std::sync::Arc;

use anyhow::{Context, Result};
use line_bot::messaging::{HttpTransport, MessagingClient};
use line_bot::webhook::{Dispatcher, ListenerResult};
use line_bot::{api, config};
use line_common::{Message, PushMessageRequest, WebhookEvent};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "line_bot=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting LINE bot");

    let transport =
        HttpTransport::from_config(&config).context("Failed to build Messaging API transport")?;
    let messaging = Arc::new(MessagingClient::new(transport));

    // Register listeners
    let mut dispatcher = Dispatcher::new(config.channel_secret.clone());
    dispatcher
        .on_follow(move |_cancel, event| {
            let messaging = Arc::clone(&messaging);
            async move { greet(&messaging, &event).await }
        })
        .on_unfollow(|_cancel, event| async move {
            info!(
                chat_id = event.source().chat_id(),
                event_id = event.webhook_event_id(),
                "Bot was unfollowed"
            );
            Ok(())
        });

    let bind_address = config.bind_address.clone();
    let app = api::create_router(api::AppState::new(config, dispatcher));

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Push a greeting to whoever followed the bot.
async fn greet(
    messaging: &MessagingClient<HttpTransport>,
    event: &WebhookEvent,
) -> ListenerResult {
    let source = event.source();
    let name = match source.user_id() {
        Some(user_id) => messaging.profile(user_id).await?.display_name,
        None => "there".to_string(),
    };

    let request = PushMessageRequest::new(
        source.chat_id(),
        vec![
            Message::text(format!("Hello, {name}! Thanks for adding me.")),
            Message::sticker("446", "1988"),
        ],
    );
    let response = messaging.push(&request).await?;
    info!(
        sent = response.sent_messages.len(),
        unblocked = event.as_follow().is_some_and(|f| f.follow.is_unblocked),
        "Greeted new follower"
    );
    Ok(())
}
