use std::sync::Arc;

use anyhow::Context;

use line_reply_bot::channels::LineClient;
use line_reply_bot::config::BotConfig;
use line_reply_bot::pipeline::EventProcessor;
use line_reply_bot::replies::{ThreadRandom, load_table};
use line_reply_bot::webhook::{WebhookState, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = BotConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("  export LINE_CHANNEL_ACCESS_TOKEN=...");
        eprintln!("  export LINE_CHANNEL_SECRET=...");
        std::process::exit(1);
    });

    eprintln!("💌 LINE Reply Bot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Webhook: http://0.0.0.0:{}{}", config.port, config.webhook_path);
    eprintln!("   Reply API: {}", config.api_base_url);

    // ── Reply table ─────────────────────────────────────────────────────
    // A malformed table must stop startup before the listener is bound.
    let table = load_table(&config).context("loading reply table")?;
    eprintln!(
        "   Replies: {} keyword rules, {} fallback replies",
        table.rules().len(),
        table.fallback().len()
    );

    // ── Pipeline ────────────────────────────────────────────────────────
    let sender = Arc::new(LineClient::new(
        config.channel_access_token.clone(),
        config.api_base_url.clone(),
    ));
    let processor = Arc::new(EventProcessor::new(
        Arc::new(table),
        Arc::new(ThreadRandom),
        sender,
    ));

    let app = routes(
        WebhookState {
            processor,
            channel_secret: config.channel_secret.clone(),
        },
        &config.webhook_path,
    );

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("binding port {}", config.port))?;
    tracing::info!(port = config.port, "Webhook server started");
    axum::serve(listener, app).await?;

    Ok(())
}
