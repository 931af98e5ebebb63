//! Vocabulary Worksheet Server - Entry point
//!
//! Serves the word-list form and generates worksheet PDFs.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_worksheet::run_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vocab_worksheet=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting vocabulary worksheet server");

    run_server().await
}
