//! Headless replay driver.
//!
//! Reads newline-delimited JSON chat messages from stdin, decorates them
//! with the message parser and prints each decorated message as a JSON line
//! on stdout. Image requests are logged instead of fetched.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use message_parser::{
    AssetTables, ChannelSink, ChatMessage, MessageParser, ParserConfig, QueuedImageStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Step 1: Environment + tracing (stdout carries the output stream)
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Step 2: Config and asset tables
    let config = ParserConfig::from_env();
    let tables = load_tables()?;
    tracing::info!(
        bttv = tables.bttv.len(),
        ffz = tables.ffz.len(),
        badges = tables.badges.len(),
        emoji = tables.emoji.len(),
        "Asset tables loaded"
    );

    // Step 3: Queues and parser
    let (images, mut image_rx) = QueuedImageStore::new();
    let (sink, mut sink_rx) = ChannelSink::new();
    let parser = MessageParser::new(
        tables.into_collaborators(&config, Arc::new(images)),
        Arc::new(sink),
    );

    let image_worker = tokio::spawn(async move {
        let mut requested = 0usize;
        while let Some(request) = image_rx.recv().await {
            tracing::info!(
                key = %request.key,
                class = ?request.class,
                owner_id = %request.owner_id,
                direct = request.direct,
                "Image requested"
            );
            requested += 1;
        }
        requested
    });

    let render_worker = tokio::spawn(async move {
        while let Some(message) = sink_rx.recv().await {
            match serde_json::to_string(&message) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(message_id = %message.id, "Failed to encode message: {e}"),
            }
        }
    });

    // Step 4: Replay stdin
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut parsed = 0usize;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let mut message: ChatMessage = match serde_json::from_str(&line) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Skipping malformed input line: {e}");
                continue;
            }
        };
        if message.created_at == 0 {
            message.created_at = chrono::Utc::now().timestamp();
        }
        parser.parse(message);
        parsed += 1;
    }

    // Dropping the parser closes both queues so the workers can finish.
    drop(parser);
    render_worker.await?;
    let requested = image_worker.await?;

    tracing::info!(parsed, requested, "Replay finished");
    Ok(())
}

fn load_tables() -> anyhow::Result<AssetTables> {
    let Ok(path) = std::env::var("ASSET_TABLES_PATH") else {
        tracing::warn!("ASSET_TABLES_PATH not set, only native emotes will resolve");
        return Ok(AssetTables::default());
    };
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read asset tables from {path}"))?;
    AssetTables::from_json(&raw).with_context(|| format!("invalid asset tables in {path}"))
}
