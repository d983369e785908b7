use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use services::LessonService;
use storage::lesson_file::LessonDocument;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "lesson-server",
    version,
    about = "Serve vocabulary lessons from a JSON document"
)]
struct Args {
    /// Lesson document: `{ "<lesson id>": { "<term>": "<translation>" } }`.
    #[arg(long, env = "QUIZ_DATA_FILE", default_value = "data.json")]
    data: PathBuf,

    /// Address to listen on.
    #[arg(long, env = "QUIZ_BIND", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let document = LessonDocument::load(&args.data)
        .with_context(|| format!("failed to load lessons from {}", args.data.display()))?;
    let lessons = LessonService::new(Arc::new(document.into_repository()));

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    tracing::info!(addr = %listener.local_addr()?, "lesson server listening");

    axum::serve(listener, lesson_server::router(lessons))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
