use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppConfig, AppServices, Clock, HistoryStore, LessonService, LessonSource, QuizRunner,
    QuizSettings, ScoreHistoryService,
};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug, Parser)]
#[command(name = "vocab-quiz", version, about = "Multiple-choice vocabulary quiz")]
struct Args {
    /// Lesson document path, or a lesson server url (`http://...`).
    #[arg(long, env = "QUIZ_LESSONS", default_value = "data.json")]
    lessons: String,

    /// Score history database (`sqlite://...`, a file path, or `memory`).
    #[arg(long, env = "QUIZ_DB_URL", default_value = "sqlite://quiz.sqlite3")]
    db: String,

    /// Seconds allowed per question. Omit for no countdown.
    #[arg(long, env = "QUIZ_TIME_LIMIT_SECS")]
    time_limit: Option<u64>,

    /// Fixed shuffle seed for reproducible quizzes.
    #[arg(long, env = "QUIZ_SEED")]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<AppConfig> {
        let history = match HistoryStore::parse(&self.db) {
            HistoryStore::Memory => HistoryStore::Memory,
            HistoryStore::Sqlite(raw) => {
                let url = normalize_sqlite_url(&raw);
                prepare_sqlite_file(&url)?;
                HistoryStore::Sqlite(url)
            }
        };
        let quiz = QuizSettings::default()
            .with_time_limit(self.time_limit.filter(|s| *s > 0).map(Duration::from_secs));
        Ok(AppConfig {
            lessons: LessonSource::parse(&self.lessons),
            history,
            quiz,
            seed: self.seed,
        })
    }
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn lessons(&self) -> Arc<LessonService> {
        self.services.lessons()
    }

    fn history(&self) -> Arc<ScoreHistoryService> {
        self.services.history()
    }

    fn runner(&self) -> QuizRunner {
        self.services.runner()
    }
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> anyhow::Result<()> {
    let Some(path) = db_url.strip_prefix("sqlite://") else {
        bail!("invalid --db value: {db_url}");
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid --db value: {db_url}");
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config()?;
    tracing::info!(lessons = ?config.lessons, history = ?config.history, "starting quiz");
    let services = AppServices::bootstrap(config, Clock::system())
        .await
        .context("failed to start services")?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Vocabulary Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}
