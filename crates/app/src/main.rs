use std::fmt;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, AppServicesError, ContentSource, DashboardService, ProgressService};
use storage::repository::Storage;
use tracker_core::model::Mode;
use tracker_core::progress::CatalogProgress;
use ui::{App, UiApp, build_app_context};

#[derive(Debug, Parser)]
#[command(author, version, about = "Track study progress across LLD and HLD curricula")]
struct Cli {
    /// SQLite database holding progress.
    #[arg(long = "db", env = "TRACKER_DB_URL", default_value = "sqlite://tracker.sqlite3", global = true)]
    db_url: String,

    /// Directory or http(s) base URL containing lld.json, hld.json and details.json.
    #[arg(long, env = "TRACKER_DATA", default_value = "data", global = true)]
    data: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Launch the desktop dashboard (default).
    Ui,
    /// Print overall and per-section progress.
    Status {
        /// Only report this mode.
        #[arg(long, value_parser = parse_mode)]
        mode: Option<Mode>,
    },
    /// Forget all progress recorded for one mode.
    Reset {
        #[arg(long, value_parser = parse_mode)]
        mode: Mode,
    },
}

fn parse_mode(raw: &str) -> Result<Mode, String> {
    Mode::parse(raw).ok_or_else(|| format!("expected LLD or HLD, got {raw:?}"))
}

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct DesktopApp {
    dashboard: Option<Arc<DashboardService>>,
    load_error: Option<String>,
}

impl UiApp for DesktopApp {
    fn dashboard(&self) -> Option<Arc<DashboardService>> {
        self.dashboard.clone()
    }

    fn load_error(&self) -> Option<String> {
        self.load_error.clone()
    }
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.contains("mode=memory") {
        return trimmed.to_string();
    }

    let rest = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let (path_str, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    if path_str.is_empty() {
        return trimmed.to_string();
    }

    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    match query {
        Some(query) => format!("sqlite://{}?{query}", absolute.display()),
        None => format!("sqlite://{}", absolute.display()),
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" || db_url.contains("mode=memory") {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn launch_ui(app: DesktopApp) {
    let app: Arc<dyn UiApp> = Arc::new(app);
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Study Tracker")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}

fn print_status(dashboard: &DashboardService, only: Option<Mode>) {
    let content = dashboard.content();
    let progress = dashboard.progress();
    let modes: Vec<Mode> = only.map_or_else(|| Mode::ALL.to_vec(), |mode| vec![mode]);

    for mode in modes {
        let catalog = content.catalog(mode);
        let record = progress.record(mode);
        let stats = CatalogProgress::compute(catalog, &record);
        let marker = if mode == progress.mode() { " (active)" } else { "" };
        println!(
            "{mode}{marker}: {}% ({}/{})",
            stats.global.percent(),
            stats.global.completed,
            stats.global.total
        );
        for (idx, section) in catalog.sections().iter().enumerate() {
            let section_stats = stats.section(idx);
            println!(
                "  {:>3}%  {:>3}/{:<3} {}",
                section_stats.percent(),
                section_stats.completed,
                section_stats.total,
                section.title
            );
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Ui);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    let db_url = normalize_sqlite_url(&cli.db_url);
    prepare_sqlite_file(&db_url)?;

    if let Command::Reset { mode } = command {
        let storage = Storage::sqlite(&db_url).await?;
        let progress = ProgressService::load(storage.kv).await;
        progress.reset(mode).await?;
        println!("{mode} progress cleared");
        return Ok(());
    }

    let source = ContentSource::parse(&cli.data)?;
    tracing::info!(db = %db_url, data = %source, "starting");

    match (AppServices::new_sqlite(&db_url, &source).await, command) {
        (Ok(services), Command::Ui) => {
            launch_ui(DesktopApp {
                dashboard: Some(services.dashboard()),
                load_error: None,
            });
            Ok(())
        }
        (Ok(services), Command::Status { mode }) => {
            print_status(&services.dashboard(), mode);
            Ok(())
        }
        (Err(AppServicesError::Load(err)), Command::Ui) => {
            tracing::error!(error = %err, "content failed to load");
            launch_ui(DesktopApp {
                dashboard: None,
                load_error: Some(err.to_string()),
            });
            Ok(())
        }
        (Err(err), _) => Err(err.into()),
        (Ok(_), Command::Reset { .. }) => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
