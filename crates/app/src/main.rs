use std::fmt;
use std::sync::Arc;

use diagnostic_core::model::{DiagnosticId, ParseDeadlineError, RegulatoryDeadline, SectionState};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock, DiagnosticConfig, OnboardingStore, ReadingProgressStore};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDiagnosticId { raw: String },
    InvalidDbUrl { raw: String },
    InvalidDeadline { source: ParseDeadlineError },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDiagnosticId { raw } => {
                write!(f, "invalid --diagnostic value: {raw}")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidDeadline { source } => write!(f, "invalid --deadline value: {source}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    onboarding_pending: bool,
}

impl UiApp for DesktopApp {
    fn diagnostic_id(&self) -> DiagnosticId {
        self.services.config().diagnostic_id.clone()
    }

    fn onboarding_pending(&self) -> bool {
        self.onboarding_pending
    }

    fn reading_progress(&self) -> Arc<ReadingProgressStore> {
        self.services.reading_progress()
    }

    fn onboarding(&self) -> Arc<OnboardingStore> {
        self.services.onboarding()
    }
}

struct Args {
    db_url: String,
    diagnostic_id: DiagnosticId,
    deadlines: Vec<RegulatoryDeadline>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui       [--db <sqlite_url>] [--diagnostic <id>]");
    eprintln!("  cargo run -p app -- progress [--db <sqlite_url>] [--diagnostic <id>]");
    eprintln!("  cargo run -p app -- reset    [--db <sqlite_url>] [--diagnostic <id>]");
    eprintln!("  cargo run -p app -- list     [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- forget   [--db <sqlite_url>] [--diagnostic <id>]");
    eprintln!("  cargo run -p app -- deadlines --deadline <label>=<YYYY-MM-DD> [--deadline ...]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:diagnostic.sqlite3");
    eprintln!("  --diagnostic default");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CLIMATE_DB_URL, CLIMATE_DIAGNOSTIC_ID, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Progress,
    Reset,
    List,
    Forget,
    Deadlines,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "progress" => Some(Self::Progress),
            "reset" => Some(Self::Reset),
            "list" => Some(Self::List),
            "forget" => Some(Self::Forget),
            "deadlines" => Some(Self::Deadlines),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("CLIMATE_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url("sqlite:diagnostic.sqlite3".into()), normalize_sqlite_url);
        let mut diagnostic_id = match std::env::var("CLIMATE_DIAGNOSTIC_ID") {
            Ok(raw) => DiagnosticId::new(raw.clone())
                .map_err(|_| ArgsError::InvalidDiagnosticId { raw })?,
            Err(_) => DiagnosticId::default(),
        };
        let mut deadlines = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--diagnostic" => {
                    let value = require_value(args, "--diagnostic")?;
                    diagnostic_id = DiagnosticId::new(value.clone())
                        .map_err(|_| ArgsError::InvalidDiagnosticId { raw: value })?;
                }
                "--deadline" => {
                    let value = require_value(args, "--deadline")?;
                    let deadline = value
                        .parse::<RegulatoryDeadline>()
                        .map_err(|source| ArgsError::InvalidDeadline { source })?;
                    deadlines.push(deadline);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            diagnostic_id,
            deadlines,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (e.g. under a test runner) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    prepare_sqlite_file(&parsed.db_url)?;
    let config = DiagnosticConfig::for_diagnostic(parsed.diagnostic_id.clone());
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::system(), config).await?;
    info!(db = %parsed.db_url, diagnostic = %parsed.diagnostic_id, ?cmd, "starting");

    match cmd {
        Command::Ui => {
            let onboarding_pending = !services.onboarding().state().await.is_completed();
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                services,
                onboarding_pending,
            });
            let context = build_app_context(&app);

            // Some dev setups default to an always-on-top window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Diagnostic climat")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Progress => {
            let progress = services.reading_progress().progress().await;
            for (section, state) in progress.iter() {
                let marker = match state {
                    SectionState::Locked => " ",
                    SectionState::Unread => "*",
                    SectionState::Read => "x",
                };
                println!("[{marker}] section {section}: {state}");
            }
            println!(
                "{} / {} read{}",
                progress.read_count(),
                progress.section_count(),
                if progress.all_read() { " (complete)" } else { "" }
            );
            Ok(())
        }
        Command::Reset => {
            services.reading_progress().reset_progress().await;
            services.onboarding().restart().await;
            println!("reset progress and onboarding for {}", parsed.diagnostic_id);
            Ok(())
        }
        Command::List => {
            for diagnostic in services.directory().list().await? {
                println!("{diagnostic}");
            }
            Ok(())
        }
        Command::Forget => {
            let removed = services.directory().forget(&parsed.diagnostic_id).await?;
            println!("removed {removed} entries for {}", parsed.diagnostic_id);
            Ok(())
        }
        Command::Deadlines => {
            if parsed.deadlines.is_empty() {
                eprintln!("no deadlines given; pass --deadline <label>=<YYYY-MM-DD>");
                return Ok(());
            }
            let deadlines = services.deadlines();
            for item in deadlines.classify(&parsed.deadlines) {
                println!(
                    "{:<9} {:>5} j  {} ({})",
                    item.urgency.label(),
                    item.days_remaining,
                    item.deadline.label,
                    item.deadline.due_on
                );
            }
            match deadlines.next_due(&parsed.deadlines) {
                Some(next) => println!(
                    "next: {} in {} days",
                    next.deadline.label, next.days_remaining
                ),
                None => println!("next: none, every deadline has passed"),
            }
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
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

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
