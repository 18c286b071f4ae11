use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use guide_core::model::{
    AdviceSettings, AdviceSettingsDraft, EndOfCatalog, NavigationPolicy, StepCatalog,
};
use services::{AdviceRelay, AppServices, AppServicesError, Clock, GuideState, ProgressStore};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://jamb-guide.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidFlagValue { name: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidFlagValue { name, raw } => {
                write!(f, "invalid value for {name}: {raw} (expected true/false)")
            }
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [ui] [--db <sqlite_url>] [--complete-on-advance] [--finish-at-end]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GUIDE_DB_URL, GUIDE_COMPLETE_ON_ADVANCE, GUIDE_FINISH_AT_END");
    eprintln!("  GUIDE_AI_API_KEY, GUIDE_AI_BASE_URL, GUIDE_AI_MODEL");
    eprintln!("  RUST_LOG (default: info)");
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    db_url: String,
    policy: NavigationPolicy,
}

impl Args {
    /// Parse `ui` arguments on top of environment defaults. `Ok(None)` means help was requested.
    fn parse(
        argv: Vec<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut args = argv.into_iter().peekable();
        match args.peek().map(String::as_str) {
            Some("ui") => {
                args.next();
            }
            Some(first) if !first.starts_with('-') => {
                return Err(ArgsError::UnknownCommand(first.to_string()));
            }
            _ => {}
        }

        let mut db_url =
            env("GUIDE_DB_URL").map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut complete_on_advance = env_flag(&env, "GUIDE_COMPLETE_ON_ADVANCE")?;
        let mut finish_at_end = env_flag(&env, "GUIDE_FINISH_AT_END")?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--complete-on-advance" => complete_on_advance = true,
                "--finish-at-end" => finish_at_end = true,
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let end_of_catalog = if finish_at_end {
            EndOfCatalog::Finish
        } else {
            EndOfCatalog::Clamp
        };
        Ok(Some(Self {
            db_url,
            policy: NavigationPolicy {
                end_of_catalog,
                complete_on_advance,
            },
        }))
    }
}

fn env_flag(env: &impl Fn(&str) -> Option<String>, name: &'static str) -> Result<bool, ArgsError> {
    let Some(raw) = env(name) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => Err(ArgsError::InvalidFlagValue { name, raw }),
    }
}

fn advice_settings_from_env(
    env: impl Fn(&str) -> Option<String>,
) -> Result<AdviceSettings, AppServicesError> {
    let draft = AdviceSettingsDraft {
        api_key: env("GUIDE_AI_API_KEY"),
        model: env("GUIDE_AI_MODEL"),
        base_url: env("GUIDE_AI_BASE_URL"),
        system_instruction: None,
    };
    Ok(draft.validate()?)
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

struct DesktopApp {
    services: AppServices,
    initial_state: GuideState,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<StepCatalog> {
        self.services.catalog()
    }

    fn initial_state(&self) -> GuideState {
        self.initial_state.clone()
    }

    fn progress_store(&self) -> Arc<ProgressStore> {
        self.services.progress_store()
    }

    fn advice(&self) -> Arc<AdviceRelay> {
        self.services.advice()
    }
}

/// Open `SQLite` storage; on failure the guide still runs with in-memory progress.
async fn build_services(
    args: &Args,
    clock: Clock,
    settings: AdviceSettings,
) -> Result<AppServices, Box<dyn std::error::Error>> {
    let opened = match prepare_sqlite_file(&args.db_url) {
        Ok(()) => AppServices::new_sqlite(&args.db_url, clock, settings.clone(), args.policy)
            .await
            .map_err(|err| err.to_string()),
        Err(err) => Err(err.to_string()),
    };

    match opened {
        Ok(services) => Ok(services),
        Err(reason) => {
            warn!(db_url = %args.db_url, %reason, "progress storage unavailable");
            Ok(AppServices::without_storage(reason, clock, settings, args.policy)?)
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = Args::parse(argv, |name| std::env::var(name).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?
    else {
        print_usage();
        return Ok(());
    };

    let settings = advice_settings_from_env(|name| std::env::var(name).ok())?;
    let services = build_services(&args, Clock::system(), settings).await?;
    let initial_state = services.initial_state().await;
    info!(
        db_url = %args.db_url,
        completed = initial_state.progress().state().completed_count(),
        "launching guide"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        initial_state,
    });
    let context = build_app_context(&app);

    // Some dev setups default tao windows to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("JAMB 2026 Registration Guide")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
