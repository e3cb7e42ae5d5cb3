use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::story_service::{Narrator, StoryTeller};
use services::{HttpProgressClient, ProgressConfig, ProgressStore};
use storage::{InMemorySessionStore, SessionStore};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
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
    username: Option<String>,
    session_store: Arc<dyn SessionStore>,
    progress: Arc<dyn ProgressStore>,
    narrator: Arc<dyn Narrator>,
}

impl UiApp for DesktopApp {
    fn initial_username(&self) -> Option<String> {
        self.username.clone()
    }

    fn session_store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.session_store)
    }

    fn progress(&self) -> Arc<dyn ProgressStore> {
        Arc::clone(&self.progress)
    }

    fn narrator(&self) -> Arc<dyn Narrator> {
        Arc::clone(&self.narrator)
    }
}

struct Args {
    api_url: String,
    username: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--username <name>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url http://localhost:3000");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MATHCAT_API_URL, MATHCAT_USERNAME");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_url = ProgressConfig::from_env().base_url;
        let mut username = std::env::var("MATHCAT_USERNAME")
            .ok()
            .filter(|value| !value.trim().is_empty());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    if !value.starts_with("http://") && !value.starts_with("https://") {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api_url = value;
                }
                "--username" => {
                    let value = require_value(args, "--username")?;
                    username = Some(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { api_url, username })
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let progress = HttpProgressClient::new(ProgressConfig::new(parsed.api_url));
    let app = DesktopApp {
        username: parsed.username,
        session_store: Arc::new(InMemorySessionStore::new()),
        progress: Arc::new(progress),
        narrator: Arc::new(StoryTeller),
    };

    let app: Arc<dyn UiApp> = Arc::new(app);
    let context = build_app_context(&app);

    // Explicitly keep the window ordinary; some dev setups default desktop
    // windows to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("MathCat")
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
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
