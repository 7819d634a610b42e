mod input;
mod render;

use std::fmt;
use std::sync::Arc;

use guess_core::Language;
use services::{Collaborators, GameConfig, GameHandle, GameSession, HttpGameApi, ServiceConfig};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use input::Input;

const LANG_ENV: &str = "GUESS_LANG";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLanguage { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLanguage { raw } => {
                write!(f, "invalid --lang value: {raw} (expected en or zh)")
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
    eprintln!("  cargo run -p app -- [--api-url <url>] [--lang <en|zh>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url http://localhost:8888/api");
    eprintln!("  --lang en");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GUESS_API_URL, GUESS_REQUEST_TIMEOUT_SECS, GUESS_LANG, RUST_LOG");
}

struct Args {
    api_url: Option<String>,
    language: Language,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_url = None;
        let mut language = match std::env::var(LANG_ENV) {
            Ok(raw) if !raw.trim().is_empty() => parse_language(raw)?,
            _ => Language::default(),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => api_url = Some(require_value(args, "--api-url")?),
                "--lang" => language = parse_language(require_value(args, "--lang")?)?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { api_url, language })
    }
}

fn parse_language(raw: String) -> Result<Language, ArgsError> {
    raw.parse()
        .map_err(|_| ArgsError::InvalidLanguage { raw })
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "services=info,app=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let mut config = ServiceConfig::from_env()?;
    if let Some(api_url) = &args.api_url {
        config = config.with_base_url(api_url)?;
    }
    tracing::info!(base_url = %config.base_url, "using game API");

    let api = Arc::new(HttpGameApi::new(&config)?);
    // An unhealthy backend still gets a chance; each round reports its own errors.
    if let Err(err) = api.health().await {
        tracing::warn!(error = %err, "health check failed");
    }

    let session = GameSession::spawn(
        Collaborators::from_api(&api),
        GameConfig::default(),
        args.language,
    );
    let handle = session.handle();
    let renderer = tokio::spawn(render_loop(handle.clone()));

    handle.start_new_round()?;
    read_input(&handle).await?;

    session.shutdown().await?;
    renderer.await?;
    Ok(())
}

/// Redraw whenever the session publishes a new snapshot.
async fn render_loop(handle: GameHandle) {
    let mut snapshots = handle.subscribe();
    let mut stdout = tokio::io::stdout();
    loop {
        let frame = render::frame(&snapshots.borrow_and_update());
        if stdout.write_all(format!("\n{frame}").as_bytes()).await.is_err() {
            break;
        }
        let _ = stdout.flush().await;
        if snapshots.changed().await.is_err() {
            break;
        }
    }
}

async fn read_input(handle: &GameHandle) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Input::parse(&line) {
            Input::Guess(guess) => handle.submit_guess(guess)?,
            Input::Skip => handle.skip()?,
            Input::Hint => handle.request_hint()?,
            Input::ToggleLanguage => handle.toggle_language()?,
            Input::Help => eprintln!("{}", render::controls(handle.snapshot().language)),
            Input::Quit => break,
            Input::Blank => {}
        }
    }
    Ok(())
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
