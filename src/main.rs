use std::io::{self, BufRead, Write};

use anyhow::Context;
use keyword_watch::{AppResult, Config, JsonFileStore, KeywordMatcher, LogSink, ResultSink};

const LOG_TARGET_STARTUP: &str = "keyword_watch::startup";

const USAGE: &str = "\
Usage: keyword-watch [--keywords <list>] [--clear-store]

Reads text lines from stdin and prints each watched keyword the first time it appears.

Options:
  --keywords <list>  Comma-separated keywords to watch (saved for next run)
  --clear-store      Delete the saved keyword list and exit
  -h, --help         Show this help

Line commands:
  :keywords <list>   Replace the keyword list
  :clear             Forget detections so far";

/// Command line options
#[derive(Debug, Default)]
struct Args {
    keywords: Option<String>,
    clear_store: bool,
    help: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> AppResult<Self> {
        let mut parsed = Args::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--keywords" => {
                    let value = args.next().context("--keywords needs a value")?;
                    parsed.keywords = Some(value);
                }
                "--clear-store" => parsed.clear_store = true,
                "-h" | "--help" => parsed.help = true,
                other => anyhow::bail!("Unknown argument: {}\n\n{}", other, USAGE),
            }
        }

        Ok(parsed)
    }
}

/// Control lines mixed into the text stream
#[derive(Debug, PartialEq, Eq)]
enum LineCommand<'a> {
    Keywords(&'a str),
    Clear,
    Text(&'a str),
}

impl<'a> LineCommand<'a> {
    fn parse(line: &'a str) -> Self {
        if line.trim() == ":clear" {
            return LineCommand::Clear;
        }

        match line.strip_prefix(":keywords") {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                LineCommand::Keywords(rest.trim_start())
            }
            _ => LineCommand::Text(line),
        }
    }
}

/// Prints detections to stdout and logs them
struct ConsoleSink<W: Write> {
    out: W,
    log: LogSink,
}

impl<W: Write> ConsoleSink<W> {
    fn new(out: W) -> Self {
        Self { out, log: LogSink }
    }
}

impl<W: Write> ResultSink for ConsoleSink<W> {
    fn show(&mut self, keyword: &str) {
        self.log.show(keyword);
        if let Err(e) = writeln!(self.out, "+ {}", keyword) {
            tracing::error!("Failed to print detection: {}", e);
        }
    }

    fn clear(&mut self) {
        self.log.clear();
        if let Err(e) = writeln!(self.out, "(cleared)") {
            tracing::error!("Failed to print clear marker: {}", e);
        }
    }
}

/// Initialize tracing with file rotation
///
/// Logs go to the app config directory under `logs/`, rotated daily.
/// Debug builds also log to stderr (stdout carries detections).
fn initialize_tracing(config: &Config) {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = Config::app_dir().join("logs");

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, "keyword-watch.log");

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
    }

    tracing::info!(target: LOG_TARGET_STARTUP, "Log directory: {}", log_dir.display());
}

fn open_store(config: &Config) -> AppResult<JsonFileStore> {
    match &config.store_path {
        Some(path) => Ok(JsonFileStore::new(path)),
        None => JsonFileStore::open_default().context("Failed to locate keyword store"),
    }
}

fn run(args: Args) -> AppResult<()> {
    // Config comes first since it carries the log filter; report it once
    // the subscriber is up
    let config_path = Config::config_path();
    let config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    initialize_tracing(&config);
    tracing::info!(
        target: LOG_TARGET_STARTUP,
        "Starting keyword-watch v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!(target: LOG_TARGET_STARTUP, "Config: {}", config_path.display());

    let store = open_store(&config)?;

    if args.clear_store {
        store.delete().context("Failed to delete keyword store")?;
        println!("Removed saved keywords at {}", store.path().display());
        return Ok(());
    }

    let stdout = io::stdout();
    let sink = ConsoleSink::new(stdout.lock());
    let mut matcher = KeywordMatcher::new(store, sink);

    if let Some(raw) = args.keywords.as_deref() {
        matcher.configure(raw);
    }

    if matcher.keywords().is_empty() {
        tracing::warn!("No keywords configured; use --keywords or :keywords <list>");
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;

        match LineCommand::parse(&line) {
            LineCommand::Keywords(raw) => matcher.configure(raw),
            LineCommand::Clear => matcher.clear(),
            LineCommand::Text(text) => {
                if config.echo_text {
                    println!("> {}", text);
                }
                matcher.detect(text);
            }
        }
    }

    tracing::info!(
        "Input finished with {} keyword(s) detected",
        matcher.detected().len()
    );
    Ok(())
}

fn main() -> AppResult<()> {
    let args = Args::parse(std::env::args().skip(1))?;

    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    run(args)
}
