use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use deckrun::core::compiler::HtmlRenderer;
use deckrun::core::config::{CliOverrides, DeckConfig, StartupLog, load_config, resolve};
use deckrun::core::export::write_page;
use deckrun::core::source::{from_location, load_deck};
use deckrun::tui;
use deckrun::tui::markdown::TerminalRenderer;
use log::{error, info};
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "deckrun", about = "Markdown slide decks in the terminal")]
struct Args {
    /// Markdown document: local path or http(s) URL
    #[arg(value_name = "SOURCE")]
    location: Option<String>,

    /// Same as the positional SOURCE
    #[arg(long, conflicts_with = "location")]
    source: Option<String>,

    /// Write the deck as a standalone HTML page and exit
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Print the compiled slides as JSON and exit
    #[arg(long, conflicts_with = "export")]
    dump: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Config file to use instead of ~/.deckrun/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Logging needs the resolved config; anything said before that is replayed
    let mut startup_log = StartupLog::default();
    let file_config = match load_config(args.config.as_deref(), &mut startup_log) {
        Ok(config) => config,
        Err(e) => {
            startup_log.warn(format!("Ignoring config file: {e}"));
            DeckConfig::default()
        }
    };
    let config = resolve(
        &file_config,
        &CliOverrides {
            source: args.source.as_deref().or(args.location.as_deref()),
            verbose: args.verbose,
        },
        &mut startup_log,
    );

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
    startup_log.replay();

    info!("deckrun starting up with source: {}", config.source);
    let source = from_location(&config.source);

    if args.dump {
        let deck = load_deck(source.as_ref(), &HtmlRenderer)
            .await
            .map_err(report)?;
        let slides: Vec<_> = deck.iter().collect();
        let json = serde_json::to_string_pretty(&slides).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    if let Some(path) = args.export {
        let deck = load_deck(source.as_ref(), &HtmlRenderer)
            .await
            .map_err(report)?;
        let page_title = deck.titles().next().unwrap_or("deckrun").to_string();
        write_page(&path, &deck, &page_title)?;
        return Ok(());
    }

    let loaded = load_deck(source.as_ref(), &TerminalRenderer::default()).await;
    tui::run(config, loaded)
}

/// Non-interactive modes have no placeholder view; fail loudly instead.
fn report(e: deckrun::core::source::CompileFailure) -> io::Error {
    error!("{e}");
    eprintln!("deckrun: {e}");
    io::Error::other(e)
}
