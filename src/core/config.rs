//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.deckrun/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::fullscreen::FullscreenMode;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DeckConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub transition: TransitionConfig,
    #[serde(default)]
    pub presenter: PresenterConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub source: Option<String>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TransitionConfig {
    pub shrink_ms: Option<u64>,
    pub move_ms: Option<u64>,
    pub grow_ms: Option<u64>,
    pub stuck_warn_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PresenterConfig {
    pub fullscreen: Option<FullscreenMode>,
    pub show_progress: Option<bool>,
    pub show_controls: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SOURCE: &str = "data.md";
pub const DEFAULT_LOG_FILE: &str = "deckrun.log";
pub const DEFAULT_SHRINK_MS: u64 = 150;
pub const DEFAULT_MOVE_MS: u64 = 300;
pub const DEFAULT_GROW_MS: u64 = 150;
pub const DEFAULT_STUCK_WARN_MS: u64 = 5000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    pub shrink: Duration,
    pub moving: Duration,
    pub grow: Duration,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            shrink: Duration::from_millis(DEFAULT_SHRINK_MS),
            moving: Duration::from_millis(DEFAULT_MOVE_MS),
            grow: Duration::from_millis(DEFAULT_GROW_MS),
        }
    }
}

impl TransitionTiming {
    pub fn total(&self) -> Duration {
        self.shrink + self.moving + self.grow
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub source: String,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub timing: TransitionTiming,
    pub stuck_warn_after: Duration,
    pub fullscreen: FullscreenMode,
    pub show_progress: bool,
    pub show_controls: bool,
}

/// Values supplied on the command line (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub source: Option<&'a str>,
    pub verbose: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Startup Log
// ============================================================================

/// Log lines produced while loading config, before the logger exists (its
/// file and level come from this config). `main` replays them after init.
#[derive(Debug, Default)]
pub struct StartupLog {
    entries: Vec<(Level, String)>,
}

impl StartupLog {
    pub fn debug(&mut self, message: impl Into<String>) {
        self.entries.push((Level::Debug, message.into()));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.entries.push((Level::Info, message.into()));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.entries.push((Level::Warn, message.into()));
    }

    pub fn entries(&self) -> &[(Level, String)] {
        &self.entries
    }

    /// Emit every buffered line through the installed logger, in order.
    pub fn replay(self) {
        for (level, message) in self.entries {
            log::log!(level, "{message}");
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.deckrun/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".deckrun").join("config.toml"))
}

/// Load config from `explicit` or `~/.deckrun/config.toml`.
///
/// A missing default file is generated (commented out) and yields
/// `DeckConfig::default()`. A missing explicit file is an I/O error.
pub fn load_config(
    explicit: Option<&Path>,
    notes: &mut StartupLog,
) -> Result<DeckConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path, notes);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            notes.warn("Could not determine home directory, using default config");
            return Ok(DeckConfig::default());
        }
    };

    if !path.exists() {
        notes.info(format!(
            "No config file found, generating default at {}",
            path.display()
        ));
        generate_default_config(&path, notes);
        return Ok(DeckConfig::default());
    }

    read_config(&path, notes)
}

fn read_config(path: &Path, notes: &mut StartupLog) -> Result<DeckConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: DeckConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    notes.info(format!("Loaded config from {}", path.display()));
    notes.debug(format!("Config: {:?}", config));
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path, notes: &mut StartupLog) {
    let default_content = r#"# deckrun Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# source = "data.md"                # path or http(s) URL; or DECKRUN_SOURCE env var
# log_file = "deckrun.log"          # or DECKRUN_LOG_FILE env var
# log_level = "info"                # "error", "warn", "info", "debug", "trace"

# [transition]
# shrink_ms = 150                   # slides shrink to tiles
# move_ms = 300                     # tiles slide past each other
# grow_ms = 150                     # incoming tile grows to full size
# stuck_warn_ms = 5000              # warn if a transition never settles

# [presenter]
# fullscreen = "chrome"             # "chrome" hides progress/controls, "none" disables
# show_progress = true
# show_controls = true
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        notes.warn(format!("Failed to create config directory: {e}"));
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        notes.warn(format!("Failed to write default config: {e}"));
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &DeckConfig,
    cli: &CliOverrides<'_>,
    notes: &mut StartupLog,
) -> ResolvedConfig {
    // Source: CLI → env → config → default
    let source = cli
        .source
        .map(|s| s.to_string())
        .or_else(|| std::env::var("DECKRUN_SOURCE").ok())
        .or_else(|| config.general.source.clone())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    // Log file: env → config → default
    let log_file = std::env::var("DECKRUN_LOG_FILE")
        .ok()
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    // Log level: --verbose → config → info
    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        config
            .general
            .log_level
            .as_deref()
            .and_then(|s| match s.parse::<LevelFilter>() {
                Ok(level) => Some(level),
                Err(_) => {
                    notes.warn(format!("Unknown log_level {s:?}, using info"));
                    None
                }
            })
            .unwrap_or(LevelFilter::Info)
    };

    let t = &config.transition;
    let timing = TransitionTiming {
        shrink: Duration::from_millis(t.shrink_ms.unwrap_or(DEFAULT_SHRINK_MS)),
        moving: Duration::from_millis(t.move_ms.unwrap_or(DEFAULT_MOVE_MS)),
        grow: Duration::from_millis(t.grow_ms.unwrap_or(DEFAULT_GROW_MS)),
    };

    ResolvedConfig {
        source,
        log_file: PathBuf::from(log_file),
        log_level,
        timing,
        stuck_warn_after: Duration::from_millis(t.stuck_warn_ms.unwrap_or(DEFAULT_STUCK_WARN_MS)),
        fullscreen: config.presenter.fullscreen.unwrap_or_default(),
        show_progress: config.presenter.show_progress.unwrap_or(true),
        show_controls: config.presenter.show_controls.unwrap_or(true),
    }
}
