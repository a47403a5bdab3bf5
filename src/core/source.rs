//! # Document Source
//!
//! One-shot fetch of the markdown document a deck is built from.
//! `http(s)://` locations are fetched with a GET; anything else is read from
//! the local filesystem.
//!
//! A failed fetch, or a document with no slides, is a [`CompileFailure`]: the
//! caller shows a placeholder deck instead of crashing.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::core::compiler::{SlideRenderer, compile_with};
use crate::core::deck::Deck;

/// Errors that can occur while fetching the source document.
#[derive(Debug)]
pub enum SourceError {
    /// Local file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Network-level failure (DNS, connection refused, timeout).
    Network { url: String, message: String },
    /// Server answered with a non-success status.
    Http { url: String, status: u16 },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            SourceError::Network { url, message } => write!(f, "cannot fetch {url}: {message}"),
            SourceError::Http { url, status } => write!(f, "fetching {url} returned HTTP {status}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// The document could not be turned into a usable deck.
#[derive(Debug)]
pub enum CompileFailure {
    Fetch(SourceError),
    /// Document fetched but contained no level-1 headings.
    NoSlides,
}

impl fmt::Display for CompileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileFailure::Fetch(e) => write!(f, "{e}"),
            CompileFailure::NoSlides => write!(f, "document contains no slides"),
        }
    }
}

impl std::error::Error for CompileFailure {}

impl From<SourceError> for CompileFailure {
    fn from(e: SourceError) -> Self {
        CompileFailure::Fetch(e)
    }
}

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Human-readable location (URL or path) for logs and the status bar.
    fn location(&self) -> &str;

    async fn fetch(&self) -> Result<String, SourceError>;
}

pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        debug!("GET {}", self.url);
        let network = |e: reqwest::Error| SourceError::Network {
            url: self.url.clone(),
            message: e.to_string(),
        };
        let response = self.client.get(&self.url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(network)
    }
}

pub struct FileSource {
    path: PathBuf,
    label: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    fn location(&self) -> &str {
        &self.label
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        debug!("Reading {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

/// Pick the source implementation for a configured location.
pub fn from_location(location: &str) -> Box<dyn DocumentSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Fetch the document and compile it into a deck.
pub async fn load_deck<R: SlideRenderer>(
    source: &dyn DocumentSource,
    renderer: &R,
) -> Result<Deck<R::Output>, CompileFailure> {
    let document = source.fetch().await.inspect_err(|e| {
        warn!("Document fetch failed: {e}");
    })?;
    let slides = compile_with(&document, renderer);
    if slides.is_empty() {
        warn!("{} contains no slides", source.location());
        return Err(CompileFailure::NoSlides);
    }
    info!("Loaded {} slides from {}", slides.len(), source.location());
    Ok(Deck::from_slides(slides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compiler::HtmlRenderer;

    #[test]
    fn location_picks_http_for_urls() {
        assert_eq!(from_location("https://example.com/d.md").location(), "https://example.com/d.md");
        assert_eq!(from_location("slides/data.md").location(), "slides/data.md");
    }

    #[tokio::test]
    async fn missing_file_is_compile_failure() {
        let source = FileSource::new("/definitely/not/here.md");
        let result = load_deck(&source, &HtmlRenderer).await;
        assert!(matches!(
            result,
            Err(CompileFailure::Fetch(SourceError::Io { .. }))
        ));
    }

    #[tokio::test]
    async fn file_without_titles_has_no_slides() {
        let dir = std::env::temp_dir().join(format!("deckrun-src-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("plain.md");
        std::fs::write(&path, "no titles here\n").unwrap();

        let result = load_deck(&FileSource::new(&path), &HtmlRenderer).await;
        assert!(matches!(result, Err(CompileFailure::NoSlides)));

        std::fs::write(&path, "# One\nbody\n# Two\n").unwrap();
        let deck = load_deck(&FileSource::new(&path), &HtmlRenderer).await.unwrap();
        assert_eq!(deck.len(), 2);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn file_with_bom_keeps_first_slide() {
        let path = std::env::temp_dir().join(format!("deckrun-bom-{}.md", std::process::id()));
        std::fs::write(&path, "\u{FEFF}# Intro\nhello\n").unwrap();

        let deck = load_deck(&FileSource::new(&path), &HtmlRenderer).await.unwrap();
        assert_eq!(deck.titles().collect::<Vec<_>>(), vec!["Intro"]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn display_messages() {
        let e = SourceError::Http {
            url: "http://x/d.md".into(),
            status: 404,
        };
        assert_eq!(e.to_string(), "fetching http://x/d.md returned HTTP 404");
        assert_eq!(
            CompileFailure::NoSlides.to_string(),
            "document contains no slides"
        );
    }
}
