//! # Markdown Compiler
//!
//! Splits a raw document into titled sections and renders each section's
//! body. A level-1 heading line starts a new slide; everything up to the next
//! one is that slide's body.
//!
//! ```text
//! ignored preamble        ← discarded, no slide exists yet
//! # Intro                 ← Slide 0, title "Intro"
//! Some text               ┐
//! ## Sub heading          ┘ body of slide 0
//! # Next                  ← Slide 1
//! ```
//!
//! Rendering is delegated to a [`SlideRenderer`] so the same scan drives
//! HTML export and the terminal presenter.

use log::debug;

use crate::core::markup;
use crate::core::slide::Slide;

/// Converts an accumulated slide body into displayable content.
pub trait SlideRenderer {
    type Output;

    fn render(&self, body: &str) -> Self::Output;
}

/// Default renderer: markdown → HTML string.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl SlideRenderer for HtmlRenderer {
    type Output = String;

    fn render(&self, body: &str) -> String {
        markup::render_html(body)
    }
}

/// Compile a document into HTML slides.
pub fn compile(document: &str) -> Vec<Slide> {
    compile_with(document, &HtmlRenderer)
}

/// Compile a document, rendering each body with `renderer`.
pub fn compile_with<R: SlideRenderer>(document: &str, renderer: &R) -> Vec<Slide<R::Output>> {
    // A UTF-8 BOM would hide the first title line
    let document = document.strip_prefix('\u{FEFF}').unwrap_or(document);
    let mut slides = Vec::new();
    // (title, body) of the slide currently being accumulated
    let mut pending: Option<(String, String)> = None;

    for line in document.split('\n') {
        if let Some(title) = title_of(line) {
            if let Some((title, body)) = pending.take() {
                slides.push(Slide::new(title, renderer.render(&body)));
            }
            pending = Some((title.to_owned(), String::new()));
        } else if let Some((_, body)) = pending.as_mut() {
            body.push_str(line.strip_suffix('\r').unwrap_or(line));
            body.push('\n');
        }
    }

    if let Some((title, body)) = pending.take() {
        slides.push(Slide::new(title, renderer.render(&body)));
    }

    debug!("Compiled {} slides from {} bytes", slides.len(), document.len());
    slides
}

/// Returns the title text if `line` is a level-1 heading.
///
/// The trimmed line must start with exactly one `#`. The marker and at most
/// one following whitespace character are stripped.
fn title_of(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix('#')?;
    if rest.starts_with('#') {
        return None;
    }
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => Some(chars.as_str()),
        _ => Some(rest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Echoes the raw body so tests can check the scan independently of markup.
    struct RawRenderer;

    impl SlideRenderer for RawRenderer {
        type Output = String;

        fn render(&self, body: &str) -> String {
            body.to_string()
        }
    }

    fn raw(document: &str) -> Vec<Slide> {
        compile_with(document, &RawRenderer)
    }

    #[test]
    fn empty_document_yields_no_slides() {
        assert!(compile("").is_empty());
    }

    #[test]
    fn document_without_titles_yields_no_slides() {
        assert!(compile("just text\n## not a title\n").is_empty());
    }

    #[test]
    fn preamble_is_discarded() {
        let slides = compile("line one\n# Title\nbody");
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title(), "Title");
        assert_eq!(slides[0].content(), &markup::render_html("body\n"));
    }

    #[test]
    fn leading_bom_does_not_hide_first_title() {
        let slides = raw("\u{FEFF}# Intro\nhello\n");
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title(), "Intro");
        assert_eq!(slides[0].content(), "hello\n\n");
    }

    #[test]
    fn consecutive_titles_have_empty_content() {
        let slides = raw("# A\n# B");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title(), "A");
        assert_eq!(slides[1].title(), "B");
        assert_eq!(slides[0].content(), "");
        assert_eq!(slides[1].content(), "");

        let rendered = compile("# A\n# B");
        assert_eq!(rendered[0].content(), "");
        assert_eq!(rendered[1].content(), "");
    }

    #[test]
    fn slide_count_matches_title_lines_in_order() {
        let doc = "# One\na\n## deeper\n# Two\n  # Three  \nb\n#\n";
        let slides = raw(doc);
        let titles: Vec<&str> = slides.iter().map(Slide::title).collect();
        assert_eq!(titles, vec!["One", "Two", "Three", ""]);
        assert_eq!(slides[0].content(), "a\n## deeper\n");
        assert_eq!(slides[2].content(), "b\n");
    }

    #[test]
    fn body_lines_are_kept_verbatim() {
        let slides = raw("# T\n  indented\n\n- item\n");
        assert_eq!(slides[0].content(), "  indented\n\n- item\n\n");
    }

    #[test]
    fn title_strips_at_most_one_space() {
        assert_eq!(title_of("#  Two spaces"), Some(" Two spaces"));
        assert_eq!(title_of("#NoSpace"), Some("NoSpace"));
        assert_eq!(title_of("# Normal"), Some("Normal"));
        assert_eq!(title_of("#\tTabbed"), Some("Tabbed"));
    }

    #[test]
    fn deeper_headings_are_not_titles() {
        assert_eq!(title_of("## Sub"), None);
        assert_eq!(title_of("###"), None);
        assert_eq!(title_of("text # not"), None);
    }

    #[test]
    fn crlf_documents_compile_cleanly() {
        let slides = raw("# A\r\nbody\r\n# B\r\n");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title(), "A");
        assert_eq!(slides[0].content(), "body\n");
    }

    #[test]
    fn malformed_code_block_does_not_abort_compilation() {
        let doc = "# Code\n```definitely-not-a-lang\nx < y\n```\n# After\ntext\n";
        let slides = compile(doc);
        assert_eq!(slides.len(), 2);
        assert!(slides[0].content().contains("x &lt; y"));
        assert_eq!(slides[1].content(), "<p>text</p>\n");
    }
}
