//! Markdown → HTML renderer.
//!
//! Wraps `pulldown_cmark` with the options a slide body needs: GFM tables,
//! strikethrough, task lists, and hard line breaks for every newline. Fenced
//! code blocks are highlighted with syntect; a block that cannot be
//! highlighted is emitted as escaped plain text and the rest of the body is
//! unaffected.

use std::sync::LazyLock;

use log::{debug, warn};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

pub(crate) static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
pub(crate) static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

pub(crate) const THEME: &str = "base16-ocean.dark";

pub fn options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts
}

/// Render a markdown body to an HTML fragment.
pub fn render_html(markdown: &str) -> String {
    let mut events: Vec<Event<'_>> = Vec::new();
    // (language, accumulated code) while inside a fenced/indented block
    let mut code: Option<(String, String)> = None;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(l) => fence_language(&l).to_owned(),
                    CodeBlockKind::Indented => String::new(),
                };
                code = Some((lang, String::new()));
            }
            Event::Text(t) if code.is_some() => {
                if let Some((_, buf)) = code.as_mut() {
                    buf.push_str(&t);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((lang, buf)) = code.take() {
                    events.push(Event::Html(CowStr::from(code_block_html(&lang, &buf))));
                }
            }
            // Every newline inside a paragraph is a visible break.
            Event::SoftBreak => events.push(Event::HardBreak),
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Info strings may carry attributes after the language (```rust,ignore).
pub(crate) fn fence_language(info: &str) -> &str {
    info.split([',', ' ', '\t'])
        .next()
        .unwrap_or("")
        .trim()
}

/// Syntax for a fence tag. Untagged blocks are guessed from their first line
/// (shebang, `<?xml`, modeline).
pub(crate) fn find_syntax(lang: &str, code: &str) -> Option<&'static SyntaxReference> {
    if lang.is_empty() {
        SYNTAX_SET.find_syntax_by_first_line(code)
    } else {
        SYNTAX_SET.find_syntax_by_token(lang)
    }
}

fn code_block_html(lang: &str, code: &str) -> String {
    let Some(syntax) = find_syntax(lang, code) else {
        if !lang.is_empty() {
            debug!("No syntax for code block language {:?}, rendering plain", lang);
        }
        return plain_code_html(lang, code);
    };
    let Some(theme) = THEME_SET.themes.get(THEME) else {
        warn!("Highlight theme {} missing, rendering plain", THEME);
        return plain_code_html(lang, code);
    };
    match highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme) {
        Ok(highlighted) if lang.is_empty() => {
            format!("<div class=\"code\">{}</div>\n", highlighted)
        }
        Ok(highlighted) => format!(
            "<div class=\"code language-{}\">{}</div>\n",
            escape_html(lang),
            highlighted
        ),
        Err(e) => {
            warn!("Highlighting {} block failed, rendering plain: {}", syntax.name, e);
            plain_code_html(lang, code)
        }
    }
}

fn plain_code_html(lang: &str, code: &str) -> String {
    if lang.is_empty() {
        format!("<pre><code>{}</code></pre>\n", escape_html(code))
    } else {
        format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            escape_html(lang),
            escape_html(code)
        )
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
