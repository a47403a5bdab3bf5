//! Markdown → ratatui `Text` renderer.
//!
//! Converts `pulldown_cmark` events into styled `Line`/`Span` values for the
//! slide body. Headings, bold, italic, inline code, fenced code blocks (with
//! syntect highlighting), lists, tables, blockquotes, and links. Every
//! newline inside a paragraph is a visible line break.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::util::LinesWithEndings;

use crate::core::compiler::SlideRenderer;
use crate::core::markup::{self, SYNTAX_SET, THEME, THEME_SET, fence_language, find_syntax};

/// Compiles slide bodies into terminal text.
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    pub base_fg: Color,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self {
            base_fg: Color::White,
        }
    }
}

impl SlideRenderer for TerminalRenderer {
    type Output = Text<'static>;

    fn render(&self, body: &str) -> Text<'static> {
        render(body, self.base_fg)
    }
}

/// Parse markdown content into styled `Text`.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut w = Writer::new(base_fg);
    for event in Parser::new_ext(content, markup::options()) {
        w.handle(event);
    }
    w.text
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline style stack (bold, italic, heading text, etc.). Styles compose
    /// via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// Per-line prefix spans (blockquote `│`, code block border).
    line_prefixes: Vec<Span<'static>>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    /// Active syntax highlighter for fenced code blocks.
    highlighter: Option<HighlightLines<'static>>,
    /// True when inside a code block without syntax highlighting.
    in_plain_code: bool,
    /// Untagged code block whose syntax is guessed from its first text.
    detect_syntax: bool,
    /// Stored link URL, appended after the link text closes.
    link_url: Option<String>,
    /// Cell position within the current table row.
    table_cell: usize,
    /// Whether the next block element should be preceded by a blank line.
    needs_newline: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            line_prefixes: vec![],
            list_indices: vec![],
            highlighter: None,
            in_plain_code: false,
            detect_syntax: false,
            link_url: None,
            table_cell: 0,
            needs_newline: false,
        }
    }

    // ── Style helpers ───────────────────────────────────────────────────

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    // ── Line/span helpers ───────────────────────────────────────────────

    fn push_line(&mut self, line: Line<'static>) {
        let mut out = line;
        for pfx in self.line_prefixes.iter().rev().cloned() {
            out.spans.insert(0, pfx);
        }
        self.text.lines.push(out);
    }

    fn push_span(&mut self, span: Span<'static>) {
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        } else {
            self.push_line(Line::from(vec![span]));
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    // ── Event dispatch ──────────────────────────────────────────────────

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.inline_code(c),
            Event::SoftBreak | Event::HardBreak => self.push_line(Line::default()),
            Event::Rule => {
                self.blank_line_if_needed();
                self.push_line(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_newline = true;
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.push_span(Span::raw(marker));
            }
            _ => {} // HTML, footnotes, math
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            // ── Block elements ──────────────────────────────────────────
            Tag::Paragraph => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                let hs = heading_style(self.base_fg, level);
                self.push_line(Line::default());
                self.push_style(hs);
            }
            Tag::BlockQuote(_) => {
                self.blank_line_if_needed();
                self.line_prefixes
                    .push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
                self.push_style(
                    Style::default()
                        .fg(self.base_fg)
                        .add_modifier(Modifier::DIM | Modifier::ITALIC),
                );
            }
            Tag::CodeBlock(kind) => self.open_code_block(kind),
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let depth = self.list_indices.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                if let Some(idx) = self.list_indices.last_mut() {
                    let marker = match idx {
                        None => format!("{indent}• "),
                        Some(n) => {
                            let s = format!("{indent}{n}. ");
                            *n += 1;
                            s
                        }
                    };
                    self.push_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
                }
            }
            Tag::Table(_) => self.blank_line_if_needed(),
            Tag::TableHead => {
                self.table_cell = 0;
                self.push_line(Line::default());
                self.push_style(Style::default().add_modifier(Modifier::BOLD));
            }
            Tag::TableRow => {
                self.table_cell = 0;
                self.push_line(Line::default());
            }
            Tag::TableCell => {
                if self.table_cell > 0 {
                    self.push_span(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
                }
                self.table_cell += 1;
            }

            // ── Inline elements ─────────────────────────────────────────
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {} // images, definitions
        }
    }

    fn open_code_block(&mut self, kind: CodeBlockKind<'_>) {
        if !self.text.lines.is_empty() {
            self.push_line(Line::default());
        }
        let lang = match &kind {
            CodeBlockKind::Fenced(l) => fence_language(l),
            CodeBlockKind::Indented => "",
        };

        let bs = Style::default().fg(Color::DarkGray);
        let top = if lang.is_empty() {
            Line::from(Span::styled("╭──", bs))
        } else {
            Line::from(vec![
                Span::styled("╭── ", bs),
                Span::styled(lang.to_owned(), bs.add_modifier(Modifier::BOLD)),
                Span::styled(" ──", bs),
            ])
        };
        self.push_line(top);
        self.line_prefixes.push(Span::styled("│ ", bs));

        // Untagged blocks wait for their first line to guess the syntax
        self.detect_syntax = lang.is_empty();
        if !lang.is_empty() {
            self.start_highlighter(lang, "");
        }
        if self.highlighter.is_none() {
            self.in_plain_code = true;
        }
    }

    fn start_highlighter(&mut self, lang: &str, code: &str) {
        if let Some(syn) = find_syntax(lang, code)
            && let Some(theme) = THEME_SET.themes.get(THEME)
        {
            self.highlighter = Some(HighlightLines::new(syn, theme));
            self.in_plain_code = false;
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_newline = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::BlockQuote(_) => {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock => {
                self.highlighter = None;
                self.detect_syntax = false;
                self.in_plain_code = false;
                self.line_prefixes.pop();
                let bs = Style::default().fg(Color::DarkGray);
                self.push_line(Line::from(Span::styled("╰──", bs)));
                self.needs_newline = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::TableHead => self.pop_style(),
            TagEnd::Table => self.needs_newline = true,
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::raw(" ("));
                    self.push_span(Span::styled(
                        url,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::UNDERLINED),
                    ));
                    self.push_span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    // ── Content handlers ────────────────────────────────────────────────

    fn text(&mut self, cow: CowStr<'_>) {
        // ratatui renders \t as zero-width
        let text = cow.replace('\t', "    ");

        if std::mem::take(&mut self.detect_syntax) {
            self.start_highlighter("", &text);
        }

        if let Some(mut hl) = self.highlighter.take() {
            let mut lines = LinesWithEndings::from(text.as_str());
            while let Some(line) = lines.next() {
                match hl.highlight_line(line, &SYNTAX_SET) {
                    Ok(ranges) => {
                        let spans: Vec<Span<'static>> = ranges
                            .into_iter()
                            .filter_map(|(hl_style, frag)| {
                                let content = frag.trim_end_matches('\n');
                                if content.is_empty() {
                                    return None;
                                }
                                let fg = Color::Rgb(
                                    hl_style.foreground.r,
                                    hl_style.foreground.g,
                                    hl_style.foreground.b,
                                );
                                Some(Span::styled(content.to_owned(), Style::default().fg(fg)))
                            })
                            .collect();
                        self.push_line(Line::from(spans));
                    }
                    // Highlighter state is unreliable after a failure; rest of the block goes plain.
                    Err(e) => {
                        log::warn!("Highlighting failed, falling back to plain text: {e}");
                        self.in_plain_code = true;
                        self.push_plain_code(line);
                        for rest in lines {
                            self.push_plain_code(rest);
                        }
                        return;
                    }
                }
            }
            self.highlighter = Some(hl);
            return;
        }

        if self.in_plain_code {
            for line in text.lines() {
                self.push_plain_code(line);
            }
            return;
        }

        let style = self.style();
        self.push_span(Span::styled(text, style));
    }

    fn push_plain_code(&mut self, line: &str) {
        let code_style = Style::default().fg(Color::White);
        let line = line.trim_end_matches('\n').to_owned();
        self.push_line(Line::from(Span::styled(line, code_style)));
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        let style = Style::default().fg(Color::White).bg(Color::DarkGray);
        self.push_span(Span::styled(cow.to_string(), style));
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn heading_style(base_fg: Color, level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 | HeadingLevel::H2 => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H3 => Style::default().fg(base_fg).add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_lines(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn heading_text_inherits_heading_style() {
        let text = render("## Hello", Color::Blue);
        let span = text.lines[0]
            .spans
            .iter()
            .find(|s| s.content == "Hello")
            .unwrap();
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(span.style.fg, Some(Color::Blue));
    }

    #[test]
    fn bold_text_is_bold() {
        let text = render("Some **bold** text", Color::Blue);
        let bold_span = text.lines[0].spans.iter().find(|s| s.content == "bold").unwrap();
        assert!(bold_span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn inline_code_styled() {
        let text = render("Use `foo()` here", Color::Blue);
        let code_span = text.lines[0].spans.iter().find(|s| s.content == "foo()").unwrap();
        assert_eq!(code_span.style.fg, Some(Color::White));
        assert_eq!(code_span.style.bg, Some(Color::DarkGray));
    }

    #[test]
    fn soft_breaks_start_new_lines() {
        let lines = plain_lines(&render("one\ntwo", Color::Blue));
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn code_block_has_border_structure() {
        let all_content = plain_lines(&render("```\nline1\nline2\n```", Color::Blue));
        assert!(all_content[0].starts_with('╭'), "got {:?}", all_content[0]);
        assert!(all_content[1].starts_with("│ "), "got {:?}", all_content[1]);
        assert!(all_content[1].contains("line1"));
        assert!(all_content[2].contains("line2"));
        let last = all_content.last().unwrap();
        assert!(last.starts_with('╰'), "got {:?}", last);
    }

    #[test]
    fn unknown_language_renders_plain() {
        let all_content = plain_lines(&render("```nope-lang\nx = 1\n```", Color::Blue));
        assert!(all_content[0].contains("nope-lang"));
        assert_eq!(all_content[1], "│ x = 1");
    }

    #[test]
    fn highlighted_block_keeps_all_lines() {
        let all_content = plain_lines(&render("```rust\nlet a = 1;\nlet b = 2;\n```", Color::Blue));
        assert!(all_content.iter().any(|l| l.contains("let a = 1;")));
        assert!(all_content.iter().any(|l| l.contains("let b = 2;")));
    }

    #[test]
    fn fence_tag_stops_at_tab() {
        let all_content = plain_lines(&render("```rust\tfile=main.rs\nfn main() {}\n```", Color::Blue));
        assert_eq!(all_content[0], "╭── rust ──");
    }

    #[test]
    fn untagged_shebang_block_is_highlighted() {
        let text = render("```\n#!/bin/bash\necho hi\n```", Color::Blue);
        let code_line = text
            .lines
            .iter()
            .find(|l| l.spans.iter().any(|s| s.content.contains("echo")))
            .unwrap();
        assert!(
            code_line
                .spans
                .iter()
                .any(|s| matches!(s.style.fg, Some(Color::Rgb(..)))),
            "got {code_line:?}"
        );
    }

    #[test]
    fn table_cells_separated() {
        let all_content = plain_lines(&render("| a | b |\n|---|---|\n| 1 | 2 |\n", Color::Blue));
        assert!(all_content.contains(&"a │ b".to_string()), "got {all_content:?}");
        assert!(all_content.contains(&"1 │ 2".to_string()), "got {all_content:?}");
    }

    #[test]
    fn tabs_expanded_to_spaces() {
        let text = render("```\n\tindented\n```", Color::Blue);
        let has_tabs = text
            .lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.content.contains('\t')));
        assert!(!has_tabs, "no raw tabs should remain");
    }

    #[test]
    fn renderer_trait_uses_base_color() {
        let text = TerminalRenderer { base_fg: Color::Green }.render("hello");
        assert_eq!(text.lines[0].spans[0].style.fg, Some(Color::Green));
    }
}
