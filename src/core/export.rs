//! # HTML Export
//!
//! Writes a compiled deck as one standalone HTML page: every slide as a
//! section with its own progress bar and previous/menu/next controls, plus
//! a table-of-contents list. Navigation uses fragment links only, so the
//! page works without scripts.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use log::info;

use crate::core::deck::Deck;
use crate::core::markup::escape_html;

const STYLE: &str = "\
body{margin:0;font-family:sans-serif}\
.slide_wrapper{min-height:100vh;box-sizing:border-box;padding:2em}\
.progress_wrapper{height:4px;background:#ddd}.progress_bar{height:4px;background:#4a90d9}\
.controls_wrapper a{margin-right:1em}.disabled_control{pointer-events:none;opacity:.3}\
.toc_current_slide{font-weight:bold}";

pub fn render_page(deck: &Deck, page_title: &str) -> String {
    let len = deck.len();
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
        escape_html(page_title)
    );

    out.push_str("<div class=\"slides\">\n");
    for (i, slide) in deck.iter().enumerate() {
        let percent = (i + 1) as f64 / len as f64 * 100.0;
        let _ = write!(
            out,
            "<div class=\"slide_wrapper\" id=\"slide-{i}\">\n<div class=\"slide\">\n<h1>{}</h1>\n{}</div>\n",
            escape_html(slide.title()),
            slide.content()
        );
        let _ = writeln!(
            out,
            "<div class=\"progress_wrapper\"><div class=\"progress_bar\" style=\"width:{percent:.2}%\"></div></div>"
        );
        out.push_str("<div class=\"controls_wrapper\">");
        push_control(&mut out, "left_arrow", "&#9664;", i.checked_sub(1));
        let _ = write!(out, "<a class=\"menu\" href=\"#toc\">&#9776;</a>");
        push_control(&mut out, "right_arrow", "&#9654;", Some(i + 1).filter(|&n| n < len));
        out.push_str("</div>\n</div>\n");
    }
    out.push_str("</div>\n");

    out.push_str("<div class=\"toc_modal\" id=\"toc\">\n<ol class=\"toc_list\">\n");
    for (i, title) in deck.titles().enumerate() {
        let class = if i == 0 { " class=\"toc_current_slide\"" } else { "" };
        let _ = writeln!(
            out,
            "<li{class}><a href=\"#slide-{i}\">{}</a></li>",
            escape_html(title)
        );
    }
    out.push_str("</ol>\n</div>\n</body>\n</html>\n");
    out
}

fn push_control(out: &mut String, class: &str, label: &str, target: Option<usize>) {
    match target {
        Some(t) => {
            let _ = write!(out, "<a class=\"{class}\" href=\"#slide-{t}\">{label}</a>");
        }
        None => {
            let _ = write!(out, "<a class=\"{class} disabled_control\">{label}</a>");
        }
    }
}

pub fn write_page(path: &Path, deck: &Deck, page_title: &str) -> io::Result<()> {
    fs::write(path, render_page(deck, page_title))?;
    info!("Exported {} slides to {}", deck.len(), path.display());
    Ok(())
}
