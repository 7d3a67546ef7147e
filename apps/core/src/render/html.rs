//! Markup painter, used for HTML snapshots of the chat.

use std::fmt::Write as _;

use super::escape;
use super::projection::{Bubble, SidebarView, TranscriptView};
use super::{date_time, time_of_day};

pub fn transcript_html(view: &TranscriptView) -> String {
    if let Some(tip) = view.tip {
        return format!(r#"<div class="tip">{}</div>"#, escape::html(tip));
    }
    let mut out = String::new();
    for bubble in &view.bubbles {
        let id = bubble.record_id();
        // Writing into a String cannot fail.
        let _ = match bubble {
            Bubble::Question { text, .. } => writeln!(
                out,
                r#"<div class="bubble user" data-id="{}"><strong>Q:</strong> {}</div>"#,
                id,
                escape::html(text)
            ),
            Bubble::Answer {
                text,
                tag,
                created_at,
                ..
            } => writeln!(
                out,
                r#"<div class="bubble" data-id="{}"><strong>A:</strong> {}<div class="meta-right">Tag: {} • {}</div></div>"#,
                id,
                escape::html(text),
                tag,
                time_of_day(created_at)
            ),
        };
    }
    if view.scroll_to_latest {
        out.push_str(r#"<div id="latest"></div>"#);
        out.push('\n');
    }
    out
}

pub fn sidebar_html(view: &SidebarView) -> String {
    if let Some(placeholder) = view.placeholder {
        return format!(r#"<div class="empty">{}</div>"#, escape::html(placeholder));
    }
    let mut out = String::new();
    for item in &view.items {
        let _ = writeln!(
            out,
            concat!(
                r#"<div class="item" data-id="{id}">"#,
                r#"<div class="q">Q: {q}</div>"#,
                r#"<div class="meta">Tag: {tag} • {time}</div>"#,
                r#"<button class="small view-btn" data-id="{id}">View</button>"#,
                r#"<button class="small copy-btn" data-id="{id}">Copy A</button>"#,
                "</div>"
            ),
            id = item.id,
            q = escape::html(&item.question),
            tag = item.tag,
            time = date_time(&item.created_at),
        );
    }
    out
}

/// Standalone document holding both views.
pub fn page(transcript: &TranscriptView, sidebar: &SidebarView) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>ChatHelper</title></head>\n",
            "<body onload=\"document.getElementById('latest')?.scrollIntoView()\">\n",
            "<section id=\"chatArea\">\n{}</section>\n",
            "<aside id=\"historyList\" data-filter=\"{}\">\n{}</aside>\n",
            "</body>\n</html>\n"
        ),
        transcript_html(transcript),
        sidebar.filter,
        sidebar_html(sidebar),
    )
}
