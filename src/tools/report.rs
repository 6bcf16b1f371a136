//! Plain-text rendering of an activity summary.

use crate::models::{
    parse_timestamp, ActivitySummary, EngagementKind, EngagementRecord, MostRecentEngagement,
    NO_ACTIVITY,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;

static HTML_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("Failed to compile HTML tag regex"));

/// Note bodies longer than this are cut and marked with `...`.
const NOTE_PREVIEW_CHARS: usize = 100;

/// Section order and the number of items listed in each.
const SECTIONS: [(EngagementKind, usize); 5] = [
    (EngagementKind::Call, 3),
    (EngagementKind::Email, 3),
    (EngagementKind::Meeting, 3),
    (EngagementKind::Task, 3),
    (EngagementKind::Note, 2),
];

/// Render a human-readable activity report.
///
/// Kinds without associated engagements get no section.
pub fn render(summary: &ActivitySummary, contact_name: &str, email: Option<&str>) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Activity summary for {} ({})",
        contact_name,
        email.unwrap_or("no email on file")
    );
    let _ = writeln!(out, "Total engagements: {}", summary.total_engagements);

    let most_recent = match &summary.most_recent_engagement {
        MostRecentEngagement::Found(item) => format!(
            "{} on {} - {}",
            item.kind.label(),
            display_date(&item.record),
            headline(item.kind, &item.record)
        ),
        MostRecentEngagement::NoneFound => NO_ACTIVITY.to_string(),
    };
    let _ = writeln!(out, "Most recent activity: {}", most_recent);

    for (kind, limit) in SECTIONS {
        let section = summary.kind(kind);
        if section.count == 0 {
            continue;
        }

        let _ = writeln!(out, "\n{} ({}):", kind.plural_label(), section.count);

        let shown = section.items.iter().take(limit);
        let shown_count = shown.len();
        for record in shown {
            let _ = write!(out, "  - {}: {}", display_date(record), headline(kind, record));
            let details: Vec<&str> = [record.status.as_deref(), record.direction.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            if !details.is_empty() {
                let _ = write!(out, " ({})", details.join(", "));
            }
            out.push('\n');
        }

        if section.count > shown_count {
            let _ = writeln!(out, "  ...and {} more", section.count - shown_count);
        }
    }

    out.trim_end().to_string()
}

/// Date part of a record's timestamp, the raw value if unparseable.
fn display_date(record: &EngagementRecord) -> String {
    match record.created_at.as_deref() {
        Some(raw) => parse_timestamp(raw)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| raw.to_string()),
        None => "unknown date".to_string(),
    }
}

/// One-line description: the subject, or for notes the body preview.
fn headline(kind: EngagementKind, record: &EngagementRecord) -> String {
    if kind == EngagementKind::Note {
        return record
            .body
            .as_deref()
            .map(|b| truncate(&plain_text(b), NOTE_PREVIEW_CHARS))
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| "(empty note)".to_string());
    }
    record
        .subject
        .clone()
        .unwrap_or_else(|| "(no subject)".to_string())
}

/// Strip HTML tags and common entities, collapsing whitespace.
fn plain_text(html: &str) -> String {
    let text = HTML_TAG_REGEX.replace_all(html, " ");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
