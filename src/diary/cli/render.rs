use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use diary::model::{Author, DiaryEntry};
use diary::services::statistics::Statistics;
use navkit::{single_line, truncate_to_width};
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const TITLE_WIDTH: usize = 32;
const PREVIEW_WIDTH: usize = 40;
const RULE: &str = "--------------------------------";

/// One line per entry in list screens: title, author and age.
pub(super) fn entry_row(entry: &DiaryEntry) -> String {
    let age = entry
        .created_at()
        .map(format_time_ago)
        .unwrap_or_default();
    format!(
        "{} {} {}",
        truncate_to_width(entry.title(), TITLE_WIDTH).bold(),
        format!("by {}", entry.author().full_name()).dimmed(),
        format!("({})", age).dimmed()
    )
}

/// Entry line used where the author is already known.
pub(super) fn entry_preview_row(entry: &DiaryEntry) -> String {
    let preview = truncate_to_width(&single_line(entry.content()), PREVIEW_WIDTH);
    format!("{} - {}", entry.title().bold(), preview.dimmed())
}

pub(super) fn author_row(author: &Author) -> String {
    format!(
        "{} {}",
        author.full_name(),
        format!("<{}>", author.email()).dimmed()
    )
}

pub(super) fn entry_full(entry: &DiaryEntry) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", entry.title().bold()));
    out.push_str(&format!("by {}\n", entry.author()));
    if let Some(created) = entry.created_at() {
        out.push_str(&format!("Created: {}\n", format_timestamp(created)));
    }
    if let Some(updated) = entry.updated_at() {
        out.push_str(&format!("Updated: {}\n", format_timestamp(updated)));
    }
    out.push_str(RULE);
    out.push('\n');
    out.push_str(entry.content());
    out
}

pub(super) fn author_full(author: &Author, entries: u64) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", author.full_name().bold()));
    out.push_str(&format!("Email:   {}\n", author.email()));
    out.push_str(&format!("Entries: {}\n", entries));
    if let Some(created) = author.created_at() {
        out.push_str(&format!("Joined:  {}", format_timestamp(created)));
    }
    out
}

pub(super) fn statistics(stats: &Statistics) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "== Statistics ==".cyan()));
    out.push_str(&format!("Total authors: {}\n", stats.total_authors));
    out.push_str(&format!("Total entries: {}\n", stats.total_entries));
    match stats.average_per_author() {
        Some(avg) => out.push_str(&format!("Average: {:.1} entries/author\n", avg)),
        None => out.push_str("Average: n/a\n"),
    }

    if stats.entries_per_author.is_empty() {
        out.push_str("\nNo authors yet.");
        return out;
    }

    out.push_str("\nEntries per author:");
    let names: Vec<String> = stats
        .entries_per_author
        .iter()
        .map(|t| t.author.full_name())
        .collect();
    let width = names.iter().map(|n| n.width()).max().unwrap_or(0);
    for (name, tally) in names.iter().zip(&stats.entries_per_author) {
        let padding = " ".repeat(width - name.width());
        out.push_str(&format!("\n  {}{}  {}", name, padding, tally.entries));
    }
    out
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    format!(
        "{} ({})",
        at.with_timezone(&Local).format("%d-%m-%Y %H:%M"),
        format_time_ago(at)
    )
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
