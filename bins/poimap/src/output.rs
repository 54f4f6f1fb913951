//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use poimap_core::record::Record;
use poimap_telemetry::PerformanceSummary;
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

/// Print a header
pub fn header(message: &str) {
    println!();
    println!("{}", message.bold());
    println!("{}", "─".repeat(message.graphemes(true).count()));
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print one line per record
pub fn print_records(records: &[&Record]) {
    if records.is_empty() {
        println!("  {}", "No records".dimmed());
        return;
    }

    println!(
        "  {:<12} {:<40} {:>10} {:>11}",
        "ID".dimmed(),
        "Title".dimmed(),
        "Latitude".dimmed(),
        "Longitude".dimmed()
    );
    println!("  {}", "─".repeat(76).dimmed());

    for record in records {
        println!(
            "  {:<12} {} {:>10.5} {:>11.5}",
            truncate(record.id.as_str(), 12).cyan(),
            pad(&truncate(&record.title, 40), 40),
            record.latitude,
            record.longitude
        );
    }
}

/// Print the performance summary shown with --verbose
pub fn print_performance(summary: &PerformanceSummary) {
    eprintln!(
        "{} {} render(s), avg {:.2}ms, slowest {:.2}ms, avg {:.0} markers",
        "perf".dimmed(),
        summary.samples,
        summary.average_render_ms,
        summary.slowest_render_ms,
        summary.average_marker_count
    );
    if let Some(bounds_ms) = summary.average_bounds_update_ms {
        eprintln!("{} bounds update {:.2}ms", "perf".dimmed(), bounds_ms);
    }
}

/// Cut `text` to at most `width` grapheme clusters, marking the cut with an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = graphemes[..width - 1].concat();
    out.push('…');
    out
}

/// Left-align `text` in `width` grapheme clusters
fn pad(text: &str, width: usize) -> String {
    let len = text.graphemes(true).count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
