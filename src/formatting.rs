//! Formatting helper functions for the quote MCP server
//!
//! This module turns quotes, category lists and sync reports into the plain
//! text returned by MCP tools.

use crate::quotes::{CategoryFilter, Quote, QuoteBook};
use crate::sync::SyncReport;

/// Shown whenever a selection comes back empty
pub const NO_QUOTES_MESSAGE: &str = "No quotes available.";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a displayed quote, or the empty-selection message
pub fn format_shown_quote(quote: Option<&Quote>) -> String {
    match quote {
        Some(q) => format!("\"{}\" — {}", q.text, q.category),
        None => NO_QUOTES_MESSAGE.to_string(),
    }
}

/// Format the category list, marking the active filter
///
/// # Arguments
/// * `categories` - Category names, `"all"` first
/// * `active` - Currently remembered filter
pub fn format_categories(categories: &[String], active: &CategoryFilter) -> String {
    let mut result = format!("Categories ({}):\n", categories.len().saturating_sub(1));
    for category in categories {
        let marker = if category == active.as_str() { "*" } else { " " };
        result.push_str(&format!("{} {}\n", marker, category));
    }
    result
}

/// Format the quotes passing `filter` as a numbered list
pub fn format_quote_list(quotes: &QuoteBook, filter: &CategoryFilter) -> String {
    let matching: Vec<&Quote> = quotes.iter().filter(|q| filter.matches(q)).collect();
    if matching.is_empty() {
        return NO_QUOTES_MESSAGE.to_string();
    }

    let mut result = format!(
        "Found {} quote(s) (category: {}):\n\n",
        matching.len(),
        filter
    );
    for (index, quote) in matching.iter().enumerate() {
        result.push_str(&format!(
            "{}. \"{}\" — {}\n",
            index + 1,
            quote.text,
            quote.category
        ));
    }
    result
}

/// Format a completed sync cycle
pub fn format_sync_report(report: &SyncReport) -> String {
    let mut result = format!(
        "Sync finished at {} (started {})\n",
        report.finished_at.format(TIME_FORMAT),
        report.started_at.format(TIME_FORMAT)
    );

    match &report.pull_error {
        Some(e) => result.push_str(&format!("  Pull: failed ({})\n", e)),
        None if report.updated() => result.push_str(&format!(
            "  Pull: quotes updated from server, {} new\n",
            report.inserted.len()
        )),
        None => result.push_str("  Pull: already up to date\n"),
    }

    match (&report.pushed, &report.push_error) {
        (_, Some(e)) => result.push_str(&format!("  Push: failed ({})\n", e)),
        (Some(count), None) => result.push_str(&format!("  Push: sent {} quote(s)\n", count)),
        (None, None) => result.push_str("  Push: not attempted\n"),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn report() -> SyncReport {
        let at = Local.with_ymd_and_hms(2025, 3, 15, 10, 30, 0).unwrap();
        SyncReport {
            started_at: at,
            finished_at: at,
            inserted: vec![Quote::new("Dream big", "Server")],
            pull_error: None,
            pushed: Some(4),
            push_error: None,
        }
    }

    #[test]
    fn test_format_shown_quote() {
        let quote = Quote::new("Be kind", "Ethics");
        assert_eq!(format_shown_quote(Some(&quote)), "\"Be kind\" — Ethics");
        assert_eq!(format_shown_quote(None), NO_QUOTES_MESSAGE);
    }

    #[test]
    fn test_format_categories_marks_active() {
        let categories = vec!["all".to_string(), "X".to_string(), "Y".to_string()];
        let output = format_categories(&categories, &CategoryFilter::Category("X".to_string()));
        assert!(output.starts_with("Categories (2):"));
        assert!(output.contains("* X\n"));
        assert!(output.contains("  all\n"));
    }

    #[test]
    fn test_format_quote_list_filters() {
        let quotes: QuoteBook = vec![Quote::new("a", "X"), Quote::new("b", "Y")].into();
        let output = format_quote_list(&quotes, &CategoryFilter::Category("Y".to_string()));
        assert!(output.contains("Found 1 quote(s) (category: Y)"));
        assert!(output.contains("1. \"b\" — Y"));
        assert!(!output.contains("\"a\""));

        let output = format_quote_list(&quotes, &CategoryFilter::Category("Z".to_string()));
        assert_eq!(output, NO_QUOTES_MESSAGE);
    }

    #[test]
    fn test_format_sync_report() {
        let output = format_sync_report(&report());
        assert!(output.contains("2025-03-15 10:30:00"));
        assert!(output.contains("1 new"));
        assert!(output.contains("sent 4 quote(s)"));

        let mut failed = report();
        failed.inserted.clear();
        failed.pull_error = Some("Remote error: offline".to_string());
        failed.pushed = None;
        failed.push_error = Some("Remote error: offline".to_string());
        let output = format_sync_report(&failed);
        assert!(output.contains("Pull: failed"));
        assert!(output.contains("Push: failed"));
    }
}
