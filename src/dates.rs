use chrono::{DateTime, NaiveDate};

/// The two display shapes the client needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `yyyy-MM-dd`, for pre-filling the edit form.
    Iso,
    /// `MMM dd, yyyy`, for list display.
    Human,
}

/// Format a backend date string for display. Missing input degrades to
/// `"Unknown"` and unparsable input to `"Invalid Date"` instead of erroring.
pub fn safe_format_date(value: Option<&str>, format: DateFormat) -> String {
    let Some(raw) = value else {
        return "Unknown".to_string();
    };
    if raw.is_empty() {
        return "Unknown".to_string();
    }
    match parse_date(raw) {
        Some(date) => match format {
            DateFormat::Iso => date.format("%Y-%m-%d").to_string(),
            DateFormat::Human => date.format("%b %d, %Y").to_string(),
        },
        None => "Invalid Date".to_string(),
    }
}

/// Accept the two shapes the backend and the form produce: RFC 3339
/// timestamps and bare `yyyy-MM-dd` dates.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Convert `yyyy-MM-dd` form text into the RFC 3339 midnight-UTC timestamp
/// the backend stores. Empty text means no due date; unparsable text is an
/// error the submit path reports.
pub fn form_date_to_wire(text: &str) -> anyhow::Result<Option<String>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid due date '{text}': {e}"))?;
    Ok(Some(format!("{}T00:00:00Z", date.format("%Y-%m-%d"))))
}
