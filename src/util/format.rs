//! Display helpers for terminal reports.

use time::OffsetDateTime;

/// `1234567.4` -> `"$1,234,567"`
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}

pub fn format_multiple(value: f64) -> String {
    format!("{value:.2}x")
}

/// Signed adjustment, e.g. `+0.25` / `-0.10` / `0.00`.
pub fn format_adjustment(value: f64) -> String {
    if value.abs() < 0.005 {
        "0.00".to_string()
    } else {
        format!("{value:+.2}")
    }
}

/// Human-readable age of a timestamp relative to `now`.
pub fn age_string(created_at: OffsetDateTime, now: OffsetDateTime) -> String {
    let secs = (now - created_at).whole_seconds().max(0);
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}
