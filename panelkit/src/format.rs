//! Display formatting and lenient parsing shared by the components.
//!
//! Formatting follows the panel's pt-BR conventions (`R$ 1.234,56`,
//! `dd/mm/yyyy`).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Format a monetary value as Brazilian reais.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}R$ {}", format_number(value.abs(), 2))
}

/// Format a number with `.` thousands separators and `,` decimal mark.
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped},{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Format a date as `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a date-time as `dd/mm/yyyy HH:MM`.
pub fn format_date_time(date: NaiveDateTime) -> String {
    date.format("%d/%m/%Y %H:%M").to_string()
}

/// Parse the date formats the backend emits.
///
/// Accepts RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` and
/// `YYYY-MM-DD HH:MM:SS` (naive values are taken as UTC).
pub fn parse_date_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Epoch milliseconds of a date string, if it parses.
pub fn parse_date_millis(text: &str) -> Option<i64> {
    parse_date_time(text).map(|dt| dt.timestamp_millis())
}

/// Parse the longest numeric prefix of `text`, the way `parseFloat` does.
///
/// `"12.5kg"` → `12.5`, `"  -3e2"` → `-300`, `"abc"` → `None`.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || has_digits {
            has_digits |= frac_end > frac_start;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Human-readable byte size (`0 B`, `1.5 KB`, `10 MB`).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut index = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    index = index.min(UNITS.len() - 1);
    let mut rounded = round_size(bytes, index);
    // 1023.999 MB rounds up to 1024 MB; show it as 1 GB instead.
    if rounded >= 1024.0 && index < UNITS.len() - 1 {
        index += 1;
        rounded = round_size(bytes, index);
    }
    format!("{rounded} {}", UNITS[index])
}

fn round_size(bytes: u64, index: usize) -> f64 {
    let scaled = bytes as f64 / 1024f64.powi(index as i32);
    (scaled * 100.0).round() / 100.0
}

/// Coarse relative time used in notification lists.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    match seconds {
        s if s < 60 => "agora".to_string(),
        s if s < 3_600 => format!("{} min atrás", s / 60),
        s if s < 86_400 => format!("{} h atrás", s / 3_600),
        s => format!("{} dias atrás", s / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(1234.5), "R$ 1.234,50");
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(-99.999), "-R$ 100,00");
        assert_eq!(format_currency(1_000_000.0), "R$ 1.000.000,00");
    }

    #[test]
    fn test_leading_float() {
        assert_eq!(parse_leading_float("12.5kg"), Some(12.5));
        assert_eq!(parse_leading_float("  -3e2"), Some(-300.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("7."), Some(7.0));
        assert_eq!(parse_leading_float("1e"), Some(1.0));
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float("-"), None);
    }

    #[test]
    fn test_dates() {
        assert_eq!(parse_date_millis("1970-01-02"), Some(86_400_000));
        assert_eq!(
            parse_date_millis("2024-03-01T10:00:00Z"),
            parse_date_millis("2024-03-01 10:00:00")
        );
        assert_eq!(parse_date_millis("not a date"), None);
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(date), "09/03/2024");
    }

    #[test]
    fn test_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_size(1_073_741_823), "1 GB");
        assert_eq!(format_size(1_048_575), "1 MB");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn test_relative_time() {
        let now = Utc::now();
        assert_eq!(relative_time(now, now), "agora");
        assert_eq!(relative_time(now - chrono::Duration::minutes(5), now), "5 min atrás");
        assert_eq!(relative_time(now - chrono::Duration::hours(3), now), "3 h atrás");
        assert_eq!(relative_time(now - chrono::Duration::days(2), now), "2 dias atrás");
    }
}
