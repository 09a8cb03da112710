//! Row comparison for client-side sorting.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::column::{ColumnType, value_text};
use crate::format::{parse_date_millis, parse_leading_float};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// `aria-sort` value.
    pub fn aria(&self) -> &'static str {
        match self {
            Self::Asc => "ascending",
            Self::Desc => "descending",
        }
    }
}

/// Ascending comparison of two field values for a column type.
///
/// Numbers and currency compare as parsed floats, dates as epoch
/// milliseconds (anything unparseable counts as 0), everything else as
/// text.
pub fn compare_values(kind: ColumnType, a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match kind {
        ColumnType::Number | ColumnType::Currency => numeric(a).total_cmp(&numeric(b)),
        ColumnType::Date => date_millis(a).cmp(&date_millis(b)),
        ColumnType::Text | ColumnType::Status => {
            let a = a.map(value_text).unwrap_or_default();
            let b = b.map(value_text).unwrap_or_default();
            compare_text(&a, &b)
        }
    }
}

fn numeric(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_leading_float(s),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|n| !n.is_nan()).unwrap_or(0.0)
}

fn date_millis(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::String(s)) => parse_date_millis(s).unwrap_or(0),
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        _ => 0,
    }
}

/// Collation for Portuguese text.
///
/// Letters compare case- and accent-insensitively first; ties are broken
/// unaccented before accented, then lowercase before uppercase.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| s.chars().flat_map(char::to_lowercase).map(strip_accent).collect::<String>();
    let secondary = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<String>();
    let tertiary = |s: &str| s.chars().map(char::is_uppercase).collect::<Vec<_>>();

    primary(a)
        .cmp(&primary(b))
        .then_with(|| secondary(a).cmp(&secondary(b)))
        .then_with(|| tertiary(a).cmp(&tertiary(b)))
}

fn strip_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}
