use std::collections::HashSet;

use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime};

use crate::models::ColumnKind;

// Formats carrying a time component must be tried before date-only ones.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];

/// Excel serial dates count days from 1899-12-30; that instant is
/// -2208988800 in unix seconds.
const EXCEL_EPOCH_UNIX_SECONDS: i64 = -2_208_988_800;

/// Classify a column from its data cells (header excluded).
///
/// The tag is decided once, up front: a column is `Numeric` or `DateTime`
/// only when every non-empty cell agrees; anything mixed degrades to
/// `Other`, as does a fully empty column.
pub fn classify_column(values: &[Data]) -> ColumnKind {
    let mut numeric = 0usize;
    let mut date = 0usize;
    let mut total = 0usize;

    for value in values {
        match value {
            Data::Empty => continue,
            Data::Float(_) | Data::Int(_) => numeric += 1,
            Data::DateTime(_) | Data::DateTimeIso(_) => date += 1,
            Data::String(s) if is_date_string(s) => date += 1,
            _ => {}
        }
        total += 1;
    }

    if total == 0 {
        ColumnKind::Other
    } else if numeric == total {
        ColumnKind::Numeric
    } else if date == total {
        ColumnKind::DateTime
    } else {
        ColumnKind::Other
    }
}

pub fn is_date_string(s: &str) -> bool {
    parse_date_string(s).is_some()
}

/// Parse a cell string against the known format list.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Convert an Excel serial datetime (days since 1899-12-30) to unix seconds.
pub fn excel_serial_to_unix_seconds(days: f64) -> i64 {
    (days * 86_400.0).round() as i64 + EXCEL_EPOCH_UNIX_SECONDS
}

/// Render unix seconds as an ISO-8601 timestamp.
pub fn format_unix_seconds(seconds: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// Normalize a header cell into a stable column name, suffixing duplicates.
pub fn clean_column_name(name: &str, existing_names: &mut HashSet<String>) -> String {
    let base_name = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect::<String>()
        .to_lowercase();

    let mut cleaned = if base_name.chars().next().map_or(true, |c| !c.is_alphabetic()) {
        format!("col_{}", base_name)
    } else {
        base_name
    };

    let mut counter = 1;
    let original_name = cleaned.clone();
    while !existing_names.insert(cleaned.clone()) {
        cleaned = format!("{}_{}", original_name, counter);
        counter += 1;
    }

    cleaned
}

/// Reduce a sheet name to a file stem safe for `describe_<sheet>.csv`.
pub fn sanitize_file_stem(name: &str) -> String {
    let cleaned = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect::<String>()
        .to_lowercase();

    if cleaned.is_empty() {
        "sheet".to_string()
    } else {
        cleaned
    }
}
