use chrono::{Datelike, NaiveDate};

/// Placeholder the RDW front-ends show for a missing or unparseable date.
pub const NOT_APPLICABLE: &str = "n.v.t.";

/// CLDR abbreviated month names for the `nl-NL` locale.
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan.", "feb.", "mrt.", "apr.", "mei", "jun.", "jul.", "aug.", "sep.", "okt.", "nov.", "dec.",
];

fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Parses an RDW `YYYYMMDD` date string into a calendar date.
///
/// Separators and other non-digit characters are stripped first, so
/// `"2023-12-15"` and `"20231215"` parse identically. Anything that does not
/// reduce to exactly 8 digits, or names a day/month outside the calendar, is
/// `None`.
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let digits = digits_only(raw?);
    if digits.len() != 8 {
        return None;
    }

    let year = digits[0..4].parse::<i32>().ok()?;
    let month = digits[4..6].parse::<u32>().ok()?;
    let day = digits[6..8].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Numeric comparator key for an RDW date string.
///
/// Skips calendar validation on purpose: an 8-digit string that fails
/// [`parse_date`] still orders numerically, so malformed dates keep a stable
/// position instead of collapsing into the absent bucket.
pub fn sort_key(raw: Option<&str>) -> Option<u32> {
    let digits = digits_only(raw?);
    if digits.len() != 8 {
        return None;
    }

    digits.parse().ok()
}

/// Formats a calendar date the way the Dutch dashboards do, e.g. `15 dec. 2023`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTH_ABBREVIATIONS[date.month0() as usize],
        date.year()
    )
}

/// Formats a raw RDW date string for display, substituting [`NOT_APPLICABLE`]
/// when the value does not parse.
pub fn format_raw(raw: Option<&str>) -> String {
    match parse_date(raw) {
        Some(date) => format_date(date),
        None => NOT_APPLICABLE.to_string(),
    }
}
