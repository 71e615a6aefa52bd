//! Cell coercion.
//!
//! Spreadsheet cells arrive as free text. Counts that do not parse become
//! zero and periods that do not parse become `None`; neither is an error.

use chrono::NaiveDate;

/// Parses an equipment count.
///
/// Accepts a decimal comma. Blank, non-numeric, negative and non-finite
/// values yield `0.0`.
///
/// # Example
///
/// ```
/// use maintenance_planner::input::coerce_count;
///
/// assert_eq!(coerce_count("3"), 3.0);
/// assert_eq!(coerce_count(" 3,5 "), 3.5);
/// assert_eq!(coerce_count("n/a"), 0.0);
/// assert_eq!(coerce_count("-2"), 0.0);
/// ```
pub fn coerce_count(text: &str) -> f64 {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

const MONTH_NAMES: &[(&str, u32)] = &[
    ("janvier", 1),
    ("janv", 1),
    ("january", 1),
    ("jan", 1),
    ("février", 2),
    ("fevrier", 2),
    ("févr", 2),
    ("fevr", 2),
    ("february", 2),
    ("feb", 2),
    ("fév", 2),
    ("mars", 3),
    ("march", 3),
    ("mar", 3),
    ("avril", 4),
    ("avr", 4),
    ("april", 4),
    ("apr", 4),
    ("mai", 5),
    ("may", 5),
    ("juin", 6),
    ("june", 6),
    ("jun", 6),
    ("juillet", 7),
    ("juil", 7),
    ("july", 7),
    ("jul", 7),
    ("août", 8),
    ("aout", 8),
    ("august", 8),
    ("aug", 8),
    ("septembre", 9),
    ("sept", 9),
    ("september", 9),
    ("sep", 9),
    ("octobre", 10),
    ("october", 10),
    ("oct", 10),
    ("novembre", 11),
    ("november", 11),
    ("nov", 11),
    ("décembre", 12),
    ("decembre", 12),
    ("déc", 12),
    ("december", 12),
    ("dec", 12),
];

/// Parses a month cell into the first day of that month.
///
/// Recognised forms: `YYYY-MM`, `YYYY-MM-DD`, `YYYY/MM`, `MM/YYYY`,
/// `DD/MM/YYYY`, and a French or English month name followed by a year
/// (`mars 2025`, `March 2025`, `févr. 2025`).
///
/// # Example
///
/// ```
/// use maintenance_planner::input::parse_period;
/// use chrono::NaiveDate;
///
/// let march = NaiveDate::from_ymd_opt(2025, 3, 1);
/// assert_eq!(parse_period("2025-03"), march);
/// assert_eq!(parse_period("03/2025"), march);
/// assert_eq!(parse_period("Mars 2025"), march);
/// assert_eq!(parse_period("someday"), None);
/// ```
pub fn parse_period(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    parse_numeric(text).or_else(|| parse_named(text))
}

fn first_of(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn num(part: &str) -> Option<u32> {
    part.parse().ok()
}

fn parse_numeric(text: &str) -> Option<NaiveDate> {
    // Tolerates a trailing time component, e.g. "2025-03-01 00:00:00"
    let text = text.split_whitespace().next()?;
    let parts: Vec<&str> = text.split(['-', '/', '.']).collect();
    if !parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }
    match parts.as_slice() {
        [y, m] if y.len() == 4 => first_of(y.parse().ok()?, num(m)?),
        [m, y] if y.len() == 4 => first_of(y.parse().ok()?, num(m)?),
        [y, m, d] if y.len() == 4 => {
            NaiveDate::from_ymd_opt(y.parse().ok()?, num(m)?, num(d)?)?;
            first_of(y.parse().ok()?, num(m)?)
        }
        [d, m, y] if y.len() == 4 => {
            NaiveDate::from_ymd_opt(y.parse().ok()?, num(m)?, num(d)?)?;
            first_of(y.parse().ok()?, num(m)?)
        }
        _ => None,
    }
}

fn parse_named(text: &str) -> Option<NaiveDate> {
    let lower = text.to_lowercase();
    let mut words = lower
        .split(|c: char| c.is_whitespace() || c == '-' || c == '/')
        .filter(|w| !w.is_empty());
    let name = words.next()?.trim_end_matches('.');
    let year = words.next()?;
    if words.next().is_some() || year.len() != 4 {
        return None;
    }
    let month = MONTH_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, month)| *month)?;
    first_of(year.parse().ok()?, month)
}
