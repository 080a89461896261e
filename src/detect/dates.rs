//! Date normalization — raw date/time substrings to absolute instants.
//!
//! Resolution order: relative phrase in the surrounding context, then the
//! explicit date grammars, then give up. Giving up is a soft failure (the
//! candidate match is dropped); no parse error ever escapes this module.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// An absolute deadline instant plus the facts that drive fallback policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedDate {
    /// The resolved instant, UTC.
    pub timestamp: DateTime<Utc>,
    /// False when the source text had no year component; such dates are
    /// rolled forward a year if they would otherwise land in the past.
    pub had_explicit_year: bool,
    /// False when no time substring was captured; the time-of-day then
    /// defaults to midnight.
    pub had_explicit_time: bool,
}

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("iso date regex"));
static SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?$").expect("slash date regex"));
static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)\s+(\d{1,2})(?:,?\s+(\d{4}))?$").expect("month-day regex")
});
static DAY_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})\s+([A-Za-z]+)(?:\s+(\d{4}))?$").expect("day-month regex")
});
static TIME_OF_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?::(\d{2}))?\s*(am|pm)?$").expect("time regex")
});

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Relative phrases checked against the context, in priority order.
const RELATIVE_PHRASES: [&str; 5] =
    ["tomorrow", "next week", "next month", "end of week", "end of month"];

/// Normalizes a date substring (plus optional time substring) into an
/// absolute instant.
///
/// `context` is the chunk text the match came from; a relative phrase found
/// there wins over the explicit grammars. Returns `None` when neither
/// resolves or the resulting calendar date is invalid.
#[must_use]
pub fn normalize(
    date_text: &str,
    time_text: Option<&str>,
    context: &str,
    now: DateTime<Utc>,
) -> Option<NormalizedDate> {
    let (date, had_explicit_year, relative) = match resolve_relative(context, now) {
        Some(date) => (date, false, true),
        None => {
            let (date, had_year) = parse_grammar(date_text.trim(), now)?;
            (date, had_year, false)
        }
    };

    let (time, had_explicit_time) = match time_text.and_then(parse_time) {
        Some(time) => (time, true),
        None => (NaiveTime::MIN, false),
    };

    let mut timestamp = date.and_time(time).and_utc();

    // Year rollover: "Oct 15" typed in November means next October, not an
    // already-overdue date. Relative phrases are computed from `now` and are
    // exempt.
    if !had_explicit_year && !relative && timestamp < now {
        let next_year = date.year() + 1;
        let rolled = NaiveDate::from_ymd_opt(next_year, date.month(), date.day())?;
        timestamp = rolled.and_time(time).and_utc();
    }

    // A zero-offset relative phrase ("end of week" on a Sunday, "end of
    // month" on the last day) with no captured time lands at midnight,
    // already behind `now`. Due today means due by end of day.
    if relative && !had_explicit_time && timestamp < now {
        timestamp = date.and_time(NaiveTime::from_hms_opt(23, 59, 59)?).and_utc();
    }

    Some(NormalizedDate { timestamp, had_explicit_year, had_explicit_time })
}

/// Resolves a relative phrase found in the context to a calendar date.
fn resolve_relative(context: &str, now: DateTime<Utc>) -> Option<NaiveDate> {
    let lowered = context.to_lowercase();
    let phrase = RELATIVE_PHRASES.iter().find(|p| lowered.contains(**p))?;
    let today = now.date_naive();
    let offset_days = match *phrase {
        "tomorrow" => 1,
        "next week" => 7,
        "next month" => 30,
        "end of week" => {
            // Days until the next Sunday; 0 when today is Sunday.
            let from_sunday = i64::from(now.weekday().num_days_from_sunday());
            if from_sunday == 0 {
                0
            } else {
                7 - from_sunday
            }
        }
        "end of month" => i64::from(last_day_of_month(today) - today.day()),
        _ => unreachable!(),
    };
    today.checked_add_signed(Duration::days(offset_days))
}

/// Parses the cleaned date substring against the four explicit grammars.
///
/// Returns the calendar date and whether the grammar carried a year.
fn parse_grammar(text: &str, now: DateTime<Utc>) -> Option<(NaiveDate, bool)> {
    if let Some(caps) = ISO_DATE.captures(text) {
        let date = NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        )?;
        return Some((date, true));
    }

    if let Some(caps) = SLASH_DATE.captures(text) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let year = caps.get(3).map(|y| expand_year(y.as_str()));
        let date = NaiveDate::from_ymd_opt(year.unwrap_or_else(|| now.year()), month, day)?;
        return Some((date, year.is_some()));
    }

    if let Some(caps) = MONTH_DAY.captures(text) {
        let month = month_from_name(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: Option<i32> = caps.get(3).and_then(|y| y.as_str().parse().ok());
        let date = NaiveDate::from_ymd_opt(year.unwrap_or_else(|| now.year()), month, day)?;
        return Some((date, year.is_some()));
    }

    if let Some(caps) = DAY_MONTH.captures(text) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_from_name(&caps[2])?;
        let year: Option<i32> = caps.get(3).and_then(|y| y.as_str().parse().ok());
        let date = NaiveDate::from_ymd_opt(year.unwrap_or_else(|| now.year()), month, day)?;
        return Some((date, year.is_some()));
    }

    None
}

/// Parses `H[:MM][am|pm]`; `pm` adds 12 hours when the hour is under 12.
fn parse_time(text: &str) -> Option<NaiveTime> {
    let caps = TIME_OF_DAY.captures(text.trim())?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
    if let Some(meridiem) = caps.get(3) {
        if meridiem.as_str().eq_ignore_ascii_case("pm") && hour < 12 {
            hour += 12;
        }
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Maps a month name or unambiguous prefix (3+ letters) to its number.
fn month_from_name(name: &str) -> Option<u32> {
    let lowered = name.to_lowercase();
    if lowered.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|m| m.starts_with(&lowered))
        .map(|i| u32::try_from(i).unwrap_or(0) + 1)
}

/// Expands a two-digit year to 20xx; four-digit years pass through.
fn expand_year(text: &str) -> i32 {
    let year: i32 = text.parse().unwrap_or(0);
    if year < 100 {
        2000 + year
    } else {
        year
    }
}

fn last_day_of_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(28, |d| d.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn month_day_year_resolves_to_midnight() {
        let now = at(2025, 1, 1, 0, 0);
        let result = normalize("Oct 15, 2025", None, "submit by Oct 15, 2025", now).unwrap();
        assert_eq!(result.timestamp, at(2025, 10, 15, 0, 0));
        assert!(result.had_explicit_year);
        assert!(!result.had_explicit_time);
    }

    #[test]
    fn iso_and_slash_dates_resolve() {
        let now = at(2025, 1, 1, 0, 0);
        let iso = normalize("2025-05-01", None, "exam on 2025-05-01", now).unwrap();
        assert_eq!(iso.timestamp, at(2025, 5, 1, 0, 0));
        let slash = normalize("10/15/2025", None, "due 10/15/2025", now).unwrap();
        assert_eq!(slash.timestamp, at(2025, 10, 15, 0, 0));
    }

    #[test]
    fn day_month_grammar_resolves() {
        let now = at(2025, 1, 1, 0, 0);
        let result = normalize("15 October 2025", None, "until 15 October 2025", now).unwrap();
        assert_eq!(result.timestamp, at(2025, 10, 15, 0, 0));
    }

    #[test]
    fn two_digit_year_expands() {
        let now = at(2025, 1, 1, 0, 0);
        let result = normalize("10/15/25", None, "due 10/15/25", now).unwrap();
        assert_eq!(result.timestamp, at(2025, 10, 15, 0, 0));
    }

    #[test]
    fn missing_year_rolls_forward_when_past() {
        // "11/03" typed on 2025-12-01 means 2026-11-03.
        let now = at(2025, 12, 1, 9, 0);
        let result = normalize("11/03", None, "report due 11/03", now).unwrap();
        assert_eq!(result.timestamp, at(2026, 11, 3, 0, 0));
        assert!(!result.had_explicit_year);
        assert!(result.timestamp >= now);
    }

    #[test]
    fn missing_year_stays_when_future() {
        let now = at(2025, 1, 1, 0, 0);
        let result = normalize("Oct 15", None, "submit by Oct 15", now).unwrap();
        assert_eq!(result.timestamp, at(2025, 10, 15, 0, 0));
        assert!(!result.had_explicit_year);
    }

    #[test]
    fn tomorrow_with_time_refinement() {
        let now = at(2025, 6, 1, 8, 0);
        let result = normalize("tomorrow", Some("5pm"), "due tomorrow at 5pm", now).unwrap();
        assert_eq!(result.timestamp, at(2025, 6, 2, 17, 0));
        assert!(result.had_explicit_time);
        assert!(!result.had_explicit_year);
    }

    #[test]
    fn next_week_and_next_month_offsets() {
        let now = at(2025, 6, 1, 8, 0);
        let week = normalize("next week", None, "submit by next week", now).unwrap();
        assert_eq!(week.timestamp, at(2025, 6, 8, 0, 0));
        let month = normalize("next month", None, "submit by next month", now).unwrap();
        assert_eq!(month.timestamp, at(2025, 7, 1, 0, 0));
    }

    #[test]
    fn end_of_week_lands_on_next_sunday() {
        // 2025-06-03 is a Tuesday; next Sunday is 2025-06-08.
        let now = at(2025, 6, 3, 8, 0);
        let result = normalize("end of week", None, "due end of week", now).unwrap();
        assert_eq!(result.timestamp, at(2025, 6, 8, 0, 0));
    }

    #[test]
    fn end_of_month_lands_on_last_day() {
        let now = at(2025, 2, 10, 8, 0);
        let result = normalize("end of month", None, "due end of month", now).unwrap();
        assert_eq!(result.timestamp, at(2025, 2, 28, 0, 0));
    }

    #[test]
    fn end_of_week_on_a_sunday_means_end_of_today() {
        // 2025-06-01 is a Sunday; with no explicit time the deadline moves
        // to end of day rather than resolving behind `now`.
        let now = at(2025, 6, 1, 10, 0);
        let result = normalize("end of week", None, "report due end of week", now).unwrap();
        assert_eq!(result.timestamp, Utc.with_ymd_and_hms(2025, 6, 1, 23, 59, 59).unwrap());
        assert!(result.timestamp >= now);
    }

    #[test]
    fn end_of_month_on_the_last_day_means_end_of_today() {
        let now = at(2025, 6, 30, 10, 0);
        let result = normalize("end of month", None, "due end of month", now).unwrap();
        assert_eq!(result.timestamp, Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap());
    }

    #[test]
    fn same_day_relative_with_explicit_past_time_stays_past() {
        // "end of week at 8am" read at 10am names an instant that has
        // already gone; no clamp applies when a time was captured.
        let now = at(2025, 6, 1, 10, 0);
        let result = normalize("end of week", Some("8am"), "due end of week at 8am", now).unwrap();
        assert_eq!(result.timestamp, at(2025, 6, 1, 8, 0));
    }

    #[test]
    fn relative_phrase_wins_over_grammar() {
        let now = at(2025, 6, 1, 8, 0);
        let result = normalize("Oct 15", None, "due tomorrow, not Oct 15", now).unwrap();
        assert_eq!(result.timestamp, at(2025, 6, 2, 0, 0));
    }

    #[test]
    fn twenty_four_hour_time_passes_through() {
        let now = at(2025, 6, 1, 8, 0);
        let result = normalize("2025-06-05", Some("17:30"), "before 17:30 on 2025-06-05", now)
            .unwrap();
        assert_eq!(result.timestamp, at(2025, 6, 5, 17, 30));
    }

    #[test]
    fn garbage_yields_none_not_panic() {
        let now = at(2025, 6, 1, 8, 0);
        assert!(normalize("not a date", None, "no phrases here", now).is_none());
        assert!(normalize("99/99", None, "due 99/99", now).is_none());
        assert!(normalize("Febtember 5", None, "due Febtember 5", now).is_none());
    }

    #[test]
    fn invalid_calendar_day_is_rejected() {
        let now = at(2025, 1, 1, 0, 0);
        assert!(normalize("Feb 30", None, "due Feb 30", now).is_none());
    }

    #[test]
    fn month_prefix_of_three_letters_parses() {
        assert_eq!(month_from_name("Sep"), Some(9));
        assert_eq!(month_from_name("September"), Some(9));
        assert_eq!(month_from_name("Se"), None);
        assert_eq!(month_from_name("Xyz"), None);
    }
}
