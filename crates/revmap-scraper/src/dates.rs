//! Review-date normalization.
//!
//! Platforms render review dates as free-form Russian phrases — relative
//! ("2 часа назад"), same-day ("сегодня 14:30"), month-name ("15 марта
//! 2024") or numeric ("15.03.2024"). Everything resolves against an explicit
//! reference time supplied by the caller, never the wall clock, so parsing
//! stays deterministic under test.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// Russian genitive month names as they appear in rendered dates.
const MONTHS: [(&str, u32); 12] = [
    ("января", 1),
    ("февраля", 2),
    ("марта", 3),
    ("апреля", 4),
    ("мая", 5),
    ("июня", 6),
    ("июля", 7),
    ("августа", 8),
    ("сентября", 9),
    ("октября", 10),
    ("ноября", 11),
    ("декабря", 12),
];

/// Parses a rendered review date into an absolute timestamp.
///
/// The input is lowercased and trimmed, then the recognized forms are tried
/// in priority order — relative offsets, "сегодня", day-with-month-name,
/// numeric `DD.MM[.YYYY]` — and the first match wins. Returns `None` when no
/// form matches or a matched form fails to validate (e.g. "31.02.2024").
#[must_use]
pub fn parse_review_date(raw: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    if let Some(parsed) = parse_relative(&text, now) {
        return Some(parsed);
    }
    if let Some(parsed) = parse_today(&text, now) {
        return Some(parsed);
    }
    if let Some(parsed) = parse_month_name(&text, now) {
        return Some(parsed);
    }
    parse_numeric(&text, now)
}

/// `"<N> час/часа/часов | день/дня/дней | минуту/минуты/минут назад"`.
fn parse_relative(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let re = Regex::new(r"^(\d+)\s+(час(?:а|ов)?|д(?:ень|ня|ней)|минут(?:у|ы)?)\s+назад")
        .expect("valid relative date regex");
    let caps = re.captures(text)?;
    let amount: i64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str();

    let delta = if unit.starts_with("час") {
        Duration::hours(amount)
    } else if unit.starts_with('д') {
        Duration::days(amount)
    } else {
        Duration::minutes(amount)
    };
    now.checked_sub_signed(delta)
}

/// `"сегодня"` optionally followed by `HH:MM`; no time means midnight.
fn parse_today(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let rest = text.strip_prefix("сегодня")?.trim();
    if rest.contains(':') {
        let time = NaiveTime::parse_from_str(rest, "%H:%M").ok()?;
        return Some(NaiveDateTime::new(now.date(), time));
    }
    Some(now.date().and_time(NaiveTime::MIN))
}

/// `"<day> <month-name> [<year>]"`, month via the genitive table; the year
/// defaults to the reference year when omitted.
fn parse_month_name(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let mut parts = text.split_whitespace();
    let day: u32 = parts.next()?.parse().ok()?;
    let month_name = parts.next()?;
    let month = MONTHS
        .iter()
        .find(|(name, _)| *name == month_name)
        .map(|(_, number)| *number)?;
    let year = match parts.next() {
        Some(token) => token.parse::<i32>().ok()?,
        None => now.year(),
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.and_time(NaiveTime::MIN))
}

/// `"DD.MM.YYYY"` or `"DD.MM"`; the year defaults to the reference year.
fn parse_numeric(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let re = Regex::new(r"^(\d{1,2})\.(\d{1,2})(?:\.(\d{4}))?$").expect("valid numeric date regex");
    let caps = re.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year = match caps.get(3) {
        Some(year) => year.as_str().parse::<i32>().ok()?,
        None => now.year(),
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.and_time(NaiveTime::MIN))
}
