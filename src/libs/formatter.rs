//! Display helpers for dates, durations and long text.
//!
//! All functions are lenient: input they cannot interpret is passed through
//! (dates) or yields `None`/`false` rather than an error.
//!
//! ```rust
//! use soulplanner::libs::formatter::{format_duration, parse_duration};
//!
//! assert_eq!(format_duration(150), "2h 30m");
//! assert_eq!(parse_duration("2h 30m"), Some(150));
//! ```

use super::config::DATE_FORMAT;
use chrono::{Local, NaiveDate};

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

/// Presentation style for [`format_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "Jan 05"
    Short,
    /// "January 05, 2024"
    Long,
    /// "Today", "Tomorrow", "Yesterday", "3 days ago", "In 4 days"
    Relative,
}

/// Parses a `YYYY-MM-DD` date, surrounding whitespace allowed.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Formats a `YYYY-MM-DD` date relative to the current local day.
pub fn format_date(date: &str, style: DateStyle) -> String {
    format_date_on(date, style, today())
}

/// Formats a `YYYY-MM-DD` date; `today` anchors the relative style.
/// Empty input gives an empty string, unparseable input is returned as is.
pub fn format_date_on(date: &str, style: DateStyle, today: NaiveDate) -> String {
    if date.is_empty() {
        return String::new();
    }
    let Some(parsed) = parse_date(date) else {
        return date.to_string();
    };

    match style {
        DateStyle::Short => parsed.format("%b %d").to_string(),
        DateStyle::Long => parsed.format("%B %d, %Y").to_string(),
        DateStyle::Relative => match (parsed - today).num_days() {
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            -1 => "Yesterday".to_string(),
            days if days < 0 => format!("{} days ago", -days),
            days => format!("In {} days", days),
        },
    }
}

/// True when `date` parses and lies before today. Empty or malformed dates
/// are never overdue.
pub fn is_overdue(date: Option<&str>) -> bool {
    date.and_then(parse_date).is_some_and(|due| due < today())
}

/// Shortens `text` to at most `max_length` characters, ending in "..." when cut.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Formats a number of minutes as "45m", "2h", "2h 30m", "1d" or "1d 5h".
/// Days drop the minutes remainder.
pub fn format_duration(minutes: u64) -> String {
    if minutes < MINUTES_PER_HOUR {
        return format!("{}m", minutes);
    }
    if minutes < MINUTES_PER_DAY {
        let hours = minutes / MINUTES_PER_HOUR;
        return match minutes % MINUTES_PER_HOUR {
            0 => format!("{}h", hours),
            rest => format!("{}h {}m", hours, rest),
        };
    }
    let days = minutes / MINUTES_PER_DAY;
    match (minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR {
        0 => format!("{}d", days),
        hours => format!("{}d {}h", days, hours),
    }
}

/// Parses durations such as "2h 30m", "1d 5h" or "45 min" into minutes.
///
/// The first number attached to each of the `d`, `h` and `m` units counts;
/// anything else is ignored. Returns `None` when nothing adds up to more
/// than zero minutes.
pub fn parse_duration(value: &str) -> Option<u64> {
    let lowered = value.trim().to_lowercase();
    let chars: Vec<char> = lowered.chars().collect();
    let (mut days, mut hours, mut minutes) = (None, None, None);

    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let number: u64 = chars[start..i].iter().collect::<String>().parse().ok()?;
        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        let slot = match chars.get(j) {
            Some('d') => &mut days,
            Some('h') => &mut hours,
            Some('m') => &mut minutes,
            _ => continue,
        };
        slot.get_or_insert(number);
    }

    let total = days.unwrap_or(0) * MINUTES_PER_DAY + hours.unwrap_or(0) * MINUTES_PER_HOUR + minutes.unwrap_or(0);
    (total > 0).then_some(total)
}
