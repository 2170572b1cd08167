//! Result line formatting.

use chrono::{DateTime, Datelike, Utc};

use crate::config::MAX_SCREEN_NAME_SIZE;
use crate::twitter::Post;

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 1_440;
const MINUTES_PER_MONTH: i64 = 43_200;
const MINUTES_PER_YEAR: i64 = 525_600;
const MINUTES_PER_QUARTER_YEAR: i64 = 131_400;
const MINUTES_PER_THREE_QUARTERS_YEAR: i64 = 394_200;

/// Render one post as `<handle right-aligned>: <text> (<age> ago)`.
#[must_use]
pub fn format_line(post: &Post, now: DateTime<Utc>) -> String {
    format!(
        "{:>width$}: {} ({} ago)",
        post.author_handle,
        post.text,
        time_ago_in_words(post.created_at, now),
        width = MAX_SCREEN_NAME_SIZE
    )
}

/// Approximate distance between `then` and `now` in words.
///
/// Uses the familiar scale of "less than a minute", "about 2 hours",
/// "3 days", "over 1 year" and so on. Timestamps in the future count
/// as no time at all.
#[must_use]
pub fn time_ago_in_words(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    let minutes = round_div(seconds, 60);

    match minutes {
        0 => "less than a minute".to_string(),
        1 => "1 minute".to_string(),
        2..=44 => format!("{minutes} minutes"),
        45..=89 => "about 1 hour".to_string(),
        90..=1_439 => format!("about {} hours", round_div(minutes, MINUTES_PER_HOUR)),
        1_440..=2_519 => "1 day".to_string(),
        2_520..=43_199 => format!("{} days", round_div(minutes, MINUTES_PER_DAY)),
        43_200..=86_399 => "about 1 month".to_string(),
        86_400..=525_599 => format!("{} months", round_div(minutes, MINUTES_PER_MONTH)),
        _ => years_in_words(minutes, then, now),
    }
}

fn years_in_words(minutes: i64, then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = minutes - leap_days_between(then, now) * MINUTES_PER_DAY;
    let years = minutes / MINUTES_PER_YEAR;
    let remainder = minutes % MINUTES_PER_YEAR;

    if remainder < MINUTES_PER_QUARTER_YEAR {
        format!("about {}", pluralize(years, "year"))
    } else if remainder < MINUTES_PER_THREE_QUARTERS_YEAR {
        format!("over {}", pluralize(years, "year"))
    } else {
        format!("almost {}", pluralize(years + 1, "year"))
    }
}

/// Number of Feb 29ths that can fall between `then` and `now`.
fn leap_days_between(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let mut first = then.year();
    if then.month() >= 3 {
        first += 1;
    }
    let mut last = now.year();
    if now.month() < 3 {
        last -= 1;
    }

    let count = (first..=last).filter(|&year| is_leap_year(year)).count();
    i64::try_from(count).unwrap_or(0)
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn pluralize(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Integer division rounding halves up, for non-negative values.
fn round_div(value: i64, divisor: i64) -> i64 {
    (value + divisor / 2) / divisor
}
