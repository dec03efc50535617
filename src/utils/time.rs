use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::Result;

/// Current server time, truncated to the precision we persist.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Storage form of a timestamp. Fixed width, so lexical order is time order.
pub fn to_rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn from_rfc3339(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

/// RFC1123 rendering in a fixed zone, e.g. `Mon, 02 Jan 2006 15:04:05 CET`.
pub fn format_rfc1123_in(dt: DateTime<Utc>, tz: Tz) -> String {
    tz.from_utc_datetime(&dt.naive_utc())
        .format("%a, %d %b %Y %H:%M:%S %Z")
        .to_string()
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 12 * MONTH;
const LONG_TIME: i64 = 37 * YEAR;

enum Unit {
    Fixed(&'static str),
    Count(&'static str, i64),
}

// (upper bound in seconds, rendering). The first bound the delta is below wins.
const MAGNITUDES: &[(i64, Unit)] = &[
    (1, Unit::Fixed("now")),
    (2, Unit::Fixed("1 second")),
    (MINUTE, Unit::Count("seconds", 1)),
    (2 * MINUTE, Unit::Fixed("1 minute")),
    (HOUR, Unit::Count("minutes", MINUTE)),
    (2 * HOUR, Unit::Fixed("1 hour")),
    (DAY, Unit::Count("hours", HOUR)),
    (2 * DAY, Unit::Fixed("1 day")),
    (WEEK, Unit::Count("days", DAY)),
    (2 * WEEK, Unit::Fixed("1 week")),
    (MONTH, Unit::Count("weeks", WEEK)),
    (2 * MONTH, Unit::Fixed("1 month")),
    (YEAR, Unit::Count("months", MONTH)),
    (18 * MONTH, Unit::Fixed("1 year")),
    (2 * YEAR, Unit::Fixed("2 years")),
    (LONG_TIME, Unit::Count("years", YEAR)),
];

/// Relative description of `then` as seen from `now`: "3 hours ago",
/// "2 days from now", "now".
pub fn humanize(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta: Duration = now - then;
    let (secs, suffix) = if delta < Duration::zero() {
        (-delta.num_seconds(), "from now")
    } else {
        (delta.num_seconds(), "ago")
    };

    for (bound, unit) in MAGNITUDES {
        if secs < *bound {
            return match unit {
                Unit::Fixed("now") => "now".to_string(),
                Unit::Fixed(text) => format!("{} {}", text, suffix),
                Unit::Count(label, per) => format!("{} {} {}", secs / per, label, suffix),
            };
        }
    }
    format!("a long while {}", suffix)
}
