use chrono::{DateTime, NaiveTime, Utc};

use super::dates;

/// Forward-looking window the dashboard uses for "APK verloopt binnenkort".
pub const DEFAULT_WINDOW_DAYS: i64 = 60;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Whether an APK expiry date falls inside the forward window from `now`.
///
/// The expiry side is the parsed date at UTC midnight, the `now` side is the
/// caller's instant; the fractional-day difference must satisfy
/// `0 <= diff <= window_days`, both edges inclusive. A date in the past is
/// never "expiring soon", and an absent or unparseable date is `false`.
pub fn is_expiring_soon(raw: Option<&str>, window_days: i64, now: DateTime<Utc>) -> bool {
    let Some(expiry) = dates::parse_date(raw) else {
        return false;
    };

    let expiry_midnight = expiry.and_time(NaiveTime::MIN).and_utc();
    let diff_days = (expiry_midnight - now).num_milliseconds() as f64 / MS_PER_DAY;
    diff_days >= 0.0 && diff_days <= window_days as f64
}
