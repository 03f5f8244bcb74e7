//! Time helpers — business timezone conversion
//!
//! All date-to-timestamp conversion happens at the API handler layer;
//! the repository layer only ever sees `i64` Unix millis.

use chrono::NaiveDate;
use chrono_tz::Tz;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Date + hour/min/sec in the business timezone -> Unix millis
///
/// DST gap fallback: if the local time does not exist (spring-forward),
/// fall back to UTC.
pub fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(hour, min, sec).unwrap_or_else(|| {
        date.and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time")
    });
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Start of a date (00:00:00) in the business timezone -> Unix millis
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// End of a date -> next day's 00:00:00 in the business timezone
///
/// Callers use exclusive `< end` semantics.
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    date_hms_to_millis(next_day, 0, 0, 0, tz)
}

/// Today's local calendar date in the business timezone
pub fn today(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// Half-open `[start, end)` millis range covering the current local day
pub fn today_bounds(tz: Tz) -> (i64, i64) {
    let date = today(tz);
    (day_start_millis(date, tz), day_end_millis(date, tz))
}
