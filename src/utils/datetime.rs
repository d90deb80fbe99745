use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;

/// Current wall-clock time in `tz`.
pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// `hour:00` on the same calendar day as `now`, in `now`'s time zone.
///
/// Returns `None` when that local time does not exist (a DST gap) or the
/// hour is out of range. An ambiguous time resolves to the earlier instant.
pub fn deadline_on_day(now: DateTime<Tz>, hour: u32) -> Option<DateTime<Tz>> {
    now.timezone()
        .with_ymd_and_hms(now.year(), now.month(), now.day(), hour, 0, 0)
        .earliest()
}

pub fn format_datetime(dt: &DateTime<Tz>) -> String {
    dt.format("%A, %B %d at %H:%M %Z").to_string()
}
