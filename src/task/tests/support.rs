//! Shared fixtures for task store unit tests.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a fixed instant for date-sensitive assertions.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a date, panicking on invalid components.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Builds a clock pinned to noon UTC on the given date.
pub fn clock_at(day: NaiveDate) -> FixedClock {
    let noon = day.and_hms_opt(12, 0, 0).expect("valid time");
    FixedClock(Utc.from_utc_datetime(&noon))
}
