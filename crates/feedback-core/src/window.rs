//! UTC day boundaries for the daily report.
//!
//! Every input instant is normalized to UTC before truncation, so the report
//! date and window are the same no matter which offset the caller's clock
//! reports in.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Source of the current instant. Production uses [`SystemClock`]; tests pin
/// time with [`FixedClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Right-open interval `[start, end)` covering one UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// The calendar date a report over this window is filed under.
    #[must_use]
    pub fn report_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// `true` when `instant` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// The UTC calendar date of `now`.
#[must_use]
pub fn report_date<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDate {
    now.with_timezone(&Utc).date_naive()
}

/// The 24-hour window ending at the most recent UTC midnight at or before `now`.
#[must_use]
pub fn calculate_time_window<Tz: TimeZone>(now: &DateTime<Tz>) -> TimeWindow {
    let midnight = report_date(now).and_time(NaiveTime::MIN);
    let end = Utc.from_utc_datetime(&midnight);
    TimeWindow {
        start: end - Duration::hours(24),
        end,
    }
}
