//! Date/time values
//!
//! [`DateTime`] is a plain calendar value. It is not validated on construction; consumers
//! check the fields they care about. Both conversions below are total: out-of-range fields
//! are carried through the arithmetic instead of panicking.
//!
//! Notes:
//! - Excel stores dates as serial numbers (days since a base date, plus a day fraction).
//! - In the 1900 date system Excel keeps the Lotus 1-2-3 "1900 leap year" bug: the
//!   non-existent 1900-02-29 is serial 60, so every later date is one higher than a plain
//!   Gregorian count would give.

use std::fmt;

use chrono::{DateTime as ChronoDateTime, Datelike, NaiveDateTime, Timelike, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

const MONTH_DAYS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Which epoch serial numbers count from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DateEpoch {
    /// Windows default, 1900-01-01 is serial 1
    #[default]
    Excel1900,
    /// Classic Mac, 1904-01-01 is serial 0
    Excel1904,
}

/// A calendar date and time
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTime {
    /// Year: 1900 - 9999
    pub year: i32,
    /// Month: 1 - 12
    pub month: i32,
    /// Day: 1 - 31
    pub day: i32,
    /// Hour: 0 - 23
    pub hour: i32,
    /// Minute: 0 - 59
    pub min: i32,
    /// Seconds: 0 - 59.999
    pub sec: f64,
}

impl DateTime {
    /// Create a date and time
    pub fn new(year: i32, month: i32, day: i32, hour: i32, min: i32, sec: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            min,
            sec,
        }
    }

    /// Create a date at midnight
    pub fn date(year: i32, month: i32, day: i32) -> Self {
        Self::new(year, month, day, 0, 0, 0.0)
    }

    /// Create a time with no date part; its serial is the day fraction alone
    pub fn time(hour: i32, min: i32, sec: f64) -> Self {
        Self::new(0, 0, 0, hour, min, sec)
    }

    /// Current UTC time
    pub fn now_utc() -> Self {
        Self::from(Utc::now().naive_utc())
    }

    /// Convert a Unix timestamp (seconds, UTC)
    ///
    /// Timestamps outside chrono's range fall back to the Unix epoch.
    pub fn from_unix_timestamp(secs: i64) -> Self {
        let naive = ChronoDateTime::<Utc>::from_timestamp(secs, 0)
            .unwrap_or_default()
            .naive_utc();
        Self::from(naive)
    }

    /// Excel serial number in the 1900 date system
    ///
    /// ```
    /// use sheetwright_core::DateTime;
    ///
    /// assert_eq!(DateTime::date(1900, 1, 1).to_excel_serial(), 1.0);
    /// assert_eq!(DateTime::date(1900, 3, 1).to_excel_serial(), 61.0);
    /// assert_eq!(DateTime::new(2013, 1, 1, 12, 0, 0.0).to_excel_serial(), 41275.5);
    /// ```
    pub fn to_excel_serial(&self) -> f64 {
        self.to_excel_serial_epoch(DateEpoch::Excel1900)
    }

    /// Excel serial number in the given date system
    pub fn to_excel_serial_epoch(&self, epoch: DateEpoch) -> f64 {
        let fraction = self.seconds_of_day() / SECONDS_PER_DAY;

        if epoch == DateEpoch::Excel1900 {
            match (self.year, self.month, self.day) {
                // Time-only values and Excel's "day zero".
                (0, 0, 0) | (1899, 12, 31) | (1900, 1, 0) => return fraction,
                // The day that never was.
                (1900, 2, 29) => return 60.0 + fraction,
                _ => {}
            }
        } else if (self.year, self.month, self.day) == (0, 0, 0) {
            return fraction;
        }

        excel_days(self.year, self.month, self.day, epoch) as f64 + fraction
    }

    /// ISO-8601 UTC timestamp, `YYYY-MM-DDTHH:MM:SSZ`
    ///
    /// Fractional seconds are truncated.
    ///
    /// ```
    /// use sheetwright_core::DateTime;
    ///
    /// let dt = DateTime::new(2016, 12, 12, 23, 0, 0.0);
    /// assert_eq!(dt.to_iso8601(), "2016-12-12T23:00:00Z");
    /// ```
    pub fn to_iso8601(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.min,
            self.sec.trunc() as i64
        )
    }

    fn seconds_of_day(&self) -> f64 {
        (self.hour as f64 * 60.0 + self.min as f64) * 60.0 + self.sec
    }
}

fn is_leap_gregorian(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Whole days since the epoch, with the 1900 leap-year bug applied for the 1900 system
fn excel_days(year: i32, month: i32, day: i32, epoch: DateEpoch) -> i64 {
    let (epoch_year, offset): (i64, i64) = match epoch {
        DateEpoch::Excel1900 => (1900, 0),
        DateEpoch::Excel1904 => (1904, 4),
    };
    let norm = 300;

    let year = year as i64;
    let range = year - epoch_year;
    let leap = is_leap_gregorian(year);

    let full_months = (month as i64 - 1).clamp(0, 12) as usize;
    let mut days: i64 = MONTH_DAYS.iter().take(full_months).sum();
    if leap && full_months > 1 {
        days += 1;
    }

    days += day as i64;
    days += range * 365;
    days += range / 4;
    days -= (range + offset) / 100;
    days += (range + offset + norm) / 400;
    if leap {
        // The loop above counted this year's own leap day.
        days -= 1;
    }

    if epoch == DateEpoch::Excel1900 && days > 59 {
        days += 1;
    }

    days
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(dt: NaiveDateTime) -> Self {
        let sec = dt.second() as f64 + dt.nanosecond() as f64 / 1_000_000_000.0;
        Self::new(
            dt.year(),
            dt.month() as i32,
            dt.day() as i32,
            dt.hour() as i32,
            dt.minute() as i32,
            sec,
        )
    }
}
