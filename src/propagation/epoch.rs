//! Two-part Julian date epochs for propagation queries

use chrono::{DateTime, Datelike, Timelike, Utc};

/// A point in time as (Julian day, fractional day remainder).
///
/// SGP4 takes the split representation so sub-second precision survives in
/// the fraction while the day count carries the large magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epoch {
    /// Julian day (ends in .5 when produced by `from_calendar`)
    pub jd: f64,
    /// Fraction of the day past `jd`, in [0, 1)
    pub fr: f64,
}

impl Epoch {
    /// Epoch for the current wall-clock UTC time.
    pub fn now() -> Self {
        Self::from_datetime(&Utc::now())
    }

    /// Epoch for an arbitrary UTC datetime.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        Self::from_calendar(
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second() as f64,
        )
    }

    /// Vallado's `jday` split: whole Julian day plus a day fraction.
    pub fn from_calendar(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        let month = month as i32;
        let jd = (367 * year - (7 * (year + (month + 9) / 12)) / 4 + (275 * month) / 9 + day as i32)
            as f64
            + 1_721_013.5;
        let fr = (second + minute as f64 * 60.0 + hour as f64 * 3600.0) / 86_400.0;
        Self { jd, fr }
    }

    /// Offset this epoch by `hours`, moving only the day count.
    ///
    /// The fraction stays fixed at its start value. Callers relying on
    /// sub-day precision in `fr` must pre-normalize before stepping.
    pub fn offset_by_hours(&self, hours: f64) -> Self {
        Self {
            jd: self.jd + hours / 24.0,
            fr: self.fr,
        }
    }

    /// Total Julian date, both parts summed.
    pub fn as_jd(&self) -> f64 {
        self.jd + self.fr
    }
}
