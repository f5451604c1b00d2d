//! # Local time zones
//!
//! A [`TimeZone`] is an explicit value: a standard offset from UTC, the zone names and a
//! [`DstRule`] choosing when daylight saving time applies. No host time zone database is
//! consulted, so local times are reproducible on every machine.

use serde::{Deserialize, Serialize};

use crate::{
    constants::{Hour, JulianDay},
    time::calendar::{days_in_month, jd_to_cal, jd_to_day_of_week, julian_day_number, Calendar},
};

/// Daylight saving time rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DstRule {
    /// Standard time all year.
    #[default]
    None,
    /// Second Sunday of March to first Sunday of November, switching at 02:00 local time.
    UnitedStates,
    /// Last Sunday of March to last Sunday of October, switching at 01:00 UTC.
    EuropeanUnion,
}

impl DstRule {
    /// Daylight saving interval `[start, end)` of `year`, as Julian Days in UT.
    ///
    /// Arguments
    /// ---------
    /// * `year`: civil year.
    /// * `standard_offset`: offset of standard time from UTC, hours east positive.
    ///
    /// Returns
    /// --------
    /// * `None` for [`DstRule::None`], otherwise the UT bounds of the daylight interval.
    pub fn daylight_interval(
        self,
        year: i32,
        standard_offset: Hour,
    ) -> Option<(JulianDay, JulianDay)> {
        match self {
            DstRule::None => None,
            DstRule::UnitedStates => {
                let offset = standard_offset / 24.0;
                // 02:00 standard time, then 02:00 daylight time (01:00 standard)
                let start = nth_sunday(year, 3, 2) + 2.0 / 24.0 - offset;
                let end = nth_sunday(year, 11, 1) + 1.0 / 24.0 - offset;
                Some((start, end))
            }
            DstRule::EuropeanUnion => {
                let start = last_sunday(year, 3) + 1.0 / 24.0;
                let end = last_sunday(year, 10) + 1.0 / 24.0;
                Some((start, end))
            }
        }
    }
}

/// 0h of the n-th Sunday (1-based) of a month.
fn nth_sunday(year: i32, month: u32, n: u32) -> JulianDay {
    let first = julian_day_number(year, month, 1.0, Calendar::Gregorian);
    let to_sunday = (7 - jd_to_day_of_week(first)) % 7;
    first + (to_sunday + 7 * (n - 1)) as f64
}

/// 0h of the last Sunday of a month.
fn last_sunday(year: i32, month: u32) -> JulianDay {
    let length = days_in_month(year, month, Calendar::Gregorian).unwrap_or(28);
    let last = julian_day_number(year, month, length as f64, Calendar::Gregorian);
    last - jd_to_day_of_week(last) as f64
}

/// Explicit description of a civil time zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeZone {
    /// Abbreviation printed during standard time (e.g. `EST`)
    pub standard_name: String,
    /// Offset of standard time from UTC, hours east positive (e.g. −5 for `EST`)
    pub standard_offset: Hour,
    /// Abbreviation printed during daylight saving time (e.g. `EDT`)
    pub daylight_name: String,
    pub dst_rule: DstRule,
}

impl TimeZone {
    pub fn new(
        standard_name: impl Into<String>,
        standard_offset: Hour,
        daylight_name: impl Into<String>,
        dst_rule: DstRule,
    ) -> Self {
        TimeZone {
            standard_name: standard_name.into(),
            standard_offset,
            daylight_name: daylight_name.into(),
            dst_rule,
        }
    }

    /// Coordinated Universal Time, no daylight saving.
    pub fn utc() -> Self {
        TimeZone::new("UTC", 0.0, "UTC", DstRule::None)
    }

    /// Is daylight saving time in effect at this universal-time instant?
    pub fn is_dst(&self, jd_ut: JulianDay) -> bool {
        let (year, _, _) = jd_to_cal(jd_ut, Calendar::Gregorian);
        match self.dst_rule.daylight_interval(year, self.standard_offset) {
            Some((start, end)) => (start..end).contains(&jd_ut),
            None => false,
        }
    }

    /// Convert universal time to local time.
    ///
    /// Returns
    /// --------
    /// * The local time Julian Day and the name of the zone used for the conversion.
    pub fn ut_to_lt(&self, jd_ut: JulianDay) -> (JulianDay, &str) {
        if self.is_dst(jd_ut) {
            (
                jd_ut + (self.standard_offset + 1.0) / 24.0,
                &self.daylight_name,
            )
        } else {
            (jd_ut + self.standard_offset / 24.0, &self.standard_name)
        }
    }
}

impl Default for TimeZone {
    fn default() -> Self {
        TimeZone::utc()
    }
}

#[cfg(test)]
mod zone_test {
    use super::*;
    use crate::time::calendar::cal_to_jde;
    use approx::assert_abs_diff_eq;

    fn ut(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> JulianDay {
        cal_to_jde(year, month, day, hour, minute, 0.0, Calendar::Gregorian).unwrap()
    }

    fn eastern() -> TimeZone {
        TimeZone::new("EST", -5.0, "EDT", DstRule::UnitedStates)
    }

    #[test]
    fn test_united_states_transitions() {
        let zone = eastern();
        assert!(!zone.is_dst(ut(2024, 1, 15, 12, 0)));
        assert!(zone.is_dst(ut(2024, 7, 4, 12, 0)));

        // 2024-03-10 02:00 EST is 07:00 UT
        assert!(!zone.is_dst(ut(2024, 3, 10, 6, 59)));
        assert!(zone.is_dst(ut(2024, 3, 10, 7, 1)));

        // 2024-11-03 02:00 EDT is 06:00 UT
        assert!(zone.is_dst(ut(2024, 11, 3, 5, 59)));
        assert!(!zone.is_dst(ut(2024, 11, 3, 6, 1)));
    }

    #[test]
    fn test_european_union_transitions() {
        let zone = TimeZone::new("CET", 1.0, "CEST", DstRule::EuropeanUnion);
        assert!(!zone.is_dst(ut(2024, 3, 31, 0, 59)));
        assert!(zone.is_dst(ut(2024, 3, 31, 1, 1)));
        assert!(zone.is_dst(ut(2024, 10, 27, 0, 59)));
        assert!(!zone.is_dst(ut(2024, 10, 27, 1, 1)));
    }

    #[test]
    fn test_ut_to_lt() {
        let zone = eastern();

        let winter = ut(2024, 1, 15, 12, 0);
        let (lt, name) = zone.ut_to_lt(winter);
        assert_eq!(name, "EST");
        assert_abs_diff_eq!(lt, winter - 5.0 / 24.0, epsilon = 1e-12);

        let summer = ut(2024, 7, 4, 12, 0);
        let (lt, name) = zone.ut_to_lt(summer);
        assert_eq!(name, "EDT");
        assert_abs_diff_eq!(lt, summer - 4.0 / 24.0, epsilon = 1e-12);

        let utc = TimeZone::utc();
        let (lt, name) = utc.ut_to_lt(summer);
        assert_eq!(name, "UTC");
        assert_eq!(lt, summer);
    }

    #[test]
    fn test_no_dst_rule() {
        assert_eq!(DstRule::None.daylight_interval(2024, 0.0), None);
        assert!(!TimeZone::utc().is_dst(ut(2024, 7, 4, 12, 0)));
    }
}
