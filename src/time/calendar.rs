//! # Calendar conversions
//!
//! Julian Day ⇄ calendar date in the Gregorian or Julian calendar (Meeus, ch. 7),
//! day-of-year and day-of-week arithmetic, the Easter computus and the
//! formatting of local times.
//!
//! Years follow the astronomical convention: year 0 is 1 BC, year −1 is 2 BC.
//! Julian Days are meaningful for dates after −4712-01-01.

use serde::{Deserialize, Serialize};

use crate::{
    almagest_errors::AlmagestError,
    constants::{JulianDay, MINUTES_PER_DAY, SECONDS_PER_DAY},
};

/// Calendar used to interpret a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Calendar {
    #[default]
    Gregorian,
    Julian,
}

/// Truncation level used by [`lt_to_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeLevel {
    Day,
    Hour,
    Minute,
    #[default]
    Second,
}

/// Leap-year rule of the chosen calendar.
///
/// Gregorian: divisible by 4 and (not divisible by 100 or divisible by 400).
/// Julian: divisible by 4.
pub fn is_leap_year(year: i32, calendar: Calendar) -> bool {
    match calendar {
        Calendar::Gregorian => year % 4 == 0 && (year % 100 != 0 || year % 400 == 0),
        Calendar::Julian => year % 4 == 0,
    }
}

/// Number of days in a month, or [`AlmagestError::InvalidMonth`].
pub fn days_in_month(year: i32, month: u32, calendar: Calendar) -> Result<u32, AlmagestError> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 if is_leap_year(year, calendar) => Ok(29),
        2 => Ok(28),
        _ => Err(AlmagestError::InvalidMonth(month as i32)),
    }
}

/// Meeus 7.1 without any range check. Callers validate the date first.
pub(crate) fn julian_day_number(year: i32, month: u32, day: f64, calendar: Calendar) -> JulianDay {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };

    let b = match calendar {
        Calendar::Gregorian => {
            let a = y.div_euclid(100);
            2 - a + a.div_euclid(4)
        }
        Calendar::Julian => 0,
    };

    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day + b as f64
        - 1524.5
}

/// Convert a calendar date to a Julian Day Number (Meeus 7.1).
///
/// Arguments
/// ---------
/// * `year`: astronomical year.
/// * `month`: month, 1..=12.
/// * `day`: day of the month, may carry a fractional part (time of day).
/// * `calendar`: calendar the date is expressed in.
///
/// Returns
/// --------
/// * The Julian Day, or [`AlmagestError::InvalidMonth`] / [`AlmagestError::InvalidDay`] when
///   the month is outside 1..=12 or the integral day exceeds the length of the month.
pub fn cal_to_jd(
    year: i32,
    month: u32,
    day: f64,
    calendar: Calendar,
) -> Result<JulianDay, AlmagestError> {
    let length = days_in_month(year, month, calendar)?;
    if !day.is_finite() || day < 1.0 || day >= length as f64 + 1.0 {
        return Err(AlmagestError::InvalidDay { year, month, day });
    }
    Ok(julian_day_number(year, month, day, calendar))
}

/// Convert a calendar date and a clock time to a Julian Day (Meeus 22.1 input form).
pub fn cal_to_jde(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: f64,
    calendar: Calendar,
) -> Result<JulianDay, AlmagestError> {
    Ok(cal_to_jd(year, month, day as f64, calendar)? + hms_to_fday(hour, minute, second))
}

/// Convert a Julian Day to a calendar date `(year, month, day)`, the day being fractional.
pub fn jd_to_cal(jd: JulianDay, calendar: Calendar) -> (i32, u32, f64) {
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let f = shifted - z;

    let a = match calendar {
        Calendar::Gregorian => {
            let alpha = ((z - 1867216.25) / 36524.25).floor();
            z + 1.0 + alpha - (alpha / 4.0).floor()
        }
        Calendar::Julian => z,
    };

    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    (year as i32, month as u32, day)
}

/// Julian Day of a fractional year, interpolated linearly across that year.
pub fn frac_yr_to_jd(year: f64, calendar: Calendar) -> Result<JulianDay, AlmagestError> {
    let whole = year.floor();
    let start = cal_to_jd(whole as i32, 1, 1.0, calendar)?;
    let next = cal_to_jd(whole as i32 + 1, 1, 1.0, calendar)?;
    Ok(start + (next - start) * (year - whole))
}

/// Julian Day of a year and fractional month, interpolated linearly across that month.
pub fn yr_frac_mon_to_jd(year: i32, month: f64, calendar: Calendar) -> Result<JulianDay, AlmagestError> {
    let whole = month.floor();
    if !(1.0..13.0).contains(&whole) {
        return Err(AlmagestError::InvalidMonth(whole as i32));
    }
    let month_index = whole as u32;
    let start = cal_to_jd(year, month_index, 1.0, calendar)?;
    let next = if month_index == 12 {
        cal_to_jd(year + 1, 1, 1.0, calendar)?
    } else {
        cal_to_jd(year, month_index + 1, 1.0, calendar)?
    };
    Ok(start + (next - start) * (month - whole))
}

/// Day of the year, 1 = January 1st.
pub fn cal_to_day_of_year(
    year: i32,
    month: u32,
    day: u32,
    calendar: Calendar,
) -> Result<u32, AlmagestError> {
    let length = days_in_month(year, month, calendar)?;
    if day < 1 || day > length {
        return Err(AlmagestError::InvalidDay {
            year,
            month,
            day: day as f64,
        });
    }
    let k = if is_leap_year(year, calendar) { 1 } else { 2 };
    Ok(275 * month / 9 - k * ((month + 9) / 12) + day - 30)
}

/// Month and day of a day-of-year number.
pub fn day_of_year_to_cal(year: i32, n: u32, calendar: Calendar) -> Result<(u32, u32), AlmagestError> {
    let leap = is_leap_year(year, calendar);
    let length = if leap { 366 } else { 365 };
    if n < 1 || n > length {
        return Err(AlmagestError::InvalidDayOfYear { year, day: n });
    }
    let k = if leap { 1 } else { 2 };
    let month = if n < 32 {
        1
    } else {
        (9.0 * (k + n) as f64 / 275.0 + 0.98) as u32
    };
    let day = n + k * ((month + 9) / 12) + 30 - 275 * month / 9;
    Ok((month, day))
}

/// Day of week for a Julian Day at 0h: 0 = Sunday … 6 = Saturday.
pub fn jd_to_day_of_week(jd: JulianDay) -> u32 {
    ((jd + 1.5).floor() as i64).rem_euclid(7) as u32
}

/// Date of Western ecclesiastical Easter as `(month, day)`.
///
/// The Gregorian branch is the Meeus/Jones/Butcher algorithm, valid for every
/// Gregorian year. The Julian branch is the Julian computus.
pub fn easter(year: i32, calendar: Calendar) -> (u32, u32) {
    let n = match calendar {
        Calendar::Gregorian => {
            let a = year.rem_euclid(19);
            let b = year.div_euclid(100);
            let c = year.rem_euclid(100);
            let d = b.div_euclid(4);
            let e = b.rem_euclid(4);
            let f = (b + 8).div_euclid(25);
            let g = (b - f + 1).div_euclid(3);
            let h = (19 * a + b - d - g + 15).rem_euclid(30);
            let i = c.div_euclid(4);
            let k = c.rem_euclid(4);
            let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
            let m = (a + 11 * h + 22 * l).div_euclid(451);
            h + l - 7 * m + 114
        }
        Calendar::Julian => {
            let a = year.rem_euclid(4);
            let b = year.rem_euclid(7);
            let c = year.rem_euclid(19);
            let d = (19 * c + 15).rem_euclid(30);
            let e = (2 * a + 4 * b - d + 34).rem_euclid(7);
            d + e + 114
        }
    };
    ((n / 31) as u32, (n % 31 + 1) as u32)
}

/// Split the fractional part of a day into truncated `(hours, minutes, seconds)`.
pub fn fday_to_hms(day: f64) -> (u32, u32, u32) {
    let seconds = day.fract().abs() * SECONDS_PER_DAY;
    let total_minutes = (seconds / 60.0) as u32;
    let sec = (seconds - total_minutes as f64 * 60.0) as u32;
    (total_minutes / 60, total_minutes % 60, sec)
}

/// Fraction of a day for a clock time.
pub fn hms_to_fday(hour: u32, minute: u32, second: f64) -> f64 {
    hour as f64 / 24.0 + minute as f64 / MINUTES_PER_DAY + second / SECONDS_PER_DAY
}

/// Format a local time Julian Day as `YYYY-MM-DD HH:MM:SS ZONE`, truncated to `level`.
///
/// The `Day` level never prints the zone. An empty `zone` leaves a trailing space,
/// so callers can append their own zone text.
pub fn lt_to_str(jd: JulianDay, zone: &str, level: TimeLevel) -> String {
    let (year, month, day) = jd_to_cal(jd, Calendar::Gregorian);
    let iday = day.trunc() as u32;
    let (hour, minute, sec) = fday_to_hms(day);

    match level {
        TimeLevel::Second => {
            format!("{year}-{month:02}-{iday:02} {hour:02}:{minute:02}:{sec:02} {zone}")
        }
        TimeLevel::Minute => format!("{year}-{month:02}-{iday:02} {hour:02}:{minute:02} {zone}"),
        TimeLevel::Hour => format!("{year}-{month:02}-{iday:02} {hour:02} {zone}"),
        TimeLevel::Day => format!("{year}-{month:02}-{iday:02}"),
    }
}

#[cfg(test)]
mod calendar_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cal_to_jd_meeus_examples() {
        let g = Calendar::Gregorian;
        let j = Calendar::Julian;
        assert_abs_diff_eq!(cal_to_jd(1957, 10, 4.81, g).unwrap(), 2436116.31, epsilon = 1e-9);
        assert_eq!(cal_to_jd(2000, 1, 1.5, g).unwrap(), 2451545.0);
        assert_eq!(cal_to_jd(1987, 1, 27.0, g).unwrap(), 2446822.5);
        assert_eq!(cal_to_jd(1988, 6, 19.5, g).unwrap(), 2447332.0);
        assert_eq!(cal_to_jd(1900, 1, 1.0, g).unwrap(), 2415020.5);
        assert_eq!(cal_to_jd(1600, 12, 31.0, g).unwrap(), 2305812.5);
        assert_eq!(cal_to_jd(333, 1, 27.5, j).unwrap(), 1842713.0);
        assert_eq!(cal_to_jd(-1000, 7, 12.5, j).unwrap(), 1356001.0);
        assert_eq!(cal_to_jd(-4712, 1, 1.5, j).unwrap(), 0.0);
        assert_abs_diff_eq!(cal_to_jd(837, 4, 10.3, j).unwrap(), 2026871.8, epsilon = 1e-6);
    }

    #[test]
    fn test_jd_to_cal() {
        let (y, m, d) = jd_to_cal(2436116.31, Calendar::Gregorian);
        assert_eq!((y, m), (1957, 10));
        assert_abs_diff_eq!(d, 4.81, epsilon = 1e-6);

        let (y, m, d) = jd_to_cal(1507900.13, Calendar::Julian);
        assert_eq!((y, m), (-584, 5));
        assert_abs_diff_eq!(d, 28.63, epsilon = 1e-6);
    }

    #[test]
    fn test_round_trip() {
        for &(year, month, day) in &[
            (1957, 10, 4.81),
            (2024, 2, 29.25),
            (1582, 10, 15.0),
            (-44, 3, 15.5),
            (2999, 12, 31.999),
        ] {
            let jd = cal_to_jd(year, month, day, Calendar::Gregorian).unwrap();
            let (y, m, d) = jd_to_cal(jd, Calendar::Gregorian);
            assert_eq!((y, m), (year, month));
            assert_abs_diff_eq!(d, day, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_invalid_dates() {
        let g = Calendar::Gregorian;
        assert_eq!(
            cal_to_jd(2000, 13, 1.0, g),
            Err(AlmagestError::InvalidMonth(13))
        );
        assert_eq!(cal_to_jd(2000, 0, 1.0, g), Err(AlmagestError::InvalidMonth(0)));
        assert!(matches!(
            cal_to_jd(2023, 2, 29.0, g),
            Err(AlmagestError::InvalidDay { .. })
        ));
        assert!(cal_to_jd(2024, 2, 29.0, g).is_ok());
        assert!(cal_to_jd(1900, 2, 29.0, g).is_err());
        assert!(cal_to_jd(1900, 2, 29.0, Calendar::Julian).is_ok());
        assert!(cal_to_jd(2000, 4, 31.0, g).is_err());
        assert!(cal_to_jd(2000, 4, 30.5, g).is_ok());
        assert!(cal_to_jd(2000, 4, 0.5, g).is_err());
        assert!(cal_to_jd(2000, 4, f64::NAN, g).is_err());
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000, Calendar::Gregorian));
        assert!(!is_leap_year(1900, Calendar::Gregorian));
        assert!(is_leap_year(1900, Calendar::Julian));
        assert!(is_leap_year(2024, Calendar::Gregorian));
        assert!(!is_leap_year(2023, Calendar::Julian));
    }

    #[test]
    fn test_cal_to_jde() {
        let jde = cal_to_jde(1987, 4, 10, 19, 21, 0.0, Calendar::Gregorian).unwrap();
        assert_abs_diff_eq!(jde, 2446896.30625, epsilon = 1e-9);
    }

    #[test]
    fn test_fractional_year_and_month() {
        let g = Calendar::Gregorian;
        assert_eq!(frac_yr_to_jd(2000.0, g).unwrap(), 2451544.5);
        assert_abs_diff_eq!(
            frac_yr_to_jd(2001.5, g).unwrap(),
            2451910.5 + 182.5,
            epsilon = 1e-9
        );
        assert_eq!(yr_frac_mon_to_jd(2000, 1.0, g).unwrap(), 2451544.5);
        assert_abs_diff_eq!(
            yr_frac_mon_to_jd(2000, 2.5, g).unwrap(),
            2451575.5 + 14.5,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            yr_frac_mon_to_jd(1999, 12.5, g).unwrap(),
            2451513.5 + 15.5,
            epsilon = 1e-9
        );
        assert_eq!(
            yr_frac_mon_to_jd(2000, 13.2, g),
            Err(AlmagestError::InvalidMonth(13))
        );
    }

    #[test]
    fn test_day_of_year() {
        let g = Calendar::Gregorian;
        assert_eq!(cal_to_day_of_year(1978, 11, 14, g).unwrap(), 318);
        assert_eq!(cal_to_day_of_year(1988, 4, 22, g).unwrap(), 113);
        assert_eq!(day_of_year_to_cal(1978, 318, g).unwrap(), (11, 14));
        assert_eq!(day_of_year_to_cal(1988, 113, g).unwrap(), (4, 22));
        assert_eq!(day_of_year_to_cal(2023, 1, g).unwrap(), (1, 1));
        assert_eq!(day_of_year_to_cal(2024, 366, g).unwrap(), (12, 31));
        assert_eq!(
            day_of_year_to_cal(2023, 366, g),
            Err(AlmagestError::InvalidDayOfYear {
                year: 2023,
                day: 366
            })
        );
        for n in 1..=366 {
            let (m, d) = day_of_year_to_cal(2024, n, g).unwrap();
            assert_eq!(cal_to_day_of_year(2024, m, d, g).unwrap(), n);
        }
    }

    #[test]
    fn test_day_of_week() {
        // 1954-06-30 was a Wednesday
        assert_eq!(jd_to_day_of_week(2434923.5), 3);
        // 2000-01-01 was a Saturday
        assert_eq!(jd_to_day_of_week(2451544.5), 6);
    }

    #[test]
    fn test_easter() {
        let g = Calendar::Gregorian;
        assert_eq!(easter(1991, g), (3, 31));
        assert_eq!(easter(1992, g), (4, 19));
        assert_eq!(easter(1993, g), (4, 11));
        assert_eq!(easter(1954, g), (4, 18));
        assert_eq!(easter(2000, g), (4, 23));
        assert_eq!(easter(1818, g), (3, 22));
        assert_eq!(easter(2285, g), (3, 22));
        assert_eq!(easter(179, Calendar::Julian), (4, 12));
        assert_eq!(easter(711, Calendar::Julian), (4, 12));
        assert_eq!(easter(1243, Calendar::Julian), (4, 12));
    }

    #[test]
    fn test_hms() {
        assert_eq!(fday_to_hms(0.5), (12, 0, 0));
        assert_eq!(fday_to_hms(2451545.75), (18, 0, 0));
        assert_eq!(fday_to_hms(hms_to_fday(19, 21, 30.5)), (19, 21, 30));
        assert_abs_diff_eq!(hms_to_fday(6, 0, 0.0), 0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_lt_to_str() {
        let jd = cal_to_jde(1987, 4, 10, 19, 21, 30.5, Calendar::Gregorian).unwrap();
        assert_eq!(lt_to_str(jd, "UTC", TimeLevel::Second), "1987-04-10 19:21:30 UTC");
        assert_eq!(lt_to_str(jd, "UTC", TimeLevel::Minute), "1987-04-10 19:21 UTC");
        assert_eq!(lt_to_str(jd, "", TimeLevel::Hour), "1987-04-10 19 ");
        assert_eq!(lt_to_str(jd, "UTC", TimeLevel::Day), "1987-04-10");
    }
}
