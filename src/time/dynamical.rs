//! Dynamical time ⇄ universal time.
//!
//! ΔT = TD − UT is an empirical function of the epoch. It is evaluated here with the
//! Espenak–Meeus polynomial set (NASA Five Millennium Canon of Solar Eclipses), which covers
//! every epoch: parabolic extrapolations outside −500..2150 and piecewise fits inside.

use crate::{
    constants::{JulianDay, SECONDS_PER_DAY},
    series::polynomial,
    time::calendar::{jd_to_cal, Calendar},
};

/// 1582 October 15th, first day of the Gregorian calendar
const GREGORIAN_REFORM: JulianDay = 2_299_160.5;

/// Long-term parabola, in seconds, for a decimal year `y`.
fn long_term(y: f64) -> f64 {
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// ΔT = TD − UT in seconds at a Julian Day.
///
/// The decimal year is taken at the middle of the calendar month holding `jd`, reckoned in
/// the Julian calendar before the Gregorian reform.
pub fn delta_t(jd: JulianDay) -> f64 {
    let calendar = if jd < GREGORIAN_REFORM {
        Calendar::Julian
    } else {
        Calendar::Gregorian
    };
    let (year, month, _) = jd_to_cal(jd, calendar);
    let y = year as f64 + (month as f64 - 0.5) / 12.0;

    if y < -500.0 {
        long_term(y)
    } else if y < 500.0 {
        polynomial(
            &[
                10583.6,
                -1014.41,
                33.78311,
                -5.952053,
                -0.1798452,
                0.022174192,
                0.0090316521,
            ],
            y / 100.0,
        )
    } else if y < 1600.0 {
        polynomial(
            &[
                1574.2,
                -556.01,
                71.23472,
                0.319781,
                -0.8503463,
                -0.005050998,
                0.0083572073,
            ],
            (y - 1000.0) / 100.0,
        )
    } else if y < 1700.0 {
        let t = y - 1600.0;
        120.0 - 0.9808 * t - 0.01532 * t * t + t * t * t / 7129.0
    } else if y < 1800.0 {
        polynomial(
            &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1174000.0],
            y - 1700.0,
        )
    } else if y < 1860.0 {
        polynomial(
            &[
                13.72,
                -0.332447,
                0.0068612,
                0.0041116,
                -0.00037436,
                0.0000121272,
                -0.0000001699,
                0.000000000875,
            ],
            y - 1800.0,
        )
    } else if y < 1900.0 {
        polynomial(
            &[7.62, 0.5737, -0.251754, 0.01680668, -0.0004473624, 1.0 / 233174.0],
            y - 1860.0,
        )
    } else if y < 1920.0 {
        polynomial(
            &[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197],
            y - 1900.0,
        )
    } else if y < 1941.0 {
        polynomial(&[21.20, 0.84493, -0.076100, 0.0020936], y - 1920.0)
    } else if y < 1961.0 {
        polynomial(&[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0], y - 1950.0)
    } else if y < 1986.0 {
        polynomial(&[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0], y - 1975.0)
    } else if y < 2005.0 {
        polynomial(
            &[
                63.86,
                0.3345,
                -0.060374,
                0.0017275,
                0.000651814,
                0.00002373599,
            ],
            y - 2000.0,
        )
    } else if y < 2050.0 {
        polynomial(&[62.92, 0.32217, 0.005589], y - 2000.0)
    } else if y < 2150.0 {
        long_term(y) - 0.5628 * (2150.0 - y)
    } else {
        long_term(y)
    }
}

/// Convert a Julian Day in dynamical time to universal time.
pub fn dt_to_ut(jd: JulianDay) -> JulianDay {
    jd - delta_t(jd) / SECONDS_PER_DAY
}

/// Convert a Julian Day in universal time to dynamical time.
pub fn ut_to_dt(jd: JulianDay) -> JulianDay {
    jd + delta_t(jd) / SECONDS_PER_DAY
}

#[cfg(test)]
mod dynamical_test {
    use super::*;
    use crate::time::calendar::cal_to_jd;
    use approx::assert_abs_diff_eq;

    fn at(year: i32, month: u32, day: f64) -> JulianDay {
        cal_to_jd(year, month, day, Calendar::Gregorian).unwrap()
    }

    fn julian(year: i32, month: u32, day: f64) -> JulianDay {
        cal_to_jd(year, month, day, Calendar::Julian).unwrap()
    }

    #[test]
    fn test_delta_t_modern() {
        assert_abs_diff_eq!(delta_t(at(1988, 3, 20.0)), 55.879, epsilon = 1e-3);
        assert_abs_diff_eq!(delta_t(at(2000, 1, 1.0)), 63.874, epsilon = 1e-3);
        assert_abs_diff_eq!(delta_t(at(1900, 1, 1.0)), -2.728, epsilon = 1e-3);
    }

    #[test]
    fn test_delta_t_historical_and_future() {
        assert_abs_diff_eq!(delta_t(at(1700, 1, 1.0)), 8.837, epsilon = 1e-3);
        assert_abs_diff_eq!(delta_t(at(1620, 1, 1.0)), 95.319, epsilon = 1e-3);
        assert_abs_diff_eq!(delta_t(julian(1000, 1, 1.0)), 1573.968, epsilon = 1e-3);
        assert_abs_diff_eq!(delta_t(julian(-500, 1, 1.0)), 17202.903, epsilon = 1e-3);
        assert_abs_diff_eq!(delta_t(at(2100, 1, 1.0)), 202.838, epsilon = 1e-3);
        assert_abs_diff_eq!(delta_t(at(2200, 1, 1.0)), 442.181, epsilon = 1e-3);
    }

    #[test]
    fn test_delta_t_julian_months() {
        // Julian 1000-02-28 is 1000-03-05 in the proleptic Gregorian calendar
        let jd = julian(1000, 2, 28.0);
        assert_eq!(jd, at(1000, 3, 5.0));
        assert_abs_diff_eq!(delta_t(jd), 1573.505, epsilon = 1e-3);

        // Continuous across the reform: 1582-10-04 (Julian) is followed by 1582-10-15
        let before = delta_t(julian(1582, 10, 4.0));
        let after = delta_t(at(1582, 10, 15.0));
        assert_eq!(julian(1582, 10, 4.0) + 1.0, at(1582, 10, 15.0));
        assert_abs_diff_eq!(before, after, epsilon = 1e-9);
    }

    #[test]
    fn test_dt_ut_round_trip() {
        let jd = at(1988, 3, 20.0);
        let ut = dt_to_ut(jd);
        assert_abs_diff_eq!(jd - ut, 55.879 / SECONDS_PER_DAY, epsilon = 1e-8);
        assert_abs_diff_eq!(ut_to_dt(ut), jd, epsilon = 1e-9);
    }
}
