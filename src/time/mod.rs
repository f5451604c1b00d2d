//! # Time system
//!
//! Everything in the crate is parameterized by a Julian Day. This module gathers the
//! conversions around it:
//!
//! - [`calendar`]: calendar dates, day-of-year, day-of-week, Easter, formatting
//! - [`dynamical`]: ΔT and the dynamical ⇄ universal time conversion
//! - [`zone`]: explicit time zones with daylight saving rules
//! - sidereal time and Julian centuries, defined here
//! - adapters to [`hifitime::Epoch`] for callers already working with `hifitime`
//!
//! ## See also
//! * [`crate::earth_orientation`] – consumes Julian centuries for the nutation series

pub mod calendar;
pub mod dynamical;
pub mod zone;

use hifitime::Epoch;

use crate::{
    angles::reduce,
    constants::{JulianDay, Radian, DAYS_PER_JULIAN_CENTURY, J2000, RADEG},
    series::polynomial,
};

/// Julian centuries elapsed since J2000.0.
pub fn jd_to_jcent(jd: JulianDay) -> f64 {
    (jd - J2000) / DAYS_PER_JULIAN_CENTURY
}

/// Mean sidereal time at Greenwich (Meeus 12.4).
///
/// Arguments
/// ---------
/// * `jd`: Julian Day in universal time, any time of day.
///
/// Returns
/// --------
/// * Sidereal time in radians, reduced to [0, 2π) (2π radians = 24 hours).
pub fn sidereal_time_greenwich(jd: JulianDay) -> Radian {
    let t = jd_to_jcent(jd);
    let theta0 = 280.46061837
        + 360.98564736629 * (jd - J2000)
        + polynomial(&[0.0, 0.0, 0.000387933, -1.0 / 38710000.0], t);
    reduce(theta0 * RADEG)
}

/// Julian Day (UTC) of a `hifitime` epoch.
pub fn jd_from_epoch(epoch: Epoch) -> JulianDay {
    epoch.to_jde_utc_days()
}

/// Julian Ephemeris Day (TT) of a `hifitime` epoch.
pub fn jde_from_epoch(epoch: Epoch) -> JulianDay {
    epoch.to_jde_tt_days()
}

/// `hifitime` epoch of a Julian Day expressed in UTC.
pub fn epoch_from_jd(jd: JulianDay) -> Epoch {
    Epoch::from_jde_utc(jd)
}

#[cfg(test)]
mod time_test {
    use super::*;
    use crate::{
        constants::{RADH, SECONDS_PER_DAY},
        time::calendar::{cal_to_jd, Calendar},
    };
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_jd_to_jcent() {
        assert_eq!(jd_to_jcent(J2000), 0.0);
        assert_abs_diff_eq!(jd_to_jcent(2446895.5), -0.127296372348, epsilon = 1e-12);
    }

    #[test]
    fn test_sidereal_time_greenwich() {
        // 1987-04-10 0h UT: 13h10m46.3668s
        let expected = (13.0 + 10.0 / 60.0 + 46.3668 / 3600.0) * RADH;
        assert_abs_diff_eq!(sidereal_time_greenwich(2446895.5), expected, epsilon = 1e-8);

        // 1987-04-10 19h21m UT: 8h34m57.0896s
        let expected = (8.0 + 34.0 / 60.0 + 57.0896 / 3600.0) * RADH;
        assert_abs_diff_eq!(
            sidereal_time_greenwich(2446896.30625),
            expected,
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_hifitime_adapters() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2000, 1, 1);
        let jd = cal_to_jd(2000, 1, 1.0, Calendar::Gregorian).unwrap();
        assert_abs_diff_eq!(jd_from_epoch(epoch), jd, epsilon = 1e-8);

        // TT − UTC was 64.184 s in 2000
        assert_abs_diff_eq!(
            (jde_from_epoch(epoch) - jd) * SECONDS_PER_DAY,
            64.184,
            epsilon = 1e-3
        );

        let back = epoch_from_jd(2459215.5);
        assert_abs_diff_eq!(back.to_mjd_utc_days(), 59215.0, epsilon = 1e-9);
    }
}
