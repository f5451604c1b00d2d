//! # Equinoxes and solstices
//!
//! Instants at which the apparent geocentric longitude of the Sun is a multiple of 90°
//! (Meeus, ch. 27).
//!
//! [`equinox_approx`] evaluates the mean-instant polynomials (tables 27.A for years
//! −1000..1000 and 27.B for 1000..3000) plus the 24 periodic terms of table 27.C, good to
//! about a minute. [`equinox`] refines that seed against [`Sun::apparent_longitude`] with
//! the correction `58 · sin(k·90° − λ)` days.
//!
//! Both return Julian Days in dynamical time.
//!
//! The refined instant is only as good as the Earth series behind the Sun. The abridged
//! tables truncate terms worth a few tenths of an arcsecond, up to 10 s of time; inject the
//! complete VSOP87D Earth series with [`Vsop87d::with_planet`] for second accuracy.
//!
//! [`Vsop87d::with_planet`]: crate::planets::Vsop87d::with_planet

use serde::{Deserialize, Serialize};

use crate::{
    almagest_errors::AlmagestError,
    constants::{Degree, JulianDay, MAX_SOLVER_PASSES, RADEG},
    series::polynomial,
    sun::Sun,
    time::jd_to_jcent,
};

/// Days per radian of solar longitude, about 365.2422 / 2π
const RATE: f64 = 58.0;

/// The four cardinal points of the solar orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// March equinox, λ = 0°
    Spring,
    /// June solstice, λ = 90°
    Summer,
    /// September equinox, λ = 180°
    Autumn,
    /// December solstice, λ = 270°
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Apparent solar longitude at the event.
    pub fn longitude(self) -> Degree {
        90.0 * self as usize as f64
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Table 27.A, Y = year / 1000
const MEAN_BEFORE_1000: [[f64; 5]; 4] = [
    [1721139.29189, 365242.13740, 0.06134, 0.00111, -0.00071],
    [1721233.25401, 365241.72562, -0.05323, 0.00907, 0.00025],
    [1721325.70455, 365242.49558, -0.11677, -0.00297, 0.00074],
    [1721414.39987, 365242.88257, -0.00769, -0.00933, -0.00006],
];

/// Table 27.B, Y = (year − 2000) / 1000
const MEAN_AFTER_1000: [[f64; 5]; 4] = [
    [2451623.80984, 365242.37404, 0.05169, -0.00411, -0.00057],
    [2451716.56767, 365241.62603, 0.00325, 0.00888, -0.00030],
    [2451810.21715, 365242.01767, -0.11575, 0.00337, 0.00078],
    [2451900.05952, 365242.74049, -0.06223, -0.00823, 0.00032],
];

/// Table 27.C: `(A, B, C)` for `A · cos(B + C·T)`, degrees
const PERIODIC_TERMS: [(f64, Degree, Degree); 24] = [
    (485.0, 324.96, 1934.136),
    (203.0, 337.23, 32964.467),
    (199.0, 342.08, 20.186),
    (182.0, 27.85, 445267.112),
    (156.0, 73.14, 45036.886),
    (136.0, 171.52, 22518.443),
    (77.0, 222.54, 65928.934),
    (74.0, 296.72, 3034.906),
    (70.0, 243.58, 9037.513),
    (58.0, 119.81, 33718.147),
    (52.0, 297.17, 150.678),
    (50.0, 21.02, 2281.226),
    (45.0, 247.54, 29929.562),
    (44.0, 325.15, 31555.956),
    (29.0, 60.93, 4443.417),
    (18.0, 155.12, 67555.328),
    (17.0, 288.79, 4562.452),
    (16.0, 198.04, 62894.029),
    (14.0, 199.76, 31436.921),
    (12.0, 95.39, 14577.848),
    (12.0, 287.11, 31931.756),
    (12.0, 320.81, 34777.259),
    (9.0, 227.73, 1222.114),
    (8.0, 15.45, 16859.074),
];

/// Approximate instant of an equinox or solstice, Julian Day in dynamical time.
///
/// Valid for years −1000 to 3000, to within a minute or so.
pub fn equinox_approx(year: i32, season: Season) -> JulianDay {
    let k = season as usize;
    let jde0 = if (-1000..=1000).contains(&year) {
        polynomial(&MEAN_BEFORE_1000[k], year as f64 / 1000.0)
    } else {
        polynomial(&MEAN_AFTER_1000[k], (year as f64 - 2000.0) / 1000.0)
    };

    let t = jd_to_jcent(jde0);
    let w = (35999.373 * t - 2.47) * RADEG;
    let delta_lambda = 1.0 + 0.0334 * w.cos() + 0.0007 * (2.0 * w).cos();
    let s: f64 = PERIODIC_TERMS
        .iter()
        .map(|&(a, b, c)| a * ((b + c * t) * RADEG).cos())
        .sum();

    jde0 + 0.00001 * s / delta_lambda
}

/// Refine an equinox or solstice instant.
///
/// Arguments
/// ---------
/// * `sun`: solar model.
/// * `jd`: starting instant, usually [`equinox_approx`], dynamical time.
/// * `season`: which crossing.
/// * `delta`: convergence threshold, days.
///
/// Returns
/// --------
/// * The instant in dynamical time at which the apparent longitude reaches the
///   season's value.
///
/// Errors
/// ------
/// * [`AlmagestError::Bailout`] if successive corrections do not drop below `delta`.
pub fn equinox(
    sun: &Sun,
    jd: JulianDay,
    season: Season,
    delta: f64,
) -> Result<JulianDay, AlmagestError> {
    let target = season.longitude() * RADEG;
    let mut jd = jd;

    for _ in 0..MAX_SOLVER_PASSES {
        let correction = RATE * (target - sun.apparent_longitude(jd)).sin();
        jd += correction;
        if correction.abs() < delta {
            return Ok(jd);
        }
    }

    Err(AlmagestError::Bailout {
        solver: "equinox",
        passes: MAX_SOLVER_PASSES,
    })
}

#[cfg(test)]
mod equinox_test {
    use super::*;
    use crate::{
        angles::angle_diff,
        constants::{DAYS_PER_SECOND, RADSEC},
        planets::Vsop87d,
    };
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_equinox_approx_1962() {
        // Meeus example 27.a: June solstice 1962
        assert_abs_diff_eq!(
            equinox_approx(1962, Season::Summer),
            2437837.39245,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_equinox_1962() {
        // 1962-06-21 21h24m42s TD
        let vsop = Vsop87d::abridged();
        let sun = Sun::new(&vsop);
        let seed = equinox_approx(1962, Season::Summer);
        let jd = equinox(&sun, seed, Season::Summer, 1e-6).unwrap();

        // The abridged Earth series lands 1.7 s early
        let published = 2437836.5 + (21.0 * 3600.0 + 24.0 * 60.0 + 42.0) * DAYS_PER_SECOND;
        assert_abs_diff_eq!(jd, published, epsilon = 2.0 * DAYS_PER_SECOND);
        assert!(jd < published);
    }

    #[test]
    fn test_refined_longitude() {
        let vsop = Vsop87d::abridged();
        let sun = Sun::new(&vsop);
        for year in [-800, 1000, 1582, 2024, 2900] {
            for season in Season::ALL {
                let jd = equinox(&sun, equinox_approx(year, season), season, 1e-7).unwrap();
                let lambda = sun.apparent_longitude(jd);
                let miss = angle_diff(season.longitude() * RADEG, lambda);
                assert!(miss.abs() < 0.1 * RADSEC, "{year} {season}: {miss}");
            }
        }
    }

    #[test]
    fn test_zero_threshold_bails_out() {
        let vsop = Vsop87d::abridged();
        let sun = Sun::new(&vsop);
        let seed = equinox_approx(2000, Season::Spring);
        assert_eq!(
            equinox(&sun, seed, Season::Spring, 0.0),
            Err(AlmagestError::Bailout {
                solver: "equinox",
                passes: MAX_SOLVER_PASSES
            })
        );
    }
}
