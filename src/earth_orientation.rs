//! # Nutation and obliquity of the ecliptic
//!
//! IAU 1980 theory of nutation (Meeus, ch. 22) and the two mean-obliquity polynomials.
//!
//! ## Overview
//!
//! - [`DelaunayArguments`]: the five fundamental arguments shared by the nutation series and
//!   the lunar theory, as polynomials in Julian centuries from J2000.0 (Meeus 47.2 – 47.5
//!   and 47.7).
//! - [`nutation_in_longitude`] / [`nutation_in_obliquity`]: Δψ and Δε from the 63-term
//!   IAU 1980 table (terms below 0.0003″ dropped), each with its secular rate.
//! - [`obliquity`]: IAU mean obliquity (Meeus 22.2), ≈1″ over 2000 years.
//! - [`obliquity_hi`]: Laskar's polynomial in T/100 (Meeus 22.3), ≈0.01″ within ±3000 years.
//! - [`Nutation`]: everything above bundled for one instant.
//!
//! All inputs are Julian Days in dynamical time.

use crate::{
    angles::reduce,
    constants::{ArcSec, Degree, JulianDay, Radian, RADEG, RADSEC},
    series::{multiplier_series, polynomial, Trig},
    time::jd_to_jcent,
};

// -------------------------------------------------------------------------------------------------
// Fundamental arguments (degrees, increasing powers of T)
// -------------------------------------------------------------------------------------------------

/// Mean longitude of the Moon, L′
pub(crate) const MOON_MEAN_LONGITUDE: [Degree; 5] = [
    218.3164477,
    481267.88123421,
    -0.0015786,
    1.0 / 538841.0,
    -1.0 / 65194000.0,
];

/// Mean elongation of the Moon, D
pub(crate) const MEAN_ELONGATION: [Degree; 5] = [
    297.8501921,
    445267.1114034,
    -0.0018819,
    1.0 / 545868.0,
    -1.0 / 113065000.0,
];

/// Mean anomaly of the Sun, M
pub(crate) const SUN_MEAN_ANOMALY: [Degree; 4] =
    [357.5291092, 35999.0502909, -0.0001536, 1.0 / 24490000.0];

/// Mean anomaly of the Moon, M′
pub(crate) const MOON_MEAN_ANOMALY: [Degree; 5] = [
    134.9633964,
    477198.8675055,
    0.0087414,
    1.0 / 69699.0,
    -1.0 / 14712000.0,
];

/// Argument of latitude of the Moon, F
pub(crate) const ARGUMENT_OF_LATITUDE: [Degree; 5] = [
    93.2720950,
    483202.0175233,
    -0.0036539,
    -1.0 / 3526000.0,
    1.0 / 863310000.0,
];

/// Longitude of the ascending node of the lunar orbit, Ω
pub(crate) const ASCENDING_NODE: [Degree; 5] = [
    125.0445479,
    -1934.1362891,
    0.0020754,
    1.0 / 467441.0,
    -1.0 / 60616000.0,
];

/// Evaluate a polynomial in degrees and reduce it to [0, 2π).
pub(crate) fn angle_polynomial(coefficients: &[Degree], t: f64) -> Radian {
    reduce(polynomial(coefficients, t) * RADEG)
}

/// The Delaunay arguments at one instant, radians in [0, 2π).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaunayArguments {
    /// D
    pub mean_elongation: Radian,
    /// M
    pub sun_mean_anomaly: Radian,
    /// M′
    pub moon_mean_anomaly: Radian,
    /// F
    pub argument_of_latitude: Radian,
    /// Ω
    pub ascending_node: Radian,
}

impl DelaunayArguments {
    /// Arguments at `t` Julian centuries from J2000.0.
    pub fn at(t: f64) -> Self {
        DelaunayArguments {
            mean_elongation: angle_polynomial(&MEAN_ELONGATION, t),
            sun_mean_anomaly: angle_polynomial(&SUN_MEAN_ANOMALY, t),
            moon_mean_anomaly: angle_polynomial(&MOON_MEAN_ANOMALY, t),
            argument_of_latitude: angle_polynomial(&ARGUMENT_OF_LATITUDE, t),
            ascending_node: angle_polynomial(&ASCENDING_NODE, t),
        }
    }

    /// `[D, M, M′, F, Ω]`, the column order of the nutation table.
    pub fn as_array(&self) -> [Radian; 5] {
        [
            self.mean_elongation,
            self.sun_mean_anomaly,
            self.moon_mean_anomaly,
            self.argument_of_latitude,
            self.ascending_node,
        ]
    }
}

// -------------------------------------------------------------------------------------------------
// IAU 1980 nutation
// -------------------------------------------------------------------------------------------------

/// One row of the nutation table, coefficients in units of 0.0001″ (rates per century).
#[derive(Debug, Clone, Copy, PartialEq)]
struct NutationTerm {
    multipliers: [i8; 5],
    psi: f64,
    psi_rate: f64,
    eps: f64,
    eps_rate: f64,
}

impl NutationTerm {
    const fn new(multipliers: [i8; 5], psi: f64, psi_rate: f64, eps: f64, eps_rate: f64) -> Self {
        NutationTerm {
            multipliers,
            psi,
            psi_rate,
            eps,
            eps_rate,
        }
    }
}

/// Meeus table 22.A, columns D, M, M′, F, Ω.
const NUTATION_TERMS: [NutationTerm; 63] = [
    NutationTerm::new([0, 0, 0, 0, 1], -171996.0, -174.2, 92025.0, 8.9),
    NutationTerm::new([-2, 0, 0, 2, 2], -13187.0, -1.6, 5736.0, -3.1),
    NutationTerm::new([0, 0, 0, 2, 2], -2274.0, -0.2, 977.0, -0.5),
    NutationTerm::new([0, 0, 0, 0, 2], 2062.0, 0.2, -895.0, 0.5),
    NutationTerm::new([0, 1, 0, 0, 0], 1426.0, -3.4, 54.0, -0.1),
    NutationTerm::new([0, 0, 1, 0, 0], 712.0, 0.1, -7.0, 0.0),
    NutationTerm::new([-2, 1, 0, 2, 2], -517.0, 1.2, 224.0, -0.6),
    NutationTerm::new([0, 0, 0, 2, 1], -386.0, -0.4, 200.0, 0.0),
    NutationTerm::new([0, 0, 1, 2, 2], -301.0, 0.0, 129.0, -0.1),
    NutationTerm::new([-2, -1, 0, 2, 2], 217.0, -0.5, -95.0, 0.3),
    NutationTerm::new([-2, 0, 1, 0, 0], -158.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, 0, 0, 2, 1], 129.0, 0.1, -70.0, 0.0),
    NutationTerm::new([0, 0, -1, 2, 2], 123.0, 0.0, -53.0, 0.0),
    NutationTerm::new([2, 0, 0, 0, 0], 63.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 1, 0, 1], 63.0, 0.1, -33.0, 0.0),
    NutationTerm::new([2, 0, -1, 2, 2], -59.0, 0.0, 26.0, 0.0),
    NutationTerm::new([0, 0, -1, 0, 1], -58.0, -0.1, 32.0, 0.0),
    NutationTerm::new([0, 0, 1, 2, 1], -51.0, 0.0, 27.0, 0.0),
    NutationTerm::new([-2, 0, 2, 0, 0], 48.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, -2, 2, 1], 46.0, 0.0, -24.0, 0.0),
    NutationTerm::new([2, 0, 0, 2, 2], -38.0, 0.0, 16.0, 0.0),
    NutationTerm::new([0, 0, 2, 2, 2], -31.0, 0.0, 13.0, 0.0),
    NutationTerm::new([0, 0, 2, 0, 0], 29.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, 0, 1, 2, 2], 29.0, 0.0, -12.0, 0.0),
    NutationTerm::new([0, 0, 0, 2, 0], 26.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, 0, 0, 2, 0], -22.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, -1, 2, 1], 21.0, 0.0, -10.0, 0.0),
    NutationTerm::new([0, 2, 0, 0, 0], 17.0, -0.1, 0.0, 0.0),
    NutationTerm::new([2, 0, -1, 0, 1], 16.0, 0.0, -8.0, 0.0),
    NutationTerm::new([-2, 2, 0, 2, 2], -16.0, 0.1, 7.0, 0.0),
    NutationTerm::new([0, 1, 0, 0, 1], -15.0, 0.0, 9.0, 0.0),
    NutationTerm::new([-2, 0, 1, 0, 1], -13.0, 0.0, 7.0, 0.0),
    NutationTerm::new([0, -1, 0, 0, 1], -12.0, 0.0, 6.0, 0.0),
    NutationTerm::new([0, 0, 2, -2, 0], 11.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, -1, 2, 1], -10.0, 0.0, 5.0, 0.0),
    NutationTerm::new([2, 0, 1, 2, 2], -8.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, 1, 0, 2, 2], 7.0, 0.0, -3.0, 0.0),
    NutationTerm::new([-2, 1, 1, 0, 0], -7.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, -1, 0, 2, 2], -7.0, 0.0, 3.0, 0.0),
    NutationTerm::new([2, 0, 0, 2, 1], -7.0, 0.0, 3.0, 0.0),
    NutationTerm::new([2, 0, 1, 0, 0], 6.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, 0, 2, 2, 2], 6.0, 0.0, -3.0, 0.0),
    NutationTerm::new([-2, 0, 1, 2, 1], 6.0, 0.0, -3.0, 0.0),
    NutationTerm::new([2, 0, -2, 0, 1], -6.0, 0.0, 3.0, 0.0),
    NutationTerm::new([2, 0, 0, 0, 1], -6.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, -1, 1, 0, 0], 5.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, -1, 0, 2, 1], -5.0, 0.0, 3.0, 0.0),
    NutationTerm::new([-2, 0, 0, 0, 1], -5.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, 0, 2, 2, 1], -5.0, 0.0, 3.0, 0.0),
    NutationTerm::new([-2, 0, 2, 0, 1], 4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, 1, 0, 2, 1], 4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 1, -2, 0], 4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 1, 0, 0], -4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, 1, 0, 0, 0], -4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, 0, 0, 0], -4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 1, 2, 0], 3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, -2, 2, 2], -3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, -1, 1, 0, 0], -3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 1, 0, 0], -3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, -1, 1, 2, 2], -3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, -1, -1, 2, 2], -3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 3, 2, 2], -3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, -1, 0, 2, 2], -3.0, 0.0, 0.0, 0.0),
];

/// Nutation in longitude Δψ, in radians.
pub fn nutation_in_longitude(jd: JulianDay) -> Radian {
    let t = jd_to_jcent(jd);
    let args = DelaunayArguments::at(t).as_array();
    let sum: ArcSec = multiplier_series(
        NUTATION_TERMS
            .iter()
            .map(|term| (term.multipliers, term.psi + term.psi_rate * t)),
        &args,
        Trig::Sin,
        None,
    ) * 1e-4;
    sum * RADSEC
}

/// Nutation in obliquity Δε, in radians.
pub fn nutation_in_obliquity(jd: JulianDay) -> Radian {
    let t = jd_to_jcent(jd);
    let args = DelaunayArguments::at(t).as_array();
    let sum: ArcSec = multiplier_series(
        NUTATION_TERMS
            .iter()
            .map(|term| (term.multipliers, term.eps + term.eps_rate * t)),
        &args,
        Trig::Cos,
        None,
    ) * 1e-4;
    sum * RADSEC
}

// -------------------------------------------------------------------------------------------------
// Obliquity of the ecliptic
// -------------------------------------------------------------------------------------------------

/// 23°26′21.448″ in arcseconds
const OBLIQUITY_J2000: ArcSec = 84381.448;

/// Mean obliquity of the ecliptic, IAU polynomial (Meeus 22.2).
///
/// Accurate to about 1″ over 2000 years and 10″ over 4000 years from J2000.0.
///
/// # See also
/// * [`obliquity_hi`] – for wider time spans
pub fn obliquity(jd: JulianDay) -> Radian {
    let t = jd_to_jcent(jd);
    polynomial(&[OBLIQUITY_J2000, -46.8150, -0.00059, 0.001813], t) * RADSEC
}

/// Mean obliquity of the ecliptic, Laskar's polynomial (Meeus 22.3).
///
/// Accurate to about 0.01″ within 3000 years of J2000.0, a few arcseconds at ±10000 years.
pub fn obliquity_hi(jd: JulianDay) -> Radian {
    let u = jd_to_jcent(jd) / 100.0;
    polynomial(
        &[
            OBLIQUITY_J2000,
            -4680.93,
            -1.55,
            1999.25,
            -51.38,
            -249.67,
            -39.05,
            7.12,
            27.87,
            5.79,
            2.45,
        ],
        u,
    ) * RADSEC
}

/// True obliquity ε = ε₀ + Δε.
pub fn true_obliquity(jd: JulianDay) -> Radian {
    obliquity(jd) + nutation_in_obliquity(jd)
}

/// Nutation and obliquity at one instant.
///
/// The scheduler computes one of these per simulated day and hands it to every body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Δψ, radians
    pub delta_psi: Radian,
    /// Δε, radians
    pub delta_eps: Radian,
    /// ε₀, radians
    pub mean_obliquity: Radian,
}

impl Nutation {
    pub fn at(jd: JulianDay) -> Self {
        Nutation {
            delta_psi: nutation_in_longitude(jd),
            delta_eps: nutation_in_obliquity(jd),
            mean_obliquity: obliquity(jd),
        }
    }

    /// ε = ε₀ + Δε
    pub fn true_obliquity(&self) -> Radian {
        self.mean_obliquity + self.delta_eps
    }
}

#[cfg(test)]
mod earth_orientation_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    const JD: JulianDay = 2446895.5;

    #[test]
    fn test_delaunay_arguments() {
        // Meeus example 22.a, 1987-04-10 0h TD
        let args = DelaunayArguments::at(jd_to_jcent(JD));
        assert_abs_diff_eq!(args.mean_elongation / RADEG, 136.9623, epsilon = 2e-3);
        assert_abs_diff_eq!(args.sun_mean_anomaly / RADEG, 94.9792, epsilon = 2e-3);
        assert_abs_diff_eq!(args.moon_mean_anomaly / RADEG, 229.2784, epsilon = 2e-3);
        assert_abs_diff_eq!(args.argument_of_latitude / RADEG, 143.4079, epsilon = 2e-3);
        assert_abs_diff_eq!(args.ascending_node / RADEG, 11.2531, epsilon = 2e-3);
    }

    #[test]
    fn test_nutation() {
        assert_abs_diff_eq!(nutation_in_longitude(JD) / RADSEC, -3.788, epsilon = 1e-3);
        assert_abs_diff_eq!(nutation_in_obliquity(JD) / RADSEC, 9.443, epsilon = 1e-3);
        assert_abs_diff_eq!(nutation_in_longitude(2456479.5) / RADSEC, 12.675, epsilon = 1e-3);
    }

    #[test]
    fn test_obliquity() {
        let expected = 23.0 * 3600.0 + 26.0 * 60.0 + 27.407;
        assert_abs_diff_eq!(obliquity(JD) / RADSEC, expected, epsilon = 1e-3);
        assert_abs_diff_eq!(obliquity_hi(JD) / RADSEC, expected, epsilon = 1e-3);
        assert_abs_diff_eq!(
            obliquity(crate::constants::J2000) / RADSEC,
            OBLIQUITY_J2000,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_true_obliquity() {
        let expected = (23.0 * 3600.0 + 26.0 * 60.0 + 36.850) * RADSEC;
        assert_abs_diff_eq!(true_obliquity(JD), expected, epsilon = 1e-3 * RADSEC);

        let nutation = Nutation::at(JD);
        assert_eq!(nutation.true_obliquity(), true_obliquity(JD));
        assert_eq!(nutation.delta_psi, nutation_in_longitude(JD));
    }
}
