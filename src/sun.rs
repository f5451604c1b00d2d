//! # Solar position
//!
//! Geocentric position of the Sun, two ways:
//!
//! - [`Sun`]: from the VSOP87 Earth vector (L + π, −B, R). Full precision, to be corrected
//!   with [`Sun::apparent_longitude`] for FK5, nutation and aberration.
//! - [`longitude_radius_low`], [`apparent_longitude_low`]: Keplerian closed forms of
//!   Meeus, ch. 25, good to 0.01°.
//!
//! The two apparent longitudes agree to within 40″ between the years 1000 and 3000, the
//! low-precision error of the closed forms. They are not interchangeable below that level.

use crate::{
    angles::reduce,
    constants::{AstronomicalUnit, Degree, JulianDay, Radian, RADEG, RADSEC},
    earth_orientation::{angle_polynomial, nutation_in_longitude, SUN_MEAN_ANOMALY},
    planets::{Dimension, Planet, Vsop87d},
    ref_system::{vsop_to_fk5, Position3},
    series::polynomial,
    time::jd_to_jcent,
};

/// Constant of aberration over the mean distance, arcseconds
const ABERRATION: f64 = 20.4898;

/// Geometric mean longitude of the Sun, degrees in τ (Meeus 28.2), referred to the Earth.
const MEAN_LONGITUDE: [Degree; 6] = [
    100.4664567,
    360007.6982779,
    0.03032028,
    1.0 / 49931.0,
    -1.0 / 15300.0,
    -1.0 / 2000000.0,
];

/// Solar position derived from the planetary model.
#[derive(Debug, Clone, Copy)]
pub struct Sun<'a> {
    vsop: &'a Vsop87d,
}

impl<'a> Sun<'a> {
    pub fn new(vsop: &'a Vsop87d) -> Self {
        Sun { vsop }
    }

    /// One geometric coordinate of the Sun, mean equinox of date.
    ///
    /// Longitude reduced to [0, 2π) and latitude in radians, radius in AU.
    pub fn dimension(&self, jd: JulianDay, dimension: Dimension) -> f64 {
        let earth = self.vsop.dimension(jd, Planet::Earth, dimension);
        match dimension {
            Dimension::Longitude => reduce(earth + std::f64::consts::PI),
            Dimension::Latitude => -earth,
            Dimension::Radius => earth,
        }
    }

    /// Geometric longitude, latitude and radius of the Sun.
    pub fn dimension3(&self, jd: JulianDay) -> Position3 {
        let earth = self.vsop.dimension3(jd, Planet::Earth);
        Position3::new(
            reduce(earth.longitude + std::f64::consts::PI),
            -earth.latitude,
            earth.radius,
        )
    }

    /// Apparent longitude: geometric longitude in FK5 plus nutation and aberration.
    ///
    /// Arguments
    /// ---------
    /// * `jd`: Julian Day in dynamical time.
    ///
    /// Returns
    /// --------
    /// * The apparent longitude, reduced to [0, 2π).
    pub fn apparent_longitude(&self, jd: JulianDay) -> Radian {
        let p = self.dimension3(jd);
        let (l, _) = vsop_to_fk5(jd, p.longitude, p.latitude);
        reduce(l + nutation_in_longitude(jd) + aberration_low(p.radius))
    }

    /// Geometric mean longitude, mean equinox of date.
    pub fn mean_longitude(&self, jd: JulianDay) -> Radian {
        let tau = jd_to_jcent(jd) / 10.0;
        reduce(polynomial(&MEAN_LONGITUDE, tau) * RADEG + std::f64::consts::PI)
    }

    /// Mean longitude of the perigee of the apparent solar orbit.
    pub fn mean_longitude_perigee(&self, jd: JulianDay) -> Radian {
        let t = jd_to_jcent(jd) + 1.0;
        reduce(polynomial(&[1012395.0, 6189.03, 1.63, 0.012], t) / 3600.0 * RADEG)
    }
}

/// Aberration in longitude at distance `radius`, low-precision form (Meeus 25.10).
pub fn aberration_low(radius: AstronomicalUnit) -> Radian {
    -ABERRATION / radius * RADSEC
}

/// True geometric longitude and radius vector, low precision (Meeus 25.2 – 25.5).
///
/// Returns
/// --------
/// * `(longitude, radius)`: longitude reduced to [0, 2π), radius in AU.
pub fn longitude_radius_low(jd: JulianDay) -> (Radian, AstronomicalUnit) {
    let t = jd_to_jcent(jd);

    let l0 = polynomial(&[280.46646, 36000.76983, 0.0003032], t) * RADEG;
    let m = angle_polynomial(&SUN_MEAN_ANOMALY, t);
    let e = polynomial(&[0.016708634, -0.000042037, -0.0000001267], t);

    let c = ((1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin())
        * RADEG;

    let true_anomaly = m + c;
    let radius = 1.000001018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    (reduce(l0 + c), radius)
}

/// Apparent longitude, low precision: nutation and aberration folded in as one correction.
pub fn apparent_longitude_low(jd: JulianDay) -> Radian {
    let t = jd_to_jcent(jd);
    let (longitude, _) = longitude_radius_low(jd);
    let omega = (125.04 - 1934.136 * t) * RADEG;
    reduce(longitude - 0.00569 * RADEG - 0.00478 * RADEG * omega.sin())
}
