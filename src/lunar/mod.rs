//! # ELP2000 lunar theory
//!
//! Geocentric ecliptic position of the Moon from the abridged ELP2000-82 series of
//! Meeus, ch. 47. Accuracy is about 10″ in longitude and 4″ in latitude.
//!
//! ## Overview
//!
//! The series runs over four fundamental arguments `[D, M, M′, F]` with the eccentricity
//! factor E applied to terms in the solar mean anomaly M, plus the additive terms driven by
//! A1 (Venus), A2 (Jupiter) and A3 and by the flattening of the Earth (L′ − F).
//!
//! Two families of accessors are offered:
//!
//! * [`Elp2000::longitude`], [`Elp2000::dimension3`]: apparent longitude, the nutation in
//!   longitude already added.
//! * [`Elp2000::longitude_raw`], [`Elp2000::dimension3_raw`]: mean equinox of date, no
//!   nutation.
//!
//! Callers that add Δψ on their own must use the raw family, or Δψ is counted twice.
//!
//! All inputs are Julian Days in dynamical time. Distances are in kilometers.

mod tables;

use crate::{
    angles::reduce,
    constants::{Degree, JulianDay, Kilometer, Radian, RADEG},
    earth_orientation::{
        angle_polynomial, nutation_in_longitude, ARGUMENT_OF_LATITUDE, ASCENDING_NODE,
        MEAN_ELONGATION, MOON_MEAN_ANOMALY, MOON_MEAN_LONGITUDE, SUN_MEAN_ANOMALY,
    },
    planets::Dimension,
    ref_system::Position3,
    series::{multiplier_series, EccentricityScaling, Trig},
    time::jd_to_jcent,
};

/// Mean distance Earth–Moon of the theory, km
const MEAN_DISTANCE: Kilometer = 385_000.56;

/// Mean longitude of the lunar perigee (degrees, increasing powers of T)
const MEAN_LONGITUDE_PERIGEE: [Degree; 5] = [
    83.3532465,
    4069.0137287,
    -0.0103200,
    -1.0 / 80053.0,
    1.0 / 18999000.0,
];

/// Lunar position model.
#[derive(Debug, Clone, Copy)]
pub struct Elp2000 {
    longitude_distance: &'static [([i8; 4], f64, f64)],
    latitude: &'static [([i8; 4], f64)],
}

impl Default for Elp2000 {
    fn default() -> Self {
        Elp2000::new()
    }
}

/// Sums Σl, Σb (1e-6 degree) and Σr (metres) at one instant.
struct Sums {
    mean_longitude: Radian,
    longitude: f64,
    latitude: f64,
    distance: f64,
}

impl Elp2000 {
    pub fn new() -> Self {
        Elp2000 {
            longitude_distance: &tables::LONGITUDE_DISTANCE,
            latitude: &tables::LATITUDE,
        }
    }

    fn sums(&self, jd: JulianDay) -> Sums {
        let t = jd_to_jcent(jd);

        let l1 = angle_polynomial(&MOON_MEAN_LONGITUDE, t);
        let d = angle_polynomial(&MEAN_ELONGATION, t);
        let m = angle_polynomial(&SUN_MEAN_ANOMALY, t);
        let m1 = angle_polynomial(&MOON_MEAN_ANOMALY, t);
        let f = angle_polynomial(&ARGUMENT_OF_LATITUDE, t);

        let a1 = reduce((119.75 + 131.849 * t) * RADEG);
        let a2 = reduce((53.09 + 479264.290 * t) * RADEG);
        let a3 = reduce((313.45 + 481266.484 * t) * RADEG);

        let args = [d, m, m1, f];
        let scaling = Some(EccentricityScaling {
            e: 1.0 - 0.002516 * t - 0.0000074 * t * t,
            anomaly_index: 1,
        });

        let sigma_l = multiplier_series(
            self.longitude_distance.iter().map(|&(k, l, _)| (k, l)),
            &args,
            Trig::Sin,
            scaling,
        ) + 3958.0 * a1.sin()
            + 1962.0 * (l1 - f).sin()
            + 318.0 * a2.sin();

        let sigma_r = multiplier_series(
            self.longitude_distance.iter().map(|&(k, _, r)| (k, r)),
            &args,
            Trig::Cos,
            scaling,
        );

        let sigma_b = multiplier_series(self.latitude.iter().copied(), &args, Trig::Sin, scaling)
            - 2235.0 * l1.sin()
            + 382.0 * a3.sin()
            + 175.0 * (a1 - f).sin()
            + 175.0 * (a1 + f).sin()
            + 127.0 * (l1 - m1).sin()
            - 115.0 * (l1 + m1).sin();

        Sums {
            mean_longitude: l1,
            longitude: sigma_l,
            latitude: sigma_b,
            distance: sigma_r,
        }
    }

    /// Geocentric longitude referred to the mean equinox of date, reduced to [0, 2π).
    pub fn longitude_raw(&self, jd: JulianDay) -> Radian {
        let s = self.sums(jd);
        reduce(s.mean_longitude + s.longitude * 1e-6 * RADEG)
    }

    /// Apparent geocentric longitude (nutation in longitude included), reduced to [0, 2π).
    pub fn longitude(&self, jd: JulianDay) -> Radian {
        reduce(self.longitude_raw(jd) + nutation_in_longitude(jd))
    }

    /// Geocentric latitude, radians.
    pub fn latitude(&self, jd: JulianDay) -> Radian {
        self.sums(jd).latitude * 1e-6 * RADEG
    }

    /// Distance between the centers of the Earth and the Moon, km.
    pub fn radius(&self, jd: JulianDay) -> Kilometer {
        MEAN_DISTANCE + self.sums(jd).distance / 1000.0
    }

    /// One coordinate; the longitude includes nutation.
    pub fn dimension(&self, jd: JulianDay, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Longitude => self.longitude(jd),
            Dimension::Latitude => self.latitude(jd),
            Dimension::Radius => self.radius(jd),
        }
    }

    /// Longitude, latitude and distance, without nutation.
    pub fn dimension3_raw(&self, jd: JulianDay) -> Position3 {
        let s = self.sums(jd);
        Position3::new(
            reduce(s.mean_longitude + s.longitude * 1e-6 * RADEG),
            s.latitude * 1e-6 * RADEG,
            MEAN_DISTANCE + s.distance / 1000.0,
        )
    }

    /// Longitude, latitude and distance, nutation in longitude included.
    pub fn dimension3(&self, jd: JulianDay) -> Position3 {
        let raw = self.dimension3_raw(jd);
        Position3 {
            longitude: reduce(raw.longitude + nutation_in_longitude(jd)),
            ..raw
        }
    }

    /// Mean longitude L′, referred to the mean equinox of date.
    pub fn mean_longitude(&self, jd: JulianDay) -> Radian {
        angle_polynomial(&MOON_MEAN_LONGITUDE, jd_to_jcent(jd))
    }

    /// Mean elongation D.
    pub fn mean_elongation(&self, jd: JulianDay) -> Radian {
        angle_polynomial(&MEAN_ELONGATION, jd_to_jcent(jd))
    }

    /// Mean anomaly M′.
    pub fn mean_anomaly(&self, jd: JulianDay) -> Radian {
        angle_polynomial(&MOON_MEAN_ANOMALY, jd_to_jcent(jd))
    }

    /// Argument of latitude F.
    pub fn argument_of_latitude(&self, jd: JulianDay) -> Radian {
        angle_polynomial(&ARGUMENT_OF_LATITUDE, jd_to_jcent(jd))
    }

    /// Mean longitude of the ascending node Ω.
    pub fn mean_longitude_ascending_node(&self, jd: JulianDay) -> Radian {
        angle_polynomial(&ASCENDING_NODE, jd_to_jcent(jd))
    }

    /// Mean longitude of the perigee.
    pub fn mean_longitude_perigee(&self, jd: JulianDay) -> Radian {
        angle_polynomial(&MEAN_LONGITUDE_PERIGEE, jd_to_jcent(jd))
    }
}

#[cfg(test)]
mod lunar_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_meeus_47a() {
        // 1992-04-12 0h TD
        let moon = Elp2000::new();
        let jd = 2448724.5;

        let p = moon.dimension3(jd);
        assert_abs_diff_eq!(p.longitude / RADEG, 133.167265, epsilon = 1e-5);
        assert_abs_diff_eq!(p.latitude / RADEG, -3.229126, epsilon = 1e-6);
        assert_abs_diff_eq!(p.radius, 368409.7, epsilon = 1.0);

        let raw = moon.dimension3_raw(jd);
        assert_abs_diff_eq!(raw.longitude / RADEG, 133.162655, epsilon = 1e-5);
        assert_eq!(raw.latitude, p.latitude);
        assert_eq!(raw.radius, p.radius);
    }

    #[test]
    fn test_perigee_2013() {
        // 2013-06-23, close to perigee
        let moon = Elp2000::new();
        let jd = 2456466.5;
        let p = moon.dimension3(jd);
        assert_abs_diff_eq!(p.longitude / RADEG, 264.8092609, epsilon = 1e-5);
        assert_abs_diff_eq!(p.latitude / RADEG, 3.2272014, epsilon = 1e-5);
        assert_abs_diff_eq!(p.radius, 357205.91, epsilon = 1.0);
    }

    #[test]
    fn test_accessors_agree() {
        let moon = Elp2000::new();
        let jd = 2451545.0;
        let p = moon.dimension3(jd);
        assert_eq!(moon.dimension(jd, Dimension::Longitude), p.longitude);
        assert_eq!(moon.dimension(jd, Dimension::Latitude), p.latitude);
        assert_eq!(moon.dimension(jd, Dimension::Radius), p.radius);
        assert_eq!(moon.longitude_raw(jd), moon.dimension3_raw(jd).longitude);

        let nutation = nutation_in_longitude(jd);
        assert_abs_diff_eq!(
            crate::angles::angle_diff(moon.longitude_raw(jd), moon.longitude(jd)),
            nutation,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_mean_elements() {
        // Meeus example 47.a
        let moon = Elp2000::new();
        let jd = 2448724.5;
        assert_abs_diff_eq!(moon.mean_longitude(jd) / RADEG, 134.290182, epsilon = 1e-6);
        assert_abs_diff_eq!(moon.mean_elongation(jd) / RADEG, 113.842304, epsilon = 1e-6);
        assert_abs_diff_eq!(moon.mean_anomaly(jd) / RADEG, 5.150833, epsilon = 1e-6);
        assert_abs_diff_eq!(moon.argument_of_latitude(jd) / RADEG, 219.889721, epsilon = 1e-6);

        for x in [
            moon.mean_longitude_ascending_node(jd),
            moon.mean_longitude_perigee(jd),
        ] {
            assert!((0.0..crate::constants::DPI).contains(&x));
        }
    }
}
