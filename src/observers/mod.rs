//! # Observer site
//!
//! The [`Observer`] is the ground station every topocentric computation refers to: rise,
//! set and transit times, horizontal coordinates and local sidereal time.
//!
//! ## Conventions
//!
//! - Latitude: geodetic, **radians**, north positive, within [−π/2, π/2].
//! - Longitude: **radians, east positive**. Boston is at about −1.2406 rad.
//! - Height: **meters** above the reference ellipsoid.
//! - Geocentric parallax constants (ρ·sinφ′, ρ·cosφ′): **Earth equatorial radii**, derived
//!   through [`ell_to_geo`](crate::ref_system::ell_to_geo).
//!
//! An observer is an immutable value. It derives `serde` traits so that an external loader
//! can hand a parsed configuration to [`AlmagestEnv`](crate::env_state::AlmagestEnv).
//!
//! ## Errors
//!
//! - [`Observer::new`] returns [`AlmagestError::InvalidObserver`] for a non-finite coordinate
//!   or a latitude outside [−π/2, π/2].
//!
//! ## See also
//! ------------
//! * [`crate::riseset`] – uses the latitude and longitude of the site.
//! * [`crate::ref_system::equ_to_horiz`] – horizontal coordinates.
//! * [`crate::time::sidereal_time_greenwich`] – Greenwich mean sidereal time.

use serde::{Deserialize, Serialize};

use crate::{
    almagest_errors::AlmagestError,
    angles::reduce,
    constants::{JulianDay, Kilometer, Meter, Radian, EARTH_EQUATORIAL_RADIUS},
    ref_system::{ell_to_geo, equ_to_horiz},
    time::sidereal_time_greenwich,
};

/// Geodetic position of an observing site.
///
/// Units
/// -----
/// * `latitude`, `longitude`: radians (longitude east positive).
/// * `height`: meters above the ellipsoid.
///
/// See also
/// ------------
/// * [`Observer::new`] – validated constructor.
/// * [`Observer::rho_sin_phi`], [`Observer::rho_cos_phi`] – geocentric parallax constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Geodetic latitude, radians.
    pub latitude: Radian,

    /// Longitude, radians east of Greenwich.
    pub longitude: Radian,

    /// Height above the reference ellipsoid, meters.
    pub height: Meter,

    /// Optional human-readable site name.
    pub name: Option<String>,
}

impl Default for Observer {
    /// Greenwich, at sea level.
    fn default() -> Self {
        Observer {
            latitude: 51.4769_f64.to_radians(),
            longitude: 0.0,
            height: 0.0,
            name: Some("Greenwich".to_string()),
        }
    }
}

impl Observer {
    /// Create a new observer from geodetic coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `latitude`: geodetic latitude in **radians**.
    /// * `longitude`: longitude in **radians** (east positive).
    /// * `height`: height above the reference ellipsoid in **meters**.
    /// * `name`: optional site name.
    ///
    /// Return
    /// ----------
    /// * The observer.
    ///
    /// Errors
    /// ----------
    /// * [`AlmagestError::InvalidObserver`] if a coordinate is NaN or infinite, or if the
    ///   latitude lies outside [−π/2, π/2].
    pub fn new(
        latitude: Radian,
        longitude: Radian,
        height: Meter,
        name: Option<String>,
    ) -> Result<Observer, AlmagestError> {
        if !(latitude.is_finite() && longitude.is_finite() && height.is_finite()) {
            return Err(AlmagestError::InvalidObserver(format!(
                "non-finite coordinates ({latitude}, {longitude}, {height})"
            )));
        }
        if latitude.abs() > std::f64::consts::FRAC_PI_2 {
            return Err(AlmagestError::InvalidObserver(format!(
                "latitude {latitude} rad outside [-pi/2, pi/2]"
            )));
        }

        Ok(Observer {
            latitude,
            longitude,
            height,
            name,
        })
    }

    /// Distance from the Earth's center (km), angle from the polar axis and longitude.
    pub fn geocentric(&self) -> (Kilometer, Radian, Radian) {
        ell_to_geo(self.latitude, self.longitude, self.height / 1000.0)
    }

    /// ρ·sinφ′, in Earth equatorial radii.
    pub fn rho_sin_phi(&self) -> f64 {
        let (r, theta, _) = self.geocentric();
        r * theta.cos() / EARTH_EQUATORIAL_RADIUS
    }

    /// ρ·cosφ′, in Earth equatorial radii.
    pub fn rho_cos_phi(&self) -> f64 {
        let (r, theta, _) = self.geocentric();
        r * theta.sin() / EARTH_EQUATORIAL_RADIUS
    }

    /// Local mean sidereal time at `jd` (UT), radians in [0, 2π).
    pub fn local_sidereal_time(&self, jd: JulianDay) -> Radian {
        reduce(sidereal_time_greenwich(jd) + self.longitude)
    }

    /// Azimuth (from the south, westward) and altitude of an equatorial position.
    ///
    /// Arguments
    /// -----------------
    /// * `jd`: Julian Day in universal time.
    /// * `ra`, `dec`: right ascension and declination, radians.
    pub fn horizontal(&self, jd: JulianDay, ra: Radian, dec: Radian) -> (Radian, Radian) {
        let hour_angle = self.local_sidereal_time(jd) - ra;
        equ_to_horiz(hour_angle, dec, self.latitude)
    }
}

#[cfg(test)]
mod observers_test {
    use super::*;
    use crate::{angles::dms_to_d, constants::RADEG};
    use approx::assert_abs_diff_eq;

    fn palomar() -> Observer {
        Observer::new(
            dms_to_d(33.0, 21.0, 22.0) * RADEG,
            dms_to_d(-116.0, 51.0, 47.0) * RADEG,
            1706.0,
            Some("Palomar".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_observer_constructor() {
        let observer = Observer::new(0.0, 0.0, 0.0, None).unwrap();
        assert_abs_diff_eq!(observer.rho_cos_phi(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(observer.rho_sin_phi(), 0.0, epsilon = 1e-15);

        assert!(matches!(
            Observer::new(1.6, 0.0, 0.0, None),
            Err(AlmagestError::InvalidObserver(_))
        ));
        assert!(matches!(
            Observer::new(0.5, f64::NAN, 0.0, None),
            Err(AlmagestError::InvalidObserver(_))
        ));
        assert!(Observer::new(-std::f64::consts::FRAC_PI_2, 3.0, -400.0, None).is_ok());
    }

    #[test]
    fn test_parallax_constants_palomar() {
        // Meeus example 11.a
        let site = palomar();
        assert_abs_diff_eq!(site.rho_sin_phi(), 0.546861, epsilon = 1e-6);
        assert_abs_diff_eq!(site.rho_cos_phi(), 0.836339, epsilon = 1e-6);
    }

    #[test]
    fn test_local_sidereal_time() {
        let site = palomar();
        let jd = 2446895.5;
        let lst = site.local_sidereal_time(jd);
        assert_abs_diff_eq!(
            crate::angles::angle_diff(sidereal_time_greenwich(jd), lst),
            site.longitude,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_horizontal_meridian() {
        // A star on the local meridian culminates due south
        let site = Observer::new(45.0 * RADEG, 10.0 * RADEG, 0.0, None).unwrap();
        let jd = 2451545.0;
        let ra = site.local_sidereal_time(jd);
        let (azimuth, altitude) = site.horizontal(jd, ra, 20.0 * RADEG);
        assert_abs_diff_eq!(
            crate::angles::angle_diff(0.0, azimuth),
            0.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(altitude / RADEG, 65.0, epsilon = 1e-9);
    }

    #[test]
    fn test_default_is_greenwich() {
        let observer = Observer::default();
        assert_eq!(observer.longitude, 0.0);
        assert_eq!(observer.name.as_deref(), Some("Greenwich"));
    }
}
