//! # Reference systems and coordinate transforms
//!
//! Conversions between the frames used by the ephemeris:
//!
//! - ecliptic ⇄ equatorial, parameterized by the obliquity ε,
//! - equatorial ⇄ horizontal, parameterized by the observer latitude and the local hour angle,
//! - geodetic (ellipsoidal) ⇄ geocentric,
//! - the FK5 frame correction of VSOP87 output.
//!
//! The angular transforms are axis rotations of unit vectors, built with [`rotmt`].
//!
//! ## Conventions
//!
//! * Longitudes and right ascensions are returned in [0, 2π); latitudes, declinations and
//!   altitudes in [−π/2, π/2].
//! * Azimuth is measured **westward from the south** (Meeus, ch. 13). Near the poles the
//!   horizontal frame degenerates and azimuths lose meaning.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{
    almagest_errors::AlmagestError,
    angles::reduce,
    constants::{
        JulianDay, Kilometer, Radian, EARTH_EQUATORIAL_RADIUS, EARTH_FLATTENING, MAX_SOLVER_PASSES,
        RADEG, RADSEC,
    },
    time::jd_to_jcent,
};

/// Spherical position: longitude, latitude and radius vector.
///
/// The radius is in AU for the Sun and the planets, in kilometers for the Moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position3 {
    pub longitude: Radian,
    pub latitude: Radian,
    pub radius: f64,
}

impl Position3 {
    pub fn new(longitude: Radian, latitude: Radian, radius: f64) -> Self {
        Position3 {
            longitude,
            latitude,
            radius,
        }
    }

    /// Rectangular coordinates in the same frame and unit.
    pub fn to_cartesian(&self) -> Vector3<f64> {
        self.radius * unit_vector(self.longitude, self.latitude)
    }

    /// Spherical coordinates of a rectangular vector, longitude reduced.
    pub fn from_cartesian(v: &Vector3<f64>) -> Self {
        let radius = v.norm();
        Position3 {
            longitude: reduce(v.y.atan2(v.x)),
            latitude: v.z.atan2(v.x.hypot(v.y)),
            radius,
        }
    }
}

/// Axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Build the rotation matrix of angle `alpha` around `axis`.
///
/// The rotation is applied to the vector in a fixed frame: `x' = R · x`.
/// The returned matrix is orthonormal, so its transpose is its inverse.
///
/// # See also
/// * [`ecl_to_equ`] – rotation around X by the obliquity
/// * [`equ_to_horiz`] – rotation around Y by the colatitude
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

fn unit_vector(lon: Radian, lat: Radian) -> Vector3<f64> {
    let (sl, cl) = lon.sin_cos();
    let (sb, cb) = lat.sin_cos();
    Vector3::new(cb * cl, cb * sl, sb)
}

/// `(atan2(y, x), asin(z))` of a unit vector, the second clamped against rounding.
fn spherical(v: &Vector3<f64>) -> (Radian, Radian) {
    (v.y.atan2(v.x), v.z.clamp(-1.0, 1.0).asin())
}

/// Ecliptic → equatorial coordinates (Meeus 13.3, 13.4).
///
/// Arguments
/// ---------
/// * `longitude`, `latitude`: ecliptic coordinates, radians.
/// * `obliquity`: obliquity of the ecliptic, radians.
///
/// Returns
/// --------
/// * `(right ascension, declination)` in radians, right ascension in [0, 2π).
pub fn ecl_to_equ(longitude: Radian, latitude: Radian, obliquity: Radian) -> (Radian, Radian) {
    let v = rotmt(obliquity, Axis::X) * unit_vector(longitude, latitude);
    let (ra, dec) = spherical(&v);
    (reduce(ra), dec)
}

/// Equatorial → ecliptic coordinates (Meeus 13.1, 13.2).
///
/// Returns `(longitude, latitude)` in radians, longitude in [0, 2π).
pub fn equ_to_ecl(ra: Radian, dec: Radian, obliquity: Radian) -> (Radian, Radian) {
    let v = rotmt(-obliquity, Axis::X) * unit_vector(ra, dec);
    let (lon, lat) = spherical(&v);
    (reduce(lon), lat)
}

/// Equatorial → horizontal coordinates (Meeus 13.5, 13.6).
///
/// Arguments
/// ---------
/// * `hour_angle`: local hour angle H, radians.
/// * `dec`: declination, radians.
/// * `latitude`: observer latitude, radians.
///
/// Returns
/// --------
/// * `(azimuth, altitude)`: azimuth measured westward from the south in [0, 2π), altitude in
///   radians.
pub fn equ_to_horiz(hour_angle: Radian, dec: Radian, latitude: Radian) -> (Radian, Radian) {
    let rotation = rotmt(latitude - std::f64::consts::FRAC_PI_2, Axis::Y);
    let (azimuth, altitude) = spherical(&(rotation * unit_vector(hour_angle, dec)));
    (reduce(azimuth), altitude)
}

/// Horizontal → equatorial coordinates, inverse of [`equ_to_horiz`].
///
/// Returns `(hour angle, declination)`, hour angle in [0, 2π).
pub fn horiz_to_equ(azimuth: Radian, altitude: Radian, latitude: Radian) -> (Radian, Radian) {
    let rotation = rotmt(std::f64::consts::FRAC_PI_2 - latitude, Axis::Y);
    let (hour_angle, dec) = spherical(&(rotation * unit_vector(azimuth, altitude)));
    (reduce(hour_angle), dec)
}

/// First eccentricity squared of the reference ellipsoid.
fn ellipsoid_e2() -> f64 {
    2.0 * EARTH_FLATTENING - EARTH_FLATTENING * EARTH_FLATTENING
}

/// Geodetic (ellipsoidal) → geocentric coordinates.
///
/// Arguments
/// ---------
/// * `latitude`, `longitude`: geodetic coordinates, radians.
/// * `height`: height above the ellipsoid, kilometers.
///
/// Returns
/// --------
/// * `(r, theta, phi)`: distance from the Earth's center in kilometers, angle from the polar
///   axis in radians and longitude in radians.
pub fn ell_to_geo(
    latitude: Radian,
    longitude: Radian,
    height: Kilometer,
) -> (Kilometer, Radian, Radian) {
    let e2 = ellipsoid_e2();
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let n = EARTH_EQUATORIAL_RADIUS / (1.0 - e2 * sin_lat * sin_lat).sqrt();

    let hx = (n + height) * cos_lat;
    let hy = (n * (1.0 - e2) + height) * sin_lat;

    (hx.hypot(hy), hx.atan2(hy), longitude)
}

/// Geocentric → geodetic coordinates, inverse of [`ell_to_geo`].
///
/// Fixed-point iteration on the latitude, converged to 1e-12 rad.
///
/// Returns
/// --------
/// * `(latitude, longitude, height)` in radians, radians and kilometers, or
///   [`AlmagestError::Bailout`] if the iteration does not settle.
pub fn geo_to_ell(
    r: Kilometer,
    theta: Radian,
    phi: Radian,
) -> Result<(Radian, Radian, Kilometer), AlmagestError> {
    let e2 = ellipsoid_e2();
    let hx = r * theta.sin();
    let hy = r * theta.cos();

    let mut latitude = hy.atan2(hx * (1.0 - e2));
    for _ in 0..MAX_SOLVER_PASSES {
        let (sin_lat, cos_lat) = latitude.sin_cos();
        let n = EARTH_EQUATORIAL_RADIUS / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let height = if cos_lat.abs() > 1e-10 {
            hx / cos_lat - n
        } else {
            hy / sin_lat - n * (1.0 - e2)
        };
        let next = hy.atan2(hx * (1.0 - e2 * n / (n + height)));
        if (next - latitude).abs() < 1e-12 {
            let (sin_lat, cos_lat) = next.sin_cos();
            let n = EARTH_EQUATORIAL_RADIUS / (1.0 - e2 * sin_lat * sin_lat).sqrt();
            let height = if cos_lat.abs() > 1e-10 {
                hx / cos_lat - n
            } else {
                hy / sin_lat - n * (1.0 - e2)
            };
            return Ok((next, phi, height));
        }
        latitude = next;
    }

    Err(AlmagestError::Bailout {
        solver: "geo_to_ell",
        passes: MAX_SOLVER_PASSES,
    })
}

/// Convert VSOP87 coordinates (dynamical ecliptic) to the FK5 system (Meeus 32.3).
///
/// Applied to full-precision VSOP87 output, before nutation and aberration.
///
/// Arguments
/// ---------
/// * `jd`: Julian Day in dynamical time.
/// * `longitude`, `latitude`: VSOP87 heliocentric or geocentric coordinates, radians.
///
/// Returns
/// --------
/// * `(longitude, latitude)` in FK5, longitude reduced.
pub fn vsop_to_fk5(jd: JulianDay, longitude: Radian, latitude: Radian) -> (Radian, Radian) {
    let t = jd_to_jcent(jd);
    let l1 = longitude - (1.397 * t + 0.00031 * t * t) * RADEG;
    let (sin_l1, cos_l1) = l1.sin_cos();

    let delta_l = -0.09033 + 0.03916 * (cos_l1 + sin_l1) * latitude.tan();
    let delta_b = 0.03916 * (cos_l1 - sin_l1);

    (
        reduce(longitude + delta_l * RADSEC),
        latitude + delta_b * RADSEC,
    )
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use crate::{angles::angle_diff, constants::RADH};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rotmt_orthonormal() {
        let r = rotmt(0.4, Axis::Z);
        assert_abs_diff_eq!(r * r.transpose(), Matrix3::identity(), epsilon = 1e-15);
        let v = r * Vector3::x();
        assert_abs_diff_eq!(v, Vector3::new(0.4_f64.cos(), 0.4_f64.sin(), 0.0), epsilon = 1e-15);
    }

    #[test]
    fn test_ecl_to_equ_pollux() {
        // Meeus example 13.a: Pollux
        let eps = 23.4392911 * RADEG;
        let ra = (7.0 + 45.0 / 60.0 + 18.946 / 3600.0) * RADH;
        let dec = (28.0 + 1.0 / 60.0 + 34.26 / 3600.0) * RADEG;

        let (lon, lat) = equ_to_ecl(ra, dec, eps);
        assert_abs_diff_eq!(lon / RADEG, 113.215630, epsilon = 1e-6);
        assert_abs_diff_eq!(lat / RADEG, 6.684170, epsilon = 1e-6);

        let (ra2, dec2) = ecl_to_equ(lon, lat, eps);
        assert_abs_diff_eq!(ra2, ra, epsilon = 1e-12);
        assert_abs_diff_eq!(dec2, dec, epsilon = 1e-12);
    }

    #[test]
    fn test_round_trip_ecliptic() {
        let eps = 23.44 * RADEG;
        for &(l, b) in &[(0.0, 0.0), (1.0, 0.5), (4.0, -1.2), (6.2, 1.5)] {
            let (ra, dec) = ecl_to_equ(l, b, eps);
            let (l2, b2) = equ_to_ecl(ra, dec, eps);
            assert_abs_diff_eq!(angle_diff(l, l2), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(b2, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_equ_to_horiz_venus() {
        // Meeus example 13.b: Venus from the U.S. Naval Observatory
        let latitude = (38.0 + 55.0 / 60.0 + 17.0 / 3600.0) * RADEG;
        let hour_angle = 64.352133 * RADEG;
        let dec = -(6.0 + 43.0 / 60.0 + 11.61 / 3600.0) * RADEG;

        let (azimuth, altitude) = equ_to_horiz(hour_angle, dec, latitude);
        assert_abs_diff_eq!(azimuth / RADEG, 68.0337, epsilon = 1e-4);
        assert_abs_diff_eq!(altitude / RADEG, 15.1249, epsilon = 1e-4);

        let (h2, dec2) = horiz_to_equ(azimuth, altitude, latitude);
        assert_abs_diff_eq!(h2, hour_angle, epsilon = 1e-12);
        assert_abs_diff_eq!(dec2, dec, epsilon = 1e-12);
    }

    #[test]
    fn test_azimuth_origin_is_south() {
        let latitude = 45.0 * RADEG;
        let (azimuth, altitude) = equ_to_horiz(0.0, 10.0 * RADEG, latitude);
        assert_abs_diff_eq!(azimuth, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(altitude / RADEG, 55.0, epsilon = 1e-10);
    }

    #[test]
    fn test_ell_to_geo() {
        let (r, theta, phi) = ell_to_geo(0.0, 1.0, 0.0);
        assert_abs_diff_eq!(r, EARTH_EQUATORIAL_RADIUS, epsilon = 1e-9);
        assert_abs_diff_eq!(theta, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(phi, 1.0);

        let (r, theta, _) = ell_to_geo(std::f64::consts::FRAC_PI_2, 0.0, 0.0);
        assert_abs_diff_eq!(r, EARTH_EQUATORIAL_RADIUS * (1.0 - EARTH_FLATTENING), epsilon = 1e-6);
        assert_abs_diff_eq!(theta, 0.0, epsilon = 1e-12);

        // Palomar: geocentric latitude is smaller than the geodetic one
        let latitude = 33.356111 * RADEG;
        let (_, theta, _) = ell_to_geo(latitude, 0.0, 1.706);
        let geocentric_latitude = std::f64::consts::FRAC_PI_2 - theta;
        assert!(geocentric_latitude < latitude);
        assert_abs_diff_eq!((latitude - geocentric_latitude) / RADEG, 0.17647, epsilon = 1e-4);
    }

    #[test]
    fn test_geo_to_ell_round_trip() {
        for &(lat, lon, h) in &[(0.3, 1.0, 0.0), (-1.2, 4.0, 3.5), (0.0, 0.0, 10.0)] {
            let (r, theta, phi) = ell_to_geo(lat, lon, h);
            let (lat2, lon2, h2) = geo_to_ell(r, theta, phi).unwrap();
            assert_abs_diff_eq!(lat2, lat, epsilon = 1e-11);
            assert_eq!(lon2, lon);
            assert_abs_diff_eq!(h2, h, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_vsop_to_fk5() {
        // Meeus example 25.b, Sun on 1992-10-13 0h TD
        let jd = 2448908.5;
        let l = 199.907372 * RADEG;
        let b = 0.644450 * RADSEC;
        let (l5, b5) = vsop_to_fk5(jd, l, b);
        assert_abs_diff_eq!((l5 - l) / RADSEC, -0.09033, epsilon = 1e-4);
        assert_abs_diff_eq!(b5 / RADSEC, 0.62105, epsilon = 2e-4);
    }

    #[test]
    fn test_position3_cartesian_round_trip() {
        let p = Position3::new(5.5, -0.3, 1.7);
        let q = Position3::from_cartesian(&p.to_cartesian());
        assert_abs_diff_eq!(q.longitude, p.longitude, epsilon = 1e-12);
        assert_abs_diff_eq!(q.latitude, p.latitude, epsilon = 1e-12);
        assert_abs_diff_eq!(q.radius, p.radius, epsilon = 1e-12);
    }
}
