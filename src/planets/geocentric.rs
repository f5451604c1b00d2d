//! Apparent geocentric position of a planet, corrected for light-time.
//!
//! The heliocentric positions of the Earth and the planet are differenced and the trial
//! instant is moved back by the light-travel time until the geocentric longitude settles.
//! Evaluating both bodies at the retarded instant folds the planetary aberration and the
//! annual aberration into the same correction (Meeus, ch. 33).

use nalgebra::Vector3;

use super::{Planet, Vsop87d};
use crate::{
    almagest_errors::AlmagestError,
    angles::angle_diff,
    constants::{JulianDay, Radian, DPI, LIGHT_TIME_PER_AU, MAX_SOLVER_PASSES},
    ref_system::{ecl_to_equ, vsop_to_fk5, Position3},
};

/// Geocentric ecliptic position of `planet` at the retarded instant.
///
/// The radius of the returned position is the Earth–planet distance in AU.
fn light_time_position(
    vsop: &Vsop87d,
    jd: JulianDay,
    planet: Planet,
    delta: f64,
) -> Result<Position3, AlmagestError> {
    let mut t = jd;
    let mut previous: Option<Radian> = None;

    for _ in 0..MAX_SOLVER_PASSES {
        let earth: Vector3<f64> = vsop.dimension3(t, Planet::Earth).to_cartesian();
        let body: Vector3<f64> = vsop.dimension3(t, planet).to_cartesian();
        let geocentric = Position3::from_cartesian(&(body - earth));

        if let Some(l0) = previous {
            if angle_diff(geocentric.longitude, l0).abs() < DPI * delta {
                return Ok(geocentric);
            }
        }

        previous = Some(geocentric.longitude);
        t = jd - LIGHT_TIME_PER_AU * geocentric.radius;
    }

    Err(AlmagestError::Bailout {
        solver: "geocentric_planet",
        passes: MAX_SOLVER_PASSES,
    })
}

/// Apparent right ascension and declination of a planet.
///
/// The light-time iteration runs until two successive geocentric longitudes differ by less
/// than 2π·δ, at most [`MAX_SOLVER_PASSES`] times. The converged position is then corrected
/// to FK5, shifted by the nutation in longitude and rotated to the equator with the true
/// obliquity.
///
/// Arguments
/// ---------
/// * `vsop`: planetary model.
/// * `jd`: Julian Day in dynamical time.
/// * `planet`: any planet but the Earth.
/// * `delta_psi`: nutation in longitude at `jd`, radians.
/// * `epsilon`: true obliquity at `jd`, radians.
/// * `delta`: convergence threshold as a fraction of a full turn (1/1 296 000 is one
///   arcsecond, 1/86 400 one second of time in right ascension).
///
/// Returns
/// --------
/// * `(right ascension, declination)` in radians.
///
/// Errors
/// ------
/// * [`AlmagestError::UnsupportedBody`] for [`Planet::Earth`].
/// * [`AlmagestError::Bailout`] if the longitude does not settle, which happens for a
///   degenerate `delta` such as 0.
///
/// # See also
/// * [`crate::earth_orientation::Nutation`] – provides `delta_psi` and `epsilon`
pub fn geocentric_planet(
    vsop: &Vsop87d,
    jd: JulianDay,
    planet: Planet,
    delta_psi: Radian,
    epsilon: Radian,
    delta: f64,
) -> Result<(Radian, Radian), AlmagestError> {
    if planet == Planet::Earth {
        return Err(AlmagestError::UnsupportedBody(planet.name()));
    }

    let geocentric = light_time_position(vsop, jd, planet, delta)?;
    let (l, b) = vsop_to_fk5(jd, geocentric.longitude, geocentric.latitude);

    Ok(ecl_to_equ(l + delta_psi, b, epsilon))
}
