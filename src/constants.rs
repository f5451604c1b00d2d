//! # Constants and type definitions for Almagest
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `almagest` library, together with the closed set of
//! bodies the ephemeris and the event scheduler know about.
//!
//! ## Overview
//!
//! - Time constants (J2000, Julian century, day fractions)
//! - Unit conversions (degrees ↔ radians, arcseconds, hours)
//! - Geophysical constants (Earth radius and flattening, light time per AU)
//! - Standard rise/set altitudes
//! - Core type aliases used across the crate
//! - The [`Body`] identifier
//!
//! These definitions are used by all main modules, including the series models, the
//! coordinate transforms and the iterative solvers.

use serde::{Deserialize, Serialize};

use crate::planets::Planet;

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of minutes in a day
pub const MINUTES_PER_DAY: f64 = 1_440.0;

/// One second expressed as a fraction of a day
pub const DAYS_PER_SECOND: f64 = 1.0 / SECONDS_PER_DAY;

/// One minute expressed as a fraction of a day
pub const DAYS_PER_MINUTE: f64 = 1.0 / MINUTES_PER_DAY;

/// Julian Day of J2000.0 (2000-01-01 12:00:00 TT)
pub const J2000: f64 = 2_451_545.0;

/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Days in a Julian millennium, the time unit of VSOP87
pub const DAYS_PER_JULIAN_MILLENNIUM: f64 = 365_250.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Hours → radians
pub const RADH: f64 = DPI / 24.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Light travel time for one AU, in days
pub const LIGHT_TIME_PER_AU: f64 = 0.0057755183;

/// Earth equatorial radius in kilometers
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6_378.137;

/// Flattening of the reference ellipsoid
pub const EARTH_FLATTENING: f64 = 1.0 / 298.2564219846;

/// Hard cap on the passes of every iterative solver
pub const MAX_SOLVER_PASSES: usize = 20;

// -------------------------------------------------------------------------------------------------
// Standard altitudes
// -------------------------------------------------------------------------------------------------

/// Standard altitude of stars and planets at rising and setting (−0°34′)
pub const STANDARD_RST_ALTITUDE: Radian = -0.5667 * RADEG;

/// Standard altitude of the Sun at rising and setting (−0°50′)
pub const SUN_RST_ALTITUDE: Radian = -0.8333 * RADEG;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Duration or clock offset in hours
pub type Hour = f64;
/// Julian Day, continuous day count since −4712-01-01 12:00
pub type JulianDay = f64;

// -------------------------------------------------------------------------------------------------
// Identifiers
// -------------------------------------------------------------------------------------------------

/// Body tracked by the ephemeris: the Sun, the Moon and the planets seen from the Earth.
///
/// This is a closed set. Bodies outside the solar system are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    /// Every body, in the order the scheduler visits them.
    pub const ALL: [Body; 9] = [
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Moon,
        Body::Sun,
    ];

    /// The VSOP87 planet behind this body, if it is one.
    pub fn planet(self) -> Option<Planet> {
        match self {
            Body::Sun | Body::Moon => None,
            Body::Mercury => Some(Planet::Mercury),
            Body::Venus => Some(Planet::Venus),
            Body::Mars => Some(Planet::Mars),
            Body::Jupiter => Some(Planet::Jupiter),
            Body::Saturn => Some(Planet::Saturn),
            Body::Uranus => Some(Planet::Uranus),
            Body::Neptune => Some(Planet::Neptune),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod constants_test {
    use super::*;

    #[test]
    fn test_standard_altitudes() {
        assert!((STANDARD_RST_ALTITUDE / RADEG + 0.5667).abs() < 1e-12);
        assert!((SUN_RST_ALTITUDE / RADEG + 0.8333).abs() < 1e-12);
    }

    #[test]
    fn test_body_planet_mapping() {
        assert_eq!(Body::Sun.planet(), None);
        assert_eq!(Body::Moon.planet(), None);
        assert_eq!(Body::Saturn.planet(), Some(Planet::Saturn));
        assert_eq!(Body::ALL.iter().filter_map(|b| b.planet()).count(), 7);
        assert!(Body::ALL.iter().all(|b| b.planet() != Some(Planet::Earth)));
    }

    #[test]
    fn test_body_display() {
        assert_eq!(Body::Neptune.to_string(), "Neptune");
        assert_eq!(format!("{}", Body::Moon), "Moon");
    }
}
