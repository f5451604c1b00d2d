//! # Almagest: ephemeris context
//!
//! The [`Almagest`] struct is the **entry point** of the crate. It owns the read-only model
//! tables and the run configuration, and hands out references to them:
//!
//! 1. **Planetary theory** – [`Vsop87d`], built once (abridged tables by default, or complete
//!    tables injected with [`Almagest::with_vsop`]).
//! 2. **Lunar theory** – [`Elp2000`].
//! 3. **Configuration** – [`AlmagestEnv`]: observer, time zone, tracked bodies.
//!
//! ## Usage
//!
//! ```rust
//! use almagest::almagest::Almagest;
//! use almagest::constants::Body;
//! use almagest::earth_orientation::Nutation;
//! use almagest::env_state::AlmagestEnv;
//!
//! let almagest = Almagest::new(AlmagestEnv::default());
//! let jd = 2448976.5;
//! let nutation = Nutation::at(jd);
//! let (ra, dec, h0) = almagest.apparent_equatorial(Body::Venus, jd, &nutation)?;
//! assert!(h0 < 0.0);
//! # let _ = (ra, dec);
//! # Ok::<(), almagest::almagest_errors::AlmagestError>(())
//! ```
//!
//! ## See also
//! * [`Scheduler`] – time-ordered almanac events
//! * [`crate::planets::geocentric::geocentric_planet`] – light-time solver behind planets

use log::debug;

use crate::{
    almagest_errors::AlmagestError,
    constants::{Body, JulianDay, Radian, STANDARD_RST_ALTITUDE, SUN_RST_ALTITUDE},
    earth_orientation::Nutation,
    env_state::AlmagestEnv,
    lunar::Elp2000,
    observers::Observer,
    planets::{geocentric::geocentric_planet, Vsop87d},
    ref_system::{ecl_to_equ, vsop_to_fk5},
    riseset::moon_rst_altitude,
    scheduler::Scheduler,
    sun::{aberration_low, Sun},
    time::zone::TimeZone,
};

/// Convergence of the planetary light-time iteration: one arcsecond, as a fraction of a turn
const POSITION_DELTA: f64 = 1.0 / 1_296_000.0;

#[derive(Debug, Clone)]
pub struct Almagest {
    env: AlmagestEnv,
    vsop: Vsop87d,
    moon: Elp2000,
}

impl Almagest {
    /// Construct a new [`Almagest`] context with the bundled abridged tables.
    pub fn new(env: AlmagestEnv) -> Self {
        Almagest::with_vsop(env, Vsop87d::abridged())
    }

    /// Construct a context with an externally loaded planetary model.
    pub fn with_vsop(env: AlmagestEnv, vsop: Vsop87d) -> Self {
        debug!(
            "almagest context for {} with {} tracked bodies",
            env.observer.name.as_deref().unwrap_or("unnamed observer"),
            env.bodies.len()
        );

        Almagest {
            env,
            vsop,
            moon: Elp2000::new(),
        }
    }

    pub fn env(&self) -> &AlmagestEnv {
        &self.env
    }

    pub fn observer(&self) -> &Observer {
        &self.env.observer
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.env.time_zone
    }

    pub fn vsop(&self) -> &Vsop87d {
        &self.vsop
    }

    pub fn moon(&self) -> &Elp2000 {
        &self.moon
    }

    pub fn sun(&self) -> Sun<'_> {
        Sun::new(&self.vsop)
    }

    /// Apparent geocentric right ascension and declination of a body, with its standard
    /// altitude for rise and set.
    ///
    /// Arguments
    /// -----------------
    /// * `body`: the body.
    /// * `jd`: Julian Day in dynamical time.
    /// * `nutation`: nutation and obliquity at `jd`.
    ///
    /// Return
    /// ----------
    /// * `(ra, dec, h0)` in radians. h0 is −0°50′ for the Sun, −0°34′ for the planets and
    ///   depends on the distance for the Moon.
    ///
    /// Errors
    /// ----------
    /// * [`AlmagestError::Bailout`] if the light-time iteration of a planet fails.
    ///
    /// See also
    /// ------------
    /// * [`Sun::apparent_longitude`] – same correction chain for the Sun.
    /// * [`Elp2000::dimension3_raw`] – the Moon, nutation added once here.
    pub fn apparent_equatorial(
        &self,
        body: Body,
        jd: JulianDay,
        nutation: &Nutation,
    ) -> Result<(Radian, Radian, Radian), AlmagestError> {
        let epsilon = nutation.true_obliquity();

        match body {
            Body::Sun => {
                let p = self.sun().dimension3(jd);
                let (l, b) = vsop_to_fk5(jd, p.longitude, p.latitude);
                let (ra, dec) =
                    ecl_to_equ(l + nutation.delta_psi + aberration_low(p.radius), b, epsilon);
                Ok((ra, dec, SUN_RST_ALTITUDE))
            }
            Body::Moon => {
                let p = self.moon.dimension3_raw(jd);
                let (ra, dec) = ecl_to_equ(p.longitude + nutation.delta_psi, p.latitude, epsilon);
                Ok((ra, dec, moon_rst_altitude(p.radius)))
            }
            Body::Mercury
            | Body::Venus
            | Body::Mars
            | Body::Jupiter
            | Body::Saturn
            | Body::Uranus
            | Body::Neptune => {
                let planet = body.planet().ok_or(AlmagestError::UnsupportedBody(body.name()))?;
                let (ra, dec) = geocentric_planet(
                    &self.vsop,
                    jd,
                    planet,
                    nutation.delta_psi,
                    epsilon,
                    POSITION_DELTA,
                )?;
                Ok((ra, dec, STANDARD_RST_ALTITUDE))
            }
        }
    }

    /// Event scheduler starting on January 1st, 0h UT, of `start_year`.
    pub fn scheduler(&self, start_year: i32) -> Scheduler<'_> {
        Scheduler::new(self, start_year)
    }
}

#[cfg(test)]
mod almagest_test {
    use super::*;
    use crate::constants::{RADEG, RADH};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_apparent_sun() {
        // Meeus example 25.b: α = 13h13m30.749s, δ = −7°47'01.74"
        let almagest = Almagest::new(AlmagestEnv::default());
        let jd = 2448908.5;
        let (ra, dec, h0) = almagest
            .apparent_equatorial(Body::Sun, jd, &Nutation::at(jd))
            .unwrap();
        assert_abs_diff_eq!(ra / RADH, 13.225208, epsilon = 1e-5);
        assert_abs_diff_eq!(dec / RADEG, -7.783817, epsilon = 1e-4);
        assert_eq!(h0, SUN_RST_ALTITUDE);
    }

    #[test]
    fn test_apparent_moon_counts_nutation_once() {
        let almagest = Almagest::new(AlmagestEnv::default());
        let jd = 2448724.5;
        let nutation = Nutation::at(jd);
        let (ra, dec, h0) = almagest
            .apparent_equatorial(Body::Moon, jd, &nutation)
            .unwrap();

        let p = almagest.moon().dimension3(jd);
        let (ra2, dec2) = ecl_to_equ(p.longitude, p.latitude, nutation.true_obliquity());
        assert_abs_diff_eq!(ra, ra2, epsilon = 1e-12);
        assert_abs_diff_eq!(dec, dec2, epsilon = 1e-12);

        // Meeus example 47.a: α = 134.688470°, δ = 13.768368°
        assert_abs_diff_eq!(ra / RADEG, 134.688470, epsilon = 1e-4);
        assert_abs_diff_eq!(dec / RADEG, 13.768368, epsilon = 1e-4);
        assert_abs_diff_eq!(h0, moon_rst_altitude(p.radius), epsilon = 1e-15);
    }

    #[test]
    fn test_apparent_planet_matches_solver() {
        let almagest = Almagest::new(AlmagestEnv::default());
        let jd = 2448976.5;
        let nutation = Nutation::at(jd);
        let (ra, dec, h0) = almagest
            .apparent_equatorial(Body::Venus, jd, &nutation)
            .unwrap();
        let (ra2, dec2) = geocentric_planet(
            almagest.vsop(),
            jd,
            crate::planets::Planet::Venus,
            nutation.delta_psi,
            nutation.true_obliquity(),
            POSITION_DELTA,
        )
        .unwrap();
        assert_eq!((ra, dec), (ra2, dec2));
        assert_eq!(h0, STANDARD_RST_ALTITUDE);
    }
}
