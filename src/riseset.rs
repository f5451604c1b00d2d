//! # Rise, set and transit
//!
//! Times at which a body crosses the standard altitude h0 or the local meridian on a given
//! day, from three daily samples of its apparent position (Meeus, ch. 15).
//!
//! ## Algorithm
//!
//! 1. Greenwich sidereal time Θ0 at 0h UT and ΔT are computed for the day.
//! 2. The hour angle at the crossing follows from
//!    `cos H0 = (sin h0 − sin φ · sin δ) / (cos φ · cos δ)`. A value below −1 means the body
//!    stays above the horizon all day, above +1 that it never rises.
//! 3. A first fraction of day `m` comes from the middle sample and H0, reduced to [0, 1).
//! 4. Newton corrections are applied to `m`, interpolating the position at `n = m + ΔT`,
//!    until the correction drops below δ (at most [`MAX_SOLVER_PASSES`] passes).
//!
//! When `n` leaves (−1, 1) the three samples cannot be interpolated and the outcome is
//! [`RiseSetOutcome::Indeterminate`]: a crossing very close to 0h UT may exist but is not
//! reported. A converged `m` outside [0, 1) is the crossing of the previous or next day
//! ([`RiseSetOutcome::AdjacentDay`]); the search for that day reports it as found.
//!
//! Times are returned in Universal Time. Accuracy below one minute is not meaningful because
//! refraction near the horizon is unpredictable.

use serde::{Deserialize, Serialize};

use crate::{
    almagest_errors::AlmagestError,
    angles::{angle_diff, interpolate3, interpolate_angle3, reduce},
    constants::{
        JulianDay, Kilometer, Radian, DPI, EARTH_EQUATORIAL_RADIUS, MAX_SOLVER_PASSES, RADEG,
        SECONDS_PER_DAY, STANDARD_RST_ALTITUDE,
    },
    observers::Observer,
    ref_system::equ_to_horiz,
    time::{dynamical::delta_t, sidereal_time_greenwich},
};

/// Sidereal rotation per day of mean solar time, radians
const SIDEREAL_RATE: Radian = 360.985647 * RADEG;

/// Result of a rise, set or transit search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RiseSetOutcome {
    /// The crossing instant, Julian Day in UT.
    Found(JulianDay),
    /// The body stays above h0 the whole day.
    Circumpolar,
    /// The body stays below h0 the whole day.
    NeverRises,
    /// The crossing falls outside the interpolation range, near 0h UT.
    Indeterminate,
    /// The search converged on a crossing of the previous or next day, Julian Day in UT.
    AdjacentDay(JulianDay),
}

impl RiseSetOutcome {
    /// The instant, if a crossing was found.
    pub fn jd(&self) -> Option<JulianDay> {
        match self {
            RiseSetOutcome::Found(jd) => Some(*jd),
            _ => None,
        }
    }
}

/// Three consecutive daily samples `(α, δ, h0)` for days D−1, D and D+1, at 0h TD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseSetWindow {
    ra: [Radian; 3],
    dec: [Radian; 3],
    altitude: [Radian; 3],
}

impl RiseSetWindow {
    pub fn new(samples: [(Radian, Radian, Radian); 3]) -> Self {
        RiseSetWindow {
            ra: samples.map(|s| s.0),
            dec: samples.map(|s| s.1),
            altitude: samples.map(|s| s.2),
        }
    }

    /// Drop the oldest sample and append the one for the following day.
    pub fn slide(&mut self, ra: Radian, dec: Radian, altitude: Radian) {
        self.ra = [self.ra[1], self.ra[2], ra];
        self.dec = [self.dec[1], self.dec[2], dec];
        self.altitude = [self.altitude[1], self.altitude[2], altitude];
    }

    pub fn ra(&self) -> &[Radian; 3] {
        &self.ra
    }

    pub fn dec(&self) -> &[Radian; 3] {
        &self.dec
    }

    /// Standard altitude of day D.
    pub fn standard_altitude(&self) -> Radian {
        self.altitude[1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crossing {
    Rise,
    Set,
    Transit,
}

impl Crossing {
    fn solver(self) -> &'static str {
        match self {
            Crossing::Rise => "rise",
            Crossing::Set => "settime",
            Crossing::Transit => "transit",
        }
    }
}

fn solve(
    jd: JulianDay,
    window: &RiseSetWindow,
    observer: &Observer,
    delta: f64,
    crossing: Crossing,
) -> Result<RiseSetOutcome, AlmagestError> {
    let theta0 = sidereal_time_greenwich(jd);
    let dt = delta_t(jd) / SECONDS_PER_DAY;
    let latitude = observer.latitude;
    let longitude = observer.longitude;
    let h0 = window.standard_altitude();

    let m0 = (window.ra[1] - longitude - theta0) / DPI;
    let mut m = match crossing {
        Crossing::Transit => m0,
        Crossing::Rise | Crossing::Set => {
            let dec = window.dec[1];
            let cos_h0 = (h0.sin() - latitude.sin() * dec.sin()) / (latitude.cos() * dec.cos());
            if cos_h0 < -1.0 {
                return Ok(RiseSetOutcome::Circumpolar);
            }
            if cos_h0 > 1.0 {
                return Ok(RiseSetOutcome::NeverRises);
            }
            let hour_angle = cos_h0.acos() / DPI;
            if crossing == Crossing::Rise {
                m0 - hour_angle
            } else {
                m0 + hour_angle
            }
        }
    }
    .rem_euclid(1.0);

    for _ in 0..MAX_SOLVER_PASSES {
        let theta = reduce(theta0 + SIDEREAL_RATE * m);
        let n = m + dt;
        if !(n > -1.0 && n < 1.0) {
            return Ok(RiseSetOutcome::Indeterminate);
        }

        let ra = interpolate_angle3(n, &window.ra)?;
        let hour_angle = angle_diff(0.0, theta + longitude - ra);

        let correction = match crossing {
            Crossing::Transit => -hour_angle / DPI,
            Crossing::Rise | Crossing::Set => {
                let dec = interpolate3(n, &window.dec)?;
                let (_, altitude) = equ_to_horiz(hour_angle, dec, latitude);
                (altitude - h0) / (DPI * dec.cos() * latitude.cos() * hour_angle.sin())
            }
        };

        m += correction;
        if correction.abs() < delta {
            return Ok(if (0.0..1.0).contains(&m) {
                RiseSetOutcome::Found(jd + m)
            } else {
                RiseSetOutcome::AdjacentDay(jd + m)
            });
        }
    }

    Err(AlmagestError::Bailout {
        solver: crossing.solver(),
        passes: MAX_SOLVER_PASSES,
    })
}

/// Time of rising on the day starting at `jd`.
///
/// Arguments
/// ---------
/// * `jd`: Julian Day at 0h UT.
/// * `window`: apparent positions and standard altitudes on days D−1, D, D+1.
/// * `observer`: the site.
/// * `delta`: convergence threshold, days.
///
/// Returns
/// --------
/// * [`RiseSetOutcome::Found`] with the instant in UT, or the reason there is none.
///
/// Errors
/// ------
/// * [`AlmagestError::Bailout`] if the Newton corrections do not settle.
pub fn rise(
    jd: JulianDay,
    window: &RiseSetWindow,
    observer: &Observer,
    delta: f64,
) -> Result<RiseSetOutcome, AlmagestError> {
    solve(jd, window, observer, delta, Crossing::Rise)
}

/// Time of setting on the day starting at `jd`. See [`rise`].
pub fn settime(
    jd: JulianDay,
    window: &RiseSetWindow,
    observer: &Observer,
    delta: f64,
) -> Result<RiseSetOutcome, AlmagestError> {
    solve(jd, window, observer, delta, Crossing::Set)
}

/// Time of upper transit on the day starting at `jd`.
///
/// Never circumpolar or never-rising: only [`RiseSetOutcome::Found`] and
/// [`RiseSetOutcome::Indeterminate`] are returned.
pub fn transit(
    jd: JulianDay,
    window: &RiseSetWindow,
    observer: &Observer,
    delta: f64,
) -> Result<RiseSetOutcome, AlmagestError> {
    solve(jd, window, observer, delta, Crossing::Transit)
}

/// Standard altitude of the Moon at distance `r` (km): 0.7275·π − 0°34′, π being the
/// horizontal parallax.
pub fn moon_rst_altitude(r: Kilometer) -> Radian {
    0.7275 * (EARTH_EQUATORIAL_RADIUS / r).asin() + STANDARD_RST_ALTITUDE
}
