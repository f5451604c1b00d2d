//! # VSOP87D planetary theory
//!
//! Heliocentric ecliptic coordinates of the eight major planets, referred to the mean
//! ecliptic and equinox of date. Each coordinate is a power series in τ (Julian millennia
//! from J2000.0, dynamical time) whose coefficients are blocks of periodic terms:
//!
//! ```text
//! X(τ) = Σₖ τᵏ · Σᵢ Aᵢ · cos(Bᵢ + Cᵢ·τ)
//! ```
//!
//! ## Overview
//!
//! * [`Vsop87d::abridged`] builds the truncated tables shipped with the crate
//!   (Meeus, Appendix III), accurate to about one arcsecond for the inner planets.
//! * [`Vsop87d::from_series`] and [`Vsop87d::with_planet`] accept complete tables loaded
//!   by the caller, already parsed into [`PlanetSeries`].
//! * [`Vsop87d::dimension`], [`Vsop87d::dimension3`] and [`Vsop87d::dimension_batch`]
//!   evaluate one coordinate, the full position, or one coordinate over many instants.
//!
//! Longitudes are reduced to [0, 2π). Latitudes and radius vectors are returned as summed.
//!
//! The tables are read-only once built and the model can be shared by reference across
//! threads.
//!
//! ## See also
//! * [`geocentric::geocentric_planet`] – apparent geocentric position with light-time
//! * [`crate::ref_system::vsop_to_fk5`] – frame correction of the output

pub mod geocentric;
mod tables;

use serde::{Deserialize, Serialize};

use crate::{
    almagest_errors::AlmagestError,
    angles::reduce,
    batch,
    constants::{JulianDay, DAYS_PER_JULIAN_MILLENNIUM, J2000},
    ref_system::Position3,
    series::{power_series, PeriodicTerm},
};

use tables::Row;

/// The eight major planets, Earth included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Planet {
    pub const ALL: [Planet; 8] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Earth => "Earth",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
        }
    }
}

/// One of the three heliocentric coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// L, radians
    Longitude,
    /// B, radians
    Latitude,
    /// R, AU
    Radius,
}

/// Periodic-term blocks of one planet, one `Vec` per power of τ.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetSeries {
    longitude: Vec<Vec<PeriodicTerm>>,
    latitude: Vec<Vec<PeriodicTerm>>,
    radius: Vec<Vec<PeriodicTerm>>,
}

impl PlanetSeries {
    /// Build a series set from already parsed blocks.
    ///
    /// Amplitudes are taken in radians (L, B) and AU (R).
    ///
    /// Errors
    /// ------
    /// * [`AlmagestError::InvalidSeries`] if a coordinate has no power block.
    pub fn new(
        longitude: Vec<Vec<PeriodicTerm>>,
        latitude: Vec<Vec<PeriodicTerm>>,
        radius: Vec<Vec<PeriodicTerm>>,
    ) -> Result<Self, AlmagestError> {
        for (name, blocks) in [("L", &longitude), ("B", &latitude), ("R", &radius)] {
            if blocks.is_empty() {
                return Err(AlmagestError::InvalidSeries(format!(
                    "no power block for coordinate {name}"
                )));
            }
        }

        Ok(PlanetSeries {
            longitude,
            latitude,
            radius,
        })
    }

    fn from_rows(l: &[&[Row]], b: &[&[Row]], r: &[&[Row]], scale: f64) -> Self {
        let convert = |blocks: &[&[Row]]| -> Vec<Vec<PeriodicTerm>> {
            blocks
                .iter()
                .map(|block| {
                    block
                        .iter()
                        .map(|&[amplitude, phase, frequency]| {
                            PeriodicTerm::new(amplitude * scale, phase, frequency)
                        })
                        .collect()
                })
                .collect()
        };

        PlanetSeries {
            longitude: convert(l),
            latitude: convert(b),
            radius: convert(r),
        }
    }

    fn blocks(&self, dimension: Dimension) -> &[Vec<PeriodicTerm>] {
        match dimension {
            Dimension::Longitude => &self.longitude,
            Dimension::Latitude => &self.latitude,
            Dimension::Radius => &self.radius,
        }
    }
}

/// VSOP87D model for the eight planets.
#[derive(Debug, Clone, PartialEq)]
pub struct Vsop87d {
    series: [PlanetSeries; 8],
}

impl Default for Vsop87d {
    fn default() -> Self {
        Vsop87d::abridged()
    }
}

impl Vsop87d {
    /// The abridged tables bundled with the crate.
    pub fn abridged() -> Self {
        const SCALE: f64 = 1e-8;
        let build = |l: &[&[Row]], b: &[&[Row]], r: &[&[Row]]| {
            PlanetSeries::from_rows(l, b, r, SCALE)
        };

        Vsop87d {
            series: [
                build(tables::mercury::L, tables::mercury::B, tables::mercury::R),
                build(tables::venus::L, tables::venus::B, tables::venus::R),
                build(tables::earth::L, tables::earth::B, tables::earth::R),
                build(tables::mars::L, tables::mars::B, tables::mars::R),
                build(tables::jupiter::L, tables::jupiter::B, tables::jupiter::R),
                build(tables::saturn::L, tables::saturn::B, tables::saturn::R),
                build(tables::uranus::L, tables::uranus::B, tables::uranus::R),
                build(tables::neptune::L, tables::neptune::B, tables::neptune::R),
            ],
        }
    }

    /// Model from complete tables, ordered as [`Planet::ALL`].
    pub fn from_series(series: [PlanetSeries; 8]) -> Self {
        Vsop87d { series }
    }

    /// Replace the tables of one planet.
    pub fn with_planet(mut self, planet: Planet, series: PlanetSeries) -> Self {
        self.series[planet.index()] = series;
        self
    }

    /// One heliocentric coordinate of `planet`.
    ///
    /// Arguments
    /// ---------
    /// * `jd`: Julian Day in dynamical time.
    /// * `planet`: the planet.
    /// * `dimension`: L, B or R.
    ///
    /// Returns
    /// --------
    /// * L and B in radians (L reduced to [0, 2π)), R in AU.
    pub fn dimension(&self, jd: JulianDay, planet: Planet, dimension: Dimension) -> f64 {
        let tau = (jd - J2000) / DAYS_PER_JULIAN_MILLENNIUM;
        let x = power_series(self.series[planet.index()].blocks(dimension), tau);
        match dimension {
            Dimension::Longitude => reduce(x),
            Dimension::Latitude | Dimension::Radius => x,
        }
    }

    /// Heliocentric longitude, latitude and radius vector of `planet`.
    pub fn dimension3(&self, jd: JulianDay, planet: Planet) -> Position3 {
        Position3::new(
            self.dimension(jd, planet, Dimension::Longitude),
            self.dimension(jd, planet, Dimension::Latitude),
            self.dimension(jd, planet, Dimension::Radius),
        )
    }

    /// [`Vsop87d::dimension`] over a slice of instants, results in input order.
    pub fn dimension_batch(
        &self,
        jds: &[JulianDay],
        planet: Planet,
        dimension: Dimension,
    ) -> Vec<f64> {
        batch::evaluate(jds, |&jd| self.dimension(jd, planet, dimension))
    }
}
