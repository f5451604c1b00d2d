//! Built-in abridged VSOP87D coefficient tables, one module per planet.

pub(crate) mod earth;
pub(crate) mod jupiter;
pub(crate) mod mars;
pub(crate) mod mercury;
pub(crate) mod neptune;
pub(crate) mod saturn;
pub(crate) mod uranus;
pub(crate) mod venus;

/// One periodic term `[A, B, C]`, `A` in 1e-8 units.
pub(crate) type Row = [f64; 3];
