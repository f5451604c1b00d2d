//! # Polynomial and periodic series evaluation
//!
//! Every model in the crate (nutation, ELP2000 lunar theory, VSOP87 planetary theory) is a
//! table of periodic terms summed at a given instant. This module holds the shared
//! evaluators:
//!
//! - [`polynomial`]: Σ cᵢ·xⁱ with Horner's scheme,
//! - [`multiplier_series`]: Σ A·trig(Σ kⱼ·argⱼ) over integer multipliers of fundamental
//!   arguments, with the optional eccentricity correction of terms depending on the solar
//!   mean anomaly,
//! - [`PeriodicTerm`] and [`power_series`]: Σₖ τᵏ·Σ A·cos(B + C·τ), the VSOP87 form.
//!
//! Summation follows table order.

/// Evaluate Σ cᵢ·xⁱ, coefficients in increasing powers of `x`.
pub fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Trigonometric function applied to the argument of each term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trig {
    Sin,
    Cos,
}

impl Trig {
    fn apply(self, x: f64) -> f64 {
        match self {
            Trig::Sin => x.sin(),
            Trig::Cos => x.cos(),
        }
    }
}

/// Eccentricity correction for terms depending on the solar mean anomaly M.
///
/// The amplitude of a term whose multiplier on M is ±1 (resp. ±2) is scaled by E (resp. E²),
/// with E = 1 − 0.002516·T − 0.0000074·T² compensating the decrease of the Earth's orbital
/// eccentricity (Meeus 47.6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EccentricityScaling {
    pub e: f64,
    /// Position of M in the argument tuple
    pub anomaly_index: usize,
}

impl EccentricityScaling {
    pub fn factor(&self, multiplier: i8) -> f64 {
        match multiplier.unsigned_abs() {
            1 => self.e,
            2 => self.e * self.e,
            _ => 1.0,
        }
    }
}

/// Linear combination Σ kⱼ·argⱼ of fundamental arguments.
pub fn argument<const N: usize>(multipliers: &[i8; N], args: &[f64; N]) -> f64 {
    multipliers
        .iter()
        .zip(args)
        .map(|(&k, a)| k as f64 * a)
        .sum()
}

/// Evaluate Σ A·trig(Σ kⱼ·argⱼ) over `(multipliers, amplitude)` rows.
///
/// Arguments
/// ---------
/// * `terms`: rows of integer multipliers and amplitude.
/// * `args`: values of the fundamental arguments, radians.
/// * `trig`: sine or cosine.
/// * `scaling`: optional eccentricity correction.
///
/// Returns
/// --------
/// * The sum, in the unit of the amplitudes.
pub fn multiplier_series<const N: usize, I>(
    terms: I,
    args: &[f64; N],
    trig: Trig,
    scaling: Option<EccentricityScaling>,
) -> f64
where
    I: IntoIterator<Item = ([i8; N], f64)>,
{
    terms
        .into_iter()
        .map(|(multipliers, amplitude)| {
            let scale = scaling.map_or(1.0, |s| s.factor(multipliers[s.anomaly_index]));
            amplitude * scale * trig.apply(argument(&multipliers, args))
        })
        .sum()
}

/// One VSOP87 term: `amplitude · cos(phase + frequency · τ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicTerm {
    pub amplitude: f64,
    pub phase: f64,
    pub frequency: f64,
}

impl PeriodicTerm {
    pub fn new(amplitude: f64, phase: f64, frequency: f64) -> Self {
        PeriodicTerm {
            amplitude,
            phase,
            frequency,
        }
    }

    pub fn evaluate(&self, tau: f64) -> f64 {
        self.amplitude * (self.phase + self.frequency * tau).cos()
    }
}

/// Σ A·cos(B + C·τ) over one block of terms.
pub fn periodic_sum(terms: &[PeriodicTerm], tau: f64) -> f64 {
    terms.iter().map(|term| term.evaluate(tau)).sum()
}

/// Σₖ τᵏ · periodic_sum(blockₖ, τ), blocks in increasing powers of τ.
pub fn power_series<B: AsRef<[PeriodicTerm]>>(blocks: &[B], tau: f64) -> f64 {
    blocks
        .iter()
        .rev()
        .fold(0.0, |acc, block| acc * tau + periodic_sum(block.as_ref(), tau))
}

#[cfg(test)]
mod series_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_polynomial() {
        assert_eq!(polynomial(&[], 3.0), 0.0);
        assert_eq!(polynomial(&[2.0], 3.0), 2.0);
        // 1 + 2x + 3x² at x = 2
        assert_eq!(polynomial(&[1.0, 2.0, 3.0], 2.0), 17.0);
    }

    #[test]
    fn test_multiplier_series_with_scaling() {
        let args = [0.3, 1.1];
        let terms = [([1, 0], 2.0), ([0, 1], 3.0), ([1, 2], 0.5)];
        let scaling = EccentricityScaling {
            e: 0.9,
            anomaly_index: 1,
        };
        let expected = 2.0 * 0.3_f64.sin() + 3.0 * 0.9 * 1.1_f64.sin() + 0.5 * 0.81 * 2.5_f64.sin();
        let sum = multiplier_series(terms, &args, Trig::Sin, Some(scaling));
        assert_abs_diff_eq!(sum, expected, epsilon = 1e-14);

        let plain = multiplier_series(terms, &args, Trig::Cos, None);
        let expected = 2.0 * 0.3_f64.cos() + 3.0 * 1.1_f64.cos() + 0.5 * 2.5_f64.cos();
        assert_abs_diff_eq!(plain, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_power_series() {
        let blocks = vec![
            vec![PeriodicTerm::new(1.0, 0.0, 0.0), PeriodicTerm::new(0.5, 1.0, 2.0)],
            vec![PeriodicTerm::new(2.0, 0.0, 0.0)],
        ];
        let tau: f64 = 0.1;
        let expected = 1.0 + 0.5 * (1.0 + 2.0 * tau).cos() + tau * 2.0;
        assert_abs_diff_eq!(power_series(&blocks, tau), expected, epsilon = 1e-15);
    }
}
