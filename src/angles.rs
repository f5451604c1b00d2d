//! Circular-angle arithmetic and three-point interpolation (Meeus, ch. 3).

use crate::{
    almagest_errors::AlmagestError,
    constants::{Degree, Radian, DPI},
};

/// Reduce an angle to [0, 2π).
pub fn reduce(x: Radian) -> Radian {
    let r = x.rem_euclid(DPI);
    // rem_euclid may round up to exactly 2π for tiny negative inputs
    if r >= DPI {
        0.0
    } else {
        r
    }
}

/// Signed shortest rotation from `a` to `b`, in (−π, π].
///
/// `angle_diff(359°, 1°)` is +2°, not −358°.
pub fn angle_diff(a: Radian, b: Radian) -> Radian {
    let r = (b - a).rem_euclid(DPI);
    if r > std::f64::consts::PI {
        r - DPI
    } else {
        r
    }
}

fn check_factor(n: f64) -> Result<(), AlmagestError> {
    if n > -1.0 && n < 1.0 {
        Ok(())
    } else {
        Err(AlmagestError::OutOfRange(n))
    }
}

/// Interpolate from three equally spaced tabular values (Meeus 3.3).
///
/// Arguments
/// ---------
/// * `n`: interpolating factor, strictly between −1 and 1 (0 is the middle sample).
/// * `y`: the three samples.
///
/// Returns
/// --------
/// * The interpolated value, or [`AlmagestError::OutOfRange`] when `n` is outside (−1, 1).
pub fn interpolate3(n: f64, y: &[f64; 3]) -> Result<f64, AlmagestError> {
    check_factor(n)?;
    let a = y[1] - y[0];
    let b = y[2] - y[1];
    let c = b - a;
    Ok(y[1] + n / 2.0 * (a + b + n * c))
}

/// Interpolate from three equally spaced angles, accounting for the wrap at 2π.
///
/// The result is reduced to [0, 2π).
pub fn interpolate_angle3(n: f64, y: &[Radian; 3]) -> Result<Radian, AlmagestError> {
    check_factor(n)?;
    let a = angle_diff(y[0], y[1]);
    let b = angle_diff(y[1], y[2]);
    let c = angle_diff(a, b);
    Ok(reduce(y[1] + n / 2.0 * (a + b + n * c)))
}

/// Split decimal degrees into `(degrees, minutes, seconds)`; every component carries the sign.
pub fn d_to_dms(x: Degree) -> (i32, i32, f64) {
    let degrees = x.trunc();
    let minutes = ((x - degrees) * 60.0).trunc();
    let seconds = ((x - degrees) * 60.0 - minutes) * 60.0;
    (degrees as i32, minutes as i32, seconds)
}

/// Decimal degrees from components. The angle is negative if any component is.
pub fn dms_to_d(degrees: f64, minutes: f64, seconds: f64) -> Degree {
    let magnitude = degrees.abs() + minutes.abs() / 60.0 + seconds.abs() / 3600.0;
    if degrees < 0.0 || minutes < 0.0 || seconds < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod angles_test {
    use super::*;
    use crate::constants::RADEG;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reduce() {
        for &x in &[-1e-18, -DPI, -7.5, 0.0, 1.0, DPI, 1e6, -1e6, 3.0 * DPI + 0.25] {
            let r = reduce(x);
            assert!((0.0..DPI).contains(&r), "reduce({x}) = {r}");
            assert_eq!(reduce(r), r);
        }
        assert_abs_diff_eq!(reduce(-90.0 * RADEG), 270.0 * RADEG, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_diff() {
        assert_abs_diff_eq!(angle_diff(359.0 * RADEG, 1.0 * RADEG), 2.0 * RADEG, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_diff(1.0 * RADEG, 359.0 * RADEG), -2.0 * RADEG, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_diff(10.0 * RADEG, 40.0 * RADEG), 30.0 * RADEG, epsilon = 1e-12);
        let half = angle_diff(0.0, std::f64::consts::PI);
        assert_abs_diff_eq!(half, std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate3() {
        // Meeus example 3.a: distance of Mars, n = 4.35/24
        let y = [0.884226, 0.877366, 0.870531];
        let r = interpolate3(0.18125, &y).unwrap();
        assert_abs_diff_eq!(r, 0.876125, epsilon = 1e-6);
    }

    #[test]
    fn test_interpolate3_out_of_range() {
        let y = [1.0, 2.0, 3.0];
        assert_eq!(interpolate3(1.0, &y), Err(AlmagestError::OutOfRange(1.0)));
        assert_eq!(interpolate3(-1.5, &y), Err(AlmagestError::OutOfRange(-1.5)));
        assert!(interpolate_angle3(f64::NAN, &y).is_err());
        assert_abs_diff_eq!(interpolate3(0.999, &y).unwrap(), 2.999, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate_angle3_wraps() {
        let y = [358.0 * RADEG, 359.5 * RADEG, 1.0 * RADEG];
        let r = interpolate_angle3(0.5, &y).unwrap();
        assert_abs_diff_eq!(r, 0.25 * RADEG, epsilon = 1e-12);
        let r = interpolate_angle3(-0.5, &y).unwrap();
        assert_abs_diff_eq!(r, 358.75 * RADEG, epsilon = 1e-12);
    }

    #[test]
    fn test_dms() {
        assert_abs_diff_eq!(dms_to_d(23.0, 26.0, 27.407), 23.440946389, epsilon = 1e-9);
        assert_abs_diff_eq!(dms_to_d(-18.0, 53.0, 16.84), -18.888011111, epsilon = 1e-9);
        assert_abs_diff_eq!(dms_to_d(0.0, -30.0, 0.0), -0.5, epsilon = 1e-12);

        let (d, m, s) = d_to_dms(23.440946389);
        assert_eq!((d, m), (23, 26));
        assert_abs_diff_eq!(s, 27.407, epsilon = 1e-5);

        let (d, m, s) = d_to_dms(-18.888011111);
        assert_eq!((d, m), (-18, -53));
        assert_abs_diff_eq!(s, -16.84, epsilon = 1e-5);
    }
}
