mod common;

use approx::assert_abs_diff_eq;

use almagest::constants::{DAYS_PER_SECOND, J2000};
use almagest::equinox::{equinox, equinox_approx, Season};
use almagest::planets::{Dimension, Planet, Vsop87d};
use almagest::sun::Sun;
use common::parse_vsop87d;

const EARTH_HEAD: &str = "\
 VSOP87 VERSION D4    EARTH     VARIABLE 1 (LBR)       *T**0      3 TERMS    HELIOCENTRIC DYNAMICAL ECLIPTIC AND EQUINOX OF THE DATE
 4310    1  0  0  0  0  0  0  0  0  0  0  0  0  0.00000000000  1.75347045673 1.75347045673 0.00000000000        0.00000000000
 4310    2  0  0  1  0  0  0  0  0  0  0  0  0  0.03338548555 -0.00144088229 0.03341656456 4.66925680417     6283.07584999140
 4310    3  0  0  2  0  0  0  0  0  0  0  0  0  0.00034764455 -0.00003007172 0.00034894275 4.62610241759    12566.15169998280
 VSOP87 VERSION D4    EARTH     VARIABLE 1 (LBR)       *T**1      1 TERMS    HELIOCENTRIC DYNAMICAL ECLIPTIC AND EQUINOX OF THE DATE
 4311    1  0  0  0  0  0  0  0  0  0  0  0  0  0.00000000000 6283.31966747491 6283.31966747491 0.00000000000        0.00000000000
 VSOP87 VERSION D4    EARTH     VARIABLE 2 (LBR)       *T**0      1 TERMS    HELIOCENTRIC DYNAMICAL ECLIPTIC AND EQUINOX OF THE DATE
 4320    1  0  0  0  0  0  0  0  0  0  0  0  0  0.00000015960 -0.00000279164 0.00000279620 3.19870156017    84334.66158130829
 VSOP87 VERSION D4    EARTH     VARIABLE 3 (LBR)       *T**0      1 TERMS    HELIOCENTRIC DYNAMICAL ECLIPTIC AND EQUINOX OF THE DATE
 4330    1  0  0  0  0  0  0  0  0  0  0  0  0  0.00000000000  1.00013988784 1.00013988784 0.00000000000        0.00000000000
";

#[test]
fn test_parse_distribution_records() {
    let vsop = Vsop87d::abridged().with_planet(Planet::Earth, parse_vsop87d(EARTH_HEAD));

    let longitude = 1.75347045673
        + 0.03341656456 * 4.66925680417_f64.cos()
        + 0.00034894275 * 4.62610241759_f64.cos();
    assert_abs_diff_eq!(
        vsop.dimension(J2000, Planet::Earth, Dimension::Longitude),
        longitude,
        epsilon = 1e-14
    );
    assert_abs_diff_eq!(
        vsop.dimension(J2000, Planet::Earth, Dimension::Latitude),
        0.00000279620 * 3.19870156017_f64.cos(),
        epsilon = 1e-16
    );
    assert_eq!(
        vsop.dimension(J2000, Planet::Earth, Dimension::Radius),
        1.00013988784
    );

    // τ = 1: the L1 block enters once
    let jd = J2000 + 365250.0;
    let l = vsop.dimension(jd, Planet::Earth, Dimension::Longitude);
    let l0_only = 1.75347045673
        + 0.03341656456 * (4.66925680417_f64 + 6283.07584999140).cos()
        + 0.00034894275 * (4.62610241759_f64 + 12566.15169998280).cos();
    assert_abs_diff_eq!(
        almagest::angles::angle_diff(l0_only + 6283.31966747491, l),
        0.0,
        epsilon = 1e-9
    );
}

#[test]
#[ignore = "reads the complete VSOP87D.ear named by VSOP87D_EAR"]
fn test_equinox_1962_complete_earth() {
    let path = std::env::var("VSOP87D_EAR").expect("VSOP87D_EAR is not set");
    let text = std::fs::read_to_string(&path).unwrap();
    let vsop = Vsop87d::abridged().with_planet(Planet::Earth, parse_vsop87d(&text));
    let sun = Sun::new(&vsop);

    // 1962-06-21 21h24m42s TD
    let seed = equinox_approx(1962, Season::Summer);
    let jd = equinox(&sun, seed, Season::Summer, 1e-7).unwrap();
    let published = 2437836.5 + (21.0 * 3600.0 + 24.0 * 60.0 + 42.0) * DAYS_PER_SECOND;
    assert_abs_diff_eq!(jd, published, epsilon = DAYS_PER_SECOND);
}
