#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use almagest::almagest::Almagest;
use almagest::angles::angle_diff;
use almagest::constants::{Body, RADEG};
use almagest::env_state::AlmagestEnv;
use almagest::observers::Observer;
use almagest::planets::PlanetSeries;
use almagest::series::PeriodicTerm;
use almagest::time::zone::{DstRule, TimeZone};

/// Boston, the site of Meeus example 15.a
pub fn boston() -> Observer {
    Observer::new(
        42.3333 * RADEG,
        -71.0833 * RADEG,
        0.0,
        Some("Boston".to_string()),
    )
    .unwrap()
}

pub fn eastern_time() -> TimeZone {
    TimeZone::new("EST", -5.0, "EDT", DstRule::UnitedStates)
}

pub fn boston_almagest(bodies: Vec<Body>) -> Almagest {
    Almagest::new(AlmagestEnv::new(boston(), eastern_time(), bodies))
}

/// Compare two equatorial positions, right ascension modulo 2π.
pub fn assert_radec_close(actual: (f64, f64), expected: (f64, f64), epsilon: f64) {
    assert_abs_diff_eq!(angle_diff(expected.0, actual.0), 0.0, epsilon = epsilon);
    assert_abs_diff_eq!(actual.1, expected.1, epsilon = epsilon);
}

/// Read one body of the VSOP87D distribution (IMCCE text format, e.g. `VSOP87D.ear`).
///
/// Headers carry the coordinate (`VARIABLE 1..3` for L, B, R) and the power of τ (`*T**n`);
/// the last three fields of a term record are A, B and C.
pub fn parse_vsop87d(text: &str) -> PlanetSeries {
    let mut coordinates: [Vec<Vec<PeriodicTerm>>; 3] = Default::default();
    let mut current = None;

    let header_field = |line: &str, key: &str| -> usize {
        line.split(key)
            .nth(1)
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|field| field.parse().ok())
            .unwrap_or_else(|| panic!("no {key} in header {line:?}"))
    };

    for line in text.lines() {
        if line.contains("VSOP87") {
            let coordinate = header_field(line, "VARIABLE") - 1;
            let power = header_field(line, "*T**");
            assert_eq!(coordinates[coordinate].len(), power, "{line}");
            coordinates[coordinate].push(Vec::new());
            current = Some(coordinate);
            continue;
        }

        let fields: Vec<f64> = line
            .split_whitespace()
            .rev()
            .take(3)
            .map(|field| field.parse().unwrap())
            .collect();
        if let (Some(coordinate), [c, b, a]) = (current, fields.as_slice()) {
            coordinates[coordinate]
                .last_mut()
                .unwrap()
                .push(PeriodicTerm::new(*a, *b, *c));
        }
    }

    let [longitude, latitude, radius] = coordinates;
    PlanetSeries::new(longitude, latitude, radius).unwrap()
}
