mod common;

use almagest::almagest::Almagest;
use almagest::almagest_errors::AlmagestError;
use almagest::constants::Body;
use almagest::env_state::AlmagestEnv;
use almagest::planets::{Dimension, Planet, PlanetSeries, Vsop87d};
use almagest::series::PeriodicTerm;
use common::{boston, eastern_time};

#[test]
fn test_almagest_environment() {
    let env = AlmagestEnv::new(
        boston(),
        eastern_time(),
        vec![Body::Moon, Body::Sun, Body::Moon],
    );
    let almagest = Almagest::new(env);

    assert_eq!(almagest.env().bodies, vec![Body::Moon, Body::Sun]);
    assert_eq!(almagest.observer().name.as_deref(), Some("Boston"));
    assert_eq!(almagest.time_zone().standard_name, "EST");
    assert_eq!(almagest.vsop(), &Vsop87d::abridged());
}

#[test]
fn test_injected_planet_series() {
    let constant = |value: f64| vec![vec![PeriodicTerm::new(value, 0.0, 0.0)]];
    let series = PlanetSeries::new(constant(0.5), constant(0.0), constant(1.5)).unwrap();
    let vsop = Vsop87d::abridged().with_planet(Planet::Mars, series);
    let almagest = Almagest::with_vsop(AlmagestEnv::default(), vsop);

    let jd = 2451545.0;
    assert_eq!(almagest.vsop().dimension(jd, Planet::Mars, Dimension::Longitude), 0.5);
    assert_eq!(almagest.vsop().dimension(jd, Planet::Mars, Dimension::Radius), 1.5);
    assert_eq!(
        almagest.vsop().dimension(jd, Planet::Venus, Dimension::Radius),
        Vsop87d::abridged().dimension(jd, Planet::Venus, Dimension::Radius)
    );
}

#[test]
fn test_empty_series_rejected() {
    let block = vec![vec![PeriodicTerm::new(1.0, 0.0, 0.0)]];
    assert_eq!(
        PlanetSeries::new(block.clone(), Vec::new(), block),
        Err(AlmagestError::InvalidSeries(
            "no power block for coordinate B".to_string()
        ))
    );
}
