mod common;

use approx::assert_abs_diff_eq;
use hifitime::Epoch;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use almagest::constants::{Body, DAYS_PER_MINUTE, RADEG, RADH};
use almagest::earth_orientation::Nutation;
use almagest::planets::{Dimension, Planet};
use almagest::riseset::{rise, settime, transit, RiseSetWindow};
use almagest::time::calendar::{cal_to_jd, jd_to_cal, Calendar};
use almagest::time::{jd_from_epoch, jde_from_epoch};
use common::{assert_radec_close, boston, boston_almagest};

fn window(almagest: &almagest::almagest::Almagest, body: Body, day: f64) -> RiseSetWindow {
    let samples = [day - 1.0, day, day + 1.0].map(|jd| {
        almagest
            .apparent_equatorial(body, jd, &Nutation::at(jd))
            .unwrap()
    });
    RiseSetWindow::new(samples)
}

#[test]
fn test_venus_almanac_boston() {
    // Meeus example 15.a, 1988 March 20: rise 12h25m, transit 19h41m, set 2h55m UT
    let almagest = boston_almagest(vec![Body::Venus]);
    let day = cal_to_jd(1988, 3, 20.0, Calendar::Gregorian).unwrap();
    let w = window(&almagest, Body::Venus, day);
    let site = boston();

    let hours = |jd: Option<f64>| (jd.unwrap() - day) * 24.0;
    let tolerance = 1.5 / 60.0;

    let up = rise(day, &w, &site, DAYS_PER_MINUTE).unwrap().jd();
    let noon = transit(day, &w, &site, DAYS_PER_MINUTE).unwrap().jd();
    let down = settime(day, &w, &site, DAYS_PER_MINUTE).unwrap().jd();
    assert_abs_diff_eq!(hours(up), 12.0 + 25.0 / 60.0, epsilon = tolerance);
    assert_abs_diff_eq!(hours(noon), 19.0 + 41.0 / 60.0, epsilon = tolerance);
    assert_abs_diff_eq!(hours(down), 2.0 + 55.0 / 60.0, epsilon = tolerance);
}

#[test]
fn test_apparent_venus_1992() {
    // Meeus example 33.a: α = 21h04m41.454s, δ = −18°53'16.84"
    let almagest = boston_almagest(vec![Body::Venus]);
    let jd = 2448976.5;
    let (ra, dec, _) = almagest
        .apparent_equatorial(Body::Venus, jd, &Nutation::at(jd))
        .unwrap();
    assert_radec_close(
        (ra, dec),
        (21.078182 * RADH, -18.888011 * RADEG),
        2e-5 * RADH,
    );
}

#[test]
fn test_every_body_has_a_position() {
    let almagest = boston_almagest(Body::ALL.to_vec());
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);

    for _ in 0..20 {
        let jd = rng.random_range(2378496.5..2524593.5);
        let nutation = Nutation::at(jd);
        for body in Body::ALL {
            let (ra, dec, h0) = almagest.apparent_equatorial(body, jd, &nutation).unwrap();
            assert!((0.0..std::f64::consts::TAU).contains(&ra), "{body} {jd}");
            assert!(dec.abs() < 35.0 * RADEG, "{body} {jd}");
            assert!(h0 < 0.5 * RADEG && h0 > -1.0 * RADEG, "{body} {jd}");
        }
    }
}

#[test]
fn test_batch_matches_single_evaluation() {
    let almagest = boston_almagest(Vec::new());
    let vsop = almagest.vsop();
    let jds: Vec<f64> = (0..50).map(|k| 2451545.0 + 36.5 * k as f64).collect();

    let batch = vsop.dimension_batch(&jds, Planet::Mars, Dimension::Radius);
    for (jd, r) in jds.iter().zip(batch) {
        assert_eq!(r, vsop.dimension(*jd, Planet::Mars, Dimension::Radius));
    }
}

#[test]
fn test_calendar_against_hifitime() {
    let mut rng = StdRng::seed_from_u64(0xBADF00D);

    for _ in 0..200 {
        let year = rng.random_range(1900..2100);
        let month = rng.random_range(1..=12u8);
        let day = rng.random_range(1..=28u8);

        let epoch = Epoch::from_gregorian_utc_at_midnight(year, month, day);
        let jd = cal_to_jd(year, month as u32, day as f64, Calendar::Gregorian).unwrap();
        assert_abs_diff_eq!(jd_from_epoch(epoch), jd, epsilon = 1e-8);

        let (y, m, d) = jd_to_cal(jd, Calendar::Gregorian);
        assert_eq!((y, m), (year, month as u32));
        assert_abs_diff_eq!(d, day as f64, epsilon = 1e-9);
    }
}

#[test]
fn test_dynamical_time_offset_matches_hifitime() {
    // TT − UTC in 2020 is 69.184 s; the ΔT polynomial gives about 71.6 s
    let epoch = Epoch::from_gregorian_utc_at_midnight(2020, 1, 1);
    let tt_minus_utc = (jde_from_epoch(epoch) - jd_from_epoch(epoch)) * 86400.0;
    assert_abs_diff_eq!(tt_minus_utc, 69.184, epsilon = 1e-3);

    let model = almagest::time::dynamical::delta_t(jd_from_epoch(epoch));
    assert_abs_diff_eq!(model, tt_minus_utc, epsilon = 3.0);
}
