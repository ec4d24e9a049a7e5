//! Integration tests for forecast invariants across the whole horizon.

mod common;

use aiot_forecast::error::ForecastError;
use aiot_forecast::model::engine::forecast;
use aiot_forecast::model::params::ForecastParameters;
use aiot_forecast::model::types::Curve;

use common::rel_eq;

#[test]
fn anchor_year_scenario_matches_hand_computation() {
    let result = forecast(&common::single_year_params()).unwrap();
    assert_eq!(result.len(), 1);

    let r = result.first().unwrap();
    assert_eq!(r.year, 2024);
    // 2e9 × 7.5 W × 8760 h × 1.10
    assert!(rel_eq(r.e_bu_exp, 1.4454e14, 1e-12), "e_bu_exp = {}", r.e_bu_exp);
    assert!(rel_eq(r.e_bu_log, 1.4454e14, 1e-12), "e_bu_log = {}", r.e_bu_log);
}

#[test]
fn randomized_parameter_sets_satisfy_structural_invariants() {
    let mut rng = common::rng();
    for _ in 0..500 {
        let p = common::random_params(&mut rng);
        let result = forecast(&p).unwrap();

        let expected_len = usize::try_from(p.end_year - p.start_year + 1).unwrap();
        assert_eq!(result.len(), expected_len, "params: {p:?}");
        assert_eq!(result.first().map(|r| r.year), Some(p.start_year));
        assert!(result.records().windows(2).all(|w| w[1].year == w[0].year + 1));
        assert!(result.is_finite(), "unexpected overflow for {p:?}");

        let anchor = result.first().unwrap();
        let anchor_energy = p.n0_bu * p.p_avg * p.dt * (1.0 + p.overhead_pct);
        assert!(rel_eq(anchor.e_bu_exp, anchor_energy, 1e-12));
        assert!(rel_eq(anchor.e_bu_log, anchor_energy, 1e-12));
        assert_eq!(anchor.e_td_lower, anchor.e_td_exp);
        assert_eq!(anchor.e_td_upper, anchor.e_td_exp);
        assert_eq!(anchor.de_dr_n, 0.0);
        assert_eq!(anchor.de_drho, 0.0);

        for r in &result {
            assert_eq!(r.de_drho, -r.de_dr_n);
            assert!(r.e_td_lower <= r.e_td_exp && r.e_td_exp <= r.e_td_upper);
        }
    }
}

#[test]
fn zero_uncertainty_gives_zero_width_band_everywhere() {
    let p = ForecastParameters {
        sigma_r: 0.0,
        sigma_rho: 0.0,
        end_year: 2100,
        ..common::default_params()
    };
    for r in &forecast(&p).unwrap() {
        assert_eq!(r.e_td_lower, r.e_td_exp, "year {}", r.year);
        assert_eq!(r.e_td_upper, r.e_td_exp, "year {}", r.year);
    }
}

#[test]
fn growth_outpacing_efficiency_drives_sensitivities_apart() {
    let p = ForecastParameters {
        r_n_td: 0.35,
        rho: 0.12,
        ..common::default_params()
    };
    let result = forecast(&p).unwrap();
    let records = result.records();

    for w in records.windows(2) {
        assert!(w[1].e_td_exp > w[0].e_td_exp);
        assert!(w[1].de_dr_n > w[0].de_dr_n);
        assert!(w[1].de_drho.abs() > w[0].de_drho.abs());
    }
    for r in &records[1..] {
        assert!(r.de_dr_n > 0.0);
        assert!(r.de_drho < 0.0);
    }
}

#[test]
fn efficiency_outpacing_growth_shrinks_top_down_energy() {
    let result = forecast(&common::default_params()).unwrap();
    let series = result.series(Curve::TdExp);
    assert!(series.windows(2).all(|w| w[1].1 < w[0].1));
}

#[test]
fn logistic_devices_approach_capacity_from_below() {
    let p = ForecastParameters {
        end_year: 2024 + 400,
        ..common::default_params()
    };
    let result = forecast(&p).unwrap();

    for w in result.records().windows(2) {
        assert!(w[1].n_bu_log >= w[0].n_bu_log);
    }
    for r in &result {
        assert!(r.n_bu_log <= p.k_bu, "year {} exceeds capacity: {}", r.year, r.n_bu_log);
    }
    let last = result.last().unwrap();
    assert!(rel_eq(last.n_bu_log, p.k_bu, 1e-9));
    // the unbounded model keeps growing
    assert!(last.n_bu_exp > 1e20);
}

#[test]
fn band_widens_with_elapsed_time() {
    for (r_n_td, rho) in [(0.15, 0.15), (0.35, 0.12), (0.2, 0.1)] {
        let p = ForecastParameters {
            r_n_td,
            rho,
            sigma_r: 0.05,
            sigma_rho: 0.03,
            end_year: 2060,
            ..common::default_params()
        };
        let result = forecast(&p).unwrap();
        for w in result.records().windows(2) {
            let before = w[0].e_td_upper - w[0].e_td_lower;
            let after = w[1].e_td_upper - w[1].e_td_lower;
            assert!(after > before, "band shrank in {} for {p:?}", w[1].year);
        }
    }
}

#[test]
fn band_ratio_grows_for_any_positive_sigma() {
    let result = forecast(&common::default_params()).unwrap();
    let ratios: Vec<f64> = result
        .records()
        .iter()
        .map(|r| r.e_td_upper / r.e_td_lower)
        .collect();
    assert_eq!(ratios[0], 1.0);
    assert!(ratios.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn negative_growth_rate_is_accepted_and_decays() {
    let p = ForecastParameters {
        r_n_bu: -0.1,
        ..common::default_params()
    };
    let result = forecast(&p).unwrap();
    for w in result.records().windows(2) {
        assert!(w[1].n_bu_exp < w[0].n_bu_exp);
        assert!(w[1].n_bu_log < w[0].n_bu_log);
    }
}

#[test]
fn extreme_rates_overflow_to_detectable_infinity() {
    let p = ForecastParameters {
        r_n_td: 0.5,
        rho: -20.0,
        end_year: 2124,
        ..common::default_params()
    };
    let result = forecast(&p).unwrap();
    assert_eq!(result.len(), 101);
    assert!(!result.is_finite());

    let years = result.non_finite_years();
    assert!(!years.is_empty());
    assert!(years.windows(2).all(|w| w[0] < w[1]));
    let last = result.last().unwrap();
    assert_eq!(last.e_td_exp, f64::INFINITY);
    assert!(last.non_finite_curves().contains(&Curve::TdExp));
    // bottom-up curves are unaffected by top-down overflow
    assert!(last.e_bu_exp.is_finite());
}

#[test]
fn invalid_denominators_produce_no_result() {
    for (n0_bu, n0_td, field) in [
        (0.0, 7.3e14, "n0_bu"),
        (-5.0, 7.3e14, "n0_bu"),
        (2e9, 0.0, "n0_td"),
        (2e9, -1.0, "n0_td"),
    ] {
        let p = ForecastParameters {
            n0_bu,
            n0_td,
            ..common::default_params()
        };
        match forecast(&p) {
            Err(ForecastError::InvalidParameter { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected invalid {field}, got {other:?}"),
        }
    }
}

#[test]
fn inverted_horizon_is_an_error_not_an_empty_result() {
    let p = ForecastParameters {
        start_year: 2024,
        end_year: 2023,
        ..common::default_params()
    };
    assert_eq!(
        forecast(&p),
        Err(ForecastError::DegenerateHorizon {
            start_year: 2024,
            end_year: 2023,
        })
    );
}

#[test]
fn concurrent_invocations_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let p = ForecastParameters {
                    r_n_td: 0.1 * f64::from(i),
                    ..ForecastParameters::default()
                };
                (p, forecast(&p).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (p, result) = handle.join().unwrap();
        assert_eq!(result, forecast(&p).unwrap());
    }
}
