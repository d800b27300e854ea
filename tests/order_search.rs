//! End-to-end order search scenarios.

use std::cell::Cell;
use std::convert::Infallible;

use approx::assert_relative_eq;
use gauss_order::integrate::{
    ConvergenceState, GaussLegendreRule, IntegrateError, NoopSink, OrderSearchConfig, find_order,
    try_find_order,
};

fn degree_six(x: f64) -> f64 {
    x.powi(6) - x * x * (2.0 * x).sin()
}

#[test]
fn test_square_converges_at_order_two() {
    let config = OrderSearchConfig::new(0.0, 1.0, 1.0 / 3.0).with_tolerance(1e-6);
    let result = find_order(|x| x * x, &config, &mut NoopSink).unwrap();

    assert_eq!(result.order, 2);
    assert_relative_eq!(result.estimate, 1.0 / 3.0, epsilon = 1e-12);
    assert!(result.relative_error <= 1e-6);
}

#[test]
fn test_degree_six_integrand() {
    let config = OrderSearchConfig::new(1.0, 3.0, 317.3442467).with_tolerance(1e-6);
    let mut history: Vec<ConvergenceState> = Vec::new();
    let mut sink = |s: &ConvergenceState| history.push(*s);

    let result = find_order(degree_six, &config, &mut sink).unwrap();

    assert!(result.order >= 2 && result.order <= 30, "order={}", result.order);
    assert!(result.relative_error <= 1e-6);
    assert!((result.estimate - 317.3442467).abs() / 317.3442467 <= 1e-6);

    // One record per tried order; only the last one converged.
    assert_eq!(history.len(), result.order);
    for (i, state) in history.iter().enumerate() {
        assert_eq!(state.order, i + 1);
        assert_eq!(state.is_converged(), i + 1 == result.order);
    }

    // The order found is minimal.
    let previous = GaussLegendreRule::solve(result.order - 1)
        .unwrap()
        .integrate(degree_six, 1.0, 3.0)
        .unwrap();
    assert!((previous - 317.3442467).abs() / 317.3442467 > 1e-6);
}

#[test]
fn test_zero_reference_rejected_before_quadrature() {
    let calls = Cell::new(0);
    let config = OrderSearchConfig::new(0.0, 1.0, 0.0);
    let err = find_order(
        |x| {
            calls.set(calls.get() + 1);
            x
        },
        &config,
        &mut NoopSink,
    )
    .unwrap_err();

    assert!(matches!(err, IntegrateError::InvalidReference { .. }));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_empty_interval_rejected() {
    let config = OrderSearchConfig::new(2.0, 2.0, 1.0);
    let err = find_order(|x| x, &config, &mut NoopSink).unwrap_err();
    assert!(matches!(err, IntegrateError::InvalidInterval { .. }));

    let err = GaussLegendreRule::solve(3).unwrap().scale(2.0, 2.0).unwrap_err();
    assert!(matches!(err, IntegrateError::InvalidInterval { .. }));
}

#[test]
fn test_zero_tolerance_terminates() {
    // Reference is off by 1e-9 relative, so no order can hit it exactly.
    let exact = 1.0 - 1.0_f64.cos();
    let config = OrderSearchConfig::new(0.0, 1.0, exact * (1.0 + 1e-9))
        .with_tolerance(0.0)
        .with_max_order(12);

    let err = find_order(|x| x.sin(), &config, &mut NoopSink).unwrap_err();
    assert!(err.is_non_convergence());
    match err {
        IntegrateError::OrderSearchDidNotConverge {
            last_order,
            last_error,
            ..
        } => {
            assert_eq!(last_order, 12);
            assert!(last_error > 0.0 && last_error < 1e-8);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_wrong_reference_terminates() {
    let config = OrderSearchConfig::new(1.0, 3.0, 317.0).with_max_order(20);
    let mut steps = 0;
    let mut sink = |_: &ConvergenceState| steps += 1;

    let err = find_order(degree_six, &config, &mut sink).unwrap_err();
    assert!(err.is_non_convergence());
    assert_eq!(steps, 20);
}

#[derive(Debug, thiserror::Error)]
#[error("integrand not defined at {0}")]
struct Undefined(f64);

#[test]
fn test_integrand_error_propagates_unchanged() {
    let config = OrderSearchConfig::new(0.0, 2.0, 1.0);
    let err = try_find_order(
        |x| if x > 1.5 { Err(Undefined(x)) } else { Ok(x) },
        &config,
        &mut NoopSink,
    )
    .unwrap_err();

    match err {
        IntegrateError::IntegrandEvaluation { x, source } => {
            let undefined = source.downcast_ref::<Undefined>().unwrap();
            assert_eq!(undefined.0, x);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_infallible_integrand_via_try() {
    let config = OrderSearchConfig::new(0.0, 1.0, 0.25);
    let result = try_find_order(
        |x| Ok::<f64, Infallible>(x.powi(3)),
        &config,
        &mut NoopSink,
    )
    .unwrap();
    assert_eq!(result.order, 2);
}
