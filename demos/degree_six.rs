//! Find the Gauss-Legendre order that integrates x^6 - x^2 sin(2x) over [1, 3]
//! to a relative error of 1e-6.
//!
//! ```text
//! RUST_LOG=info cargo run --example degree_six
//! ```

use gauss_order::integrate::{IntegrateResult, OrderSearchConfig, TracingSink, find_order};
use tracing_subscriber::EnvFilter;

fn degree_six(x: f64) -> f64 {
    x.powi(6) - x * x * (2.0 * x).sin()
}

fn main() -> IntegrateResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = OrderSearchConfig::new(1.0, 3.0, 317.3442467).with_tolerance(1e-6);
    let result = find_order(degree_six, &config, &mut TracingSink)?;

    tracing::info!(
        order = result.order,
        estimate = result.estimate,
        relative_error = result.relative_error,
        "converged"
    );
    Ok(())
}
