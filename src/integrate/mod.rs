//! Gauss-Legendre integration with automatic order selection.
//!
//! # Architecture
//!
//! - [`quadrature`] holds the scalar numeric core: Legendre root finding,
//!   interval scaling, the weighted sum and the order search.
//! - [`GaussOrderAlgorithms`] runs the same quadrature with integrands that
//!   take the whole node sequence as one `Tensor<R>`, for any numr runtime.
//!
//! # Order search
//!
//! - [`find_order`] - smallest order meeting a relative tolerance against a reference value
//! - [`OrderSearch`] - the same search, one order per [`OrderSearch::step`]
//!
//! # Example
//!
//! ```
//! use gauss_order::integrate::{OrderSearchConfig, TracingSink, find_order};
//!
//! let f = |x: f64| x.powi(6) - x * x * (2.0 * x).sin();
//! let config = OrderSearchConfig::new(1.0, 3.0, 317.3442467).with_tolerance(1e-6);
//! let result = find_order(f, &config, &mut TracingSink).unwrap();
//! assert!(result.relative_error <= 1e-6);
//! ```
//!
//! With a tensor integrand:
//!
//! ```ignore
//! use gauss_order::integrate::GaussOrderAlgorithms;
//! use numr::runtime::cpu::{CpuClient, CpuDevice};
//!
//! let device = CpuDevice::new();
//! let client = CpuClient::new(device.clone());
//!
//! // x^2 over [0, 1] with a 2-point rule
//! let result = client.gauss_quad(|x| client.mul(x, x), 0.0, 1.0, 2)?;
//! ```

mod cpu;
#[cfg(feature = "cuda")]
mod cuda;
pub mod error;
pub mod impl_generic;
pub mod quadrature;
pub mod traits;

// Re-export error types
pub use error::{IntegrateError, IntegrateResult};

// Re-export the scalar core
pub use quadrature::{
    ChannelSink, ConvergenceState, GaussLegendreRule, NewtonOptions, NodeWeightSet, NoopSink,
    OrderSearch, OrderSearchConfig, OrderSearchResult, ProgressSink, SearchState, TracingSink,
    evaluate, find_order, fixed_quad, scale, try_find_order,
};

pub use traits::GaussOrderAlgorithms;
