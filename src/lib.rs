//! # gauss_order
//!
//! Gauss-Legendre quadrature with automatic order selection.
//!
//! Given an integrand, an interval `[lo, hi]` and a known reference value for
//! the integral, [`find_order`](integrate::find_order) increases the number of
//! quadrature points until the relative error against the reference drops
//! below a tolerance, and reports the smallest order that got there.
//!
//! # Example
//!
//! ```
//! use gauss_order::integrate::{NoopSink, OrderSearchConfig, find_order};
//!
//! let config = OrderSearchConfig::new(0.0, 1.0, 1.0 / 3.0).with_tolerance(1e-6);
//! let result = find_order(|x| x * x, &config, &mut NoopSink).unwrap();
//!
//! // A 2-point rule is exact for polynomials up to degree 3.
//! assert_eq!(result.order, 2);
//! assert!((result.estimate - 1.0 / 3.0).abs() < 1e-12);
//! ```

pub mod integrate;
