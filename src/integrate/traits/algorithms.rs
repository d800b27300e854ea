//! Backend-generic Gauss-Legendre algorithms.

use numr::error::Result;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

use crate::integrate::error::IntegrateResult;
use crate::integrate::quadrature::{OrderSearchConfig, OrderSearchResult, ProgressSink};

/// Gauss-Legendre quadrature with batched integrand evaluation.
///
/// Integrands take the whole node sequence as one 1-D tensor and return a
/// tensor of the same length, so every order costs a single integrand call.
/// Node construction and the order search run on the host and are identical
/// for all backends.
pub trait GaussOrderAlgorithms<R: Runtime> {
    /// Fixed-order Gauss-Legendre quadrature over `[lo, hi]`.
    ///
    /// Returns a 0-D tensor holding the integral.
    fn gauss_quad<F>(&self, f: F, lo: f64, hi: f64, n: usize) -> IntegrateResult<Tensor<R>>
    where
        F: Fn(&Tensor<R>) -> Result<Tensor<R>>;

    /// Smallest order whose estimate meets `config.tolerance`.
    ///
    /// See [`find_order`](crate::integrate::find_order) for the search itself.
    fn gauss_find_order<F, S>(
        &self,
        f: F,
        config: &OrderSearchConfig,
        sink: &mut S,
    ) -> IntegrateResult<OrderSearchResult>
    where
        F: Fn(&Tensor<R>) -> Result<Tensor<R>>,
        S: ProgressSink;
}
