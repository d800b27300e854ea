//! CUDA implementation of the backend-generic quadrature algorithms.
//!
//! Delegates to the generic implementations in `impl_generic/`.

use numr::error::Result;
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

use crate::integrate::error::IntegrateResult;
use crate::integrate::impl_generic::quadrature::{gauss_find_order_impl, gauss_quad_impl};
use crate::integrate::quadrature::{OrderSearchConfig, OrderSearchResult, ProgressSink};
use crate::integrate::traits::GaussOrderAlgorithms;

impl GaussOrderAlgorithms<CudaRuntime> for CudaClient {
    fn gauss_quad<F>(
        &self,
        f: F,
        lo: f64,
        hi: f64,
        n: usize,
    ) -> IntegrateResult<Tensor<CudaRuntime>>
    where
        F: Fn(&Tensor<CudaRuntime>) -> Result<Tensor<CudaRuntime>>,
    {
        gauss_quad_impl(self, f, lo, hi, n)
    }

    fn gauss_find_order<F, S>(
        &self,
        f: F,
        config: &OrderSearchConfig,
        sink: &mut S,
    ) -> IntegrateResult<OrderSearchResult>
    where
        F: Fn(&Tensor<CudaRuntime>) -> Result<Tensor<CudaRuntime>>,
        S: ProgressSink,
    {
        gauss_find_order_impl(self, f, config, sink)
    }
}
