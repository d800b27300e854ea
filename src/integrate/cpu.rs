//! CPU implementation of the backend-generic quadrature algorithms.

use numr::error::Result;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

use crate::integrate::error::IntegrateResult;
use crate::integrate::impl_generic::quadrature::{gauss_find_order_impl, gauss_quad_impl};
use crate::integrate::quadrature::{OrderSearchConfig, OrderSearchResult, ProgressSink};
use crate::integrate::traits::GaussOrderAlgorithms;

impl GaussOrderAlgorithms<CpuRuntime> for CpuClient {
    fn gauss_quad<F>(
        &self,
        f: F,
        lo: f64,
        hi: f64,
        n: usize,
    ) -> IntegrateResult<Tensor<CpuRuntime>>
    where
        F: Fn(&Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>>,
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
        F: Fn(&Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>>,
        S: ProgressSink,
    {
        gauss_find_order_impl(self, f, config, sink)
    }
}
