//! Gauss-Legendre quadrature with one batched integrand call per order.

use numr::error::Result;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

use crate::integrate::error::{IntegrateError, IntegrateResult};
use crate::integrate::quadrature::{
    GaussLegendreRule, NodeWeightSet, OrderSearch, OrderSearchConfig, OrderSearchResult,
    ProgressSink,
};

/// Fixed-order Gauss-Legendre quadrature.
///
/// All n evaluation points are computed in a single batch.
pub fn gauss_quad_impl<R, C, F>(
    client: &C,
    f: F,
    lo: f64,
    hi: f64,
    n: usize,
) -> IntegrateResult<Tensor<R>>
where
    R: Runtime,
    C: RuntimeClient<R>,
    F: Fn(&Tensor<R>) -> Result<Tensor<R>>,
{
    let set = GaussLegendreRule::solve(n)?.scale(lo, hi)?;
    let integral = weighted_sum::<R, C, F>(client, &f, &set)?;

    Ok(Tensor::<R>::from_slice(&[integral], &[], client.device()))
}

/// Order search with batched integrand evaluation.
pub fn gauss_find_order_impl<R, C, F, S>(
    client: &C,
    f: F,
    config: &OrderSearchConfig,
    sink: &mut S,
) -> IntegrateResult<OrderSearchResult>
where
    R: Runtime,
    C: RuntimeClient<R>,
    F: Fn(&Tensor<R>) -> Result<Tensor<R>>,
    S: ProgressSink,
{
    let mut search = OrderSearch::new(*config)?;
    search.run_with(
        &mut |set: &NodeWeightSet| weighted_sum::<R, C, F>(client, &f, set),
        sink,
    )
}

/// `Σ w_i f(x_i)` with `f` applied once to the full node tensor.
fn weighted_sum<R, C, F>(client: &C, f: &F, set: &NodeWeightSet) -> IntegrateResult<f64>
where
    R: Runtime,
    C: RuntimeClient<R>,
    F: Fn(&Tensor<R>) -> Result<Tensor<R>>,
{
    let n = set.order();
    let x_tensor = Tensor::<R>::from_slice(set.nodes(), &[n], client.device());
    let f_data: Vec<f64> = f(&x_tensor)?.to_vec();

    if f_data.len() != n {
        return Err(IntegrateError::InvalidInput {
            context: format!(
                "integrand returned {} values for {} nodes",
                f_data.len(),
                n
            ),
        });
    }

    Ok(set
        .weights()
        .iter()
        .zip(&f_data)
        .map(|(&w, &value)| w * value)
        .sum())
}
