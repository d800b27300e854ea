//! Error types for quadrature and order search.

use thiserror::Error;

/// Result type for integration operations.
pub type IntegrateResult<T> = Result<T, IntegrateError>;

/// Errors that can occur while building a rule, scaling it or searching for an order.
#[derive(Debug, Error)]
pub enum IntegrateError {
    /// Requested quadrature order is below 1.
    #[error("Invalid quadrature order {order}: need at least 1 point")]
    InvalidOrder { order: usize },

    /// Invalid interval provided (e.g., lo >= hi).
    #[error("Invalid interval [{lo}, {hi}] in {context}: bounds must be finite and satisfy lo < hi")]
    InvalidInterval { lo: f64, hi: f64, context: String },

    /// Reference value cannot be used as a relative-error denominator.
    #[error("Invalid reference value {value}: relative error needs a finite, nonzero reference")]
    InvalidReference { value: f64 },

    /// Invalid parameter value.
    #[error("Invalid parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Invalid input array size or dimensions.
    #[error("Invalid input: {context}")]
    InvalidInput { context: String },

    /// Newton refinement of the Legendre roots hit its sweep limit.
    #[error(
        "Gauss-Legendre nodes for order {order}: Newton iteration did not converge after {iterations} sweeps (last max update: {max_update:.2e})"
    )]
    NewtonDidNotConverge {
        order: usize,
        iterations: usize,
        max_update: f64,
    },

    /// No order up to `max_order` reached the tolerance.
    #[error(
        "order search did not converge by order {max_order}: last order {last_order}, estimate {last_estimate:.10e}, relative error {last_error:.2e} (tolerance: {tolerance:.2e})"
    )]
    OrderSearchDidNotConverge {
        max_order: usize,
        last_order: usize,
        last_estimate: f64,
        last_error: f64,
        tolerance: f64,
    },

    /// The integrand failed at a node. `source` is the integrand's own error.
    #[error("integrand evaluation failed at x = {x}")]
    IntegrandEvaluation {
        x: f64,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error from underlying numr operation.
    #[error("numr error: {0}")]
    NumrError(String),
}

impl IntegrateError {
    /// True for both Newton and order-search non-convergence.
    pub fn is_non_convergence(&self) -> bool {
        matches!(
            self,
            Self::NewtonDidNotConverge { .. } | Self::OrderSearchDidNotConverge { .. }
        )
    }
}

impl From<numr::error::Error> for IntegrateError {
    fn from(err: numr::error::Error) -> Self {
        Self::NumrError(err.to_string())
    }
}
