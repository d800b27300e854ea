//! Search for the smallest Gauss-Legendre order meeting a relative tolerance.
//!
//! The search starts at order 1 and, for each order, builds the rule, maps it
//! onto `[lo, hi]`, forms the estimate and compares it with a known reference
//! value:
//!
//! ```text
//! relative_error = |estimate - reference| / |reference|
//! ```
//!
//! The first order with `relative_error <= tolerance` wins. Orders are capped
//! by `max_order`, so the search always terminates.

use std::error::Error;

use super::gauss::{GaussLegendreRule, NewtonOptions, NodeWeightSet, check_interval};
use super::report::ProgressSink;
use crate::integrate::error::{IntegrateError, IntegrateResult};

/// Configuration for [`OrderSearch`] and [`find_order`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSearchConfig {
    /// Lower integration bound
    pub lo: f64,
    /// Upper integration bound, must exceed `lo`
    pub hi: f64,
    /// Known value of the integral; must be finite and nonzero
    pub reference_value: f64,
    /// Relative error threshold (default: 1e-6)
    pub tolerance: f64,
    /// Largest order tried before giving up (default: 128)
    pub max_order: usize,
    /// Newton options for building each rule
    pub newton: NewtonOptions,
}

impl OrderSearchConfig {
    /// Default relative tolerance.
    pub const DEFAULT_TOLERANCE: f64 = 1e-6;
    /// Default order cap.
    pub const DEFAULT_MAX_ORDER: usize = 128;

    /// Configuration for integrating over `[lo, hi]` against `reference_value`.
    pub fn new(lo: f64, hi: f64, reference_value: f64) -> Self {
        Self {
            lo,
            hi,
            reference_value,
            tolerance: Self::DEFAULT_TOLERANCE,
            max_order: Self::DEFAULT_MAX_ORDER,
            newton: NewtonOptions::default(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_order(mut self, max_order: usize) -> Self {
        self.max_order = max_order;
        self
    }

    pub fn with_newton(mut self, newton: NewtonOptions) -> Self {
        self.newton = newton;
        self
    }

    /// Check the configuration without running any quadrature.
    ///
    /// A zero tolerance is accepted; only an exact hit satisfies it.
    pub fn validate(&self) -> IntegrateResult<()> {
        if self.reference_value == 0.0 || !self.reference_value.is_finite() {
            return Err(IntegrateError::InvalidReference {
                value: self.reference_value,
            });
        }
        check_interval(self.lo, self.hi, "order search")?;
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(IntegrateError::InvalidParameter {
                parameter: "tolerance".to_string(),
                message: format!("must be non-negative, got {}", self.tolerance),
            });
        }
        if self.max_order == 0 {
            return Err(IntegrateError::InvalidParameter {
                parameter: "max_order".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        self.newton.validate()
    }
}

/// Outcome of one tried order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceState {
    /// Order that was tried
    pub order: usize,
    /// Quadrature estimate at that order
    pub estimate: f64,
    /// `|estimate - reference_value| / |reference_value|`
    pub relative_error: f64,
    pub reference_value: f64,
    pub tolerance: f64,
}

impl ConvergenceState {
    /// Whether this order meets the tolerance.
    pub fn is_converged(&self) -> bool {
        self.relative_error <= self.tolerance
    }
}

/// Result of a converged order search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSearchResult {
    /// Smallest order meeting the tolerance
    pub order: usize,
    /// Estimate at that order
    pub estimate: f64,
    /// Relative error of the estimate
    pub relative_error: f64,
}

/// State of an [`OrderSearch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchState {
    /// The next step tries `order`.
    Searching { order: usize },
    /// Terminal: an order met the tolerance.
    Converged(OrderSearchResult),
    /// Terminal: a step returned an error.
    Failed,
}

/// Step-by-step order search.
///
/// Each [`step`](Self::step) tries one order. [`run`](Self::run) steps until
/// the search converges or fails.
///
/// # Example
///
/// ```
/// use gauss_order::integrate::{NoopSink, OrderSearch, OrderSearchConfig, SearchState};
///
/// let config = OrderSearchConfig::new(0.0, 1.0, 1.0 / 3.0);
/// let mut search = OrderSearch::new(config).unwrap();
/// let mut f = |x: f64| Ok::<f64, std::convert::Infallible>(x * x);
///
/// assert!(search.step(&mut f, &mut NoopSink).unwrap().is_none());
/// assert_eq!(search.state(), &SearchState::Searching { order: 2 });
///
/// let result = search.step(&mut f, &mut NoopSink).unwrap().unwrap();
/// assert_eq!(result.order, 2);
/// ```
#[derive(Debug, Clone)]
pub struct OrderSearch {
    config: OrderSearchConfig,
    state: SearchState,
    last: Option<ConvergenceState>,
}

impl OrderSearch {
    /// Validate `config` and start searching at order 1.
    ///
    /// # Errors
    ///
    /// - [`IntegrateError::InvalidReference`] for a zero or non-finite reference
    /// - [`IntegrateError::InvalidInterval`] unless `lo < hi`
    /// - [`IntegrateError::InvalidParameter`] for a negative tolerance,
    ///   `max_order == 0` or bad Newton options
    pub fn new(config: OrderSearchConfig) -> IntegrateResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: SearchState::Searching { order: 1 },
            last: None,
        })
    }

    pub fn config(&self) -> &OrderSearchConfig {
        &self.config
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// The most recently tried order, if any.
    pub fn last(&self) -> Option<&ConvergenceState> {
        self.last.as_ref()
    }

    /// Try the next order with a scalar integrand.
    ///
    /// Returns `Ok(Some(result))` once converged, `Ok(None)` while searching.
    pub fn step<F, E, S>(
        &mut self,
        f: &mut F,
        sink: &mut S,
    ) -> IntegrateResult<Option<OrderSearchResult>>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: Into<Box<dyn Error + Send + Sync>>,
        S: ProgressSink,
    {
        self.step_with(&mut |set: &NodeWeightSet| set.evaluate(&mut *f), sink)
    }

    /// Try the next order, producing the estimate with `quadrature`.
    ///
    /// `quadrature` receives the node/weight set already mapped onto
    /// `[lo, hi]` and returns the weighted sum.
    pub fn step_with<Q, S>(
        &mut self,
        quadrature: &mut Q,
        sink: &mut S,
    ) -> IntegrateResult<Option<OrderSearchResult>>
    where
        Q: FnMut(&NodeWeightSet) -> IntegrateResult<f64>,
        S: ProgressSink,
    {
        let order = match self.state {
            SearchState::Searching { order } => order,
            SearchState::Converged(result) => return Ok(Some(result)),
            SearchState::Failed => {
                return Err(IntegrateError::InvalidInput {
                    context: "order search already failed".to_string(),
                });
            }
        };

        let state = match self.try_order(order, quadrature) {
            Ok(state) => state,
            Err(err) => {
                self.state = SearchState::Failed;
                return Err(err);
            }
        };
        self.last = Some(state);
        sink.record(&state);

        if state.is_converged() {
            let result = OrderSearchResult {
                order,
                estimate: state.estimate,
                relative_error: state.relative_error,
            };
            self.state = SearchState::Converged(result);
            return Ok(Some(result));
        }

        if order >= self.config.max_order {
            self.state = SearchState::Failed;
            return Err(IntegrateError::OrderSearchDidNotConverge {
                max_order: self.config.max_order,
                last_order: order,
                last_estimate: state.estimate,
                last_error: state.relative_error,
                tolerance: self.config.tolerance,
            });
        }

        self.state = SearchState::Searching { order: order + 1 };
        Ok(None)
    }

    /// Step with a scalar integrand until converged or failed.
    pub fn run<F, E, S>(&mut self, mut f: F, sink: &mut S) -> IntegrateResult<OrderSearchResult>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: Into<Box<dyn Error + Send + Sync>>,
        S: ProgressSink,
    {
        self.run_with(&mut |set: &NodeWeightSet| set.evaluate(&mut f), sink)
    }

    /// Step with a custom quadrature until converged or failed.
    pub fn run_with<Q, S>(
        &mut self,
        quadrature: &mut Q,
        sink: &mut S,
    ) -> IntegrateResult<OrderSearchResult>
    where
        Q: FnMut(&NodeWeightSet) -> IntegrateResult<f64>,
        S: ProgressSink,
    {
        loop {
            if let Some(result) = self.step_with(quadrature, sink)? {
                return Ok(result);
            }
        }
    }

    fn try_order<Q>(&self, order: usize, quadrature: &mut Q) -> IntegrateResult<ConvergenceState>
    where
        Q: FnMut(&NodeWeightSet) -> IntegrateResult<f64>,
    {
        let config = &self.config;
        let rule = GaussLegendreRule::solve_with(order, &config.newton)?;
        let set = rule.scale(config.lo, config.hi)?;
        let estimate = quadrature(&set)?;

        Ok(ConvergenceState {
            order,
            estimate,
            relative_error: (estimate - config.reference_value).abs()
                / config.reference_value.abs(),
            reference_value: config.reference_value,
            tolerance: config.tolerance,
        })
    }
}

/// Find the smallest order whose estimate meets `config.tolerance`.
///
/// # Example
///
/// ```
/// use gauss_order::integrate::{NoopSink, OrderSearchConfig, find_order};
///
/// let config = OrderSearchConfig::new(0.0, std::f64::consts::PI, 2.0).with_tolerance(1e-10);
/// let result = find_order(|x| x.sin(), &config, &mut NoopSink).unwrap();
/// assert!(result.relative_error <= 1e-10);
/// ```
pub fn find_order<F, S>(
    f: F,
    config: &OrderSearchConfig,
    sink: &mut S,
) -> IntegrateResult<OrderSearchResult>
where
    F: Fn(f64) -> f64,
    S: ProgressSink,
{
    try_find_order(
        |x| Ok::<f64, std::convert::Infallible>(f(x)),
        config,
        sink,
    )
}

/// [`find_order`] with a fallible integrand.
///
/// The first integrand error ends the search as
/// [`IntegrateError::IntegrandEvaluation`], its source untouched.
pub fn try_find_order<F, E, S>(
    f: F,
    config: &OrderSearchConfig,
    sink: &mut S,
) -> IntegrateResult<OrderSearchResult>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: Into<Box<dyn Error + Send + Sync>>,
    S: ProgressSink,
{
    OrderSearch::new(*config)?.run(f, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrate::quadrature::report::NoopSink;
    use approx::assert_relative_eq;
    use std::convert::Infallible;

    fn square(x: f64) -> Result<f64, Infallible> {
        Ok(x * x)
    }

    #[test]
    fn test_config_defaults() {
        let config = OrderSearchConfig::new(1.0, 3.0, 317.3442467);
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.max_order, 128);
        assert_eq!(config.newton, NewtonOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let base = OrderSearchConfig::new(0.0, 1.0, 1.0);

        let config = OrderSearchConfig { reference_value: 0.0, ..base };
        assert!(matches!(
            config.validate(),
            Err(IntegrateError::InvalidReference { .. })
        ));

        let config = OrderSearchConfig { hi: 0.0, ..base };
        assert!(matches!(
            config.validate(),
            Err(IntegrateError::InvalidInterval { .. })
        ));

        assert!(matches!(
            base.with_tolerance(-1e-3).validate(),
            Err(IntegrateError::InvalidParameter { .. })
        ));
        assert!(matches!(
            base.with_max_order(0).validate(),
            Err(IntegrateError::InvalidParameter { .. })
        ));
        assert!(base.with_tolerance(0.0).validate().is_ok());
    }

    #[test]
    fn test_state_machine_transitions() {
        let config = OrderSearchConfig::new(0.0, 1.0, 1.0 / 3.0);
        let mut search = OrderSearch::new(config).unwrap();
        let mut f = square;
        assert_eq!(search.state(), &SearchState::Searching { order: 1 });
        assert!(search.last().is_none());

        assert_eq!(search.step(&mut f, &mut NoopSink).unwrap(), None);
        let last = search.last().unwrap();
        assert_eq!(last.order, 1);
        assert_relative_eq!(last.estimate, 0.25, epsilon = 1e-14);
        assert_relative_eq!(last.relative_error, 0.25, epsilon = 1e-12);
        assert_eq!(search.state(), &SearchState::Searching { order: 2 });

        let result = search.step(&mut f, &mut NoopSink).unwrap().unwrap();
        assert_eq!(result.order, 2);
        assert!(matches!(search.state(), SearchState::Converged(_)));

        // Terminal state is sticky.
        assert_eq!(search.step(&mut f, &mut NoopSink).unwrap(), Some(result));
        assert_eq!(search.last().unwrap().order, 2);
    }

    #[test]
    fn test_max_order_exhausted() {
        let config = OrderSearchConfig::new(0.0, 1.0, 0.3).with_max_order(4);
        let mut search = OrderSearch::new(config).unwrap();
        let err = search.run(square, &mut NoopSink).unwrap_err();

        match err {
            IntegrateError::OrderSearchDidNotConverge {
                max_order,
                last_order,
                last_estimate,
                last_error,
                ..
            } => {
                assert_eq!(max_order, 4);
                assert_eq!(last_order, 4);
                assert_relative_eq!(last_estimate, 1.0 / 3.0, epsilon = 1e-12);
                assert_relative_eq!(last_error, 1.0 / 9.0, epsilon = 1e-10);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(search.state(), &SearchState::Failed);
        assert!(search.step(&mut square, &mut NoopSink).is_err());
    }

    #[test]
    fn test_custom_quadrature() {
        let config = OrderSearchConfig::new(0.0, 1.0, 0.5);
        let mut search = OrderSearch::new(config).unwrap();
        let mut sizes = Vec::new();
        let mut quadrature = |set: &NodeWeightSet| -> IntegrateResult<f64> {
            sizes.push(set.order());
            Ok(set.integrate(|x| x))
        };
        let result = search.run_with(&mut quadrature, &mut NoopSink).unwrap();
        assert_eq!(result.order, 1);
        assert_eq!(sizes, vec![1]);
    }

    #[test]
    fn test_newton_failure_stops_search() {
        let newton = NewtonOptions {
            tolerance: 1e-15,
            max_iterations: 1,
        };
        let config = OrderSearchConfig::new(0.0, 1.0, 1.0 / 3.0).with_newton(newton);
        let mut search = OrderSearch::new(config).unwrap();
        let err = search.run(square, &mut NoopSink).unwrap_err();
        assert!(matches!(
            err,
            IntegrateError::NewtonDidNotConverge { order: 1, .. }
        ));
        assert_eq!(search.state(), &SearchState::Failed);
    }
}
