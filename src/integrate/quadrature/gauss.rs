//! Gauss-Legendre rules.
//!
//! Gauss-Legendre quadrature is optimal for integrating polynomials.
//! An n-point rule exactly integrates polynomials of degree 2n-1.
//!
//! Three steps make up one quadrature:
//!
//! 1. [`GaussLegendreRule::solve`] finds the `n` roots of `P_n` on `[-1, 1]`
//!    and their weights,
//! 2. [`GaussLegendreRule::scale`] (or [`scale`]) maps them onto `[lo, hi]`,
//! 3. [`NodeWeightSet::evaluate`] (or [`evaluate`]) forms `Σ w_i f(x_i)`.

use std::error::Error;

use super::legendre::{initial_guess, legendre_pair, newton_slope};
use crate::integrate::error::{IntegrateError, IntegrateResult};

/// Options for the Newton refinement of the Legendre roots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonOptions {
    /// Absolute bound on the largest root update of the final sweep (default: 1e-15)
    pub tolerance: f64,
    /// Maximum number of sweeps over all roots (default: 200)
    pub max_iterations: usize,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-15,
            max_iterations: 200,
        }
    }
}

impl NewtonOptions {
    pub(crate) fn validate(&self) -> IntegrateResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(IntegrateError::InvalidParameter {
                parameter: "newton.tolerance".to_string(),
                message: format!("must be finite and positive, got {}", self.tolerance),
            });
        }
        if self.max_iterations == 0 {
            return Err(IntegrateError::InvalidParameter {
                parameter: "newton.max_iterations".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Nodes and weights of one rule on one interval.
///
/// Nodes come out of the construction in decreasing order; scaling keeps that
/// order. The weights sum to the interval length.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeWeightSet {
    nodes: Vec<f64>,
    weights: Vec<f64>,
    lo: f64,
    hi: f64,
}

impl NodeWeightSet {
    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    /// Quadrature nodes (abscissae).
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Quadrature weights, index-aligned with [`nodes`](Self::nodes).
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The interval `(lo, hi)` the set belongs to.
    pub fn interval(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    /// Sum of the weights; equals `hi - lo` up to rounding.
    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Weighted sum `Σ w_i f(x_i)` with a fallible integrand.
    ///
    /// The integrand is called once per node, in node order. The first failure
    /// stops the sum and is returned as [`IntegrateError::IntegrandEvaluation`]
    /// with the integrand's error as its source.
    pub fn evaluate<F, E>(&self, f: F) -> IntegrateResult<f64>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        evaluate(f, &self.weights, &self.nodes)
    }

    /// Weighted sum `Σ w_i f(x_i)`.
    ///
    /// # Example
    ///
    /// ```
    /// use gauss_order::integrate::GaussLegendreRule;
    ///
    /// let set = GaussLegendreRule::solve(2).unwrap().scale(0.0, 1.0).unwrap();
    /// let result = set.integrate(|x| x * x);
    /// assert!((result - 1.0 / 3.0).abs() < 1e-12);
    /// ```
    pub fn integrate<F>(&self, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        self.nodes
            .iter()
            .zip(&self.weights)
            .map(|(&x, &w)| w * f(x))
            .sum()
    }
}

/// Gauss-Legendre quadrature rule on the canonical interval [-1, 1].
///
/// Stores nodes (abscissae) and weights for Gauss-Legendre quadrature.
/// The nodes are roots of Legendre polynomials on [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct GaussLegendreRule {
    canonical: NodeWeightSet,
    newton_iterations: usize,
}

impl GaussLegendreRule {
    /// Create a new Gauss-Legendre rule with `n` points.
    ///
    /// Uses [`NewtonOptions::default`]. See [`solve_with`](Self::solve_with).
    ///
    /// # Example
    ///
    /// ```
    /// use gauss_order::integrate::GaussLegendreRule;
    ///
    /// let rule = GaussLegendreRule::solve(5).unwrap();
    /// assert_eq!(rule.nodes().len(), 5);
    /// assert!((rule.canonical().weight_sum() - 2.0).abs() < 1e-12);
    /// ```
    pub fn solve(n: usize) -> IntegrateResult<Self> {
        Self::solve_with(n, &NewtonOptions::default())
    }

    /// Create a new Gauss-Legendre rule with `n` points.
    ///
    /// All `n` roots of `P_n` are refined together: every sweep evaluates
    /// `P_{n-1}` and `P_n` at each current root with the three-term recurrence
    /// and applies `x <- x - P_n(x) / slope(x)`. Sweeping stops once the
    /// largest update is at most `options.tolerance` (absolute).
    ///
    /// # Errors
    ///
    /// - [`IntegrateError::InvalidOrder`] if `n == 0`
    /// - [`IntegrateError::InvalidParameter`] for a non-positive tolerance or
    ///   a zero sweep limit
    /// - [`IntegrateError::NewtonDidNotConverge`] if `options.max_iterations`
    ///   sweeps are not enough, or an update stops being finite
    pub fn solve_with(n: usize, options: &NewtonOptions) -> IntegrateResult<Self> {
        if n == 0 {
            return Err(IntegrateError::InvalidOrder { order: n });
        }
        options.validate()?;

        let mut nodes: Vec<f64> = (0..n).map(|i| initial_guess(n, i)).collect();
        let mut slopes = vec![0.0; n];

        let mut sweeps = 0;
        let mut max_update = f64::INFINITY;
        while max_update > options.tolerance {
            if sweeps == options.max_iterations {
                return Err(IntegrateError::NewtonDidNotConverge {
                    order: n,
                    iterations: sweeps,
                    max_update,
                });
            }

            max_update = 0.0;
            for (x, slope) in nodes.iter_mut().zip(slopes.iter_mut()) {
                let (p_prev, p_n) = legendre_pair(n, *x);
                *slope = newton_slope(n, *x, p_prev, p_n);

                let dx = p_n / *slope;
                if !dx.is_finite() {
                    return Err(IntegrateError::NewtonDidNotConverge {
                        order: n,
                        iterations: sweeps + 1,
                        max_update: dx,
                    });
                }
                *x -= dx;
                max_update = max_update.max(dx.abs());
            }
            sweeps += 1;
        }

        tracing::debug!(order = n, iterations = sweeps, "gauss-legendre nodes converged");

        // Slopes from the last sweep; the nodes moved by at most the tolerance since.
        let n_f64 = n as f64;
        let numerator = 2.0 * (n_f64 + 1.0) * (n_f64 + 1.0);
        let weights = nodes
            .iter()
            .zip(&slopes)
            .map(|(&x, &dp)| numerator / (n_f64 * n_f64 * (1.0 - x * x) * dp * dp))
            .collect();

        Ok(Self {
            canonical: NodeWeightSet {
                nodes,
                weights,
                lo: -1.0,
                hi: 1.0,
            },
            newton_iterations: sweeps,
        })
    }

    /// Number of points in the rule.
    pub fn order(&self) -> usize {
        self.canonical.order()
    }

    /// Canonical nodes on [-1, 1], in decreasing order.
    pub fn nodes(&self) -> &[f64] {
        self.canonical.nodes()
    }

    /// Canonical weights, summing to 2.
    pub fn weights(&self) -> &[f64] {
        self.canonical.weights()
    }

    /// The rule as a node/weight set on [-1, 1].
    pub fn canonical(&self) -> &NodeWeightSet {
        &self.canonical
    }

    /// Newton sweeps it took to converge.
    pub fn newton_iterations(&self) -> usize {
        self.newton_iterations
    }

    /// Map the rule onto `[lo, hi]`.
    pub fn scale(&self, lo: f64, hi: f64) -> IntegrateResult<NodeWeightSet> {
        scale(lo, hi, self.nodes(), self.weights())
    }

    /// Integrate a function over `[lo, hi]`.
    ///
    /// # Example
    ///
    /// ```
    /// use gauss_order::integrate::GaussLegendreRule;
    ///
    /// let rule = GaussLegendreRule::solve(5).unwrap();
    /// let result = rule.integrate(|x| x * x, 0.0, 1.0).unwrap();
    /// // Exact value is 1/3
    /// assert!((result - 1.0 / 3.0).abs() < 1e-10);
    /// ```
    pub fn integrate<F>(&self, f: F, lo: f64, hi: f64) -> IntegrateResult<f64>
    where
        F: Fn(f64) -> f64,
    {
        Ok(self.scale(lo, hi)?.integrate(f))
    }
}

pub(crate) fn check_interval(lo: f64, hi: f64, context: &str) -> IntegrateResult<()> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo {
        return Err(IntegrateError::InvalidInterval {
            lo,
            hi,
            context: context.to_string(),
        });
    }
    Ok(())
}

/// Map canonical nodes and weights on [-1, 1] onto `[lo, hi]`.
///
/// `x' = 0.5 (hi - lo) x + 0.5 (hi + lo)` and `w' = 0.5 (hi - lo) w`.
///
/// # Errors
///
/// - [`IntegrateError::InvalidInterval`] unless `lo < hi`, both finite
/// - [`IntegrateError::InvalidInput`] if the slices differ in length
/// - [`IntegrateError::InvalidOrder`] if they are empty
pub fn scale(lo: f64, hi: f64, nodes: &[f64], weights: &[f64]) -> IntegrateResult<NodeWeightSet> {
    check_interval(lo, hi, "scale")?;

    if nodes.len() != weights.len() {
        return Err(IntegrateError::InvalidInput {
            context: format!(
                "scale: {} nodes but {} weights",
                nodes.len(),
                weights.len()
            ),
        });
    }
    if nodes.is_empty() {
        return Err(IntegrateError::InvalidOrder { order: 0 });
    }

    let half_width = 0.5 * (hi - lo);
    let mid = 0.5 * (hi + lo);

    Ok(NodeWeightSet {
        nodes: nodes.iter().map(|&x| half_width * x + mid).collect(),
        weights: weights.iter().map(|&w| half_width * w).collect(),
        lo,
        hi,
    })
}

/// Weighted quadrature sum `Σ w_i f(x_i)`.
///
/// `f` is called exactly once per node, in order. An integrand error is
/// returned as [`IntegrateError::IntegrandEvaluation`] with the original error
/// as its source; nothing after the failing node is evaluated.
pub fn evaluate<F, E>(mut f: F, weights: &[f64], nodes: &[f64]) -> IntegrateResult<f64>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    if weights.len() != nodes.len() {
        return Err(IntegrateError::InvalidInput {
            context: format!(
                "evaluate: {} weights but {} nodes",
                weights.len(),
                nodes.len()
            ),
        });
    }

    let mut sum = 0.0;
    for (&w, &x) in weights.iter().zip(nodes) {
        let value = f(x).map_err(|err| IntegrateError::IntegrandEvaluation {
            x,
            source: err.into(),
        })?;
        sum += w * value;
    }
    Ok(sum)
}

/// Fixed-order Gaussian quadrature.
///
/// Integrates a function using Gauss-Legendre quadrature with a fixed number of points.
/// An n-point rule is exact for polynomials of degree 2n-1.
///
/// # Arguments
///
/// * `f` - Function to integrate
/// * `lo` - Lower bound
/// * `hi` - Upper bound
/// * `n` - Number of quadrature points
///
/// # Example
///
/// ```
/// use gauss_order::integrate::fixed_quad;
///
/// // Integrate x^4 from 0 to 1 (exact = 0.2)
/// let result = fixed_quad(|x| x.powi(4), 0.0, 1.0, 5).unwrap();
/// // 5-point rule is exact for degree <= 9
/// assert!((result - 0.2).abs() < 1e-14);
/// ```
pub fn fixed_quad<F>(f: F, lo: f64, hi: f64, n: usize) -> IntegrateResult<f64>
where
    F: Fn(f64) -> f64,
{
    check_interval(lo, hi, "fixed_quad")?;
    GaussLegendreRule::solve(n)?.integrate(f, lo, hi)
}
