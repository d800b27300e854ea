//! Legendre polynomial helpers used by the node solver.

use std::f64::consts::PI;

/// Asymptotic first guess for root `i` (0-based, largest first) of `P_n`.
///
/// `a = (3 + 4i) / (4n + 2)` lies strictly inside `(0, 1)` for every
/// `n >= 1` and `i < n`, so `tan(a)` is finite and positive and the guess is
/// finite, including `n = 1`.
pub(crate) fn initial_guess(n: usize, i: usize) -> f64 {
    let n_f64 = n as f64;
    let a = (3 + 4 * i) as f64 / (4 * n + 2) as f64;
    (PI * a + 1.0 / (8.0 * n_f64 * n_f64 * a.tan())).cos()
}

/// Evaluate `(P_{n-1}(x), P_n(x))` for `n >= 1`.
///
/// Uses the three-term recurrence relation for Legendre polynomials.
pub(crate) fn legendre_pair(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0; // P_0(x)
    let mut p_curr = x; // P_1(x)

    for k in 1..n {
        let k_f64 = k as f64;

        // P_{k+1}(x) = ((2k+1)*x*P_k(x) - k*P_{k-1}(x)) / (k+1)
        let p_next = ((2.0 * k_f64 + 1.0) * x * p_curr - k_f64 * p_prev) / (k_f64 + 1.0);

        p_prev = p_curr;
        p_curr = p_next;
    }

    (p_prev, p_curr)
}

/// Slope used for the Newton update of the roots of `P_n`.
///
/// `(n+1) (P_{n-1}(x) - x P_n(x)) / (1 - x^2)`, which is `(n+1)/n` times
/// `P_n'(x)`. The weight formula carries the matching `n^2 / (n+1)^2` factor.
pub(crate) fn newton_slope(n: usize, x: f64, p_prev: f64, p_n: f64) -> f64 {
    (n as f64 + 1.0) * (p_prev - x * p_n) / (1.0 - x * x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_legendre_pair_low_degrees() {
        let x = 0.3;
        assert_eq!(legendre_pair(1, x), (1.0, x));

        // P_2 = (3x^2 - 1) / 2, P_3 = (5x^3 - 3x) / 2
        let (p1, p2) = legendre_pair(2, x);
        assert_relative_eq!(p1, x);
        assert_relative_eq!(p2, 0.5 * (3.0 * x * x - 1.0), epsilon = 1e-15);

        let (p2, p3) = legendre_pair(3, x);
        assert_relative_eq!(p2, 0.5 * (3.0 * x * x - 1.0), epsilon = 1e-15);
        assert_relative_eq!(p3, 0.5 * (5.0 * x.powi(3) - 3.0 * x), epsilon = 1e-15);
    }

    #[test]
    fn test_initial_guess_is_finite_and_decreasing() {
        for n in 1..=64 {
            let guesses: Vec<f64> = (0..n).map(|i| initial_guess(n, i)).collect();
            assert!(guesses.iter().all(|g| g.is_finite() && g.abs() < 1.0), "n={}", n);
            assert!(guesses.windows(2).all(|w| w[0] > w[1]), "n={}", n);
        }
    }

    #[test]
    fn test_newton_slope_scaling() {
        // P_2'(x) = 3x
        let x = 0.4;
        let (p1, p2) = legendre_pair(2, x);
        assert_relative_eq!(newton_slope(2, x, p1, p2), 1.5 * 3.0 * x, epsilon = 1e-14);
    }
}
