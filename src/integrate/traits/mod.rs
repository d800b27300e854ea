//! Trait definitions for backend-generic quadrature.

mod algorithms;

pub use algorithms::GaussOrderAlgorithms;
