//! Tensor-based quadrature implementations.
//!
//! All implementations are generic over `R: Runtime` for multi-backend support.

mod gauss_order;

pub use gauss_order::{gauss_find_order_impl, gauss_quad_impl};
