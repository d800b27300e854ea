//! Gauss-Legendre quadrature and order search.
//!
//! # Available Methods
//!
//! | Item | Use Case |
//! |------|----------|
//! | [`GaussLegendreRule`] | Nodes and weights of an n-point rule on [-1, 1] |
//! | [`scale`] | Map canonical nodes/weights onto [lo, hi] |
//! | [`evaluate`] | Weighted sum with a fallible integrand |
//! | [`fixed_quad`] | One-shot n-point integration |
//! | [`find_order`] | Smallest order meeting a relative tolerance against a reference value |
//!
//! # Choosing a Method
//!
//! - **Order known**: Use [`fixed_quad`], or keep a [`GaussLegendreRule`] around to reuse it
//! - **Order unknown, reference value known**: Use [`find_order`] or drive an [`OrderSearch`] step by step

mod gauss;
mod legendre;
mod order_search;
mod report;

// Re-export all public items
pub use gauss::{GaussLegendreRule, NewtonOptions, NodeWeightSet, evaluate, fixed_quad, scale};
pub use order_search::{
    ConvergenceState, OrderSearch, OrderSearchConfig, OrderSearchResult, SearchState, find_order,
    try_find_order,
};
pub use report::{ChannelSink, NoopSink, ProgressSink, TracingSink};
