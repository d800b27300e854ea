//! Progress sinks for the order search.
//!
//! The search hands one [`ConvergenceState`] per tried order to a
//! [`ProgressSink`]. Nothing in the numeric core writes to a console.

use std::sync::mpsc::Sender;

use super::order_search::ConvergenceState;

/// Consumer of per-order progress records.
pub trait ProgressSink {
    /// Called once per tried order, after the estimate and its error are known.
    fn record(&mut self, state: &ConvergenceState);
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn record(&mut self, _state: &ConvergenceState) {}
}

/// Emits one `tracing` event per record at INFO level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn record(&mut self, state: &ConvergenceState) {
        tracing::info!(
            order = state.order,
            estimate = state.estimate,
            relative_error = state.relative_error,
            tolerance = state.tolerance,
            "order search step"
        );
    }
}

/// Forwards records over a channel. A disconnected receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelSink(pub Sender<ConvergenceState>);

impl ProgressSink for ChannelSink {
    fn record(&mut self, state: &ConvergenceState) {
        let _ = self.0.send(*state);
    }
}

impl<F> ProgressSink for F
where
    F: FnMut(&ConvergenceState),
{
    fn record(&mut self, state: &ConvergenceState) {
        self(state)
    }
}
