//! Fire-and-Forget Update Dispatch
//!
//! The dispatcher turns an [`EditIntent`] into one detached delivery on the
//! async runtime. Callers never wait: control returns as soon as the task is
//! spawned, and the outcome is only logged and counted. Multiple dispatches
//! from one synchronous turn are issued in call order; their completions may
//! arrive in any order, and nothing depends on completion order.
//!
//! Outcome handling:
//!
//! - transport failure: error log, `failed` counter
//! - server rejection (`success: false`): error log including the server's
//!   detail, `rejected` counter
//! - server acceptance: debug log, `accepted` counter
//!
//! There is no retry and no rollback. The surface keeps the user's value
//! whatever the outcome, which can desynchronize client and server state;
//! the counters exist so that condition is at least observable.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::models::{EditIntent, UpdateRequest};
use crate::services::transport::UpdateTransport;

/// Counters over dispatched updates.
///
/// `issued` is incremented synchronously at dispatch time, before the
/// delivery task is spawned, so callers can observe how many requests a
/// synchronous turn produced (the flush relies on this ordering). The
/// remaining counters move when deliveries complete.
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    issued: AtomicU64,
    accepted: AtomicU64,
    rejected: AtomicU64,
    failed: AtomicU64,
}

impl DispatchMetrics {
    /// Updates handed to the transport so far.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }

    /// Deliveries the server accepted.
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    /// Deliveries the server rejected with `success: false`.
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Deliveries that never produced a verdict.
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Deliveries that have finished, whatever the outcome.
    pub fn completed(&self) -> u64 {
        self.accepted() + self.rejected() + self.failed()
    }
}

/// Detaches update deliveries onto the async runtime.
pub struct UpdateDispatcher {
    transport: Arc<dyn UpdateTransport>,
    metrics: Arc<DispatchMetrics>,
}

impl UpdateDispatcher {
    pub fn new(transport: Arc<dyn UpdateTransport>) -> Self {
        Self {
            transport,
            metrics: Arc::new(DispatchMetrics::default()),
        }
    }

    /// Shared handle to the dispatch counters.
    pub fn metrics(&self) -> Arc<DispatchMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Issue one update and return immediately.
    ///
    /// Must be called from within a Tokio runtime; the delivery runs as a
    /// detached task. Once issued the request is never retried, cancelled,
    /// or awaited.
    pub fn dispatch(&self, intent: EditIntent) {
        let field = intent.field.clone();
        let captured_at = intent.captured_at;
        let request = UpdateRequest::from(intent);

        self.metrics.issued.fetch_add(1, Ordering::Relaxed);

        let transport = Arc::clone(&self.transport);
        let metrics = Arc::clone(&self.metrics);
        tokio::spawn(async move {
            let outcome = transport.send(request).await;
            let elapsed_ms = (Utc::now() - captured_at).num_milliseconds();

            match outcome {
                Ok(ack) if ack.success => {
                    metrics.accepted.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(
                        "update accepted for {}/{} after {}ms",
                        field.record_id,
                        field.field_name,
                        elapsed_ms
                    );
                }
                Ok(ack) => {
                    metrics.rejected.fetch_add(1, Ordering::Relaxed);
                    tracing::error!(
                        "update rejected for {}/{}: {}",
                        field.record_id,
                        field.field_name,
                        ack.error.as_deref().unwrap_or("no detail provided")
                    );
                }
                Err(err) => {
                    metrics.failed.fetch_add(1, Ordering::Relaxed);
                    tracing::error!(
                        "update delivery failed for {}/{} after {}ms: {}",
                        field.record_id,
                        field.field_name,
                        elapsed_ms,
                        err
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Binding, UpdateAck};
    use crate::services::error::SyncError;
    use async_trait::async_trait;
    use std::time::Duration;

    enum StubOutcome {
        Accept,
        Reject(&'static str),
        Fail,
    }

    struct StubTransport {
        outcome: StubOutcome,
    }

    #[async_trait]
    impl UpdateTransport for StubTransport {
        async fn send(&self, _request: UpdateRequest) -> Result<UpdateAck, SyncError> {
            match &self.outcome {
                StubOutcome::Accept => Ok(UpdateAck::accepted()),
                StubOutcome::Reject(detail) => Ok(UpdateAck::rejected(*detail)),
                StubOutcome::Fail => Err(SyncError::malformed_response("boom")),
            }
        }
    }

    fn intent() -> EditIntent {
        let field = Binding::new("u1", "status").resolve().unwrap();
        EditIntent::new(field, None, "Done")
    }

    async fn wait_for_completion(metrics: &DispatchMetrics, expected: u64) {
        for _ in 0..200 {
            if metrics.completed() >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!(
            "expected {} completed deliveries, saw {}",
            expected,
            metrics.completed()
        );
    }

    #[tokio::test]
    async fn test_dispatch_returns_before_completion_and_counts_issued() {
        let dispatcher = UpdateDispatcher::new(Arc::new(StubTransport {
            outcome: StubOutcome::Accept,
        }));
        let metrics = dispatcher.metrics();

        dispatcher.dispatch(intent());
        dispatcher.dispatch(intent());

        // Issued synchronously, before any delivery had a chance to finish.
        assert_eq!(metrics.issued(), 2);

        wait_for_completion(&metrics, 2).await;
        assert_eq!(metrics.accepted(), 2);
    }

    #[tokio::test]
    async fn test_rejection_is_counted_not_retried() {
        let dispatcher = UpdateDispatcher::new(Arc::new(StubTransport {
            outcome: StubOutcome::Reject("stale"),
        }));
        let metrics = dispatcher.metrics();

        dispatcher.dispatch(intent());
        wait_for_completion(&metrics, 1).await;

        assert_eq!(metrics.rejected(), 1);
        // No retry: exactly one request ever went out.
        assert_eq!(metrics.issued(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_counted() {
        let dispatcher = UpdateDispatcher::new(Arc::new(StubTransport {
            outcome: StubOutcome::Fail,
        }));
        let metrics = dispatcher.metrics();

        dispatcher.dispatch(intent());
        wait_for_completion(&metrics, 1).await;

        assert_eq!(metrics.failed(), 1);
        assert_eq!(metrics.accepted(), 0);
    }
}
