use hermes_core::{ExecutionPlan, Venue};
use hermes_ports::{CommitSink, VenueSnapshotProvider};
use log::warn;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::{ExecuteCommand, ExecutionCoordinator};
use crate::error::{ExecutionError, Result};

/// Host-side entry point used by the REST API and the console.
///
/// Supplies the concurrency discipline the coordinator lacks: when the
/// commit is rejected because another request committed first, the whole
/// execution is rerun against a fresh snapshot, up to `max_conflict_retries`
/// times. Any other failure is returned as-is.
pub struct ExecutionService<S, K>
where
    S: VenueSnapshotProvider,
    K: CommitSink,
{
    coordinator: ExecutionCoordinator<S, K>,
    snapshots: Arc<S>,
    max_conflict_retries: u32,
}

impl<S, K> ExecutionService<S, K>
where
    S: VenueSnapshotProvider,
    K: CommitSink,
{
    pub fn new(snapshots: Arc<S>, sink: Arc<K>, max_conflict_retries: u32) -> Self {
        Self {
            coordinator: ExecutionCoordinator::new(Arc::clone(&snapshots), sink),
            snapshots,
            max_conflict_retries,
        }
    }

    pub async fn execute(&self, command: ExecuteCommand) -> Result<ExecutionPlan> {
        self.execute_with_cancellation(command, &CancellationToken::new())
            .await
    }

    pub async fn execute_with_cancellation(
        &self,
        command: ExecuteCommand,
        cancel: &CancellationToken,
    ) -> Result<ExecutionPlan> {
        let mut attempt = 0;
        loop {
            match self
                .coordinator
                .execute_with_cancellation(command, cancel)
                .await
            {
                Err(e) if e.is_conflict() && attempt < self.max_conflict_retries => {
                    attempt += 1;
                    warn!(
                        "Commit conflict on {} request, retrying ({}/{})",
                        command.direction, attempt, self.max_conflict_retries
                    );
                }
                outcome => return outcome,
            }
        }
    }

    /// Current venues with balances and resting orders
    pub async fn venues(&self) -> Result<Vec<Venue>> {
        self.snapshots
            .fetch_all_venues()
            .await
            .map_err(ExecutionError::SnapshotFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hermes_core::RestingOrder;
    use hermes_ports::{StoreError, StoreResult};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicU32, Ordering};
    use uuid::Uuid;

    struct OneVenue;

    #[async_trait]
    impl VenueSnapshotProvider for OneVenue {
        async fn fetch_all_venues(&self) -> StoreResult<Vec<Venue>> {
            Ok(vec![
                Venue::new("Exchange1", dec!(100000), dec!(0))
                    .with_ask(RestingOrder::sell(1, dec!(50000), dec!(2))),
            ])
        }
    }

    /// Rejects the first `conflicts` commits with a version conflict
    struct ContendedSink {
        conflicts: u32,
        attempts: AtomicU32,
    }

    #[async_trait]
    impl CommitSink for ContendedSink {
        async fn commit(&self, _venues: Vec<Venue>) -> StoreResult<()> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.conflicts {
                return Err(StoreError::Conflict {
                    venue_id: Uuid::nil(),
                    expected: 0,
                    found: 1,
                });
            }
            Ok(())
        }
    }

    fn service(
        conflicts: u32,
        retries: u32,
    ) -> (ExecutionService<OneVenue, ContendedSink>, Arc<ContendedSink>) {
        let sink = Arc::new(ContendedSink {
            conflicts,
            attempts: AtomicU32::new(0),
        });
        (
            ExecutionService::new(Arc::new(OneVenue), Arc::clone(&sink), retries),
            sink,
        )
    }

    #[tokio::test]
    async fn test_retries_on_conflict() {
        let (service, sink) = service(2, 3);

        let plan = service
            .execute(ExecuteCommand::acquire(dec!(1)))
            .await
            .unwrap();
        assert_eq!(plan.filled(), dec!(1));
        assert_eq!(sink.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_retry_budget() {
        let (service, sink) = service(5, 1);

        let result = service.execute(ExecuteCommand::acquire(dec!(1))).await;
        assert!(result.as_ref().is_err_and(|e| e.is_conflict()));
        assert_eq!(sink.attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let (service, sink) = service(0, 3);

        let result = service.execute(ExecuteCommand::acquire(dec!(3))).await;
        assert!(matches!(
            result,
            Err(ExecutionError::InsufficientLiquidity { .. })
        ));
        assert_eq!(sink.attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_venues_query() {
        let (service, _) = service(0, 0);
        let venues = service.venues().await.unwrap();
        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].asks.len(), 1);
    }
}
