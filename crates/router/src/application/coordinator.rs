use hermes_allocation::AllocationEngine;
use hermes_core::{Direction, ExecutionPlan, Quantity};
use hermes_ports::{CommitSink, VenueSnapshotProvider};
use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::error::{ExecutionError, Result};

/// Request to buy or sell a quantity of the base asset across all venues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteCommand {
    pub quantity: Quantity,
    pub direction: Direction,
}

impl ExecuteCommand {
    pub fn acquire(quantity: Quantity) -> Self {
        Self {
            quantity,
            direction: Direction::Acquire,
        }
    }

    pub fn dispose(quantity: Quantity) -> Self {
        Self {
            quantity,
            direction: Direction::Dispose,
        }
    }
}

/// Fetch snapshot, allocate on a working copy, commit only on full success.
///
/// The coordinator holds no lock and never retries. Callers that may run
/// concurrently must either serialize `execute` or rely on a commit sink
/// that rejects stale snapshots (see `ExecutionService`).
pub struct ExecutionCoordinator<S, K>
where
    S: VenueSnapshotProvider,
    K: CommitSink,
{
    snapshots: Arc<S>,
    sink: Arc<K>,
    engine: AllocationEngine,
}

impl<S, K> ExecutionCoordinator<S, K>
where
    S: VenueSnapshotProvider,
    K: CommitSink,
{
    pub fn new(snapshots: Arc<S>, sink: Arc<K>) -> Self {
        let engine = AllocationEngine::new();
        debug!("Execution coordinator using {} allocation", engine.name());
        Self {
            snapshots,
            sink,
            engine,
        }
    }

    pub async fn execute(&self, command: ExecuteCommand) -> Result<ExecutionPlan> {
        self.execute_with_cancellation(command, &CancellationToken::new())
            .await
    }

    /// Execute unless `cancel` fires before the commit starts.
    ///
    /// Once the commit sink has been invoked the request runs to completion;
    /// a cancellation observed earlier returns `Cancelled` with nothing
    /// persisted.
    pub async fn execute_with_cancellation(
        &self,
        command: ExecuteCommand,
        cancel: &CancellationToken,
    ) -> Result<ExecutionPlan> {
        if command.quantity <= Decimal::ZERO {
            warn!(
                "Rejecting {} request with non-positive amount {}",
                command.direction, command.quantity
            );
            return Err(ExecutionError::InvalidRequest(
                "Amount must be greater than zero.".to_string(),
            ));
        }

        if cancel.is_cancelled() {
            return Err(ExecutionError::Cancelled);
        }

        info!(
            "Executing {} of {} across venues",
            command.direction, command.quantity
        );

        let venues = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Execution cancelled while fetching venues");
                return Err(ExecutionError::Cancelled);
            }
            fetched = self.snapshots.fetch_all_venues() => {
                fetched.map_err(|e| {
                    error!("Snapshot provider failed: {}", e);
                    ExecutionError::SnapshotFailure(e)
                })?
            }
        };

        if venues.is_empty() {
            warn!("No venues available for {} request", command.direction);
            return Err(ExecutionError::NoLiquiditySource);
        }

        let allocation = self
            .engine
            .allocate(&venues, command.quantity, command.direction)
            .map_err(|e| {
                warn!("Allocation rejected: {}", e);
                ExecutionError::from(e)
            })?;

        if cancel.is_cancelled() {
            warn!("Execution cancelled before commit; discarding plan");
            return Err(ExecutionError::Cancelled);
        }

        self.sink.commit(allocation.venues).await.map_err(|e| {
            error!("Commit failed: {}", e);
            ExecutionError::CommitFailure(e)
        })?;

        let plan = allocation.plan;
        info!(
            "Executed {} {} in {} fills, total {}",
            command.direction,
            plan.filled(),
            plan.lines.len(),
            plan.total()
        );

        Ok(plan)
    }
}
