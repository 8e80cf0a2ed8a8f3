use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::EngineError;

use super::Engine;

/// Per-id result of a bulk status transition.
///
/// Never all-or-nothing: one bad id must not block the rest, so failures are
/// collected here instead of aborting the batch.
#[derive(Debug, Default)]
pub struct BulkApproveOutcome {
    pub approved: Vec<Uuid>,
    pub failed: Vec<BulkFailure>,
}

impl BulkApproveOutcome {
    /// `true` when every requested id was approved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug)]
pub struct BulkFailure {
    pub transaction_id: Uuid,
    pub error: EngineError,
}

impl Engine {
    /// Approves every named transaction independently.
    ///
    /// Ids are processed in input order but the transitions are independent
    /// and idempotent, so the final state does not depend on it. Unknown ids
    /// come back as per-id failures.
    pub async fn bulk_approve(
        &self,
        transaction_ids: &[Uuid],
        reviewed_at: DateTime<Utc>,
    ) -> BulkApproveOutcome {
        let mut outcome = BulkApproveOutcome::default();
        for &transaction_id in transaction_ids {
            match self.approve_transaction(transaction_id, reviewed_at).await {
                Ok(_) => outcome.approved.push(transaction_id),
                Err(error) => outcome.failed.push(BulkFailure {
                    transaction_id,
                    error,
                }),
            }
        }
        info!(
            approved = outcome.approved.len(),
            failed = outcome.failed.len(),
            "bulk approve finished"
        );
        outcome
    }
}
