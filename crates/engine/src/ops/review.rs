use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};
use tracing::debug;
use uuid::Uuid;

use crate::{Category, EditTransactionCmd, ResultEngine, ReviewStatus, Transaction, transactions};

use super::{Engine, conflict_on_lost_row, with_tx};

impl Engine {
    /// Approves a transaction, from any state.
    ///
    /// Sets `reviewed_at`. Approving an already-approved transaction is a
    /// no-op success.
    pub async fn approve_transaction(
        &self,
        transaction_id: Uuid,
        reviewed_at: DateTime<Utc>,
    ) -> ResultEngine<Transaction> {
        self.set_review_status(transaction_id, ReviewStatus::Approved, reviewed_at)
            .await
    }

    /// Rejects a transaction, from any state. Idempotent like approval.
    pub async fn reject_transaction(
        &self,
        transaction_id: Uuid,
        reviewed_at: DateTime<Utc>,
    ) -> ResultEngine<Transaction> {
        self.set_review_status(transaction_id, ReviewStatus::Rejected, reviewed_at)
            .await
    }

    async fn set_review_status(
        &self,
        transaction_id: Uuid,
        status: ReviewStatus,
        reviewed_at: DateTime<Utc>,
    ) -> ResultEngine<Transaction> {
        let updated = with_tx!(self, |db_tx| {
            let model = self.require_transaction(&db_tx, transaction_id).await?;
            if model.status == status.as_str() {
                // Already there; repeating the transition must not change
                // observable state.
                return Transaction::try_from(model);
            }

            let active = transactions::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                status: ActiveValue::Set(status.as_str().to_string()),
                reviewed_at: ActiveValue::Set(Some(reviewed_at)),
                ..Default::default()
            };
            let model = active.update(&db_tx).await.map_err(conflict_on_lost_row)?;
            Transaction::try_from(model)
        })?;
        debug!(transaction_id = %transaction_id, status = status.as_str(), "review status set");
        Ok(updated)
    }

    /// Applies a correction to a transaction, from any state.
    ///
    /// Only the supplied fields change; `original_description` and
    /// `original_amount` keep the values captured at extraction. Sets
    /// `status = edited` and `edited_at`, and drops `auto_categorized` iff
    /// the edit supplied a category. Validation happens before any write.
    pub async fn edit_transaction(&self, cmd: EditTransactionCmd) -> ResultEngine<Transaction> {
        let category = cmd
            .category
            .as_deref()
            .map(Category::try_from)
            .transpose()?;

        let updated = with_tx!(self, |db_tx| {
            let model = self.require_transaction(&db_tx, cmd.transaction_id).await?;

            let mut active = transactions::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                status: ActiveValue::Set(ReviewStatus::Edited.as_str().to_string()),
                edited_at: ActiveValue::Set(Some(cmd.edited_at)),
                ..Default::default()
            };
            if let Some(description) = &cmd.description {
                active.description = ActiveValue::Set(description.clone());
            }
            if let Some(amount) = cmd.amount {
                active.amount_minor = ActiveValue::Set(amount.cents());
            }
            if let Some(category) = category {
                active.category = ActiveValue::Set(category.as_str().to_string());
                active.auto_categorized = ActiveValue::Set(false);
            }

            let model = active.update(&db_tx).await.map_err(conflict_on_lost_row)?;
            Transaction::try_from(model)
        })?;
        debug!(transaction_id = %cmd.transaction_id, "transaction edited");
        Ok(updated)
    }
}
