use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    EngineError, IngestStatementCmd, NewTransaction, ProcessingStatus, ResultEngine, Statement,
    Transaction, statements, transactions,
};

use super::{Engine, conflict_on_lost_row, with_tx};

impl Engine {
    /// Registers a freshly uploaded statement in `processing` state.
    pub async fn ingest_statement(&self, cmd: IngestStatementCmd) -> ResultEngine<Statement> {
        let statement = Statement::new(cmd);
        with_tx!(self, |db_tx| {
            statements::ActiveModel::from(&statement)
                .insert(&db_tx)
                .await?;
            Ok(())
        })?;
        info!(statement_id = %statement.id, bank = %statement.bank_name, "statement ingested");
        Ok(statement)
    }

    /// Inserts extracted ledger lines under a statement.
    ///
    /// Every record starts `pending` and auto-categorized, with
    /// `original_description`/`original_amount` set to the extracted values.
    pub async fn add_transactions(
        &self,
        statement_id: Uuid,
        lines: Vec<NewTransaction>,
    ) -> ResultEngine<Vec<Transaction>> {
        let created = with_tx!(self, |db_tx| {
            self.require_statement(&db_tx, statement_id).await?;
            let mut created = Vec::with_capacity(lines.len());
            for line in lines {
                let tx = Transaction::extracted(statement_id, line);
                transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
                created.push(tx);
            }
            Ok(created)
        })?;
        info!(statement_id = %statement_id, count = created.len(), "transactions ingested");
        Ok(created)
    }

    /// Marks a statement as fully processed.
    pub async fn complete_statement(
        &self,
        statement_id: Uuid,
        processed_at: DateTime<Utc>,
    ) -> ResultEngine<Statement> {
        self.set_processing_status(statement_id, ProcessingStatus::Completed, Some(processed_at))
            .await
    }

    /// Marks a statement as failed during processing.
    pub async fn fail_statement(&self, statement_id: Uuid) -> ResultEngine<Statement> {
        self.set_processing_status(statement_id, ProcessingStatus::Failed, None)
            .await
    }

    async fn set_processing_status(
        &self,
        statement_id: Uuid,
        status: ProcessingStatus,
        processed_at: Option<DateTime<Utc>>,
    ) -> ResultEngine<Statement> {
        let updated = with_tx!(self, |db_tx| {
            let model = self.require_statement(&db_tx, statement_id).await?;
            let active = statements::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                status: ActiveValue::Set(status.as_str().to_string()),
                processed_at: ActiveValue::Set(processed_at),
                ..Default::default()
            };
            let model = active.update(&db_tx).await.map_err(conflict_on_lost_row)?;
            Statement::try_from(model)
        })?;
        info!(statement_id = %statement_id, status = status.as_str(), "statement processing finished");
        Ok(updated)
    }

    /// Returns a single statement.
    pub async fn statement(&self, statement_id: Uuid) -> ResultEngine<Statement> {
        let model = statements::Entity::find_by_id(statement_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("statement not exists".to_string()))?;
        Statement::try_from(model)
    }

    /// Lists statements, newest upload first.
    pub async fn list_statements(&self) -> ResultEngine<Vec<Statement>> {
        let rows = statements::Entity::find()
            .order_by_desc(statements::Column::UploadedAt)
            .order_by_asc(statements::Column::Id)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for model in rows {
            out.push(Statement::try_from(model)?);
        }
        Ok(out)
    }

    /// Deletes a statement; its transactions go with it (FK cascade).
    pub async fn delete_statement(&self, statement_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let result = statements::Entity::delete_by_id(statement_id.to_string())
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                return Err(EngineError::NotFound("statement not exists".to_string()));
            }
            Ok(())
        })?;
        info!(statement_id = %statement_id, "statement deleted");
        Ok(())
    }
}
