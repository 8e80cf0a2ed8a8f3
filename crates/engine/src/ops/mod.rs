use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

mod analytics;
mod bulk;
mod review;
mod statements;
mod transactions;

pub use bulk::{BulkApproveOutcome, BulkFailure};

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result: $crate::ResultEngine<_> = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    async fn require_statement(
        &self,
        db_tx: &DatabaseTransaction,
        statement_id: Uuid,
    ) -> ResultEngine<crate::statements::Model> {
        crate::statements::Entity::find_by_id(statement_id.to_string())
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::NotFound("statement not exists".to_string()))
    }

    async fn require_transaction(
        &self,
        db_tx: &DatabaseTransaction,
        transaction_id: Uuid,
    ) -> ResultEngine<crate::transactions::Model> {
        crate::transactions::Entity::find_by_id(transaction_id.to_string())
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::NotFound("transaction not exists".to_string()))
    }
}

/// Maps a lost read-modify-write race to [`EngineError::Conflict`].
///
/// Inside an op the row was just read, so an update matching zero rows means
/// a concurrent writer removed it between the read and the write.
fn conflict_on_lost_row(err: DbErr) -> EngineError {
    match err {
        DbErr::RecordNotUpdated => {
            EngineError::Conflict("record changed during write".to_string())
        }
        other => EngineError::Database(other),
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
