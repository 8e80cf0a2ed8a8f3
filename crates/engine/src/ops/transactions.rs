use base64::Engine as _;
use chrono::{DateTime, Utc};
use sea_orm::{Condition, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Transaction, TransactionFilter, TransactionSort, filter_and_sort,
    transactions,
};

use super::{Engine, with_tx};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct TransactionsCursor {
    transaction_date: DateTime<Utc>,
    transaction_id: String,
}

impl TransactionsCursor {
    fn encode(&self) -> ResultEngine<String> {
        let bytes = serde_json::to_vec(self)
            .map_err(|_| EngineError::InvalidCursor("invalid transactions cursor".to_string()))?;
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    fn decode(input: &str) -> ResultEngine<Self> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(input.as_bytes())
            .map_err(|_| EngineError::InvalidCursor("invalid transactions cursor".to_string()))?;
        serde_json::from_slice::<Self>(&bytes)
            .map_err(|_| EngineError::InvalidCursor("invalid transactions cursor".to_string()))
    }
}

impl Engine {
    /// Returns a single transaction.
    pub async fn transaction(&self, transaction_id: Uuid) -> ResultEngine<Transaction> {
        let model = transactions::Entity::find_by_id(transaction_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("transaction not exists".to_string()))?;
        Transaction::try_from(model)
    }

    /// Returns a filtered, sorted view for interactive browsing.
    ///
    /// `statement_id = None` browses across all statements. Scoping is
    /// pushed into the query; search/category/status narrowing and ordering
    /// are the fixed [`filter_and_sort`] composition over the loaded set.
    pub async fn list_transactions(
        &self,
        statement_id: Option<Uuid>,
        filter: &TransactionFilter,
        sort: TransactionSort,
    ) -> ResultEngine<Vec<Transaction>> {
        let set = with_tx!(self, |db_tx| {
            if let Some(statement_id) = statement_id {
                self.require_statement(&db_tx, statement_id).await?;
            }

            let mut query = transactions::Entity::find();
            if let Some(statement_id) = statement_id {
                query = query
                    .filter(transactions::Column::StatementId.eq(statement_id.to_string()));
            }
            let rows = query.all(&db_tx).await?;

            let mut set = Vec::with_capacity(rows.len());
            for model in rows {
                set.push(Transaction::try_from(model)?);
            }
            Ok(set)
        })?;

        Ok(filter_and_sort(&set, filter, sort))
    }

    /// Lists transactions newest → oldest with cursor-based pagination.
    ///
    /// Pagination order is `(transaction_date DESC, id ASC)`; the id
    /// tie-break keeps pages reproducible when many lines share a date.
    pub async fn list_transactions_page(
        &self,
        statement_id: Option<Uuid>,
        limit: u64,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<Transaction>, Option<String>)> {
        with_tx!(self, |db_tx| {
            if let Some(statement_id) = statement_id {
                self.require_statement(&db_tx, statement_id).await?;
            }

            let limit_plus_one = limit.saturating_add(1);
            let mut query = transactions::Entity::find()
                .order_by_desc(transactions::Column::TransactionDate)
                .order_by_asc(transactions::Column::Id)
                .limit(limit_plus_one);

            if let Some(statement_id) = statement_id {
                query = query
                    .filter(transactions::Column::StatementId.eq(statement_id.to_string()));
            }
            if let Some(cursor) = cursor {
                let cursor = TransactionsCursor::decode(cursor)?;
                query = query.filter(
                    Condition::any()
                        .add(transactions::Column::TransactionDate.lt(cursor.transaction_date))
                        .add(
                            Condition::all()
                                .add(
                                    transactions::Column::TransactionDate
                                        .eq(cursor.transaction_date),
                                )
                                .add(transactions::Column::Id.gt(cursor.transaction_id)),
                        ),
                );
            }

            let rows: Vec<transactions::Model> = query.all(&db_tx).await?;
            let has_more = rows.len() > limit as usize;

            let mut out: Vec<Transaction> = Vec::with_capacity(rows.len().min(limit as usize));
            for model in rows.into_iter().take(limit as usize) {
                out.push(Transaction::try_from(model)?);
            }

            let next_cursor = out.last().map(|tx| TransactionsCursor {
                transaction_date: tx.transaction_date,
                transaction_id: tx.id.to_string(),
            });
            let next_cursor = if has_more {
                next_cursor.map(|c| c.encode()).transpose()?
            } else {
                None
            };

            Ok((out, next_cursor))
        })
    }
}
