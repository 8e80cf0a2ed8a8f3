//! Statement primitives.
//!
//! A `Statement` is one uploaded bank document: its metadata plus the
//! transactions extracted from it. The engine only uses it as the owning
//! scope of a transaction set; parsing the document happens upstream.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, IngestStatementCmd, ProcessingStatus};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub id: Uuid,
    pub filename: String,
    pub bank_name: String,
    pub account_number: Option<String>,
    pub period_start: Option<DateTime<Utc>>,
    pub period_end: Option<DateTime<Utc>>,
    pub uploaded_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub status: ProcessingStatus,
}

impl Statement {
    /// Creates a freshly uploaded statement, still being processed.
    pub fn new(cmd: IngestStatementCmd) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: cmd.filename,
            bank_name: cmd.bank_name,
            account_number: cmd.account_number,
            period_start: cmd.period_start,
            period_end: cmd.period_end,
            uploaded_at: cmd.uploaded_at,
            processed_at: None,
            status: ProcessingStatus::Processing,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "statements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub filename: String,
    pub bank_name: String,
    pub account_number: Option<String>,
    pub period_start: Option<DateTimeUtc>,
    pub period_end: Option<DateTimeUtc>,
    pub uploaded_at: DateTimeUtc,
    pub processed_at: Option<DateTimeUtc>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Statement> for ActiveModel {
    fn from(statement: &Statement) -> Self {
        Self {
            id: ActiveValue::Set(statement.id.to_string()),
            filename: ActiveValue::Set(statement.filename.clone()),
            bank_name: ActiveValue::Set(statement.bank_name.clone()),
            account_number: ActiveValue::Set(statement.account_number.clone()),
            period_start: ActiveValue::Set(statement.period_start),
            period_end: ActiveValue::Set(statement.period_end),
            uploaded_at: ActiveValue::Set(statement.uploaded_at),
            processed_at: ActiveValue::Set(statement.processed_at),
            status: ActiveValue::Set(statement.status.as_str().to_string()),
        }
    }
}

impl TryFrom<Model> for Statement {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::NotFound("statement not exists".to_string()))?,
            filename: model.filename,
            bank_name: model.bank_name,
            account_number: model.account_number,
            period_start: model.period_start,
            period_end: model.period_end,
            uploaded_at: model.uploaded_at,
            processed_at: model.processed_at,
            status: ProcessingStatus::try_from(model.status.as_str())?,
        })
    }
}
