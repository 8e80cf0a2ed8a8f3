//! Transaction primitives.
//!
//! A `Transaction` is one ledger line extracted from a statement, carrying
//! both its current (possibly edited) values and the values as first
//! extracted. `original_description`/`original_amount` are written exactly
//! once, here at creation, and no later operation touches them.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Category, EngineError, MoneyCents, NewTransaction, ReviewStatus};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub statement_id: Uuid,
    pub transaction_date: DateTime<Utc>,
    pub description: String,
    pub original_description: String,
    pub amount: MoneyCents,
    pub original_amount: MoneyCents,
    pub balance: Option<MoneyCents>,
    pub category: Category,
    pub confidence_score: f32,
    pub auto_categorized: bool,
    pub status: ReviewStatus,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Creates a transaction as delivered by the extraction collaborator:
    /// `pending`, auto-categorized, originals equal to the extracted values.
    pub fn extracted(statement_id: Uuid, new: NewTransaction) -> Self {
        Self {
            id: Uuid::new_v4(),
            statement_id,
            transaction_date: new.transaction_date,
            original_description: new.description.clone(),
            description: new.description,
            original_amount: new.amount,
            amount: new.amount,
            balance: new.balance,
            category: new.category,
            confidence_score: new.confidence_score,
            auto_categorized: true,
            status: ReviewStatus::Pending,
            reviewed_at: None,
            edited_at: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub statement_id: String,
    pub transaction_date: DateTimeUtc,
    pub description: String,
    pub original_description: String,
    pub amount_minor: i64,
    pub original_amount_minor: i64,
    pub balance_minor: Option<i64>,
    pub category: String,
    pub confidence_score: f32,
    pub auto_categorized: bool,
    pub status: String,
    pub reviewed_at: Option<DateTimeUtc>,
    pub edited_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::statements::Entity",
        from = "Column::StatementId",
        to = "super::statements::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Statements,
}

impl Related<super::statements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Statements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            statement_id: ActiveValue::Set(tx.statement_id.to_string()),
            transaction_date: ActiveValue::Set(tx.transaction_date),
            description: ActiveValue::Set(tx.description.clone()),
            original_description: ActiveValue::Set(tx.original_description.clone()),
            amount_minor: ActiveValue::Set(tx.amount.cents()),
            original_amount_minor: ActiveValue::Set(tx.original_amount.cents()),
            balance_minor: ActiveValue::Set(tx.balance.map(MoneyCents::cents)),
            category: ActiveValue::Set(tx.category.as_str().to_string()),
            confidence_score: ActiveValue::Set(tx.confidence_score),
            auto_categorized: ActiveValue::Set(tx.auto_categorized),
            status: ActiveValue::Set(tx.status.as_str().to_string()),
            reviewed_at: ActiveValue::Set(tx.reviewed_at),
            edited_at: ActiveValue::Set(tx.edited_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::NotFound("transaction not exists".to_string()))?,
            statement_id: Uuid::parse_str(&model.statement_id)
                .map_err(|_| EngineError::NotFound("statement not exists".to_string()))?,
            transaction_date: model.transaction_date,
            description: model.description,
            original_description: model.original_description,
            amount: MoneyCents::new(model.amount_minor),
            original_amount: MoneyCents::new(model.original_amount_minor),
            balance: model.balance_minor.map(MoneyCents::new),
            category: Category::try_from(model.category.as_str())?,
            confidence_score: model.confidence_score,
            auto_categorized: model.auto_categorized,
            status: ReviewStatus::try_from(model.status.as_str())?,
            reviewed_at: model.reviewed_at,
            edited_at: model.edited_at,
        })
    }
}
