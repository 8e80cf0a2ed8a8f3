//! Command structs for engine operations.
//!
//! These types group parameters for write operations (ingest/edit), keeping
//! call sites readable and avoiding long argument lists.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Category, MoneyCents};

/// Register a newly uploaded statement.
#[derive(Clone, Debug)]
pub struct IngestStatementCmd {
    pub filename: String,
    pub bank_name: String,
    pub account_number: Option<String>,
    pub period_start: Option<DateTime<Utc>>,
    pub period_end: Option<DateTime<Utc>>,
    pub uploaded_at: DateTime<Utc>,
}

impl IngestStatementCmd {
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        bank_name: impl Into<String>,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            filename: filename.into(),
            bank_name: bank_name.into(),
            account_number: None,
            period_start: None,
            period_end: None,
            uploaded_at,
        }
    }

    #[must_use]
    pub fn account_number(mut self, account_number: impl Into<String>) -> Self {
        self.account_number = Some(account_number.into());
        self
    }

    #[must_use]
    pub fn period(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.period_start = Some(start);
        self.period_end = Some(end);
        self
    }
}

/// One extracted ledger line, as delivered by the extraction collaborator.
///
/// The engine copies `description`/`amount` into the write-once
/// `original_*` fields at creation.
#[derive(Clone, Debug)]
pub struct NewTransaction {
    pub transaction_date: DateTime<Utc>,
    pub description: String,
    pub amount: MoneyCents,
    pub balance: Option<MoneyCents>,
    pub category: Category,
    pub confidence_score: f32,
}

impl NewTransaction {
    #[must_use]
    pub fn new(
        transaction_date: DateTime<Utc>,
        description: impl Into<String>,
        amount: MoneyCents,
    ) -> Self {
        Self {
            transaction_date,
            description: description.into(),
            amount,
            balance: None,
            category: Category::Other,
            confidence_score: 0.0,
        }
    }

    #[must_use]
    pub fn balance(mut self, balance: MoneyCents) -> Self {
        self.balance = Some(balance);
        self
    }

    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn confidence_score(mut self, confidence_score: f32) -> Self {
        self.confidence_score = confidence_score;
        self
    }
}

/// Correct a transaction under review.
///
/// Only the supplied fields are applied. `category` is passed as the wire
/// string and validated against the fixed enumeration inside the op.
#[derive(Clone, Debug)]
pub struct EditTransactionCmd {
    pub transaction_id: Uuid,
    pub description: Option<String>,
    pub amount: Option<MoneyCents>,
    pub category: Option<String>,
    pub edited_at: DateTime<Utc>,
}

impl EditTransactionCmd {
    #[must_use]
    pub fn new(transaction_id: Uuid, edited_at: DateTime<Utc>) -> Self {
        Self {
            transaction_id,
            description: None,
            amount: None,
            category: None,
            edited_at,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: MoneyCents) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
