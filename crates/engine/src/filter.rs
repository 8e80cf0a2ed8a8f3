//! Filtered, sorted views over a transaction set.
//!
//! [`filter_and_sort`] is a pure function: the interactive browsing state
//! (search box, category/status dropdowns, sort toggles) lives with the
//! caller and arrives here as explicit parameters. Composition order is
//! fixed: search, then category, then status, then sort. Ties are always
//! broken by transaction id ascending so repeated calls over the same set
//! return the same order.

use serde::{Deserialize, Serialize};

use crate::{Category, ReviewStatus, Transaction};

/// Filters for browsing a transaction set.
///
/// `None` fields are pass-through ("all"); an empty search string does not
/// narrow either.
#[derive(Clone, Debug, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring match against `description`.
    pub search: Option<String>,
    pub category: Option<Category>,
    pub status: Option<ReviewStatus>,
}

impl TransactionFilter {
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn status(mut self, status: ReviewStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Date,
    Amount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Ordering of a transaction view. Defaults to newest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for TransactionSort {
    fn default() -> Self {
        Self {
            field: SortField::Date,
            direction: SortDirection::Descending,
        }
    }
}

/// Returns a new ordered sequence; the input is not mutated.
pub fn filter_and_sort(
    transactions: &[Transaction],
    filter: &TransactionFilter,
    sort: TransactionSort,
) -> Vec<Transaction> {
    let mut view: Vec<&Transaction> = transactions.iter().collect();

    let needle = filter
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|needle| !needle.is_empty());
    if let Some(needle) = &needle {
        view.retain(|tx| tx.description.to_lowercase().contains(needle));
    }
    if let Some(category) = filter.category {
        view.retain(|tx| tx.category == category);
    }
    if let Some(status) = filter.status {
        view.retain(|tx| tx.status == status);
    }

    view.sort_by(|a, b| {
        let ordering = match sort.field {
            SortField::Date => a.transaction_date.cmp(&b.transaction_date),
            SortField::Amount => a.amount.cmp(&b.amount),
        };
        let ordering = match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    });

    view.into_iter().cloned().collect()
}
