//! Derived aggregate views over a transaction set.
//!
//! Everything here is a pure fold over `&[Transaction]`: no side effects, no
//! cache, safe to recompute concurrently with mutations (the result reflects
//! whatever snapshot the caller handed in). All money totals are **signed**:
//! expenses are negative sums and `net = income + expenses` holds exactly.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Category, MoneyCents, ReviewStatus, Transaction};

/// Which transaction set an analytics request covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalyticsScope {
    All,
    Statement(Uuid),
    Month { year: i32, month: u32 },
}

/// Per-category signed total and transaction count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub total: MoneyCents,
    pub count: u64,
}

/// Count per review status; all four keys are always present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub edited: u64,
}

impl StatusBreakdown {
    fn record(&mut self, status: ReviewStatus) {
        match status {
            ReviewStatus::Pending => self.pending += 1,
            ReviewStatus::Approved => self.approved += 1,
            ReviewStatus::Rejected => self.rejected += 1,
            ReviewStatus::Edited => self.edited += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.pending + self.approved + self.rejected + self.edited
    }
}

/// Aggregates over a transaction set, recomputed on demand.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub transaction_count: u64,
    pub total_income: MoneyCents,
    pub total_expenses: MoneyCents,
    pub net_amount: MoneyCents,
    /// Categories with at least one transaction; the map omits the rest.
    pub category_breakdown: BTreeMap<Category, CategoryTotals>,
    pub status_breakdown: StatusBreakdown,
}

impl AnalyticsSnapshot {
    /// Computes the snapshot. An empty set yields all-zero aggregates.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut snapshot = Self::default();
        for tx in transactions {
            snapshot.transaction_count += 1;
            if tx.amount.is_positive() {
                snapshot.total_income += tx.amount;
            } else {
                snapshot.total_expenses += tx.amount;
            }
            let entry = snapshot.category_breakdown.entry(tx.category).or_default();
            entry.total += tx.amount;
            entry.count += 1;
            snapshot.status_breakdown.record(tx.status);
        }
        snapshot.net_amount = snapshot.total_income + snapshot.total_expenses;
        snapshot
    }

    /// The `n` largest categories by signed total, descending; ties broken by
    /// category name ascending so the prefix is deterministic.
    #[must_use]
    pub fn top_categories(&self, n: usize) -> Vec<(Category, CategoryTotals)> {
        let mut ranked: Vec<(Category, CategoryTotals)> = self
            .category_breakdown
            .iter()
            .map(|(category, totals)| (*category, *totals))
            .collect();
        ranked.sort_by(|(a_cat, a), (b_cat, b)| {
            b.total
                .cmp(&a.total)
                .then_with(|| a_cat.as_str().cmp(b_cat.as_str()))
        });
        ranked.truncate(n);
        ranked
    }
}

/// Signed income/expense totals for one calendar day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub income: MoneyCents,
    pub expenses: MoneyCents,
    pub count: u64,
}

/// One month of activity bucketed by calendar day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_income: MoneyCents,
    pub total_expenses: MoneyCents,
    pub net_amount: MoneyCents,
    pub transaction_count: u64,
    /// Keyed by day-of-month (1..=31); days without transactions are absent.
    pub daily_breakdown: BTreeMap<u32, DailyTotals>,
}

impl MonthlySummary {
    /// Buckets an already month-scoped set by the calendar date of
    /// `transaction_date`. Time-of-day never moves a transaction across
    /// days.
    pub fn from_transactions(year: i32, month: u32, transactions: &[Transaction]) -> Self {
        let mut summary = Self {
            year,
            month,
            total_income: MoneyCents::ZERO,
            total_expenses: MoneyCents::ZERO,
            net_amount: MoneyCents::ZERO,
            transaction_count: 0,
            daily_breakdown: BTreeMap::new(),
        };
        for tx in transactions {
            summary.transaction_count += 1;
            let day = tx.transaction_date.date_naive().day();
            let entry = summary.daily_breakdown.entry(day).or_default();
            if tx.amount.is_positive() {
                summary.total_income += tx.amount;
                entry.income += tx.amount;
            } else {
                summary.total_expenses += tx.amount;
                entry.expenses += tx.amount;
            }
            entry.count += 1;
        }
        summary.net_amount = summary.total_income + summary.total_expenses;
        summary
    }
}
