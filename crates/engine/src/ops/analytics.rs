use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{QueryFilter, TransactionTrait, prelude::*};

use crate::{
    AnalyticsScope, AnalyticsSnapshot, EngineError, MonthlySummary, ResultEngine, Transaction,
    transactions,
};

use super::{Engine, with_tx};

impl Engine {
    /// Computes aggregates over the scoped transaction set.
    ///
    /// The set is read in one DB transaction, so the snapshot is consistent
    /// at the instant of the read; it is never cached.
    pub async fn analytics(&self, scope: AnalyticsScope) -> ResultEngine<AnalyticsSnapshot> {
        let set = self.scoped_transactions(scope).await?;
        Ok(AnalyticsSnapshot::from_transactions(&set))
    }

    /// Computes one month of activity bucketed by calendar day.
    pub async fn monthly_summary(&self, year: i32, month: u32) -> ResultEngine<MonthlySummary> {
        let set = self
            .scoped_transactions(AnalyticsScope::Month { year, month })
            .await?;
        Ok(MonthlySummary::from_transactions(year, month, &set))
    }

    async fn scoped_transactions(&self, scope: AnalyticsScope) -> ResultEngine<Vec<Transaction>> {
        with_tx!(self, |db_tx| {
            let mut query = transactions::Entity::find();
            match scope {
                AnalyticsScope::All => {}
                AnalyticsScope::Statement(statement_id) => {
                    self.require_statement(&db_tx, statement_id).await?;
                    query = query
                        .filter(transactions::Column::StatementId.eq(statement_id.to_string()));
                }
                AnalyticsScope::Month { year, month } => {
                    let (from, to) = month_bounds(year, month)?;
                    query = query
                        .filter(transactions::Column::TransactionDate.gte(from))
                        .filter(transactions::Column::TransactionDate.lt(to));
                }
            }

            let rows = query.all(&db_tx).await?;
            let mut set = Vec::with_capacity(rows.len());
            for model in rows {
                set.push(Transaction::try_from(model)?);
            }
            Ok(set)
        })
    }
}

/// Half-open UTC range `[first of month, first of next month)`.
///
/// Comparing against this range selects by calendar date, so a line stamped
/// late in the evening stays in its own month.
fn month_bounds(year: i32, month: u32) -> ResultEngine<(DateTime<Utc>, DateTime<Utc>)> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::Validation(
            "month must be between 1 and 12".to_string(),
        ));
    }
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| EngineError::Validation(format!("invalid month: {year}-{month:02}")))?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| EngineError::Validation(format!("invalid month: {year}-{month:02}")))?;

    Ok((
        start.and_time(NaiveTime::MIN).and_utc(),
        end.and_time(NaiveTime::MIN).and_utc(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_are_half_open() {
        let (from, to) = month_bounds(2024, 3).unwrap();
        assert_eq!(from.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert_eq!(to.to_rfc3339(), "2024-04-01T00:00:00+00:00");
    }

    #[test]
    fn december_rolls_into_next_year() {
        let (_, to) = month_bounds(2023, 12).unwrap();
        assert_eq!(to.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert!(month_bounds(2024, 0).is_err());
        assert!(month_bounds(2024, 13).is_err());
    }
}
