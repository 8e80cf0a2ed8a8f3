pub use analytics::{
    AnalyticsScope, AnalyticsSnapshot, CategoryTotals, DailyTotals, MonthlySummary,
    StatusBreakdown,
};
pub use categories::Category;
pub use commands::{EditTransactionCmd, IngestStatementCmd, NewTransaction};
pub use error::EngineError;
pub use filter::{
    SortDirection, SortField, TransactionFilter, TransactionSort, filter_and_sort,
};
pub use money::MoneyCents;
pub use ops::{BulkApproveOutcome, BulkFailure, Engine, EngineBuilder};
pub use statements::Statement;
pub use status::{ProcessingStatus, ReviewStatus};
pub use transactions::Transaction;

mod analytics;
mod categories;
mod commands;
mod error;
mod filter;
mod money;
mod ops;
mod statements;
mod status;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
