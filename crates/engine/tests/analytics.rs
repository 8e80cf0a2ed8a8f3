use chrono::{DateTime, TimeZone, Utc};
use sea_orm::Database;
use uuid::Uuid;

use engine::{
    AnalyticsScope, Category, Engine, EngineError, IngestStatementCmd, MoneyCents, NewTransaction,
    Statement,
};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

async fn seed_statement(engine: &Engine, filename: &str) -> Statement {
    engine
        .ingest_statement(IngestStatementCmd::new(
            filename,
            "DBS",
            at(2024, 4, 1, 9),
        ))
        .await
        .unwrap()
}

async fn seed_march(engine: &Engine) -> Statement {
    let statement = seed_statement(engine, "march.pdf").await;
    engine
        .add_transactions(
            statement.id,
            vec![
                NewTransaction::new(at(2024, 3, 1, 9), "Salary", MoneyCents::new(100_00))
                    .category(Category::Income),
                NewTransaction::new(at(2024, 3, 2, 8), "Coffee", MoneyCents::new(-20_00))
                    .category(Category::FoodDining),
                NewTransaction::new(at(2024, 3, 2, 16), "Coffee2", MoneyCents::new(-5_00))
                    .category(Category::FoodDining),
            ],
        )
        .await
        .unwrap();
    statement
}

#[tokio::test]
async fn march_scenario_totals_and_breakdowns() {
    let engine = engine_with_db().await;
    seed_march(&engine).await;

    let snapshot = engine.analytics(AnalyticsScope::All).await.unwrap();
    assert_eq!(snapshot.transaction_count, 3);
    assert_eq!(snapshot.total_income, MoneyCents::new(100_00));
    assert_eq!(snapshot.total_expenses, MoneyCents::new(-25_00));
    assert_eq!(snapshot.net_amount, MoneyCents::new(75_00));

    let food = snapshot.category_breakdown[&Category::FoodDining];
    assert_eq!(food.total, MoneyCents::new(-25_00));
    assert_eq!(food.count, 2);
    // Categories without transactions are absent.
    assert!(!snapshot.category_breakdown.contains_key(&Category::Travel));
    assert_eq!(snapshot.category_breakdown.len(), 2);

    assert_eq!(snapshot.status_breakdown.pending, 3);
    assert_eq!(snapshot.status_breakdown.total(), snapshot.transaction_count);
}

#[tokio::test]
async fn march_daily_breakdown() {
    let engine = engine_with_db().await;
    seed_march(&engine).await;

    let summary = engine.monthly_summary(2024, 3).await.unwrap();
    assert_eq!(summary.total_income, MoneyCents::new(100_00));
    assert_eq!(summary.total_expenses, MoneyCents::new(-25_00));
    assert_eq!(summary.net_amount, MoneyCents::new(75_00));
    assert_eq!(summary.transaction_count, 3);

    let day2 = summary.daily_breakdown[&2];
    assert_eq!(day2.income, MoneyCents::ZERO);
    assert_eq!(day2.expenses, MoneyCents::new(-25_00));
    assert_eq!(day2.count, 2);
}

#[tokio::test]
async fn month_scope_selects_by_calendar_date() {
    let engine = engine_with_db().await;
    let statement = seed_statement(&engine, "spring.pdf").await;
    engine
        .add_transactions(
            statement.id,
            vec![
                // Late evening of Feb 29 must stay in February.
                NewTransaction::new(at(2024, 2, 29, 23), "Rent", MoneyCents::new(-900_00))
                    .category(Category::BillsUtilities),
                NewTransaction::new(at(2024, 3, 1, 0), "Groceries", MoneyCents::new(-45_00))
                    .category(Category::Groceries),
                NewTransaction::new(at(2024, 3, 31, 23), "Dinner", MoneyCents::new(-30_00))
                    .category(Category::FoodDining),
                NewTransaction::new(at(2024, 4, 1, 0), "Fuel", MoneyCents::new(-50_00))
                    .category(Category::Transport),
            ],
        )
        .await
        .unwrap();

    let summary = engine.monthly_summary(2024, 3).await.unwrap();
    assert_eq!(summary.transaction_count, 2);
    assert_eq!(summary.total_expenses, MoneyCents::new(-75_00));
    assert!(summary.daily_breakdown.contains_key(&1));
    assert!(summary.daily_breakdown.contains_key(&31));
}

#[tokio::test]
async fn statement_scope_ignores_other_statements() {
    let engine = engine_with_db().await;
    let march = seed_march(&engine).await;
    let other = seed_statement(&engine, "april.pdf").await;
    engine
        .add_transactions(
            other.id,
            vec![
                NewTransaction::new(at(2024, 4, 2, 9), "Fuel", MoneyCents::new(-60_00))
                    .category(Category::Transport),
            ],
        )
        .await
        .unwrap();

    let snapshot = engine
        .analytics(AnalyticsScope::Statement(march.id))
        .await
        .unwrap();
    assert_eq!(snapshot.transaction_count, 3);
    assert!(!snapshot.category_breakdown.contains_key(&Category::Transport));
}

#[tokio::test]
async fn empty_set_yields_zero_snapshot() {
    let engine = engine_with_db().await;

    let snapshot = engine.analytics(AnalyticsScope::All).await.unwrap();
    assert_eq!(snapshot.transaction_count, 0);
    assert_eq!(snapshot.net_amount, MoneyCents::ZERO);
    assert!(snapshot.category_breakdown.is_empty());
    assert_eq!(snapshot.status_breakdown.total(), 0);

    let summary = engine.monthly_summary(2024, 3).await.unwrap();
    assert_eq!(summary.transaction_count, 0);
    assert!(summary.daily_breakdown.is_empty());
}

#[tokio::test]
async fn status_breakdown_follows_review_activity() {
    let engine = engine_with_db().await;
    let statement = seed_march(&engine).await;
    let listed = engine
        .list_transactions(
            Some(statement.id),
            &engine::TransactionFilter::default(),
            engine::TransactionSort::default(),
        )
        .await
        .unwrap();

    engine
        .approve_transaction(listed[0].id, at(2024, 4, 2, 9))
        .await
        .unwrap();
    engine
        .reject_transaction(listed[1].id, at(2024, 4, 2, 9))
        .await
        .unwrap();

    let snapshot = engine.analytics(AnalyticsScope::All).await.unwrap();
    assert_eq!(snapshot.status_breakdown.approved, 1);
    assert_eq!(snapshot.status_breakdown.rejected, 1);
    assert_eq!(snapshot.status_breakdown.pending, 1);
    assert_eq!(snapshot.status_breakdown.edited, 0);
    assert_eq!(snapshot.status_breakdown.total(), 3);
}

#[tokio::test]
async fn invalid_month_is_rejected() {
    let engine = engine_with_db().await;

    let err = engine.monthly_summary(2024, 0).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation("month must be between 1 and 12".to_string())
    );
    assert!(engine.monthly_summary(2024, 13).await.is_err());
}

#[tokio::test]
async fn unknown_statement_scope_is_not_found() {
    let engine = engine_with_db().await;

    let err = engine
        .analytics(AnalyticsScope::Statement(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("statement not exists".to_string()));
}
