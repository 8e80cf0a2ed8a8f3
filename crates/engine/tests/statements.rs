use chrono::{DateTime, TimeZone, Utc};
use sea_orm::Database;
use uuid::Uuid;

use engine::{
    AnalyticsScope, Category, Engine, EngineError, IngestStatementCmd, MoneyCents, NewTransaction,
    ProcessingStatus,
};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).unwrap()
}

#[tokio::test]
async fn ingest_creates_processing_statement() {
    let engine = engine_with_db().await;

    let statement = engine
        .ingest_statement(
            IngestStatementCmd::new("march.pdf", "DBS", at(4, 1, 9))
                .account_number("123-456789-0")
                .period(at(3, 1, 0), at(3, 31, 0)),
        )
        .await
        .unwrap();

    assert_eq!(statement.status, ProcessingStatus::Processing);
    assert_eq!(statement.processed_at, None);

    let fetched = engine.statement(statement.id).await.unwrap();
    assert_eq!(fetched, statement);
}

#[tokio::test]
async fn processing_outcome_transitions() {
    let engine = engine_with_db().await;
    let statement = engine
        .ingest_statement(IngestStatementCmd::new("march.pdf", "DBS", at(4, 1, 9)))
        .await
        .unwrap();

    let completed = engine
        .complete_statement(statement.id, at(4, 1, 10))
        .await
        .unwrap();
    assert_eq!(completed.status, ProcessingStatus::Completed);
    assert_eq!(completed.processed_at, Some(at(4, 1, 10)));

    let failed_upload = engine
        .ingest_statement(IngestStatementCmd::new("broken.pdf", "GXS", at(4, 1, 11)))
        .await
        .unwrap();
    let failed = engine.fail_statement(failed_upload.id).await.unwrap();
    assert_eq!(failed.status, ProcessingStatus::Failed);
    assert_eq!(failed.processed_at, None);
}

#[tokio::test]
async fn list_statements_newest_upload_first() {
    let engine = engine_with_db().await;
    engine
        .ingest_statement(IngestStatementCmd::new("feb.pdf", "DBS", at(3, 1, 9)))
        .await
        .unwrap();
    engine
        .ingest_statement(IngestStatementCmd::new("march.pdf", "DBS", at(4, 1, 9)))
        .await
        .unwrap();

    let listed = engine.list_statements().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].filename, "march.pdf");
    assert_eq!(listed[1].filename, "feb.pdf");
}

#[tokio::test]
async fn adding_lines_to_unknown_statement_fails() {
    let engine = engine_with_db().await;

    let err = engine
        .add_transactions(
            Uuid::new_v4(),
            vec![NewTransaction::new(
                at(3, 2, 10),
                "COFFEE",
                MoneyCents::new(-450),
            )],
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("statement not exists".to_string()));
}

#[tokio::test]
async fn delete_statement_cascades_to_transactions() {
    let engine = engine_with_db().await;
    let statement = engine
        .ingest_statement(IngestStatementCmd::new("march.pdf", "DBS", at(4, 1, 9)))
        .await
        .unwrap();
    let created = engine
        .add_transactions(
            statement.id,
            vec![
                NewTransaction::new(at(3, 2, 10), "COFFEE", MoneyCents::new(-450))
                    .category(Category::FoodDining),
                NewTransaction::new(at(3, 3, 10), "Salary", MoneyCents::new(5_000_00))
                    .category(Category::Income),
            ],
        )
        .await
        .unwrap();

    engine.delete_statement(statement.id).await.unwrap();

    let err = engine.statement(statement.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("statement not exists".to_string()));
    for tx in created {
        let err = engine.transaction(tx.id).await.unwrap_err();
        assert_eq!(err, EngineError::NotFound("transaction not exists".to_string()));
    }

    let snapshot = engine.analytics(AnalyticsScope::All).await.unwrap();
    assert_eq!(snapshot.transaction_count, 0);
}

#[tokio::test]
async fn delete_unknown_statement_is_not_found() {
    let engine = engine_with_db().await;

    let err = engine.delete_statement(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("statement not exists".to_string()));
}
