//! Initial schema migration - creates all tables from scratch.
//!
//! The schema covers the review engine's two record kinds:
//!
//! - `statements`: one uploaded bank document and its processing state
//! - `transactions`: extracted ledger lines under review, with the
//!   write-once original values beside the editable ones

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Statements {
    Table,
    Id,
    Filename,
    BankName,
    AccountNumber,
    PeriodStart,
    PeriodEnd,
    UploadedAt,
    ProcessedAt,
    Status,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    StatementId,
    TransactionDate,
    Description,
    OriginalDescription,
    AmountMinor,
    OriginalAmountMinor,
    BalanceMinor,
    Category,
    ConfidenceScore,
    AutoCategorized,
    Status,
    ReviewedAt,
    EditedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Statements
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Statements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Statements::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Statements::Filename).string().not_null())
                    .col(ColumnDef::new(Statements::BankName).string().not_null())
                    .col(ColumnDef::new(Statements::AccountNumber).string())
                    .col(ColumnDef::new(Statements::PeriodStart).timestamp())
                    .col(ColumnDef::new(Statements::PeriodEnd).timestamp())
                    .col(
                        ColumnDef::new(Statements::UploadedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Statements::ProcessedAt).timestamp())
                    .col(
                        ColumnDef::new(Statements::Status)
                            .string()
                            .not_null()
                            .default("processing"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-statements-uploaded_at")
                    .table(Statements::Table)
                    .col(Statements::UploadedAt)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transactions::StatementId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::TransactionDate)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::OriginalDescription)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::OriginalAmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::BalanceMinor).big_integer())
                    .col(ColumnDef::new(Transactions::Category).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::ConfidenceScore)
                            .float()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Transactions::AutoCategorized)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Transactions::ReviewedAt).timestamp())
                    .col(ColumnDef::new(Transactions::EditedAt).timestamp())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-statement_id")
                            .from(Transactions::Table, Transactions::StatementId)
                            .to(Statements::Table, Statements::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-statement_id-transaction_date")
                    .table(Transactions::Table)
                    .col(Transactions::StatementId)
                    .col(Transactions::TransactionDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-transaction_date")
                    .table(Transactions::Table)
                    .col(Transactions::TransactionDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Statements::Table).to_owned())
            .await?;
        Ok(())
    }
}
