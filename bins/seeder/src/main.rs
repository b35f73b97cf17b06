//! Database seeder for Tillbook.
//!
//! Seeds the fixed chart of accounts (identified by stable codes - the
//! posting call sites depend on these) and the default payment method
//! mappings. Idempotent: existing rows are left alone.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tillbook_core::account::{codes, AccountSubtype, AccountType};
use tillbook_db::entities::{accounts, payment_method_accounts};
use tillbook_shared::{AppConfig, AppError, AppResult};
use tracing::info;
use uuid::Uuid;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("seeder failed [{}]: {err}", err.error_code());
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    // TILLBOOK__DATABASE__URL (or config file), with the plain DATABASE_URL
    // environment variable as a fallback.
    let database_url = match AppConfig::load() {
        Ok(config) => config.database.url,
        Err(_) => std::env::var("DATABASE_URL").map_err(|_| {
            AppError::Configuration(
                "set TILLBOOK__DATABASE__URL or DATABASE_URL".to_string(),
            )
        })?,
    };

    info!("connecting to database");
    let db = tillbook_db::connect(&database_url)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    info!("seeding chart of accounts");
    seed_accounts(&db).await?;

    info!("seeding payment method mappings");
    seed_method_mappings(&db).await?;

    info!("seeding complete");
    Ok(())
}

/// The fixed chart. Codes are a public contract; see
/// `tillbook_core::account::codes`.
fn chart() -> Vec<(&'static str, &'static str, AccountType, Option<AccountSubtype>)> {
    vec![
        (
            codes::CASH_IN_HAND,
            "Cash in Hand",
            AccountType::Asset,
            Some(AccountSubtype::CashAndBank),
        ),
        (
            codes::BANK,
            "Bank Account",
            AccountType::Asset,
            Some(AccountSubtype::CashAndBank),
        ),
        (
            codes::ACCOUNTS_RECEIVABLE,
            "Accounts Receivable",
            AccountType::Asset,
            None,
        ),
        (codes::INVENTORY, "Inventory", AccountType::Asset, None),
        (codes::VAT_INPUT, "Input VAT", AccountType::Asset, None),
        (
            codes::ACCOUNTS_PAYABLE,
            "Accounts Payable",
            AccountType::Liability,
            None,
        ),
        (codes::VAT_OUTPUT, "Output VAT", AccountType::Liability, None),
        (codes::OWNER_EQUITY, "Owner Equity", AccountType::Equity, None),
        (codes::SALES_REVENUE, "Sales Revenue", AccountType::Income, None),
        (codes::OTHER_INCOME, "Other Income", AccountType::Income, None),
        (
            codes::COGS,
            "Cost of Goods Sold",
            AccountType::Expense,
            Some(AccountSubtype::CostOfGoodsSold),
        ),
        (
            codes::PURCHASE_PRICE_VARIANCE,
            "Purchase Price Variance",
            AccountType::Expense,
            None,
        ),
        (
            codes::OPERATING_EXPENSE,
            "Operating Expense",
            AccountType::Expense,
            Some(AccountSubtype::OperatingExpense),
        ),
    ]
}

async fn seed_accounts(db: &DatabaseConnection) -> AppResult<()> {
    let now = Utc::now();

    for (code, name, account_type, account_subtype) in chart() {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if existing.is_some() {
            info!(code, "account already exists, skipping");
            continue;
        }

        let account = accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            account_type: Set(account_type.into()),
            account_subtype: Set(account_subtype.map(Into::into)),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        account
            .insert(db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!(code, name, "account seeded");
    }

    Ok(())
}

/// Global (all-branch) defaults: cash -> cash in hand, everything else ->
/// the bank account. Operators add branch-specific rows on top.
async fn seed_method_mappings(db: &DatabaseConnection) -> AppResult<()> {
    let mappings = [
        ("cash", codes::CASH_IN_HAND),
        ("card", codes::BANK),
        ("bank_transfer", codes::BANK),
        ("mobile", codes::BANK),
    ];

    for (method, account_code) in mappings {
        let existing = payment_method_accounts::Entity::find()
            .filter(payment_method_accounts::Column::Method.eq(method))
            .filter(payment_method_accounts::Column::BranchId.is_null())
            .one(db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if existing.is_some() {
            info!(method, "mapping already exists, skipping");
            continue;
        }

        let account = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(account_code))
            .one(db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "account {account_code} must be seeded before method mappings"
                ))
            })?;

        let mapping = payment_method_accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            method: Set(method.to_string()),
            branch_id: Set(None),
            account_id: Set(account.id),
            created_at: Set(Utc::now().into()),
        };
        mapping
            .insert(db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!(method, account_code, "mapping seeded");
    }

    Ok(())
}
