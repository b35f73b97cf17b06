//! Account repository for chart of accounts lookups.
//!
//! The chart is fixed and seeded; there is no create/update surface here.
//! Lookups by code fail loudly when the code is missing.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::accounts;

/// Error types for account lookups.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// The account code does not exist in the chart.
    #[error("Unknown account code: {0}")]
    UnknownCode(String),

    /// The account id does not exist.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an account by its stable code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<accounts::Model>, AccountError> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(account)
    }

    /// Finds an account by code, failing loudly when it is missing.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCode` naming the code when no account exists.
    pub async fn require_by_code(&self, code: &str) -> Result<accounts::Model, AccountError> {
        self.find_by_code(code)
            .await?
            .ok_or_else(|| AccountError::UnknownCode(code.to_string()))
    }

    /// Finds an account by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no account exists.
    pub async fn require_by_id(&self, id: Uuid) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))
    }

    /// Lists active accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_active(&self) -> Result<Vec<accounts::Model>, AccountError> {
        let accounts = accounts::Entity::find()
            .filter(accounts::Column::IsActive.eq(true))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?;
        Ok(accounts)
    }
}
