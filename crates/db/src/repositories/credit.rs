//! Credit repository for the per-company ledger.
//!
//! Every balance change runs in one database transaction that locks the
//! account row (`SELECT ... FOR UPDATE`), updates the balance columns and
//! appends the audit record before committing. No other code writes
//! `company_credits.balance`.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, Statement, TransactionTrait,
    sea_query::OnConflict,
};
use tracing::{info, warn};
use uuid::Uuid;

use bizlink_core::credit::{
    AccountBalance, BalanceSummary, CreditError, CreditOperation, CreditService,
    CreditTransactionType, INITIAL_BALANCE,
};

use crate::entities::{company_credits, credit_transactions};

/// Error types for credit ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum CreditRepositoryError {
    /// Business rule violation.
    #[error(transparent)]
    Credit(#[from] CreditError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Inserts seeded accounts for every company that lacks one.
const BACKFILL_ACCOUNTS_SQL: &str = r"
INSERT INTO company_credits (id, company_id, balance, total_earned, total_spent, created_at, updated_at)
SELECT gen_random_uuid(), c.id, $1, 0, 0, now(), now()
FROM companies c
WHERE NOT EXISTS (
    SELECT 1 FROM company_credits cc WHERE cc.company_id = c.id
)
ON CONFLICT (company_id) DO NOTHING
";

/// Credit repository for ledger accounts and their transactions.
#[derive(Debug, Clone)]
pub struct CreditRepository {
    db: DatabaseConnection,
}

impl CreditRepository {
    /// Creates a new credit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the company's account, creating the seeded account if absent.
    ///
    /// Safe under concurrent first access: all callers get the same row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_or_create_account(
        &self,
        company_id: Uuid,
    ) -> Result<company_credits::Model, CreditRepositoryError> {
        let created = Self::insert_if_missing(&self.db, company_id).await?;
        if created {
            info!(%company_id, balance = %INITIAL_BALANCE, "Created credit account");
        }

        let account = Self::find_account_on(&self.db, company_id)
            .await?
            .ok_or(CreditError::AccountNotFound(company_id))?;

        Ok(account)
    }

    /// Finds the company's account without creating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_account(
        &self,
        company_id: Uuid,
    ) -> Result<Option<company_credits::Model>, DbErr> {
        Self::find_account_on(&self.db, company_id).await
    }

    /// Adds credits to the company's account, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidTransactionType` unless `kind` is `earn`
    /// or `bonus`, `CreditError::InvalidAmount` for a bad amount, or a
    /// database error. Nothing is written on error.
    pub async fn earn(
        &self,
        company_id: Uuid,
        kind: &str,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<company_credits::Model, CreditRepositoryError> {
        let kind = CreditService::validate(CreditOperation::Earn, kind, amount)?;

        let txn = self.db.begin().await?;
        let account = Self::lock_or_create_account(&txn, company_id).await?;
        let updated = Self::apply_in_txn(&txn, account, kind, amount, description).await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Removes credits from the company's account.
    ///
    /// Never creates an account. The account must exist before the request
    /// itself is validated, so a company without one always gets
    /// `AccountNotFound`.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::AccountNotFound` if the company has no account,
    /// `CreditError::InvalidTransactionType` unless `kind` is `spend` or
    /// `deduction`, `CreditError::InvalidAmount` for a bad amount,
    /// `CreditError::InsufficientCredits` if the balance is too low, or a
    /// database error. Nothing is written on error.
    pub async fn spend(
        &self,
        company_id: Uuid,
        kind: &str,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<company_credits::Model, CreditRepositoryError> {
        let txn = self.db.begin().await?;
        let account = Self::lock_account(&txn, company_id)
            .await?
            .ok_or(CreditError::AccountNotFound(company_id))?;

        let kind = CreditService::validate(CreditOperation::Spend, kind, amount)?;
        let updated = Self::apply_in_txn(&txn, account, kind, amount, description).await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Returns the balance summary without creating an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_balance_summary(
        &self,
        company_id: Uuid,
    ) -> Result<BalanceSummary, CreditRepositoryError> {
        let summary = match self.find_account(company_id).await? {
            Some(account) => {
                BalanceSummary::from_account(account.account_balance(), account.updated_at.into())
            }
            None => BalanceSummary::not_yet_created(),
        };

        Ok(summary)
    }

    /// Lists the company's transactions, newest first.
    ///
    /// Returns an empty list if the company has no account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transactions(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<credit_transactions::Model>, CreditRepositoryError> {
        let Some(account) = self.find_account(company_id).await? else {
            return Ok(Vec::new());
        };

        let transactions = credit_transactions::Entity::find()
            .filter(credit_transactions::Column::CompanyCreditId.eq(account.id))
            .order_by_desc(credit_transactions::Column::CreatedAt)
            .order_by_desc(credit_transactions::Column::Id)
            .all(&self.db)
            .await?;

        Ok(transactions)
    }

    /// Creates seeded accounts for every company that has none.
    ///
    /// Returns the number of accounts created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database statement fails.
    pub async fn initialize_missing_accounts(&self) -> Result<u64, CreditRepositoryError> {
        let backend = self.db.get_database_backend();
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                backend,
                BACKFILL_ACCOUNTS_SQL,
                [INITIAL_BALANCE.into()],
            ))
            .await?;

        let created = result.rows_affected();
        info!(created, "Initialized missing credit accounts");
        Ok(created)
    }

    // ========================================================================
    // In-transaction building blocks (shared with promotion settlement)
    // ========================================================================

    /// Locks the company's account inside `txn`, creating it first if absent.
    pub(crate) async fn lock_or_create_account(
        txn: &DatabaseTransaction,
        company_id: Uuid,
    ) -> Result<company_credits::Model, CreditRepositoryError> {
        if Self::insert_if_missing(txn, company_id).await? {
            info!(%company_id, balance = %INITIAL_BALANCE, "Created credit account");
        }

        let account = Self::lock_account(txn, company_id)
            .await?
            .ok_or(CreditError::AccountNotFound(company_id))?;

        Ok(account)
    }

    /// Locks the company's account inside `txn`.
    pub(crate) async fn lock_account(
        txn: &DatabaseTransaction,
        company_id: Uuid,
    ) -> Result<Option<company_credits::Model>, DbErr> {
        company_credits::Entity::find()
            .filter(company_credits::Column::CompanyId.eq(company_id))
            .lock_exclusive()
            .one(txn)
            .await
    }

    /// Applies one validated mutation to a locked account.
    ///
    /// Updates the balance columns and appends the audit record in `txn`.
    /// The caller commits.
    pub(crate) async fn apply_in_txn(
        txn: &DatabaseTransaction,
        account: company_credits::Model,
        kind: CreditTransactionType,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<company_credits::Model, CreditRepositoryError> {
        let company_id = account.company_id;
        let mutation = match CreditService::apply(account.account_balance(), kind, amount) {
            Ok(mutation) => mutation,
            Err(e) => {
                warn!(%company_id, %kind, %amount, balance = %account.balance, error = %e, "Credit mutation rejected");
                return Err(e.into());
            }
        };

        let now = Utc::now().into();
        let account_id = account.id;

        let mut active: company_credits::ActiveModel = account.into();
        let AccountBalance {
            balance,
            total_earned,
            total_spent,
        } = mutation.new_state;
        active.balance = Set(balance);
        active.total_earned = Set(total_earned);
        active.total_spent = Set(total_spent);
        active.updated_at = Set(now);
        let updated = active.update(txn).await?;

        let record = credit_transactions::ActiveModel {
            id: Set(Uuid::now_v7()),
            company_credit_id: Set(account_id),
            transaction_type: Set(kind.into()),
            amount: Set(mutation.amount),
            description: Set(description),
            balance_before: Set(mutation.balance_before),
            balance_after: Set(mutation.balance_after),
            created_at: Set(now),
        };
        record.insert(txn).await?;

        info!(
            %company_id,
            %kind,
            %amount,
            balance_before = %mutation.balance_before,
            balance_after = %mutation.balance_after,
            "Credit transaction recorded"
        );

        Ok(updated)
    }

    /// Inserts the seeded account unless one exists. Returns true if inserted.
    async fn insert_if_missing<C: ConnectionTrait>(
        conn: &C,
        company_id: Uuid,
    ) -> Result<bool, DbErr> {
        let now = Utc::now().into();
        let account = company_credits::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            balance: Set(INITIAL_BALANCE),
            total_earned: Set(Decimal::ZERO),
            total_spent: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = company_credits::Entity::insert(account)
            .on_conflict(
                OnConflict::column(company_credits::Column::CompanyId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;

        Ok(inserted > 0)
    }

    async fn find_account_on<C: ConnectionTrait>(
        conn: &C,
        company_id: Uuid,
    ) -> Result<Option<company_credits::Model>, DbErr> {
        company_credits::Entity::find()
            .filter(company_credits::Column::CompanyId.eq(company_id))
            .one(conn)
            .await
    }
}
