//! Initial database migration.
//!
//! Creates the catalog tables the ledger depends on (users, companies,
//! services), the credit ledger tables, and the trigger that keeps
//! `credit_transactions` append-only. Every statement is safe to re-run.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CATALOG TABLES
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(COMPANIES_SQL).await?;
        db.execute_unprepared(SERVICES_SQL).await?;

        // ============================================================
        // PART 3: CREDIT LEDGER
        // ============================================================
        db.execute_unprepared(COMPANY_CREDITS_SQL).await?;
        db.execute_unprepared(CREDIT_TRANSACTIONS_SQL).await?;

        // ============================================================
        // PART 4: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Credit transaction kinds: earn/bonus add, spend/deduction subtract
DO $$
BEGIN
    CREATE TYPE credit_transaction_type AS ENUM ('earn', 'spend', 'bonus', 'deduction');
EXCEPTION
    WHEN duplicate_object THEN NULL;
END $$;
";

const USERS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    full_name VARCHAR(255),
    password_hash VARCHAR(255) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX IF NOT EXISTS idx_users_email ON users(email) WHERE is_active = true;
";

const COMPANIES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS companies (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL UNIQUE,
    description TEXT,
    owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX IF NOT EXISTS idx_companies_owner ON companies(owner_id);
";

const SERVICES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS services (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    description TEXT,
    price NUMERIC(19, 4),
    category VARCHAR(100),
    status VARCHAR(20) NOT NULL DEFAULT 'active',
    is_promoted BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_service_price_non_negative CHECK (price IS NULL OR price >= 0)
);

CREATE INDEX IF NOT EXISTS idx_services_company ON services(company_id);
CREATE INDEX IF NOT EXISTS idx_services_promoted ON services(is_promoted) WHERE is_promoted = true;
";

const COMPANY_CREDITS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS company_credits (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL UNIQUE REFERENCES companies(id) ON DELETE CASCADE,
    balance NUMERIC(19, 4) NOT NULL DEFAULT 100,
    total_earned NUMERIC(19, 4) NOT NULL DEFAULT 0,
    total_spent NUMERIC(19, 4) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_credit_balance_non_negative CHECK (balance >= 0),
    CONSTRAINT chk_credit_totals_non_negative CHECK (total_earned >= 0 AND total_spent >= 0)
);

CREATE INDEX IF NOT EXISTS idx_company_credits_company ON company_credits(company_id);
";

const CREDIT_TRANSACTIONS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS credit_transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_credit_id UUID NOT NULL REFERENCES company_credits(id) ON DELETE CASCADE,
    type credit_transaction_type NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    description TEXT,
    balance_before NUMERIC(19, 4) NOT NULL,
    balance_after NUMERIC(19, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_credit_amount_positive CHECK (amount > 0),
    CONSTRAINT chk_credit_balance_after_non_negative CHECK (balance_after >= 0),
    CONSTRAINT chk_credit_balance_movement CHECK (
        (type IN ('earn', 'bonus') AND balance_after = balance_before + amount)
        OR (type IN ('spend', 'deduction') AND balance_after = balance_before - amount)
    )
);

CREATE INDEX IF NOT EXISTS idx_credit_transactions_account
    ON credit_transactions(company_credit_id, created_at DESC, id DESC);
CREATE INDEX IF NOT EXISTS idx_credit_transactions_type ON credit_transactions(type);
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: prevent_credit_transaction_update
-- Audit rows are immutable once written. DELETE stays allowed so that
-- removing a company cascades through its ledger.
-- ============================================================
CREATE OR REPLACE FUNCTION prevent_credit_transaction_update()
RETURNS TRIGGER AS $$
BEGIN
    RAISE EXCEPTION 'Credit transactions are immutable. Record a new transaction instead.';
END;
$$ LANGUAGE plpgsql;

DROP TRIGGER IF EXISTS trg_prevent_credit_transaction_update ON credit_transactions;
CREATE TRIGGER trg_prevent_credit_transaction_update
BEFORE UPDATE ON credit_transactions
FOR EACH ROW
EXECUTE FUNCTION prevent_credit_transaction_update();
";

const DROP_ALL_SQL: &str = r"
-- ============================================================
-- DROP ALL: Rollback migration
-- Order matters due to foreign key constraints
-- ============================================================

-- Drop triggers
DROP TRIGGER IF EXISTS trg_prevent_credit_transaction_update ON credit_transactions;

-- Drop functions
DROP FUNCTION IF EXISTS prevent_credit_transaction_update();

-- Drop tables (reverse order of creation)
DROP TABLE IF EXISTS credit_transactions CASCADE;
DROP TABLE IF EXISTS company_credits CASCADE;
DROP TABLE IF EXISTS services CASCADE;
DROP TABLE IF EXISTS companies CASCADE;
DROP TABLE IF EXISTS users CASCADE;

-- Drop enums
DROP TYPE IF EXISTS credit_transaction_type CASCADE;
";
