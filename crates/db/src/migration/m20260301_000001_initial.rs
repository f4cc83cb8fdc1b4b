//! Initial database migration.
//!
//! Creates the enums and tables for the accounting schema: organizations,
//! chart of accounts, journal entries and sequences, category mapping
//! overrides, and the business objects that trigger automatic posting.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(ORGANIZATIONS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(JOURNAL_SQL).await?;
        db.execute_unprepared(CATEGORY_MAPPINGS_SQL).await?;
        db.execute_unprepared(BILLS_SQL).await?;
        db.execute_unprepared(PAYMENTS_SQL).await?;
        db.execute_unprepared(TREASURY_SQL).await?;
        db.execute_unprepared(PAYROLLS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r"
            DROP TABLE IF EXISTS payrolls CASCADE;
            DROP TABLE IF EXISTS cash_transactions CASCADE;
            DROP TABLE IF EXISTS payments CASCADE;
            DROP TABLE IF EXISTS bill_payments CASCADE;
            DROP TABLE IF EXISTS bill_rubros CASCADE;
            DROP TABLE IF EXISTS bills CASCADE;
            DROP TABLE IF EXISTS category_mappings CASCADE;
            DROP TABLE IF EXISTS journal_sequences CASCADE;
            DROP TABLE IF EXISTS journal_entries CASCADE;
            DROP TABLE IF EXISTS accounts CASCADE;
            DROP TABLE IF EXISTS organizations CASCADE;
            DROP TYPE IF EXISTS counterparty_type;
            DROP TYPE IF EXISTS cash_transaction_type;
            DROP TYPE IF EXISTS bill_type;
            DROP TYPE IF EXISTS account_type;
            ",
        )
        .await?;

        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE account_type AS ENUM ('asset', 'liability', 'equity', 'income', 'expense');
CREATE TYPE bill_type AS ENUM ('client', 'provider');
CREATE TYPE cash_transaction_type AS ENUM ('income', 'expense');
CREATE TYPE counterparty_type AS ENUM ('client', 'provider');
";

const ORGANIZATIONS_SQL: &str = r"
CREATE TABLE organizations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    currency VARCHAR(3) NOT NULL DEFAULT 'ARS',
    enable_accounting BOOLEAN NOT NULL DEFAULT false,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
    code VARCHAR(20) NOT NULL,
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    subtype VARCHAR(30),
    parent_id UUID REFERENCES accounts(id) ON DELETE SET NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_accounts_org_code UNIQUE (organization_id, code)
);

-- Resolution always filters by org + code + active
CREATE INDEX idx_accounts_org_code ON accounts(organization_id, code) WHERE is_active;
CREATE INDEX idx_accounts_org_type ON accounts(organization_id, account_type);
";

const JOURNAL_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
    entry_number VARCHAR(20) NOT NULL,
    entry_date DATE NOT NULL,
    description TEXT NOT NULL,
    debit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    credit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    currency VARCHAR(3) NOT NULL,
    exchange_rate NUMERIC(18, 6) NOT NULL DEFAULT 1,
    debit_account_id UUID REFERENCES accounts(id),
    credit_account_id UUID REFERENCES accounts(id),
    source_type VARCHAR(20) NOT NULL,
    source_id UUID NOT NULL,
    is_automatic BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- One side per row
    CONSTRAINT chk_journal_one_side CHECK (
        (debit_account_id IS NOT NULL AND credit_account_id IS NULL AND debit > 0 AND credit = 0)
        OR
        (credit_account_id IS NOT NULL AND debit_account_id IS NULL AND credit > 0 AND debit = 0)
    )
);

CREATE INDEX idx_journal_org_number ON journal_entries(organization_id, entry_number);
CREATE INDEX idx_journal_source ON journal_entries(source_type, source_id);
CREATE INDEX idx_journal_org_date ON journal_entries(organization_id, entry_date);

-- Per-organization monotonic entry-number counter
CREATE TABLE journal_sequences (
    organization_id UUID PRIMARY KEY REFERENCES organizations(id) ON DELETE CASCADE,
    last_number BIGINT NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CATEGORY_MAPPINGS_SQL: &str = r"
CREATE TABLE category_mappings (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
    rubro VARCHAR(100) NOT NULL,
    income_code VARCHAR(20) NOT NULL,
    expense_code VARCHAR(20) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_category_mappings_org_rubro UNIQUE (organization_id, rubro)
);
";

const BILLS_SQL: &str = r"
CREATE TABLE bills (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
    bill_type bill_type NOT NULL,
    counterparty_name VARCHAR(255) NOT NULL,
    total NUMERIC(18, 2) NOT NULL,
    issued_on DATE NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_bills_total_positive CHECK (total > 0)
);

CREATE INDEX idx_bills_org ON bills(organization_id, issued_on DESC);

CREATE TABLE bill_rubros (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    bill_id UUID NOT NULL REFERENCES bills(id) ON DELETE CASCADE,
    rubro VARCHAR(100) NOT NULL,
    percentage NUMERIC(7, 2) NOT NULL,
    CONSTRAINT chk_bill_rubros_pct CHECK (percentage > 0 AND percentage <= 100)
);

CREATE INDEX idx_bill_rubros_bill ON bill_rubros(bill_id);

CREATE TABLE bill_payments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    bill_id UUID NOT NULL REFERENCES bills(id) ON DELETE CASCADE,
    amount NUMERIC(18, 2) NOT NULL,
    paid_on DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_bill_payments_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_bill_payments_bill ON bill_payments(bill_id);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
    counterparty_type counterparty_type NOT NULL,
    counterparty_name VARCHAR(255) NOT NULL,
    rubro VARCHAR(100),
    amount NUMERIC(18, 2) NOT NULL,
    paid_on DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_payments_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_payments_org ON payments(organization_id, paid_on DESC);
";

const TREASURY_SQL: &str = r"
CREATE TABLE cash_transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
    transaction_type cash_transaction_type NOT NULL,
    amount NUMERIC(18, 2) NOT NULL,
    occurred_on DATE NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_cash_tx_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_cash_tx_org ON cash_transactions(organization_id, occurred_on DESC);
";

const PAYROLLS_SQL: &str = r"
CREATE TABLE payrolls (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
    period VARCHAR(10) NOT NULL,
    base NUMERIC(18, 2) NOT NULL,
    overtime NUMERIC(18, 2) NOT NULL DEFAULT 0,
    bonuses NUMERIC(18, 2) NOT NULL DEFAULT 0,
    deductions NUMERIC(18, 2) NOT NULL DEFAULT 0,
    net_pay NUMERIC(18, 2),
    run_on DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_payrolls_amounts CHECK (
        base >= 0 AND overtime >= 0 AND bonuses >= 0 AND deductions >= 0
    )
);

CREATE INDEX idx_payrolls_org ON payrolls(organization_id, run_on DESC);
";
