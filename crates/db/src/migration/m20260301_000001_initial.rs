//! Initial database migration.
//!
//! Creates all enums, tables, and indexes of the ledger store and its
//! satellites.

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
        // PART 2: CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(PAYMENT_METHOD_ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: LEDGER STORE
        // ============================================================
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_POSTINGS_SQL).await?;

        // ============================================================
        // PART 4: CASH MIRROR
        // ============================================================
        db.execute_unprepared(CASH_TRANSACTIONS_SQL).await?;

        // ============================================================
        // PART 5: INVENTORY
        // ============================================================
        db.execute_unprepared(PRODUCT_STOCKS_SQL).await?;
        db.execute_unprepared(STOCK_MOVEMENTS_SQL).await?;

        // ============================================================
        // PART 6: PURCHASES & CLAIMS
        // ============================================================
        db.execute_unprepared(PURCHASE_ITEMS_SQL).await?;
        db.execute_unprepared(PURCHASE_CLAIMS_SQL).await?;
        db.execute_unprepared(PURCHASE_CLAIM_ITEMS_SQL).await?;

        // ============================================================
        // PART 7: INDEXES
        // ============================================================
        db.execute_unprepared(INDEXES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE account_type AS ENUM ('asset', 'liability', 'equity', 'income', 'expense');
CREATE TYPE account_subtype AS ENUM ('cash_and_bank', 'cost_of_goods_sold', 'operating_expense');
CREATE TYPE entry_status AS ENUM ('posted', 'void');
CREATE TYPE reference_kind AS ENUM ('sale', 'purchase', 'sale_return', 'purchase_claim');
CREATE TYPE party_kind AS ENUM ('customer', 'vendor');
CREATE TYPE cash_txn_type AS ENUM ('receipt', 'payment', 'expense', 'transfer_in', 'transfer_out');
CREATE TYPE cash_txn_status AS ENUM ('pending', 'approved', 'void');
CREATE TYPE source_kind AS ENUM ('sale_payment', 'purchase_payment', 'claim_receipt', 'return_refund');
CREATE TYPE movement_kind AS ENUM ('purchase', 'purchase_return', 'sale', 'sale_return', 'claim');
CREATE TYPE claim_status AS ENUM ('pending', 'approved');
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    account_type account_type NOT NULL,
    account_subtype account_subtype,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PAYMENT_METHOD_ACCOUNTS_SQL: &str = r"
CREATE TABLE payment_method_accounts (
    id UUID PRIMARY KEY,
    method TEXT NOT NULL,
    branch_id UUID,
    account_id UUID NOT NULL REFERENCES accounts(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- One mapping per (method, branch); NULL branch is the global fallback.
CREATE UNIQUE INDEX ux_payment_method_branch
    ON payment_method_accounts (method, branch_id) NULLS NOT DISTINCT;
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    entry_date DATE NOT NULL,
    memo TEXT,
    branch_id UUID,
    reference_kind reference_kind,
    reference_id UUID,
    status entry_status NOT NULL DEFAULT 'posted',
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const JOURNAL_POSTINGS_SQL: &str = r"
CREATE TABLE journal_postings (
    id UUID PRIMARY KEY,
    posting_no BIGINT NOT NULL GENERATED ALWAYS AS IDENTITY,
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    debit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    credit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    party_kind party_kind,
    party_id UUID,
    created_at TIMESTAMPTZ DEFAULT NOW(),
    CONSTRAINT ck_posting_non_negative CHECK (debit >= 0 AND credit >= 0),
    CONSTRAINT ux_posting_no UNIQUE (posting_no)
);
";

const CASH_TRANSACTIONS_SQL: &str = r"
CREATE TABLE cash_transactions (
    id UUID PRIMARY KEY,
    txn_date DATE NOT NULL,
    account_id UUID NOT NULL REFERENCES accounts(id),
    branch_id UUID,
    txn_type cash_txn_type NOT NULL,
    amount NUMERIC(18, 2) NOT NULL CHECK (amount > 0),
    method TEXT,
    counterparty_kind party_kind,
    counterparty_id UUID,
    source_kind source_kind,
    source_id UUID,
    status cash_txn_status NOT NULL DEFAULT 'approved',
    reference TEXT,
    voucher_no TEXT,
    note TEXT,
    deleted_at TIMESTAMPTZ,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- At most one live mirror per source document.
CREATE UNIQUE INDEX ux_cash_txn_source
    ON cash_transactions (source_kind, source_id)
    WHERE source_kind IS NOT NULL AND deleted_at IS NULL;
";

const PRODUCT_STOCKS_SQL: &str = r"
CREATE TABLE product_stocks (
    id UUID PRIMARY KEY,
    product_id UUID NOT NULL,
    branch_id UUID NOT NULL,
    quantity NUMERIC(18, 4) NOT NULL DEFAULT 0,
    avg_cost NUMERIC(18, 4) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT ux_product_branch UNIQUE (product_id, branch_id)
);
";

const STOCK_MOVEMENTS_SQL: &str = r"
CREATE TABLE stock_movements (
    id UUID PRIMARY KEY,
    product_stock_id UUID NOT NULL REFERENCES product_stocks(id),
    product_id UUID NOT NULL,
    branch_id UUID NOT NULL,
    kind movement_kind NOT NULL,
    quantity NUMERIC(18, 4) NOT NULL CHECK (quantity > 0),
    unit_cost NUMERIC(18, 4) NOT NULL,
    reference TEXT,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PURCHASE_ITEMS_SQL: &str = r"
CREATE TABLE purchase_items (
    id UUID PRIMARY KEY,
    purchase_id UUID NOT NULL,
    product_id UUID NOT NULL,
    branch_id UUID NOT NULL,
    quantity NUMERIC(18, 4) NOT NULL CHECK (quantity > 0),
    unit_price NUMERIC(18, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PURCHASE_CLAIMS_SQL: &str = r"
CREATE TABLE purchase_claims (
    id UUID PRIMARY KEY,
    purchase_id UUID NOT NULL,
    branch_id UUID NOT NULL,
    claim_date DATE NOT NULL,
    status claim_status NOT NULL DEFAULT 'pending',
    memo TEXT,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PURCHASE_CLAIM_ITEMS_SQL: &str = r"
CREATE TABLE purchase_claim_items (
    id UUID PRIMARY KEY,
    claim_id UUID NOT NULL REFERENCES purchase_claims(id) ON DELETE CASCADE,
    purchase_item_id UUID NOT NULL REFERENCES purchase_items(id),
    quantity NUMERIC(18, 4) NOT NULL CHECK (quantity > 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const INDEXES_SQL: &str = r"
CREATE INDEX ix_postings_entry ON journal_postings (journal_entry_id);
CREATE INDEX ix_postings_account ON journal_postings (account_id);
CREATE INDEX ix_postings_party ON journal_postings (party_kind, party_id);
CREATE INDEX ix_postings_created_at ON journal_postings (created_at);
CREATE INDEX ix_entries_date ON journal_entries (entry_date);
CREATE INDEX ix_entries_branch ON journal_entries (branch_id);
CREATE INDEX ix_entries_reference ON journal_entries (reference_kind, reference_id);
CREATE INDEX ix_cash_txn_date ON cash_transactions (txn_date);
CREATE INDEX ix_cash_txn_account ON cash_transactions (account_id);
CREATE INDEX ix_cash_txn_branch ON cash_transactions (branch_id);
CREATE INDEX ix_movements_product_branch ON stock_movements (product_id, branch_id);
CREATE INDEX ix_movements_created_at ON stock_movements (created_at);
CREATE INDEX ix_purchase_items_purchase ON purchase_items (purchase_id);
CREATE INDEX ix_claim_items_purchase_item ON purchase_claim_items (purchase_item_id);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS purchase_claim_items;
DROP TABLE IF EXISTS purchase_claims;
DROP TABLE IF EXISTS purchase_items;
DROP TABLE IF EXISTS stock_movements;
DROP TABLE IF EXISTS product_stocks;
DROP TABLE IF EXISTS cash_transactions;
DROP TABLE IF EXISTS journal_postings;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS payment_method_accounts;
DROP TABLE IF EXISTS accounts;
DROP TYPE IF EXISTS claim_status;
DROP TYPE IF EXISTS movement_kind;
DROP TYPE IF EXISTS source_kind;
DROP TYPE IF EXISTS cash_txn_status;
DROP TYPE IF EXISTS cash_txn_type;
DROP TYPE IF EXISTS party_kind;
DROP TYPE IF EXISTS reference_kind;
DROP TYPE IF EXISTS entry_status;
DROP TYPE IF EXISTS account_subtype;
DROP TYPE IF EXISTS account_type;
";
