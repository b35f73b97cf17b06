//! Database enum types and their conversions to/from core domain enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account type - fixed taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset accounts.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability accounts.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity accounts.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Income accounts.
    #[sea_orm(string_value = "income")]
    Income,
    /// Expense accounts.
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Account subtype used by the cashbook and P&L engines.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_subtype")]
#[serde(rename_all = "snake_case")]
pub enum AccountSubtype {
    /// Cash and bank accounts.
    #[sea_orm(string_value = "cash_and_bank")]
    CashAndBank,
    /// Cost of goods sold.
    #[sea_orm(string_value = "cost_of_goods_sold")]
    CostOfGoodsSold,
    /// Operating expenses.
    #[sea_orm(string_value = "operating_expense")]
    OperatingExpense,
}

/// Journal entry status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_status")]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Posted (the default on creation).
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Voided.
    #[sea_orm(string_value = "void")]
    Void,
}

/// Kind of business document a journal entry references.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reference_kind")]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Sales invoice.
    #[sea_orm(string_value = "sale")]
    Sale,
    /// Purchase bill.
    #[sea_orm(string_value = "purchase")]
    Purchase,
    /// Sale return.
    #[sea_orm(string_value = "sale_return")]
    SaleReturn,
    /// Purchase claim.
    #[sea_orm(string_value = "purchase_claim")]
    PurchaseClaim,
}

/// Party kind for receivable/payable sub-ledgers.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "party_kind")]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    /// Customer.
    #[sea_orm(string_value = "customer")]
    Customer,
    /// Vendor.
    #[sea_orm(string_value = "vendor")]
    Vendor,
}

/// Cash transaction type.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cash_txn_type")]
#[serde(rename_all = "snake_case")]
pub enum CashTxnType {
    /// Money in.
    #[sea_orm(string_value = "receipt")]
    Receipt,
    /// Money out.
    #[sea_orm(string_value = "payment")]
    Payment,
    /// Direct cash-book expense.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Transfer in.
    #[sea_orm(string_value = "transfer_in")]
    TransferIn,
    /// Transfer out.
    #[sea_orm(string_value = "transfer_out")]
    TransferOut,
}

/// Cash transaction status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cash_txn_status")]
#[serde(rename_all = "lowercase")]
pub enum CashTxnStatus {
    /// Awaiting approval.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Voided.
    #[sea_orm(string_value = "void")]
    Void,
}

/// Source document kind a cash transaction mirrors.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "source_kind")]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Sales payment.
    #[sea_orm(string_value = "sale_payment")]
    SalePayment,
    /// Purchase payment.
    #[sea_orm(string_value = "purchase_payment")]
    PurchasePayment,
    /// Purchase claim receipt.
    #[sea_orm(string_value = "claim_receipt")]
    ClaimReceipt,
    /// Sale return refund.
    #[sea_orm(string_value = "return_refund")]
    ReturnRefund,
}

/// Stock movement kind.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "movement_kind")]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Inbound purchase receipt.
    #[sea_orm(string_value = "purchase")]
    Purchase,
    /// Outbound return to vendor.
    #[sea_orm(string_value = "purchase_return")]
    PurchaseReturn,
    /// Outbound sale consumption.
    #[sea_orm(string_value = "sale")]
    Sale,
    /// Inbound customer return restock.
    #[sea_orm(string_value = "sale_return")]
    SaleReturn,
    /// Outbound claim of purchased goods.
    #[sea_orm(string_value = "claim")]
    Claim,
}

/// Purchase claim status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "claim_status")]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Awaiting approval.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved; stock has been decremented.
    #[sea_orm(string_value = "approved")]
    Approved,
}

// ============================================================================
// Conversions to/from core domain enums
// ============================================================================

impl From<tillbook_core::account::AccountType> for AccountType {
    fn from(value: tillbook_core::account::AccountType) -> Self {
        use tillbook_core::account::AccountType as Core;
        match value {
            Core::Asset => Self::Asset,
            Core::Liability => Self::Liability,
            Core::Equity => Self::Equity,
            Core::Income => Self::Income,
            Core::Expense => Self::Expense,
        }
    }
}

impl From<tillbook_core::account::AccountSubtype> for AccountSubtype {
    fn from(value: tillbook_core::account::AccountSubtype) -> Self {
        use tillbook_core::account::AccountSubtype as Core;
        match value {
            Core::CashAndBank => Self::CashAndBank,
            Core::CostOfGoodsSold => Self::CostOfGoodsSold,
            Core::OperatingExpense => Self::OperatingExpense,
        }
    }
}

impl From<tillbook_core::ledger::EntryStatus> for EntryStatus {
    fn from(value: tillbook_core::ledger::EntryStatus) -> Self {
        use tillbook_core::ledger::EntryStatus as Core;
        match value {
            Core::Posted => Self::Posted,
            Core::Void => Self::Void,
        }
    }
}

impl From<tillbook_core::ledger::DocumentRef> for ReferenceKind {
    fn from(value: tillbook_core::ledger::DocumentRef) -> Self {
        use tillbook_core::ledger::DocumentRef as Core;
        match value {
            Core::Sale(_) => Self::Sale,
            Core::Purchase(_) => Self::Purchase,
            Core::SaleReturn(_) => Self::SaleReturn,
            Core::PurchaseClaim(_) => Self::PurchaseClaim,
        }
    }
}

impl From<tillbook_core::ledger::PartyKind> for PartyKind {
    fn from(value: tillbook_core::ledger::PartyKind) -> Self {
        use tillbook_core::ledger::PartyKind as Core;
        match value {
            Core::Customer => Self::Customer,
            Core::Vendor => Self::Vendor,
        }
    }
}

impl From<tillbook_core::cashsync::CashTxnType> for CashTxnType {
    fn from(value: tillbook_core::cashsync::CashTxnType) -> Self {
        use tillbook_core::cashsync::CashTxnType as Core;
        match value {
            Core::Receipt => Self::Receipt,
            Core::Payment => Self::Payment,
            Core::Expense => Self::Expense,
            Core::TransferIn => Self::TransferIn,
            Core::TransferOut => Self::TransferOut,
        }
    }
}

impl From<CashTxnType> for tillbook_core::cashsync::CashTxnType {
    fn from(value: CashTxnType) -> Self {
        match value {
            CashTxnType::Receipt => Self::Receipt,
            CashTxnType::Payment => Self::Payment,
            CashTxnType::Expense => Self::Expense,
            CashTxnType::TransferIn => Self::TransferIn,
            CashTxnType::TransferOut => Self::TransferOut,
        }
    }
}

impl From<tillbook_core::cashsync::CashTxnStatus> for CashTxnStatus {
    fn from(value: tillbook_core::cashsync::CashTxnStatus) -> Self {
        use tillbook_core::cashsync::CashTxnStatus as Core;
        match value {
            Core::Pending => Self::Pending,
            Core::Approved => Self::Approved,
            Core::Void => Self::Void,
        }
    }
}

impl From<CashTxnStatus> for tillbook_core::cashsync::CashTxnStatus {
    fn from(value: CashTxnStatus) -> Self {
        match value {
            CashTxnStatus::Pending => Self::Pending,
            CashTxnStatus::Approved => Self::Approved,
            CashTxnStatus::Void => Self::Void,
        }
    }
}

impl From<tillbook_core::cashsync::SourceKind> for SourceKind {
    fn from(value: tillbook_core::cashsync::SourceKind) -> Self {
        use tillbook_core::cashsync::SourceKind as Core;
        match value {
            Core::SalePayment => Self::SalePayment,
            Core::PurchasePayment => Self::PurchasePayment,
            Core::ClaimReceipt => Self::ClaimReceipt,
            Core::ReturnRefund => Self::ReturnRefund,
        }
    }
}

impl From<tillbook_core::inventory::MovementKind> for MovementKind {
    fn from(value: tillbook_core::inventory::MovementKind) -> Self {
        use tillbook_core::inventory::MovementKind as Core;
        match value {
            Core::Purchase => Self::Purchase,
            Core::PurchaseReturn => Self::PurchaseReturn,
            Core::Sale => Self::Sale,
            Core::SaleReturn => Self::SaleReturn,
            Core::Claim => Self::Claim,
        }
    }
}
