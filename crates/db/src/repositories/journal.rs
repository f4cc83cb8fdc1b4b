//! Journal entry persistence and the automatic accounting engine.
//!
//! [`AutoAccountingService`] is the entry builder: one method per business
//! event, each following the same shape. Load the source with its tenant;
//! decline quietly when accounting is disabled or the source is gone; resolve
//! every account up front; build a balanced leg set; persist all legs in one
//! transaction under one entry number drawn from the tenant's atomic counter.
//!
//! [`JournalRepository`] holds the read/lifecycle side: listing, double-post
//! checks, and reversal by source.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbBackend,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, Statement, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use obra_core::chart::codes;
use obra_core::journal::{
    bill_legs, bill_payment_legs, format_entry_number, payment_legs, payroll_legs, treasury_legs,
    AccountingError, BillKind, CashFlowKind, CounterpartyKind, EntryLegs, LegSide, PayrollAmounts,
    RubroSplit, SourceType, FIRST_ENTRY_NUMBER,
};

use crate::entities::{
    bill_payments, bill_rubros, bills, cash_transactions, journal_entries, organizations,
    payments, payrolls,
    sea_orm_active_enums::{BillType, CashTransactionType, CounterpartyType},
};
use crate::repositories::account::{AccountResolver, ResolveError};

/// Failure while building or persisting an automatic entry.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// The leg set violated a ledger invariant.
    #[error(transparent)]
    Accounting(#[from] AccountingError),

    /// A required account could not be resolved.
    #[error(transparent)]
    Resolution(#[from] ResolveError),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// A persisted automatic entry: all legs under one entry number.
#[derive(Debug, Clone)]
pub struct PostedEntry {
    /// Shared zero-padded entry number.
    pub entry_number: String,
    /// One row per leg, in posting order.
    pub legs: Vec<journal_entries::Model>,
}

/// Builds and persists automatic journal entries from business events.
///
/// Every public method returns `Ok(None)` when accounting is disabled for the
/// tenant or the source object no longer exists; accounting is an opt-in side
/// effect, never load-bearing for the primary write. Real failures come back
/// as [`JournalError`] so the caller can log or alert without losing them.
#[derive(Debug, Clone)]
pub struct AutoAccountingService {
    db: DatabaseConnection,
    resolver: AccountResolver,
}

impl AutoAccountingService {
    /// Creates a new accounting service.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            resolver: AccountResolver::new(db.clone()),
            db,
        }
    }

    /// Posts a treasury cash movement.
    ///
    /// Income debits cash against the default income account; expense debits
    /// the default expense account against cash.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`] on resolution, invariant, or database failure.
    pub async fn create_transaction_entry(
        &self,
        transaction_id: Uuid,
    ) -> Result<Option<PostedEntry>, JournalError> {
        let Some((tx, org)) = self.load_source(
            cash_transactions::Entity::find_by_id(transaction_id)
                .find_also_related(organizations::Entity)
                .one(&self.db)
                .await?,
        ) else {
            return Ok(None);
        };

        let (kind, counterpart_code, fallback_desc) = match tx.transaction_type {
            CashTransactionType::Income => {
                (CashFlowKind::Income, codes::DEFAULT_INCOME, "Ingreso de caja")
            }
            CashTransactionType::Expense => {
                (CashFlowKind::Expense, codes::DEFAULT_EXPENSE, "Egreso de caja")
            }
        };

        let cash = self.resolver.require_by_code(org.id, codes::CASH).await?;
        let counterpart = self.resolver.require_by_code(org.id, counterpart_code).await?;

        let entry = treasury_legs(kind, tx.amount, cash.id, counterpart.id)?;
        let description = tx
            .description
            .clone()
            .unwrap_or_else(|| fallback_desc.to_string());

        self.post_entry(
            &org,
            entry,
            tx.occurred_on,
            description,
            SourceType::Transaction,
            tx.id,
        )
        .await
        .map(Some)
    }

    /// Posts a payroll run.
    ///
    /// Gross pay debits the payroll expense account (falling back to the
    /// default expense account when the former is missing); deductions credit
    /// the payroll liability when non-zero; net pay credits cash.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`] on resolution, invariant, or database failure.
    pub async fn create_payroll_entry(
        &self,
        payroll_id: Uuid,
    ) -> Result<Option<PostedEntry>, JournalError> {
        let Some((payroll, org)) = self.load_source(
            payrolls::Entity::find_by_id(payroll_id)
                .find_also_related(organizations::Entity)
                .one(&self.db)
                .await?,
        ) else {
            return Ok(None);
        };

        let amounts = PayrollAmounts {
            base: payroll.base,
            overtime: payroll.overtime,
            bonuses: payroll.bonuses,
            deductions: payroll.deductions,
            net_pay: payroll.net_pay,
        };

        let expense = match self
            .resolver
            .find_active_by_code(org.id, codes::PAYROLL_EXPENSE)
            .await?
        {
            Some(account) => account,
            None => {
                self.resolver
                    .require_by_code(org.id, codes::DEFAULT_EXPENSE)
                    .await?
            }
        };
        let liability = self
            .resolver
            .require_by_code(org.id, codes::PAYROLL_LIABILITY)
            .await?;
        let cash = self.resolver.require_by_code(org.id, codes::CASH).await?;

        let entry = payroll_legs(&amounts, expense.id, liability.id, cash.id)?;
        let description = format!("Nómina {}", payroll.period);

        self.post_entry(
            &org,
            entry,
            payroll.run_on,
            description,
            SourceType::Payroll,
            payroll.id,
        )
        .await
        .map(Some)
    }

    /// Posts a bill creation.
    ///
    /// Client bills debit accounts receivable for the total and credit one
    /// income account per rubro line; provider bills debit one expense account
    /// per rubro line and credit accounts payable for the total.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`] on resolution, invariant, or database failure.
    pub async fn create_bill_entry(
        &self,
        bill_id: Uuid,
    ) -> Result<Option<PostedEntry>, JournalError> {
        let Some((bill, org)) = self.load_source(
            bills::Entity::find_by_id(bill_id)
                .find_also_related(organizations::Entity)
                .one(&self.db)
                .await?,
        ) else {
            return Ok(None);
        };

        let rubro_lines = bill_rubros::Entity::find()
            .filter(bill_rubros::Column::BillId.eq(bill.id))
            .all(&self.db)
            .await?;

        let (kind, counterpart_code, is_income) = match bill.bill_type {
            BillType::Client => (BillKind::Client, codes::ACCOUNTS_RECEIVABLE, true),
            BillType::Provider => (BillKind::Provider, codes::ACCOUNTS_PAYABLE, false),
        };

        // Resolve every line before building a single leg; one miss aborts
        // the whole entry.
        let mut splits = Vec::with_capacity(rubro_lines.len());
        for line in &rubro_lines {
            let account = self
                .resolver
                .account_for_rubro(org.id, &line.rubro, is_income)
                .await?;
            splits.push(RubroSplit {
                account_id: account.id,
                percentage: line.percentage,
            });
        }

        let counterpart = self.resolver.require_by_code(org.id, counterpart_code).await?;
        let entry = bill_legs(kind, bill.total, &splits, counterpart.id)?;
        let description = match kind {
            BillKind::Client => format!("Factura a {}", bill.counterparty_name),
            BillKind::Provider => format!("Factura de {}", bill.counterparty_name),
        };

        self.post_entry(
            &org,
            entry,
            bill.issued_on,
            description,
            SourceType::Bill,
            bill.id,
        )
        .await
        .map(Some)
    }

    /// Posts a bill payment (full or partial).
    ///
    /// Collections on client bills debit cash against receivables;
    /// disbursements on provider bills debit payables against cash.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`] on resolution, invariant, or database failure.
    pub async fn create_bill_payment_entry(
        &self,
        bill_payment_id: Uuid,
    ) -> Result<Option<PostedEntry>, JournalError> {
        let Some((payment, Some(bill))) = bill_payments::Entity::find_by_id(bill_payment_id)
            .find_also_related(bills::Entity)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let Some(org) = organizations::Entity::find_by_id(bill.organization_id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        if !org.enable_accounting {
            return Ok(None);
        }

        let (kind, counterpart_code) = match bill.bill_type {
            BillType::Client => (BillKind::Client, codes::ACCOUNTS_RECEIVABLE),
            BillType::Provider => (BillKind::Provider, codes::ACCOUNTS_PAYABLE),
        };

        let cash = self.resolver.require_by_code(org.id, codes::CASH).await?;
        let counterpart = self.resolver.require_by_code(org.id, counterpart_code).await?;

        let entry = bill_payment_legs(kind, payment.amount, cash.id, counterpart.id)?;
        let description = match kind {
            BillKind::Client => format!("Cobro factura {}", bill.counterparty_name),
            BillKind::Provider => format!("Pago factura {}", bill.counterparty_name),
        };

        self.post_entry(
            &org,
            entry,
            payment.paid_on,
            description,
            SourceType::BillPayment,
            payment.id,
        )
        .await
        .map(Some)
    }

    /// Posts a generic client/provider payment.
    ///
    /// Client money debits cash against the rubro's income account; provider
    /// money debits the rubro's expense account against cash. Payments without
    /// a rubro use the default income/expense account.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`] on resolution, invariant, or database failure.
    pub async fn create_payment_entry(
        &self,
        payment_id: Uuid,
    ) -> Result<Option<PostedEntry>, JournalError> {
        let Some((payment, org)) = self.load_source(
            payments::Entity::find_by_id(payment_id)
                .find_also_related(organizations::Entity)
                .one(&self.db)
                .await?,
        ) else {
            return Ok(None);
        };

        let (kind, is_income, default_code) = match payment.counterparty_type {
            CounterpartyType::Client => (CounterpartyKind::Client, true, codes::DEFAULT_INCOME),
            CounterpartyType::Provider => {
                (CounterpartyKind::Provider, false, codes::DEFAULT_EXPENSE)
            }
        };

        let category = match &payment.rubro {
            Some(rubro) => {
                self.resolver
                    .account_for_rubro(org.id, rubro, is_income)
                    .await?
            }
            None => self.resolver.require_by_code(org.id, default_code).await?,
        };
        let cash = self.resolver.require_by_code(org.id, codes::CASH).await?;

        let entry = payment_legs(kind, payment.amount, cash.id, category.id)?;
        let description = match kind {
            CounterpartyKind::Client => format!("Cobro de {}", payment.counterparty_name),
            CounterpartyKind::Provider => format!("Pago a {}", payment.counterparty_name),
        };

        self.post_entry(
            &org,
            entry,
            payment.paid_on,
            description,
            SourceType::Payment,
            payment.id,
        )
        .await
        .map(Some)
    }

    /// Applies the common precondition: source exists, tenant exists, and the
    /// tenant has accounting enabled.
    fn load_source<M>(
        &self,
        loaded: Option<(M, Option<organizations::Model>)>,
    ) -> Option<(M, organizations::Model)> {
        let (source, org) = loaded?;
        let org = org?;
        if !org.enable_accounting {
            return None;
        }
        Some((source, org))
    }

    /// Persists all legs of one entry atomically under the tenant's next
    /// entry number.
    async fn post_entry(
        &self,
        org: &organizations::Model,
        entry: EntryLegs,
        entry_date: NaiveDate,
        description: String,
        source_type: SourceType,
        source_id: Uuid,
    ) -> Result<PostedEntry, JournalError> {
        let txn = self.db.begin().await?;
        let entry_number = next_entry_number(&txn, org.id).await?;
        let now = chrono::Utc::now().into();

        let legs = entry.into_legs();
        let mut rows = Vec::with_capacity(legs.len());
        for leg in legs {
            let (debit, credit, debit_account_id, credit_account_id) = match leg.side {
                LegSide::Debit => (leg.amount, Decimal::ZERO, Some(leg.account_id), None),
                LegSide::Credit => (Decimal::ZERO, leg.amount, None, Some(leg.account_id)),
            };

            let row = journal_entries::ActiveModel {
                id: Set(Uuid::new_v4()),
                organization_id: Set(org.id),
                entry_number: Set(entry_number.clone()),
                entry_date: Set(entry_date),
                description: Set(description.clone()),
                debit: Set(debit),
                credit: Set(credit),
                currency: Set(org.currency.clone()),
                exchange_rate: Set(Decimal::ONE),
                debit_account_id: Set(debit_account_id),
                credit_account_id: Set(credit_account_id),
                source_type: Set(source_type.as_str().to_string()),
                source_id: Set(source_id),
                is_automatic: Set(true),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
            rows.push(row);
        }

        txn.commit().await?;
        info!(
            organization_id = %org.id,
            entry_number = %entry_number,
            source_type = source_type.as_str(),
            legs = rows.len(),
            "posted automatic journal entry"
        );

        Ok(PostedEntry {
            entry_number,
            legs: rows,
        })
    }
}

/// Allocates the tenant's next entry number via an atomic counter upsert.
///
/// Running inside the leg-writing transaction serializes concurrent postings
/// for the same tenant without an advisory lock: the counter row's update
/// takes a row lock held until commit.
async fn next_entry_number<C: ConnectionTrait>(
    conn: &C,
    organization_id: Uuid,
) -> Result<String, DbErr> {
    let sql = format!(
        "INSERT INTO journal_sequences (organization_id, last_number, updated_at)
         VALUES ($1, {FIRST_ENTRY_NUMBER}, now())
         ON CONFLICT (organization_id)
         DO UPDATE SET last_number = journal_sequences.last_number + 1, updated_at = now()
         RETURNING last_number"
    );
    let stmt =
        Statement::from_sql_and_values(DbBackend::Postgres, sql, [organization_id.into()]);

    let row = conn
        .query_one(stmt)
        .await?
        .ok_or_else(|| DbErr::Custom("journal sequence upsert returned no row".to_string()))?;
    let last_number: i64 = row.try_get("", "last_number")?;

    Ok(format_entry_number(last_number))
}

/// Filter options for listing journal entries.
#[derive(Debug, Clone, Default)]
pub struct JournalFilter {
    /// Entries dated on or after this date.
    pub from: Option<NaiveDate>,
    /// Entries dated on or before this date.
    pub to: Option<NaiveDate>,
    /// Entries touching this account on either side.
    pub account_id: Option<Uuid>,
    /// Entries from this source kind.
    pub source_type: Option<SourceType>,
    /// Filter by the automatic flag.
    pub is_automatic: Option<bool>,
}

/// Read and lifecycle operations over persisted journal entries.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// True if any entry rows reference this source. Callers use this to
    /// avoid double-posting.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn has_entries_for_source(
        &self,
        source_type: SourceType,
        source_id: Uuid,
    ) -> Result<bool, DbErr> {
        let count = journal_entries::Entity::find()
            .filter(journal_entries::Column::SourceType.eq(source_type.as_str()))
            .filter(journal_entries::Column::SourceId.eq(source_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Hard-deletes all automatic rows for a source, for reversal/cleanup.
    /// No compensating entry is posted. Returns the number of deleted rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_automatic_entries(
        &self,
        source_type: SourceType,
        source_id: Uuid,
    ) -> Result<u64, DbErr> {
        let result = journal_entries::Entity::delete_many()
            .filter(journal_entries::Column::SourceType.eq(source_type.as_str()))
            .filter(journal_entries::Column::SourceId.eq(source_id))
            .filter(journal_entries::Column::IsAutomatic.eq(true))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Deletes every leg of one correlated entry number for a tenant.
    ///
    /// Deleting a single leg would corrupt the balance invariant, so the
    /// administrative deletion path always removes the whole group.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_entry_group(
        &self,
        organization_id: Uuid,
        entry_number: &str,
    ) -> Result<u64, DbErr> {
        let result = journal_entries::Entity::delete_many()
            .filter(journal_entries::Column::OrganizationId.eq(organization_id))
            .filter(journal_entries::Column::EntryNumber.eq(entry_number))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Lists a tenant's entries, newest entry number first, leg order within
    /// an entry preserved by creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_entries(
        &self,
        organization_id: Uuid,
        filter: JournalFilter,
    ) -> Result<Vec<journal_entries::Model>, DbErr> {
        let mut query = journal_entries::Entity::find()
            .filter(journal_entries::Column::OrganizationId.eq(organization_id));

        if let Some(from) = filter.from {
            query = query.filter(journal_entries::Column::EntryDate.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(journal_entries::Column::EntryDate.lte(to));
        }
        if let Some(account_id) = filter.account_id {
            query = query.filter(
                Condition::any()
                    .add(journal_entries::Column::DebitAccountId.eq(account_id))
                    .add(journal_entries::Column::CreditAccountId.eq(account_id)),
            );
        }
        if let Some(source_type) = filter.source_type {
            query = query.filter(journal_entries::Column::SourceType.eq(source_type.as_str()));
        }
        if let Some(is_automatic) = filter.is_automatic {
            query = query.filter(journal_entries::Column::IsAutomatic.eq(is_automatic));
        }

        query
            .order_by_desc(journal_entries::Column::EntryNumber)
            .order_by_asc(journal_entries::Column::CreatedAt)
            .all(&self.db)
            .await
    }
}
