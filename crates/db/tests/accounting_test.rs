//! Integration tests for the chart provisioner and the accounting engine.
//!
//! These run against a migrated Postgres database; set `DATABASE_URL` to
//! enable them. Without it each test returns early.

use rust_decimal_macros::dec;
use sea_orm::{Database, DatabaseConnection, EntityTrait};
use uuid::Uuid;

use obra_core::chart::codes;
use obra_core::journal::SourceType;
use obra_db::entities::organizations;
use obra_db::entities::sea_orm_active_enums::{BillType, CashTransactionType, CounterpartyType};
use obra_db::repositories::{
    AccountResolver, AutoAccountingService, BillRepository, ChartRepository, CreateBillInput,
    CreateOrganizationInput, CreatePaymentInput, CreatePayrollInput, CreateTransactionInput,
    JournalFilter, JournalRepository, OrganizationRepository, PaymentRepository, PayrollRepository,
    RubroLine, TreasuryRepository,
};

async fn try_connect() -> Option<DatabaseConnection> {
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(
        Database::connect(&url)
            .await
            .expect("Failed to connect to database"),
    )
}

async fn create_org(db: &DatabaseConnection, enable_accounting: bool) -> organizations::Model {
    OrganizationRepository::new(db.clone())
        .create(CreateOrganizationInput {
            name: format!("Constructora Test {}", Uuid::new_v4()),
            currency: "ARS".to_string(),
            enable_accounting,
        })
        .await
        .expect("Failed to create organization")
}

async fn cleanup_org(db: &DatabaseConnection, org_id: Uuid) {
    // Cascades to accounts, journal entries, bills, and sequences.
    organizations::Entity::delete_by_id(org_id)
        .exec(db)
        .await
        .ok();
}

fn provider_bill(org_id: Uuid, total: rust_decimal::Decimal) -> CreateBillInput {
    CreateBillInput {
        organization_id: org_id,
        bill_type: BillType::Provider,
        counterparty_name: "Corralón San Martín".to_string(),
        total,
        issued_on: chrono::NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        description: None,
        rubros: vec![RubroLine {
            rubro: "MATERIALES".to_string(),
            percentage: dec!(100),
        }],
    }
}

#[tokio::test]
async fn test_standard_chart_provisioning() {
    let Some(db) = try_connect().await else { return };
    let org = create_org(&db, true).await;
    let chart = ChartRepository::new(db.clone());

    assert!(!chart.has_standard_chart(org.id).await.unwrap());

    // Before provisioning the semantic bundle has nothing to offer.
    let resolver = AccountResolver::new(db.clone());
    let empty = resolver.main_accounts(org.id).await.unwrap();
    assert!(empty.cash.is_none());
    assert!(empty.accounts_payable.is_none());

    let by_code = chart.setup_standard_chart(org.id).await.unwrap();
    assert!(chart.has_standard_chart(org.id).await.unwrap());

    // Well-known codes must be present and wired to their parents.
    let cash = by_code.get(codes::CASH).expect("cash account");
    assert_eq!(cash.name, "Caja");
    let parent_id = cash.parent_id.expect("cash has a parent");
    let parent = by_code
        .values()
        .find(|a| a.id == parent_id)
        .expect("parent in same batch");
    assert!(cash.code.starts_with(&parent.code));

    let stats = chart.get_chart_stats(org.id).await.unwrap();
    assert_eq!(stats.total_accounts, by_code.len() as u64);
    assert_eq!(stats.active_accounts, stats.total_accounts);
    assert!(stats.assets > 0 && stats.expense > 0);

    // After provisioning every slot of the bundle resolves.
    let main = resolver.main_accounts(org.id).await.unwrap();
    assert_eq!(main.cash.map(|a| a.id), Some(cash.id));
    assert_eq!(
        main.accounts_receivable.map(|a| a.code),
        Some(codes::ACCOUNTS_RECEIVABLE.to_string())
    );
    assert!(main.accounts_payable.is_some());
    assert!(main.default_income.is_some());
    assert!(main.default_expense.is_some());
    assert!(main.payroll_expense.is_some());
    assert!(main.payroll_liability.is_some());

    // A second unguarded call hits the unique (organization, code)
    // constraint and rolls back, leaving the chart unchanged.
    assert!(chart.setup_standard_chart(org.id).await.is_err());
    let stats_after = chart.get_chart_stats(org.id).await.unwrap();
    assert_eq!(stats_after.total_accounts, stats.total_accounts);

    cleanup_org(&db, org.id).await;
}

#[tokio::test]
async fn test_provider_bill_posts_materials_against_payables() {
    let Some(db) = try_connect().await else { return };
    let org = create_org(&db, true).await;
    let chart = ChartRepository::new(db.clone());
    let by_code = chart.setup_standard_chart(org.id).await.unwrap();

    let bill = BillRepository::new(db.clone())
        .create_bill(provider_bill(org.id, dec!(100000)))
        .await
        .unwrap();

    let posted = AutoAccountingService::new(db.clone())
        .create_bill_entry(bill.bill.id)
        .await
        .unwrap()
        .expect("accounting enabled, entry posted");

    assert_eq!(posted.legs.len(), 2);
    let materials = &by_code["5.1.01"];
    let payables = &by_code[codes::ACCOUNTS_PAYABLE];

    let debit_leg = posted
        .legs
        .iter()
        .find(|l| l.debit_account_id.is_some())
        .unwrap();
    assert_eq!(debit_leg.debit_account_id, Some(materials.id));
    assert_eq!(debit_leg.debit, dec!(100000.00));
    assert_eq!(debit_leg.credit, dec!(0));

    let credit_leg = posted
        .legs
        .iter()
        .find(|l| l.credit_account_id.is_some())
        .unwrap();
    assert_eq!(credit_leg.credit_account_id, Some(payables.id));
    assert_eq!(credit_leg.credit, dec!(100000.00));

    for leg in &posted.legs {
        assert_eq!(leg.entry_number, posted.entry_number);
        assert!(leg.is_automatic);
        assert_eq!(leg.source_type, "BILL");
        assert_eq!(leg.source_id, bill.bill.id);
        assert_eq!(leg.exchange_rate, dec!(1));
        assert_eq!(leg.currency, "ARS");
    }

    cleanup_org(&db, org.id).await;
}

#[tokio::test]
async fn test_entry_numbers_start_at_one_and_increase() {
    let Some(db) = try_connect().await else { return };
    let org = create_org(&db, true).await;
    ChartRepository::new(db.clone())
        .setup_standard_chart(org.id)
        .await
        .unwrap();

    let bills = BillRepository::new(db.clone());
    let service = AutoAccountingService::new(db.clone());

    let mut numbers = Vec::new();
    for _ in 0..3 {
        let bill = bills
            .create_bill(provider_bill(org.id, dec!(5000)))
            .await
            .unwrap();
        let posted = service
            .create_bill_entry(bill.bill.id)
            .await
            .unwrap()
            .unwrap();
        numbers.push(posted.entry_number);
    }

    assert_eq!(numbers, vec!["000001", "000002", "000003"]);

    cleanup_org(&db, org.id).await;
}

#[tokio::test]
async fn test_disabled_accounting_posts_nothing() {
    let Some(db) = try_connect().await else { return };
    let org = create_org(&db, false).await;
    ChartRepository::new(db.clone())
        .setup_standard_chart(org.id)
        .await
        .unwrap();

    let service = AutoAccountingService::new(db.clone());
    let on = chrono::NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();

    // Every entry point declines while the flag is off, the bill-payment
    // path included (it gates on the organization reached through the bill).
    let bills = BillRepository::new(db.clone());
    let bill = bills
        .create_bill(provider_bill(org.id, dec!(1000)))
        .await
        .unwrap();
    assert!(service
        .create_bill_entry(bill.bill.id)
        .await
        .unwrap()
        .is_none());

    let bill_payment = bills
        .record_payment(bill.bill.id, dec!(400), on)
        .await
        .unwrap();
    assert!(service
        .create_bill_payment_entry(bill_payment.id)
        .await
        .unwrap()
        .is_none());

    let transaction = TreasuryRepository::new(db.clone())
        .create_transaction(CreateTransactionInput {
            organization_id: org.id,
            transaction_type: CashTransactionType::Income,
            amount: dec!(500),
            occurred_on: on,
            description: None,
        })
        .await
        .unwrap();
    assert!(service
        .create_transaction_entry(transaction.id)
        .await
        .unwrap()
        .is_none());

    let payroll = PayrollRepository::new(db.clone())
        .create_payroll(CreatePayrollInput {
            organization_id: org.id,
            period: "2026-03".to_string(),
            base: dec!(90000),
            overtime: dec!(0),
            bonuses: dec!(0),
            deductions: dec!(18000),
            net_pay: None,
            run_on: on,
        })
        .await
        .unwrap();
    assert!(service
        .create_payroll_entry(payroll.id)
        .await
        .unwrap()
        .is_none());

    let payment = PaymentRepository::new(db.clone())
        .create_payment(CreatePaymentInput {
            organization_id: org.id,
            counterparty_type: CounterpartyType::Client,
            counterparty_name: "Cliente Demo".to_string(),
            rubro: None,
            amount: dec!(250),
            paid_on: on,
        })
        .await
        .unwrap();
    assert!(service
        .create_payment_entry(payment.id)
        .await
        .unwrap()
        .is_none());

    let entries = JournalRepository::new(db.clone())
        .list_entries(org.id, JournalFilter::default())
        .await
        .unwrap();
    assert!(entries.is_empty());

    cleanup_org(&db, org.id).await;
}

#[tokio::test]
async fn test_bill_payment_direction_swaps_by_bill_type() {
    let Some(db) = try_connect().await else { return };
    let org = create_org(&db, true).await;
    let by_code = ChartRepository::new(db.clone())
        .setup_standard_chart(org.id)
        .await
        .unwrap();

    let bills = BillRepository::new(db.clone());
    let service = AutoAccountingService::new(db.clone());
    let cash = &by_code[codes::CASH];
    let paid_on = chrono::NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();

    // Provider bill: disbursement debits payables, credits cash.
    let provider = bills
        .create_bill(provider_bill(org.id, dec!(700)))
        .await
        .unwrap();
    let payment = bills
        .record_payment(provider.bill.id, dec!(700), paid_on)
        .await
        .unwrap();
    let posted = service
        .create_bill_payment_entry(payment.id)
        .await
        .unwrap()
        .unwrap();
    let debit = posted.legs.iter().find(|l| l.debit > dec!(0)).unwrap();
    let credit = posted.legs.iter().find(|l| l.credit > dec!(0)).unwrap();
    assert_eq!(
        debit.debit_account_id,
        Some(by_code[codes::ACCOUNTS_PAYABLE].id)
    );
    assert_eq!(credit.credit_account_id, Some(cash.id));

    // Client bill: collection debits cash, credits receivables.
    let mut client_input = provider_bill(org.id, dec!(700));
    client_input.bill_type = BillType::Client;
    let client = bills.create_bill(client_input).await.unwrap();
    let payment = bills
        .record_payment(client.bill.id, dec!(700), paid_on)
        .await
        .unwrap();
    let posted = service
        .create_bill_payment_entry(payment.id)
        .await
        .unwrap()
        .unwrap();
    let debit = posted.legs.iter().find(|l| l.debit > dec!(0)).unwrap();
    let credit = posted.legs.iter().find(|l| l.credit > dec!(0)).unwrap();
    assert_eq!(debit.debit_account_id, Some(cash.id));
    assert_eq!(
        credit.credit_account_id,
        Some(by_code[codes::ACCOUNTS_RECEIVABLE].id)
    );

    cleanup_org(&db, org.id).await;
}

#[tokio::test]
async fn test_delete_automatic_entries_reverses_a_source() {
    let Some(db) = try_connect().await else { return };
    let org = create_org(&db, true).await;
    ChartRepository::new(db.clone())
        .setup_standard_chart(org.id)
        .await
        .unwrap();

    let bill = BillRepository::new(db.clone())
        .create_bill(provider_bill(org.id, dec!(12000)))
        .await
        .unwrap();
    AutoAccountingService::new(db.clone())
        .create_bill_entry(bill.bill.id)
        .await
        .unwrap()
        .unwrap();

    let journal = JournalRepository::new(db.clone());
    assert!(journal
        .has_entries_for_source(SourceType::Bill, bill.bill.id)
        .await
        .unwrap());

    let deleted = journal
        .delete_automatic_entries(SourceType::Bill, bill.bill.id)
        .await
        .unwrap();
    assert_eq!(deleted, 2);
    assert!(!journal
        .has_entries_for_source(SourceType::Bill, bill.bill.id)
        .await
        .unwrap());

    cleanup_org(&db, org.id).await;
}

#[tokio::test]
async fn test_category_mapping_override_beats_static_table() {
    let Some(db) = try_connect().await else { return };
    let org = create_org(&db, true).await;
    let by_code = ChartRepository::new(db.clone())
        .setup_standard_chart(org.id)
        .await
        .unwrap();

    let resolver = AccountResolver::new(db.clone());

    // Static table sends MATERIALES expense to 5.1.01.
    let account = resolver
        .account_for_rubro(org.id, "materiales", false)
        .await
        .unwrap();
    assert_eq!(account.code, "5.1.01");

    // Tenant override reroutes it to generic expenses.
    resolver
        .set_mapping_override(org.id, "materiales", codes::DEFAULT_INCOME, codes::DEFAULT_EXPENSE)
        .await
        .unwrap();
    let account = resolver
        .account_for_rubro(org.id, "materiales", false)
        .await
        .unwrap();
    assert_eq!(account.id, by_code[codes::DEFAULT_EXPENSE].id);

    // Unknown rubros still fall back to the default pair.
    let fallback = resolver
        .account_for_rubro(org.id, "CATERING", true)
        .await
        .unwrap();
    assert_eq!(fallback.code, codes::DEFAULT_INCOME);

    cleanup_org(&db, org.id).await;
}

#[tokio::test]
async fn test_every_entry_number_balances() {
    let Some(db) = try_connect().await else { return };
    let org = create_org(&db, true).await;
    ChartRepository::new(db.clone())
        .setup_standard_chart(org.id)
        .await
        .unwrap();

    let bills = BillRepository::new(db.clone());
    let service = AutoAccountingService::new(db.clone());

    // Uneven three-way split exercises the rounding tolerance.
    let mut input = provider_bill(org.id, dec!(100));
    input.rubros = vec![
        RubroLine {
            rubro: "MATERIALES".to_string(),
            percentage: dec!(33.33),
        },
        RubroLine {
            rubro: "FLETES".to_string(),
            percentage: dec!(33.33),
        },
        RubroLine {
            rubro: "COMBUSTIBLE".to_string(),
            percentage: dec!(33.34),
        },
    ];
    let bill = bills.create_bill(input).await.unwrap();
    service.create_bill_entry(bill.bill.id).await.unwrap().unwrap();

    let entries = JournalRepository::new(db.clone())
        .list_entries(org.id, JournalFilter::default())
        .await
        .unwrap();

    let mut by_number: std::collections::HashMap<&str, (rust_decimal::Decimal, rust_decimal::Decimal)> =
        std::collections::HashMap::new();
    for row in &entries {
        let slot = by_number.entry(row.entry_number.as_str()).or_default();
        slot.0 += row.debit;
        slot.1 += row.credit;
    }
    for (number, (debit, credit)) in by_number {
        assert!(
            (debit - credit).abs() <= dec!(0.01),
            "entry {number} unbalanced: {debit} vs {credit}"
        );
    }

    cleanup_org(&db, org.id).await;
}
