//! Database seeder for Obra development and testing.
//!
//! Seeds a demo construction company with the standard chart of accounts and
//! a handful of posted business events so the journal has data to look at.
//!
//! Usage: cargo run --bin seeder

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use obra_db::entities::{
    organizations,
    sea_orm_active_enums::{BillType, CashTransactionType},
};
use obra_db::repositories::{
    AutoAccountingService, BillRepository, ChartRepository, CreateBillInput, CreatePayrollInput,
    CreateTransactionInput, PayrollRepository, RubroLine, TreasuryRepository,
};

/// Demo organization ID (consistent across seed runs).
const DEMO_ORG_ID: &str = "00000000-0000-0000-0000-000000000001";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = obra_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo organization...");
    let fresh = seed_demo_organization(&db).await;

    println!("Provisioning chart of accounts...");
    seed_standard_chart(&db).await;

    if fresh {
        println!("Seeding business events...");
        seed_business_events(&db).await;
    } else {
        println!("  Demo organization already existed, skipping events...");
    }

    println!("Seeding complete!");
}

fn demo_org_id() -> Uuid {
    Uuid::parse_str(DEMO_ORG_ID).expect("valid demo org uuid")
}

/// Seeds the demo organization. Returns true when it was newly created.
async fn seed_demo_organization(db: &DatabaseConnection) -> bool {
    if organizations::Entity::find_by_id(demo_org_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo organization already exists, skipping...");
        return false;
    }

    let now = chrono::Utc::now().into();
    let org = organizations::ActiveModel {
        id: Set(demo_org_id()),
        name: Set("Constructora Demo SA".to_string()),
        currency: Set("ARS".to_string()),
        enable_accounting: Set(true),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };
    org.insert(db)
        .await
        .expect("Failed to create demo organization");
    true
}

/// Provisions the standard chart, guarded against re-runs.
async fn seed_standard_chart(db: &DatabaseConnection) {
    let chart = ChartRepository::new(db.clone());
    if chart
        .has_standard_chart(demo_org_id())
        .await
        .expect("Failed to check for existing chart")
    {
        println!("  Chart already provisioned, skipping...");
        return;
    }

    let by_code = chart
        .setup_standard_chart(demo_org_id())
        .await
        .expect("Failed to provision standard chart");
    println!("  Created {} accounts", by_code.len());
}

/// Seeds a provider bill, a cash income, and a payroll run, posting each.
async fn seed_business_events(db: &DatabaseConnection) {
    let org_id = demo_org_id();
    let service = AutoAccountingService::new(db.clone());

    let bill = BillRepository::new(db.clone())
        .create_bill(CreateBillInput {
            organization_id: org_id,
            bill_type: BillType::Provider,
            counterparty_name: "Corralón El Constructor".to_string(),
            total: dec!(100000),
            issued_on: date(2026, 3, 5),
            description: Some("Cemento y hierro para obra Av. Rivadavia".to_string()),
            rubros: vec![
                RubroLine {
                    rubro: "MATERIALES".to_string(),
                    percentage: dec!(80),
                },
                RubroLine {
                    rubro: "FLETES".to_string(),
                    percentage: dec!(20),
                },
            ],
        })
        .await
        .expect("Failed to create demo bill");
    let posted = service
        .create_bill_entry(bill.bill.id)
        .await
        .expect("Failed to post demo bill")
        .expect("accounting enabled for demo org");
    println!("  Bill posted under entry {}", posted.entry_number);

    let tx = TreasuryRepository::new(db.clone())
        .create_transaction(CreateTransactionInput {
            organization_id: org_id,
            transaction_type: CashTransactionType::Income,
            amount: dec!(250000),
            occurred_on: date(2026, 3, 10),
            description: Some("Certificado de obra cobrado".to_string()),
        })
        .await
        .expect("Failed to create demo transaction");
    let posted = service
        .create_transaction_entry(tx.id)
        .await
        .expect("Failed to post demo transaction")
        .expect("accounting enabled for demo org");
    println!("  Transaction posted under entry {}", posted.entry_number);

    let payroll = PayrollRepository::new(db.clone())
        .create_payroll(CreatePayrollInput {
            organization_id: org_id,
            period: "2026-03".to_string(),
            base: dec!(90000),
            overtime: dec!(12000),
            bonuses: dec!(5000),
            deductions: dec!(18000),
            net_pay: None,
            run_on: date(2026, 3, 31),
        })
        .await
        .expect("Failed to create demo payroll");
    let posted = service
        .create_payroll_entry(payroll.id)
        .await
        .expect("Failed to post demo payroll")
        .expect("accounting enabled for demo org");
    println!("  Payroll posted under entry {}", posted.entry_number);
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}
