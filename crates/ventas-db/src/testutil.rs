//! Shared helpers for the integration-style tests in this crate.
//!
//! Every test works against a fresh in-memory SQLite database with the full
//! migration set applied, so tests never see each other's rows.

use chrono::NaiveDate;
use ventas_core::{Client, Company, Money, Product, Role, Worker};

use crate::pool::{Database, DbConfig};

/// Opens a brand-new in-memory database with migrations applied.
pub(crate) async fn fresh_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database should open")
}

/// Shorthand for building dates in test data.
pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// A seeded baseline every order/line test can lean on: two companies, two
/// clients, one worker, and two priced products.
pub(crate) struct Fixture {
    pub company: Company,
    pub other_company: Company,
    pub client: Client,
    pub other_client: Client,
    pub worker: Worker,
    pub product: Product,
    pub other_product: Product,
}

impl Fixture {
    pub(crate) async fn seed(db: &Database) -> Self {
        let company = db
            .companies()
            .save(Company::new("Bodega Central", "J-1001"))
            .await
            .unwrap();
        let other_company = db
            .companies()
            .save(Company::new("Sucursal Norte", "J-2002"))
            .await
            .unwrap();
        let client = db
            .clients()
            .save(Client::new("Ana Ruiz", "V-100"))
            .await
            .unwrap();
        let other_client = db
            .clients()
            .save(Client::new("Beto Cruz", "V-200"))
            .await
            .unwrap();
        let worker = db
            .workers()
            .save(Worker::new("Luis Paz", "V-300", Role::Staff, "s3cret"))
            .await
            .unwrap();
        let product = db
            .products()
            .save(Product::new("Arroz 1kg", Money::from_cents(250)))
            .await
            .unwrap();
        let other_product = db
            .products()
            .save(Product::new("Frijol 1kg", Money::from_cents(380)))
            .await
            .unwrap();

        Fixture {
            company,
            other_company,
            client,
            other_client,
            worker,
            product,
            other_product,
        }
    }
}
