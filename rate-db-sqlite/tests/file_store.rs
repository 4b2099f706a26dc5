use std::path::PathBuf;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rate_core::db::{DbConfig, RepositoryRegistry};
use rate_core::{NewTransaction, TransactionKind};
use rate_db_sqlite::SqliteRepositoryFactory;
use rust_decimal_macros::dec;

fn temp_db(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{name}-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

#[tokio::test]
async fn transactions_survive_reopening_the_file() {
    let path = temp_db("rate-db-sqlite-reopen");
    let config = DbConfig {
        backend: "sqlite".to_string(),
        connection_string: path.display().to_string(),
    };

    {
        let repo = registry().create(&config).await.unwrap();
        repo.add_transaction(NewTransaction {
            kind: TransactionKind::Expense,
            amount: dec!(129.99),
            date: NaiveDate::from_ymd_opt(2025, 5, 6).unwrap(),
            category: Some("Software".to_string()),
            description: Some("IDE licence".to_string()),
        })
        .await
        .unwrap();
    }

    let reopened = registry().create(&config).await.unwrap();
    let transactions = reopened.list_transactions().await.unwrap();

    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].id, 1);
    assert_eq!(transactions[0].amount, dec!(129.99));
    assert_eq!(transactions[0].category.as_deref(), Some("Software"));

    let _ = std::fs::remove_file(&path);
}
