// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneyboard::error::StoreError;
use moneyboard::models::TxType;
use moneyboard::store::Dataset;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::fs;
use tempfile::tempdir;

const SAMPLE: &str = r##"{
  "categories": [
    { "id": 1, "name": "Groceries", "color": "#00ff00", "icon": "Cart" }
  ],
  "transactions": [
    {
      "id": 7,
      "date": "2025-01-02",
      "description": "Corner Shop",
      "amount": "-12.34",
      "category_id": 1,
      "type": "expense",
      "account": "Checking"
    },
    {
      "id": 8,
      "date": "2025-01-03",
      "description": "Refund",
      "amount": "5",
      "category_id": null,
      "type": "income",
      "account": "Checking"
    }
  ]
}"##;

#[test]
fn loads_partial_dataset_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, SAMPLE).unwrap();

    let ds = Dataset::load_from_path(&path).unwrap();
    assert_eq!(ds.categories.len(), 1);
    assert_eq!(ds.categories[0].budget, None);
    assert_eq!(ds.transactions.len(), 2);
    assert_eq!(ds.transactions[0].amount, Decimal::new(-1234, 2));
    assert_eq!(ds.transactions[0].kind, TxType::Expense);
    assert_eq!(ds.transactions[1].category_id, None);
    assert!(ds.stocks.is_empty());
    assert!(ds.goals.is_empty());
}

#[test]
fn open_without_path_uses_seed() {
    match Dataset::open(None).unwrap() {
        Cow::Borrowed(ds) => {
            assert_eq!(ds.transactions.len(), 50);
            assert_eq!(ds.categories.len(), 12);
            assert_eq!(ds.stocks.len(), 5);
            assert_eq!(ds.dividends.len(), 10);
            assert_eq!(ds.goals.len(), 8);
        }
        Cow::Owned(_) => panic!("expected the seeded dataset"),
    }
}

#[test]
fn read_and_parse_errors_are_distinct() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        Dataset::load_from_path(&missing),
        Err(StoreError::Read { .. })
    ));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    let err = Dataset::load_from_path(&broken).unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn lookups_by_name_id_and_ticker() {
    let ds = Dataset::seeded();
    assert_eq!(ds.find_category("food").unwrap().id, 1);
    assert_eq!(ds.find_category(" 12 ").unwrap().name, "Taxes");
    assert!(ds.find_category("Pets").is_none());
    assert_eq!(ds.stock_by_ticker("petr4").unwrap().id, 1);
    assert!(ds.stock(9).is_none());
}

#[test]
fn seeded_categories_have_unique_colors() {
    let ds = Dataset::seeded();
    let mut colors: Vec<_> = ds.categories.iter().map(|c| c.color.as_str()).collect();
    colors.sort_unstable();
    colors.dedup();
    assert_eq!(colors.len(), ds.categories.len());
}
