// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneyboard::commands::doctor;
use moneyboard::store::Dataset;
use rust_decimal::Decimal;

fn setup() -> Dataset {
    Dataset::seeded().clone()
}

fn kinds(ds: &Dataset) -> Vec<&'static str> {
    doctor::check(ds).into_iter().map(|i| i.kind).collect()
}

#[test]
fn seeded_data_is_clean() {
    assert!(doctor::check(&setup()).is_empty());
}

#[test]
fn reports_dangling_references() {
    let mut ds = setup();
    ds.transactions[0].category_id = Some(404);
    ds.dividends[0].stock_id = 77;
    ds.dividends[1].ticker = "XXXX3".into();
    ds.goals[0].category_id = 500;
    assert_eq!(
        kinds(&ds),
        [
            "txn_unknown_category",
            "dividend_unknown_stock",
            "dividend_ticker_mismatch",
            "goal_unknown_category",
        ]
    );
}

#[test]
fn reports_sign_and_quantity_problems() {
    let mut ds = setup();
    // id 1 is income
    ds.transactions[0].amount = Decimal::from(-10);
    ds.stocks[0].quantity = Decimal::ZERO;
    assert_eq!(kinds(&ds), ["txn_sign_mismatch", "stock_non_positive_quantity"]);
}

#[test]
fn reports_each_duplicate_id_once() {
    let mut ds = setup();
    let copy = ds.transactions[3].clone();
    ds.transactions.push(copy.clone());
    ds.transactions.push(copy);
    let issues = doctor::check(&ds);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, "duplicate_id");
    assert_eq!(issues[0].detail, "transactions id 4");
}

#[test]
fn reports_position_value_out_of_range() {
    let mut ds = setup();
    ds.stocks[0].quantity = Decimal::MAX;
    assert_eq!(kinds(&ds), ["stock_value_overflow"]);
}
