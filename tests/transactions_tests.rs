// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyboard::commands::Ctx;
use moneyboard::config::Settings;
use moneyboard::models::TxType;
use moneyboard::store::Dataset;
use moneyboard::{cli, commands::transactions};

fn setup() -> Settings {
    Settings::default()
}

fn rows_for(settings: &Settings, args: &[&str]) -> anyhow::Result<Vec<transactions::TransactionRow>> {
    let ctx = Ctx {
        data: Dataset::seeded(),
        settings,
        today: NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(),
    };
    let mut argv = vec!["moneyboard", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(&ctx, list_m);
        }
    }
    panic!("no tx list subcommand");
}

#[test]
fn list_limit_respected() {
    let settings = setup();
    let rows = rows_for(&settings, &["--limit", "3"]).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].date, "2024-03-25");
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, [30, 29, 28]);
}

#[test]
fn list_filters_by_category_and_period() {
    let settings = setup();
    let rows = rows_for(&settings, &["--category", "food", "--period", "month"]).unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, [27, 22]);
    assert!(rows.iter().all(|r| r.category == "Food"));
}

#[test]
fn list_by_type_and_account() {
    let settings = setup();
    let income = rows_for(&settings, &["--type", "income"]).unwrap();
    assert_eq!(income.len(), 6);
    assert!(income.iter().all(|r| r.r#type == TxType::Income));

    let debit = rows_for(&settings, &["--account", "debit card", "--match", "^uber$"]).unwrap();
    assert_eq!(debit.len(), 2);
}

#[test]
fn unknown_category_is_an_error() {
    let settings = setup();
    let err = rows_for(&settings, &["--category", "Pets"]).err().unwrap();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn bad_pattern_is_an_error() {
    let settings = setup();
    assert!(rows_for(&settings, &["--match", "(unclosed"]).is_err());
}
