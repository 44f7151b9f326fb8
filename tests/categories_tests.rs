// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyboard::models::CategoryExpense;
use moneyboard::commands::{Ctx, categories};
use moneyboard::config::Settings;
use moneyboard::store::Dataset;
use moneyboard::cli;
use rust_decimal::Decimal;

fn setup() -> Settings {
    Settings::default()
}

fn breakdown(settings: &Settings, args: &[&str]) -> anyhow::Result<Vec<CategoryExpense>> {
    let ctx = Ctx {
        data: Dataset::seeded(),
        settings,
        today: NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(),
    };
    let mut argv = vec!["moneyboard", "category", "breakdown"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("category", cat_m)) = matches.subcommand() {
        if let Some(("breakdown", sub)) = cat_m.subcommand() {
            return categories::breakdown_rows(&ctx, sub);
        }
    }
    panic!("no category breakdown subcommand");
}

#[test]
fn largest_category_first_by_default() {
    let settings = setup();
    let rows = breakdown(&settings, &[]).unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].category, "Housing");
    assert_eq!(rows[0].amount, "3760.80".parse::<Decimal>().unwrap());
    assert!(rows.windows(2).all(|w| w[0].amount >= w[1].amount));
    assert!(rows.iter().all(|r| r.category != "Salary"));
}

#[test]
fn sort_by_name_ascending() {
    let settings = setup();
    let rows = breakdown(&settings, &["--sort", "category", "--order", "asc"]).unwrap();
    let names: Vec<_> = rows.iter().map(|r| r.category.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert_eq!(names[0], "Education");
}

#[test]
fn month_breakdown_with_shares() {
    let settings = setup();
    let rows = breakdown(&settings, &["--period", "month"]).unwrap();
    let shopping = rows.iter().find(|r| r.category == "Shopping").unwrap();
    assert_eq!(shopping.amount, Decimal::from(800));
    let total: Decimal = rows.iter().map(|r| r.percentage).sum();
    assert!((total - Decimal::from(100)).abs() <= Decimal::from(rows.len()));
}

#[test]
fn search_narrows_to_matching_rows() {
    let settings = setup();
    let rows = breakdown(&settings, &["--search", "uber"]).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Transport");
    assert_eq!(rows[0].amount, Decimal::from(80));
    assert_eq!(rows[0].percentage, Decimal::from(100));
}
