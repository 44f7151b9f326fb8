// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyboard::commands::{Ctx, dashboard, investments, reports};
use moneyboard::config::Settings;
use moneyboard::period::Period;
use moneyboard::store::Dataset;
use moneyboard::cli;
use rust_decimal::Decimal;

fn setup() -> Settings {
    Settings::default()
}

fn ctx(settings: &Settings) -> Ctx<'_> {
    Ctx {
        data: Dataset::seeded(),
        settings,
        today: NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(),
    }
}

fn leaf(argv: &[&str]) -> clap::ArgMatches {
    let mut m = cli::build_cli().get_matches_from(argv);
    loop {
        let next = match m.subcommand() {
            Some((_, sub)) => sub.clone(),
            None => return m,
        };
        m = next;
    }
}

#[test]
fn cashflow_is_newest_first_and_limited() {
    let settings = setup();
    let sub = leaf(&["moneyboard", "report", "cashflow", "--months", "2"]);
    let rows = reports::cashflow_rows(&ctx(&settings), &sub);
    let months: Vec<_> = rows.iter().map(|r| r.month.as_str()).collect();
    assert_eq!(months, ["2024-03", "2024-02"]);
    assert_eq!(rows[1].income, Decimal::from(6700));
}

#[test]
fn trends_default_to_configured_months() {
    let mut settings = setup();
    settings.trend_months = 1;
    let sub = leaf(&["moneyboard", "report", "trends"]);
    let rows = reports::trend_rows(&ctx(&settings), &sub);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].month, "2024-03");
}

#[test]
fn dashboard_for_last_month() {
    let settings = setup();
    let sub = leaf(&["moneyboard", "dashboard", "--period", "month"]);
    let dash = dashboard::build(&ctx(&settings), &sub);
    assert_eq!(dash.period, Period::Month);
    assert_eq!(dash.stats.transactions, 11);
    assert_eq!(dash.stats.total_income, Decimal::from(6400));
    assert_eq!(dash.stats.recent.len(), 5);
    assert_eq!(dash.spending[0].category, "Housing");
}

#[test]
fn dashboard_unknown_period_shows_everything() {
    let settings = setup();
    let sub = leaf(&["moneyboard", "dashboard", "--period", "decade"]);
    let dash = dashboard::build(&ctx(&settings), &sub);
    assert_eq!(dash.period, Period::All);
    assert_eq!(dash.stats.transactions, 50);
}

#[test]
fn dividend_report_for_one_ticker() {
    let settings = setup();
    let sub = leaf(&["moneyboard", "invest", "dividends", "--ticker", "vale3"]);
    let report = investments::dividend_report(&ctx(&settings), &sub).unwrap();
    assert_eq!(report.stats.payments, 2);
    assert_eq!(report.stats.total_received, "217.50".parse::<Decimal>().unwrap());
    // the April payment is still ahead of the reference date
    assert!(!report.payments[0].paid);
    assert!(report.payments[1].paid);

    let sub = leaf(&["moneyboard", "invest", "dividends", "--ticker", "AAPL"]);
    assert!(investments::dividend_report(&ctx(&settings), &sub).is_err());
}
