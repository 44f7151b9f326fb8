// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Ctx, period_from};
use crate::aggregate::{MonthlyCashflow, MonthlyTrend, monthly_cashflow, monthly_category_trends};
use crate::period::filter_by_period;
use crate::utils::{fmt_pct, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("cashflow", sub)) => cashflow(ctx, sub)?,
        Some(("trends", sub)) => trends(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

/// The most recent `--months` months, newest first.
pub fn cashflow_rows(ctx: &Ctx, sub: &clap::ArgMatches) -> Vec<MonthlyCashflow> {
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    monthly_cashflow(&ctx.data.transactions)
        .into_iter()
        .rev()
        .take(months)
        .collect()
}

fn cashflow(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let data = cashflow_rows(ctx, sub);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|m| {
                vec![
                    m.month.clone(),
                    format!("{:.2}", m.income),
                    format!("{:.2}", m.expenses),
                    format!("{:.2}", m.balance),
                    fmt_pct(m.savings_rate),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Balance", "Saved"], rows)
        );
    }
    Ok(())
}

pub fn trend_rows(ctx: &Ctx, sub: &clap::ArgMatches) -> Vec<MonthlyTrend> {
    let months = sub
        .get_one::<usize>("months")
        .copied()
        .unwrap_or(ctx.settings.trend_months);
    let txs = filter_by_period(&ctx.data.transactions, period_from(sub), ctx.today);
    monthly_category_trends(txs, &ctx.data.categories, months)
}

fn trends(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let data = trend_rows(ctx, sub);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .flat_map(|m| {
                m.by_category
                    .iter()
                    .map(|(cat, amt)| vec![m.month.clone(), cat.clone(), format!("{:.2}", amt)])
                    .collect::<Vec<_>>()
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Category", "Spent"], rows));
    }
    Ok(())
}
