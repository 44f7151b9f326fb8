// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Ctx, period_from};
use crate::aggregate::{
    DashboardStats, SortKey, SortOrder, dashboard_stats, expenses_by_category, sort_expenses,
    with_percentages,
};
use crate::models::CategoryExpense;
use crate::period::{Period, filter_by_period};
use crate::utils::{category_name, fmt_money, fmt_pct, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
pub struct Dashboard {
    pub period: Period,
    pub stats: DashboardStats,
    pub spending: Vec<CategoryExpense>,
}

pub fn build(ctx: &Ctx, sub: &clap::ArgMatches) -> Dashboard {
    let period = period_from(sub);
    let txs = filter_by_period(&ctx.data.transactions, period, ctx.today);
    let stats = dashboard_stats(
        txs.iter().copied(),
        &ctx.data.categories,
        ctx.settings.recent_limit,
    );
    let mut spending = with_percentages(expenses_by_category(
        txs,
        &ctx.data.categories,
        &ctx.settings.fallback_color,
    ));
    sort_expenses(&mut spending, SortKey::Amount, SortOrder::Desc);
    Dashboard {
        period,
        stats,
        spending,
    }
}

pub fn handle(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let dash = build(ctx, sub);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &dash)? {
        return Ok(());
    }
    let ccy = &ctx.settings.currency;
    let s = &dash.stats;

    println!("Dashboard ({}, as of {})", dash.period, ctx.today);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Balance", "Savings rate", "Transactions", "Categories"],
            vec![vec![
                fmt_money(&s.total_income, ccy),
                fmt_money(&s.total_expenses, ccy),
                fmt_money(&s.balance, ccy),
                fmt_pct(s.savings_rate),
                s.transactions.to_string(),
                s.categories.to_string(),
            ]],
        )
    );

    let spending = dash
        .spending
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                fmt_money(&c.amount, ccy),
                format!("{}%", c.percentage),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Share"], spending));

    let recent = s
        .recent
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.description.clone(),
                category_name(ctx.data, t.category_id),
                fmt_money(&t.amount, ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Category", "Amount"], recent)
    );
    Ok(())
}
