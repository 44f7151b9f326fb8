// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Ctx, period_from};
use crate::aggregate::{
    BudgetStatus, GoalLevel, GoalStatus, budget_status, evaluate_goal, expenses_by_category,
    spent_in_month,
};
use crate::period::filter_by_period;
use crate::utils::{category_name, fmt_pct, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("status", sub)) => status(ctx, sub)?,
        Some(("goals", sub)) => goals(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn status_rows(ctx: &Ctx, sub: &clap::ArgMatches) -> Vec<BudgetStatus> {
    let txs = filter_by_period(&ctx.data.transactions, period_from(sub), ctx.today);
    let rows = expenses_by_category(
        txs.iter().copied(),
        &ctx.data.categories,
        &ctx.settings.fallback_color,
    );
    budget_status(
        &rows,
        txs,
        &ctx.data.categories,
        ctx.settings.default_budget,
    )
}

fn level_label(level: GoalLevel) -> &'static str {
    match level {
        GoalLevel::Ok => "ok",
        GoalLevel::Warning => "warning",
        GoalLevel::Exceeded => "exceeded",
    }
}

fn status(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let data = status_rows(ctx, sub);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.category.clone(),
                    format!("{:.2}", b.budget),
                    format!("{:.2}", b.spent),
                    fmt_pct(b.used_pct),
                    if b.over_budget {
                        format!("exceeded by {:.2}", b.remaining.abs())
                    } else {
                        format!("{:.2} left", b.remaining)
                    },
                    level_label(b.level).to_string(),
                    b.transactions.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Budget", "Spent", "Used", "Remaining", "Level", "Txns"],
                rows
            )
        );
    }
    Ok(())
}

/// Goal progress. With `--month`, spending is recomputed from that month's
/// transactions instead of the stored figure.
pub fn goal_rows(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<Vec<GoalStatus>> {
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    Ok(ctx
        .data
        .goals
        .iter()
        .map(|g| {
            let spent = match &month {
                Some(m) => spent_in_month(&ctx.data.transactions, g.category_id, m),
                None => g.current_spent,
            };
            evaluate_goal(g, &category_name(ctx.data, Some(g.category_id)), spent)
        })
        .collect())
}

fn goals(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let data = goal_rows(ctx, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|g| {
                vec![
                    g.category.clone(),
                    format!("{:.2}", g.limit),
                    format!("{:.2}", g.spent),
                    fmt_pct(g.used_pct),
                    format!("{}%", g.alert_threshold),
                    level_label(g.level).to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Limit", "Spent", "Used", "Alert at", "Level"],
                rows
            )
        );
    }
    Ok(())
}
