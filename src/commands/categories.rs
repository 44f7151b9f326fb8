// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Ctx, filter_from};
use crate::aggregate::{
    SortKey, SortOrder, expenses_by_category, sort_expenses, with_percentages,
};
use crate::models::CategoryExpense;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let cats = &ctx.data.categories;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), cats)? {
                let data = cats
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name.clone(),
                            c.color.clone(),
                            c.icon.clone(),
                            c.budget
                                .map(|b| fmt_money(&b, &ctx.settings.currency))
                                .unwrap_or_else(|| "-".into()),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Category", "Color", "Icon", "Budget"], data)
                );
            }
        }
        Some(("breakdown", sub)) => {
            let rows = breakdown_rows(ctx, sub)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
                let data = rows
                    .iter()
                    .map(|r| {
                        vec![
                            r.category.clone(),
                            format!("{:.2}", r.amount),
                            format!("{}%", r.percentage),
                            r.color.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Category", "Spent", "Share", "Color"], data)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

/// Expense aggregates for the filtered transactions, with shares and ordering
/// applied.
pub fn breakdown_rows(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<Vec<CategoryExpense>> {
    let mut filter = filter_from(ctx, sub)?;
    filter.expenses_only = true;
    let txs = filter.apply(&ctx.data.transactions, &ctx.data.categories, ctx.today);

    let mut rows = with_percentages(expenses_by_category(
        txs,
        &ctx.data.categories,
        &ctx.settings.fallback_color,
    ));
    let key = sub
        .get_one::<String>("sort")
        .map(|s| SortKey::from_token(s))
        .unwrap_or_default();
    let order = sub
        .get_one::<String>("order")
        .map(|s| SortOrder::from_token(s))
        .unwrap_or_default();
    sort_expenses(&mut rows, key, order);
    Ok(rows)
}
