// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Ctx, filter_from};
use crate::models::TxType;
use crate::utils::{category_name, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        list(ctx, sub)?;
    }
    Ok(())
}

fn list(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ctx, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.description.clone(),
                    format!("{:.2}", r.amount),
                    r.r#type.to_string(),
                    r.category.clone(),
                    r.account.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Description", "Amount", "Type", "Category", "Account"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: rust_decimal::Decimal,
    pub r#type: TxType,
    pub category: String,
    pub account: String,
}

/// Newest first, ties broken by id.
pub fn query_rows(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filter = filter_from(ctx, sub)?;
    let kind = sub.get_one::<String>("type").map(|s| s.as_str());

    let mut txs = filter.apply(&ctx.data.transactions, &ctx.data.categories, ctx.today);
    txs.retain(|t| match kind {
        Some("income") => t.is_income(),
        Some("expense") => t.is_expense(),
        _ => true,
    });
    txs.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            description: t.description.clone(),
            amount: t.amount,
            r#type: t.kind,
            category: category_name(ctx.data, t.category_id),
            account: t.account.clone(),
        })
        .collect())
}
