// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Ctx, period_from};
use crate::period::filter_by_period;
use crate::utils::category_name;
use anyhow::{Context, Result, bail};
use serde_json::json;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ctx, sub),
        _ => Ok(()),
    }
}

fn export_transactions(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = sub.get_one::<String>("out").context("--out is required")?.trim();

    let mut txs = filter_by_period(&ctx.data.transactions, period_from(sub), ctx.today);
    txs.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create CSV {}", out))?;
            wtr.write_record([
                "id", "date", "description", "amount", "type", "category", "account",
            ])?;
            for t in &txs {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.to_string(),
                    t.description.clone(),
                    t.amount.to_string(),
                    t.kind.to_string(),
                    category_name(ctx.data, t.category_id),
                    t.account.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = txs
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.date,
                        "description": t.description,
                        "amount": t.amount,
                        "type": t.kind,
                        "category": category_name(ctx.data, t.category_id),
                        "account": t.account,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
