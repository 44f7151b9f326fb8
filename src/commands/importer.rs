// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use crate::import::{ImportQueue, ImportStatus, OutcomeSource, SimulatedOutcome, preview_rows};
use crate::utils::{category_name, fmt_money, fmt_pct, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use serde_json::json;
use std::fs;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("files", sub)) => import_files(ctx, sub),
        Some(("preview", sub)) => preview(ctx, sub),
        _ => Ok(()),
    }
}

/// Queues every path and drives each one to a final status. File contents are
/// never read; only the size is looked up when the file exists.
pub fn run_import<S: OutcomeSource>(
    ctx: &Ctx,
    paths: &[String],
    source: S,
    no_delay: bool,
) -> Result<ImportQueue<S>> {
    let mut queue = ImportQueue::new(source, &ctx.settings.import);
    if no_delay {
        queue = queue.without_delays();
    }
    for raw in paths {
        let path = raw.trim();
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        queue
            .add(path, size)
            .with_context(|| format!("Cannot import {}", path))?;
    }
    queue.run_to_completion();
    Ok(queue)
}

fn import_files(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let paths: Vec<String> = sub
        .get_many::<String>("paths")
        .context("no files given")?
        .cloned()
        .collect();
    let seed = sub.get_one::<u64>("seed").copied();
    let source = SimulatedOutcome::new(ctx.settings.import.success_rate, seed);
    let queue = run_import(ctx, &paths, source, sub.get_flag("no-delay"))?;
    let summary = queue.summary();

    let out = json!({ "files": queue.files(), "summary": summary });
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &out)? {
        return Ok(());
    }
    let ccy = &ctx.settings.currency;
    let rows = queue
        .files()
        .iter()
        .map(|f| {
            let detail = match &f.status {
                ImportStatus::Completed {
                    transactions,
                    total_amount,
                } => format!("{} transactions, {}", transactions, fmt_money(total_amount, ccy)),
                ImportStatus::Failed { message } => message.clone(),
                other => other.label().to_string(),
            };
            vec![
                f.id.to_string(),
                f.name.clone(),
                format!("{:?}", f.format).to_lowercase(),
                f.size.to_string(),
                f.status.label().to_string(),
                detail,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "File", "Format", "Bytes", "Status", "Detail"], rows)
    );
    println!(
        "{}",
        pretty_table(
            &["Files", "Completed", "Failed", "Transactions", "Amount", "Success"],
            vec![vec![
                summary.files.to_string(),
                summary.completed.to_string(),
                summary.failed.to_string(),
                summary.transactions.to_string(),
                fmt_money(&summary.total_amount, ccy),
                fmt_pct(summary.success_pct),
            ]],
        )
    );
    Ok(())
}

fn preview(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let rows = preview_rows();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let data = rows
        .iter()
        .map(|r| {
            vec![
                r.date.to_string(),
                r.description.clone(),
                format!("{:.2}", r.amount),
                category_name(ctx.data, r.category_id),
                format!("{}%", r.confidence),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Date", "Description", "Amount", "Category", "Confidence"],
            data
        )
    );
    Ok(())
}
