// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use crate::investments::{
    DividendRow, DividendStats, dividend_rows, dividend_stats, dividend_timeline,
    dividends_for_stock, investment_summary, sector_allocation, stock_positions,
};
use crate::utils::{fmt_money, fmt_pct, id_for_stock, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::Datelike;
use serde::Serialize;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(ctx, sub)?,
        Some(("stocks", sub)) => stocks(ctx, sub)?,
        Some(("sectors", sub)) => sectors(ctx, sub)?,
        Some(("dividends", sub)) => dividends(ctx, sub)?,
        Some(("timeline", sub)) => timeline(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let s = investment_summary(&ctx.data.stocks, &ctx.data.dividends);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = &ctx.settings.currency;
    let rows = vec![
        vec!["Total invested".into(), fmt_money(&s.total_invested, ccy)],
        vec!["Current value".into(), fmt_money(&s.current_value, ccy)],
        vec!["Total return".into(), fmt_money(&s.total_return, ccy)],
        vec!["Return".into(), fmt_pct(s.total_return_pct)],
        vec!["Dividends received".into(), fmt_money(&s.total_dividends, ccy)],
        vec!["Monthly dividend yield".into(), fmt_pct(s.monthly_dividend_yield)],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

fn stocks(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let positions = stock_positions(&ctx.data.stocks);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &positions)? {
        let rows = positions
            .into_iter()
            .map(|p| {
                vec![
                    p.ticker,
                    p.company_name,
                    p.sector,
                    format!("{}", p.quantity),
                    format!("{:.2}", p.purchase_price),
                    format!("{:.2}", p.current_price),
                    format!("{:.2}", p.invested),
                    format!("{:.2}", p.current_value),
                    format!("{:.2}", p.gain),
                    fmt_pct(p.gain_pct),
                    fmt_pct(p.allocation_pct),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Ticker", "Company", "Sector", "Qty", "Paid", "Price", "Invested", "Value",
                    "Gain", "Gain %", "Alloc",
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn sectors(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let data = sector_allocation(&ctx.data.stocks);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|s| {
                vec![
                    s.sector.clone(),
                    s.stocks.to_string(),
                    format!("{:.2}", s.current_value),
                    fmt_pct(s.share_pct),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Sector", "Stocks", "Value", "Share"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct DividendReport {
    pub stats: DividendStats,
    pub payments: Vec<DividendRow>,
}

/// Payments filtered by `--ticker` and `--year`, with their totals.
pub fn dividend_report(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<DividendReport> {
    let selected = match sub.get_one::<String>("ticker") {
        Some(t) => dividends_for_stock(&ctx.data.dividends, id_for_stock(ctx.data, t)?),
        None => ctx.data.dividends.iter().collect(),
    };
    let year = sub.get_one::<i32>("year").copied();
    let payments = dividend_rows(
        &ctx.data.stocks,
        selected
            .into_iter()
            .filter(|d| year.is_none_or(|y| d.payment_date.year() == y)),
        ctx.today,
    );
    Ok(DividendReport {
        stats: dividend_stats(&payments, ctx.today),
        payments,
    })
}

fn dividends(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let report = dividend_report(ctx, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let rows = report
        .payments
        .iter()
        .map(|d| {
            vec![
                d.ticker.clone(),
                d.company_name.clone().unwrap_or_else(|| "?".into()),
                d.kind.to_string(),
                format!("{:.2}", d.per_share),
                format!("{:.2}", d.received),
                d.ex_dividend_date.to_string(),
                d.payment_date.to_string(),
                if d.paid { "paid" } else { "scheduled" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Ticker", "Company", "Type", "Per share", "Received", "Ex-date", "Payment", "Status"],
            rows,
        )
    );
    let ccy = &ctx.settings.currency;
    let s = &report.stats;
    println!(
        "{}",
        pretty_table(
            &["Payments", "Received", "This year", "Monthly avg"],
            vec![vec![
                s.payments.to_string(),
                fmt_money(&s.total_received, ccy),
                fmt_money(&s.year_received, ccy),
                fmt_money(&s.monthly_average, ccy),
            ]],
        )
    );
    Ok(())
}

fn timeline(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let year = sub.get_one::<i32>("year").copied();
    let t = dividend_timeline(&ctx.data.stocks, &ctx.data.dividends, year);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &t)? {
        return Ok(());
    }
    let rows = t
        .months
        .iter()
        .map(|m| {
            vec![
                m.month.clone(),
                format!("{:.2}", m.amount),
                m.payments.to_string(),
                fmt_pct(m.variation_pct),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Received", "Payments", "Change"], rows)
    );
    let ccy = &ctx.settings.currency;
    let label = |m: &Option<crate::investments::TimelineMonth>| {
        m.as_ref()
            .map(|m| format!("{} ({})", m.month, fmt_money(&m.amount, ccy)))
            .unwrap_or_else(|| "-".into())
    };
    println!(
        "Total {}  Average {}  Highest {}  Lowest {}",
        fmt_money(&t.total, ccy),
        fmt_money(&t.average, ccy),
        label(&t.highest),
        label(&t.lowest)
    );
    Ok(())
}
