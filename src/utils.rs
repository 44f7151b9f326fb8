// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Dataset;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

/// `--today` if given, otherwise the local calendar date.
pub fn resolve_today(arg: Option<&String>) -> Result<NaiveDate> {
    match arg {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// `part / whole * 100`, or `None` when `whole` is zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn fmt_pct(p: Option<Decimal>) -> String {
    match p {
        Some(v) => format!("{:.2}%", v.round_dp(2)),
        None => "n/a".to_string(),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_category(ds: &Dataset, key: &str) -> Result<i64> {
    ds.find_category(key)
        .map(|c| c.id)
        .with_context(|| format!("Category '{}' not found", key.trim()))
}

pub fn id_for_stock(ds: &Dataset, ticker: &str) -> Result<i64> {
    ds.stock_by_ticker(ticker)
        .map(|s| s.id)
        .with_context(|| format!("Stock '{}' not found", ticker.trim()))
}

pub fn category_name(ds: &Dataset, id: Option<i64>) -> String {
    id.and_then(|id| ds.category(id))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| crate::aggregate::UNCATEGORIZED.to_string())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_guards_zero_base() {
        assert_eq!(percent_of(Decimal::from(5), Decimal::ZERO), None);
        assert_eq!(
            percent_of(Decimal::from(10), Decimal::from(50)),
            Some(Decimal::from(20))
        );
    }

    #[test]
    fn fmt_pct_renders_missing_as_na() {
        assert_eq!(fmt_pct(None), "n/a");
        assert_eq!(fmt_pct(Some(Decimal::new(12346, 3))), "12.35%");
    }

    #[test]
    fn parse_month_rejects_garbage() {
        assert!(parse_month("2024-13").is_err());
        assert_eq!(parse_month(" 2024-02 ").unwrap(), "2024-02");
    }
}
