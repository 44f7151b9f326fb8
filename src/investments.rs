// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Dividend, DividendKind, Stock};
use crate::utils::{month_key, percent_of};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentSummary {
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub total_return: Decimal,
    pub total_return_pct: Option<Decimal>,
    pub total_dividends: Decimal,
    pub monthly_dividend_yield: Option<Decimal>,
}

/// `quantity * price`, or `None` when the product does not fit in a `Decimal`.
pub fn holding_value(quantity: Decimal, price: Decimal) -> Option<Decimal> {
    quantity.checked_mul(price)
}

/// Overflowing positions count as zero.
fn position_value(stock: &Stock, price: Decimal) -> Decimal {
    holding_value(stock.quantity, price).unwrap_or_else(|| {
        warn!(stock = stock.id, ticker = %stock.ticker, "Position value overflows");
        Decimal::ZERO
    })
}

fn saturating_total<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Cash received for one payment: per-share amount times the shares held.
/// Payments for unknown stocks count as zero.
pub fn received_amount(dividend: &Dividend, stocks: &[Stock]) -> Decimal {
    match stocks.iter().find(|s| s.id == dividend.stock_id) {
        Some(stock) => position_value(stock, dividend.amount),
        None => {
            warn!(
                dividend = dividend.id,
                stock = dividend.stock_id,
                "Dividend references unknown stock"
            );
            Decimal::ZERO
        }
    }
}

/// Percentages are `None` when their base is zero.
pub fn investment_summary(stocks: &[Stock], dividends: &[Dividend]) -> InvestmentSummary {
    let total_invested = saturating_total(stocks.iter().map(|s| position_value(s, s.purchase_price)));
    let current_value = saturating_total(stocks.iter().map(|s| position_value(s, s.current_price)));
    let total_return = current_value.saturating_sub(total_invested);
    let total_dividends = saturating_total(dividends.iter().map(|d| received_amount(d, stocks)));
    let monthly_dividend_yield = percent_of(total_dividends / Decimal::from(12), current_value);

    InvestmentSummary {
        total_invested,
        current_value,
        total_return,
        total_return_pct: percent_of(total_return, total_invested),
        total_dividends,
        monthly_dividend_yield,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StockPosition {
    pub stock_id: i64,
    pub ticker: String,
    pub company_name: String,
    pub sector: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub current_price: Decimal,
    pub invested: Decimal,
    pub current_value: Decimal,
    pub gain: Decimal,
    pub gain_pct: Option<Decimal>,
    pub allocation_pct: Option<Decimal>,
}

pub fn stock_positions(stocks: &[Stock]) -> Vec<StockPosition> {
    let total_value = saturating_total(stocks.iter().map(|s| position_value(s, s.current_price)));
    stocks
        .iter()
        .map(|s| {
            let invested = position_value(s, s.purchase_price);
            let current_value = position_value(s, s.current_price);
            let gain = current_value.saturating_sub(invested);
            StockPosition {
                stock_id: s.id,
                ticker: s.ticker.clone(),
                company_name: s.company_name.clone(),
                sector: s.sector.clone(),
                quantity: s.quantity,
                purchase_price: s.purchase_price,
                current_price: s.current_price,
                invested,
                current_value,
                gain,
                gain_pct: percent_of(gain, invested),
                allocation_pct: percent_of(current_value, total_value),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct SectorAllocation {
    pub sector: String,
    pub stocks: usize,
    pub current_value: Decimal,
    pub share_pct: Option<Decimal>,
}

/// Current value per sector, largest first.
pub fn sector_allocation(stocks: &[Stock]) -> Vec<SectorAllocation> {
    let total = saturating_total(stocks.iter().map(|s| position_value(s, s.current_price)));
    let mut by_sector: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
    for s in stocks {
        let entry = by_sector
            .entry(s.sector.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = entry.1.saturating_add(position_value(s, s.current_price));
    }
    let mut out: Vec<SectorAllocation> = by_sector
        .into_iter()
        .map(|(sector, (count, value))| SectorAllocation {
            sector: sector.to_string(),
            stocks: count,
            current_value: value,
            share_pct: percent_of(value, total),
        })
        .collect();
    out.sort_by(|a, b| b.current_value.cmp(&a.current_value));
    out
}

pub fn dividends_for_stock(dividends: &[Dividend], stock_id: i64) -> Vec<&Dividend> {
    dividends.iter().filter(|d| d.stock_id == stock_id).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct DividendRow {
    pub dividend_id: i64,
    pub stock_id: i64,
    pub ticker: String,
    pub company_name: Option<String>,
    pub kind: DividendKind,
    pub per_share: Decimal,
    pub received: Decimal,
    pub ex_dividend_date: NaiveDate,
    pub payment_date: NaiveDate,
    pub paid: bool,
}

/// Payment history, newest payment first.
pub fn dividend_rows<'a, I>(stocks: &[Stock], dividends: I, today: NaiveDate) -> Vec<DividendRow>
where
    I: IntoIterator<Item = &'a Dividend>,
{
    let mut rows: Vec<DividendRow> = dividends
        .into_iter()
        .map(|d| {
            let stock = stocks.iter().find(|s| s.id == d.stock_id);
            DividendRow {
                dividend_id: d.id,
                stock_id: d.stock_id,
                ticker: d.ticker.clone(),
                company_name: stock.map(|s| s.company_name.clone()),
                kind: d.kind,
                per_share: d.amount,
                received: received_amount(d, stocks),
                ex_dividend_date: d.ex_dividend_date,
                payment_date: d.payment_date,
                paid: d.payment_date <= today,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        b.payment_date
            .cmp(&a.payment_date)
            .then(b.dividend_id.cmp(&a.dividend_id))
    });
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividendStats {
    pub payments: usize,
    pub total_per_share: Decimal,
    pub total_received: Decimal,
    pub year_received: Decimal,
    pub monthly_average: Decimal,
}

/// `monthly_average` spreads the total over the months that had a payment.
pub fn dividend_stats(rows: &[DividendRow], today: NaiveDate) -> DividendStats {
    let mut months: BTreeMap<String, Decimal> = BTreeMap::new();
    for r in rows {
        let month = months.entry(month_key(r.payment_date)).or_insert(Decimal::ZERO);
        *month = month.saturating_add(r.received);
    }
    let total_received = saturating_total(rows.iter().map(|r| r.received));
    let monthly_average = if months.is_empty() {
        Decimal::ZERO
    } else {
        total_received / Decimal::from(months.len())
    };
    DividendStats {
        payments: rows.len(),
        total_per_share: rows.iter().map(|r| r.per_share).sum(),
        total_received,
        year_received: saturating_total(
            rows.iter()
                .filter(|r| r.payment_date.year() == today.year())
                .map(|r| r.received),
        ),
        monthly_average,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineMonth {
    pub month: String,
    pub amount: Decimal,
    pub payments: usize,
    /// Change against the previous listed month; `None` for the first month
    /// or when the previous amount is zero.
    pub variation_pct: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividendTimeline {
    pub months: Vec<TimelineMonth>,
    pub total: Decimal,
    pub average: Decimal,
    pub highest: Option<TimelineMonth>,
    pub lowest: Option<TimelineMonth>,
    pub years: Vec<i32>,
}

/// Received dividends per payment month, optionally restricted to one year.
pub fn dividend_timeline(
    stocks: &[Stock],
    dividends: &[Dividend],
    year: Option<i32>,
) -> DividendTimeline {
    let mut years: Vec<i32> = dividends.iter().map(|d| d.payment_date.year()).collect();
    years.sort_unstable();
    years.dedup();

    let mut by_month: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
    for d in dividends
        .iter()
        .filter(|d| year.is_none_or(|y| d.payment_date.year() == y))
    {
        let entry = by_month
            .entry(month_key(d.payment_date))
            .or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.saturating_add(received_amount(d, stocks));
        entry.1 += 1;
    }

    let mut months = Vec::with_capacity(by_month.len());
    let mut previous: Option<Decimal> = None;
    for (month, (amount, payments)) in by_month {
        let variation_pct = previous.and_then(|prev| percent_of(amount.saturating_sub(prev), prev));
        months.push(TimelineMonth {
            month,
            amount,
            payments,
            variation_pct,
        });
        previous = Some(amount);
    }

    let total = saturating_total(months.iter().map(|m| m.amount));
    let average = if months.is_empty() {
        Decimal::ZERO
    } else {
        total / Decimal::from(months.len())
    };
    // First month wins ties.
    let highest = months
        .iter()
        .fold(None::<&TimelineMonth>, |best, m| match best {
            Some(b) if b.amount >= m.amount => Some(b),
            _ => Some(m),
        })
        .cloned();
    let lowest = months
        .iter()
        .fold(None::<&TimelineMonth>, |best, m| match best {
            Some(b) if b.amount <= m.amount => Some(b),
            _ => Some(m),
        })
        .cloned();

    DividendTimeline {
        months,
        total,
        average,
        highest,
        lowest,
        years,
    }
}
