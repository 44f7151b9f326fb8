// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::investments::holding_value;
use crate::models::TxType;
use crate::store::Dataset;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: &'static str,
    pub detail: String,
}

fn issue(kind: &'static str, detail: String) -> Issue {
    Issue { kind, detail }
}

fn duplicates<I: IntoIterator<Item = i64>>(ids: I) -> Vec<i64> {
    let mut seen = HashSet::new();
    let mut dups: Vec<i64> = ids.into_iter().filter(|id| !seen.insert(*id)).collect();
    dups.sort_unstable();
    dups.dedup();
    dups
}

pub fn check(ds: &Dataset) -> Vec<Issue> {
    let mut issues = Vec::new();

    // 1) Dangling references
    for t in &ds.transactions {
        if let Some(cid) = t.category_id {
            if ds.category(cid).is_none() {
                issues.push(issue(
                    "txn_unknown_category",
                    format!("transaction {} -> category {}", t.id, cid),
                ));
            }
        }
    }
    for d in &ds.dividends {
        match ds.stock(d.stock_id) {
            None => issues.push(issue(
                "dividend_unknown_stock",
                format!("dividend {} -> stock {}", d.id, d.stock_id),
            )),
            Some(s) if !s.ticker.eq_ignore_ascii_case(&d.ticker) => issues.push(issue(
                "dividend_ticker_mismatch",
                format!("dividend {} says {} but stock {} is {}", d.id, d.ticker, s.id, s.ticker),
            )),
            Some(_) => {}
        }
    }
    for g in &ds.goals {
        if ds.category(g.category_id).is_none() {
            issues.push(issue(
                "goal_unknown_category",
                format!("goal {} -> category {}", g.id, g.category_id),
            ));
        }
    }

    // 2) Sign must agree with the transaction type
    for t in &ds.transactions {
        let bad = match t.kind {
            TxType::Expense => t.amount > Decimal::ZERO,
            TxType::Income => t.amount < Decimal::ZERO,
        };
        if bad {
            issues.push(issue(
                "txn_sign_mismatch",
                format!("transaction {} is {} with amount {}", t.id, t.kind, t.amount),
            ));
        }
    }

    for s in &ds.stocks {
        if s.quantity <= Decimal::ZERO {
            issues.push(issue(
                "stock_non_positive_quantity",
                format!("{} holds {}", s.ticker, s.quantity),
            ));
        }
        if holding_value(s.quantity, s.purchase_price).is_none()
            || holding_value(s.quantity, s.current_price).is_none()
        {
            issues.push(issue(
                "stock_value_overflow",
                format!("{} position {} x {} is out of range", s.ticker, s.quantity, s.current_price),
            ));
        }
    }

    // 3) Duplicate ids
    let groups: [(&str, Vec<i64>); 5] = [
        ("categories", duplicates(ds.categories.iter().map(|c| c.id))),
        ("transactions", duplicates(ds.transactions.iter().map(|t| t.id))),
        ("stocks", duplicates(ds.stocks.iter().map(|s| s.id))),
        ("dividends", duplicates(ds.dividends.iter().map(|d| d.id))),
        ("goals", duplicates(ds.goals.iter().map(|g| g.id))),
    ];
    for (what, dups) in groups {
        for id in dups {
            issues.push(issue("duplicate_id", format!("{} id {}", what, id)));
        }
    }

    issues
}

pub fn handle(ds: &Dataset) -> Result<()> {
    let issues = check(ds);
    if issues.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.kind.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
