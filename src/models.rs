// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxType::Income => f.write_str("income"),
            TxType::Expense => f.write_str("expense"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal, // negative = expense
    pub category_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: TxType,
    pub account: String,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TxType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TxType::Income
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub icon: String,
    #[serde(default)]
    pub budget: Option<Decimal>, // monthly
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseGoal {
    pub id: i64,
    pub category_id: i64,
    pub monthly_limit: Decimal,
    pub current_spent: Decimal,
    pub alert_threshold: Decimal, // percent of the limit
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stock {
    pub id: i64,
    pub ticker: String,
    pub company_name: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub current_price: Decimal,
    pub purchase_date: NaiveDate,
    pub sector: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividendKind {
    Dividend,
    /// Interest on equity (juros sobre capital próprio). Treated like a dividend.
    Jscp,
    Bonus,
}

impl fmt::Display for DividendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DividendKind::Dividend => f.write_str("dividend"),
            DividendKind::Jscp => f.write_str("jscp"),
            DividendKind::Bonus => f.write_str("bonus"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dividend {
    pub id: i64,
    pub stock_id: i64,
    pub ticker: String,
    pub amount: Decimal, // per share
    pub payment_date: NaiveDate,
    pub ex_dividend_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: DividendKind,
}

/// Spending of one category over a transaction set. Always derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryExpense {
    pub category_id: Option<i64>,
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
    pub color: String,
}
