// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The record store: an immutable dataset of categories, goals, transactions,
//! stocks and dividends.
//!
//! By default the store is the seeded demo dataset below. A JSON file with the
//! same shape as [`Dataset`] can be loaded instead with `--data` or the
//! `data_path` setting.

use crate::error::StoreError;
use crate::models::{
    Category, Dividend, DividendKind, ExpenseGoal, Stock, Transaction, TxType,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub goals: Vec<ExpenseGoal>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub stocks: Vec<Stock>,
    #[serde(default)]
    pub dividends: Vec<Dividend>,
}

static SEEDED: Lazy<Dataset> = Lazy::new(seed);

impl Dataset {
    /// The built-in demo dataset.
    pub fn seeded() -> &'static Dataset {
        &SEEDED
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Dataset, StoreError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let ds: Dataset = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            transactions = ds.transactions.len(),
            stocks = ds.stocks.len(),
            "Loaded dataset"
        );
        Ok(ds)
    }

    /// Opens the dataset file at `path`, or falls back to the seeded one.
    pub fn open(path: Option<&Path>) -> Result<Cow<'static, Dataset>, StoreError> {
        match path {
            Some(p) => Ok(Cow::Owned(Self::load_from_path(p)?)),
            None => {
                debug!("Using seeded dataset");
                Ok(Cow::Borrowed(Self::seeded()))
            }
        }
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn stock(&self, id: i64) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.id == id)
    }

    pub fn stock_by_ticker(&self, ticker: &str) -> Option<&Stock> {
        self.stocks
            .iter()
            .find(|s| s.ticker.eq_ignore_ascii_case(ticker.trim()))
    }

    /// Resolves a category given either its id or its name (case-insensitive).
    pub fn find_category(&self, key: &str) -> Option<&Category> {
        let key = key.trim();
        if let Ok(id) = key.parse::<i64>() {
            if let Some(c) = self.category(id) {
                return Some(c);
            }
        }
        self.categories
            .iter()
            .find(|c| c.name.to_lowercase() == key.to_lowercase())
    }
}

fn cents(v: i64) -> Decimal {
    Decimal::new(v, 2)
}

const CHECKING: &str = "Checking Account";
const CREDIT: &str = "Credit Card";
const DEBIT: &str = "Debit Card";

// (id, name, color, icon, monthly budget in whole units)
const CATEGORIES: &[(i64, &str, &str, &str, Option<i64>)] = &[
    (1, "Food", "#b3854d", "UtensilsCrossed", Some(800)),
    (2, "Transport", "#8b6914", "Car", Some(400)),
    (3, "Housing", "#a0522d", "Home", Some(1500)),
    (4, "Health", "#cd853f", "Heart", Some(300)),
    (5, "Education", "#daa520", "GraduationCap", Some(200)),
    (6, "Entertainment", "#d2691e", "Gamepad2", Some(250)),
    (7, "Shopping", "#bc8f8f", "ShoppingBag", Some(300)),
    (8, "Investments", "#8b4513", "TrendingUp", Some(1000)),
    (9, "Salary", "#32CD32", "Banknote", None),
    (10, "Freelance", "#228B22", "Briefcase", None),
    (11, "Services", "#9b7653", "Settings", Some(150)),
    (12, "Taxes", "#8b7355", "FileText", Some(500)),
];

// (id, category, limit, spent, alert threshold %)
const GOALS: &[(i64, i64, i64, i64, i64)] = &[
    (1, 1, 800, 650, 80),
    (2, 2, 400, 320, 85),
    (3, 3, 1500, 1200, 90),
    (4, 4, 300, 185, 75),
    (5, 5, 200, 120, 80),
    (6, 6, 250, 180, 85),
    (7, 7, 300, 280, 80),
    (8, 11, 150, 95, 75),
];

type TxSeed = (i64, (i32, u32, u32), &'static str, i64, i64, TxType, &'static str);

// Amounts in cents.
const TRANSACTIONS: &[TxSeed] = &[
    // January 2024
    (1, (2024, 1, 1), "Salary", 550000, 9, TxType::Income, CHECKING),
    (2, (2024, 1, 2), "Extra Supermarket", -32000, 1, TxType::Expense, CREDIT),
    (3, (2024, 1, 3), "Uber", -4500, 2, TxType::Expense, DEBIT),
    (4, (2024, 1, 5), "Rent", -120000, 3, TxType::Expense, CHECKING),
    (5, (2024, 1, 7), "Netflix", -2990, 6, TxType::Expense, CREDIT),
    (6, (2024, 1, 10), "Freelance Design", 80000, 10, TxType::Income, CHECKING),
    (7, (2024, 1, 12), "Pharmacy", -8500, 4, TxType::Expense, DEBIT),
    (8, (2024, 1, 15), "Restaurant", -12000, 1, TxType::Expense, CREDIT),
    (9, (2024, 1, 18), "Gas Station", -18000, 2, TxType::Expense, DEBIT),
    (10, (2024, 1, 20), "Online Course", -19900, 5, TxType::Expense, CREDIT),
    (31, (2024, 1, 4), "Joe's Bakery", -2580, 1, TxType::Expense, DEBIT),
    (32, (2024, 1, 6), "Electricity Bill", -8550, 3, TxType::Expense, CHECKING),
    (33, (2024, 1, 8), "Spotify", -1690, 6, TxType::Expense, CREDIT),
    (34, (2024, 1, 11), "Snack Bar", -3550, 1, TxType::Expense, DEBIT),
    (35, (2024, 1, 13), "Internet", -8990, 11, TxType::Expense, CHECKING),
    (36, (2024, 1, 16), "Technical Book", -6500, 5, TxType::Expense, CREDIT),
    (37, (2024, 1, 19), "PETR4 Shares", -50000, 8, TxType::Expense, CHECKING),
    (38, (2024, 1, 22), "Sneakers", -18000, 7, TxType::Expense, CREDIT),
    (39, (2024, 1, 24), "Property Tax", -18000, 12, TxType::Expense, CHECKING),
    (40, (2024, 1, 26), "Dentist", -20000, 4, TxType::Expense, DEBIT),
    // February 2024
    (11, (2024, 2, 1), "Salary", 550000, 9, TxType::Income, CHECKING),
    (12, (2024, 2, 3), "Supermarket", -28000, 1, TxType::Expense, CREDIT),
    (13, (2024, 2, 5), "Rent", -120000, 3, TxType::Expense, CHECKING),
    (14, (2024, 2, 8), "Cinema", -6000, 6, TxType::Expense, DEBIT),
    (15, (2024, 2, 12), "Freelance", 120000, 10, TxType::Income, CHECKING),
    (16, (2024, 2, 14), "Romantic Dinner", -15000, 1, TxType::Expense, CREDIT),
    (17, (2024, 2, 16), "Clothes", -30000, 7, TxType::Expense, CREDIT),
    (18, (2024, 2, 20), "CDB Investment", -100000, 8, TxType::Expense, CHECKING),
    (19, (2024, 2, 22), "Uber", -3500, 2, TxType::Expense, DEBIT),
    (20, (2024, 2, 25), "Doctor", -20000, 4, TxType::Expense, DEBIT),
    (41, (2024, 2, 2), "Central Bakery", -2850, 1, TxType::Expense, DEBIT),
    (42, (2024, 2, 4), "Gas Bill", -7530, 3, TxType::Expense, CHECKING),
    (43, (2024, 2, 6), "Spotify Premium", -1690, 6, TxType::Expense, CREDIT),
    (44, (2024, 2, 9), "Office Snack Bar", -4280, 1, TxType::Expense, DEBIT),
    (45, (2024, 2, 11), "Landline", -6590, 11, TxType::Expense, CHECKING),
    (46, (2024, 2, 13), "Udemy Course", -8990, 5, TxType::Expense, CREDIT),
    (47, (2024, 2, 17), "VALE3 Shares", -80000, 8, TxType::Expense, CHECKING),
    (48, (2024, 2, 19), "Shoes", -25000, 7, TxType::Expense, CREDIT),
    (49, (2024, 2, 21), "Vehicle Tax", -32000, 12, TxType::Expense, CHECKING),
    (50, (2024, 2, 23), "Physiotherapist", -15000, 4, TxType::Expense, DEBIT),
    // March 2024
    (21, (2024, 3, 1), "Salary", 550000, 9, TxType::Income, CHECKING),
    (22, (2024, 3, 2), "Supermarket", -35000, 1, TxType::Expense, CREDIT),
    (23, (2024, 3, 5), "Rent", -120000, 3, TxType::Expense, CHECKING),
    (24, (2024, 3, 8), "Freelance", 90000, 10, TxType::Income, CHECKING),
    (25, (2024, 3, 10), "Electronics", -80000, 7, TxType::Expense, CREDIT),
    (26, (2024, 3, 12), "Gas Station", -20000, 2, TxType::Expense, DEBIT),
    (27, (2024, 3, 15), "Restaurant", -9000, 1, TxType::Expense, CREDIT),
    (28, (2024, 3, 18), "Gym", -8000, 4, TxType::Expense, DEBIT),
    (29, (2024, 3, 20), "Books", -12000, 5, TxType::Expense, CREDIT),
    (30, (2024, 3, 25), "Concert", -18000, 6, TxType::Expense, CREDIT),
];

// (id, ticker, company, quantity, purchase price cents, current price cents, purchase date, sector)
type StockSeed = (i64, &'static str, &'static str, i64, i64, i64, (i32, u32, u32), &'static str);

const STOCKS: &[StockSeed] = &[
    (1, "PETR4", "Petrobras PN", 100, 2850, 3215, (2023, 6, 15), "Oil & Gas"),
    (2, "VALE3", "Vale ON", 50, 6520, 7180, (2023, 8, 10), "Mining"),
    (3, "ITUB4", "Itau Unibanco PN", 200, 2530, 2790, (2023, 5, 20), "Banks"),
    (4, "BBDC4", "Bradesco PN", 150, 1875, 2045, (2023, 7, 5), "Banks"),
    (5, "WEGE3", "WEG ON", 80, 4210, 4530, (2023, 9, 12), "Machinery & Equipment"),
];

// (id, stock, ticker, per-share cents, payment date, ex-dividend date)
type DividendSeed = (i64, i64, &'static str, i64, (i32, u32, u32), (i32, u32, u32));

const DIVIDENDS: &[DividendSeed] = &[
    (1, 1, "PETR4", 125, (2024, 1, 15), (2024, 1, 10)),
    (2, 3, "ITUB4", 85, (2024, 1, 20), (2024, 1, 15)),
    (3, 4, "BBDC4", 65, (2024, 1, 25), (2024, 1, 20)),
    (4, 2, "VALE3", 210, (2024, 2, 10), (2024, 2, 5)),
    (5, 1, "PETR4", 130, (2024, 2, 15), (2024, 2, 10)),
    (6, 5, "WEGE3", 45, (2024, 2, 20), (2024, 2, 15)),
    (7, 3, "ITUB4", 90, (2024, 3, 15), (2024, 3, 10)),
    (8, 4, "BBDC4", 70, (2024, 3, 20), (2024, 3, 15)),
    (9, 1, "PETR4", 140, (2024, 3, 25), (2024, 3, 20)),
    (10, 2, "VALE3", 225, (2024, 4, 10), (2024, 4, 5)),
];

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("seed dates are valid")
}

fn seed() -> Dataset {
    let categories = CATEGORIES
        .iter()
        .map(|&(id, name, color, icon, budget)| Category {
            id,
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
            budget: budget.map(Decimal::from),
        })
        .collect();

    let goals = GOALS
        .iter()
        .map(|&(id, category_id, limit, spent, threshold)| ExpenseGoal {
            id,
            category_id,
            monthly_limit: Decimal::from(limit),
            current_spent: Decimal::from(spent),
            alert_threshold: Decimal::from(threshold),
        })
        .collect();

    let transactions = TRANSACTIONS
        .iter()
        .map(|&(id, d, description, amount, category_id, kind, account)| Transaction {
            id,
            date: ymd(d),
            description: description.to_string(),
            amount: cents(amount),
            category_id: Some(category_id),
            kind,
            account: account.to_string(),
        })
        .collect();

    let stocks = STOCKS
        .iter()
        .map(
            |&(id, ticker, company, qty, purchase, current, bought, sector)| Stock {
                id,
                ticker: ticker.to_string(),
                company_name: company.to_string(),
                quantity: Decimal::from(qty),
                purchase_price: cents(purchase),
                current_price: cents(current),
                purchase_date: ymd(bought),
                sector: sector.to_string(),
            },
        )
        .collect();

    let dividends = DIVIDENDS
        .iter()
        .map(|&(id, stock_id, ticker, amount, paid, ex)| Dividend {
            id,
            stock_id,
            ticker: ticker.to_string(),
            amount: cents(amount),
            payment_date: ymd(paid),
            ex_dividend_date: ymd(ex),
            kind: DividendKind::Dividend,
        })
        .collect();

    Dataset {
        categories,
        goals,
        transactions,
        stocks,
        dividends,
    }
}
