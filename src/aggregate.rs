// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spending aggregates derived from a transaction set.
//!
//! Every function here borrows its inputs and returns freshly computed rows.
//! Nothing is cached: callers re-run the aggregation whenever the filtered set
//! changes.

use crate::models::{Category, CategoryExpense, ExpenseGoal, Transaction};
use crate::period::Period;
use crate::utils::{month_key, percent_of};
use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, hash_map::Entry};

pub const UNCATEGORIZED: &str = "(uncategorized)";
pub const DEFAULT_COLOR: &str = "#DDD";

/// Sums expense magnitudes per category, in order of first appearance.
///
/// Income is ignored. Transactions without a category, or whose category id is
/// unknown, are reported as [`UNCATEGORIZED`] with `fallback_color`. The
/// `percentage` of every row is left at zero; see [`with_percentages`].
pub fn expenses_by_category<'a, I>(
    txs: I,
    categories: &[Category],
    fallback_color: &str,
) -> Vec<CategoryExpense>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut rows: Vec<CategoryExpense> = Vec::new();
    let mut index_by_id: HashMap<Option<i64>, usize> = HashMap::new();

    for t in txs.into_iter().filter(|t| t.is_expense()) {
        match index_by_id.entry(t.category_id) {
            Entry::Occupied(entry) => rows[*entry.get()].amount += t.amount.abs(),
            Entry::Vacant(entry) => {
                let info = t
                    .category_id
                    .and_then(|id| categories.iter().find(|c| c.id == id));
                entry.insert(rows.len());
                rows.push(CategoryExpense {
                    category_id: t.category_id,
                    category: info
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| UNCATEGORIZED.to_string()),
                    amount: t.amount.abs(),
                    percentage: Decimal::ZERO,
                    color: info
                        .map(|c| c.color.clone())
                        .unwrap_or_else(|| fallback_color.to_string()),
                });
            }
        }
    }
    rows
}

/// Fills in each row's share of the grand total, rounded to a whole percent.
/// All shares are zero when the total is zero.
pub fn with_percentages(rows: Vec<CategoryExpense>) -> Vec<CategoryExpense> {
    let total: Decimal = rows.iter().map(|r| r.amount).sum();
    rows.into_iter()
        .map(|mut r| {
            r.percentage = percent_of(r.amount, total)
                .map(|p| p.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
                .unwrap_or(Decimal::ZERO);
            r
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Amount,
    Category,
}

impl SortKey {
    pub fn from_token(token: &str) -> SortKey {
        match token.trim().to_lowercase().as_str() {
            "category" | "name" => SortKey::Category,
            _ => SortKey::Amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn from_token(token: &str) -> SortOrder {
        match token.trim().to_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

pub fn sort_expenses(rows: &mut [CategoryExpense], key: SortKey, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ord = match key {
            SortKey::Amount => a.amount.cmp(&b.amount),
            SortKey::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

/// Criteria shared by the transaction list, the category breakdown and the
/// export.
#[derive(Debug, Default)]
pub struct TransactionFilter {
    pub period: Period,
    pub category_id: Option<i64>,
    pub account: Option<String>,
    /// Case-insensitive literal, matched against description or category name.
    pub search: Option<String>,
    /// Case-insensitive regular expression over the description.
    pub pattern: Option<Regex>,
    pub expenses_only: bool,
}

impl TransactionFilter {
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(RegexBuilder::new(pattern).case_insensitive(true).build()?);
        Ok(self)
    }

    pub fn matches(&self, t: &Transaction, categories: &[Category], today: NaiveDate) -> bool {
        if !self.period.contains(t.date, today) {
            return false;
        }
        if self.expenses_only && !t.is_expense() {
            return false;
        }
        if let Some(cid) = self.category_id {
            if t.category_id != Some(cid) {
                return false;
            }
        }
        if let Some(acct) = &self.account {
            if !t.account.eq_ignore_ascii_case(acct.trim()) {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let in_desc = t.description.to_lowercase().contains(&term);
            let in_cat = t
                .category_id
                .and_then(|id| categories.iter().find(|c| c.id == id))
                .map(|c| c.name.to_lowercase().contains(&term))
                .unwrap_or(false);
            if !in_desc && !in_cat {
                return false;
            }
        }
        if let Some(re) = &self.pattern {
            if !re.is_match(&t.description) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(
        &self,
        txs: &'a [Transaction],
        categories: &[Category],
        today: NaiveDate,
    ) -> Vec<&'a Transaction> {
        txs.iter()
            .filter(|t| self.matches(t, categories, today))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub category_id: Option<i64>,
    pub category: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub used_pct: Option<Decimal>,
    pub remaining: Decimal,
    pub over_budget: bool,
    pub level: GoalLevel,
    pub transactions: usize,
}

/// Share of a budget above which a category is flagged before it overruns.
pub const BUDGET_WARNING_PCT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Compares each aggregate with its category budget. Categories without a
/// budget, or with a zero budget, use `default_budget`.
pub fn budget_status<'a, I>(
    rows: &[CategoryExpense],
    txs: I,
    categories: &[Category],
    default_budget: Decimal,
) -> Vec<BudgetStatus>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut counts: HashMap<Option<i64>, usize> = HashMap::new();
    for t in txs.into_iter().filter(|t| t.is_expense()) {
        *counts.entry(t.category_id).or_insert(0) += 1;
    }

    rows.iter()
        .map(|r| {
            let budget = r
                .category_id
                .and_then(|id| categories.iter().find(|c| c.id == id))
                .and_then(|c| c.budget)
                .filter(|b| !b.is_zero())
                .unwrap_or(default_budget);
            let used_pct = percent_of(r.amount, budget);
            let level = if r.amount > budget {
                GoalLevel::Exceeded
            } else if used_pct.is_some_and(|p| p > BUDGET_WARNING_PCT) {
                GoalLevel::Warning
            } else {
                GoalLevel::Ok
            };
            BudgetStatus {
                category_id: r.category_id,
                category: r.category.clone(),
                budget,
                spent: r.amount,
                used_pct,
                remaining: budget - r.amount,
                over_budget: level == GoalLevel::Exceeded,
                level,
                transactions: counts.get(&r.category_id).copied().unwrap_or(0),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalLevel {
    Ok,
    Warning,
    Exceeded,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalStatus {
    pub goal_id: i64,
    pub category_id: i64,
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub used_pct: Option<Decimal>,
    pub remaining: Decimal,
    pub alert_threshold: Decimal,
    pub level: GoalLevel,
}

pub fn evaluate_goal(goal: &ExpenseGoal, category: &str, spent: Decimal) -> GoalStatus {
    let used_pct = percent_of(spent, goal.monthly_limit);
    let level = if spent > goal.monthly_limit {
        GoalLevel::Exceeded
    } else if used_pct.is_some_and(|p| p >= goal.alert_threshold) {
        GoalLevel::Warning
    } else {
        GoalLevel::Ok
    };
    GoalStatus {
        goal_id: goal.id,
        category_id: goal.category_id,
        category: category.to_string(),
        limit: goal.monthly_limit,
        spent,
        used_pct,
        remaining: goal.monthly_limit - spent,
        alert_threshold: goal.alert_threshold,
        level,
    }
}

/// Expense magnitude of one category within a `YYYY-MM` month.
pub fn spent_in_month<'a, I>(txs: I, category_id: i64, month: &str) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    txs.into_iter()
        .filter(|t| t.is_expense() && t.category_id == Some(category_id))
        .filter(|t| month_key(t.date) == month)
        .map(|t| t.amount.abs())
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCashflow {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub savings_rate: Option<Decimal>,
}

/// Income, expenses and balance per `YYYY-MM`, oldest first.
pub fn monthly_cashflow<'a, I>(txs: I) -> Vec<MonthlyCashflow>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in txs {
        let entry = map
            .entry(month_key(t.date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if t.is_income() {
            entry.0 += t.amount;
        } else {
            entry.1 += t.amount.abs();
        }
    }
    map.into_iter()
        .map(|(month, (income, expenses))| {
            let balance = income - expenses;
            MonthlyCashflow {
                month,
                income,
                expenses,
                balance,
                savings_rate: percent_of(balance, income),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub by_category: BTreeMap<String, Decimal>,
}

/// Expense totals per month and category for the `last_n` most recent months.
pub fn monthly_category_trends<'a, I>(
    txs: I,
    categories: &[Category],
    last_n: usize,
) -> Vec<MonthlyTrend>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut map: BTreeMap<String, BTreeMap<String, Decimal>> = BTreeMap::new();
    for t in txs.into_iter().filter(|t| t.is_expense()) {
        let name = t
            .category_id
            .and_then(|id| categories.iter().find(|c| c.id == id))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        *map.entry(month_key(t.date))
            .or_default()
            .entry(name)
            .or_insert(Decimal::ZERO) += t.amount.abs();
    }
    let skip = map.len().saturating_sub(last_n);
    map.into_iter()
        .skip(skip)
        .map(|(month, by_category)| MonthlyTrend { month, by_category })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub savings_rate: Option<Decimal>,
    pub transactions: usize,
    pub categories: usize,
    pub recent: Vec<Transaction>,
}

pub fn dashboard_stats<'a, I>(
    txs: I,
    categories: &[Category],
    recent_limit: usize,
) -> DashboardStats
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut all: Vec<&Transaction> = txs.into_iter().collect();
    let total_income: Decimal = all.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let total_expenses: Decimal = all
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount.abs())
        .sum();
    let balance = total_income - total_expenses;
    let count = all.len();

    // Sorting the borrowed view leaves the source order untouched.
    all.sort_by(|a, b| match b.date.cmp(&a.date) {
        Ordering::Equal => b.id.cmp(&a.id),
        ord => ord,
    });
    let recent = all.into_iter().take(recent_limit).cloned().collect();

    DashboardStats {
        total_income,
        total_expenses,
        balance,
        savings_rate: percent_of(balance, total_income),
        transactions: count,
        categories: categories.len(),
        recent,
    }
}
