// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use chrono::{Duration, Months, NaiveDate};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Trailing window ending today, used by every dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl Period {
    /// Unknown tokens select everything rather than failing.
    pub fn from_token(token: &str) -> Period {
        match token.trim().to_lowercase().as_str() {
            "week" => Period::Week,
            "month" => Period::Month,
            "year" => Period::Year,
            "all" => Period::All,
            other => {
                debug!(token = other, "Unknown period token, not filtering");
                Period::All
            }
        }
    }

    /// First day included in the window. Month and year steps are calendar
    /// based and clamp to the end of a shorter month.
    pub fn window_start(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::Week => today.checked_sub_signed(Duration::days(7)),
            Period::Month => today.checked_sub_months(Months::new(1)),
            Period::Year => today.checked_sub_months(Months::new(12)),
            Period::All => None,
        }
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Period::All => true,
            _ => match self.window_start(today) {
                Some(start) => start <= date && date <= today,
                None => false,
            },
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        };
        f.write_str(s)
    }
}

pub fn filter_by_period<'a>(
    txs: &'a [Transaction],
    period: Period,
    today: NaiveDate,
) -> Vec<&'a Transaction> {
    let out: Vec<&Transaction> = txs
        .iter()
        .filter(|t| period.contains(t.date, today))
        .collect();
    debug!(%period, %today, kept = out.len(), total = txs.len(), "Filtered by period");
    out
}
