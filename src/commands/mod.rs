// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod dashboard;
pub mod doctor;
pub mod exporter;
pub mod importer;
pub mod investments;
pub mod reports;
pub mod transactions;

use crate::aggregate::TransactionFilter;
use crate::config::Settings;
use crate::period::Period;
use crate::store::Dataset;
use crate::utils::id_for_category;
use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Everything a command handler reads.
pub struct Ctx<'a> {
    pub data: &'a Dataset,
    pub settings: &'a Settings,
    pub today: NaiveDate,
}

pub(crate) fn period_from(sub: &clap::ArgMatches) -> Period {
    sub.try_get_one::<String>("period")
        .ok()
        .flatten()
        .map(|p| Period::from_token(p))
        .unwrap_or_default()
}

/// Builds a filter from whichever of the shared filter arguments `sub` defines.
pub(crate) fn filter_from(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    let opt = |name: &str| -> Option<String> {
        sub.try_get_one::<String>(name)
            .ok()
            .flatten()
            .map(|s| s.trim().to_string())
    };
    let mut filter = TransactionFilter {
        period: period_from(sub),
        category_id: opt("category")
            .map(|c| id_for_category(ctx.data, &c))
            .transpose()?,
        account: opt("account"),
        search: opt("search").filter(|s| !s.is_empty()),
        ..TransactionFilter::default()
    };
    if let Some(pattern) = opt("match") {
        filter = filter
            .with_pattern(&pattern)
            .with_context(|| format!("Invalid pattern '{}'", pattern))?;
    }
    Ok(filter)
}
