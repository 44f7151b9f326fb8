// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;

use moneyboard::commands::{self, Ctx};
use moneyboard::{cli, config::Settings, log::init_logging, store::Dataset, utils};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let result = run(&matches);
    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
    }
    result
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let config_path = matches.get_one::<String>("config").map(PathBuf::from);

    if let Some(("init", _)) = matches.subcommand() {
        let path = match config_path {
            Some(p) => p,
            None => Settings::default_config_path()?,
        };
        Settings::write_default(&path)?;
        println!("Config written to {}", path.display());
        return Ok(());
    }

    let settings = Settings::load(config_path.as_deref())?;
    let data_path = matches
        .get_one::<String>("data")
        .map(PathBuf::from)
        .or_else(|| settings.data_path.clone());
    let data = Dataset::open(data_path.as_deref()).context("Could not open dataset")?;
    let today = utils::resolve_today(matches.get_one::<String>("today"))?;

    let ctx = Ctx {
        data: &data,
        settings: &settings,
        today,
    };

    match matches.subcommand() {
        Some(("dashboard", sub)) => commands::dashboard::handle(&ctx, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&ctx, sub)?,
        Some(("category", sub)) => commands::categories::handle(&ctx, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&ctx, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ctx, sub)?,
        Some(("invest", sub)) => commands::investments::handle(&ctx, sub)?,
        Some(("import", sub)) => commands::importer::handle(&ctx, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ctx, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&data)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
