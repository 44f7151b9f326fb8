// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .short('p')
        .default_value("all")
        .help("week | month | year | all (anything else means all)")
}

fn category_arg() -> Arg {
    Arg::new("category")
        .long("category")
        .short('c')
        .help("Category name or id")
}

pub fn build_cli() -> Command {
    Command::new("moneyboard")
        .version(crate_version!())
        .about("Personal finance dashboard: spending, budgets, goals and dividends")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to a config file"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .help("Path to a JSON dataset (defaults to the built-in demo data)"),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .help("Reference date for period filters, YYYY-MM-DD"),
        )
        .subcommand(Command::new("init").about("Write a default config file"))
        .subcommand(json_args(
            Command::new("dashboard")
                .about("Totals, savings rate, spending mix and recent transactions")
                .arg(period_arg()),
        ))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(json_args(
                    Command::new("list")
                        .arg(period_arg())
                        .arg(category_arg())
                        .arg(Arg::new("account").long("account").short('a'))
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .short('s')
                                .help("Text to look for in description or category"),
                        )
                        .arg(
                            Arg::new("match")
                                .long("match")
                                .help("Regular expression over the description"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("category")
                .about("Categories and spending by category")
                .subcommand(json_args(Command::new("list")))
                .subcommand(json_args(
                    Command::new("breakdown")
                        .about("Expenses per category with share of total")
                        .arg(period_arg())
                        .arg(category_arg())
                        .arg(Arg::new("search").long("search").short('s'))
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .default_value("amount")
                                .value_parser(["amount", "category"]),
                        )
                        .arg(
                            Arg::new("order")
                                .long("order")
                                .default_value("desc")
                                .value_parser(["asc", "desc"]),
                        ),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Budgets and spending goals")
                .subcommand(json_args(
                    Command::new("status")
                        .about("Spending against each category budget")
                        .arg(period_arg()),
                ))
                .subcommand(json_args(
                    Command::new("goals")
                        .about("Monthly goals with alert levels")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .help("Recompute spending from transactions of YYYY-MM"),
                        ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly reports")
                .subcommand(json_args(
                    Command::new("cashflow").arg(
                        Arg::new("months")
                            .long("months")
                            .default_value("12")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(json_args(
                    Command::new("trends")
                        .about("Expenses per category per month")
                        .arg(period_arg())
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("invest")
                .about("Stock portfolio and dividends")
                .subcommand(json_args(Command::new("summary")))
                .subcommand(json_args(Command::new("stocks")))
                .subcommand(json_args(Command::new("sectors")))
                .subcommand(json_args(
                    Command::new("dividends")
                        .arg(Arg::new("ticker").long("ticker").short('t'))
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        ),
                ))
                .subcommand(json_args(
                    Command::new("timeline").arg(
                        Arg::new("year")
                            .long("year")
                            .value_parser(value_parser!(i32)),
                    ),
                )),
        )
        .subcommand(
            Command::new("import")
                .about("Simulated statement import")
                .subcommand(json_args(
                    Command::new("files")
                        .arg(
                            Arg::new("paths")
                                .required(true)
                                .num_args(1..)
                                .help("Statement files (csv, xlsx, xls, ofx, qif, txt)"),
                        )
                        .arg(
                            Arg::new("seed")
                                .long("seed")
                                .value_parser(value_parser!(u64)),
                        )
                        .arg(
                            Arg::new("no-delay")
                                .long("no-delay")
                                .action(ArgAction::SetTrue),
                        ),
                ))
                .subcommand(json_args(Command::new("preview"))),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv | json"),
                    )
                    .arg(Arg::new("out").long("out").required(true))
                    .arg(period_arg()),
            ),
        )
        .subcommand(Command::new("doctor").about("Check the dataset for inconsistencies"))
}
