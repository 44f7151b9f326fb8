// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyboard::commands::Ctx;
use moneyboard::config::Settings;
use moneyboard::store::Dataset;
use moneyboard::{cli, commands::exporter};
use tempfile::tempdir;

fn setup() -> Settings {
    Settings::default()
}

fn export(settings: &Settings, args: &[&str]) -> anyhow::Result<()> {
    let ctx = Ctx {
        data: Dataset::seeded(),
        settings,
        today: NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(),
    };
    let mut argv = vec!["moneyboard", "export", "transactions"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&ctx, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_writes_pretty_json() {
    let settings = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(
        &settings,
        &["--format", "json", "--out", &out_str, "--period", "month"],
    )
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert!(contents.contains("\n  {"), "expected pretty printed JSON");
    let items: Vec<serde_json::Value> = serde_json::from_str(&contents).unwrap();
    assert_eq!(items.len(), 11);
    assert_eq!(items[0]["id"], 20);
    assert_eq!(items[0]["category"], "Health");
    assert_eq!(items[0]["type"], "expense");
    assert_eq!(items[10]["description"], "Concert");
}

#[test]
fn export_transactions_csv_is_oldest_first() {
    let settings = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&settings, &["--out", &format!("  {}  ", out_str)]).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["id", "date", "description", "amount", "type", "category", "account"]
    );
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 50);
    assert_eq!(&records[0][1], "2024-01-01");
    assert_eq!(&records[0][2], "Salary");
    assert_eq!(&records[49][2], "Concert");
}

#[test]
fn export_rejects_unknown_format() {
    let settings = setup();
    let dir = tempdir().unwrap();
    let out_str = dir.path().join("x.xml").to_string_lossy().to_string();
    let err = export(&settings, &["--format", "xml", "--out", &out_str]).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
}
