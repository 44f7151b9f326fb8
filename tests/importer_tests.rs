// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyboard::commands::{Ctx, importer};
use moneyboard::config::{ImportSettings, Settings};
use moneyboard::error::ImportError;
use moneyboard::import::{
    FAILURE_MESSAGE, ImportFormat, ImportQueue, ImportStatus, ImportedFile, OutcomeSource,
    SimulatedOutcome, preview_rows,
};
use moneyboard::store::Dataset;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::Builder;

/// Completes every file whose name contains "good" and fails the rest.
struct ByName;

impl OutcomeSource for ByName {
    fn outcome(&mut self, file: &ImportedFile) -> ImportStatus {
        if file.name.contains("good") {
            ImportStatus::Completed {
                transactions: 12,
                total_amount: Decimal::new(150_050, 2),
            }
        } else {
            ImportStatus::Failed {
                message: FAILURE_MESSAGE.to_string(),
            }
        }
    }
}

fn setup() -> ImportQueue<ByName> {
    ImportQueue::new(ByName, &ImportSettings::default()).without_delays()
}

#[test]
fn format_comes_from_extension() {
    assert_eq!(ImportFormat::from_path("a.CSV").unwrap(), ImportFormat::Csv);
    assert_eq!(ImportFormat::from_path("dir/b.ofx").unwrap(), ImportFormat::Ofx);
    assert_eq!(ImportFormat::from_path("legacy.XLS").unwrap(), ImportFormat::Xls);
    assert_eq!(
        ImportFormat::from_path("statement.pdf").unwrap_err(),
        ImportError::UnsupportedFormat("statement.pdf".into())
    );
    assert!(ImportFormat::from_path("noext").is_err());
}

#[test]
fn files_walk_through_each_status() {
    let mut queue = setup();
    let id = queue.add("/tmp/good.csv", 10).unwrap();
    assert_eq!(queue.get(id).unwrap().name, "good.csv");
    assert_eq!(queue.get(id).unwrap().status, ImportStatus::Uploading);

    assert_eq!(*queue.advance(id).unwrap(), ImportStatus::Processing);
    let done = queue.advance(id).unwrap().clone();
    assert!(done.is_finished());
    assert_eq!(done.label(), "completed");
    // finished files stay put
    assert_eq!(*queue.advance(id).unwrap(), done);

    assert_eq!(queue.advance(99).unwrap_err(), ImportError::UnknownFile(99));
}

#[test]
fn summary_counts_completed_and_failed() {
    let mut queue = setup();
    queue.add("good-jan.csv", 1).unwrap();
    queue.add("broken.qif", 1).unwrap();
    queue.add("good-feb.xlsx", 1).unwrap();
    queue.run_to_completion();

    let s = queue.summary();
    assert_eq!(s.files, 3);
    assert_eq!(s.completed, 2);
    assert_eq!(s.failed, 1);
    assert_eq!(s.transactions, 24);
    assert_eq!(s.total_amount, Decimal::new(300_100, 2));
    assert_eq!(s.success_pct, Some(Decimal::from(67)));

    let failed = queue.files().iter().find(|f| f.name == "broken.qif").unwrap();
    assert_eq!(
        failed.status,
        ImportStatus::Failed {
            message: FAILURE_MESSAGE.into()
        }
    );
}

#[test]
fn removing_files() {
    let mut queue = setup();
    let a = queue.add("good.csv", 1).unwrap();
    let b = queue.add("good.txt", 1).unwrap();
    assert!(queue.remove(a));
    assert!(!queue.remove(a));
    assert_eq!(queue.files().len(), 1);
    assert_eq!(queue.files()[0].id, b);
    // ids are not reused
    assert_eq!(queue.add("good.ofx", 1).unwrap(), b + 1);

    let empty = setup();
    assert_eq!(empty.summary().success_pct, None);
}

#[test]
fn seeded_simulation_is_repeatable() {
    let run = |seed| {
        let mut queue = ImportQueue::new(SimulatedOutcome::new(0.5, Some(seed)), &ImportSettings::default())
            .without_delays();
        for name in ["a.csv", "b.csv", "c.csv", "d.csv", "e.csv"] {
            queue.add(name, 0).unwrap();
        }
        queue.run_to_completion();
        queue
            .files()
            .iter()
            .map(|f| f.status.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn simulated_outcomes_stay_in_range() {
    let mut queue = ImportQueue::new(SimulatedOutcome::new(1.0, Some(1)), &ImportSettings::default())
        .without_delays();
    for i in 0..10 {
        queue.add(&format!("f{}.csv", i), 0).unwrap();
    }
    queue.run_to_completion();
    for f in queue.files() {
        match &f.status {
            ImportStatus::Completed {
                transactions,
                total_amount,
            } => {
                assert!((10..60).contains(transactions));
                assert!(*total_amount >= Decimal::from(1000));
                assert!(*total_amount < Decimal::from(6000));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    let mut never = ImportQueue::new(SimulatedOutcome::new(0.0, Some(1)), &ImportSettings::default())
        .without_delays();
    never.add("x.csv", 0).unwrap();
    never.run_to_completion();
    assert_eq!(never.summary().failed, 1);
}

#[test]
fn run_import_trims_paths_and_reads_sizes() {
    let settings = Settings::default();
    let ctx = Ctx {
        data: Dataset::seeded(),
        settings: &settings,
        today: NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(),
    };
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "date,description,amount").unwrap();
    file.flush().unwrap();
    let padded = format!("  {}  ", file.path().to_str().unwrap());

    let queue = importer::run_import(&ctx, &[padded], ByName, true).unwrap();
    assert_eq!(queue.files().len(), 1);
    assert_eq!(queue.files()[0].size, 24);
    assert_eq!(queue.files()[0].format, ImportFormat::Csv);
    assert!(queue.files()[0].status.is_finished());

    let err = importer::run_import(&ctx, &["notes.docx".to_string()], ByName, true)
        .err()
        .unwrap();
    assert!(err.to_string().contains("notes.docx"));
}

#[test]
fn preview_has_canned_rows() {
    let rows = preview_rows();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.confidence <= 100));
    assert_eq!(rows[2].category_id, None);
    assert!(rows[2].amount > Decimal::ZERO);
}
