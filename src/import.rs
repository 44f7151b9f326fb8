// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Statement import simulation.
//!
//! Uploaded files are never read. Each file walks through
//! `Uploading -> Processing -> Completed | Failed` with fixed delays, and an
//! [`OutcomeSource`] decides how processing ends. [`SimulatedOutcome`] is the
//! random stand-in used by the CLI; tests plug in their own source.

use crate::config::ImportSettings;
use crate::error::ImportError;
use chrono::{DateTime, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub const FAILURE_MESSAGE: &str = "Unsupported file format or corrupted file";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    Csv,
    Xlsx,
    Xls,
    Ofx,
    Qif,
    Txt,
}

impl ImportFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImportFormat, ImportError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(ImportFormat::Csv),
            "xlsx" => Ok(ImportFormat::Xlsx),
            "xls" => Ok(ImportFormat::Xls),
            "ofx" => Ok(ImportFormat::Ofx),
            "qif" => Ok(ImportFormat::Qif),
            "txt" => Ok(ImportFormat::Txt),
            _ => Err(ImportError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ImportStatus {
    Uploading,
    Processing,
    Completed {
        transactions: u32,
        total_amount: Decimal,
    },
    Failed {
        message: String,
    },
}

impl ImportStatus {
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            ImportStatus::Completed { .. } | ImportStatus::Failed { .. }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImportStatus::Uploading => "uploading",
            ImportStatus::Processing => "processing",
            ImportStatus::Completed { .. } => "completed",
            ImportStatus::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportedFile {
    pub id: u64,
    pub name: String,
    pub size: u64,
    pub format: ImportFormat,
    pub uploaded_at: DateTime<Local>,
    #[serde(flatten)]
    pub status: ImportStatus,
}

/// Decides how a file's processing step ends.
pub trait OutcomeSource {
    fn outcome(&mut self, file: &ImportedFile) -> ImportStatus;
}

/// Coin-flip outcome: succeeds with `success_rate`, inventing a transaction
/// count and total for the file.
pub struct SimulatedOutcome {
    rng: StdRng,
    success_rate: f64,
}

impl SimulatedOutcome {
    pub fn new(success_rate: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        SimulatedOutcome {
            rng,
            success_rate: success_rate.clamp(0.0, 1.0),
        }
    }
}

impl OutcomeSource for SimulatedOutcome {
    fn outcome(&mut self, _file: &ImportedFile) -> ImportStatus {
        if self.rng.gen_bool(self.success_rate) {
            let transactions = self.rng.gen_range(10..60);
            let cents: i64 = self.rng.gen_range(100_000..600_000);
            ImportStatus::Completed {
                transactions,
                total_amount: Decimal::new(cents, 2),
            }
        } else {
            ImportStatus::Failed {
                message: FAILURE_MESSAGE.to_string(),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    pub files: usize,
    pub completed: usize,
    pub failed: usize,
    pub transactions: u32,
    pub total_amount: Decimal,
    pub success_pct: Option<Decimal>,
}

pub struct ImportQueue<S: OutcomeSource> {
    files: Vec<ImportedFile>,
    next_id: u64,
    source: S,
    upload_delay: Duration,
    processing_delay: Duration,
}

impl<S: OutcomeSource> ImportQueue<S> {
    pub fn new(source: S, settings: &ImportSettings) -> Self {
        ImportQueue {
            files: Vec::new(),
            next_id: 1,
            source,
            upload_delay: Duration::from_millis(settings.upload_delay_ms),
            processing_delay: Duration::from_millis(settings.processing_delay_ms),
        }
    }

    pub fn without_delays(mut self) -> Self {
        self.upload_delay = Duration::ZERO;
        self.processing_delay = Duration::ZERO;
        self
    }

    pub fn files(&self) -> &[ImportedFile] {
        &self.files
    }

    pub fn get(&self, id: u64) -> Option<&ImportedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Queues a file by name. Only the extension is inspected.
    pub fn add(&mut self, name: &str, size: u64) -> Result<u64, ImportError> {
        let format = ImportFormat::from_path(name)?;
        let id = self.next_id;
        self.next_id += 1;
        let display_name = Path::new(name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        self.files.push(ImportedFile {
            id,
            name: display_name,
            size,
            format,
            uploaded_at: Local::now(),
            status: ImportStatus::Uploading,
        });
        debug!(id, name, ?format, "Queued file for import");
        Ok(id)
    }

    /// Moves one file a single step forward. Finished files are left alone.
    pub fn advance(&mut self, id: u64) -> Result<&ImportStatus, ImportError> {
        let idx = self
            .files
            .iter()
            .position(|f| f.id == id)
            .ok_or(ImportError::UnknownFile(id))?;

        let next = match &self.files[idx].status {
            ImportStatus::Uploading => {
                std::thread::sleep(self.upload_delay);
                Some(ImportStatus::Processing)
            }
            ImportStatus::Processing => {
                std::thread::sleep(self.processing_delay);
                Some(self.source.outcome(&self.files[idx]))
            }
            _ => None,
        };
        if let Some(status) = next {
            debug!(id, status = status.label(), "Import status changed");
            self.files[idx].status = status;
        }
        Ok(&self.files[idx].status)
    }

    pub fn run_to_completion(&mut self) {
        let ids: Vec<u64> = self
            .files
            .iter()
            .filter(|f| !f.status.is_finished())
            .map(|f| f.id)
            .collect();
        for id in ids {
            while let Ok(status) = self.advance(id) {
                if status.is_finished() {
                    break;
                }
            }
        }
        info!(files = self.files.len(), "Import run finished");
    }

    /// Returns whether a file was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        before != self.files.len()
    }

    pub fn summary(&self) -> ImportSummary {
        let mut completed = 0;
        let mut failed = 0;
        let mut transactions = 0;
        let mut total_amount = Decimal::ZERO;
        for f in &self.files {
            match &f.status {
                ImportStatus::Completed {
                    transactions: n,
                    total_amount: amt,
                } => {
                    completed += 1;
                    transactions += *n;
                    total_amount += *amt;
                }
                ImportStatus::Failed { .. } => failed += 1,
                _ => {}
            }
        }
        let success_pct = crate::utils::percent_of(
            Decimal::from(completed),
            Decimal::from(self.files.len()),
        )
        .map(|p| p.round_dp(0));
        ImportSummary {
            files: self.files.len(),
            completed,
            failed,
            transactions,
            total_amount,
            success_pct,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewRow {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category_id: Option<i64>,
    pub confidence: u8,
}

/// Rows shown as "recognised" after an import, whatever the file contained.
pub fn preview_rows() -> Vec<PreviewRow> {
    // (day in January 2024, description, cents, category, confidence)
    const ROWS: &[(u32, &str, i64, Option<i64>, u8)] = &[
        (15, "SUPERMERCADO ABC LTDA", -15678, Some(1), 95),
        (14, "POSTO SHELL", -8950, Some(2), 98),
        (13, "TRANSFERENCIA PIX RECEBIDA", 50000, None, 100),
        (12, "FARMACIA POPULAR", -4530, Some(4), 92),
        (11, "NETFLIX BRASIL", -2990, Some(6), 100),
    ];
    ROWS.iter()
        .filter_map(|&(day, description, cents, category_id, confidence)| {
            Some(PreviewRow {
                date: NaiveDate::from_ymd_opt(2024, 1, day)?,
                description: description.to_string(),
                amount: Decimal::new(cents, 2),
                category_id,
                confidence,
            })
        })
        .collect()
}
