//! File-level pipeline: read the catalogue and corrections, transform every
//! entry in order, and write the enriched dataset.

use std::io::Write;
use std::path::{Path, PathBuf};

use grogdb_core::{load_corrections, Corrections, OutputRecord};
use serde::Serialize;

use crate::error::PipelineError;
use crate::extract::{extract_product, SkipReason};
use crate::issues::{ConversionIssue, IssueLog};
use crate::normalize::normalize_record;
use crate::tax::ExciseSchedule;
use crate::types::RawProduct;

/// Locations of the files a run reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    pub input: PathBuf,
    pub corrections: PathBuf,
    pub output: PathBuf,
}

/// Everything a run produced, in input order.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub records: Vec<OutputRecord>,
    pub skipped: Vec<SkipReason>,
    pub issues: Vec<ConversionIssue>,
}

impl PipelineReport {
    #[must_use]
    pub fn record(&self, stockcode: &str) -> Option<&OutputRecord> {
        self.records.iter().find(|r| r.stockcode == stockcode)
    }
}

/// Transforms a catalogue held in memory.
///
/// Entries are processed sequentially; output order follows input order.
/// Skipped entries are logged at `debug` and never count as issues.
pub fn transform_catalogue(
    products: &[RawProduct],
    corrections: &Corrections,
    schedule: &ExciseSchedule,
) -> PipelineReport {
    let mut report = PipelineReport::default();

    for raw in products {
        let flat = match extract_product(raw) {
            Ok(flat) => flat,
            Err(reason) => {
                tracing::debug!(
                    stockcode = ?reason.stockcode(),
                    %reason,
                    "skipping catalogue entry"
                );
                report.skipped.push(reason);
                continue;
            }
        };

        let mut issues = IssueLog::new(&flat.stockcode);
        report
            .records
            .push(normalize_record(&flat, corrections, schedule, &mut issues));
        report.issues.extend(issues.into_issues());
    }

    tracing::info!(
        records = report.records.len(),
        skipped = report.skipped.len(),
        issues = report.issues.len(),
        "catalogue transformed"
    );

    report
}

/// Reads the raw catalogue: a JSON array of [`RawProduct`].
///
/// # Errors
///
/// Returns [`PipelineError::InputIo`] if the file cannot be read, or
/// [`PipelineError::InputParse`] if it is not a valid catalogue.
pub fn read_catalogue(path: &Path) -> Result<Vec<RawProduct>, PipelineError> {
    let contents = std::fs::read_to_string(path).map_err(|source| PipelineError::InputIo {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| PipelineError::InputParse {
        path: path.display().to_string(),
        source,
    })
}

/// Writes `records` as pretty-printed JSON with a trailing newline.
///
/// The file is written to a temporary file beside `path` and renamed into
/// place, so a failed run never leaves a truncated dataset behind.
///
/// # Errors
///
/// Returns [`PipelineError::Serialize`] if the records cannot be encoded,
/// or [`PipelineError::OutputIo`] if the file cannot be written.
pub fn write_output<T: Serialize>(path: &Path, records: &[T]) -> Result<(), PipelineError> {
    let mut json = serde_json::to_vec_pretty(records).map_err(PipelineError::Serialize)?;
    json.push(b'\n');

    let output_io = |source: std::io::Error| PipelineError::OutputIo {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(output_io)?;
    tmp.write_all(&json).map_err(output_io)?;
    tmp.as_file().sync_all().map_err(output_io)?;
    tmp.persist(path).map_err(|err| output_io(err.error))?;
    Ok(())
}

/// Reads both inputs and transforms the catalogue without writing anything.
///
/// # Errors
///
/// Returns a [`PipelineError`] if either input file is unreadable or invalid.
pub fn transform_files(paths: &PipelinePaths) -> Result<PipelineReport, PipelineError> {
    let products = read_catalogue(&paths.input)?;
    let corrections = load_corrections(&paths.corrections)?;
    tracing::info!(
        input = %paths.input.display(),
        entries = products.len(),
        corrections = corrections.len(),
        "loaded catalogue"
    );
    Ok(transform_catalogue(
        &products,
        &corrections,
        &ExciseSchedule::default(),
    ))
}

/// Runs read → transform → write.
///
/// # Errors
///
/// Returns the first fatal [`PipelineError`]; nothing is written when an
/// input fails to load.
pub fn run_pipeline(paths: &PipelinePaths) -> Result<PipelineReport, PipelineError> {
    let report = transform_files(paths)?;
    write_output(&paths.output, &report.records)?;
    tracing::info!(
        output = %paths.output.display(),
        records = report.records.len(),
        "wrote catalogue output"
    );
    Ok(report)
}
