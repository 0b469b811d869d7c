use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::records::Vessel;
use crate::ConfigError;

/// Hand-maintained overrides for one stockcode. Each field that is set wins
/// over the value the attribute heuristics would have produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub name_clean: Option<String>,
    pub vessel: Option<Vessel>,
    pub size_clean: Option<f64>,
    pub percentage_raw: Option<f64>,
    pub standard_drinks_clean: Option<f64>,
}

/// One element of the corrections file: `{"stockcode": "...", ...overrides}`.
#[derive(Debug, Deserialize)]
struct CorrectionEntry {
    stockcode: String,
    #[serde(flatten)]
    correction: Correction,
}

/// Read-only stockcode → [`Correction`] lookup table.
#[derive(Debug, Clone, Default)]
pub struct Corrections {
    by_stockcode: HashMap<String, Correction>,
}

impl Corrections {
    /// Builds a table from `(stockcode, correction)` pairs. A later pair for
    /// the same stockcode replaces an earlier one.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Correction)>,
    {
        Self {
            by_stockcode: entries.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn get(&self, stockcode: &str) -> Option<&Correction> {
        self.by_stockcode.get(stockcode)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_stockcode.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_stockcode.is_empty()
    }
}

/// Load the corrections table from a JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or contains an
/// entry with a blank stockcode.
pub fn load_corrections(path: &Path) -> Result<Corrections, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CorrectionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_corrections(&content).map_err(|e| match e {
        ParseFailure::Json(source) => ConfigError::CorrectionsFileParse {
            path: path.display().to_string(),
            source,
        },
        ParseFailure::Invalid(reason) => ConfigError::Validation(reason),
    })
}

enum ParseFailure {
    Json(serde_json::Error),
    Invalid(String),
}

fn parse_corrections(content: &str) -> Result<Corrections, ParseFailure> {
    let entries: Vec<CorrectionEntry> = serde_json::from_str(content).map_err(ParseFailure::Json)?;

    for (idx, entry) in entries.iter().enumerate() {
        if entry.stockcode.trim().is_empty() {
            return Err(ParseFailure::Invalid(format!(
                "entry {idx} has an empty stockcode"
            )));
        }
    }

    Ok(Corrections::from_entries(
        entries.into_iter().map(|e| (e.stockcode, e.correction)),
    ))
}
