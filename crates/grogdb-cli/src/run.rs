//! Command handlers for the CLI.
//!
//! Fatal pipeline errors propagate to `main`; per-record conversion issues
//! were already logged by the pipeline and are only counted here.

use std::path::PathBuf;

use grogdb_catalog::{PipelinePaths, PipelineReport};
use grogdb_core::{AppConfig, OutputRecord};

/// Combines configured paths with any flag overrides.
pub(crate) fn resolve_paths(
    config: &AppConfig,
    input: Option<PathBuf>,
    corrections: Option<PathBuf>,
    output: Option<PathBuf>,
) -> PipelinePaths {
    PipelinePaths {
        input: input.unwrap_or_else(|| config.input_path.clone()),
        corrections: corrections.unwrap_or_else(|| config.corrections_path.clone()),
        output: output.unwrap_or_else(|| config.output_path.clone()),
    }
}

/// Transforms the catalogue and writes the output dataset.
///
/// When `dry_run` is `true` the catalogue is transformed and summarised but
/// nothing is written.
///
/// # Errors
///
/// Returns an error if an input cannot be loaded or the output cannot be
/// written.
pub(crate) fn run_catalogue(paths: &PipelinePaths, dry_run: bool) -> anyhow::Result<()> {
    if dry_run {
        let report = grogdb_catalog::transform_files(paths)?;
        println!(
            "dry-run: would write {} records to {}",
            report.records.len(),
            paths.output.display()
        );
        print_summary(&report);
        return Ok(());
    }

    let report = grogdb_catalog::run_pipeline(paths)?;
    println!(
        "wrote {} records to {}",
        report.records.len(),
        paths.output.display()
    );
    print_summary(&report);
    Ok(())
}

/// Prints the enriched record for `stockcode` as pretty JSON.
///
/// # Errors
///
/// Returns an error if an input cannot be loaded or no valid record has
/// that stockcode.
pub(crate) fn inspect_stockcode(paths: &PipelinePaths, stockcode: &str) -> anyhow::Result<()> {
    let report = grogdb_catalog::transform_files(paths)?;

    let Some(record) = report.record(stockcode) else {
        if let Some(reason) = report
            .skipped
            .iter()
            .find(|reason| reason.stockcode() == Some(stockcode))
        {
            anyhow::bail!("stockcode '{stockcode}' was skipped: {reason}");
        }
        anyhow::bail!("stockcode '{stockcode}' not found in {}", paths.input.display());
    };

    println!("{}", serde_json::to_string_pretty(record)?);
    eprintln!("{}", describe_record(record));
    for issue in report.issues.iter().filter(|i| i.stockcode == stockcode) {
        eprintln!("issue: {} could not convert '{}'", issue.field, issue.value);
    }
    Ok(())
}

/// One-line summary of a record: vessel and the tier with the lowest cost
/// per standard drink.
fn describe_record(record: &OutputRecord) -> String {
    match record.cheapest_per_standard() {
        Some((tier, cost)) => format!(
            "{}: {} vessel, cheapest per standard drink is {tier} at ${cost:.2}",
            record.stockcode, record.properties.vessel
        ),
        None => format!(
            "{}: {} vessel, no tier has a cost per standard drink",
            record.stockcode, record.properties.vessel
        ),
    }
}

fn print_summary(report: &PipelineReport) {
    println!(
        "{} skipped, {} conversion issues",
        report.skipped.len(),
        report.issues.len()
    );
}

#[cfg(test)]
mod tests {
    use grogdb_core::Environment;

    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            env: Environment::Test,
            log_level: "info".to_string(),
            input_path: PathBuf::from("./data/products.json"),
            corrections_path: PathBuf::from("./config/corrections.json"),
            output_path: PathBuf::from("./data/beer.json"),
        }
    }

    #[test]
    fn resolve_paths_uses_config_defaults() {
        let paths = resolve_paths(&config(), None, None, None);
        assert_eq!(paths.input, PathBuf::from("./data/products.json"));
        assert_eq!(paths.corrections, PathBuf::from("./config/corrections.json"));
        assert_eq!(paths.output, PathBuf::from("./data/beer.json"));
    }

    #[test]
    fn resolve_paths_flags_override_config() {
        let paths = resolve_paths(
            &config(),
            Some(PathBuf::from("in.json")),
            None,
            Some(PathBuf::from("out.json")),
        );
        assert_eq!(paths.input, PathBuf::from("in.json"));
        assert_eq!(paths.corrections, PathBuf::from("./config/corrections.json"));
        assert_eq!(paths.output, PathBuf::from("out.json"));
    }

    #[test]
    fn dry_run_does_not_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("products.json");
        let corrections = dir.path().join("corrections.json");
        std::fs::write(&input, "[]").unwrap();
        std::fs::write(&corrections, "[]").unwrap();
        let paths = PipelinePaths {
            input,
            corrections,
            output: dir.path().join("beer.json"),
        };

        run_catalogue(&paths, true).unwrap();
        assert!(!paths.output.exists());

        run_catalogue(&paths, false).unwrap();
        assert_eq!(std::fs::read_to_string(&paths.output).unwrap(), "[]\n");
    }

    #[test]
    fn describe_record_names_vessel_and_cheapest_tier() {
        let record: OutputRecord = serde_json::from_value(serde_json::json!({
            "stockcode": "912345",
            "properties": {
                "name": null, "name_clean": null, "brand": null,
                "size_ml": null, "size_clean": null, "percentage_raw": null,
                "standard_drinks_raw": null, "standard_drinks_clean": null,
                "vessel": "can", "image_url": null, "rating": null,
                "ibu": null, "beer_style": null
            },
            "pricing": {
                "case": {
                    "total_price": 62.4, "units": 24, "unit_price": 2.6,
                    "cost_per_standard": 1.86, "alcohol_tax_cost": 0.6,
                    "alcohol_tax_percent": 32.0
                },
                "single": {
                    "total_price": 3.5, "units": 1, "unit_price": 3.5,
                    "cost_per_standard": 2.5, "alcohol_tax_cost": 0.6,
                    "alcohol_tax_percent": 24.0
                }
            }
        }))
        .unwrap();

        assert_eq!(
            describe_record(&record),
            "912345: can vessel, cheapest per standard drink is case at $1.86"
        );
    }

    #[test]
    fn inspect_unknown_stockcode_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("products.json");
        let corrections = dir.path().join("corrections.json");
        std::fs::write(&input, "[]").unwrap();
        std::fs::write(&corrections, "[]").unwrap();
        let paths = PipelinePaths {
            input,
            corrections,
            output: dir.path().join("beer.json"),
        };

        let err = inspect_stockcode(&paths, "912345").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
