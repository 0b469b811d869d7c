//! Recoverable data-quality problems found while resolving a record.
//!
//! A conversion issue never stops processing: the affected field resolves to
//! `None` and the record is still emitted. Each issue is logged once, at
//! `warn`, with the stockcode, field and raw value so upstream drift can be
//! traced back to a product.

use serde::Serialize;

/// Which source field failed to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueField {
    Size,
    Percent,
    StandardDrinks,
    Rating,
    Ibu,
    PackSize,
    CaseSize,
    PromoMultiplier,
}

impl std::fmt::Display for IssueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IssueField::Size => "size",
            IssueField::Percent => "percent",
            IssueField::StandardDrinks => "standard_drinks",
            IssueField::Rating => "rating",
            IssueField::Ibu => "ibu",
            IssueField::PackSize => "pack_size",
            IssueField::CaseSize => "case_size",
            IssueField::PromoMultiplier => "promo_multiplier",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionIssue {
    pub stockcode: String,
    pub field: IssueField,
    /// The raw text that could not be converted.
    pub value: String,
}

/// Per-record issue collector.
#[derive(Debug)]
pub struct IssueLog {
    stockcode: String,
    issues: Vec<ConversionIssue>,
}

impl IssueLog {
    #[must_use]
    pub fn new(stockcode: &str) -> Self {
        Self {
            stockcode: stockcode.to_owned(),
            issues: Vec::new(),
        }
    }

    pub fn record(&mut self, field: IssueField, value: &str) {
        tracing::warn!(
            stockcode = %self.stockcode,
            %field,
            value = %value,
            "failed to convert catalogue field"
        );
        self.issues.push(ConversionIssue {
            stockcode: self.stockcode.clone(),
            field,
            value: value.to_owned(),
        });
    }

    #[must_use]
    pub fn issues(&self) -> &[ConversionIssue] {
        &self.issues
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<ConversionIssue> {
        self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_captures_stockcode_field_and_value() {
        let mut log = IssueLog::new("912345");
        log.record(IssueField::Rating, "five stars");
        assert_eq!(
            log.issues(),
            &[ConversionIssue {
                stockcode: "912345".to_owned(),
                field: IssueField::Rating,
                value: "five stars".to_owned(),
            }]
        );
    }

    #[test]
    fn field_display_matches_serialized_name() {
        let json = serde_json::to_string(&IssueField::StandardDrinks).unwrap();
        assert_eq!(json, format!("\"{}\"", IssueField::StandardDrinks));
    }
}
