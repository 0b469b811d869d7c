//! Normalization from a [`FlatRecord`] to a [`grogdb_core::OutputRecord`].
//!
//! Attribute resolution is delegated to [`crate::attributes`], excise to
//! [`crate::tax`] and tier reconciliation to [`crate::pricing`]; this module
//! only wires the stages together in order.

use grogdb_core::{Corrections, OutputRecord};

use crate::attributes::resolve_properties;
use crate::extract::FlatRecord;
use crate::issues::IssueLog;
use crate::pricing::reconcile_pricing;
use crate::tax::ExciseSchedule;

/// Builds the output record of one valid catalogue entry.
///
/// Taxable volume is the cross-checked `size_clean`, and both excise and
/// cost per standard drink use `standard_drinks_clean`.
pub fn normalize_record(
    flat: &FlatRecord,
    corrections: &Corrections,
    schedule: &ExciseSchedule,
    issues: &mut IssueLog,
) -> OutputRecord {
    let correction = corrections.get(&flat.stockcode);
    let properties = resolve_properties(flat, correction, issues);

    let alcohol_tax_cost = schedule.tax_per_standard_drink(
        properties.percentage_raw,
        properties.size_clean,
        properties.standard_drinks_clean,
    );

    let pricing = reconcile_pricing(
        flat,
        properties.standard_drinks_clean,
        alcohol_tax_cost,
        issues,
    );

    OutputRecord {
        stockcode: flat.stockcode.clone(),
        properties,
        pricing,
    }
}

#[cfg(test)]
mod tests {
    use grogdb_core::{Correction, PriceTier, Vessel};

    use super::*;
    use crate::extract::PriceFields;

    fn lager() -> FlatRecord {
        FlatRecord {
            stockcode: "912345".to_owned(),
            case: PriceFields {
                message: Some("Case of 24".to_owned()),
                price: Some(62.4),
                promo: Some(0.0),
            },
            name: Some("Coopers Pale Ale 375mL Bottle".to_owned()),
            size: Some("375mL".to_owned()),
            percent: Some("4.8%".to_owned()),
            standard_drinks: Some("1.4".to_owned()),
            ..FlatRecord::default()
        }
    }

    fn normalize(flat: &FlatRecord, corrections: &Corrections) -> (OutputRecord, IssueLog) {
        let mut issues = IssueLog::new(&flat.stockcode);
        let record = normalize_record(flat, corrections, &ExciseSchedule::AUSTRALIA, &mut issues);
        (record, issues)
    }

    #[test]
    fn normalize_worked_case_example() {
        let (record, issues) = normalize(&lager(), &Corrections::default());
        assert!(issues.issues().is_empty());
        assert_eq!(record.properties.vessel, Vessel::Bottle);
        assert_eq!(record.properties.name_clean.as_deref(), Some("Coopers Pale Ale"));

        let case = record.group(PriceTier::Case).unwrap();
        assert!((case.unit_price - 2.6).abs() < 1e-9);
        assert!((case.cost_per_standard - 1.86).abs() < 1e-9);
        assert!((case.alcohol_tax_cost - 0.6).abs() < 1e-9);
        assert!(record.group(PriceTier::CaseSpecial).is_none());
    }

    #[test]
    fn normalize_correction_drives_tax_and_pricing() {
        let corrections = Corrections::from_entries([(
            "912345".to_owned(),
            Correction {
                standard_drinks_clean: Some(2.0),
                ..Correction::default()
            },
        )]);
        let (record, _) = normalize(&lager(), &corrections);
        assert_eq!(record.properties.standard_drinks_clean, Some(2.0));
        let case = record.group(PriceTier::Case).unwrap();
        assert!((case.cost_per_standard - 1.3).abs() < 1e-9);
    }

    #[test]
    fn normalize_without_standard_drinks_has_no_pricing() {
        let mut flat = lager();
        flat.size = None;
        flat.standard_drinks = None;
        flat.name = Some("Mystery Lager".to_owned());
        let (record, _) = normalize(&flat, &Corrections::default());
        assert!(record.properties.standard_drinks_clean.is_none());
        assert!(record.pricing.is_empty());
    }
}
