use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Physical container a product is sold in, inferred from the product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vessel {
    Bottle,
    Can,
    Longneck,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Vessel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vessel::Bottle => write!(f, "bottle"),
            Vessel::Can => write!(f, "can"),
            Vessel::Longneck => write!(f, "longneck"),
            Vessel::Unknown => write!(f, "unknown"),
        }
    }
}

/// Purchase-quantity grouping of a pricing entry.
///
/// Declaration order is the serialization order of [`Pricing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    Case,
    CaseSpecial,
    Pack,
    PackSpecial,
    Single,
    SingleSpecial,
}

impl PriceTier {
    pub const ALL: [PriceTier; 6] = [
        PriceTier::Case,
        PriceTier::CaseSpecial,
        PriceTier::Pack,
        PriceTier::PackSpecial,
        PriceTier::Single,
        PriceTier::SingleSpecial,
    ];
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PriceTier::Case => "case",
            PriceTier::CaseSpecial => "case_special",
            PriceTier::Pack => "pack",
            PriceTier::PackSpecial => "pack_special",
            PriceTier::Single => "single",
            PriceTier::SingleSpecial => "single_special",
        };
        f.write_str(name)
    }
}

/// Tier name → group. Only tiers with a resolvable price and cost per
/// standard drink are present.
pub type Pricing = BTreeMap<PriceTier, PricingGroup>;

/// Resolved descriptive and physical attributes of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub name: Option<String>,
    /// Name with the trailing pack/size/vessel description removed,
    /// e.g. `"Great Northern Original"`.
    pub name_clean: Option<String>,
    pub brand: Option<String>,
    /// Reported container volume in millilitres.
    pub size_ml: Option<f64>,
    /// Authoritative container volume in millilitres after cross-checking
    /// the name, reported size and standard drinks.
    pub size_clean: Option<f64>,
    /// Alcohol by volume on the 0–100 scale (`4.8`, never `0.048`).
    pub percentage_raw: Option<f64>,
    pub standard_drinks_raw: Option<f64>,
    pub standard_drinks_clean: Option<f64>,
    pub vessel: Vessel,
    pub image_url: Option<String>,
    /// Average review score, 0.0–5.0, one decimal.
    pub rating: Option<f64>,
    pub ibu: Option<f64>,
    pub beer_style: Option<String>,
}

/// Price of one purchase tier broken down per unit and per standard drink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingGroup {
    pub total_price: f64,
    /// Containers bought for `total_price`.
    pub units: u32,
    pub unit_price: f64,
    pub cost_per_standard: f64,
    /// Excise paid per standard drink; identical across a record's tiers.
    pub alcohol_tax_cost: f64,
    /// `alcohol_tax_cost` as a whole-number percentage of `cost_per_standard`.
    pub alcohol_tax_percent: f64,
}

/// One enriched catalogue entry as written to the output dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub stockcode: String,
    pub properties: Properties,
    pub pricing: Pricing,
}

impl OutputRecord {
    /// Returns the group for `tier`, if it was resolvable.
    #[must_use]
    pub fn group(&self, tier: PriceTier) -> Option<&PricingGroup> {
        self.pricing.get(&tier)
    }

    /// Returns the lowest cost per standard drink across all tiers.
    #[must_use]
    pub fn cheapest_per_standard(&self) -> Option<(PriceTier, f64)> {
        self.pricing
            .iter()
            .map(|(tier, group)| (*tier, group.cost_per_standard))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_group(cost_per_standard: f64) -> PricingGroup {
        PricingGroup {
            total_price: 62.4,
            units: 24,
            unit_price: 2.6,
            cost_per_standard,
            alcohol_tax_cost: 0.6,
            alcohol_tax_percent: 32.0,
        }
    }

    fn make_record(pricing: Pricing) -> OutputRecord {
        OutputRecord {
            stockcode: "123456".to_string(),
            properties: Properties {
                name: Some("Great Northern Original 6X375mL Cans".to_string()),
                name_clean: Some("Great Northern Original".to_string()),
                brand: Some("Great Northern".to_string()),
                size_ml: Some(375.0),
                size_clean: Some(375.0),
                percentage_raw: Some(4.2),
                standard_drinks_raw: Some(1.2),
                standard_drinks_clean: Some(1.2),
                vessel: Vessel::Can,
                image_url: None,
                rating: Some(4.5),
                ibu: None,
                beer_style: Some("Lager".to_string()),
            },
            pricing,
        }
    }

    #[test]
    fn vessel_serializes_lowercase() {
        let json = serde_json::to_string(&Vessel::Longneck).unwrap();
        assert_eq!(json, "\"longneck\"");
    }

    #[test]
    fn vessel_unrecognised_value_deserializes_as_unknown() {
        let vessel: Vessel = serde_json::from_str("\"stubby\"").unwrap();
        assert_eq!(vessel, Vessel::Unknown);
    }

    #[test]
    fn pricing_serializes_in_tier_order() {
        let mut pricing = Pricing::new();
        pricing.insert(PriceTier::SingleSpecial, make_group(2.0));
        pricing.insert(PriceTier::Case, make_group(1.86));
        pricing.insert(PriceTier::PackSpecial, make_group(1.9));
        let json = serde_json::to_string(&pricing).unwrap();
        let case = json.find("\"case\"").unwrap();
        let pack_special = json.find("\"pack_special\"").unwrap();
        let single_special = json.find("\"single_special\"").unwrap();
        assert!(case < pack_special && pack_special < single_special);
    }

    #[test]
    fn price_tier_display_matches_serialized_key() {
        for tier in PriceTier::ALL {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{tier}\""));
        }
    }

    #[test]
    fn vessel_display_matches_serialized_value() {
        for vessel in [Vessel::Bottle, Vessel::Can, Vessel::Longneck, Vessel::Unknown] {
            let json = serde_json::to_string(&vessel).unwrap();
            assert_eq!(json, format!("\"{vessel}\""));
        }
    }

    #[test]
    fn group_returns_none_for_missing_tier() {
        let record = make_record(Pricing::new());
        assert!(record.group(PriceTier::Case).is_none());
    }

    #[test]
    fn cheapest_per_standard_picks_lowest_tier() {
        let mut pricing = Pricing::new();
        pricing.insert(PriceTier::Case, make_group(1.86));
        pricing.insert(PriceTier::Single, make_group(2.5));
        pricing.insert(PriceTier::CaseSpecial, make_group(1.7));
        let record = make_record(pricing);
        assert_eq!(
            record.cheapest_per_standard(),
            Some((PriceTier::CaseSpecial, 1.7))
        );
    }

    #[test]
    fn cheapest_per_standard_none_without_pricing() {
        let record = make_record(Pricing::new());
        assert!(record.cheapest_per_standard().is_none());
    }
}
