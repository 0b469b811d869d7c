//! Reconciliation of the retailer's price tiers into uniform pricing groups.
//!
//! The export has four raw tiers (case, pack, single, promo) but their
//! meaning shifts with the tier labels: the "pack" tier frequently prices a
//! single bottle bought as part of any six, and the generic promotion may
//! apply to cases, packs or bottles. [`reconcile_tiers`] untangles that into
//! six conceptual tiers; [`assemble_pricing`] breaks each one down per unit
//! and per standard drink.

use grogdb_core::{PriceTier, Pricing, PricingGroup};

use crate::extract::{FlatRecord, PriceFields};
use crate::issues::{IssueField, IssueLog};
use crate::parse::{first_integer, parse_number, round_to, same_price};
use crate::promo::{classify_promo, is_per_unit_label, PromoClass, PromoKind};

/// Total price and unit count for each conceptual tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierPrices {
    pub case_price: Option<f64>,
    pub case_promo: Option<f64>,
    pub case_size: Option<u32>,
    pub case_promo_size: Option<u32>,
    pub pack_price: Option<f64>,
    pub pack_promo: Option<f64>,
    pub pack_size: Option<u32>,
    pub pack_promo_size: Option<u32>,
    pub single_price: Option<f64>,
    pub single_promo: Option<f64>,
    pub single_promo_size: Option<u32>,
}

impl TierPrices {
    /// Total price and units bought for `tier`.
    #[must_use]
    pub fn entry(&self, tier: PriceTier) -> (Option<f64>, Option<u32>) {
        match tier {
            PriceTier::Case => (self.case_price, self.case_size),
            PriceTier::CaseSpecial => (self.case_promo, self.case_promo_size),
            PriceTier::Pack => (self.pack_price, self.pack_size),
            PriceTier::PackSpecial => (self.pack_promo, self.pack_promo_size),
            PriceTier::Single => (self.single_price, Some(1)),
            PriceTier::SingleSpecial => (self.single_promo, self.single_promo_size),
        }
    }
}

/// Resolves the six conceptual tiers of a record.
pub fn reconcile_tiers(flat: &FlatRecord, promo: PromoClass, issues: &mut IssueLog) -> TierPrices {
    let mut tiers = TierPrices::default();

    // Case tier.
    tiers.case_price = flat.case.price;
    tiers.case_promo = nonzero(flat.case.promo);
    tiers.case_size = units_from(
        flat.case.message.as_deref(),
        flat.case_size.as_deref(),
        IssueField::CaseSize,
        issues,
    );
    let promo_targets_case = matches!(
        (flat.promo.promo, tiers.case_promo),
        (Some(generic), Some(case)) if same_price(generic, case)
    );
    tiers.case_promo_size = match (promo_targets_case, tiers.case_size, promo.multiplier) {
        (true, Some(size), Some(multiplier)) => Some(size.saturating_mul(multiplier)),
        _ => tiers.case_size,
    };

    // Pack and single tiers.
    let redirected = if is_per_unit_label(flat.pack.message.as_deref()) {
        reconcile_per_unit_pack(flat, promo, &mut tiers)
    } else {
        tiers.pack_price = flat.pack.price;
        tiers.pack_promo = nonzero(flat.pack.promo);
        tiers.pack_size = units_from(
            flat.pack.message.as_deref(),
            flat.pack_size.as_deref(),
            IssueField::PackSize,
            issues,
        );
        tiers.pack_promo_size = match (promo.kind, tiers.pack_size, promo.multiplier) {
            (PromoKind::Pack, Some(size), Some(multiplier)) => {
                Some(size.saturating_mul(multiplier))
            }
            _ => tiers.pack_size,
        };
        false
    };

    if !redirected {
        tiers.single_price = nonzero(flat.single.price);
        tiers.single_promo = nonzero(flat.single.promo);
        tiers.single_promo_size = Some(1);
    }

    tiers
}

/// Handles a pack tier whose label prices individual bottles. Returns `true`
/// when the single tier was filled from here.
fn reconcile_per_unit_pack(flat: &FlatRecord, promo: PromoClass, tiers: &mut TierPrices) -> bool {
    let pack = &flat.pack;

    if promo.kind == PromoKind::Single {
        tiers.single_price = pack.price;
        tiers.single_promo = nonzero(pack.promo);
        tiers.single_promo_size = promo.multiplier;
        return true;
    }

    let price = pack.price.unwrap_or(0.0);
    let promo_price = pack.promo.unwrap_or(0.0);

    if price > promo_price {
        let source: &PriceFields = if nonzero(flat.single.price).is_some() {
            &flat.single
        } else {
            pack
        };
        tiers.single_price = source.price;
        tiers.single_promo = nonzero(source.promo);
        tiers.single_promo_size = Some(1);
        return true;
    }

    if promo_price > price {
        tiers.pack_promo = pack.promo;
    }
    false
}

/// Unit count from a tier label (`"Case of 24"`), else from the matching
/// detail field. Zero counts as absent.
fn units_from(
    message: Option<&str>,
    detail: Option<&str>,
    field: IssueField,
    issues: &mut IssueLog,
) -> Option<u32> {
    if let Some(units) = message.and_then(first_integer).filter(|n| *n > 0) {
        return Some(units);
    }

    match detail {
        Some(text) => {
            let units = parse_count(text);
            if units.is_none() {
                issues.record(field, text);
            }
            units.filter(|n| *n > 0)
        }
        None => {
            if let Some(message) = message {
                issues.record(field, message);
            }
            None
        }
    }
}

/// Parses a whole, non-negative count such as `"24"` or `"6.0"`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_count(text: &str) -> Option<u32> {
    parse_number(text)
        .filter(|v| *v >= 0.0 && v.fract().abs() < f64::EPSILON && *v <= f64::from(u32::MAX))
        .map(|v| v as u32)
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.abs() > f64::EPSILON)
}

/// Builds the pricing group of one tier, or `None` when its total price or
/// cost per standard drink cannot be resolved.
#[must_use]
pub fn build_group(
    total_price: Option<f64>,
    units: Option<u32>,
    standard_drinks: Option<f64>,
    alcohol_tax_cost: f64,
) -> Option<PricingGroup> {
    let total_price = total_price?;
    let units = units.filter(|u| *u != 0)?;
    let unit_price = round_to(total_price / f64::from(units), 2);
    let standard_drinks = nonzero(standard_drinks)?;
    let cost_per_standard = round_to(unit_price / standard_drinks, 2);
    let alcohol_tax_percent = if cost_per_standard > 0.0 {
        round_to(alcohol_tax_cost / cost_per_standard * 100.0, 0)
    } else {
        0.0
    };

    Some(PricingGroup {
        total_price,
        units,
        unit_price,
        cost_per_standard,
        alcohol_tax_cost,
        alcohol_tax_percent,
    })
}

/// Breaks every resolvable tier down per unit and per standard drink.
#[must_use]
pub fn assemble_pricing(
    tiers: &TierPrices,
    standard_drinks: Option<f64>,
    alcohol_tax_cost: f64,
) -> Pricing {
    PriceTier::ALL
        .into_iter()
        .filter_map(|tier| {
            let (total, units) = tiers.entry(tier);
            build_group(total, units, standard_drinks, alcohol_tax_cost).map(|group| (tier, group))
        })
        .collect()
}

/// Classifies the promotion and produces the pricing groups of a record.
pub fn reconcile_pricing(
    flat: &FlatRecord,
    standard_drinks: Option<f64>,
    alcohol_tax_cost: f64,
    issues: &mut IssueLog,
) -> Pricing {
    let promo = classify_promo(flat.promo.message.as_deref(), issues);
    let tiers = reconcile_tiers(flat, promo, issues);
    assemble_pricing(&tiers, standard_drinks, alcohol_tax_cost)
}
