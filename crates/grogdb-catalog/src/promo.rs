//! Classification of free-text tier labels.
//!
//! Tier messages are the only place the retailer says what a price buys
//! (`"2 cases for $90"`, `"each in any six"`). They are classified once here
//! and the pricing reconciler works from the tagged result.

use crate::issues::{IssueField, IssueLog};
use crate::parse::first_integer;

/// Purchase unit a promotion applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoKind {
    Case,
    Pack,
    Single,
    Unknown,
}

/// Classified promotion: the unit it applies to and how many of that unit
/// the promotional price buys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromoClass {
    pub kind: PromoKind,
    pub multiplier: Option<u32>,
}

impl PromoClass {
    pub const UNKNOWN: Self = Self {
        kind: PromoKind::Unknown,
        multiplier: None,
    };
}

const UNIT_WORDS: [(&str, &str, PromoKind); 3] = [
    ("cases", "case", PromoKind::Case),
    ("packs", "pack", PromoKind::Pack),
    ("bottles", "bottle", PromoKind::Single),
];

/// Classifies the generic promotion message.
///
/// A plural unit word (`"2 cases for $90"`) takes its multiplier from the
/// first number in the message; a missing number is recorded as an issue.
/// A singular unit word (`"case special"`) has a multiplier of one.
pub fn classify_promo(message: Option<&str>, issues: &mut IssueLog) -> PromoClass {
    let Some(message) = message else {
        return PromoClass::UNKNOWN;
    };
    let lower = message.to_lowercase();

    if let Some((_, _, kind)) = UNIT_WORDS.iter().find(|(plural, _, _)| lower.contains(plural)) {
        let multiplier = first_integer(&lower);
        if multiplier.is_none() {
            issues.record(IssueField::PromoMultiplier, message);
        }
        return PromoClass {
            kind: *kind,
            multiplier,
        };
    }

    if let Some((_, _, kind)) = UNIT_WORDS
        .iter()
        .find(|(_, singular, _)| lower.contains(singular))
    {
        return PromoClass {
            kind: *kind,
            multiplier: Some(1),
        };
    }

    PromoClass::UNKNOWN
}

/// `true` when a pack-tier label prices individual bottles rather than a
/// multi-unit pack (`"each in any six"`, `"per bottle"`).
#[must_use]
pub fn is_per_unit_label(message: Option<&str>) -> bool {
    message.is_some_and(|m| {
        let lower = m.to_lowercase();
        lower.contains("each") || lower.contains("bottle")
    })
}
