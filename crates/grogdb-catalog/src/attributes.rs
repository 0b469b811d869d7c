//! Resolution of a product's physical attributes from noisy catalogue text.
//!
//! The retailer reports volume, strength and standard drinks independently
//! and they frequently disagree. Volume is taken from the product name first
//! (most reliable), then the size field, then back-computed from standard
//! drinks. Standard drinks are recomputed from volume and strength and the
//! reported figure is only trusted when it agrees with the computed one.
//!
//! A [`Correction`] for the stockcode replaces the matching heuristic
//! outright.

use std::sync::LazyLock;

use grogdb_core::{Correction, Properties, Vessel};
use regex::Regex;

use crate::extract::FlatRecord;
use crate::issues::{IssueField, IssueLog};
use crate::parse::{first_number, last_three_digit_run, leading_number, parse_number, round_to};

/// `percent × millilitres / STANDARD_DRINK_DIVISOR` = standard drinks
/// (10 g of ethanol per standard drink).
pub const STANDARD_DRINK_DIVISOR: f64 = 1267.0;

/// Largest gap between reported and computed standard drinks for which the
/// reported value is kept.
pub const STANDARD_DRINK_TOLERANCE: f64 = 0.15;

/// Reported sizes below this are litres (`"0.5"`, `"1.25L"`).
const LITRE_THRESHOLD: f64 = 5.0;

/// Percentages below this, with standard drinks present, were reported as a
/// fraction of one.
const FRACTION_THRESHOLD: f64 = 0.1;

/// Single-serve container range for a trusted reported size, in millilitres.
const SINGLE_SERVE_ML: std::ops::Range<f64> = 100.0..1000.0;

static NAME_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s*(?:\b(?:bottles?|cans?|longnecks?)\s*)?(?:\d+(?:\s*[x×]\s*\d+)*\s*ml)?\s*(?:\b(?:bottles?|cans?|longnecks?)\b)?\s*(?:\([^)]*\))?\s*$",
    )
    .expect("valid name suffix regex")
});

static BOTTLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bbottles?\b").expect("valid bottle regex"));

static CAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcans?\b").expect("valid can regex"));

static LONGNECK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\blongnecks?\b").expect("valid longneck regex"));

/// Resolves the [`Properties`] of one record. Conversion failures are
/// recorded in `issues` and leave the affected field `None`.
pub fn resolve_properties(
    flat: &FlatRecord,
    correction: Option<&Correction>,
    issues: &mut IssueLog,
) -> Properties {
    let name = flat.name.as_deref();

    let name_clean = correction
        .and_then(|c| c.name_clean.clone())
        .or_else(|| name.map(clean_name));

    let vessel = correction
        .and_then(|c| c.vessel)
        .unwrap_or_else(|| name.map_or(Vessel::Unknown, detect_vessel));

    let size_ml = flat
        .size
        .as_deref()
        .and_then(|size| parse_size_ml(size, issues));

    let standard_drinks_raw =
        convert(flat.standard_drinks.as_deref(), IssueField::StandardDrinks, issues);

    let percentage_raw = correction.and_then(|c| c.percentage_raw).or_else(|| {
        flat.percent
            .as_deref()
            .and_then(|percent| parse_percentage(percent, standard_drinks_raw, issues))
    });

    let size_clean = correction
        .and_then(|c| c.size_clean)
        .or_else(|| resolve_size_clean(name, size_ml, standard_drinks_raw, percentage_raw));

    let standard_drinks_clean = correction
        .and_then(|c| c.standard_drinks_clean)
        .or_else(|| resolve_standard_drinks(size_clean, percentage_raw, standard_drinks_raw));

    let rating =
        convert(flat.rating.as_deref(), IssueField::Rating, issues).map(|r| round_to(r, 1));
    let ibu = convert(flat.ibu.as_deref(), IssueField::Ibu, issues);

    Properties {
        name: flat.name.clone(),
        name_clean,
        brand: flat.brand.clone(),
        size_ml,
        size_clean,
        percentage_raw,
        standard_drinks_raw,
        standard_drinks_clean,
        vessel,
        image_url: flat.image_url.clone(),
        rating,
        ibu,
        beer_style: flat.beer_style.clone(),
    }
}

/// Strips a trailing pack/size/vessel description from a product name.
///
/// `"Great Northern Original 6X375mL Cans"` → `"Great Northern Original"`.
#[must_use]
pub fn clean_name(name: &str) -> String {
    NAME_SUFFIX_RE.replace(name, "").trim().to_owned()
}

/// Infers the container from the product name; bottle beats can beats
/// longneck when several are mentioned.
#[must_use]
pub fn detect_vessel(name: &str) -> Vessel {
    if BOTTLE_RE.is_match(name) {
        Vessel::Bottle
    } else if CAN_RE.is_match(name) {
        Vessel::Can
    } else if LONGNECK_RE.is_match(name) {
        Vessel::Longneck
    } else {
        Vessel::Unknown
    }
}

/// Reads the reported size in millilitres, scaling litre values.
fn parse_size_ml(size: &str, issues: &mut IssueLog) -> Option<f64> {
    let Some(value) = first_number(size) else {
        issues.record(IssueField::Size, size);
        return None;
    };
    if value < LITRE_THRESHOLD {
        Some(value * 1000.0)
    } else {
        Some(value)
    }
}

/// Reads the alcohol percentage from text such as `"4.8%"`.
///
/// A value below 0.1 alongside a nonzero standard-drinks figure was reported
/// as a fraction and is scaled to a percentage.
fn parse_percentage(
    percent: &str,
    standard_drinks_raw: Option<f64>,
    issues: &mut IssueLog,
) -> Option<f64> {
    let Some(value) = leading_number(percent) else {
        issues.record(IssueField::Percent, percent);
        return None;
    };
    let has_standard_drinks = standard_drinks_raw.is_some_and(|sd| sd.abs() > f64::EPSILON);
    if value < FRACTION_THRESHOLD && has_standard_drinks {
        Some(value * 100.0)
    } else {
        Some(value)
    }
}

/// Picks the authoritative container volume.
///
/// Order: a standalone three-digit number in the name, a single-serve
/// reported size, then the volume implied by standard drinks and strength.
#[must_use]
pub fn resolve_size_clean(
    name: Option<&str>,
    size_ml: Option<f64>,
    standard_drinks_raw: Option<f64>,
    percentage_raw: Option<f64>,
) -> Option<f64> {
    if let Some(from_name) = name.and_then(last_three_digit_run) {
        return Some(from_name);
    }
    if let Some(size) = size_ml.filter(|ml| SINGLE_SERVE_ML.contains(ml)) {
        return Some(size);
    }
    match (standard_drinks_raw, percentage_raw) {
        (Some(sd), Some(pct)) if pct.abs() > f64::EPSILON => {
            Some(round_to(sd * STANDARD_DRINK_DIVISOR / pct, 0))
        }
        _ => None,
    }
}

/// Picks the authoritative standard-drink count.
///
/// The reported figure wins when it is within [`STANDARD_DRINK_TOLERANCE`]
/// of the computed one; without volume and strength it is the only source.
#[must_use]
pub fn resolve_standard_drinks(
    size_clean: Option<f64>,
    percentage_raw: Option<f64>,
    standard_drinks_raw: Option<f64>,
) -> Option<f64> {
    let (Some(size), Some(pct)) = (size_clean, percentage_raw) else {
        return standard_drinks_raw;
    };
    let computed = round_to(pct * size / STANDARD_DRINK_DIVISOR, 1);
    match standard_drinks_raw {
        Some(reported) if (computed - reported).abs() <= STANDARD_DRINK_TOLERANCE => {
            Some(reported)
        }
        _ => Some(computed),
    }
}

/// Converts an optional numeric text field, recording a failure.
fn convert(text: Option<&str>, field: IssueField, issues: &mut IssueLog) -> Option<f64> {
    let text = text?;
    let value = parse_number(text);
    if value.is_none() {
        issues.record(field, text);
    }
    value
}
