//! Flattening of a nested [`RawProduct`] into a [`FlatRecord`].
//!
//! Extraction only moves data: it never converts detail text to numbers, so
//! it cannot produce conversion issues. The one decision it makes is whether
//! the entry is worth processing at all (see [`SkipReason`]).

use crate::types::{AdditionalDetail, RawPriceTier, RawProduct};

/// Stockcode prefix of online-only listings, which are never compared.
const ONLINE_ONLY_PREFIX: &str = "ER";

/// The three raw values of one price tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceFields {
    pub message: Option<String>,
    pub price: Option<f64>,
    pub promo: Option<f64>,
}

impl From<&RawPriceTier> for PriceFields {
    fn from(tier: &RawPriceTier) -> Self {
        Self {
            message: tier.message.clone(),
            price: tier.value,
            promo: tier.after_promotion,
        }
    }
}

/// One valid catalogue entry with prices and details lifted to the top level.
/// Detail fields are still raw text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord {
    pub stockcode: String,
    pub case: PriceFields,
    pub pack: PriceFields,
    pub single: PriceFields,
    pub promo: PriceFields,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub percent: Option<String>,
    pub standard_drinks: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<String>,
    pub ibu: Option<String>,
    pub beer_style: Option<String>,
    pub pack_size: Option<String>,
    pub case_size: Option<String>,
}

/// Why a catalogue entry produced no record. Skips are routine and are not
/// reported as data-quality issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoProducts,
    MissingStockcode,
    OnlineOnly { stockcode: String },
    NoAlcohol { stockcode: String },
}

impl SkipReason {
    #[must_use]
    pub fn stockcode(&self) -> Option<&str> {
        match self {
            SkipReason::NoProducts | SkipReason::MissingStockcode => None,
            SkipReason::OnlineOnly { stockcode } | SkipReason::NoAlcohol { stockcode } => {
                Some(stockcode)
            }
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoProducts => write!(f, "entry has no products"),
            SkipReason::MissingStockcode => write!(f, "first product has no stockcode"),
            SkipReason::OnlineOnly { stockcode } => write!(f, "{stockcode} is online-only"),
            SkipReason::NoAlcohol { stockcode } => {
                write!(f, "{stockcode} has no alcohol percentage")
            }
        }
    }
}

/// Flattens one catalogue entry.
///
/// Stockcode and prices come from the first product only. Details are read
/// from every product in order, so for a repeated detail name the last
/// product wins.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the entry has no products, no stockcode,
/// an online-only stockcode, or a missing/`"0%"` alcohol percentage.
pub fn extract_product(raw: &RawProduct) -> Result<FlatRecord, SkipReason> {
    let first = raw.products.first().ok_or(SkipReason::NoProducts)?;
    let stockcode = first
        .stockcode
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(SkipReason::MissingStockcode)?
        .to_owned();

    let mut record = FlatRecord {
        stockcode,
        ..FlatRecord::default()
    };

    if let Some(prices) = &first.prices {
        let fields = |tier: &Option<RawPriceTier>| {
            tier.as_ref().map(PriceFields::from).unwrap_or_default()
        };
        record.case = fields(&prices.case);
        record.pack = fields(&prices.pack);
        record.single = fields(&prices.single);
        record.promo = fields(&prices.promo);
    }

    for detail in raw.products.iter().flat_map(|p| &p.additional_details) {
        apply_detail(&mut record, detail);
    }

    if record.stockcode.starts_with(ONLINE_ONLY_PREFIX) {
        return Err(SkipReason::OnlineOnly {
            stockcode: record.stockcode,
        });
    }

    if record.percent.as_deref().is_none_or(|p| p == "0%") {
        return Err(SkipReason::NoAlcohol {
            stockcode: record.stockcode,
        });
    }

    Ok(record)
}

/// Writes one detail into the matching record field, replacing any earlier
/// value. Unrecognised names are ignored.
fn apply_detail(record: &mut FlatRecord, detail: &AdditionalDetail) {
    let slot = match detail.name.to_ascii_lowercase().as_str() {
        "producttitle" => &mut record.name,
        "webbrandname" => &mut record.brand,
        "webliquorsize" => &mut record.size,
        "webalcoholpercentage" => &mut record.percent,
        "standarddrinks" => &mut record.standard_drinks,
        "image1" => &mut record.image_url,
        "webaverageproductrating" => &mut record.rating,
        "webibu" => &mut record.ibu,
        "webbeerstyle" => &mut record.beer_style,
        "innerpacksize" => &mut record.pack_size,
        "casesize" => &mut record.case_size,
        _ => return,
    };
    *slot = detail_text(&detail.value);
}

/// Coerces a detail value to text with embedded `"` removed. `null` and
/// blank values count as absent.
fn detail_text(value: &serde_json::Value) -> Option<String> {
    let text = match value {
        serde_json::Value::Null => return None,
        serde_json::Value::String(s) => s.replace('"', ""),
        other => other.to_string().replace('"', ""),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
