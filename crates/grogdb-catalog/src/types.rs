//! Raw retailer catalogue types, as exported by the product search API.
//!
//! ## Observed shape
//!
//! ### Envelope
//! Each catalogue entry wraps a `Products` array. The first product carries
//! the stockcode and prices; further products (bundle members, alternate
//! listings) only contribute `AdditionalDetails`.
//!
//! ### `Prices`
//! An object keyed by tier name. Observed keys: `caseprice`, `inanysixprice`
//! (per-bottle price when buying any six), `singleprice`, `promoprice`.
//! Any tier may be missing, and every field inside a tier may be `null`.
//! `AfterPromotion` is often `0` rather than `null` when no promotion runs.
//!
//! ### `AdditionalDetails`
//! A flat list of `{ "Name": ..., "Value": ... }` pairs. `Value` is usually a
//! string but numbers and booleans appear, and strings sometimes carry
//! embedded quote characters (`"6\"`). We keep the raw JSON value and
//! coerce during extraction.

use serde::{Deserialize, Deserializer};

/// One entry of the raw catalogue export.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawProduct {
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<CatalogueProduct>,
}

/// A product listing inside a [`RawProduct`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogueProduct {
    /// Retailer identifier, e.g. `"912345"`. `ER`-prefixed codes are
    /// online-only listings.
    #[serde(default)]
    pub stockcode: Option<String>,

    /// Absent or `null` on delisted products.
    #[serde(default)]
    pub prices: Option<RawPrices>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_details: Vec<AdditionalDetail>,
}

/// Price tiers of a product. Unknown tier keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPrices {
    #[serde(default, rename = "caseprice")]
    pub case: Option<RawPriceTier>,

    #[serde(default, rename = "inanysixprice")]
    pub pack: Option<RawPriceTier>,

    #[serde(default, rename = "singleprice")]
    pub single: Option<RawPriceTier>,

    #[serde(default, rename = "promoprice")]
    pub promo: Option<RawPriceTier>,
}

/// A single price tier: label text, list price and promotional price.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawPriceTier {
    /// Free-text label, e.g. `"Case of 24"`, `"each in any six"`,
    /// `"2 cases for $90"`.
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub value: Option<f64>,

    #[serde(default)]
    pub after_promotion: Option<f64>,
}

/// A `Name`/`Value` attribute pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdditionalDetail {
    pub name: String,

    #[serde(default)]
    pub value: serde_json::Value,
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_entry() {
        let raw: RawProduct = serde_json::from_value(serde_json::json!({
            "Products": [{
                "Stockcode": "912345",
                "Prices": {
                    "caseprice": {"Message": "Case of 24", "Value": 62.4, "AfterPromotion": 0},
                    "promoprice": {"Message": null, "Value": null, "AfterPromotion": null},
                    "memberprice": {"Message": "ignored"}
                },
                "AdditionalDetails": [
                    {"Name": "producttitle", "Value": "Coopers Pale Ale 375mL"},
                    {"Name": "standarddrinks", "Value": 1.4}
                ]
            }]
        }))
        .unwrap();

        let product = &raw.products[0];
        assert_eq!(product.stockcode.as_deref(), Some("912345"));
        let prices = product.prices.as_ref().unwrap();
        let case = prices.case.as_ref().unwrap();
        assert_eq!(case.message.as_deref(), Some("Case of 24"));
        assert_eq!(case.value, Some(62.4));
        assert_eq!(case.after_promotion, Some(0.0));
        assert!(prices.pack.is_none());
        assert_eq!(product.additional_details.len(), 2);
    }

    #[test]
    fn missing_products_defaults_to_empty() {
        let raw: RawProduct = serde_json::from_str("{}").unwrap();
        assert!(raw.products.is_empty());
    }

    #[test]
    fn null_products_defaults_to_empty() {
        let raw: RawProduct = serde_json::from_str(r#"{"Products": null}"#).unwrap();
        assert!(raw.products.is_empty());
    }

    #[test]
    fn detail_without_value_is_null() {
        let detail: AdditionalDetail =
            serde_json::from_str(r#"{"Name": "webibu"}"#).unwrap();
        assert!(detail.value.is_null());
    }
}
