//! Excise allocation per standard drink.
//!
//! Duty is charged per litre of pure alcohol above a duty-free threshold,
//! at a lower rate for low-strength products. The total for one container
//! is spread over its standard drinks so it can be compared with the cost
//! per standard drink of every price tier.

use crate::parse::round_to;

/// Excise rates applied to a product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExciseSchedule {
    /// Alcohol fraction that is never taxed.
    pub duty_free_fraction: f64,
    /// Highest alcohol fraction charged at `low_strength_rate`.
    pub low_strength_ceiling: f64,
    /// Dollars per litre of alcohol.
    pub low_strength_rate: f64,
    /// Dollars per litre of alcohol.
    pub full_strength_rate: f64,
}

impl ExciseSchedule {
    /// Australian beer excise (packaged beer).
    pub const AUSTRALIA: Self = Self {
        duty_free_fraction: 0.0115,
        low_strength_ceiling: 0.03,
        low_strength_rate: 52.66,
        full_strength_rate: 61.32,
    };

    #[must_use]
    pub fn rate_for(&self, alcohol_fraction: f64) -> f64 {
        if alcohol_fraction <= self.low_strength_ceiling {
            self.low_strength_rate
        } else {
            self.full_strength_rate
        }
    }

    /// Excise per standard drink, rounded to the cent.
    ///
    /// Returns `0.0` when the standard-drink count is absent or not positive.
    /// A missing strength or volume taxes nothing.
    #[must_use]
    pub fn tax_per_standard_drink(
        &self,
        percentage: Option<f64>,
        size_ml: Option<f64>,
        standard_drinks: Option<f64>,
    ) -> f64 {
        let Some(standard_drinks) = standard_drinks.filter(|sd| *sd > 0.0) else {
            return 0.0;
        };
        let alcohol_fraction = percentage.unwrap_or(0.0) / 100.0;
        let taxable_fraction = (alcohol_fraction - self.duty_free_fraction).max(0.0);
        let taxable_litres = size_ml.unwrap_or(0.0) / 1000.0 * taxable_fraction;
        let total_tax = taxable_litres * self.rate_for(alcohol_fraction);
        round_to(total_tax / standard_drinks, 2)
    }
}

impl Default for ExciseSchedule {
    fn default() -> Self {
        Self::AUSTRALIA
    }
}
