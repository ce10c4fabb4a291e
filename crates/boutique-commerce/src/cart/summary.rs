//! Order summary: subtotal plus shipping and tax.

use crate::config::PricingConfig;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Totals shown on the cart page and at checkout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Flat shipping, or zero above the free-shipping threshold.
    pub shipping: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// subtotal + shipping + tax.
    pub total: Money,
    /// Subtotal that must be exceeded for free shipping.
    pub free_shipping_threshold: Money,
}

impl OrderSummary {
    /// Compute shipping, tax and total for a subtotal.
    pub fn from_subtotal(subtotal: Money, pricing: &PricingConfig) -> Self {
        let currency = subtotal.currency;
        let threshold = pricing.free_shipping_threshold(currency);

        let shipping = if subtotal.amount_cents > threshold.amount_cents {
            Money::zero(currency)
        } else {
            pricing.flat_shipping(currency)
        };
        let tax = subtotal.apply_rate(pricing.tax_rate);
        let total = Money::new(
            subtotal
                .amount_cents
                .saturating_add(shipping.amount_cents)
                .saturating_add(tax.amount_cents),
            currency,
        );

        Self {
            subtotal,
            shipping,
            tax,
            total,
            free_shipping_threshold: threshold,
        }
    }

    /// Check if shipping is waived.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// How much more to spend before shipping is waived; zero once it is.
    ///
    /// A subtotal exactly at the threshold still pays shipping, so the
    /// answer there is the smallest unit.
    pub fn amount_until_free_shipping(&self) -> Money {
        if self.has_free_shipping() {
            return Money::zero(self.subtotal.currency);
        }
        let gap = self
            .free_shipping_threshold
            .amount_cents
            .saturating_sub(self.subtotal.amount_cents);
        Money::new(gap.max(1), self.subtotal.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn usd(amount: f64) -> Money {
        Money::from_decimal(amount, Currency::USD)
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let summary = OrderSummary::from_subtotal(usd(300.0), &PricingConfig::default());
        assert!(summary.has_free_shipping());
        assert_eq!(summary.tax, usd(24.0));
        assert_eq!(summary.total, usd(324.0));
        assert!(summary.amount_until_free_shipping().is_zero());
    }

    #[test]
    fn test_flat_shipping_below_threshold() {
        let summary = OrderSummary::from_subtotal(usd(100.0), &PricingConfig::default());
        assert_eq!(summary.shipping, usd(15.0));
        assert_eq!(summary.tax, usd(8.0));
        assert_eq!(summary.total, usd(123.0));
        assert_eq!(summary.amount_until_free_shipping(), usd(150.0));
    }

    #[test]
    fn test_threshold_itself_still_pays_shipping() {
        let summary = OrderSummary::from_subtotal(usd(250.0), &PricingConfig::default());
        assert_eq!(summary.shipping, usd(15.0));
        assert_eq!(summary.amount_until_free_shipping(), usd(0.01));

        let above = OrderSummary::from_subtotal(usd(250.01), &PricingConfig::default());
        assert!(above.has_free_shipping());
        assert!(above.amount_until_free_shipping().is_zero());
    }

    #[test]
    fn test_custom_pricing() {
        let pricing = PricingConfig {
            free_shipping_threshold: 50.0,
            flat_shipping: 4.99,
            tax_rate: 0.2,
        };
        let summary = OrderSummary::from_subtotal(usd(40.0), &pricing);
        assert_eq!(summary.shipping, usd(4.99));
        assert_eq!(summary.tax, usd(8.0));
        assert_eq!(summary.total, usd(52.99));
    }
}
