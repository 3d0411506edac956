//! Order pricing: the discount rule and the total it produces.
//!
//! The rule is evaluated once per order over all of its line items. All
//! arithmetic stays in [`BigDecimal`] and nothing is rounded, so the same
//! items always produce the same total.

use bigdecimal::BigDecimal;

use super::order::OrderItem;

/// An order with at least this many units in total is discounted.
pub const DISCOUNT_MIN_UNITS: i64 = 4;

/// An order whose extended subtotal reaches this amount is discounted.
pub fn discount_min_subtotal() -> BigDecimal {
    BigDecimal::from(25)
}

/// Multiplier for a discounted order (10% off).
pub fn discounted_multiplier() -> BigDecimal {
    BigDecimal::new(9.into(), 1)
}

/// Multiplier for an order without discount.
pub fn full_price_multiplier() -> BigDecimal {
    BigDecimal::from(1)
}

/// Outcome of the discount rule for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountDecision {
    /// Sum of `quantity * price` across every item, unrounded.
    pub extended_subtotal: BigDecimal,
    pub total_units: i64,
    pub multiplier: BigDecimal,
}

impl DiscountDecision {
    pub fn applies(&self) -> bool {
        self.multiplier != full_price_multiplier()
    }
}

/// Final figures for a priced order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pricing {
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub total: BigDecimal,
}

/// Decide whether the order as a whole qualifies for the discount.
///
/// Both thresholds are inclusive: 4 units or a subtotal of exactly 25
/// qualifies.
pub fn evaluate_discount(items: &[OrderItem]) -> DiscountDecision {
    let mut extended_subtotal = BigDecimal::from(0);
    let mut total_units: i64 = 0;

    for item in items {
        extended_subtotal += &item.product.price * BigDecimal::from(item.quantity);
        total_units += i64::from(item.quantity);
    }

    let qualifies =
        total_units >= DISCOUNT_MIN_UNITS || extended_subtotal >= discount_min_subtotal();
    let multiplier = if qualifies {
        discounted_multiplier()
    } else {
        full_price_multiplier()
    };

    log::debug!(
        "discount evaluated: subtotal={} units={} multiplier={}",
        extended_subtotal,
        total_units,
        multiplier
    );

    DiscountDecision {
        extended_subtotal,
        total_units,
        multiplier,
    }
}

/// Apply a discount decision. `total = subtotal * multiplier`, exact.
pub fn apply_discount(decision: &DiscountDecision) -> Pricing {
    let total = &decision.extended_subtotal * &decision.multiplier;
    let discount = &decision.extended_subtotal - &total;
    Pricing {
        subtotal: decision.extended_subtotal.clone(),
        discount,
        total,
    }
}

/// Evaluate the discount rule and price the items in one step.
pub fn price_items(items: &[OrderItem]) -> Pricing {
    apply_discount(&evaluate_discount(items))
}
