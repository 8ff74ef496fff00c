//! Price rules applied when a SKU price is updated from the console.
//!
//! The console only asks for a base price (and optionally a list price);
//! the rest of the VTEX price record is derived here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Markup percentage recorded with every price update.
pub const DEFAULT_MARKUP: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Cost ratio applied to the base price (70%).
const COST_RATIO: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// A complete price record for one SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePlan {
    pub base_price: Decimal,
    pub list_price: Decimal,
    pub cost_price: Decimal,
    pub markup: Decimal,
}

impl PricePlan {
    /// Derive a price record from a base price.
    ///
    /// The list price defaults to the base price; a zero list price is
    /// treated as absent. Cost is 70% of base and markup is fixed at 30.
    #[must_use]
    pub fn from_base(base_price: Decimal, list_price: Option<Decimal>) -> Self {
        let list_price = list_price
            .filter(|price| !price.is_zero())
            .unwrap_or(base_price);
        Self {
            base_price,
            list_price,
            cost_price: base_price * COST_RATIO,
            markup: DEFAULT_MARKUP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_price_defaults_to_base() {
        let plan = PricePlan::from_base(Decimal::new(10000, 2), None);
        assert_eq!(plan.list_price, Decimal::new(10000, 2));
    }

    #[test]
    fn test_zero_list_price_is_ignored() {
        let plan = PricePlan::from_base(Decimal::from(50), Some(Decimal::ZERO));
        assert_eq!(plan.list_price, Decimal::from(50));
    }

    #[test]
    fn test_explicit_list_price() {
        let plan = PricePlan::from_base(Decimal::from(80), Some(Decimal::from(100)));
        assert_eq!(plan.list_price, Decimal::from(100));
    }

    #[test]
    fn test_cost_and_markup() {
        let plan = PricePlan::from_base(Decimal::from(100), None);
        assert_eq!(plan.cost_price, Decimal::from(70));
        assert_eq!(plan.markup, Decimal::from(30));
    }
}
