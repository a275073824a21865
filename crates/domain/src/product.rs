use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockdoc_core::ProductId;

/// Requested issue quantity exceeds what is on stock.
///
/// Carries the quantity currently available so callers can report it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("not enough product on stock: {available} available")]
pub struct InsufficientStock {
    pub available: Decimal,
}

/// Product record with its current quantity-on-hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Quantity on hand; never negative.
    pub quantity: Decimal,
    /// Non-salable products cannot appear on sales invoices.
    pub salable: bool,
    /// VAT rate as a percentage (e.g. `23` for 23%).
    pub vat_rate: Decimal,
}

impl Product {
    /// Add received goods to stock.
    pub fn receive(&mut self, quantity: Decimal) {
        self.quantity += quantity;
    }

    /// Remove issued goods from stock.
    ///
    /// Fails without mutating when the requested quantity exceeds what is on
    /// hand; issuing exactly the full stock is allowed.
    pub fn issue(&mut self, quantity: Decimal) -> Result<(), InsufficientStock> {
        if quantity > self.quantity {
            return Err(InsufficientStock {
                available: self.quantity,
            });
        }
        self.quantity -= quantity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_product(quantity: Decimal) -> Product {
        Product {
            id: ProductId::new(),
            name: "Bolt M8".to_string(),
            quantity,
            salable: true,
            vat_rate: dec!(23),
        }
    }

    #[test]
    fn receive_adds_to_stock() {
        let mut product = test_product(dec!(10));
        product.receive(dec!(2.5));
        assert_eq!(product.quantity, dec!(12.5));
    }

    #[test]
    fn issue_subtracts_from_stock() {
        let mut product = test_product(dec!(10));
        product.issue(dec!(4)).unwrap();
        assert_eq!(product.quantity, dec!(6));
    }

    #[test]
    fn issue_of_full_stock_is_allowed() {
        let mut product = test_product(dec!(10));
        product.issue(dec!(10)).unwrap();
        assert_eq!(product.quantity, Decimal::ZERO);
    }

    #[test]
    fn over_issue_is_rejected_and_reports_available() {
        let mut product = test_product(dec!(3));
        let err = product.issue(dec!(3.01)).unwrap_err();
        assert_eq!(err.available, dec!(3));
        // Stock untouched on rejection.
        assert_eq!(product.quantity, dec!(3));
    }
}
