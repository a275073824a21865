use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockdoc_core::DocumentId;

/// Kind of inventory document.
///
/// The type decides both the stock effect of a line item and which unit price
/// feeds the document totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Goods received into the warehouse; increments stock.
    GoodsReceivedNote,
    /// Goods issued out of the warehouse; decrements stock.
    StockIssueConfirmation,
    /// Invoice issued to a customer; no stock effect.
    SalesInvoice,
    /// Invoice received from a supplier; no stock effect.
    PurchaseInvoice,
}

impl DocumentType {
    /// Sales-classified documents total at selling price; all others total
    /// at purchase price.
    pub fn is_sales_classified(self) -> bool {
        matches!(
            self,
            DocumentType::SalesInvoice | DocumentType::StockIssueConfirmation
        )
    }
}

/// Inventory document record.
///
/// Line items are stored separately, keyed by `document_id`; the document
/// carries only the cached totals, recomputed on every line-item addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub document_type: DocumentType,
    pub issue_date: NaiveDate,
    /// Once accepted, a document is frozen: no further line items.
    pub accepted: bool,
    pub total_net: Decimal,
    pub total_gross: Decimal,
}

impl Document {
    /// Create an open document with zero totals.
    pub fn new(id: DocumentId, document_type: DocumentType, issue_date: NaiveDate) -> Self {
        Self {
            id,
            document_type,
            issue_date,
            accepted: false,
            total_net: Decimal::ZERO,
            total_gross: Decimal::ZERO,
        }
    }

    pub fn apply_totals(&mut self, totals: DocumentTotals) {
        self.total_net = totals.net;
        self.total_gross = totals.gross;
    }
}

/// Per-line input to the totals computation: the line's quantity, its
/// locked-in price snapshot, and the product's VAT rate (a percentage).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalsLine {
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub selling_price: Decimal,
    pub vat_rate: Decimal,
}

/// Recomputed document totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentTotals {
    pub net: Decimal,
    pub gross: Decimal,
}

/// Compute net/gross totals over a document's full line-item set.
///
/// Sales-classified documents accumulate at selling price, others at
/// purchase price; gross adds VAT per unit. Quantities are truncated to
/// whole units: a fractional remainder contributes nothing to the totals.
pub fn compute_totals(document_type: DocumentType, lines: &[TotalsLine]) -> DocumentTotals {
    let mut totals = DocumentTotals::default();
    for line in lines {
        let units = line.quantity.trunc();
        let unit_net = if document_type.is_sales_classified() {
            line.selling_price
        } else {
            line.purchase_price
        };
        let unit_gross = unit_net + unit_net * line.vat_rate / Decimal::ONE_HUNDRED;
        totals.net += units * unit_net;
        totals.gross += units * unit_gross;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(quantity: Decimal) -> TotalsLine {
        TotalsLine {
            quantity,
            purchase_price: dec!(10),
            selling_price: dec!(20),
            vat_rate: dec!(10),
        }
    }

    #[test]
    fn sales_invoice_totals_use_selling_price_plus_vat() {
        // quantity 3, selling 20, VAT 10% => net 60, gross 3 * 22 = 66
        let totals = compute_totals(DocumentType::SalesInvoice, &[line(dec!(3))]);
        assert_eq!(totals.net, dec!(60));
        assert_eq!(totals.gross, dec!(66));
    }

    #[test]
    fn purchase_documents_total_at_purchase_price() {
        let totals = compute_totals(DocumentType::GoodsReceivedNote, &[line(dec!(3))]);
        assert_eq!(totals.net, dec!(30));
        assert_eq!(totals.gross, dec!(33));
    }

    #[test]
    fn stock_issue_is_sales_classified() {
        assert!(DocumentType::StockIssueConfirmation.is_sales_classified());
        assert!(DocumentType::SalesInvoice.is_sales_classified());
        assert!(!DocumentType::GoodsReceivedNote.is_sales_classified());
        assert!(!DocumentType::PurchaseInvoice.is_sales_classified());
    }

    #[test]
    fn fractional_quantity_is_truncated() {
        // 2.9 units count as 2; the remainder is discarded, not prorated.
        let totals = compute_totals(DocumentType::SalesInvoice, &[line(dec!(2.9))]);
        assert_eq!(totals.net, dec!(40));
        assert_eq!(totals.gross, dec!(44));
    }

    #[test]
    fn sub_unit_quantity_contributes_nothing() {
        let totals = compute_totals(DocumentType::SalesInvoice, &[line(dec!(0.75))]);
        assert_eq!(totals.net, Decimal::ZERO);
        assert_eq!(totals.gross, Decimal::ZERO);
    }

    #[test]
    fn empty_document_has_zero_totals() {
        let totals = compute_totals(DocumentType::SalesInvoice, &[]);
        assert_eq!(totals, DocumentTotals::default());
    }

    #[test]
    fn totals_accumulate_across_lines() {
        let totals = compute_totals(DocumentType::SalesInvoice, &[line(dec!(1)), line(dec!(2))]);
        assert_eq!(totals.net, dec!(60));
        assert_eq!(totals.gross, dec!(66));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: totals match trunc(quantity) * unit price arithmetic
            /// for a single line, for any whole-cent prices and VAT rate.
            #[test]
            fn single_line_totals_are_trunc_times_unit(
                quantity_cents in 0i64..1_000_000,
                selling_cents in 0i64..1_000_000,
                vat_percent in 0i64..100,
            ) {
                let quantity = Decimal::new(quantity_cents, 2);
                let selling = Decimal::new(selling_cents, 2);
                let vat = Decimal::from(vat_percent);
                let totals = compute_totals(
                    DocumentType::SalesInvoice,
                    &[TotalsLine {
                        quantity,
                        purchase_price: Decimal::ZERO,
                        selling_price: selling,
                        vat_rate: vat,
                    }],
                );

                let units = quantity.trunc();
                prop_assert_eq!(totals.net, units * selling);
                prop_assert_eq!(
                    totals.gross,
                    units * (selling + selling * vat / Decimal::ONE_HUNDRED)
                );
            }

            /// Property: gross is never below net (VAT rates are non-negative).
            #[test]
            fn gross_dominates_net(
                quantity_cents in 0i64..1_000_000,
                purchase_cents in 0i64..1_000_000,
                vat_percent in 0i64..100,
            ) {
                let totals = compute_totals(
                    DocumentType::PurchaseInvoice,
                    &[TotalsLine {
                        quantity: Decimal::new(quantity_cents, 2),
                        purchase_price: Decimal::new(purchase_cents, 2),
                        selling_price: Decimal::ZERO,
                        vat_rate: Decimal::from(vat_percent),
                    }],
                );
                prop_assert!(totals.gross >= totals.net);
            }
        }
    }
}
