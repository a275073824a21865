use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockdoc_core::{DocumentId, LineItemId, PriceRecordId, ProductId};

/// One row on an inventory document.
///
/// `price_record_id` is the price snapshot locked in when the line was
/// created; it never changes, even when newer prices are introduced later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub document_id: DocumentId,
    pub product_id: ProductId,
    pub price_record_id: PriceRecordId,
    pub quantity: Decimal,
}

/// Request shape for adding a line item to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    pub document_id: DocumentId,
    pub product_id: ProductId,
    pub quantity: Decimal,
}
