use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockdoc_core::{PriceRecordId, ProductId};

/// Historical price snapshot for a product.
///
/// Records are append-only: a price is valid from its introduction date
/// until superseded by a newer record, and is never edited in place. Line
/// items keep a reference to the record that was in effect when they were
/// created, so later price changes never alter existing documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub id: PriceRecordId,
    pub product_id: ProductId,
    pub purchase_price: Decimal,
    pub selling_price: Decimal,
    pub introduction_date: NaiveDate,
}

/// Select the price in effect on a document's issue date.
///
/// Among records introduced strictly before `issue_date`, returns the one
/// with the latest introduction date. Returns `None` when no record
/// qualifies — including a record introduced exactly on the issue date —
/// and callers must treat that as a hard failure rather than fall back to
/// an arbitrary record.
pub fn applicable_price(records: &[PriceRecord], issue_date: NaiveDate) -> Option<&PriceRecord> {
    records
        .iter()
        .filter(|record| record.introduction_date < issue_date)
        .max_by_key(|record| record.introduction_date)
}
