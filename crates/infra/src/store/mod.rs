//! Collaborator store interfaces and the scoped transaction abstraction.
//!
//! The engine never talks to a backend directly: it begins a [`Transaction`]
//! from a [`TransactionManager`], performs every read and staged write
//! through it, and commits only on successful return. Dropping a transaction
//! without committing discards all staged writes.

pub mod in_memory;

use thiserror::Error;

use stockdoc_core::{DocumentId, LineItemId, PriceRecordId, ProductId};
use stockdoc_domain::{Document, LineItem, PriceRecord, Product};

/// Storage-level failure.
///
/// The `Missing*` variants are data-integrity errors: the caller referenced
/// an entity that must exist. They are fatal and non-retryable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("document {0} not found")]
    MissingDocument(DocumentId),

    #[error("product {0} not found")]
    MissingProduct(ProductId),

    #[error("price record {0} not found")]
    MissingPriceRecord(PriceRecordId),

    /// Backend failure (e.g. poisoned lock).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Document store.
pub trait DocumentStore {
    /// Load a document. Absence is a data-integrity failure, not an `Option`.
    fn document(&self, id: DocumentId) -> Result<Document, StoreError>;

    fn save_document(&mut self, document: &Document) -> Result<(), StoreError>;
}

/// Product store.
pub trait ProductStore {
    /// Load a product. Absence is a data-integrity failure, not an `Option`.
    fn product(&self, id: ProductId) -> Result<Product, StoreError>;

    fn save_product(&mut self, product: &Product) -> Result<(), StoreError>;
}

/// Price history store. Records are append-only and immutable once written.
pub trait PriceRecordStore {
    /// Resolve a line item's locked-in price snapshot by id.
    fn price_record(&self, id: PriceRecordId) -> Result<PriceRecord, StoreError>;

    /// All price records for a product, in introduction order.
    fn price_records_for(&self, product_id: ProductId) -> Result<Vec<PriceRecord>, StoreError>;
}

/// Line item store.
pub trait LineItemStore {
    fn save_line_item(&mut self, item: &LineItem) -> Result<(), StoreError>;

    fn line_item(&self, id: LineItemId) -> Result<Option<LineItem>, StoreError>;

    fn line_items(&self) -> Result<Vec<LineItem>, StoreError>;

    /// A document's line items, in insertion order.
    fn line_items_for_document(
        &self,
        document_id: DocumentId,
    ) -> Result<Vec<LineItem>, StoreError>;

    /// Delete by id; deleting an absent item is a no-op.
    fn delete_line_item(&mut self, id: LineItemId) -> Result<(), StoreError>;
}

/// A scoped transaction over all four stores.
///
/// Writes are staged inside the transaction and become visible to other
/// transactions only after [`Transaction::commit`]. Dropping the value rolls
/// everything back; there is no partial-commit state.
pub trait Transaction:
    DocumentStore + ProductStore + PriceRecordStore + LineItemStore + Sized
{
    /// Publish all staged writes atomically.
    fn commit(self) -> Result<(), StoreError>;
}

/// Produces scoped transactions.
pub trait TransactionManager {
    type Tx<'a>: Transaction
    where
        Self: 'a;

    /// Begin a transaction. Transactions touching the same backend must not
    /// interleave lost updates on products or document totals.
    fn begin(&self) -> Result<Self::Tx<'_>, StoreError>;
}

impl<M> TransactionManager for std::sync::Arc<M>
where
    M: TransactionManager + ?Sized,
{
    type Tx<'a>
        = M::Tx<'a>
    where
        Self: 'a;

    fn begin(&self) -> Result<Self::Tx<'_>, StoreError> {
        (**self).begin()
    }
}
