use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use stockdoc_core::{DocumentId, LineItemId, PriceRecordId, ProductId};
use stockdoc_domain::{Document, LineItem, PriceRecord, Product};

use super::{
    DocumentStore, LineItemStore, PriceRecordStore, ProductStore, StoreError, Transaction,
    TransactionManager,
};

#[derive(Debug, Clone, Default)]
struct State {
    documents: HashMap<DocumentId, Document>,
    products: HashMap<ProductId, Product>,
    /// Append-only; insertion order doubles as introduction order.
    price_records: Vec<PriceRecord>,
    /// Insertion order preserved for `line_items` / `line_items_for_document`.
    line_items: Vec<LineItem>,
}

/// In-memory store backend.
///
/// Intended for tests/dev. Not optimized for performance.
///
/// A transaction holds the state lock for its whole lifetime and works on a
/// cloned copy of the state; commit swaps the copy back under the still-held
/// guard. This gives serializable isolation (transactions never interleave)
/// and drop-is-rollback semantics.
#[derive(Debug, Default)]
pub struct InMemoryStores {
    state: Mutex<State>,
}

impl InMemoryStores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document outside any transaction.
    pub fn insert_document(&self, document: Document) {
        if let Ok(mut state) = self.state.lock() {
            state.documents.insert(document.id, document);
        }
    }

    /// Seed a product outside any transaction.
    pub fn insert_product(&self, product: Product) {
        if let Ok(mut state) = self.state.lock() {
            state.products.insert(product.id, product);
        }
    }

    /// Seed a price record outside any transaction.
    pub fn insert_price_record(&self, record: PriceRecord) {
        if let Ok(mut state) = self.state.lock() {
            state.price_records.push(record);
        }
    }

    /// Read a document's committed state.
    pub fn document(&self, id: DocumentId) -> Option<Document> {
        let state = self.state.lock().ok()?;
        state.documents.get(&id).cloned()
    }

    /// Read a product's committed state.
    pub fn product(&self, id: ProductId) -> Option<Product> {
        let state = self.state.lock().ok()?;
        state.products.get(&id).cloned()
    }

    /// Number of committed line items.
    pub fn line_item_count(&self) -> usize {
        self.state.lock().map(|state| state.line_items.len()).unwrap_or(0)
    }
}

/// A transaction over the in-memory backend.
pub struct InMemoryTx<'a> {
    guard: MutexGuard<'a, State>,
    working: State,
}

impl TransactionManager for InMemoryStores {
    type Tx<'a>
        = InMemoryTx<'a>
    where
        Self: 'a;

    fn begin(&self) -> Result<InMemoryTx<'_>, StoreError> {
        let guard = self
            .state
            .lock()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        let working = guard.clone();
        Ok(InMemoryTx { guard, working })
    }
}

impl DocumentStore for InMemoryTx<'_> {
    fn document(&self, id: DocumentId) -> Result<Document, StoreError> {
        self.working
            .documents
            .get(&id)
            .cloned()
            .ok_or(StoreError::MissingDocument(id))
    }

    fn save_document(&mut self, document: &Document) -> Result<(), StoreError> {
        self.working.documents.insert(document.id, document.clone());
        Ok(())
    }
}

impl ProductStore for InMemoryTx<'_> {
    fn product(&self, id: ProductId) -> Result<Product, StoreError> {
        self.working
            .products
            .get(&id)
            .cloned()
            .ok_or(StoreError::MissingProduct(id))
    }

    fn save_product(&mut self, product: &Product) -> Result<(), StoreError> {
        self.working.products.insert(product.id, product.clone());
        Ok(())
    }
}

impl PriceRecordStore for InMemoryTx<'_> {
    fn price_record(&self, id: PriceRecordId) -> Result<PriceRecord, StoreError> {
        self.working
            .price_records
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(StoreError::MissingPriceRecord(id))
    }

    fn price_records_for(&self, product_id: ProductId) -> Result<Vec<PriceRecord>, StoreError> {
        Ok(self
            .working
            .price_records
            .iter()
            .filter(|record| record.product_id == product_id)
            .cloned()
            .collect())
    }
}

impl LineItemStore for InMemoryTx<'_> {
    fn save_line_item(&mut self, item: &LineItem) -> Result<(), StoreError> {
        if let Some(existing) = self.working.line_items.iter_mut().find(|li| li.id == item.id) {
            *existing = item.clone();
        } else {
            self.working.line_items.push(item.clone());
        }
        Ok(())
    }

    fn line_item(&self, id: LineItemId) -> Result<Option<LineItem>, StoreError> {
        Ok(self
            .working
            .line_items
            .iter()
            .find(|item| item.id == id)
            .cloned())
    }

    fn line_items(&self) -> Result<Vec<LineItem>, StoreError> {
        Ok(self.working.line_items.clone())
    }

    fn line_items_for_document(
        &self,
        document_id: DocumentId,
    ) -> Result<Vec<LineItem>, StoreError> {
        Ok(self
            .working
            .line_items
            .iter()
            .filter(|item| item.document_id == document_id)
            .cloned()
            .collect())
    }

    fn delete_line_item(&mut self, id: LineItemId) -> Result<(), StoreError> {
        self.working.line_items.retain(|item| item.id != id);
        Ok(())
    }
}

impl Transaction for InMemoryTx<'_> {
    fn commit(self) -> Result<(), StoreError> {
        let InMemoryTx { mut guard, working } = self;
        *guard = working;
        Ok(())
    }
}
