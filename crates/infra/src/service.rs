//! Document line-item transaction engine.
//!
//! One cohesive transactional procedure: validate, select the historical
//! price, persist the line item, mutate product stock by document type, and
//! recompute the owning document's totals — all inside a single scoped
//! transaction that commits only on successful return.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument, warn};

use stockdoc_core::{DocumentId, LineItemId, ProductId};
use stockdoc_domain::{
    applicable_price, compute_totals, DocumentType, LineItem, NewLineItem, TotalsLine,
};

use crate::store::{
    DocumentStore, LineItemStore, PriceRecordStore, ProductStore, StoreError, Transaction,
    TransactionManager,
};

/// Failure of a line-item operation.
///
/// Business-rule violations carry the offending id/quantity; store errors
/// (missing document/product/price record, backend failure) pass through as
/// fatal, non-retryable failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineItemError {
    #[error("document {0} is already accepted")]
    DocumentAlreadyAccepted(DocumentId),

    #[error("product {0} is not salable")]
    ProductIsNotSalable(ProductId),

    #[error("not enough product on stock: {available} available")]
    NotEnoughProductOnStock { available: Decimal },

    /// No price record was in effect before the document's issue date.
    #[error("no price applicable for product {product_id} on {issue_date}")]
    NoApplicablePrice {
        product_id: ProductId,
        issue_date: NaiveDate,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Line-item service over a transactional store backend.
#[derive(Debug)]
pub struct LineItemService<M> {
    stores: M,
}

impl<M> LineItemService<M>
where
    M: TransactionManager,
{
    pub fn new(stores: M) -> Self {
        Self { stores }
    }

    /// Add a line item to a document.
    ///
    /// Runs as one transaction; any early error return drops the transaction
    /// and rolls back every staged write, including the line item itself.
    #[instrument(skip(self), fields(document_id = %request.document_id, product_id = %request.product_id))]
    pub fn add(&self, request: NewLineItem) -> Result<LineItem, LineItemError> {
        let mut tx = self.stores.begin()?;

        let mut document = tx.document(request.document_id)?;
        if document.accepted {
            warn!("rejected: document already accepted");
            return Err(LineItemError::DocumentAlreadyAccepted(document.id));
        }

        let prices = tx.price_records_for(request.product_id)?;
        let price = applicable_price(&prices, document.issue_date).ok_or_else(|| {
            warn!(issue_date = %document.issue_date, "rejected: no applicable price record");
            LineItemError::NoApplicablePrice {
                product_id: request.product_id,
                issue_date: document.issue_date,
            }
        })?;

        let mut product = tx.product(request.product_id)?;
        if !product.salable && document.document_type == DocumentType::SalesInvoice {
            warn!("rejected: product is not salable");
            return Err(LineItemError::ProductIsNotSalable(product.id));
        }

        let line_item = LineItem {
            id: LineItemId::new(),
            document_id: document.id,
            product_id: product.id,
            price_record_id: price.id,
            quantity: request.quantity,
        };
        tx.save_line_item(&line_item)?;

        match document.document_type {
            DocumentType::GoodsReceivedNote => {
                product.receive(request.quantity);
                tx.save_product(&product)?;
            }
            DocumentType::StockIssueConfirmation => {
                product.issue(request.quantity).map_err(|shortage| {
                    warn!(available = %shortage.available, "rejected: not enough product on stock");
                    LineItemError::NotEnoughProductOnStock {
                        available: shortage.available,
                    }
                })?;
                tx.save_product(&product)?;
            }
            _ => {}
        }

        let lines = tx.line_items_for_document(document.id)?;
        let mut totals_lines = Vec::with_capacity(lines.len());
        for line in &lines {
            let record = tx.price_record(line.price_record_id)?;
            let line_product = tx.product(line.product_id)?;
            totals_lines.push(TotalsLine {
                quantity: line.quantity,
                purchase_price: record.purchase_price,
                selling_price: record.selling_price,
                vat_rate: line_product.vat_rate,
            });
        }
        document.apply_totals(compute_totals(document.document_type, &totals_lines));
        tx.save_document(&document)?;

        tx.commit()?;
        info!(
            line_item_id = %line_item.id,
            total_net = %document.total_net,
            total_gross = %document.total_gross,
            "line item added"
        );
        Ok(line_item)
    }

    /// All line items across all documents.
    pub fn find_all(&self) -> Result<Vec<LineItem>, LineItemError> {
        let tx = self.stores.begin()?;
        Ok(tx.line_items()?)
    }

    pub fn find_by_id(&self, id: LineItemId) -> Result<Option<LineItem>, LineItemError> {
        let tx = self.stores.begin()?;
        Ok(tx.line_item(id)?)
    }

    /// Delete a line item by id. Deleting an absent item is a no-op.
    pub fn delete_by_id(&self, id: LineItemId) -> Result<(), LineItemError> {
        let mut tx = self.stores.begin()?;
        tx.delete_line_item(id)?;
        tx.commit()?;
        Ok(())
    }
}
