//! Inventory document domain module.
//!
//! This crate contains the business rules for inventory documents, products,
//! price history, and line items, implemented purely as deterministic domain
//! logic (no IO, no HTTP, no storage).

pub mod document;
pub mod line_item;
pub mod price;
pub mod product;

pub use document::{compute_totals, Document, DocumentTotals, DocumentType, TotalsLine};
pub use line_item::{LineItem, NewLineItem};
pub use price::{applicable_price, PriceRecord};
pub use product::{InsufficientStock, Product};
