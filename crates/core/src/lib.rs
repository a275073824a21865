//! `stockdoc-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod id;

pub use id::{DocumentId, InvalidId, LineItemId, PriceRecordId, ProductId};
