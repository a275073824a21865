//! Infrastructure layer: collaborator stores, the transaction boundary, and
//! the line-item transaction engine.

pub mod service;
pub mod store;


pub use service::{LineItemError, LineItemService};
pub use store::in_memory::InMemoryStores;
pub use store::{
    DocumentStore, LineItemStore, PriceRecordStore, ProductStore, StoreError, Transaction,
    TransactionManager,
};
