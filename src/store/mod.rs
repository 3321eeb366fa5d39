//! # Data Store
//!
//! The hierarchical store the endpoint layer reads and writes through.
//! `DataStore` is the seam; `MemoryStore` is the bundled implementation.

pub mod backend;
pub mod errors;
pub mod memory;

pub use backend::{DataStore, StoreOptions};
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
