//! Memory Adapters
//!
//! In-memory implementation of the record repository ports.

mod in_memory_record_store;

pub use in_memory_record_store::InMemoryRecordStore;
