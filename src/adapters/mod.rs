//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory record store
//! - `storage` - Handoff slot backends
//! - `document` - Markdown rendering and HTML/PDF export

pub mod document;
pub mod memory;
pub mod storage;
