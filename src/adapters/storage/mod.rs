//! Storage Adapters
//!
//! Implementations of the ReportCardHandoff port.
//!
//! ## Available Adapters
//!
//! - **FileHandoff** - Stores the card as a JSON file on disk
//! - **InMemoryHandoff** - Stores the card in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileHandoff, InMemoryHandoff};
//!
//! let handoff = FileHandoff::new("./data/handoff");
//! let handoff = InMemoryHandoff::new();
//! ```

mod file_handoff;
mod in_memory_handoff;

pub use file_handoff::FileHandoff;
pub use in_memory_handoff::InMemoryHandoff;
