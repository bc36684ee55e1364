//! Storage Adapters
//!
//! Implementations of the TokenStore port.
//!
//! ## Available Adapters
//!
//! - **FileTokenStore** - Stores tokens as a JSON map on disk
//! - **InMemoryTokenStore** - Stores tokens in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileTokenStore, InMemoryTokenStore};
//!
//! // Production: survives restarts
//! let store = FileTokenStore::new(".founder-compass/tokens.json");
//!
//! // Testing: in-memory storage
//! let store = InMemoryTokenStore::new();
//! ```

mod file_token_store;
mod in_memory_token_store;

pub use file_token_store::FileTokenStore;
pub use in_memory_token_store::InMemoryTokenStore;
