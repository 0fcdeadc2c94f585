//! Repository layer for book storage

pub mod books;

use std::sync::Arc;
use tokio::sync::RwLock;

pub use books::BookStore;

/// Main repository struct holding the shared store
#[derive(Clone, Default)]
pub struct Repository {
    pub books: Arc<RwLock<BookStore>>,
}

impl Repository {
    /// Create a repository with an empty store
    pub fn new() -> Self {
        Self::default()
    }
}
