//! Book management service

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookQuery, BookShort},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and store a new book, returning its id
    pub async fn create_book(&self, payload: BookPayload) -> AppResult<String> {
        let draft = payload
            .into_draft()
            .map_err(|e| AppError::Validation(format!("Failed to add book. {}", e)))?;

        let id = Uuid::new_v4().simple().to_string();
        let book = Book::create(id.clone(), draft, Utc::now());

        let mut store = self.repository.books.write().await;
        store.append(book);

        // Only a corrupted store can lose a book it just accepted
        if store.find_index_by_id(&id).is_none() {
            tracing::error!("Book {} missing from store right after append", id);
            return Err(AppError::Internal("Failed to add book".to_string()));
        }

        tracing::info!("Book added: id={}", id);
        Ok(id)
    }

    /// List books, honoring at most one filter
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<BookShort>> {
        let store = self.repository.books.read().await;
        if store.is_empty() {
            return Ok(Vec::new());
        }

        let filter = query.filter();
        tracing::debug!("Listing books with filter {:?}", filter);

        let books: Vec<BookShort> = store
            .iter()
            .filter(|book| filter.matches(book))
            .map(Book::short)
            .collect();

        if books.is_empty() {
            return Err(AppError::NotFound(filter.not_found_message().to_string()));
        }
        Ok(books)
    }

    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        let store = self.repository.books.read().await;
        store
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Replace a book's mutable fields
    pub async fn update_book(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        let mut store = self.repository.books.write().await;
        let index = store
            .find_index_by_id(id)
            .ok_or_else(|| AppError::NotFound("Failed to update book. Id not found".to_string()))?;

        let draft = payload
            .into_draft()
            .map_err(|e| AppError::Validation(format!("Failed to update book. {}", e)))?;

        let book = store
            .get_mut(index)
            .ok_or_else(|| AppError::Internal(format!("Book index {} out of range", index)))?;
        book.apply(draft, Utc::now());

        tracing::info!("Book updated: id={}", id);
        Ok(())
    }

    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        let mut store = self.repository.books.write().await;
        let removed = store
            .find_index_by_id(id)
            .and_then(|index| store.remove_at(index));

        match removed {
            Some(_) => {
                tracing::info!("Book deleted: id={}", id);
                Ok(())
            }
            None => Err(AppError::NotFound("Failed to delete book. Id not found".to_string())),
        }
    }

    /// Number of stored books (for health reporting)
    pub async fn count(&self) -> usize {
        self.repository.books.read().await.len()
    }
}
