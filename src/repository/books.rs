//! In-memory book store

use crate::models::book::Book;

/// Ordered collection of books. Insertion order is preserved.
#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the end. Id uniqueness is the caller's responsibility.
    pub fn append(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Index of the first book with the given id
    pub fn find_index_by_id(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Book> {
        self.books.get_mut(index)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Book> {
        self.find_index_by_id(id).and_then(|index| self.get(index))
    }

    /// Remove one book, keeping the relative order of the rest
    pub fn remove_at(&mut self, index: usize) -> Option<Book> {
        (index < self.books.len()).then(|| self.books.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
