//! Book model and related request types.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Stored book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    /// Derived from `readPage == pageCount` on every write
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new record from a validated draft.
    pub fn create(id: String, draft: BookDraft, now: DateTime<Utc>) -> Self {
        let mut book = Self {
            id,
            name: String::new(),
            year: None,
            author: None,
            summary: None,
            publisher: None,
            page_count: 0,
            read_page: 0,
            finished: false,
            reading: false,
            inserted_at: now,
            updated_at: now,
        };
        book.assign(draft);
        book
    }

    /// Replace every mutable field, keeping `id` and `inserted_at`.
    pub fn apply(&mut self, draft: BookDraft, now: DateTime<Utc>) {
        self.assign(draft);
        // updated_at must move forward even if the clock did not
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + TimeDelta::microseconds(1)
        };
    }

    fn assign(&mut self, draft: BookDraft) {
        self.name = draft.name;
        self.year = draft.year;
        self.author = draft.author;
        self.summary = draft.summary;
        self.publisher = draft.publisher;
        self.page_count = draft.page_count;
        self.read_page = draft.read_page;
        self.reading = draft.reading;
        self.finished = self.page_count == self.read_page;
    }

    pub fn short(&self) -> BookShort {
        BookShort {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Projection returned by list operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookShort {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

/// Create / update request body
///
/// A missing `pageCount` or `readPage` counts as 0, so sending `readPage`
/// without `pageCount` is rejected unless `readPage` is 0.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_page_progress"))]
pub struct BookPayload {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<u32>,
    pub read_page: Option<u32>,
    pub reading: Option<bool>,
}

fn validate_page_progress(payload: &BookPayload) -> Result<(), ValidationError> {
    if payload.read_page.unwrap_or(0) > payload.page_count.unwrap_or(0) {
        return Err(ValidationError::new("read_page_exceeds_page_count"));
    }
    Ok(())
}

/// Why a payload cannot be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PayloadRejection {
    #[error("Please provide the book name")]
    MissingName,
    #[error("readPage must not be greater than pageCount")]
    ReadPageExceedsPageCount,
}

/// A payload that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookPayload {
    /// Validate the payload. A name problem is reported before a page problem.
    pub fn into_draft(self) -> Result<BookDraft, PayloadRejection> {
        if let Err(errors) = self.validate() {
            if errors.errors().contains_key("name") {
                return Err(PayloadRejection::MissingName);
            }
            return Err(PayloadRejection::ReadPageExceedsPageCount);
        }

        let Some(name) = self.name else {
            return Err(PayloadRejection::MissingName);
        };

        Ok(BookDraft {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count: self.page_count.unwrap_or(0),
            read_page: self.read_page.unwrap_or(0),
            reading: self.reading.unwrap_or(false),
        })
    }
}

/// Query parameters for listing books
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// `1` for books being read, anything else for the others
    pub reading: Option<String>,
    /// `1` for finished books, anything else for the others
    pub finished: Option<String>,
}

/// The single filter honored for a list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    Name(String),
    Reading(bool),
    Finished(bool),
    All,
}

impl BookQuery {
    /// Precedence: name, then reading, then finished.
    pub fn filter(&self) -> BookFilter {
        if let Some(name) = &self.name {
            BookFilter::Name(name.to_lowercase())
        } else if let Some(reading) = &self.reading {
            BookFilter::Reading(reading == "1")
        } else if let Some(finished) = &self.finished {
            BookFilter::Finished(finished == "1")
        } else {
            BookFilter::All
        }
    }
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::Name(needle) => book.name.to_lowercase().contains(needle.as_str()),
            BookFilter::Reading(reading) => book.reading == *reading,
            BookFilter::Finished(finished) => book.finished == *finished,
            BookFilter::All => true,
        }
    }

    /// Message for a filter that matched nothing
    pub fn not_found_message(&self) -> &'static str {
        match self {
            BookFilter::Name(_) => "Failed to get books, name not found",
            BookFilter::Reading(true) => "No books are currently being read",
            BookFilter::Reading(false) => "All books are currently being read",
            BookFilter::Finished(true) => "No books have been finished",
            BookFilter::Finished(false) => "All books have been finished",
            BookFilter::All => "No books found",
        }
    }
}
