//! Book endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{BookPayload, BookQuery},
};

use super::response::{ApiResponse, BookData, BookIdData, BookListData, EnvelopeDoc, MessageResponse};

/// Add a book to the shelf
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added, `data` holds the new id", body = BookIdData),
        (status = 400, description = "Missing name, readPage greater than pageCount or malformed body", body = EnvelopeDoc),
        (status = 500, description = "Book could not be stored", body = EnvelopeDoc)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookIdData>>)> {
    let Json(payload) = payload?;

    let id = state.services.books.create_book(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Book added successfully",
            BookIdData { id },
        )),
    ))
}

/// List books, optionally filtered by name, reading or finished
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Books as `{id, name, publisher}`", body = BookListData),
        (status = 400, description = "Malformed query string", body = EnvelopeDoc),
        (status = 404, description = "The filter matched no book", body = EnvelopeDoc)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    query: Result<Query<BookQuery>, QueryRejection>,
) -> AppResult<Json<ApiResponse<BookListData>>> {
    let Query(query) = query?;

    let books = state.services.books.list_books(&query).await?;
    Ok(Json(ApiResponse::success(BookListData { books })))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Full book record", body = BookData),
        (status = 404, description = "Book not found", body = EnvelopeDoc)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<ApiResponse<BookData>>> {
    let book = state.services.books.get_book(&book_id).await?;
    Ok(Json(ApiResponse::success(BookData { book })))
}

/// Replace a book's fields
#[utoipa::path(
    put,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = String, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = EnvelopeDoc),
        (status = 400, description = "Missing name or readPage greater than pageCount", body = EnvelopeDoc),
        (status = 404, description = "Book not found", body = EnvelopeDoc)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(payload) = payload?;

    state.services.books.update_book(&book_id, payload).await?;
    Ok(Json(MessageResponse::success_message("Book updated successfully")))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = EnvelopeDoc),
        (status = 404, description = "Book not found", body = EnvelopeDoc)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete_book(&book_id).await?;
    Ok(Json(MessageResponse::success_message("Book deleted successfully")))
}
