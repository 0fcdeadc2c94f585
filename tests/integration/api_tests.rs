//! API integration tests, driving the router in-process

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{api::create_router, AppConfig, AppState};

fn app() -> Router {
    create_router(AppState::new(AppConfig::default()))
}

/// Send a request and return the status with the parsed JSON body
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("Failed to build request"))
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn moby_dick() -> Value {
    json!({
        "name": "Moby Dick",
        "year": 1851,
        "author": "Melville",
        "summary": "...",
        "publisher": "P",
        "pageCount": 500,
        "readPage": 500,
        "reading": false
    })
}

async fn create(app: &Router, payload: Value) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().expect("No book ID").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 0);
}

#[tokio::test]
async fn test_create_and_get() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(moby_dick())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Book added successfully");
    let id = body["data"]["id"].as_str().expect("No book ID");

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let book = &body["data"]["book"];
    assert_eq!(book["id"], id);
    assert_eq!(book["name"], "Moby Dick");
    assert_eq!(book["year"], 1851);
    assert_eq!(book["pageCount"], 500);
    assert_eq!(book["finished"], true);
    assert_eq!(book["reading"], false);
    assert_eq!(book["insertedAt"], book["updatedAt"]);
}

#[tokio::test]
async fn test_create_without_name() {
    let app = app();
    let mut payload = moby_dick();
    payload.as_object_mut().unwrap().remove("name");
    payload["readPage"] = json!(900);

    let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Failed to add book. Please provide the book name");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_create_read_page_over_page_count() {
    let app = app();
    let mut payload = moby_dick();
    payload["readPage"] = json!(501);

    let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Failed to add book. readPage must not be greater than pageCount"
    );

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"], json!([]));
}

#[tokio::test]
async fn test_create_malformed_body() {
    let app = app();
    let mut payload = moby_dick();
    payload["pageCount"] = json!(-1);

    let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_list_empty_with_filters() {
    let app = app();
    for uri in ["/books", "/books?name=moby", "/books?reading=1", "/books?finished=0"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["books"], json!([]));
    }
}

#[tokio::test]
async fn test_list_projection() {
    let app = app();
    let id = create(&app, moby_dick()).await;

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["books"],
        json!([{ "id": id, "name": "Moby Dick", "publisher": "P" }])
    );
}

#[tokio::test]
async fn test_list_name_filter() {
    let app = app();
    create(&app, moby_dick()).await;
    let mut dune = moby_dick();
    dune["name"] = json!("Dune");
    create(&app, dune).await;

    let (status, body) = send(&app, Method::GET, "/books?name=MOBY", None).await;
    assert_eq!(status, StatusCode::OK);
    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "Moby Dick");

    let (status, body) = send(&app, Method::GET, "/books?name=ahab", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Failed to get books, name not found");
}

#[tokio::test]
async fn test_list_name_filter_takes_precedence() {
    let app = app();
    create(&app, moby_dick()).await;

    // The book is not being read, so the reading filter alone would fail
    let (status, body) = send(&app, Method::GET, "/books?name=dick&reading=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, "/books?reading=1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No books are currently being read");
}

#[tokio::test]
async fn test_list_malformed_query() {
    let app = app();
    create(&app, moby_dick()).await;

    let (status, body) = send(&app, Method::GET, "/books?name=a&name=b", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_list_reading_and_finished_filters() {
    let app = app();
    create(&app, moby_dick()).await;
    let mut dune = moby_dick();
    dune["name"] = json!("Dune");
    dune["readPage"] = json!(20);
    dune["reading"] = json!(true);
    create(&app, dune).await;

    let (_, body) = send(&app, Method::GET, "/books?reading=1", None).await;
    assert_eq!(body["data"]["books"][0]["name"], "Dune");

    let (_, body) = send(&app, Method::GET, "/books?reading=0", None).await;
    assert_eq!(body["data"]["books"][0]["name"], "Moby Dick");

    let (_, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(body["data"]["books"][0]["name"], "Moby Dick");

    let (_, body) = send(&app, Method::GET, "/books?finished=0", None).await;
    assert_eq!(body["data"]["books"][0]["name"], "Dune");
}

#[tokio::test]
async fn test_get_unknown_book() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/books/unknown", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_update_book() {
    let app = app();
    let id = create(&app, moby_dick()).await;
    let (_, before) = send(&app, Method::GET, &format!("/books/{}", id), None).await;

    let mut payload = moby_dick();
    payload["name"] = json!("Moby-Dick; or, The Whale");
    payload["readPage"] = json!(120);
    payload["reading"] = json!(true);

    let (status, body) = send(&app, Method::PUT, &format!("/books/{}", id), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success", "message": "Book updated successfully" }));

    let (_, after) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    let (before, after) = (&before["data"]["book"], &after["data"]["book"]);
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["insertedAt"], before["insertedAt"]);
    assert_ne!(after["updatedAt"], before["updatedAt"]);
    assert_eq!(after["name"], "Moby-Dick; or, The Whale");
    assert_eq!(after["finished"], false);
    assert_eq!(after["reading"], true);
}

#[tokio::test]
async fn test_update_failures() {
    let app = app();
    let id = create(&app, moby_dick()).await;
    let uri = format!("/books/{}", id);

    let mut no_name = moby_dick();
    no_name.as_object_mut().unwrap().remove("name");
    let (status, body) = send(&app, Method::PUT, &uri, Some(no_name)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to update book. Please provide the book name");

    let mut too_far = moby_dick();
    too_far["readPage"] = json!(600);
    let (status, body) = send(&app, Method::PUT, &uri, Some(too_far)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Failed to update book. readPage must not be greater than pageCount"
    );

    let (status, body) = send(&app, Method::PUT, "/books/unknown", Some(moby_dick())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Failed to update book. Id not found");
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    let id = create(&app, moby_dick()).await;
    let uri = format!("/books/{}", id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success", "message": "Book deleted successfully" }));

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Failed to delete book. Id not found");
}

#[tokio::test]
async fn test_moby_dick_scenario() {
    let app = app();
    let id = create(&app, moby_dick()).await;

    let (status, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["books"],
        json!([{ "id": id, "name": "Moby Dick", "publisher": "P" }])
    );

    let mut payload = moby_dick();
    payload["readPage"] = json!(600);
    let (status, _) = send(&app, Method::PUT, &format!("/books/{}", id), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books"].is_object());
    assert!(body["paths"]["/books/{book_id}"].is_object());
}
