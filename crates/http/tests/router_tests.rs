//! Router tests driving the full axum app over a temporary SQLite database.

#![cfg(feature = "sqlite")]
#![allow(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use quotebook_core::{NewSource, SourceType};
use quotebook_http::{create_router, AppState};
use quotebook_storage::traits::{QuoteStore, SourceStore};
use quotebook_storage::StorageBackend;
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    router: Router,
    storage: Arc<StorageBackend>,
    _dir: TempDir,
}

fn setup_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(StorageBackend::new_sqlite(&dir.path().join("test.db")).unwrap());
    let state = Arc::new(AppState::new(Arc::clone(&storage)));
    TestApp { router: create_router(state), storage, _dir: dir }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get(&self, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, uri: &str, body: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap();
        self.send(request).await
    }

    async fn seed_source(&self, title: &str) -> i64 {
        self.storage
            .create_source(&NewSource { title: title.to_owned(), source_type: SourceType::Movie, year: None })
            .await
            .unwrap()
            .id
    }
}

#[tokio::test]
async fn test_health_and_version() {
    let app = setup_app();

    let (status, _, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, _, body) = app.get("/api/version").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["version"].is_string());
    assert_eq!(json["backend"], "sqlite");
}

#[tokio::test]
async fn test_index_renders_empty_state() {
    let app = setup_app();
    let (status, _, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No quotes yet"));
}

#[tokio::test]
async fn test_add_source_redirects_to_quote_form() {
    let app = setup_app();

    let (status, headers, _) = app.post_form("/add-source/", "title=The+Matrix&source_type=movie&year=1999").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/add-quote/");

    let (status, _, body) = app.get("/add-quote/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Movie: The Matrix (0/3)"));
}

#[tokio::test]
async fn test_duplicate_source_rerenders_form() {
    let app = setup_app();
    app.post_form("/add-source/", "title=Matrix&source_type=movie").await;

    let (status, _, body) = app.post_form("/add-source", "title=Matrix&source_type=movie").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Source with this Title and Type already exists."));
    assert!(body.contains(r#"value="Matrix""#));

    let (status, _, _) = app.post_form("/add-source/", "title=Matrix&source_type=book").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_add_quote_then_show_it() {
    let app = setup_app();
    let source = app.seed_source("Casablanca").await;

    let body = format!("text=Here%27s+looking+at+you%2C+kid.&source={source}&weight=2");
    let (status, headers, _) = app.post_form("/add-quote/", &body).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/");

    let (status, _, page) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Here&#x27;s looking at you, kid."));
    assert!(page.contains("1 views"));
}

#[tokio::test]
async fn test_duplicate_and_full_source_errors() {
    let app = setup_app();
    let source = app.seed_source("Trilogy").await;
    for text in ["one", "two", "three"] {
        let (status, _, _) = app.post_form("/add-quote", &format!("text={text}&source={source}")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
    }

    let (status, _, page) = app.post_form("/add-quote/", &format!("text=four&source={source}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("already has the maximum number of quotes (3)"));
    assert!(page.contains(">four</textarea>"));

    let other = app.seed_source("Other").await;
    let (status, _, page) = app.post_form("/add-quote/", &format!("text=+ONE+&source={other}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Quote &#x27;one...&#x27; already exists (source: Trilogy)"));
}

#[tokio::test]
async fn test_vote_endpoint() {
    let app = setup_app();
    let source = app.seed_source("Votes").await;
    let quote = app
        .storage
        .create_quote(&quotebook_core::NewQuote { text: "vote".to_owned(), source_id: source, weight: 1 }, 3)
        .await
        .unwrap();

    let uri = format!("/like/{}/", quote.id);
    let (status, _, body) = app.post_form(&uri, "action=like").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["likes"], 1);
    assert_eq!(json["dislikes"], 0);
    assert_eq!(json["popularity"], 100);

    let (_, _, body) = app.post_form(&format!("/like/{}", quote.id), "action=dislike").await;
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!((json["likes"].as_i64(), json["dislikes"].as_i64()), (Some(1), Some(1)));

    let (status, _, body) = app.post_form(&uri, "action=shrug").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!((json["likes"].as_i64(), json["dislikes"].as_i64()), (Some(1), Some(1)));

    let (status, _, body) = app.post_form("/like/9999/", "action=like").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_vote_with_non_integer_id_is_json_not_found() {
    let app = setup_app();

    for uri in ["/like/abc/", "/like/99999999999999999999/", "/like/abc"] {
        let (status, _, body) = app.post_form(uri, "action=like").await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        let json: Value = serde_json::from_str(&body).unwrap();
        assert!(json["error"].is_string(), "{uri}: {body}");
    }
}

#[tokio::test]
async fn test_popular_with_bad_limit_is_json_bad_request() {
    let app = setup_app();

    let (status, _, body) = app.get("/popular/?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("invalid limit"));
}

#[tokio::test]
async fn test_popular_page_lists_rankings() {
    let app = setup_app();
    let source = app.seed_source("Pop").await;
    let quote = app
        .storage
        .create_quote(&quotebook_core::NewQuote { text: "crowd favourite".to_owned(), source_id: source, weight: 1 }, 3)
        .await
        .unwrap();
    app.post_form(&format!("/like/{}/", quote.id), "action=like").await;

    let (status, _, page) = app.get("/popular/?limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Most liked"));
    assert!(page.contains("crowd favourite"));
    assert!(page.contains("100% of 1 votes"));
}
