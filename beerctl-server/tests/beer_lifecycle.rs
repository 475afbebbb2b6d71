//! End-to-end catalog lifecycle over HTTP against a file-backed database

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use beerctl_server::db::{create_pool, ensure_schema};
use beerctl_server::{
    build_router, AppState, Beer, BeerRepository, BeerStyle, BeerType, SqliteBeerRepo,
};
use sqlx::SqlitePool;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    pool: SqlitePool,
    dir: tempfile::TempDir,
}

async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("beer.db").display());
    let pool = create_pool(&url).await.expect("pool");
    ensure_schema(&pool).await.expect("schema");

    let router = build_router(
        AppState {
            beers: Arc::new(SqliteBeerRepo::new(pool.clone())),
        },
        false,
    );

    TestApp {
        router,
        pool,
        dir,
    }
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let body = body.map(|b| Body::from(b.to_owned())).unwrap_or_else(Body::empty);
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn list(app: &TestApp) -> Vec<Beer> {
    let (status, body) = send(app, "GET", "/v1/beer", None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn catalog_lifecycle() {
    let app = spawn_app().await;

    assert!(list(&app).await.is_empty());

    let (status, _) = send(
        &app,
        "POST",
        "/v1/beer",
        Some(r#"{"id":1,"name":"Heineken","type":2,"style":6}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/v1/beer/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let heineken: Beer = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        heineken,
        Beer::new(1, "Heineken", BeerType::LAGER, BeerStyle::PALE)
    );

    let (status, _) = send(
        &app,
        "POST",
        "/v1/beer",
        Some(r#"{"id":2,"name":"Skol","type":1,"style":6}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(list(&app).await.len(), 2);

    let (status, _) = send(
        &app,
        "PUT",
        "/v1/beer",
        Some(r#"{"id":1,"name":"Heineken Zero","type":2,"style":6}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/v1/beer/1", None).await;
    let updated: Beer = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated.name, "Heineken Zero");

    let (status, _) = send(&app, "DELETE", "/v1/beer/2", None).await;
    assert_eq!(status, StatusCode::OK);

    let remaining = list(&app).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, 1);

    let (status, _) = send(&app, "GET", "/v1/beer/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/v1/beer/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejected_writes_leave_store_untouched() {
    let app = spawn_app().await;
    send(
        &app,
        "POST",
        "/v1/beer",
        Some(r#"{"id":1,"name":"Heineken","type":2,"style":6}"#),
    )
    .await;
    let before = list(&app).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/v1/beer",
        Some(r#"{"id":0,"name":"Nobody","type":1,"style":1}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/v1/beer",
        Some(r#"{"id":1,"name":"Duplicate","type":4,"style":5}"#),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, "POST", "/v1/beer", Some(r#"{"id":"one"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(list(&app).await, before);
}

#[tokio::test]
async fn committed_writes_survive_reopen() {
    let app = spawn_app().await;
    let repo = SqliteBeerRepo::new(app.pool.clone());

    let created: Vec<Beer> = (1..=5)
        .map(|id| Beer::new(id, format!("Beer {id}"), BeerType(id % 4 + 1), BeerStyle(id)))
        .collect();
    for beer in &created {
        repo.create(beer).await.unwrap();
    }

    let url = format!("sqlite://{}", app.dir.path().join("beer.db").display());
    app.pool.close().await;

    let reopened = SqliteBeerRepo::new(create_pool(&url).await.unwrap());
    let mut stored = reopened.list().await.unwrap();
    stored.sort_by_key(|b| b.id);
    assert_eq!(stored, created);

    for beer in &created {
        assert_eq!(&reopened.get(beer.id).await.unwrap(), beer);
    }
}
