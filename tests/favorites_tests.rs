use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use holonet::config::Config;
use holonet::db::SeedData;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

const FIXTURE: &str = r#"{
    "users": [
        {"email": "a@b.com", "password": "secret"},
        {"email": "han@falcon.net", "password": "kessel"}
    ],
    "people": [
        {"name": "Luke Skywalker", "url": "https://swapi.dev/api/people/1/"}
    ],
    "planets": [
        {"name": "Tatooine", "url": "https://swapi.dev/api/planets/1/"},
        {"name": "Hoth", "url": "https://swapi.dev/api/planets/4/"}
    ]
}"#;

async fn spawn_app() -> NormalizePath<Router> {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let state = holonet::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");

    let data: SeedData = serde_json::from_str(FIXTURE).unwrap();
    state.store().seed(&data).await.expect("Failed to seed");

    holonet::api::app(state)
}

async fn send(
    app: &NormalizePath<Router>,
    method: Method,
    uri: &str,
    acting_user: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = acting_user {
        builder = builder.header("X-User-Id", user);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_person_favorite_round_trip() {
    let app = spawn_app().await;

    let (status, body) = send(&app, Method::POST, "/users/1/favorite/people/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "People added to favorites"}));

    let (status, body) = send(&app, Method::GET, "/users/1/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "id": 1,
            "people": {"id": 1, "name": "Luke Skywalker"},
            "planet": null,
            "user": {"id": 1, "email": "a@b.com"}
        }])
    );
}

#[tokio::test]
async fn test_duplicate_planet_favorites_are_kept() {
    let app = spawn_app().await;

    for _ in 0..2 {
        let (status, body) = send(&app, Method::POST, "/users/2/favorite/planet/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Planet added to favorites");
    }

    let (_, body) = send(&app, Method::GET, "/users/2/favorites", None).await;
    let favorites = body.as_array().unwrap();
    assert_eq!(favorites.len(), 2);
    for favorite in favorites {
        assert_eq!(favorite["planet"], json!({"id": 1, "name": "Tatooine"}));
        assert_eq!(favorite["people"], serde_json::Value::Null);
        assert_eq!(favorite["user"]["email"], "han@falcon.net");
    }

    let (_, body) = send(&app, Method::GET, "/users/1/favorites", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_unknown_user_has_no_favorites() {
    let app = spawn_app().await;

    let (status, body) = send(&app, Method::GET, "/users/999/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_with_missing_rows_is_404() {
    let app = spawn_app().await;

    for uri in [
        "/users/999/favorite/planet/1",
        "/users/1/favorite/planet/999",
        "/users/1/favorite/people/999",
    ] {
        let (status, body) = send(&app, Method::POST, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], true);
    }

    let (_, body) = send(&app, Method::GET, "/users/1/favorites", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_delete_acts_as_default_user() {
    let app = spawn_app().await;

    let (status, _) = send(&app, Method::POST, "/users/2/favorite/planet/2", None).await;
    assert_eq!(status, StatusCode::OK);

    // No header: acts as user 1, who has no such favorite.
    let (status, body) = send(&app, Method::DELETE, "/favorite/planet/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Favorite not found", "error": true}));

    let (status, body) = send(&app, Method::DELETE, "/favorite/planet/2", Some("2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Planet removed from favorites"}));

    let (status, _) = send(&app, Method::DELETE, "/favorite/planet/2", Some("2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/users/2/favorites", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_delete_removes_one_duplicate_at_a_time() {
    let app = spawn_app().await;

    send(&app, Method::POST, "/users/1/favorite/people/1", None).await;
    send(&app, Method::POST, "/users/1/favorite/people/1", None).await;

    let (status, body) = send(&app, Method::DELETE, "/favorite/people/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "People removed from favorites");

    let (_, body) = send(&app, Method::GET, "/users/1/favorites", None).await;
    let remaining = body.as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], 2);
}

#[tokio::test]
async fn test_invalid_acting_user_header() {
    let app = spawn_app().await;

    for header in ["zero", "0", "-1"] {
        let (status, body) = send(&app, Method::DELETE, "/favorite/planet/1", Some(header)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{header}");
        assert_eq!(body["error"], true);
    }
}

#[tokio::test]
async fn test_create_ignores_request_body() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/users/1/favorite/planet/1")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name": "ignored"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/users/1/favorites", None).await;
    assert_eq!(body[0]["planet"]["name"], "Tatooine");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_on_file_database() {
    let db_path =
        std::env::temp_dir().join(format!("holonet-concurrency-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());

    let state = holonet::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let data: SeedData = serde_json::from_str(FIXTURE).unwrap();
    state.store().seed(&data).await.expect("Failed to seed");
    let app = holonet::api::app(state);

    let requests: Vec<_> = (0..40)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                let request = Request::builder()
                    .method(Method::POST)
                    .uri("/users/1/favorite/planet/1")
                    .body(Body::empty())
                    .unwrap();
                app.oneshot(request).await.unwrap().status()
            })
        })
        .collect();

    for handle in requests {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let (_, body) = send(&app, Method::GET, "/users/1/favorites", None).await;
    assert_eq!(body.as_array().unwrap().len(), 40);

    drop(app);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", db_path.display()));
    }
}
