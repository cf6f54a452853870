//! Router assembly

use axum::{
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use blog_shared::config::AppSettings;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use crate::handlers::{self, articles, auth, health, navigation, users};
use crate::middleware::{require_admin, require_auth, require_editor};
use crate::state::AppState;

/// Builds the full application router: `/api` routes, static files under
/// `/public`, and a JSON 404 for everything else.
pub fn build_router(state: AppState, settings: &AppSettings) -> Router {
    // Public routes (no token)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/login", post(auth::login))
        .route("/articles", get(articles::list_articles))
        .route("/articles/{id}", get(articles::get_article))
        .route("/navigation", get(navigation::get_tree))
        .route("/navigation/{id}", get(navigation::get_item));

    let authenticated_routes = Router::new()
        .route("/me", get(auth::me))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    // Role gates run after require_auth, which is the outermost layer
    let editor_routes = Router::new()
        .route("/articles", post(articles::create_article))
        .route("/articles/{id}", put(articles::update_article).delete(articles::delete_article))
        .route_layer(from_fn(require_editor))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let admin_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{id}", put(users::update_user).delete(users::delete_user))
        .route("/navigation", post(navigation::create_item))
        .route("/navigation/admin", get(navigation::list_all))
        .route("/navigation/{id}", put(navigation::update_item).delete(navigation::delete_item))
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let api = Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(editor_routes)
        .merge(admin_routes);

    Router::new()
        .nest("/api", api)
        .nest_service("/public", ServeDir::new(&settings.public_dir))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

/// Any origin when none are configured, otherwise only the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use blog_infrastructure::{seed_defaults, Repositories};
    use blog_shared::config::{JwtSettings, SeedSettings};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn settings() -> AppSettings {
        AppSettings {
            env: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            name: "blog-test".to_string(),
            public_dir: "public".to_string(),
            cors_origins: vec![],
        }
    }

    async fn app() -> Router {
        let repos = Repositories::memory();
        let seed = SeedSettings {
            admin_username: "admin".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: "admin123".to_string(),
        };
        seed_defaults(&repos, &seed).await.unwrap();

        let jwt = JwtSettings { secret: "test-secret".to_string(), access_token_expiry: 3600 };
        let state = AppState::new(repos.users, repos.articles, repos.navigation, &jwt, true);
        build_router(state, &settings())
    }

    async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn admin_token(app: &Router) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "username": "admin", "password": "admin123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_reports_mock_data() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["mockData"], true);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api/nope", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Route not found" }));
    }

    #[tokio::test]
    async fn test_login_and_me() {
        let app = app().await;
        let token = admin_token(&app).await;

        let (status, body) = send(&app, Method::GET, "/api/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "admin");
        assert!(body.get("passwordHash").is_none());

        let (status, _) = send(&app, Method::GET, "/api/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "username": "admin", "password": "wrong" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_navigation_tree_and_cycle_rejection() {
        let app = app().await;
        let token = admin_token(&app).await;

        let (_, tree) = send(&app, Method::GET, "/api/navigation", None, None).await;
        assert_eq!(tree.as_array().unwrap().len(), 4);
        assert_eq!(tree[0]["path"], "/");

        let (status, child) = send(
            &app,
            Method::POST,
            "/api/navigation",
            Some(&token),
            Some(json!({ "title": "Rust", "path": "/blog/rust", "order": 1, "parentId": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let child_id = child["id"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/navigation/2",
            Some(&token),
            Some(json!({ "title": "Blog", "path": "/blog", "order": 2, "parentId": child_id })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BadRequest");

        let (_, tree) = send(&app, Method::GET, "/api/navigation", None, None).await;
        assert_eq!(tree[1]["children"][0]["id"], child_id);

        let (status, body) = send(&app, Method::DELETE, "/api/navigation/2", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deletedIds"], json!([2, child_id]));
    }

    #[tokio::test]
    async fn test_navigation_writes_require_admin() {
        let app = app().await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/navigation",
            None,
            Some(json!({ "title": "X", "path": "/x" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::GET, "/api/navigation/admin", Some("bogus"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_articles_paginated_and_view_counted() {
        let app = app().await;
        let token = admin_token(&app).await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/articles",
            Some(&token),
            Some(json!({ "title": "Second", "content": "Hello there", "tags": ["rust"] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["author"]["username"], "admin");

        let (_, page) = send(&app, Method::GET, "/api/articles?page=1&pageSize=1", None, None).await;
        assert_eq!(page["pagination"], json!({ "total": 2, "page": 1, "pages": 2 }));
        assert_eq!(page["articles"].as_array().unwrap().len(), 1);

        let id = created["id"].as_i64().unwrap();
        let uri = format!("/api/articles/{}", id);
        let (_, first) = send(&app, Method::GET, &uri, None, None).await;
        let (_, second) = send(&app, Method::GET, &uri, None, None).await;
        assert_eq!(first["viewCount"], 1);
        assert_eq!(second["viewCount"], 2);
    }

    #[tokio::test]
    async fn test_articles_filtered_by_category_tag_and_search() {
        let app = app().await;
        let token = admin_token(&app).await;

        let post = json!({ "title": "Borrow checker notes", "content": "Lifetimes", "category": "tech", "tags": ["rust"] });
        let (status, _) = send(&app, Method::POST, "/api/articles", Some(&token), Some(post)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, page) = send(&app, Method::GET, "/api/articles?category=tech", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["pagination"]["total"], 1);
        assert_eq!(page["articles"][0]["title"], "Borrow checker notes");

        let (_, page) = send(&app, Method::GET, "/api/articles?tag=welcome", None, None).await;
        assert_eq!(page["pagination"]["total"], 1);
        assert_eq!(page["articles"][0]["title"], "Welcome to the blog");

        let (_, page) = send(&app, Method::GET, "/api/articles?search=BORROW", None, None).await;
        assert_eq!(page["pagination"]["total"], 1);

        let (_, page) = send(&app, Method::GET, "/api/articles?category=tech&tag=welcome", None, None).await;
        assert_eq!(page["pagination"], json!({ "total": 0, "page": 1, "pages": 0 }));

        let (_, page) = send(&app, Method::GET, "/api/articles?category=", None, None).await;
        assert_eq!(page["pagination"]["total"], 2);
    }

    #[tokio::test]
    async fn test_article_list_query_is_lenient() {
        let app = app().await;

        let (status, page) = send(&app, Method::GET, "/api/articles?page=abc&pageSize=xyz", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["pagination"]["page"], 1);
        assert_eq!(page["articles"].as_array().unwrap().len(), 1);

        let (status, body) = send(&app, Method::GET, "/api/articles?tag=a&tag=b", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BadRequest");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_user_admin_rules() {
        let app = app().await;
        let token = admin_token(&app).await;

        let (status, _) = send(&app, Method::DELETE, "/api/users/1", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let new_user = json!({ "username": "writer", "email": "writer@example.com", "password": "secret1", "role": "editor" });
        let (status, _) = send(&app, Method::POST, "/api/users", Some(&token), Some(new_user.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = send(&app, Method::POST, "/api/users", Some(&token), Some(new_user)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Conflict");

        let (status, users) = send(&app, Method::GET, "/api/users", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(users.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_editor_cannot_manage_users() {
        let app = app().await;
        let token = admin_token(&app).await;
        let editor = json!({ "username": "ed", "email": "ed@example.com", "password": "secret1", "role": "editor" });
        send(&app, Method::POST, "/api/users", Some(&token), Some(editor)).await;

        let (_, login) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "username": "ed", "password": "secret1" })),
        )
        .await;
        let editor_token = login["token"].as_str().unwrap().to_string();

        let (status, _) = send(&app, Method::GET, "/api/users", Some(&editor_token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/articles",
            Some(&editor_token),
            Some(json!({ "title": "By editor", "content": "text" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_shape() {
        let app = app().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
