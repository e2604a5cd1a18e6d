use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chatstream_api::auth::PasswordHasher;
use chatstream_api::config::{PasswordSettings, SessionSettings};
use chatstream_api::db::MemoryUserStore;
use chatstream_api::UserService;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_sessions::MemoryStore;
use uuid::Uuid;

fn test_app() -> Router {
    let hasher = PasswordHasher::from_settings(&PasswordSettings {
        memory_kib: 256,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap();
    let service = UserService::new(MemoryUserStore::new(), hasher);
    let session = SessionSettings {
        cookie_name: "chatstream.sid".to_string(),
        secure: false,
        inactivity_days: 7,
    };
    chatstream_server::app(service, MemoryStore::default(), &session)
}

struct TestResponse {
    status: StatusCode,
    cookie: Option<String>,
    body: Value,
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    TestResponse { status, cookie, body }
}

fn post_json(uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn register(app: &Router, username: &str, email: &str, password: &str) -> TestResponse {
    send(
        app,
        post_json(
            "/register",
            json!({ "username": username, "email": email, "password": password }),
            None,
        ),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> TestResponse {
    send(
        app,
        post_json("/login", json!({ "email": email, "password": password }), None),
    )
    .await
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let res = send(&app, get("/health", None)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, Value::String("OK".into()));
}

#[tokio::test]
async fn test_register_returns_identity() {
    let app = test_app();
    let res = register(&app, "alice", "a@x.com", "pw1").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["username"], "alice");
    assert_eq!(res.body["email"], "a@x.com");
    assert_eq!(res.body["serverIds"], json!([]));
    assert!(Uuid::parse_str(res.body["id"].as_str().unwrap()).is_ok());
    assert!(res.body.get("password").is_none());
    assert!(res.cookie.is_none());
}

#[tokio::test]
async fn test_register_conflicts() {
    let app = test_app();
    register(&app, "alice", "a@x.com", "pw1").await;

    let res = register(&app, "bob", "a@x.com", "pw2").await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["status"], 409);

    let res = register(&app, "alice", "b@x.com", "pw2").await;
    assert_eq!(res.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let app = test_app();
    let res = register(&app, "alice", "no-at-sign", "pw1").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_binds_session() {
    let app = test_app();
    let registered = register(&app, "alice", "a@x.com", "pw1").await;

    let res = login(&app, "a@x.com", "pw1").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, registered.body);
    let cookie = res.cookie.expect("login sets a session cookie");
    assert!(cookie.starts_with("chatstream.sid="));

    let me = send(&app, get("/authentication", Some(&cookie))).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body, registered.body);
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let app = test_app();
    register(&app, "alice", "a@x.com", "pw1").await;

    let wrong = login(&app, "a@x.com", "wrong").await;
    let unknown = login(&app, "nobody@x.com", "pw1").await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, unknown.body);
    assert!(wrong.cookie.is_none());
}

#[tokio::test]
async fn test_authentication_requires_session() {
    let app = test_app();
    let res = send(&app, get("/authentication", None)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = test_app();
    register(&app, "alice", "a@x.com", "pw1").await;
    let cookie = login(&app, "a@x.com", "pw1").await.cookie.unwrap();

    let res = send(&app, post_json("/logout", json!({}), Some(&cookie))).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = send(&app, get("/authentication", Some(&cookie))).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user() {
    let app = test_app();
    let alice = register(&app, "alice", "a@x.com", "pw1").await.body;
    let id = alice["id"].as_str().unwrap();

    let res = send(&app, get(&format!("/user/{id}"), None)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "id": id, "username": "alice" }));

    let res = send(&app, get(&format!("/user/{}", Uuid::now_v7()), None)).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(res.body, Value::Null);

    let res = send(&app, get("/user/not-a-uuid", None)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["status"], 400);
}

#[tokio::test]
async fn test_get_users_drops_unknown_ids() {
    let app = test_app();
    let alice = register(&app, "alice", "a@x.com", "pw1").await.body;
    let bob = register(&app, "bob", "b@x.com", "pw2").await.body;
    let (a, b) = (alice["id"].as_str().unwrap(), bob["id"].as_str().unwrap());

    let uri = format!("/users?ids={a},{b},{}", Uuid::now_v7());
    let res = send(&app, get(&uri, None)).await;
    assert_eq!(res.status, StatusCode::OK);

    let mut users = res.body.as_array().unwrap().clone();
    users.sort_by_key(|u| u["username"].as_str().unwrap().to_string());
    assert_eq!(
        users,
        vec![
            json!({ "id": a, "username": "alice" }),
            json!({ "id": b, "username": "bob" }),
        ]
    );

    let res = send(&app, get("/users?ids=nope", None)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_incomplete_body_gets_json_error() {
    let app = test_app();

    let res = send(&app, post_json("/login", json!({ "email": "a@x.com" }), None)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["status"], 400);
    assert!(res.body["error"].is_string());

    let malformed = Request::builder()
        .method(Method::POST)
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"username\":"))
        .unwrap();
    let res = send(&app, malformed).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["status"], 400);
}

#[tokio::test]
async fn test_get_users_accepts_repeated_ids() {
    let app = test_app();
    let alice = register(&app, "alice", "a@x.com", "pw1").await.body;
    let bob = register(&app, "bob", "b@x.com", "pw2").await.body;
    let carol = register(&app, "carol", "c@x.com", "pw3").await.body;
    let (a, b, c) = (
        alice["id"].as_str().unwrap(),
        bob["id"].as_str().unwrap(),
        carol["id"].as_str().unwrap(),
    );

    let res = send(&app, get(&format!("/users?ids={a}&ids={b}"), None)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body.as_array().unwrap().len(), 2);

    let res = send(&app, get(&format!("/users?ids={a},{b}&ids={c}"), None)).await;
    assert_eq!(res.status, StatusCode::OK);
    let mut names: Vec<_> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    assert_eq!(names, ["alice", "bob", "carol"]);

    let res = send(&app, get("/users", None)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["status"], 400);
}
