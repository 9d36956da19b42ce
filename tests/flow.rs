use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use reqwest::header::{COOKIE, LOCATION, SET_COOKIE};
use reqwest::{Url, redirect::Policy};
use serde_json::{Value, json};

use login_server::auth::{CodeExchanger, ExchangeError, HttpExchanger};
use login_server::models::{AppConfig, AppState};

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .unwrap();
    });
    addr
}

async fn exchange_backend(Json(body): Json<Value>) -> Json<Value> {
    if body.get("code").and_then(Value::as_str) == Some("good-code") {
        Json(json!({"success": true, "user": {"name": "Ada", "email": "ada@example.com"}}))
    } else {
        Json(json!({"success": false}))
    }
}

fn exchanger_for(addr: SocketAddr) -> HttpExchanger {
    let endpoint = Url::parse(&format!("http://{addr}/auth/google/callback")).unwrap();
    HttpExchanger::new(reqwest::Client::new(), endpoint)
}

#[tokio::test]
async fn http_exchanger_posts_the_code_and_parses_the_verdict() {
    let addr = serve(Router::new().route("/auth/google/callback", post(exchange_backend))).await;

    let response = exchanger_for(addr).exchange("good-code").await.unwrap();
    assert!(response.success);
    assert_eq!(response.user.unwrap().name, "Ada");

    let response = exchanger_for(addr).exchange("stale-code").await.unwrap();
    assert!(!response.success);
}

#[tokio::test]
async fn http_exchanger_maps_non_2xx_to_a_status_error() {
    let addr = serve(Router::new().route(
        "/auth/google/callback",
        post(|| async { StatusCode::BAD_GATEWAY }),
    ))
    .await;

    match exchanger_for(addr).exchange("good-code").await {
        Err(ExchangeError::Status(status)) => assert_eq!(status, StatusCode::BAD_GATEWAY),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_exchanger_rejects_unparseable_bodies() {
    let addr = serve(Router::new().route(
        "/auth/google/callback",
        post(|| async { "this is not json" }),
    ))
    .await;

    assert!(matches!(
        exchanger_for(addr).exchange("good-code").await,
        Err(ExchangeError::Malformed(_))
    ));
}

#[tokio::test]
async fn http_exchanger_surfaces_transport_failures() {
    // Bind and immediately drop to get an address nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    assert!(matches!(
        exchanger_for(addr).exchange("good-code").await,
        Err(ExchangeError::Transport(_))
    ));
}

fn test_config(backend: SocketAddr) -> AppConfig {
    AppConfig {
        client_id: "test-client".to_string(),
        redirect_url: "http://localhost:10000/auth/callback".to_string(),
        scope: "openid email profile".to_string(),
        auth_url: Url::parse("https://accounts.google.com/o/oauth2/v2/auth").unwrap(),
        exchange_url: Url::parse(&format!("http://{backend}/auth/google/callback")).unwrap(),
    }
}

async fn serve_app(backend: SocketAddr) -> SocketAddr {
    let config = test_config(backend);
    let exchanger = HttpExchanger::new(reqwest::Client::new(), config.exchange_url.clone());
    serve(login_server::app(AppState { config, exchanger })).await
}

fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn full_google_login_flow_over_http() {
    let backend = serve(Router::new().route("/auth/google/callback", post(exchange_backend))).await;
    let app = serve_app(backend).await;
    let client = no_redirect_client();

    // Initiate: the redirect carries the state, the cookie carries the slot.
    let start = client
        .get(format!("http://{app}/auth/google"))
        .send()
        .await
        .unwrap();
    assert_eq!(start.status(), StatusCode::SEE_OTHER);
    let cookie = start
        .headers()
        .get(SET_COOKIE)
        .expect("session cookie should be set before the redirect")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();
    let location = start.headers().get(LOCATION).unwrap().to_str().unwrap();
    assert!(location.starts_with("https://accounts.google.com/o/oauth2/v2/auth"));
    let auth_url = Url::parse(location).unwrap();
    let state = auth_url
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    assert!(location.contains("prompt=consent"));

    // Complete: same session, matching state, valid code.
    let done = client
        .get(format!("http://{app}/auth/callback"))
        .query(&[("code", "good-code"), ("state", state.as_str())])
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(done.status(), StatusCode::OK);
    let body = done.text().await.unwrap();
    assert!(body.contains("Welcome Ada!"), "body was: {body}");
    assert!(body.contains(r#"content="0;url=/""#));

    // Bootstrap greeting on the next plain page load.
    let home = client
        .get(format!("http://{app}/"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    let body = home.text().await.unwrap();
    assert!(body.contains("Welcome back, Ada!"), "body was: {body}");
}

#[tokio::test]
async fn forged_state_is_ignored_over_http() {
    let backend = serve(Router::new().route("/auth/google/callback", post(exchange_backend))).await;
    let app = serve_app(backend).await;
    let client = no_redirect_client();

    let start = client
        .get(format!("http://{app}/auth/google"))
        .send()
        .await
        .unwrap();
    let cookie = start
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    // Wrong state: silently treated as a plain page load and sent home.
    let done = client
        .get(format!("http://{app}/auth/callback"))
        .query(&[("code", "good-code"), ("state", "forged")])
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(done.status(), StatusCode::SEE_OTHER);
    assert_eq!(done.headers().get(LOCATION).unwrap(), "/");

    // And the session never became signed in.
    let home = client
        .get(format!("http://{app}/"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert!(!home.text().await.unwrap().contains("Welcome back"));
}

#[tokio::test]
async fn local_login_validates_and_signs_in() {
    let backend = serve(Router::new().route("/auth/google/callback", post(exchange_backend))).await;
    let app = serve_app(backend).await;
    let client = no_redirect_client();

    let invalid = client
        .post(format!("http://{app}/login"))
        .form(&[("email", "not-an-email"), ("password", "short")])
        .send()
        .await
        .unwrap();
    let body = invalid.text().await.unwrap();
    assert!(body.contains("Invalid email address"));
    assert!(body.contains("Password must be 8+ characters"));

    let valid = client
        .post(format!("http://{app}/login"))
        .form(&[("email", "ada@example.com"), ("password", "longenough")])
        .send()
        .await
        .unwrap();
    let cookie = valid
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();
    let body = valid.text().await.unwrap();
    assert!(body.contains("Login successful! Redirecting..."));

    let home = client
        .get(format!("http://{app}/"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert!(
        home.text()
            .await
            .unwrap()
            .contains("Welcome back, ada@example.com!")
    );
}
