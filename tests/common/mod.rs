//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::response::IntoResponse;
use item_board::config::{AppConfig, SessionConfig};
use item_board::session::{SessionData, SessionManager};
use item_board::{HttpServer, Shutdown};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{LOCATION, SET_COOKIE};
use reqwest::redirect::Policy;
use reqwest::Url;
use tokio::net::TcpListener;

pub const TEST_SECRET: &str = "integration-test-secret";

/// A server running on an ephemeral port; stopped on drop.
pub struct TestApp {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.session.secret_key = TEST_SECRET.into();
    config
}

pub async fn spawn_app(config: AppConfig) -> TestApp {
    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestApp { addr, shutdown }
}

/// `Set-Cookie` header for `data` signed with `secret`.
pub fn signed_session_cookie(secret: &str, data: &SessionData) -> String {
    let manager = SessionManager::new(&SessionConfig {
        secret_key: secret.into(),
        ..SessionConfig::default()
    });
    let response = (manager.issue(data), ()).into_response();
    response.headers()[SET_COOKIE].to_str().unwrap().to_string()
}

/// A browser-like client with its own cookie store.
///
/// Redirects are not followed so tests can check them.
pub struct Visitor {
    client: reqwest::Client,
    jar: Arc<Jar>,
}

impl Visitor {
    pub fn new() -> Self {
        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .redirect(Policy::none())
            .pool_max_idle_per_host(0)
            .no_proxy()
            .build()
            .unwrap();
        Self { client, jar }
    }

    /// The `Cookie` header this visitor would send to `url`.
    pub fn cookies(&self, url: &str) -> Option<String> {
        let url = Url::parse(url).unwrap();
        self.jar
            .cookies(&url)
            .map(|h| h.to_str().unwrap().to_string())
    }

    /// Store a cookie as if `url` had sent it in `Set-Cookie`.
    pub fn add_cookie(&self, set_cookie: &str, url: &str) {
        self.jar.add_cookie_str(set_cookie, &Url::parse(url).unwrap());
    }

    pub async fn get(&self, url: &str) -> reqwest::Response {
        self.client.get(url).send().await.expect("server unreachable")
    }

    /// GET a page and return its list entries.
    pub async fn entries(&self, url: &str) -> Vec<String> {
        let response = self.get(url).await;
        assert_eq!(response.status(), 200);
        list_entries(&response.text().await.unwrap())
    }

    /// POST the add-item form; returns the redirect target.
    pub async fn add(&self, url: &str, item: Option<&str>) -> String {
        let request = match item {
            Some(item) => self.client.post(url).form(&[("item", item)]),
            None => self.client.post(url).form(&[] as &[(&str, &str)]),
        };
        let response = request.send().await.expect("server unreachable");
        assert_eq!(response.status(), 303);
        response
            .headers()
            .get(LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    /// POST with a hand-built body.
    pub async fn post_with(
        &self,
        url: &str,
        build: impl FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder,
    ) -> reqwest::Response {
        build(self.client.post(url))
            .send()
            .await
            .expect("server unreachable")
    }
}

/// Text of every `<li>` in a rendered page, in order.
pub fn list_entries(html: &str) -> Vec<String> {
    html.lines()
        .map(str::trim)
        .filter_map(|l| l.strip_prefix("<li>")?.strip_suffix("</li>"))
        .map(str::to_string)
        .collect()
}
