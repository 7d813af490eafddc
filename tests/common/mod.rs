//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which stands up a `wiremock` TMDB, points a
//! default config at it, and builds the full [`AppContext`]. The
//! [`TestHarness::with_server`] constructor starts Axum on a random port for
//! HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cinescope::config::{Config, PlayerConfig};
use cinescope::metadata::{MetadataProvider, TmdbProvider};
use cinescope::quality::FixedClock;
use cinescope::server::{create_router, AppContext};

pub const API_KEY: &str = "test-key";

/// The instant every harness clock is frozen at.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
}

/// Config pointing at `tmdb` with two embed players.
pub fn test_config(tmdb: &MockServer) -> Config {
    let mut config = Config::default();
    config.tmdb.base_url = tmdb.uri();
    config.tmdb.api_key = API_KEY.to_string();
    config.tmdb.requests_per_second = 1000;
    config.tmdb.request_timeout_secs = 5;
    config.players = vec![
        PlayerConfig {
            name: "Alpha".to_string(),
            movie_url: "https://alpha.example/embed/movie/{id}".to_string(),
            tv_url: Some("https://alpha.example/embed/tv/{id}/{season}/{episode}".to_string()),
        },
        PlayerConfig {
            name: "Beta".to_string(),
            movie_url: "https://beta.example/movie?tmdb={id}".to_string(),
            tv_url: None,
        },
    ];
    config
}

/// Test harness wrapping a fully-constructed [`AppContext`] backed by a
/// mock TMDB.
pub struct TestHarness {
    pub ctx: AppContext,
    pub tmdb: MockServer,
}

impl TestHarness {
    pub async fn new() -> Self {
        let tmdb = MockServer::start().await;
        let config = test_config(&tmdb);
        Self::with_config(tmdb, config)
    }

    pub fn with_config(tmdb: MockServer, config: Config) -> Self {
        let provider: Arc<dyn MetadataProvider> =
            Arc::new(TmdbProvider::new(&config.tmdb).expect("failed to build provider"));
        let mut ctx = AppContext::new(config, provider);
        ctx.catalog = ctx.catalog.with_clock(Arc::new(FixedClock(now())));
        Self { ctx, tmdb }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new().await;
        let addr = harness.serve().await;
        (harness, addr)
    }

    /// Serve this harness's context on a random port.
    pub async fn serve(&self) -> SocketAddr {
        let app = create_router(self.ctx.clone(), None);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        addr
    }

    /// Mount a JSON response for `GET route` on the mock TMDB.
    pub async fn mock_json(&self, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.tmdb)
            .await;
    }

    /// Mount a bare status response for `GET route`.
    pub async fn mock_status(&self, route: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.tmdb)
            .await;
    }

    /// Release dates and watch providers for a movie.
    pub async fn mock_movie_release(&self, id: u64, release_dates: Value, providers: Value) {
        self.mock_json(&format!("/movie/{id}/release_dates"), release_dates)
            .await;
        self.mock_json(&format!("/movie/{id}/watch/providers"), providers)
            .await;
    }
}

/// `release_dates` body with a single US region.
pub fn release_dates(events: &[(u8, &str)]) -> Value {
    let dates: Vec<Value> = events
        .iter()
        .map(|(kind, date)| json!({ "certification": "", "release_date": date, "type": kind }))
        .collect();
    json!({ "id": 1, "results": [{ "iso_3166_1": "US", "release_dates": dates }] })
}

/// `watch/providers` body listing `flatrate` services for the US.
pub fn watch_providers(flatrate: &[&str]) -> Value {
    let services: Vec<Value> = flatrate
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "provider_id": i, "provider_name": name }))
        .collect();
    json!({ "id": 1, "results": { "US": { "link": "https://example.test", "flatrate": services } } })
}

/// One list item as TMDB returns it.
pub fn list_item(id: u64, title: &str, release_date: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "overview": format!("About {title}"),
        "release_date": release_date,
        "vote_average": 7.5,
        "vote_count": 1200,
        "poster_path": format!("/poster{id}.jpg"),
        "backdrop_path": null
    })
}

/// A list page of `count` items, all released on `release_date`.
pub fn list_page(page: u32, count: u64, release_date: &str) -> Value {
    let results: Vec<Value> = (1..=count)
        .map(|id| list_item(id, &format!("Title {id}"), release_date))
        .collect();
    json!({
        "page": page,
        "total_pages": 42,
        "total_results": 840,
        "results": results
    })
}
