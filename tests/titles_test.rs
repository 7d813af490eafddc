//! Details view, player link, session and health endpoint tests.

mod common;

use common::{release_dates, watch_providers, TestHarness};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn get_json(url: String) -> (StatusCode, Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn movie_details_combine_metadata_quality_and_players() {
    let harness = TestHarness::new().await;
    harness
        .mock_json(
            "/movie/550",
            json!({
                "id": 550,
                "title": "Fight Club",
                "original_title": "Fight Club",
                "overview": "An insomniac office worker...",
                "release_date": "1999-10-15",
                "vote_average": 8.4,
                "vote_count": 30000,
                "runtime": 139,
                "genres": [{ "id": 18, "name": "Drama" }],
                "poster_path": "/fc.jpg",
                "backdrop_path": "/fc-bg.jpg"
            }),
        )
        .await;
    harness
        .mock_movie_release(
            550,
            release_dates(&[(3, "1999-10-15T00:00:00.000Z")]),
            watch_providers(&[]),
        )
        .await;
    let addr = harness.serve().await;

    let (status, body) = get_json(format!("http://{addr}/api/titles/movie/550")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Fight Club");
    assert_eq!(body["genres"], json!(["Drama"]));
    assert_eq!(body["runtime_minutes"], 139);
    assert_eq!(
        body["backdrop_url"],
        "https://image.tmdb.org/t/p/original/fc-bg.jpg"
    );
    assert_eq!(body["quality"]["label"], "hd");

    let players = body["players"].as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0]["name"], "Alpha");
    assert_eq!(players[0]["url"], "https://alpha.example/embed/movie/550");
    assert_eq!(players[1]["url"], "https://beta.example/movie?tmdb=550");
}

#[tokio::test]
async fn series_details_use_episode_selection() {
    let harness = TestHarness::new().await;
    harness
        .mock_json(
            "/tv/1399",
            json!({
                "id": 1399,
                "name": "Game of Thrones",
                "first_air_date": "2011-04-17",
                "episode_run_time": [60],
                "genres": []
            }),
        )
        .await;
    harness
        .mock_json("/tv/1399/release_dates", json!({ "id": 1399, "results": [] }))
        .await;
    harness
        .mock_json("/tv/1399/watch/providers", watch_providers(&["Max"]))
        .await;
    let addr = harness.serve().await;

    let (status, body) =
        get_json(format!("http://{addr}/api/titles/tv/1399?season=3&episode=9")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "tv");
    assert_eq!(body["release_date"], "2011-04-17");
    assert_eq!(body["runtime_minutes"], 60);
    assert_eq!(body["quality"]["label"], "streaming_hd");

    // Beta has no series template.
    let players = body["players"].as_array().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["url"], "https://alpha.example/embed/tv/1399/3/9");
}

#[tokio::test]
async fn details_survive_failed_quality_lookup() {
    let harness = TestHarness::new().await;
    harness
        .mock_json(
            "/movie/77",
            json!({ "id": 77, "title": "Memento", "release_date": "2000-10-11" }),
        )
        .await;
    harness.mock_status("/movie/77/release_dates", 500).await;
    harness.mock_status("/movie/77/watch/providers", 500).await;
    let addr = harness.serve().await;

    let (status, body) = get_json(format!("http://{addr}/api/titles/movie/77")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Memento");
    assert_eq!(body["quality"]["label"], "unknown_quality");
    assert_eq!(body["quality"]["color"], "gray");
}

#[tokio::test]
async fn missing_title_is_not_found() {
    let harness = TestHarness::new().await;
    harness.mock_status("/movie/999999", 404).await;
    let addr = harness.serve().await;

    let (status, body) = get_json(format!("http://{addr}/api/titles/movie/999999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn player_links_endpoints() {
    let (_harness, addr) = TestHarness::with_server().await;

    let (status, body) = get_json(format!("http://{addr}/api/players")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Alpha", "Beta"]));

    let (status, body) = get_json(format!("http://{addr}/api/titles/movie/603/players")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) =
        get_json(format!("http://{addr}/api/titles/tv/1396/players/alpha")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://alpha.example/embed/tv/1396/1/1");

    let (status, _) = get_json(format!("http://{addr}/api/titles/tv/1396/players/beta")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(format!("http://{addr}/api/titles/movie/603/players/gamma")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_reflects_headers() {
    let (_harness, addr) = TestHarness::with_server().await;

    let (status, body) = get_json(format!("http://{addr}/api/session")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"], Value::Null);
    assert_eq!(body["region"], "US");
    assert_eq!(body["signed_in"], false);

    let body: Value = reqwest::Client::new()
        .get(format!("http://{addr}/api/session"))
        .header("x-cinescope-user", "alice")
        .header("x-cinescope-region", "de")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["user"], "alice");
    assert_eq!(body["region"], "DE");
    assert_eq!(body["signed_in"], true);
}

#[tokio::test]
async fn health_endpoints() {
    let (_harness, addr) = TestHarness::with_server().await;

    let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, body) = get_json(format!("http://{addr}/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["grid_size"], 18);
}
