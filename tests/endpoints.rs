mod common;

use common::{spawn_app, TestApp};
use reqwest::{Response, StatusCode};
use serde_json::Value;

async fn get(app: &TestApp, path: &str) -> Response {
    app.client.get(app.url(path)).send().await.unwrap()
}

#[tokio::test]
async fn health_check_is_alive() {
    let app = spawn_app().await;
    let response = get(&app, "/check_health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "alive");
}

#[tokio::test]
async fn serves_topics() {
    let app = spawn_app().await;
    let response = get(&app, "/api/topics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    let topics = body["topics"].as_array().unwrap();
    assert_eq!(topics.len(), 3);
    for topic in topics {
        assert!(topic["slug"].is_string());
        assert!(topic["description"].is_string());
    }
    let mitch = topics.iter().find(|t| t["slug"] == "mitch").unwrap();
    assert_eq!(mitch["description"], "The man, the Mitch, the legend");
}

#[tokio::test]
async fn serves_users() {
    let app = spawn_app().await;
    let response = get(&app, "/api/users").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 4);
    for user in users {
        assert!(user["username"].is_string());
        assert!(user["name"].is_string());
        assert!(user["avatar_url"].is_string());
    }
}

#[tokio::test]
async fn describes_every_endpoint() {
    let app = spawn_app().await;
    let response = get(&app, "/api").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["GET /api"]["description"],
        "serves up a json representation of all the available endpoints of the api"
    );
    for route in [
        "GET /api/topics",
        "GET /api/articles",
        "GET /api/articles/:article_id",
        "PATCH /api/articles/:article_id",
        "GET /api/articles/:article_id/comments",
        "POST /api/articles/:article_id/comments",
        "DELETE /api/comments/:comment_id",
        "GET /api/users",
    ] {
        assert!(body[route]["description"].is_string(), "{route}");
        assert!(body[route]["queries"].is_array(), "{route}");
    }
    assert_eq!(
        body["GET /api/articles"]["queries"],
        serde_json::json!(["topic", "sort_by", "order"])
    );
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let app = spawn_app().await;
    let response = get(&app, "/api/not-a-route").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert!(body["msg"].as_str().unwrap().contains("/api/not-a-route"));
}
