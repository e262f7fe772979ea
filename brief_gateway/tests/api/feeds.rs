use serde_json::{json, Value};

use crate::helpers::spawn_app;

fn feed_body(name: &str) -> Value {
    json!({
        "name": name,
        "interests": [{ "categoryId": "tech", "subcategoryIds": ["ai"] }],
    })
}

#[tokio::test]
async fn a_created_feed_is_listed() {
    let app = spawn_app().await;
    let user = app.signed_up_user("Ada").await;

    let feed = user
        .create_feed(
            &app,
            json!({
                "name": " Layoffs watch ",
                "interests": [{ "categoryId": "tech", "subcategoryIds": ["ai"] }],
                "context": "  Focus only on layoffs ",
                "timeframe": "7d",
            }),
        )
        .await;

    assert_eq!(feed["name"], "Layoffs watch");
    assert_eq!(feed["context"], "Focus only on layoffs");
    assert_eq!(feed["timeframe"], "7d");
    assert_eq!(feed["userId"], json!(user.id));

    let body: Value = user
        .get(&app, "/api/profile/feeds")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["feeds"], json!([feed]));
}

#[tokio::test]
async fn a_feed_defaults_to_the_last_24_hours_without_context() {
    let app = spawn_app().await;
    let user = app.signed_up_user("Ada").await;

    let feed = user
        .create_feed(
            &app,
            json!({
                "name": "Morning",
                "interests": [{ "categoryId": "tech", "subcategoryIds": ["ai"] }],
                "context": "   ",
            }),
        )
        .await;

    assert_eq!(feed["timeframe"], "24h");
    assert!(feed["context"].is_null());
}

#[tokio::test]
async fn feeds_are_listed_newest_first_and_only_for_their_owner() {
    let app = spawn_app().await;
    let ada = app.signed_up_user("Ada").await;
    let bob = app.signed_up_user("Bob").await;

    ada.create_feed(&app, feed_body("First")).await;
    ada.create_feed(&app, feed_body("Second")).await;
    bob.create_feed(&app, feed_body("Bob's")).await;

    let body: Value = ada
        .get(&app, "/api/profile/feeds")
        .await
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = body["feeds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|feed| feed["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["Second", "First"]);
}

#[tokio::test]
async fn invalid_feeds_are_rejected_with_a_400() {
    let app = spawn_app().await;
    let user = app.signed_up_user("Ada").await;
    let cases = [
        (
            json!({ "interests": [{ "categoryId": "tech", "subcategoryIds": ["ai"] }] }),
            "missing name",
        ),
        (
            json!({ "name": "  ", "interests": [{ "categoryId": "tech", "subcategoryIds": [] }] }),
            "blank name",
        ),
        (json!({ "name": "Morning", "interests": [] }), "empty interests"),
        (
            json!({ "name": "Morning", "interests": [{ "categoryId": "tech" }], "timeframe": "1y" }),
            "unknown timeframe",
        ),
        (
            json!({ "name": "Morning", "interests": [{ "categoryId": "tech" }], "color": "red" }),
            "unknown field",
        ),
    ];

    for (body, description) in cases {
        let response = user.post(&app, "/api/profile/feeds", &body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with a 400 for {}",
            description
        );
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string(), "No error for {}", description);
    }
    assert!(app.feeds.all().is_empty());
}

#[tokio::test]
async fn a_feed_can_be_deleted_by_its_owner() {
    let app = spawn_app().await;
    let user = app.signed_up_user("Ada").await;
    let feed = user.create_feed(&app, feed_body("Morning")).await;

    let response = user
        .delete(&app, &format!("/api/profile/feeds/{}", feed["id"]))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));
    assert!(app.feeds.all().is_empty());
}

#[tokio::test]
async fn deleting_a_missing_or_foreign_feed_is_a_successful_no_op() {
    let app = spawn_app().await;
    let ada = app.signed_up_user("Ada").await;
    let bob = app.signed_up_user("Bob").await;
    let feed = ada.create_feed(&app, feed_body("Morning")).await;

    for path in [
        format!("/api/profile/feeds/{}", feed["id"]),
        "/api/profile/feeds/4242".to_string(),
    ] {
        let response = bob.delete(&app, &path).await;

        assert_eq!(200, response.status().as_u16());
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "success": true }));
    }
    assert_eq!(app.feeds.all().len(), 1);
}

#[tokio::test]
async fn a_non_numeric_feed_id_is_rejected_with_a_400() {
    let app = spawn_app().await;
    let user = app.signed_up_user("Ada").await;

    let response = user.delete(&app, "/api/profile/feeds/morning").await;

    assert_eq!(400, response.status().as_u16());
}
