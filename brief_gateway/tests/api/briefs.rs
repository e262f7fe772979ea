use brief_gateway::{domain::entities::brief::NewBrief, ports::brief_repository::BriefRepository};
use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;

use crate::helpers::{spawn_app, TestApp};

async fn add_brief(app: &TestApp, user_id: Uuid, date: NaiveDate, transcript: &str) -> i64 {
    app.briefs
        .add(
            NewBrief::builder()
                .user_id(user_id)
                .date(date)
                .transcript(transcript.to_string())
                .audio_url(format!("/audio/{}.mp3", Uuid::new_v4()))
                .build(),
        )
        .await
        .unwrap()
        .id
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, day).unwrap()
}

#[tokio::test]
async fn briefs_are_listed_newest_first_and_only_for_their_owner() {
    let app = spawn_app().await;
    let ada = app.signed_up_user("Ada").await;
    let bob = app.signed_up_user("Bob").await;
    add_brief(&app, ada.id, date(17), "older").await;
    add_brief(&app, ada.id, date(19), "newest").await;
    add_brief(&app, ada.id, date(18), "middle").await;
    add_brief(&app, bob.id, date(20), "bob's").await;

    let response = ada.get(&app, "/api/brief").await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    let transcripts: Vec<&str> = body["briefs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|brief| brief["transcript"].as_str().unwrap())
        .collect();
    assert_eq!(transcripts, vec!["newest", "middle", "older"]);
}

#[tokio::test]
async fn at_most_50_briefs_are_listed() {
    let app = spawn_app().await;
    let user = app.signed_up_user("Ada").await;
    for i in 0..55 {
        add_brief(&app, user.id, date(1 + i % 28), "brief").await;
    }

    let body: Value = user.get(&app, "/api/brief").await.json().await.unwrap();

    assert_eq!(body["briefs"].as_array().unwrap().len(), 50);
}

#[tokio::test]
async fn a_brief_is_returned_to_its_owner() {
    let app = spawn_app().await;
    let user = app.signed_up_user("Ada").await;
    let id = add_brief(&app, user.id, date(19), "hello").await;

    let response = user.get(&app, &format!("/api/brief/{}", id)).await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], id);
    assert_eq!(body["transcript"], "hello");
    assert_eq!(body["date"], "2024-10-19");
    assert_eq!(body["status"], "completed");
    assert!(body["feedId"].is_null());
}

#[tokio::test]
async fn a_brief_of_another_user_is_not_found() {
    let app = spawn_app().await;
    let ada = app.signed_up_user("Ada").await;
    let bob = app.signed_up_user("Bob").await;
    let id = add_brief(&app, ada.id, date(19), "ada's secret").await;

    for path in [format!("/api/brief/{}", id), "/api/brief/4242".to_string()] {
        let response = bob.get(&app, &path).await;

        assert_eq!(404, response.status().as_u16());
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Not found");
    }
}
