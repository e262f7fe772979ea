use brief_gateway::{domain::entities::brief::NewBrief, ports::brief_repository::BriefRepository};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::helpers::{spawn_app, TestApp};

async fn add_brief(app: &TestApp, user_id: Uuid) -> i64 {
    app.briefs
        .add(
            NewBrief::builder()
                .user_id(user_id)
                .transcript("BRIEF TEXT".to_string())
                .audio_url("/audio/test.mp3".to_string())
                .build(),
        )
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn feedback_on_an_own_brief_is_stored_and_indexed() {
    let app = spawn_app().await;
    let user = app.signed_up_user("Ada").await;
    let brief_id = add_brief(&app, user.id).await;

    let response = user
        .post(
            &app,
            "/api/feedback",
            &json!({
                "briefId": brief_id,
                "rating": 4,
                "likes": "more on chips",
                "dislikes": "less crypto",
            }),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));

    let stored = app.feedback.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].rating, Some(4));
    assert_eq!(stored[0].brief_id, brief_id);

    let documents = app.vector_index.documents();
    let contents: Vec<&str> = documents
        .iter()
        .map(|(_, document)| document.content.as_str())
        .collect();
    assert_eq!(
        contents,
        vec![
            "USER_FEEDBACK_LIKES: more on chips",
            "USER_FEEDBACK_DISLIKES: less crypto"
        ]
    );
    assert!(documents.iter().all(|(user_id, document)| {
        *user_id == Some(user.id)
            && document.metadata == json!({ "type": "feedback", "briefId": brief_id })
    }));
}

#[tokio::test]
async fn a_rating_only_feedback_is_not_indexed() {
    let app = spawn_app().await;
    let user = app.signed_up_user("Ada").await;
    let brief_id = add_brief(&app, user.id).await;

    let response = user
        .post(&app, "/api/feedback", &json!({ "briefId": brief_id, "rating": 5 }))
        .await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.feedback.all().len(), 1);
    assert!(app.vector_index.documents().is_empty());
}

#[tokio::test]
async fn invalid_feedback_is_rejected_with_a_400() {
    let app = spawn_app().await;
    let user = app.signed_up_user("Ada").await;
    let brief_id = add_brief(&app, user.id).await;
    let cases = [
        (json!({ "briefId": brief_id, "rating": 6 }), "rating above 5"),
        (json!({ "briefId": brief_id, "rating": 0 }), "rating below 1"),
        (json!({ "briefId": brief_id }), "empty feedback"),
        (json!({ "rating": 3 }), "missing brief id"),
    ];

    for (body, description) in cases {
        let response = user.post(&app, "/api/feedback", &body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with a 400 for {}",
            description
        );
    }
    assert!(app.feedback.all().is_empty());
}

#[tokio::test]
async fn feedback_on_a_brief_of_another_user_is_not_found() {
    let app = spawn_app().await;
    let ada = app.signed_up_user("Ada").await;
    let bob = app.signed_up_user("Bob").await;
    let brief_id = add_brief(&app, ada.id).await;

    let response = bob
        .post(&app, "/api/feedback", &json!({ "briefId": brief_id, "rating": 1 }))
        .await;

    assert_eq!(404, response.status().as_u16());
    assert!(app.feedback.all().is_empty());
}
