use serde_json::{json, Value};

use crate::helpers::{spawn_app, TEST_PASSWORD};

#[tokio::test]
async fn a_valid_sign_up_opens_a_session() {
    let app = spawn_app().await;
    let client = app.new_client();

    let response = app
        .sign_up(
            &client,
            &json!({ "name": "Ada", "email": "Ada@Example.com", "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
    assert!(response
        .cookies()
        .any(|cookie| cookie.name() == "brief_session" && cookie.http_only()));
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["name"], "Ada");

    let session: Value = client
        .get(app.url("/api/auth/get-session"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(session["user"]["email"], "ada@example.com");
    assert!(session["session"]["expiresAt"].is_string());
}

#[tokio::test]
async fn sign_up_with_an_already_used_email_returns_a_422() {
    let app = spawn_app().await;
    let body = json!({ "name": "Ada", "email": "ada@example.com", "password": TEST_PASSWORD });
    app.sign_up(&app.new_client(), &body).await;

    let response = app.sign_up(&app.new_client(), &body).await;

    assert_eq!(422, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn sign_up_with_invalid_data_returns_a_400() {
    let app = spawn_app().await;
    let cases = [
        (
            json!({ "name": "Ada", "email": "not-an-email", "password": TEST_PASSWORD }),
            "invalid email",
        ),
        (
            json!({ "name": "Ada", "email": "ada@example.com", "password": "short" }),
            "short password",
        ),
        (
            json!({ "name": "  ", "email": "ada@example.com", "password": TEST_PASSWORD }),
            "blank name",
        ),
    ];

    for (body, description) in cases {
        let response = app.sign_up(&app.new_client(), &body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with a 400 for {}",
            description
        );
        let body: Value = response.json().await.unwrap();
        assert!(body["message"].is_string(), "No message for {}", description);
    }
}

#[tokio::test]
async fn sign_in_with_valid_credentials_opens_a_session() {
    let app = spawn_app().await;
    let user = app.signed_up_user("Ada").await;
    let client = app.new_client();

    let response = app
        .sign_in(
            &client,
            &json!({ "email": user.email, "password": TEST_PASSWORD }),
        )
        .await;
    assert_eq!(200, response.status().as_u16());

    let response = client.get(app.url("/api/profile")).send().await.unwrap();
    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn sign_in_does_not_tell_a_wrong_password_from_an_unknown_email() {
    let app = spawn_app().await;
    let user = app.signed_up_user("Ada").await;

    let wrong_password = app
        .sign_in(
            &app.new_client(),
            &json!({ "email": user.email, "password": "not the password" }),
        )
        .await;
    let unknown_email = app
        .sign_in(
            &app.new_client(),
            &json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }),
        )
        .await;

    for response in [wrong_password, unknown_email] {
        assert_eq!(401, response.status().as_u16());
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Invalid email or password");
    }
}

#[tokio::test]
async fn sign_out_ends_the_session() {
    let app = spawn_app().await;
    let user = app.signed_up_user("Ada").await;

    let response = user.post(&app, "/api/auth/sign-out", &json!({})).await;
    assert_eq!(200, response.status().as_u16());

    let session: Value = user
        .get(&app, "/api/auth/get-session")
        .await
        .json()
        .await
        .unwrap();
    assert!(session.is_null());
    assert_eq!(401, user.get(&app, "/api/profile").await.status().as_u16());
}

#[tokio::test]
async fn get_session_without_credential_returns_null() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(app.url("/api/auth/get-session"))
        .send()
        .await
        .unwrap();

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn protected_routes_reject_requests_without_a_valid_session() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let requests = [
        client.get(app.url("/api/profile")),
        client.post(app.url("/api/profile")).json(&json!({ "interests": [] })),
        client.get(app.url("/api/profile/feeds")),
        client.delete(app.url("/api/profile/feeds/1")),
        client.get(app.url("/api/brief")),
        client.get(app.url("/api/brief/1")),
        client.post(app.url("/api/brief/generate")).json(&json!({})),
        client.post(app.url("/api/feedback")).json(&json!({ "briefId": 1 })),
        client.get(app.url("/api/brief")).bearer_auth("not-a-token"),
    ];

    for request in requests {
        let response = request.send().await.expect("Failed to execute request");

        assert_eq!(401, response.status().as_u16());
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn a_bearer_token_is_accepted() {
    let app = spawn_app().await;
    let body: Value = app
        .sign_up(
            &app.new_client(),
            &json!({ "name": "Ada", "email": "ada@example.com", "password": TEST_PASSWORD }),
        )
        .await
        .json()
        .await
        .unwrap();
    let token = body["token"].as_str().unwrap();

    let response = reqwest::Client::new()
        .get(app.url("/api/profile"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(200, response.status().as_u16());
}
