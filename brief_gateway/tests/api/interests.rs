use serde_json::Value;

use crate::helpers::spawn_app;

#[tokio::test]
async fn the_catalog_is_public() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(app.url("/api/interests"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(200, response.status().as_u16());

    let body: Value = response.json().await.unwrap();
    let categories = body["categories"].as_array().unwrap();
    let finance = categories
        .iter()
        .find(|category| category["id"] == "finance")
        .expect("Missing finance category");

    assert!(finance["subcategories"]
        .as_array()
        .unwrap()
        .iter()
        .any(|subcategory| subcategory["id"] == "ma"));
}
