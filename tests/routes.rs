mod common;

use std::sync::Arc;

use reqwest::{Client, StatusCode, multipart};
use serde_json::{Value, json};

use auction_desk::{AppState, app::build_router, config::Settings};

use common::{FakeApi, gold_pool};

async fn serve(api: Arc<FakeApi>) -> String {
    let settings = Settings::from_lookup(|key| match key {
        "BASE_PATH" => Some("/cup".to_string()),
        _ => None,
    });
    let state = AppState::new(settings, api);
    state.owners.ensure_loaded().await;
    state.details.ensure_loaded().await;
    state.desk.reload_players().await.unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn operator_can_drive_the_auction() {
    let base = serve(gold_pool()).await;
    let client = Client::new();

    let view: Value = client
        .get(format!("{base}/auction"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["players"].as_array().unwrap().len(), 4);
    assert!(view["focused"].is_null());

    let view: Value = client
        .post(format!("{base}/auction/open/0"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["focused"]["player"]["name"], "A");
    assert_eq!(view["focused"]["hasNext"], true);

    let view: Value = client
        .post(format!("{base}/auction/key"))
        .json(&json!({"key": "ArrowUp"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["bid"], 1500);
    assert_eq!(view["bidDisplay"], "₹1,500");

    let view: Value = client
        .post(format!("{base}/auction/next"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view["focused"]["player"]["name"], "B");
}

#[tokio::test]
async fn out_of_range_and_unfocused_actions_are_rejected() {
    let base = serve(gold_pool()).await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/auction/open/42"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .post(format!("{base}/auction/assign/falcons"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "no player is open");
}

#[tokio::test]
async fn owners_are_listed_by_purse() {
    let base = serve(gold_pool()).await;
    let body: Value = reqwest::get(format!("{base}/owners"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<&str> = body["value"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["falcons", "tigers"]);
    assert_eq!(body["loading"], false);

    let squad: Value = reqwest::get(format!("{base}/owners/tigers/squad"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(squad["totalSpent"], 0);
    assert_eq!(squad["remainingPurse"], 40000);

    let missing = reqwest::get(format!("{base}/owners/ghost")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn player_lookup_and_assets() {
    let base = serve(gold_pool()).await;

    let player: Value = reqwest::get(format!("{base}/players/1000000003"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(player["name"], "B");

    let missing = reqwest::get(format!("{base}/players/5555555555")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let asset: Value = reqwest::get(format!("{base}/assets?path=/images/logo.png"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(asset["url"], "/cup/images/logo.png");
}

#[tokio::test]
async fn incomplete_registration_reports_fields() {
    let api = gold_pool();
    let base = serve(api.clone()).await;

    let form = multipart::Form::new()
        .text("name", "Ravi")
        .text("mobileNumber", "12345");
    let response = Client::new()
        .post(format!("{base}/register/player"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert!(body["fields"]["mobileNumber"].is_string());
    assert!(body["fields"]["profilePhoto"].is_string());
    assert!(body["fields"].get("name").is_none());
    assert_eq!(api.check_call_count(), 0);
}

#[tokio::test]
async fn empty_upload_is_reported_as_empty() {
    let base = serve(gold_pool()).await;

    let empty = multipart::Part::bytes(Vec::new())
        .file_name("me.png")
        .mime_str("image/png")
        .unwrap();
    let blank = multipart::Part::bytes(Vec::new())
        .file_name("")
        .mime_str("application/octet-stream")
        .unwrap();
    let form = multipart::Form::new()
        .text("name", "Ravi Kumar")
        .part("profilePhoto", empty)
        .part("idDocument", blank);
    let response = Client::new()
        .post(format!("{base}/register/player"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["fields"]["profilePhoto"], "Profile photo is empty");
    assert_eq!(body["fields"]["idDocument"], "ID document is required");
}

#[tokio::test]
async fn complete_registration_is_created() {
    let api = gold_pool();
    let base = serve(api.clone()).await;

    let file = |name: &str| {
        multipart::Part::bytes(vec![9u8; 512])
            .file_name(name.to_string())
            .mime_str("image/jpeg")
            .unwrap()
    };
    let form = multipart::Form::new()
        .text("name", "Ravi Kumar")
        .text("mobileNumber", "9000000001")
        .text("shirtName", "RAVI")
        .text("shirtSize", "XL")
        .text("shirtNumber", "7")
        .text("playingRole", "wicket-keeper")
        .part("profilePhoto", file("me.jpg"))
        .part("idDocument", file("id.jpg"))
        .part("paymentScreenshot", file("paid.jpg"));

    let response = Client::new()
        .post(format!("{base}/register/player"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["communityLink"], common::PLAYER_GROUP);

    let sent = api.player_registrations.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].shirt_size, "XL");
    assert_eq!(
        sent[0].profile_photo.as_ref().map(|f| f.file_name.as_str()),
        Some("me.jpg")
    );
}

#[tokio::test]
async fn visibility_toggles() {
    let base = serve(gold_pool()).await;
    let body: Value = Client::new()
        .put(format!("{base}/visibility"))
        .json(&json!({"visible": false}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["visible"], false);
}
