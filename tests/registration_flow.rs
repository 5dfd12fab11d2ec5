mod common;

use std::sync::Arc;
use std::time::Duration;

use auction_desk::dto::registration_dto::{
    MobileStatus, OwnerRegistration, PlayerRegistration, UploadFile,
};
use auction_desk::error::RegistrationError;
use auction_desk::services::provider::details_provider;
use auction_desk::services::registration::Registration;

use common::{FakeApi, PLAYER_GROUP, image, valid_player_form};

async fn desk(api: Arc<FakeApi>) -> Registration {
    let details = Arc::new(details_provider(api.clone()));
    details.ensure_loaded().await;
    Registration::new(api, details, Duration::from_millis(500))
}

fn registered(mobiles: &[&str]) -> Arc<FakeApi> {
    let api = Arc::new(FakeApi::default());
    api.registered_mobiles
        .lock()
        .unwrap()
        .extend(mobiles.iter().map(|m| m.to_string()));
    api
}

#[tokio::test]
async fn invalid_form_never_reaches_the_network() {
    let api = registered(&[]);
    let registration = desk(api.clone()).await;

    let mut form = valid_player_form("98765");
    form.payment_screenshot = None;
    let err = registration.submit_player(&form).await.unwrap_err();

    match err {
        RegistrationError::Invalid(fields) => {
            assert!(fields.contains_key("mobileNumber"));
            assert!(fields.contains_key("paymentScreenshot"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(api.check_call_count(), 0);
    assert!(api.player_registrations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_upload_blocks_submission() {
    let api = registered(&[]);
    let registration = desk(api.clone()).await;

    let mut form = valid_player_form("9876543210");
    form.id_document = Some(UploadFile::new(
        "scan.png",
        "image/png",
        vec![0u8; 6 * 1024 * 1024],
    ));
    assert!(matches!(
        registration.submit_player(&form).await,
        Err(RegistrationError::Invalid(_))
    ));
    assert_eq!(api.check_call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn mobile_check_is_debounced() {
    let api = registered(&["9876543210"]);
    let registration = desk(api.clone()).await;

    let partial = registration.mobile_input("98765").await;
    assert_eq!(partial.status, MobileStatus::Idle);

    let pending = registration.mobile_input("9876543210").await;
    assert_eq!(pending.status, MobileStatus::Checking);
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(api.check_call_count(), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(api.check_call_count(), 1);
    let check = registration.mobile_check().await;
    assert_eq!(check.status, MobileStatus::Exists);
    assert!(check.message.unwrap().contains("already registered"));

    registration.mobile_input("9123456789").await;
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(registration.mobile_check().await.status, MobileStatus::Available);
}

#[tokio::test(start_paused = true)]
async fn editing_mid_check_only_looks_up_the_final_number() {
    let api = registered(&[]);
    let registration = desk(api.clone()).await;

    registration.mobile_input("9876543210").await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    registration.mobile_input("9876543211").await;
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(api.check_call_count(), 1);
    let check = registration.mobile_check().await;
    assert_eq!(check.mobile_number, "9876543211");
    assert_eq!(check.status, MobileStatus::Available);
}

#[tokio::test]
async fn registered_number_cannot_submit() {
    let api = registered(&["9876543210"]);
    let registration = desk(api.clone()).await;

    let result = registration
        .submit_player(&valid_player_form("9876543210"))
        .await;
    assert!(matches!(result, Err(RegistrationError::AlreadyRegistered)));
    assert!(api.player_registrations.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn available_number_submits_and_resets() {
    let api = registered(&[]);
    let registration = desk(api.clone()).await;

    registration.mobile_input("9000000001").await;
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(registration.mobile_check().await.status, MobileStatus::Available);

    let form = PlayerRegistration {
        shirt_size: " xl".into(),
        playing_role: "All Rounder".into(),
        ..valid_player_form("9000000001")
    };
    let confirmation = registration.submit_player(&form).await.unwrap();
    assert_eq!(confirmation.community_link.as_deref(), Some(PLAYER_GROUP));
    assert_eq!(api.check_call_count(), 1);

    let sent: Vec<PlayerRegistration> = api.player_registrations.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].shirt_size, "XL");
    assert_eq!(sent[0].playing_role, "all-rounder");
    assert_eq!(registration.mobile_check().await.status, MobileStatus::Idle);

    // Now taken.
    let again = registration
        .submit_player(&valid_player_form("9000000001"))
        .await;
    assert!(matches!(again, Err(RegistrationError::AlreadyRegistered)));
}

#[tokio::test]
async fn owner_registration_goes_through() {
    let api = registered(&[]);
    let registration = desk(api.clone()).await;

    let form = OwnerRegistration {
        name: "Anil Mehta".into(),
        mobile_number: "9123456780".into(),
        email: "anil@example.com".into(),
        team_name: "Falcons".into(),
        bio: "Runs the Falcons academy.".into(),
        image: Some(image("logo.png")),
    };
    let confirmation = registration.submit_owner(&form).await.unwrap();
    assert_eq!(confirmation.community_link, None);
    assert_eq!(api.owner_registrations.lock().unwrap().len(), 1);
}
