//! Tests for the providers against a mock API

use super::*;
use crate::error::Error;
use crate::http::{resource_payload, HttpClientConfig};
use crate::types::{params, BoardPrivacy};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn context(server: &MockServer, logged_in: bool) -> Arc<ApiContext> {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(0)
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let ctx = ApiContext::new(client, FeedConfig::default());
    if logged_in {
        ctx.session.mark_logged_in("alice").await;
    }
    Arc::new(ctx)
}

fn ok_envelope() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "resource_response": {"data": {}, "error": null}
    }))
}

fn data_envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "resource_response": {"data": data, "error": null}
    }))
}

fn error_envelope(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "resource_response": {"error": {"message": message}}
    }))
}

fn assert_login_required<T: std::fmt::Debug>(result: crate::error::Result<T>, op: &str) {
    match result {
        Err(Error::LoginRequired { operation }) => assert_eq!(operation, op),
        other => panic!("expected LoginRequired for {op}, got {other:?}"),
    }
}

// ============================================================================
// Login Gating Tests
// ============================================================================

#[tokio::test]
async fn test_pins_gated_operations_need_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok_envelope())
        .expect(0)
        .mount(&server)
        .await;
    let pins = Pins::new(context(&server, false).await);
    let ids = vec!["1".to_string()];

    assert_login_required(pins.like("1").await, "like");
    assert_login_required(pins.unlike("1").await, "unlike");
    assert_login_required(pins.create("https://x/a.jpg", "b", "", "").await, "create");
    assert_login_required(pins.repin("1", "b", "").await, "repin");
    assert_login_required(pins.feed(10).map(|_| ()), "feed");
    assert_login_required(pins.activity("1", 10).await.map(|_| ()), "activity");
    assert_login_required(pins.copy(&ids, "b").await, "copy");
    assert_login_required(pins.move_pins(&ids, "b").await, "move");
    assert_login_required(pins.delete("1").await, "delete");
    assert_login_required(pins.send_with_message("1", "hi", &ids).await, "send");
    assert_login_required(pins.visual_similar("1", None).await, "visual_similar");
}

#[tokio::test]
async fn test_user_and_password_gates() {
    let server = MockServer::start().await;
    let ctx = context(&server, false).await;
    let user = User::new(Arc::clone(&ctx));
    let password = Password::new(Arc::clone(&ctx));
    let boards = Boards::new(ctx);

    assert_login_required(user.profile().await, "profile");
    assert_login_required(user.username().await, "username");
    assert_login_required(user.is_banned().await, "is_banned");
    assert_login_required(user.invite("a@b.c").await, "invite");
    assert_login_required(user.deactivate("other", "").await, "deactivate");
    assert_login_required(user.convert_to_business("Acme", "").await, "convert_to_business");
    assert_login_required(password.change("old", "new").await, "change");
    assert_login_required(boards.follow("9").await, "follow");
    assert_login_required(
        boards.create("b", "", BoardPrivacy::Public).await,
        "create",
    );
}

// ============================================================================
// Pins Tests
// ============================================================================

#[tokio::test]
async fn test_like_posts_pin_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/PinLikeResource/create/"))
        .and(body_string_contains("pin_id"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/resource/PinLikeResource/delete/"))
        .respond_with(error_envelope("not liked"))
        .expect(1)
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, true).await);
    assert!(pins.like("123").await.unwrap());
    assert!(!pins.unlike("123").await.unwrap());
}

#[tokio::test]
async fn test_info_returns_object() {
    let server = MockServer::start().await;
    let request = params([("id", json!("42")), ("field_set_key", json!("detailed"))]);
    Mock::given(method("GET"))
        .and(path("/resource/PinResource/get/"))
        .and(query_param("data", resource_payload(&request).unwrap()))
        .respond_with(data_envelope(json!({"id": "42", "description": "cat"})))
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, false).await);
    let info = pins.info("42").await.unwrap().unwrap();
    assert_eq!(info["description"], "cat");
}

#[tokio::test]
async fn test_info_missing_pin_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "resource_response": {"data": null, "error": {"message": "Pin not found"}}
        })))
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, false).await);
    assert!(pins.info("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_with_url_links_to_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/PinResource/create/"))
        .and(body_string_contains("scraped"))
        .respond_with(data_envelope(json!({"id": "new-pin"})))
        .expect(1)
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, true).await);
    let created = pins
        .create("https://i.example.com/a.jpg", "board1", "desc", "")
        .await
        .unwrap();

    assert_eq!(created, Some(json!({"id": "new-pin"})));

    let requests = server.received_requests().await.unwrap();
    let data = form_data(&String::from_utf8(requests[0].body.clone()).unwrap());
    assert_eq!(data["options"]["link"], "https://i.example.com/a.jpg");
    assert_eq!(data["options"]["image_url"], "https://i.example.com/a.jpg");
    assert_eq!(data["options"]["board_id"], "board1");
}

#[tokio::test]
async fn test_create_uploads_local_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-image/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "image_url": "https://i.example.com/up.jpg"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/resource/PinResource/create/"))
        .and(body_string_contains("up.jpg"))
        .respond_with(data_envelope(json!({"id": "p"})))
        .expect(1)
        .mount(&server)
        .await;

    let file = tempfile::NamedTempFile::new().unwrap();
    let pins = Pins::new(context(&server, true).await);
    let created = pins
        .create(file.path().to_str().unwrap(), "b", "", "https://site")
        .await
        .unwrap();

    assert!(created.is_some());
}

#[tokio::test]
async fn test_repin_strips_backslashes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/RepinResource/create/"))
        .respond_with(data_envelope(json!({"id": "repin"})))
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, true).await);
    pins.repin("12\\3", "b", "it\\'s").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    let data = form_data(&body);
    assert_eq!(data["options"]["link"], "123");
    assert_eq!(data["options"]["pin_id"], "12\\3");
    assert_eq!(data["options"]["description"], "it's");
    assert!(data["options"]["is_video"].is_null());
}

#[tokio::test]
async fn test_related_feed_paginates() {
    let server = MockServer::start().await;
    let first = params([("pin", json!("7"))]);
    let mut second = first.clone();
    second.insert("bookmarks".to_string(), json!(["b2"]));

    Mock::given(method("GET"))
        .and(path("/resource/RelatedPinFeedResource/get/"))
        .and(query_param("data", resource_payload(&first).unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource_response": {"data": [{"id": 1}, {"id": 2}], "bookmark": "b2"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resource/RelatedPinFeedResource/get/"))
        .and(query_param("data", resource_payload(&second).unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource_response": {"data": [{"id": 3}], "bookmark": "-end-"}
        })))
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, false).await);
    let items = pins.related("7", 0).collect_all().await.unwrap();
    assert_eq!(items.len(), 3);

    let limited: Vec<_> = pins.related("7", 1).into_stream().collect().await;
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn test_activity_without_aggregated_data_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resource/PinResource/get/"))
        .respond_with(data_envelope(json!({"id": "1"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resource/AggregatedActivityFeedResource/get/"))
        .respond_with(ok_envelope())
        .expect(0)
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, true).await);
    let items = pins.activity("1", 0).await.unwrap().collect_all().await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_activity_uses_aggregated_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resource/PinResource/get/"))
        .respond_with(data_envelope(json!({"aggregated_pin_data": {"id": "agg9"}})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resource/AggregatedActivityFeedResource/get/"))
        .and(query_param(
            "data",
            resource_payload(&params([("aggregated_pin_data_id", json!("agg9"))])).unwrap(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource_response": {"data": [{"type": "like"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, true).await);
    let items = pins.activity("1", 0).await.unwrap().collect_all().await.unwrap();
    assert_eq!(items, vec![json!({"type": "like"})]);
}

#[tokio::test]
async fn test_bulk_move_sends_ids_and_board() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/BulkEditResource/update/"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, true).await);
    let ids = vec!["1".to_string(), "2".to_string()];
    assert!(pins.move_pins(&ids, "77").await.unwrap());

    let requests = server.received_requests().await.unwrap();
    let data = form_data(&String::from_utf8(requests[0].body.clone()).unwrap());
    assert_eq!(data["options"]["board_id"], "77");
    assert_eq!(data["options"]["pin_ids"], json!(["1", "2"]));
}

#[tokio::test]
async fn test_edit_without_board_sends_null_board() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/PinResource/update/"))
        .and(body_string_contains("new+caption"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, false).await);
    assert!(pins
        .edit("5", "new caption", "https://example.com", None)
        .await
        .unwrap());

    let options = sent_options(&server, "/resource/PinResource/update/").await;
    assert_eq!(options["id"], "5");
    assert_eq!(options["link"], "https://example.com");
    assert_eq!(options["board_id"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_move_to_board_clears_description_and_link() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/PinResource/update/"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, false).await);
    assert!(pins.move_to_board("5", "9").await.unwrap());

    let options = sent_options(&server, "/resource/PinResource/update/").await;
    assert_eq!(options["description"], "");
    assert_eq!(options["link"], "");
    assert_eq!(options["board_id"], "9");
}

#[tokio::test]
async fn test_copy_and_delete_from_board_use_bulk_edit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/BulkEditResource/create/"))
        .and(body_string_contains("pin_ids"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/resource/BulkEditResource/delete/"))
        .and(body_string_contains("pin_ids"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, true).await);
    let ids = vec!["1".to_string(), "2".to_string()];
    assert!(pins.copy(&ids, "77").await.unwrap());
    assert!(pins.delete_from_board(&ids, "78").await.unwrap());

    let copied = sent_options(&server, "/resource/BulkEditResource/create/").await;
    assert_eq!(copied["board_id"], "77");
    assert_eq!(copied["pin_ids"], json!(["1", "2"]));

    let deleted = sent_options(&server, "/resource/BulkEditResource/delete/").await;
    assert_eq!(deleted["board_id"], "78");
    assert_eq!(deleted["pin_ids"], json!(["1", "2"]));
}

#[tokio::test]
async fn test_send_requires_recipient() {
    let server = MockServer::start().await;
    let pins = Pins::new(context(&server, true).await);

    let err = pins.send("1", "look", &[], &[]).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_send_with_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/ConversationsResource/create/"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, true).await);
    let sent = pins
        .send_with_email("5", "look", &["bob@example.com".to_string()])
        .await
        .unwrap();
    assert!(sent);

    let requests = server.received_requests().await.unwrap();
    let data = form_data(&String::from_utf8(requests[0].body.clone()).unwrap());
    assert_eq!(data["options"]["pin"], "5");
    assert_eq!(data["options"]["text"], "look");
    assert_eq!(data["options"]["emails"], json!(["bob@example.com"]));
    assert_eq!(data["options"]["user_ids"], json!([]));
}

#[tokio::test]
async fn test_visual_similar_default_crop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resource/VisualLiveSearchResource/get/"))
        .respond_with(data_envelope(json!({"result_pins": []})))
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, true).await);
    let result = pins.visual_similar("1", None).await.unwrap();
    assert_eq!(result, Some(json!({"result_pins": []})));

    let requests = server.received_requests().await.unwrap();
    let raw = requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == "data")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    let data: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(data["options"]["crop"]["x"], 0.16);
    assert_eq!(data["options"]["crop"]["num_crop_actions"], 1);
    assert_eq!(data["options"]["force_refresh"], true);
    assert_eq!(data["options"]["keep_duplicates"], false);
}

#[tokio::test]
async fn test_search_uses_tree_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resource/BaseSearchResource/get/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "module": {"tree": {"data": {"results": [{"id": "s1"}, {"id": "s2"}]}}}
        })))
        .mount(&server)
        .await;

    let pins = Pins::new(context(&server, false).await);
    let items = pins.search("cats", 0).collect_all().await.unwrap();
    assert_eq!(items.len(), 2);

    let requests = server.received_requests().await.unwrap();
    let raw = requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == "data")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    assert!(raw.contains("\"scope\":\"pins\""));
}

#[tokio::test]
async fn test_save_original_image() {
    let server = MockServer::start().await;
    let image_url = format!("{}/originals/ab/cd.jpg", server.uri());
    Mock::given(method("GET"))
        .and(path("/resource/PinResource/get/"))
        .respond_with(data_envelope(json!({"images": {"orig": {"url": image_url}}})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/originals/ab/cd.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let pins = Pins::new(context(&server, false).await);
    let saved = pins
        .save_original_image("1", dir.path())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(saved, dir.path().join("cd.jpg"));
    assert_eq!(std::fs::read(saved).unwrap(), b"img");
}

#[tokio::test]
async fn test_save_original_image_without_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(data_envelope(json!({"images": {}})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let pins = Pins::new(context(&server, false).await);
    assert!(pins
        .save_original_image("1", dir.path())
        .await
        .unwrap()
        .is_none());
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_user_profile_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resource/UserSettingsResource/get/"))
        .respond_with(data_envelope(json!({
            "id": "u1",
            "username": "alice",
            "is_write_banned": true
        })))
        .mount(&server)
        .await;

    let user = User::new(context(&server, true).await);
    assert_eq!(user.username().await.unwrap(), Some("alice".to_string()));
    assert!(user.is_banned().await.unwrap());
}

#[tokio::test]
async fn test_user_not_banned_when_flag_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(data_envelope(json!({"username": "alice"})))
        .mount(&server)
        .await;

    let user = User::new(context(&server, true).await);
    assert!(!user.is_banned().await.unwrap());
}

#[tokio::test]
async fn test_deactivate_without_profile_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(data_envelope(json!({"username": "alice"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ok_envelope())
        .expect(0)
        .mount(&server)
        .await;

    let user = User::new(context(&server, true).await);
    assert!(!user.deactivate("other", "").await.unwrap());
}

#[tokio::test]
async fn test_deactivate_posts_user_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(data_envelope(json!({"id": "u1"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/resource/DeactivateAccountResource/create/"))
        .and(body_string_contains("u1"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let user = User::new(context(&server, true).await);
    assert!(user.deactivate("other", "bye").await.unwrap());
}

#[tokio::test]
async fn test_update_profile_uploads_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-image/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "image_url": "https://i.example.com/avatar.jpg"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/resource/UserSettingsResource/update/"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let file = tempfile::NamedTempFile::new().unwrap();
    let user = User::new(context(&server, true).await);
    let settings = params([
        ("about", json!("hi")),
        ("profile_image", json!(file.path().to_str().unwrap())),
    ]);
    assert!(user.update_profile(settings).await.unwrap());

    let requests = server.received_requests().await.unwrap();
    let update = requests
        .iter()
        .find(|r| r.url.path() == "/resource/UserSettingsResource/update/")
        .unwrap();
    let data = form_data(&String::from_utf8(update.body.clone()).unwrap());
    assert_eq!(
        data["options"]["profile_image_url"],
        "https://i.example.com/avatar.jpg"
    );
    assert!(data["options"].get("profile_image").is_none());
}

#[tokio::test]
async fn test_is_banned_accepts_truthy_flags() {
    let cases = [
        (json!(true), true),
        (json!(1), true),
        (json!("1"), true),
        (json!(false), false),
        (json!(0), false),
        (json!("0"), false),
        (json!(""), false),
    ];

    for (flag, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/resource/UserSettingsResource/get/"))
            .respond_with(data_envelope(json!({"is_write_banned": flag.clone()})))
            .mount(&server)
            .await;

        let user = User::new(context(&server, true).await);
        assert_eq!(user.is_banned().await.unwrap(), expected, "flag {flag}");
    }
}

#[tokio::test]
async fn test_convert_to_business_sends_account_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/BusinessAccountResource/create/"))
        .and(body_string_contains("account_type"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let user = User::new(context(&server, true).await);
    assert!(user
        .convert_to_business("Acme", "https://acme.example")
        .await
        .unwrap());

    let options = sent_options(&server, "/resource/BusinessAccountResource/create/").await;
    assert_eq!(options["account_type"], "other");
    assert_eq!(options["business_name"], "Acme");
    assert_eq!(options["website_url"], "https://acme.example");
}

#[tokio::test]
async fn test_invite_sends_email_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/EmailInviteSentResource/create/"))
        .and(body_string_contains("bob%40example.com"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let user = User::new(context(&server, true).await);
    assert!(user.invite("bob@example.com").await.unwrap());

    let options = sent_options(&server, "/resource/EmailInviteSentResource/create/").await;
    assert_eq!(options["type"], "email");
    assert_eq!(options["email"], "bob@example.com");
}

#[tokio::test]
async fn test_update_profile_rejects_non_path_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok_envelope())
        .expect(0)
        .mount(&server)
        .await;

    let user = User::new(context(&server, true).await);
    let settings = params([("profile_image", json!(42))]);

    let err = user.update_profile(settings).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

// ============================================================================
// Password Tests
// ============================================================================

#[test]
fn test_reset_token_from_url() {
    let url = url::Url::parse("https://www.pinterest.com/pw/alice/?t=tok&e=1500").unwrap();
    let token = ResetToken::from_url(&url).unwrap();
    assert_eq!(token.username, "alice");
    assert_eq!(token.token, "tok");
    assert_eq!(token.expiration, "1500");

    let url = url::Url::parse("https://www.pinterest.com/pw/alice/?t=tok").unwrap();
    assert!(ResetToken::from_url(&url).is_none());
}

#[tokio::test]
async fn test_reset_posts_token_from_final_url() {
    let server = MockServer::start().await;
    let target = format!("{}/pw/alice/?t=tok123&e=999", server.uri());
    Mock::given(method("GET"))
        .and(path("/reset"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", target.as_str()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pw/alice/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/resource/ResetPasswordFromEmailResource/update/"))
        .and(body_string_contains("tok123"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let password = Password::new(context(&server, false).await);
    let link = format!("{}/reset", server.uri());
    assert!(password.reset(&link, "n3w").await.unwrap());

    let requests = server.received_requests().await.unwrap();
    let post = requests.iter().find(|r| r.method.as_str() == "POST").unwrap();
    let data = form_data(&String::from_utf8(post.body.clone()).unwrap());
    assert_eq!(data["options"]["username"], "alice");
    assert_eq!(data["options"]["expiration"], "999");
    assert_eq!(data["options"]["new_password_confirm"], "n3w");
}

#[tokio::test]
async fn test_reset_without_token_does_not_post() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("expired"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ok_envelope())
        .expect(0)
        .mount(&server)
        .await;

    let password = Password::new(context(&server, false).await);
    let link = format!("{}/pw/alice/", server.uri());
    assert!(!password.reset(&link, "n3w").await.unwrap());
}

#[tokio::test]
async fn test_send_reset_link() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/UserResetPasswordResource/create/"))
        .and(body_string_contains("username_or_email"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let password = Password::new(context(&server, false).await);
    assert!(password.send_reset_link("alice").await.unwrap());
}

#[tokio::test]
async fn test_change_confirms_new_password() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/UserPasswordResource/update/"))
        .and(body_string_contains("new_password_confirm"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let password = Password::new(context(&server, true).await);
    assert!(password.change("old", "n3w").await.unwrap());

    let options = sent_options(&server, "/resource/UserPasswordResource/update/").await;
    assert_eq!(options["old_password"], "old");
    assert_eq!(options["new_password"], "n3w");
    assert_eq!(options["new_password_confirm"], "n3w");
}

// ============================================================================
// Boards Tests
// ============================================================================

#[tokio::test]
async fn test_boards_for_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resource/BoardsResource/get/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource_response": {"data": [{"id": "b1"}, {"id": "b2"}]}
        })))
        .mount(&server)
        .await;

    let boards = Boards::new(context(&server, false).await);
    assert_eq!(boards.for_user("alice").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_board_create_privacy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/BoardResource/create/"))
        .and(body_string_contains("secret"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let boards = Boards::new(context(&server, true).await);
    assert!(boards
        .create("Recipes", "food", BoardPrivacy::Secret)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_board_delete_uses_board_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/BoardResource/delete/"))
        .and(body_string_contains("board_id"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let boards = Boards::new(context(&server, true).await);
    assert!(boards.delete("b1").await.unwrap());
}

#[tokio::test]
async fn test_board_info_uses_slug() {
    let server = MockServer::start().await;
    let request = params([
        ("username", json!("alice")),
        ("slug", json!("recipes")),
        ("field_set_key", json!("detailed")),
    ]);
    Mock::given(method("GET"))
        .and(path("/resource/BoardResource/get/"))
        .and(query_param("data", resource_payload(&request).unwrap()))
        .respond_with(data_envelope(json!({"id": "b1", "name": "Recipes"})))
        .expect(1)
        .mount(&server)
        .await;

    let boards = Boards::new(context(&server, false).await);
    let board = boards.info("alice", "recipes").await.unwrap().unwrap();
    assert_eq!(board["id"], "b1");
}

#[tokio::test]
async fn test_board_update_merges_board_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/BoardResource/update/"))
        .and(body_string_contains("board_id"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let boards = Boards::new(context(&server, true).await);
    let attributes = params([("name", json!("Dinner")), ("category", json!("food"))]);
    assert!(boards.update("b1", attributes).await.unwrap());

    let options = sent_options(&server, "/resource/BoardResource/update/").await;
    assert_eq!(
        options,
        json!({"board_id": "b1", "name": "Dinner", "category": "food"})
    );
}

#[tokio::test]
async fn test_board_follow_and_unfollow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource/BoardFollowResource/create/"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/resource/BoardFollowResource/delete/"))
        .respond_with(ok_envelope())
        .expect(1)
        .mount(&server)
        .await;

    let boards = Boards::new(context(&server, true).await);
    assert!(boards.follow("b1").await.unwrap());
    assert!(boards.unfollow("b1").await.unwrap());

    for resource in [
        "/resource/BoardFollowResource/create/",
        "/resource/BoardFollowResource/delete/",
    ] {
        let options = sent_options(&server, resource).await;
        assert_eq!(options, json!({"board_id": "b1", "board_url": ""}));
    }
}

#[tokio::test]
async fn test_board_pins_feed() {
    let server = MockServer::start().await;
    let request = params([("board_id", json!("b1"))]);
    Mock::given(method("GET"))
        .and(path("/resource/BoardFeedResource/get/"))
        .and(query_param("data", resource_payload(&request).unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource_response": {"data": [{"id": "p1"}, {"id": "p2"}], "bookmark": "-end-"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let boards = Boards::new(context(&server, false).await);
    let pins = boards.pins("b1", 0).collect_all().await.unwrap();
    assert_eq!(pins, vec![json!({"id": "p1"}), json!({"id": "p2"})]);
}

// ============================================================================
// Helpers
// ============================================================================

fn form_pairs(body: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect()
}

fn form_data(body: &str) -> serde_json::Value {
    let raw = form_pairs(body)
        .into_iter()
        .find(|(k, _)| k == "data")
        .map(|(_, v)| v)
        .unwrap();
    serde_json::from_str(&raw).unwrap()
}

/// `options` of the form-encoded payload POSTed to `resource_path`
async fn sent_options(server: &MockServer, resource_path: &str) -> serde_json::Value {
    let requests = server.received_requests().await.unwrap();
    let request = requests
        .iter()
        .find(|r| r.url.path() == resource_path)
        .unwrap_or_else(|| panic!("no request to {resource_path}"));
    let mut data = form_data(&String::from_utf8(request.body.clone()).unwrap());
    data["options"].take()
}
