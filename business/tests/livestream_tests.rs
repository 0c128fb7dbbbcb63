//! Livestream create and result mutations, and the list invalidation they trigger.

mod common;

use common::TestContext;
use livebet_business::ResourceQuery;
use livebet_business::resources::{
    CreateLiveStreamInput, LiveStreamResult, LiveStreams, MutationError, ValidationError,
    create_livestream, update_livestream_result,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn stream_list() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "result": {
            "data": [{
                "_id": "l1",
                "youtubeLink": "https://youtu.be/abc",
                "streamer": "Anh Ba",
                "startTime": "2024-05-01T12:00:00.000Z",
                "endTime": "2024-05-01T12:40:00.000Z",
                "users": [],
                "totalPlay": 3,
                "total": 60000,
                "result": 0,
                "status": "progress",
                "createdAt": "2024-05-01T11:00:00.000Z",
                "updatedAt": "2024-05-01T11:00:00.000Z",
                "id": 1
            }]
        }
    }))
}

fn form() -> CreateLiveStreamInput {
    CreateLiveStreamInput {
        youtube_link: "https://www.youtube.com/watch?v=abc".to_owned(),
        streamer: "Anh Ba".to_owned(),
        start_time: "2024-05-01 19:00".to_owned(),
        end_time: "2024-05-01 19:40".to_owned(),
    }
}

#[tokio::test]
async fn test_create_invalidates_list() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .and(path("/api/admin/livestream/list"))
        .and(body_json(json!({ "page": 1, "limit": 10, "filterBy": {}, "sortBy": {} })))
        .respond_with(stream_list())
        .expect(2)
        .mount(&ctx.mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/livestream/create"))
        .and(body_json(json!({
            "youtubeLink": "https://www.youtube.com/watch?v=abc",
            "streamer": "Anh Ba",
            "startTime": "2024-05-01T12:00:00.000Z",
            "endTime": "2024-05-01T12:40:00.000Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let mut query = ResourceQuery::<LiveStreams>::new(ctx.client.clone());
    let before = query.refresh().await;
    assert_eq!(before.rows()[0].duration(), "40m");

    create_livestream(&ctx.client, &form())
        .await
        .expect("create should succeed");
    query.refresh().await;
}

#[tokio::test]
async fn test_invalid_form_makes_no_request() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.mock_server)
        .await;

    let mut input = form();
    input.end_time = "2024-05-01 18:00".to_owned();
    let result = create_livestream(&ctx.client, &input).await;

    assert_eq!(
        result,
        Err(MutationError::Invalid(ValidationError::EndBeforeStart))
    );
}

#[tokio::test]
async fn test_update_result_posts_numeric_id() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .and(path("/api/admin/livestream/update-result"))
        .and(body_json(json!({ "id": 17, "result": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let epoch = ctx.client.invalidation_epoch("livestreams");
    update_livestream_result(&ctx.client, 17, LiveStreamResult::Win)
        .await
        .expect("update should succeed");

    assert_eq!(ctx.client.invalidation_epoch("livestreams"), epoch + 1);
}

#[tokio::test]
async fn test_update_result_rejects_undetermined() {
    let ctx = TestContext::new().await;
    ctx.sign_in();

    let result = update_livestream_result(&ctx.client, 17, LiveStreamResult::Undetermined).await;

    assert_eq!(
        result,
        Err(MutationError::Invalid(ValidationError::UnsettledResult(0)))
    );
}

#[tokio::test]
async fn test_mutations_are_not_retried() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .and(path("/api/admin/livestream/update-result"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "locked" })))
        .expect(1)
        .mount(&ctx.mock_server)
        .await;

    let epoch = ctx.client.invalidation_epoch("livestreams");
    let err = update_livestream_result(&ctx.client, 17, LiveStreamResult::Lose)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "locked");
    assert_eq!(ctx.client.invalidation_epoch("livestreams"), epoch);
}

#[tokio::test]
async fn test_rejected_envelope_is_reported() {
    let ctx = TestContext::new().await;
    ctx.sign_in();
    Mock::given(method("POST"))
        .and(path("/api/admin/livestream/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": { "message": "Stream overlaps another" }
        })))
        .mount(&ctx.mock_server)
        .await;

    let result = create_livestream(&ctx.client, &form()).await;

    assert_eq!(
        result,
        Err(MutationError::Rejected("Stream overlaps another".to_owned()))
    );
}
