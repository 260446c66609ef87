use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use vidiwise_engine::{FailureKind, JobStatus, ProcessingService, ReqwestService, ServiceSettings};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> ReqwestService {
    ReqwestService::new(ServiceSettings {
        base_url: server.uri(),
        ..ServiceSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn submit_video_posts_url_and_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process-video"))
        .and(body_json(json!({ "url": "https://youtu.be/abc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Video processing started",
            "video_id": "abc",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let video_id = service_for(&server)
        .submit_video("https://youtu.be/abc")
        .await
        .expect("submit ok");
    assert_eq!(video_id, "abc");
}

#[tokio::test]
async fn submit_video_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process-video"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid input" })))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .submit_video("not a video")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
}

#[tokio::test]
async fn submit_video_requires_video_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process-video"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .submit_video("https://youtu.be/abc")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn video_status_maps_known_and_unknown_values() {
    let server = MockServer::start().await;
    for (id, status) in [
        ("a", "pending"),
        ("b", "processing"),
        ("c", "completed"),
        ("d", "failed"),
        ("e", "not_found"),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/video-status/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": status })))
            .mount(&server)
            .await;
    }

    let service = service_for(&server);
    let mut statuses = Vec::new();
    for id in ["a", "b", "c", "d", "e"] {
        statuses.push(service.video_status(id).await.expect("status ok"));
    }
    assert_eq!(
        statuses,
        vec![
            JobStatus::Pending,
            JobStatus::Pending,
            JobStatus::Completed,
            JobStatus::Failed,
            JobStatus::Unrecognized("not_found".to_string()),
        ]
    );
}

#[tokio::test]
async fn video_status_escapes_the_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video-status/a%20b%2Fc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "completed" })))
        .expect(1)
        .mount(&server)
        .await;

    let status = service_for(&server).video_status("a b/c").await.unwrap();
    assert_eq!(status, JobStatus::Completed);
}

#[tokio::test]
async fn video_status_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video-status/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = service_for(&server).video_status("abc").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn send_chat_posts_message_and_video_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/start-chat"))
        .and(body_json(json!({ "message": "What is shown?", "videoId": "abc" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "**A cat** on a `sofa`" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let answer = service_for(&server)
        .send_chat("abc", "What is shown?")
        .await
        .expect("chat ok");
    assert_eq!(answer, "**A cat** on a `sofa`");
}

#[tokio::test]
async fn send_chat_fails_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/start-chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = service_for(&server).send_chat("abc", "hi").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video-status/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "status": "pending" })),
        )
        .mount(&server)
        .await;

    let service = ReqwestService::new(ServiceSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ServiceSettings::default()
    })
    .unwrap();

    let err = service.video_status("slow").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn invalid_base_url_is_reported() {
    let service = ReqwestService::new(ServiceSettings {
        base_url: "not a url".to_string(),
        ..ServiceSettings::default()
    })
    .unwrap();

    let err = service.submit_video("https://youtu.be/abc").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "OK" })))
        .expect(1)
        .mount(&server)
        .await;

    let service = ReqwestService::new(ServiceSettings {
        base_url: format!("{}/api/", server.uri()),
        ..ServiceSettings::default()
    })
    .unwrap();
    assert_eq!(service.health().await.unwrap(), "OK");
}
