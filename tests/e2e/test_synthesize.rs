use crate::e2e::helpers;

use gptsovits_client::domain::tts::{ReferenceAudio, SpeedPreset, TtsServiceApi, TtsServiceError};
use helpers::assertions::assert_valid_wav;
use helpers::fixtures::{single_clip_archive, wav_clip, zip_archive};
use helpers::TestContext;
use mockito::Matcher;
use serde_json::json;
use std::time::{Duration, Instant};

#[tokio::test]
async fn it_should_write_a_wav_file_from_the_returned_archive() {
    let mut ctx = TestContext::new().await;
    let mock = ctx
        .mock_archive(single_clip_archive("output_0.wav").unwrap())
        .await;
    let service = ctx.service(ctx.config());
    let output = ctx.work_dir.path().join("result.wav");

    let path = service
        .synthesize_to_file("Hello from the test suite.", &output)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(path, output);
    assert_valid_wav(&path);
    // intermediates are left in the working directory
    assert!(ctx.work_dir.path().join("output_0.wav").exists());
}

#[tokio::test]
async fn it_should_only_convert_the_first_archive_entry() {
    let mut ctx = TestContext::new().await;
    let clip = wav_clip().unwrap();
    let archive = zip_archive(&[
        ("first.wav", clip.as_slice()),
        ("second.bin", b"not audio".as_slice()),
    ])
    .unwrap();
    ctx.mock_archive(archive).await;
    let service = ctx.service(ctx.config());
    let output = ctx.work_dir.path().join("first-only.wav");

    let path = service.synthesize_to_file("Two entries", &output).await.unwrap();

    assert_valid_wav(&path);
    assert!(ctx.work_dir.path().join("second.bin").exists());
}

#[tokio::test]
async fn it_should_send_the_body_without_reference_fields() {
    let mut ctx = TestContext::new().await;
    let mut config = ctx.config();
    config.top_k = 15;
    config.top_p = 0.6;
    config.temperature = 0.3;
    config.speed = SpeedPreset::Faster;

    let mock = ctx
        .server
        .mock("POST", Matcher::Any)
        .match_body(Matcher::Json(json!({
            "text": ["Plain request"],
            "text_language": "en",
            "top_k": 15,
            "top_p": 0.6,
            "temperature": 0.3,
            "speed": 1.2
        })))
        .with_status(200)
        .with_body(single_clip_archive("plain.wav").unwrap())
        .expect(1)
        .create_async()
        .await;
    let service = ctx.service(config);

    let output = ctx.work_dir.path().join("plain-out.wav");
    service.synthesize_to_file("Plain request", &output).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn it_should_send_reference_fields_when_enabled() {
    let mut ctx = TestContext::new().await;
    let mut config = ctx.config();
    config.speed = SpeedPreset::Slowest;
    config.reference_audio = Some(ReferenceAudio {
        wav_path: "/voices/narrator.wav".to_string(),
        prompt_text: "This is how I sound.".to_string(),
        prompt_language: "en".to_string(),
    });

    let mock = ctx
        .server
        .mock("POST", Matcher::Any)
        .match_body(Matcher::Json(json!({
            "text": ["Cloned voice"],
            "refer_wav_path": "/voices/narrator.wav",
            "prompt_text": "This is how I sound.",
            "prompt_language": "en",
            "text_language": "en",
            "top_k": 5,
            "top_p": 1.0,
            "temperature": 1.0,
            "speed": 0.7
        })))
        .with_status(200)
        .with_body(single_clip_archive("cloned.wav").unwrap())
        .expect(1)
        .create_async()
        .await;
    let service = ctx.service(config);

    let output = ctx.work_dir.path().join("cloned-out.wav");
    service.synthesize_to_file("Cloned voice", &output).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn it_should_return_an_error_for_non_success_status() {
    let mut ctx = TestContext::new().await;
    ctx.server
        .mock("POST", Matcher::Any)
        .with_status(500)
        .with_body("model crashed")
        .create_async()
        .await;
    let service = ctx.service(ctx.config());
    let output = ctx.work_dir.path().join("never.wav");

    let err = service.synthesize_to_file("Boom", &output).await.unwrap_err();

    match err {
        TtsServiceError::HttpStatus { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("model crashed"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!output.exists());
}

#[tokio::test]
async fn it_should_report_unreachable_servers_as_network_errors() {
    let ctx = TestContext::new().await;
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut config = ctx.config();
    config.server_location = format!("http://127.0.0.1:{}", port);
    let service = ctx.service(config);

    let err = service
        .synthesize_to_file("Anyone there?", &ctx.work_dir.path().join("none.wav"))
        .await
        .unwrap_err();

    assert!(matches!(err, TtsServiceError::Network(_)));
    assert!(err.is_request_failure());
}

#[tokio::test]
async fn it_should_reject_a_body_that_is_not_a_zip() {
    let mut ctx = TestContext::new().await;
    ctx.mock_archive(b"RIFF....not a zip".to_vec()).await;
    let service = ctx.service(ctx.config());

    let err = service
        .synthesize_to_file("Bad payload", &ctx.work_dir.path().join("bad.wav"))
        .await
        .unwrap_err();

    assert!(matches!(err, TtsServiceError::MalformedResponse(_)));
}

#[tokio::test]
async fn it_should_reject_an_empty_archive() {
    let mut ctx = TestContext::new().await;
    ctx.mock_archive(zip_archive(&[]).unwrap()).await;
    let service = ctx.service(ctx.config());

    let err = service
        .synthesize_to_file("Empty", &ctx.work_dir.path().join("empty.wav"))
        .await
        .unwrap_err();

    assert!(matches!(err, TtsServiceError::MalformedResponse(_)));
}

#[tokio::test]
async fn it_should_give_up_when_the_server_never_answers() {
    let ctx = TestContext::new().await;
    // Connections queue in the backlog but nothing ever replies
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let mut config = ctx.config();
    config.server_location = format!("http://{}", listener.local_addr().unwrap());
    config.request_timeout = Some(Duration::from_millis(300));
    let service = ctx.service(config);

    let start = Instant::now();
    let err = service
        .synthesize_to_file("Hello?", &ctx.work_dir.path().join("silent.wav"))
        .await
        .unwrap_err();

    assert!(matches!(err, TtsServiceError::Network(_)));
    assert!(start.elapsed() < Duration::from_secs(5));
    drop(listener);
}

#[tokio::test]
async fn it_should_convert_over_the_extracted_entry_name() {
    let mut ctx = TestContext::new().await;
    ctx.mock_archive(single_clip_archive("speech.wav").unwrap()).await;
    let service = ctx.service(ctx.config());
    let output = ctx.work_dir.path().join("speech.wav");

    let path = service.synthesize_to_file("Same name", &output).await.unwrap();

    assert_eq!(path, output);
    // every frame of the clip survives being rewritten in place
    assert_valid_wav(&path);
}
