//! End-to-end caption generation against a mock Responses API

mod support;

use captionsmith::{
    CaptionError, CaptionImage, CaptionRequest, CaptionRequester, CaptionStyle, OpenAiClient,
    OpenAiConfig, RATE_LIMIT_MESSAGE,
};
use serde_json::Value;
use support::{TEST_API_KEY, create_error_response, create_response, requester_for};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_reply(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn last_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.expect("recording enabled");
    requests
        .last()
        .expect("one request")
        .body_json()
        .expect("json body")
}

#[tokio::test]
async fn text_captions_are_split_and_trimmed() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(create_response(
            "  Golden hour, golden mood ✨ \n\nCoffee + lake = therapy ☕🌅\n  \nChasing sunsets 🌇\n",
        )),
    )
    .await;

    let captions = requester_for(&server)
        .generate_from_text("sunset at Lake Michigan with coffee", CaptionStyle::Aesthetic)
        .await
        .unwrap();

    assert_eq!(
        captions,
        vec![
            "Golden hour, golden mood ✨",
            "Coffee + lake = therapy ☕🌅",
            "Chasing sunsets 🌇",
        ]
    );
    assert!(captions.iter().all(|c| !c.is_empty()));

    let body = last_body(&server).await;
    let prompt = body["input"].as_str().expect("text input");
    assert!(prompt.contains("sunset at Lake Michigan with coffee"));
    assert!(prompt.contains("Caption style: aesthetic"));
    assert_eq!(body["max_output_tokens"], 120);
}

#[tokio::test]
async fn image_without_mime_is_sent_as_png_data_uri() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(create_response("Main character energy 💅")),
    )
    .await;

    let captions = requester_for(&server)
        .generate_from_image(b"hello", None, CaptionStyle::Baddie)
        .await
        .unwrap();
    assert_eq!(captions, vec!["Main character energy 💅"]);

    let body = last_body(&server).await;
    let content = &body["input"][0]["content"];
    assert_eq!(content[0]["type"], "input_text");
    let prompt = content[0]["text"].as_str().unwrap();
    assert!(prompt.contains("Do NOT guess ethnicity."));
    assert!(prompt.contains("Caption style: baddie"));
    assert_eq!(content[1]["type"], "input_image");
    assert_eq!(content[1]["image_url"], "data:image/png;base64,aGVsbG8=");
    assert_eq!(body["max_output_tokens"], 120);
}

#[tokio::test]
async fn generate_uses_declared_mime_type() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(create_response("a")),
    )
    .await;

    let request = CaptionRequest::image(
        CaptionImage::new(vec![0xFF, 0xD8, 0xFF]).with_mime_type("image/jpeg"),
        CaptionStyle::Travel,
    );
    requester_for(&server).generate(&request).await.unwrap();

    let body = last_body(&server).await;
    let url = body["input"][0]["content"][1]["image_url"].as_str().unwrap();
    assert!(url.starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn configured_token_cap_is_sent() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(200).set_body_json(create_response("short and sweet")),
    )
    .await;

    let config = OpenAiConfig::new(TEST_API_KEY)
        .with_base_url(&server.uri())
        .with_max_output_tokens(64);
    CaptionRequester::from_config(config)
        .unwrap()
        .generate_from_text("beach", CaptionStyle::Minimal)
        .await
        .unwrap();

    assert_eq!(last_body(&server).await["max_output_tokens"], 64);
}

#[tokio::test]
async fn zero_token_cap_never_reaches_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_response("a")))
        .expect(0)
        .mount(&server)
        .await;

    let config = OpenAiConfig::new(TEST_API_KEY)
        .with_base_url(&server.uri())
        .with_max_output_tokens(0);
    assert!(CaptionRequester::from_config(config).is_err());
    assert!(
        requester_for(&server)
            .with_max_output_tokens(0)
            .is_err()
    );
}

#[tokio::test]
async fn rate_limit_surfaces_fixed_message() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(429).set_body_json(create_error_response(
            "requests",
            "Rate limit reached for gpt-4.1-mini",
            "rate_limit_exceeded",
        )),
    )
    .await;

    let requester = requester_for(&server);
    let text_err = requester
        .generate_from_text("gym selfie", CaptionStyle::Gym)
        .await
        .unwrap_err();
    let image_err = requester
        .generate_from_image(b"img", Some("image/png"), CaptionStyle::Gym)
        .await
        .unwrap_err();

    for err in [text_err, image_err] {
        assert_eq!(
            err,
            CaptionError::RateLimited {
                message: RATE_LIMIT_MESSAGE.to_string()
            }
        );
        assert_eq!(err.to_string(), RATE_LIMIT_MESSAGE);
    }
}

#[tokio::test]
async fn exhausted_quota_surfaces_fixed_message() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(429).set_body_json(create_error_response(
            "insufficient_quota",
            "You exceeded your current quota, please check your plan and billing details.",
            "insufficient_quota",
        )),
    )
    .await;

    let err = requester_for(&server)
        .generate_from_text("brunch with the girls", CaptionStyle::SoftGirl)
        .await
        .unwrap_err();
    assert_eq!(err, CaptionError::rate_limited());
    assert_eq!(err.to_string(), RATE_LIMIT_MESSAGE);
}

#[tokio::test]
async fn rate_limit_wording_on_other_status_is_unknown() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(400).set_body_json(create_error_response(
            "invalid_request_error",
            "Rate limit tier does not allow this model",
            "rate_limit_exceeded",
        )),
    )
    .await;

    let err = requester_for(&server)
        .generate_from_text("beach", CaptionStyle::Funny)
        .await
        .unwrap_err();
    match &err {
        CaptionError::Unknown { detail } => {
            assert!(detail.contains("Rate limit tier does not allow this model"));
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[tokio::test]
async fn requests_are_single_shot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let err = requester_for(&server)
        .generate_from_text("beach", CaptionStyle::Funny)
        .await
        .unwrap_err();
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn server_error_surfaces_as_unknown() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        ResponseTemplate::new(500).set_body_json(create_error_response(
            "server_error",
            "The server had an error while processing your request",
            "server_error",
        )),
    )
    .await;

    let err = requester_for(&server)
        .generate_from_text("beach", CaptionStyle::Emotional)
        .await
        .unwrap_err();

    match &err {
        CaptionError::Unknown { detail } => {
            assert!(detail.contains("The server had an error"));
        }
        other => panic!("unexpected variant: {other:?}"),
    }
    assert!(
        err.to_string()
            .starts_with("Something went wrong while generating captions: ")
    );
}

#[tokio::test]
async fn unreachable_server_surfaces_as_unknown() {
    // Nothing listens on port 1.
    let uri = "http://127.0.0.1:1";
    let client = OpenAiClient::new(OpenAiConfig::new("test-api-key").with_base_url(uri)).unwrap();
    let err = CaptionRequester::new(client)
        .generate_from_text("beach", CaptionStyle::Minimal)
        .await
        .unwrap_err();

    match &err {
        CaptionError::Unknown { detail } => assert!(detail.starts_with("HTTP error:")),
        other => panic!("unexpected variant: {other:?}"),
    }
}
