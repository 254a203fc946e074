//! Shared fixtures for mock-server tests

#![allow(dead_code)]

use captionsmith::{CaptionRequester, OpenAiClient, OpenAiConfig};
use serde_json::json;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";

/// Responses API payload with a single assistant message.
/// Based on: https://platform.openai.com/docs/api-reference/responses/object
pub fn create_response(text: &str) -> serde_json::Value {
    json!({
        "id": "resp_123",
        "object": "response",
        "created_at": 1741476542,
        "status": "completed",
        "error": null,
        "model": "gpt-4.1-mini-2025-04-14",
        "output": [{
            "type": "message",
            "id": "msg_123",
            "status": "completed",
            "role": "assistant",
            "content": [{
                "type": "output_text",
                "text": text,
                "annotations": []
            }]
        }],
        "usage": {
            "input_tokens": 81,
            "output_tokens": 42,
            "total_tokens": 123
        }
    })
}

/// `OpenAI` error envelope
/// Based on: https://platform.openai.com/docs/guides/error-codes
pub fn create_error_response(error_type: &str, message: &str, code: &str) -> serde_json::Value {
    json!({
        "error": {
            "message": message,
            "type": error_type,
            "param": null,
            "code": code
        }
    })
}

pub fn client_for(server: &MockServer) -> OpenAiClient {
    let config = OpenAiConfig::new(TEST_API_KEY)
        .with_base_url(&server.uri())
        .with_model("gpt-4.1-mini");
    OpenAiClient::new(config).expect("valid config")
}

pub fn requester_for(server: &MockServer) -> CaptionRequester<OpenAiClient> {
    CaptionRequester::new(client_for(server))
}
