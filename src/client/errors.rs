//! HTTP error classification for the `OpenAI` Responses API

use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::LlmError;

const PROVIDER: &str = "openai";

/// Classify a non-success response.
///
/// The `OpenAI` error envelope is preferred; anything else falls back to
/// status-code rules.
pub fn classify_http_error(status: u16, body_text: &str, headers: &HeaderMap) -> LlmError {
    classify_openai_error_envelope(status, body_text)
        .unwrap_or_else(|| classify_by_status(status, body_text, headers))
}

/// Parse `{ "error": { "message", "type", "code" } }`.
///
/// Returns `None` when the body doesn't match the envelope.
pub fn classify_openai_error_envelope(status: u16, body_text: &str) -> Option<LlmError> {
    let json: Value = serde_json::from_str(body_text).ok()?;
    let error_obj = json.get("error").filter(|v| v.is_object())?;

    let message = error_obj
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown error");
    let error_type = error_obj.get("type").and_then(|v| v.as_str()).unwrap_or("");
    let error_code = error_obj.get("code").and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    // Every 429 is a rate limit, an exhausted quota included; no other status is.
    if status == 429 {
        let detail = match error_code.as_deref() {
            Some(code) if !code.is_empty() => format!("{message} ({code})"),
            _ => message.to_string(),
        };
        return Some(LlmError::RateLimitError(detail));
    }

    let mapped = match (status, error_type) {
        (401, _) | (_, "authentication_error") => {
            LlmError::AuthenticationError(message.to_string())
        }
        (_, "invalid_request_error") if status != 404 => {
            LlmError::InvalidInput(message.to_string())
        }
        (404, _) | (_, "not_found_error") => LlmError::NotFound(message.to_string()),
        (400, _) => LlmError::InvalidInput(message.to_string()),
        _ => {
            let kind = if error_type.is_empty() {
                String::new()
            } else {
                format!(" ({error_type})")
            };
            LlmError::ApiError {
                code: status,
                message: format!("{PROVIDER} API error{kind}: {message}"),
                details: Some(json.clone()),
            }
        }
    };

    Some(mapped)
}

fn classify_by_status(status: u16, body_text: &str, headers: &HeaderMap) -> LlmError {
    let request_ids: Vec<String> = ["x-request-id", "x-openai-request-id"]
        .iter()
        .filter_map(|k| {
            headers
                .get(*k)
                .and_then(|v| v.to_str().ok())
                .map(|v| format!("{k}={v}"))
        })
        .collect();
    let ids_suffix = if request_ids.is_empty() {
        String::new()
    } else {
        format!(" ids=[{}]", request_ids.join(","))
    };
    // Limit body sample size to avoid noisy messages
    let body_sample = body_text.chars().take(200).collect::<String>();

    match status {
        429 => {
            let retry_after = headers
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            LlmError::RateLimitError(format!(
                "provider={PROVIDER} http=429 retry_after={retry_after}{ids_suffix} body_sample={body_sample}"
            ))
        }
        401 => LlmError::AuthenticationError(format!(
            "provider={PROVIDER} unauthorized{ids_suffix} body_sample={body_sample}"
        )),
        404 => LlmError::NotFound(format!(
            "provider={PROVIDER} http=404{ids_suffix} body_sample={body_sample}"
        )),
        _ => {
            let reason = reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown status");
            LlmError::ApiError {
                code: status,
                message: format!(
                    "provider={PROVIDER} http={status} {reason}{ids_suffix} body_sample={body_sample}"
                ),
                details: None,
            }
        }
    }
}
