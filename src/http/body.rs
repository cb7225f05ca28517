use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde_json::Value;

use crate::api::models::HttpValidationError;
use crate::api::models::ValidationError;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Response payload as negotiated from its content type
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Read a response body; unreadable or malformed bodies come back as `None`
    pub async fn read(response: reqwest::Response) -> Option<Self> {
        let is_json = is_json_content(response.headers());
        let text = response.text().await.ok()?;
        Self::parse(&text, is_json)
    }

    pub fn parse(text: &str, is_json: bool) -> Option<Self> {
        if is_json {
            serde_json::from_str(text).ok().map(ResponseBody::Json)
        } else {
            Some(ResponseBody::Text(text.to_string()))
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// Best-effort human message from a `message` or `detail` field
    pub fn error_message(&self) -> Option<String> {
        let object = self.as_json()?.as_object()?;
        ["message", "detail"]
            .iter()
            .filter_map(|key| object.get(*key))
            .find(|value| !value.is_null())
            .map(describe_value)
    }

    /// Field-level errors of a 422 body; anything off-contract yields an empty list
    pub fn validation_detail(&self) -> Vec<ValidationError> {
        self.as_json()
            .cloned()
            .and_then(|value| serde_json::from_value::<HttpValidationError>(value).ok())
            .and_then(|errors| errors.detail)
            .unwrap_or_default()
    }
}

pub fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().contains(JSON_MEDIA_TYPE))
        .unwrap_or(false)
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
