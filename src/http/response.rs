use serde::de::DeserializeOwned;

use super::ResponseBody;
use crate::api::models::ValidationError;
use crate::errors::{ApiError, ApiResult};

const UNPROCESSABLE_ENTITY: u16 = 422;
const UNPROCESSABLE_ENTITY_TEXT: &str = "Unprocessable Entity";

/// Status and negotiated body of a completed request
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub url: String,
    pub body: Option<ResponseBody>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-success status into the matching `ApiError`
    pub fn error_for_status(self) -> ApiResult<Self> {
        if self.is_success() {
            return Ok(self);
        }

        if self.status == UNPROCESSABLE_ENTITY {
            let detail = self
                .body
                .as_ref()
                .map(ResponseBody::validation_detail)
                .unwrap_or_default();
            let message = self.validation_message(&detail);
            return Err(ApiError::ValidationFailure {
                status: self.status,
                url: self.url,
                message,
                detail,
                body: self.body,
            });
        }

        let message = self
            .body
            .as_ref()
            .and_then(ResponseBody::error_message)
            .unwrap_or_else(|| format!("HTTP {}", self.status));

        Err(ApiError::RequestFailure {
            status: self.status,
            url: self.url,
            message,
            body: self.body,
        })
    }

    /// Map a JSON body onto the typed response contract
    pub fn decode<T: DeserializeOwned>(self) -> ApiResult<T> {
        match self.body {
            Some(ResponseBody::Json(value)) => serde_json::from_value(value).map_err(|e| ApiError::Decode {
                url: self.url,
                reason: e.to_string(),
            }),
            Some(ResponseBody::Text(_)) => Err(ApiError::Decode {
                url: self.url,
                reason: "expected a JSON body".to_string(),
            }),
            None => Err(ApiError::Decode {
                url: self.url,
                reason: "body was empty or unreadable".to_string(),
            }),
        }
    }

    // Off-contract 422 bodies still carry the server's own wording.
    fn validation_message(&self, detail: &[ValidationError]) -> String {
        let server_message = if detail.is_empty() {
            self.body.as_ref().and_then(ResponseBody::error_message)
        } else {
            None
        };
        match server_message {
            Some(message) => format!("{}: {}", UNPROCESSABLE_ENTITY_TEXT, message),
            None => UNPROCESSABLE_ENTITY_TEXT.to_string(),
        }
    }
}
