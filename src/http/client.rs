use log::debug;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::ResponseBody;
use super::response::RawResponse;
use crate::errors::{ApiError, ApiResult};

const OPERATION: &str = "HttpClient::new";

/// HTTP client sending default headers on every request, cancellable per call
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration, headers: &[(String, String)]) -> ApiResult<Self> {
        let default_headers = Self::build_headers(headers)?;
        let client = Self::build_client(user_agent, timeout, default_headers)?;
        Ok(Self { client })
    }

    /// Issue a single GET; the request is abandoned as soon as `cancel` fires
    pub async fn get(&self, url: &str, cancel: &CancellationToken) -> ApiResult<RawResponse> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("GET {} cancelled", url);
                Err(ApiError::Cancelled { url: url.to_string() })
            }
            response = self.send_get_request(url) => response,
        }
    }

    fn build_headers(headers: &[(String, String)]) -> ApiResult<HeaderMap> {
        let mut map = HeaderMap::new();
        map.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::invalid_argument(OPERATION, format!("invalid header name '{}'", name)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ApiError::invalid_argument(OPERATION, format!("invalid value for header '{}'", name)))?;
            map.insert(name, value);
        }

        Ok(map)
    }

    fn build_client(user_agent: &str, timeout: Duration, headers: HeaderMap) -> ApiResult<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::invalid_argument(OPERATION, format!("failed to build HTTP client: {}", e)))
    }

    async fn send_get_request(&self, url: &str) -> ApiResult<RawResponse> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        let body = ResponseBody::read(response).await;
        debug!("GET {} -> {}", url, status);

        Ok(RawResponse {
            status,
            url: url.to_string(),
            body,
        })
    }
}
