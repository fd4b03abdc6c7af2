//! Lighthouse API client
//!
//! Direct Tencent Cloud API 3.0 implementation: JSON POST bodies signed with
//! TC3-HMAC-SHA256.

use crate::error::{Result, TencentError};
use crate::model::{
    CreateInstancesRequest, CreateInstancesResponse, DescribeBundlesRequest,
    DescribeBundlesResponse,
};
use crate::signer::{self, SigningRequest};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://lighthouse.tencentcloudapi.com";
const SERVICE: &str = "lighthouse";
const API_VERSION: &str = "2020-03-24";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// API key pair
#[derive(Clone)]
pub struct Credentials {
    pub secret_id: String,
    pub secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"***")
            .finish()
    }
}

/// Lighthouse API client bound to one region
pub struct LighthouseClient {
    http: reqwest::Client,
    endpoint: String,
    host: String,
    region: String,
    credentials: Credentials,
}

impl LighthouseClient {
    pub fn new(credentials: Credentials, region: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(credentials, region, DEFAULT_ENDPOINT)
    }

    /// Create a client against a custom endpoint (private endpoints, tests)
    pub fn with_endpoint(
        credentials: Credentials,
        region: impl Into<String>,
        endpoint: &str,
    ) -> Result<Self> {
        let url = reqwest::Url::parse(endpoint)
            .map_err(|e| TencentError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(TencentError::InvalidEndpoint(endpoint.to_string())),
        };

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            host,
            region: region.into(),
            credentials,
        })
    }

    /// DescribeBundles
    pub async fn describe_bundles(
        &self,
        req: &DescribeBundlesRequest,
    ) -> Result<DescribeBundlesResponse> {
        self.call("DescribeBundles", req).await
    }

    /// CreateInstances
    pub async fn create_instances(
        &self,
        req: &CreateInstancesRequest,
    ) -> Result<CreateInstancesResponse> {
        self.call("CreateInstances", req).await
    }

    /// Sign and send one API action, unwrapping the `Response` envelope
    async fn call<Req, Resp>(&self, action: &str, req: &Req) -> Result<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let payload = serde_json::to_string(req)?;
        let timestamp = chrono::Utc::now().timestamp();
        let authorization = signer::authorization(&SigningRequest {
            secret_id: &self.credentials.secret_id,
            secret_key: &self.credentials.secret_key,
            service: SERVICE,
            host: &self.host,
            payload: &payload,
            timestamp,
        })?;

        tracing::debug!(action, region = %self.region, "Calling Lighthouse API");

        let response = self
            .http
            .post(format!("{}/", self.endpoint))
            .header("Authorization", authorization)
            .header("Content-Type", signer::CONTENT_TYPE)
            .header("X-TC-Action", action)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("X-TC-Version", API_VERSION)
            .header("X-TC-Region", &self.region)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TencentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_envelope(&body)
    }
}

/// Unwrap `{"Response": {...}}`, surfacing `Response.Error` as an API error
fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let mut envelope: serde_json::Value = serde_json::from_str(body)?;
    let response = envelope
        .get_mut("Response")
        .map(serde_json::Value::take)
        .ok_or_else(|| TencentError::MalformedResponse("missing Response field".to_string()))?;

    if let Some(error) = response.get("Error") {
        let field = |name: &str| {
            error
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        return Err(TencentError::Api {
            code: field("Code"),
            message: field("Message"),
            request_id: response
                .get("RequestId")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
        });
    }

    Ok(serde_json::from_value(response)?)
}
