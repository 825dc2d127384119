use crate::core::{ConfigProvider, DoorApi, OwnerApi};
use crate::domain::model::{
    AccessLogEntry, AccessRequestAck, Cleared, CurrentCode, IssuedCode, PendingRequest,
    Snapshot, VerifyRequest, VerifyResponse,
};
use crate::utils::error::Result;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

pub const VISITOR_REQUEST_PATH: &str = "api/visitor_request";
pub const VERIFY_CODE_PATH: &str = "api/verify_code";
pub const CHECK_REQUESTS_PATH: &str = "api/check_requests";
pub const CLEAR_REQUESTS_PATH: &str = "api/clear_requests";
pub const REQUEST_CODE_PATH: &str = "api/request_code";
pub const GET_CODE_PATH: &str = "api/get_code";
pub const GET_LOGS_PATH: &str = "api/get_logs";
pub const GET_SNAPSHOT_PATH: &str = "api/get_snapshot";
pub const CLEAR_SNAPSHOT_PATH: &str = "api/clear_snapshot";

/// HTTP client for the door server.
#[derive(Debug, Clone)]
pub struct DoorClient {
    client: Client,
    base_url: Url,
}

impl DoorClient {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: Self::normalize_base(config.base_url())?,
        })
    }

    // 確保以 '/' 結尾，否則 join 會吃掉最後一段路徑
    fn normalize_base(base_url: &str) -> Result<Url> {
        let mut url = Url::parse(base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::read_json(path, response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).send().await?;
        Self::read_json(path, response).await
    }

    /// Non-2xx statuses are only logged; the body is parsed either way.
    async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        let status = response.status();
        tracing::debug!("{} responded with {}", path, status);
        if !status.is_success() {
            tracing::warn!("⚠️ {} returned HTTP {}", path, status);
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("❌ Could not parse {} response as JSON: {}", path, e);
            e
        })?;
        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl DoorApi for DoorClient {
    async fn visitor_request(&self) -> Result<AccessRequestAck> {
        // 伺服器只要回傳 JSON 就算成功，內容不影響顯示
        let value: serde_json::Value = self.post_empty(VISITOR_REQUEST_PATH).await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    async fn verify_code(&self, code: &str) -> Result<VerifyResponse> {
        let url = self.endpoint(VERIFY_CODE_PATH)?;
        tracing::debug!("POST {} (code length {})", url, code.len());

        let response = self
            .client
            .post(url)
            .json(&VerifyRequest {
                code: code.to_string(),
            })
            .send()
            .await?;

        let value: serde_json::Value = Self::read_json(VERIFY_CODE_PATH, response).await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl OwnerApi for DoorClient {
    async fn check_requests(&self) -> Result<PendingRequest> {
        self.get(CHECK_REQUESTS_PATH).await
    }

    async fn clear_requests(&self) -> Result<Cleared> {
        self.post_empty(CLEAR_REQUESTS_PATH).await
    }

    async fn issue_code(&self) -> Result<IssuedCode> {
        self.post_empty(REQUEST_CODE_PATH).await
    }

    async fn current_code(&self) -> Result<CurrentCode> {
        self.get(GET_CODE_PATH).await
    }

    async fn access_logs(&self) -> Result<Vec<AccessLogEntry>> {
        self.get(GET_LOGS_PATH).await
    }

    async fn latest_snapshot(&self) -> Result<Snapshot> {
        self.get(GET_SNAPSHOT_PATH).await
    }

    async fn clear_snapshot(&self) -> Result<Cleared> {
        self.post_empty(CLEAR_SNAPSHOT_PATH).await
    }
}
