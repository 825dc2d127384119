use crate::domain::model::{
    AccessLogEntry, AccessRequestAck, Cleared, CurrentCode, IssuedCode, PendingRequest,
    Snapshot, VerifyResponse,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    /// `None` means requests wait for the server indefinitely.
    fn timeout(&self) -> Option<Duration>;
    fn user_agent(&self) -> &str;
}

/// Where user-facing messages end up: a popup-style alert and a single result line.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
    fn show_result(&self, message: &str);
}

#[async_trait]
pub trait DoorApi: Send + Sync {
    async fn visitor_request(&self) -> Result<AccessRequestAck>;
    async fn verify_code(&self, code: &str) -> Result<VerifyResponse>;
}

#[async_trait]
pub trait OwnerApi: Send + Sync {
    async fn check_requests(&self) -> Result<PendingRequest>;
    async fn clear_requests(&self) -> Result<Cleared>;
    async fn issue_code(&self) -> Result<IssuedCode>;
    async fn current_code(&self) -> Result<CurrentCode>;
    async fn access_logs(&self) -> Result<Vec<AccessLogEntry>>;
    async fn latest_snapshot(&self) -> Result<Snapshot>;
    async fn clear_snapshot(&self) -> Result<Cleared>;
}
