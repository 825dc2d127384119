use crate::adapters::image_file::write_image;
use crate::core::{Notifier, OwnerApi, Result};
use crate::domain::model::{AccessLogEntry, CurrentCode, IssuedCode, PendingRequest, Snapshot};
use std::path::{Path, PathBuf};

pub const NO_PENDING_REQUESTS: &str = "No pending visitor requests";
pub const NO_ACTIVE_CODE: &str = "No active code";
pub const NO_ACCESS_LOGS: &str = "No access attempts recorded";
pub const NO_SNAPSHOT: &str = "No snapshot";

/// Owner-side view of the same door server.
pub struct OwnerPanel<A: OwnerApi, N: Notifier> {
    api: A,
    notifier: N,
}

impl<A: OwnerApi, N: Notifier> OwnerPanel<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self { api, notifier }
    }

    pub async fn check_requests(&self) -> Result<PendingRequest> {
        let pending = self.api.check_requests().await?;
        tracing::debug!("Pending request state: {:?}", pending);

        if pending.pending {
            self.notifier
                .alert(&format!("🔔 Visitor waiting since {}", pending.time));
        } else {
            self.notifier.show_result(NO_PENDING_REQUESTS);
        }
        Ok(pending)
    }

    pub async fn clear_requests(&self) -> Result<bool> {
        let cleared = self.api.clear_requests().await?.cleared;
        if cleared {
            self.notifier.show_result("Visitor requests cleared");
        }
        Ok(cleared)
    }

    pub async fn issue_code(&self) -> Result<IssuedCode> {
        let issued = self.api.issue_code().await?;
        tracing::info!("🔑 New access code issued");
        self.notifier.show_result(&format!("New code: {}", issued.code));
        Ok(issued)
    }

    pub async fn current_code(&self) -> Result<CurrentCode> {
        let current = self.api.current_code().await?;
        match &current.code {
            Some(code) => self.notifier.show_result(&format!("Active code: {}", code)),
            None => self.notifier.show_result(NO_ACTIVE_CODE),
        }
        Ok(current)
    }

    /// Entries arrive newest first and are shown in that order.
    pub async fn access_logs(&self) -> Result<Vec<AccessLogEntry>> {
        let logs = self.api.access_logs().await?;
        tracing::debug!("Fetched {} access log entries", logs.len());

        if logs.is_empty() {
            self.notifier.show_result(NO_ACCESS_LOGS);
        }
        for entry in &logs {
            self.notifier.show_result(&format_log_entry(entry));
        }
        Ok(logs)
    }

    /// Saves log images into `dir` as `<index>_<result>.jpg`, index 0 being the newest entry.
    pub async fn save_log_images(&self, logs: &[AccessLogEntry], dir: &Path) -> Result<Vec<PathBuf>> {
        let mut saved = Vec::new();
        for (index, entry) in logs.iter().enumerate() {
            let Some(bytes) = entry.image_bytes()? else {
                continue;
            };
            let path = dir.join(format!("{:03}_{}.jpg", index, sanitize(&entry.result)));
            write_image(&path, &bytes).await?;
            saved.push(path);
        }

        self.notifier.show_result(&format!(
            "Saved {} snapshot(s) to {}",
            saved.len(),
            dir.display()
        ));
        Ok(saved)
    }

    /// Shows the latest visitor snapshot and optionally writes it to `out`.
    pub async fn latest_snapshot(&self, out: Option<&Path>) -> Result<Snapshot> {
        let snapshot = self.api.latest_snapshot().await?;

        match (snapshot.image_bytes()?, out) {
            (None, _) => self.notifier.show_result(NO_SNAPSHOT),
            (Some(bytes), Some(path)) => {
                write_image(path, &bytes).await?;
                self.notifier.show_result(&format!(
                    "📷 Snapshot saved to {} ({} bytes)",
                    path.display(),
                    bytes.len()
                ));
            }
            (Some(bytes), None) => {
                let name = snapshot.file.as_deref().unwrap_or("unnamed");
                self.notifier
                    .show_result(&format!("📷 Snapshot {} ({} bytes)", name, bytes.len()));
            }
        }
        Ok(snapshot)
    }

    pub async fn clear_snapshot(&self) -> Result<bool> {
        let cleared = self.api.clear_snapshot().await?.cleared;
        if cleared {
            self.notifier.show_result("Snapshot cleared");
        }
        Ok(cleared)
    }
}

fn sanitize(tag: &str) -> String {
    tag.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn format_log_entry(entry: &AccessLogEntry) -> String {
    let time = entry
        .parsed_time()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| entry.time.clone());

    let result = entry
        .outcome()
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| entry.result.clone());

    if entry.has_snapshot() {
        format!("{}  {}  📷", time, result)
    } else {
        format!("{}  {}", time, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Cleared;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Clone)]
    struct FakeOwnerApi {
        pending: PendingRequest,
        code: Option<String>,
        logs: Vec<AccessLogEntry>,
        snapshot: Snapshot,
    }

    impl Default for FakeOwnerApi {
        fn default() -> Self {
            Self {
                pending: PendingRequest {
                    pending: false,
                    time: String::new(),
                },
                code: None,
                logs: Vec::new(),
                snapshot: Snapshot::default(),
            }
        }
    }

    #[async_trait::async_trait]
    impl OwnerApi for FakeOwnerApi {
        async fn check_requests(&self) -> Result<PendingRequest> {
            Ok(self.pending.clone())
        }

        async fn clear_requests(&self) -> Result<Cleared> {
            Ok(Cleared { cleared: true })
        }

        async fn issue_code(&self) -> Result<IssuedCode> {
            Ok(IssuedCode {
                message: "Code generated".to_string(),
                code: "482913".to_string(),
            })
        }

        async fn current_code(&self) -> Result<CurrentCode> {
            Ok(CurrentCode {
                code: self.code.clone(),
            })
        }

        async fn access_logs(&self) -> Result<Vec<AccessLogEntry>> {
            Ok(self.logs.clone())
        }

        async fn latest_snapshot(&self) -> Result<Snapshot> {
            Ok(self.snapshot.clone())
        }

        async fn clear_snapshot(&self) -> Result<Cleared> {
            Ok(Cleared { cleared: false })
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, message: &str) {
            self.lines.lock().unwrap().push(format!("alert: {}", message));
        }

        fn show_result(&self, message: &str) {
            self.lines.lock().unwrap().push(message.to_string());
        }
    }

    #[tokio::test]
    async fn test_pending_request_alerts_owner() {
        let api = FakeOwnerApi {
            pending: PendingRequest {
                pending: true,
                time: "2025-06-01 10:30 AM".to_string(),
            },
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();
        let panel = OwnerPanel::new(api, notifier.clone());

        let pending = panel.check_requests().await.unwrap();

        assert!(pending.pending);
        assert_eq!(
            *notifier.lines.lock().unwrap(),
            vec!["alert: 🔔 Visitor waiting since 2025-06-01 10:30 AM"]
        );
    }

    #[tokio::test]
    async fn test_no_pending_request() {
        let notifier = RecordingNotifier::default();
        let panel = OwnerPanel::new(FakeOwnerApi::default(), notifier.clone());

        panel.check_requests().await.unwrap();

        assert_eq!(*notifier.lines.lock().unwrap(), vec![NO_PENDING_REQUESTS]);
    }

    #[tokio::test]
    async fn test_current_code_expired_and_active() {
        let notifier = RecordingNotifier::default();
        let panel = OwnerPanel::new(FakeOwnerApi::default(), notifier.clone());
        assert!(panel.current_code().await.unwrap().code.is_none());

        let active = OwnerPanel::new(
            FakeOwnerApi {
                code: Some("123456".to_string()),
                ..Default::default()
            },
            notifier.clone(),
        );
        active.current_code().await.unwrap();

        assert_eq!(
            *notifier.lines.lock().unwrap(),
            vec![NO_ACTIVE_CODE, "Active code: 123456"]
        );
    }

    #[tokio::test]
    async fn test_issue_code_and_clear_snapshot() {
        let notifier = RecordingNotifier::default();
        let panel = OwnerPanel::new(FakeOwnerApi::default(), notifier.clone());

        assert_eq!(panel.issue_code().await.unwrap().code, "482913");
        assert!(!panel.clear_snapshot().await.unwrap());
        assert!(panel.clear_requests().await.unwrap());

        assert_eq!(
            *notifier.lines.lock().unwrap(),
            vec!["New code: 482913", "Visitor requests cleared"]
        );
    }

    #[tokio::test]
    async fn test_access_logs_keep_server_order() {
        let api = FakeOwnerApi {
            logs: vec![
                AccessLogEntry {
                    time: "2025-06-01 11:00 PM".to_string(),
                    result: "success".to_string(),
                    img: Some("data:image/jpeg;base64,AAAA".to_string()),
                },
                AccessLogEntry {
                    time: "2025-06-01 09:05 AM".to_string(),
                    result: "expired".to_string(),
                    img: None,
                },
                AccessLogEntry {
                    time: "unknown".to_string(),
                    result: "tampered".to_string(),
                    img: None,
                },
            ],
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();
        let panel = OwnerPanel::new(api, notifier.clone());

        let logs = panel.access_logs().await.unwrap();

        assert_eq!(logs.len(), 3);
        assert_eq!(
            *notifier.lines.lock().unwrap(),
            vec![
                "2025-06-01 23:00  ✅ Door Unlocked  📷",
                "2025-06-01 09:05  ⌛ Code Expired",
                "unknown  tampered",
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_access_logs() {
        let notifier = RecordingNotifier::default();
        let panel = OwnerPanel::new(FakeOwnerApi::default(), notifier.clone());

        assert!(panel.access_logs().await.unwrap().is_empty());
        assert_eq!(*notifier.lines.lock().unwrap(), vec![NO_ACCESS_LOGS]);
    }

    #[tokio::test]
    async fn test_latest_snapshot_missing() {
        let notifier = RecordingNotifier::default();
        let panel = OwnerPanel::new(FakeOwnerApi::default(), notifier.clone());

        let snapshot = panel.latest_snapshot(None).await.unwrap();

        assert!(snapshot.img.is_none());
        assert_eq!(*notifier.lines.lock().unwrap(), vec![NO_SNAPSHOT]);
    }

    #[tokio::test]
    async fn test_latest_snapshot_written_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("visitor.jpg");
        let api = FakeOwnerApi {
            snapshot: Snapshot {
                img: Some("data:image/jpeg;base64,aGkh".to_string()),
                file: Some("snapshot_20250601_103000.jpg".to_string()),
            },
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();
        let panel = OwnerPanel::new(api, notifier.clone());

        panel.latest_snapshot(Some(out.as_path())).await.unwrap();
        panel.latest_snapshot(None).await.unwrap();

        assert_eq!(std::fs::read(&out).unwrap(), b"hi!".to_vec());
        let lines = notifier.lines.lock().unwrap();
        assert!(lines[0].starts_with("📷 Snapshot saved to "));
        assert_eq!(lines[1], "📷 Snapshot snapshot_20250601_103000.jpg (3 bytes)");
    }

    #[tokio::test]
    async fn test_save_log_images_skips_entries_without_image() {
        let temp_dir = TempDir::new().unwrap();
        let logs = vec![
            AccessLogEntry {
                time: "2025-06-01 11:00 PM".to_string(),
                result: "success".to_string(),
                img: Some("data:image/jpeg;base64,aGkh".to_string()),
            },
            AccessLogEntry {
                time: "2025-06-01 09:05 AM".to_string(),
                result: "expired".to_string(),
                img: None,
            },
            AccessLogEntry {
                time: "2025-06-01 08:00 AM".to_string(),
                result: "../fail".to_string(),
                img: Some("data:image/jpeg;base64,aGkh".to_string()),
            },
        ];
        let panel = OwnerPanel::new(FakeOwnerApi::default(), RecordingNotifier::default());

        let saved = panel.save_log_images(&logs, temp_dir.path()).await.unwrap();

        assert_eq!(
            saved,
            vec![
                temp_dir.path().join("000_success.jpg"),
                temp_dir.path().join("002____fail.jpg"),
            ]
        );
        assert_eq!(std::fs::read(&saved[1]).unwrap(), b"hi!".to_vec());
    }
}
