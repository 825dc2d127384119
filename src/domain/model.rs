use crate::utils::error::{DoorError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ACCESS_REQUEST_ACK: &str = "Request sent to owner.";

/// `POST /api/verify_code` 的請求內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

/// Server classification of a verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultTag {
    Success,
    Fail,
    Expired,
}

impl ResultTag {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "success" => Some(ResultTag::Success),
            "fail" => Some(ResultTag::Fail),
            "expired" => Some(ResultTag::Expired),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            ResultTag::Success => "success",
            ResultTag::Fail => "fail",
            ResultTag::Expired => "expired",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ResultTag::Success => "✅ Door Unlocked",
            ResultTag::Fail => "❌ Incorrect Code",
            ResultTag::Expired => "⌛ Code Expired",
        }
    }
}

impl fmt::Display for ResultTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Known(ResultTag),
    /// Raw tag when the server sent a string, `None` when the field was missing or not a string.
    Unrecognized(Option<String>),
}

impl VerifyOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            VerifyOutcome::Known(tag) => Some(tag.message()),
            VerifyOutcome::Unrecognized(_) => None,
        }
    }
}

impl From<&VerifyResponse> for VerifyOutcome {
    fn from(response: &VerifyResponse) -> Self {
        match response.result.as_ref().and_then(|v| v.as_str()) {
            Some(tag) => ResultTag::from_tag(tag)
                .map(VerifyOutcome::Known)
                .unwrap_or_else(|| VerifyOutcome::Unrecognized(Some(tag.to_string()))),
            None => VerifyOutcome::Unrecognized(None),
        }
    }
}

/// Body of `POST /api/visitor_request`. Nothing in it drives the display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessRequestAck {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequest {
    pub pending: bool,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCode {
    #[serde(default)]
    pub message: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentCode {
    /// `None` 表示沒有有效的代碼（不存在或已過期）
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLogEntry {
    pub time: String,
    pub result: String,
    #[serde(default)]
    pub img: Option<String>,
}

impl AccessLogEntry {
    pub const TIME_FORMAT: &'static str = "%Y-%m-%d %I:%M %p";

    pub fn parsed_time(&self) -> Option<chrono::NaiveDateTime> {
        chrono::NaiveDateTime::parse_from_str(&self.time, Self::TIME_FORMAT).ok()
    }

    pub fn outcome(&self) -> VerifyOutcome {
        ResultTag::from_tag(&self.result)
            .map(VerifyOutcome::Known)
            .unwrap_or_else(|| VerifyOutcome::Unrecognized(Some(self.result.clone())))
    }

    pub fn has_snapshot(&self) -> bool {
        self.img.is_some()
    }

    pub fn image_bytes(&self) -> Result<Option<Vec<u8>>> {
        self.img.as_deref().map(decode_image_data_url).transpose()
    }
}

/// Latest visitor snapshot as served by `GET /api/get_snapshot`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
}

impl Snapshot {
    /// `None` when the server has no snapshot.
    pub fn image_bytes(&self) -> Result<Option<Vec<u8>>> {
        self.img.as_deref().map(decode_image_data_url).transpose()
    }
}

/// Decodes `data:<mime>;base64,<payload>` into raw image bytes.
pub fn decode_image_data_url(data_url: &str) -> Result<Vec<u8>> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| DoorError::InvalidSnapshot {
            reason: "missing ',' separator".to_string(),
        })?;

    if !header.starts_with("data:") || !header.ends_with(";base64") {
        return Err(DoorError::InvalidSnapshot {
            reason: format!("unexpected header '{}'", header),
        });
    }

    Ok(STANDARD.decode(payload.trim())?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cleared {
    pub cleared: bool,
}
