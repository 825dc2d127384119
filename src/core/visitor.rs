use crate::core::{DoorApi, Notifier, Result, VerifyOutcome};
use crate::domain::model::ACCESS_REQUEST_ACK;

/// The visitor-facing actions: ask the owner for access, or type in a code.
pub struct VisitorPanel<A: DoorApi, N: Notifier> {
    api: A,
    notifier: N,
}

impl<A: DoorApi, N: Notifier> VisitorPanel<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self { api, notifier }
    }

    /// Sends one access request and shows the fixed acknowledgment.
    pub async fn request_access(&self) -> Result<()> {
        tracing::info!("🔔 Requesting access from owner");
        let ack = self.api.visitor_request().await?;
        tracing::debug!("Visitor request acknowledged: {:?}", ack);

        self.notifier.alert(ACCESS_REQUEST_ACK);
        Ok(())
    }

    /// Unrecognized tags leave the result line untouched.
    pub async fn verify_code(&self, input: &str) -> Result<VerifyOutcome> {
        let code = trim_code(input);
        tracing::info!("🔑 Verifying code ({} chars)", code.chars().count());

        let response = self.api.verify_code(code).await?;
        let outcome = VerifyOutcome::from(&response);

        match &outcome {
            VerifyOutcome::Known(tag) => {
                tracing::info!("Verification result: {}", tag);
                self.notifier.show_result(tag.message());
            }
            VerifyOutcome::Unrecognized(raw) => {
                tracing::warn!("⚠️ Unrecognized verification result: {:?}", raw);
            }
        }

        Ok(outcome)
    }
}

/// Strips the same characters a browser's `String.prototype.trim` does:
/// Unicode spaces and line terminators plus U+FEFF, but not U+0085.
pub fn trim_code(input: &str) -> &str {
    input.trim_matches(|c: char| c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}'))
}
