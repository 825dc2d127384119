use crate::config::toml_config::TomlConfig;
use crate::config::ClientSettings;
use crate::core::client::DoorClient;
use crate::core::owner::OwnerPanel;
use crate::core::visitor::VisitorPanel;
use crate::core::{Notifier, VerifyOutcome};
use crate::utils::error::{DoorError, Result};
use crate::utils::validation::{validate_range, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "door-access")]
#[command(about = "Visitor and owner client for a door-access server")]
pub struct CliConfig {
    /// Door server address, e.g. http://127.0.0.1:5000
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Give up on a request after this many seconds (default: wait indefinitely)
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Ask the owner to let you in
    RequestAccess,
    /// Submit a door code
    Verify {
        #[arg(allow_hyphen_values = true)]
        code: String,
    },
    /// Owner-side actions
    Owner {
        #[command(subcommand)]
        action: OwnerCommand,
    },
}

/// Exit code when the server answers with a result tag we have no message for.
pub const EXIT_UNRECOGNIZED_RESULT: i32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum OwnerCommand {
    /// Show whether a visitor is waiting
    Check,
    /// Dismiss pending visitor requests
    Clear,
    /// Generate a new access code
    IssueCode,
    /// Show the currently valid code, if any
    CurrentCode,
    /// List recent access attempts
    Logs {
        /// Directory to save the attached snapshots into
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show the latest visitor snapshot
    Snapshot {
        /// File to write the decoded image to
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Forget the latest visitor snapshot
    ClearSnapshot,
}

impl CliConfig {
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        match &self.config {
            Some(path) => {
                tracing::debug!("Loading config file {}", path.display());
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Ok(Some(file))
            }
            None => Ok(None),
        }
    }

    /// Flags win over the config file, which wins over defaults.
    pub fn resolve(&self, file: Option<&TomlConfig>) -> Result<ClientSettings> {
        let mut settings = ClientSettings::default();
        if let Some(file) = file {
            settings = settings.merge_file(file);
        }
        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(secs) = self.timeout_seconds {
            settings.timeout = Some(Duration::from_secs(secs));
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(secs) = self.timeout_seconds {
            validate_range("timeout_seconds", secs, 1, 600)?;
        }
        Ok(())
    }
}

/// Runs the parsed command and returns the process exit code.
pub async fn execute<N: Notifier>(
    config: &CliConfig,
    file: Result<Option<TomlConfig>>,
    notifier: N,
) -> i32 {
    match run(config, file, notifier).await {
        Ok(code) => code,
        Err(e) => report(&e),
    }
}

async fn run<N: Notifier>(
    config: &CliConfig,
    file: Result<Option<TomlConfig>>,
    notifier: N,
) -> Result<i32> {
    config.validate()?;
    let file = file?;
    let settings = config.resolve(file.as_ref())?;
    tracing::info!("Using door server at {}", settings.base_url);

    let client = DoorClient::new(&settings)?;

    match &config.command {
        Command::RequestAccess => {
            VisitorPanel::new(client, notifier).request_access().await?;
        }
        Command::Verify { code } => {
            let outcome = VisitorPanel::new(client, notifier).verify_code(code).await?;
            if let VerifyOutcome::Unrecognized(raw) = outcome {
                tracing::warn!("Server returned a result with no known message: {:?}", raw);
                return Ok(EXIT_UNRECOGNIZED_RESULT);
            }
        }
        Command::Owner { action } => {
            let panel = OwnerPanel::new(client, notifier);
            match action {
                OwnerCommand::Check => {
                    panel.check_requests().await?;
                }
                OwnerCommand::Clear => {
                    panel.clear_requests().await?;
                }
                OwnerCommand::IssueCode => {
                    panel.issue_code().await?;
                }
                OwnerCommand::CurrentCode => {
                    panel.current_code().await?;
                }
                OwnerCommand::Logs { out } => {
                    let logs = panel.access_logs().await?;
                    if let Some(dir) = out {
                        panel.save_log_images(&logs, dir).await?;
                    }
                }
                OwnerCommand::Snapshot { out } => {
                    panel.latest_snapshot(out.as_deref()).await?;
                }
                OwnerCommand::ClearSnapshot => {
                    panel.clear_snapshot().await?;
                }
            }
        }
    }

    Ok(0)
}

fn report(e: &DoorError) -> i32 {
    tracing::error!(
        "❌ Door request failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    e.severity().exit_code()
}
