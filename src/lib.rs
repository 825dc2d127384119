pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::adapters::ConsoleNotifier;
pub use config::ClientSettings;
pub use crate::core::{client::DoorClient, owner::OwnerPanel, visitor::VisitorPanel};
pub use domain::model::{ResultTag, VerifyOutcome};
pub use utils::error::{DoorError, Result};
