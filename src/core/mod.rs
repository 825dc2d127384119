pub mod client;
pub mod owner;
pub mod visitor;

pub use crate::domain::model::{ResultTag, VerifyOutcome};
pub use crate::domain::ports::{ConfigProvider, DoorApi, Notifier, OwnerApi};
pub use crate::utils::error::Result;
