use crate::domain::errors::SnapshotError;
use crate::domain::models::{Action, Channel, Transaction};
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

/// A full reference-data snapshot as published by the platform backend.
///
/// The transaction list is optional in the published document; an absent
/// list means no history is available yet.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct BountySnapshot {
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// A trait representing the upstream source of bounty reference data.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SnapshotSource {
    /// Retrieves the current snapshot of actions, transactions and channels.
    ///
    /// # Returns
    ///
    /// * `Result<BountySnapshot, SnapshotError>` - The full snapshot if successful, or an error if the operation fails.
    async fn fetch(&self) -> Result<BountySnapshot, SnapshotError>;
}
