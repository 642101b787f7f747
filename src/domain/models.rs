use super::errors::{DataStoreError, NotifierError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

/// Sentinel country marker placed in front of the real country list.
pub const ALL_COUNTRIES_CODE: &str = "00";

/// A bounty-capable payment action definition, sourced externally.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Action {
    /// Unique identifier of the action
    pub public_id: String,
    /// Identifier of the channel this action runs against
    pub channel_id: i64,
    /// ISO 3166-1 alpha-2 country code
    pub country_alpha2: String,
    /// Kind of payment operation (airtime, p2p, bill pay, ...)
    pub transaction_type: String,
    /// Whether the bounty for this action is currently open
    pub bounty_is_open: bool,
    /// Reward amount paid out on completion
    pub bounty_amount: i64,
}

/// A historical record of an executed action.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Transaction {
    /// Unique identifier of the transaction
    pub uuid: String,
    /// Identifier of the action this transaction was executed against
    pub action_id: String,
    /// Terminal status reported for the run
    pub status: String,
    /// When the transaction was initiated
    pub initiated_at: DateTime<Utc>,
}

/// A payment provider/integration through which actions are executed.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Channel {
    /// Unique identifier of the channel
    pub id: i64,
    /// Display name of the provider
    pub name: String,
    /// ISO 3166-1 alpha-2 country code the provider operates in
    pub country_alpha2: String,
}

/// Reward eligibility computed for one action: the action paired with the
/// transactions that were executed against it. Ephemeral, recomputed on
/// every aggregation call.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Bounty {
    pub action: Action,
    pub transactions: Vec<Transaction>,
}

impl Bounty {
    pub fn new(action: Action, transactions: Vec<Transaction>) -> Self {
        Self {
            action,
            transactions,
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// A bounty is open when its action is flagged open or it has already
    /// been attempted at least once.
    pub fn is_open(&self) -> bool {
        self.action.bounty_is_open || self.transaction_count() != 0
    }
}

/// The open bounties grouped under their owning channel.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ChannelBounties {
    pub channel: Channel,
    pub bounties: Vec<Bounty>,
}

/// Trait for the reference-data store operations.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DataStore {
    /// Stores an action, replacing any previous version with the same id.
    async fn store_action(&self, action: Action) -> Result<(), DataStoreError>;

    /// Stores a transaction. Re-delivered uuids are ignored.
    async fn store_transaction(&self, transaction: Transaction) -> Result<(), DataStoreError>;

    /// Stores a channel, replacing any previous version with the same id.
    async fn store_channel(&self, channel: Channel) -> Result<(), DataStoreError>;

    /// Retrieves all bounty-capable actions.
    async fn get_bounty_actions(&self) -> Result<Vec<Action>, DataStoreError>;

    /// Retrieves all recorded transactions.
    async fn get_transactions(&self) -> Result<Vec<Transaction>, DataStoreError>;

    /// Retrieves all known channels.
    async fn get_channels(&self) -> Result<Vec<Channel>, DataStoreError>;

    /// Retrieves a specific action by its public id.
    async fn get_action(&self, public_id: String) -> Result<Action, DataStoreError>;

    /// Retrieves a specific channel by its id.
    async fn get_channel(&self, id: i64) -> Result<Channel, DataStoreError>;

    /// Retrieves the transactions executed against a specific action.
    async fn get_transactions_by_action(
        &self,
        action_id: String,
    ) -> Result<Vec<Transaction>, DataStoreError>;
}

/// Trait for forwarding synchronized records into the store.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Notifier {
    /// Notifies about a synchronized action.
    async fn notify_action(&self, action: Action) -> Result<(), NotifierError>;

    /// Notifies about a synchronized transaction.
    async fn notify_transaction(&self, transaction: Transaction) -> Result<(), NotifierError>;

    /// Notifies about a synchronized channel.
    async fn notify_channel(&self, channel: Channel) -> Result<(), NotifierError>;
}
