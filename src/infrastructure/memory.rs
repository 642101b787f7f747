use crate::domain::{
    errors::DataStoreError,
    models::{Action, Channel, DataStore, Transaction},
};
use dashmap::DashMap;

/// Concurrent in-memory reference-data store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    actions: DashMap<String, Action>,
    transactions: DashMap<String, Transaction>,
    channels: DashMap<i64, Channel>,
    // action public_id -> [transaction uuid]
    transactions_by_action: DashMap<String, Vec<String>>,
}

#[async_trait::async_trait]
impl DataStore for InMemoryStore {
    async fn store_action(&self, action: Action) -> Result<(), DataStoreError> {
        self.actions.insert(action.public_id.clone(), action);
        Ok(())
    }

    async fn store_transaction(&self, transaction: Transaction) -> Result<(), DataStoreError> {
        let uuid = transaction.uuid.clone();
        let action_id = transaction.action_id.clone();

        if self.transactions.contains_key(&uuid) {
            tracing::warn!("Transaction already recorded: {}", uuid);
            return Ok(());
        }

        self.transactions.insert(uuid.clone(), transaction);

        self.transactions_by_action
            .entry(action_id)
            .or_default()
            .push(uuid);

        Ok(())
    }

    async fn store_channel(&self, channel: Channel) -> Result<(), DataStoreError> {
        self.channels.insert(channel.id, channel);
        Ok(())
    }

    async fn get_bounty_actions(&self) -> Result<Vec<Action>, DataStoreError> {
        Ok(self.actions.iter().map(|v| v.value().clone()).collect())
    }

    async fn get_transactions(&self) -> Result<Vec<Transaction>, DataStoreError> {
        Ok(self
            .transactions
            .iter()
            .map(|v| v.value().clone())
            .collect())
    }

    async fn get_channels(&self) -> Result<Vec<Channel>, DataStoreError> {
        Ok(self.channels.iter().map(|v| v.value().clone()).collect())
    }

    async fn get_action(&self, public_id: String) -> Result<Action, DataStoreError> {
        self.actions
            .get(&public_id)
            .map(|v| v.value().clone())
            .ok_or(DataStoreError::ActionNotFound(public_id))
    }

    async fn get_channel(&self, id: i64) -> Result<Channel, DataStoreError> {
        self.channels
            .get(&id)
            .map(|v| v.value().clone())
            .ok_or(DataStoreError::ChannelNotFound(id))
    }

    async fn get_transactions_by_action(
        &self,
        action_id: String,
    ) -> Result<Vec<Transaction>, DataStoreError> {
        Ok(self
            .transactions_by_action
            .get(&action_id)
            .map(|v| v.value().clone())
            .unwrap_or_default()
            .iter()
            .filter_map(|uuid| self.transactions.get(uuid).map(|t| t.value().clone()))
            .collect())
    }
}
