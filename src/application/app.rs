use std::sync::Arc;
use std::time::Duration;

use super::sync::SnapshotSynchronizer;
use super::Synchronizer;
use crate::domain::bounty;
use crate::domain::errors::{AggregatorError, DataStoreError};
use crate::domain::models::{
    Action, Bounty, Channel, ChannelBounties, DataStore, ALL_COUNTRIES_CODE,
};
use crate::infrastructure::channel_notifier::ChannelNotifier;
use crate::infrastructure::file_snapshot::FileSnapshotSource;
use crate::infrastructure::memory::InMemoryStore;
use crate::infrastructure::shutdown::ShutdownChannel;
use tokio::sync::{broadcast, mpsc};

/// The read and sync surface exposed to the service layer.
#[async_trait::async_trait]
pub trait Application {
    async fn run_sync(
        &self,
        snapshot_path: &str,
        interval: Duration,
        num_retries: usize,
        shutdown: broadcast::Sender<()>,
    ) -> Result<(), AggregatorError>;

    /// Computes the bounty board, optionally restricted to one country.
    async fn get_channel_bounties(
        &self,
        country: Option<String>,
    ) -> Result<Vec<ChannelBounties>, DataStoreError>;

    /// Delivers the country list as a single value through the returned
    /// channel. Dropping the receiver cancels delivery.
    fn get_country_list(&self) -> mpsc::Receiver<Vec<String>>;

    /// Loads one bounty by its action id, with its execution history.
    async fn get_bounty(&self, action_id: String) -> Result<Bounty, DataStoreError>;

    async fn get_bounty_actions(&self) -> Result<Vec<Action>, DataStoreError>;

    async fn get_channels(&self) -> Result<Vec<Channel>, DataStoreError>;

    async fn get_channel(&self, id: i64) -> Result<Channel, DataStoreError>;
}

#[derive(Clone)]
pub struct App<D> {
    store: Arc<D>,
}

impl App<InMemoryStore> {
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryStore::default()))
    }
}

impl Default for App<InMemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> App<D> {
    pub fn with_store(store: Arc<D>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<D> Application for App<D>
where
    D: DataStore + Send + Sync + 'static,
{
    async fn run_sync(
        &self,
        snapshot_path: &str,
        interval: Duration,
        num_retries: usize,
        shutdown: broadcast::Sender<()>,
    ) -> Result<(), AggregatorError> {
        let shutdown_channel = ShutdownChannel::new(shutdown);
        let source = FileSnapshotSource::from_path(snapshot_path, num_retries);
        let synchronizer = SnapshotSynchronizer::builder()
            .source(source)
            .notifier(ChannelNotifier::new(
                self.store.clone(),
                shutdown_channel.clone(),
            ))
            .shutdown(shutdown_channel)
            .interval(interval)
            .build();
        tracing::info!("Running snapshot sync ...");
        synchronizer.run().await
    }

    async fn get_channel_bounties(
        &self,
        country: Option<String>,
    ) -> Result<Vec<ChannelBounties>, DataStoreError> {
        tracing::info!(
            "Getting channel bounties for country {}",
            country.as_deref().unwrap_or(ALL_COUNTRIES_CODE)
        );

        let mut actions = self.store.get_bounty_actions().await?;
        let transactions = self.store.get_transactions().await?;
        let mut channels = self.store.get_channels().await?;

        // Store iteration order is arbitrary; pin the board to a stable order.
        actions.sort_by(|a, b| a.public_id.cmp(&b.public_id));
        channels.sort_by_key(|c| c.id);

        if let Some(code) = country.filter(|c| c != ALL_COUNTRIES_CODE) {
            channels.retain(|c| c.country_alpha2.eq_ignore_ascii_case(&code));
        }

        Ok(bounty::make_bounties(
            &actions,
            Some(&transactions),
            &channels,
        ))
    }

    fn get_country_list(&self) -> mpsc::Receiver<Vec<String>> {
        let (tx, rx) = mpsc::channel(1);
        let store = self.store.clone();

        tokio::spawn(async move {
            let actions = match store.get_bounty_actions().await {
                Ok(actions) => actions,
                Err(e) => {
                    tracing::error!("Failed to load actions for country list: {:?}", e);
                    return;
                }
            };

            let codes = bounty::country_codes(&actions);

            if tx.send(codes).await.is_err() {
                tracing::debug!("Country list receiver dropped before delivery");
            }
        });

        rx
    }

    async fn get_bounty(&self, action_id: String) -> Result<Bounty, DataStoreError> {
        tracing::info!("Getting bounty for action {}", action_id);
        let action = self.store.get_action(action_id.clone()).await?;
        let transactions = self.store.get_transactions_by_action(action_id).await?;
        Ok(Bounty::new(action, transactions))
    }

    async fn get_bounty_actions(&self) -> Result<Vec<Action>, DataStoreError> {
        tracing::info!("Getting all bounty actions ...");
        self.store.get_bounty_actions().await
    }

    async fn get_channels(&self) -> Result<Vec<Channel>, DataStoreError> {
        tracing::info!("Getting all channels ...");
        self.store.get_channels().await
    }

    async fn get_channel(&self, id: i64) -> Result<Channel, DataStoreError> {
        tracing::info!("Getting channel {}", id);
        self.store.get_channel(id).await
    }
}
