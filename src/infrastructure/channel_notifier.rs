use crate::domain::{
    errors::NotifierError,
    models::{Action, Channel, DataStore, Notifier, Transaction},
};
use std::{marker::PhantomData, sync::Arc};
use tokio::sync::mpsc;

use super::shutdown::Shutdown;

/// Forwards synchronized records into the store through bounded channels,
/// one listener task per record kind.
#[derive(Clone)]
pub struct ChannelNotifier<D, S> {
    actions: mpsc::Sender<Action>,
    transactions: mpsc::Sender<Transaction>,
    channels: mpsc::Sender<Channel>,
    _shutdown: PhantomData<S>,
    _phantom: PhantomData<D>,
}

impl<D, S> ChannelNotifier<D, S>
where
    D: DataStore + Send + Sync + 'static,
    S: Shutdown + Send + Sync + 'static + Clone,
{
    pub fn new(store: Arc<D>, shutdown: S) -> Self {
        let (tx_actions, rx_actions) = mpsc::channel(100);
        let (tx_transactions, rx_transactions) = mpsc::channel(100);
        let (tx_channels, rx_channels) = mpsc::channel(100);

        listen_for_actions(rx_actions, store.clone(), shutdown.clone());
        listen_for_transactions(rx_transactions, store.clone(), shutdown.clone());
        listen_for_channels(rx_channels, store, shutdown);

        Self {
            actions: tx_actions,
            transactions: tx_transactions,
            channels: tx_channels,
            _shutdown: PhantomData,
            _phantom: PhantomData,
        }
    }
}

fn listen_for_actions<D, S>(mut rx_actions: mpsc::Receiver<Action>, store: Arc<D>, shutdown: S)
where
    D: DataStore + Send + Sync + 'static,
    S: Shutdown + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut shutdown_recv = shutdown.subscribe();
        loop {
            tokio::select! {
                _ = shutdown_recv.recv() => {
                    tracing::info!("Received shutdown signal, stopping action listener");
                    break;
                }
                Some(action) = rx_actions.recv() => {
                    if let Err(e) = store.store_action(action).await {
                        tracing::error!("Failed to store action: {:?}", e);
                    }
                }
            }
        }
    });
}

fn listen_for_transactions<D, S>(
    mut rx_transactions: mpsc::Receiver<Transaction>,
    store: Arc<D>,
    shutdown: S,
) where
    D: DataStore + Send + Sync + 'static,
    S: Shutdown + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut shutdown_recv = shutdown.subscribe();
        loop {
            tokio::select! {
                _ = shutdown_recv.recv() => {
                    tracing::info!("Received shutdown signal, stopping transaction listener");
                    break;
                }
                Some(transaction) = rx_transactions.recv() => {
                    if let Err(e) = store.store_transaction(transaction).await {
                        tracing::error!("Failed to store transaction: {:?}", e);
                    }
                }
            }
        }
    });
}

fn listen_for_channels<D, S>(mut rx_channels: mpsc::Receiver<Channel>, store: Arc<D>, shutdown: S)
where
    D: DataStore + Send + Sync + 'static,
    S: Shutdown + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut shutdown_recv = shutdown.subscribe();
        loop {
            tokio::select! {
                _ = shutdown_recv.recv() => {
                    tracing::info!("Received shutdown signal, stopping channel listener");
                    break;
                }
                Some(channel) = rx_channels.recv() => {
                    if let Err(e) = store.store_channel(channel).await {
                        tracing::error!("Failed to store channel: {:?}", e);
                    }
                }
            }
        }
    });
}

#[async_trait::async_trait]
impl<D, S> Notifier for ChannelNotifier<D, S>
where
    D: DataStore + Send + Sync + 'static,
    S: Shutdown + Send + Sync + 'static,
{
    async fn notify_action(&self, action: Action) -> Result<(), NotifierError> {
        self.actions.send(action).await?;
        Ok(())
    }

    async fn notify_transaction(&self, transaction: Transaction) -> Result<(), NotifierError> {
        self.transactions.send(transaction).await?;
        Ok(())
    }

    async fn notify_channel(&self, channel: Channel) -> Result<(), NotifierError> {
        self.channels.send(channel).await?;
        Ok(())
    }
}
