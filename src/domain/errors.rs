use super::models::{Action, Channel, Transaction};
use thiserror::Error;
use tokio::sync::mpsc::error::SendError;

#[derive(Error, Debug)]
pub enum AggregatorError {
    #[error("Failed to fetch bounty snapshot")]
    FailedToFetchSnapshot(#[from] SnapshotError),
    #[error("Failed to notify store")]
    FailedToNotifyStore(#[from] NotifierError),
    #[error("Failed to query store")]
    FailedToQueryStore(#[from] DataStoreError),
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read snapshot: {0}")]
    FailedToReadSnapshot(String),
    #[error("Failed to parse snapshot: {0}")]
    FailedToParseSnapshot(String),
}

#[derive(Error, Debug)]
pub enum DataStoreError {
    #[error("Action not found: {0}")]
    ActionNotFound(String),
    #[error("Channel not found: {0}")]
    ChannelNotFound(i64),
}

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Failed to notify action")]
    FailedToNotifyAction(#[from] SendError<Action>),
    #[error("Failed to notify transaction")]
    FailedToNotifyTransaction(#[from] SendError<Transaction>),
    #[error("Failed to notify channel")]
    FailedToNotifyChannel(#[from] SendError<Channel>),
}
