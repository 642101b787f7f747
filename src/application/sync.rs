use super::Synchronizer;
use crate::domain::{errors::AggregatorError, models::Notifier};
use crate::infrastructure::{shutdown::Shutdown, snapshot::SnapshotSource};
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Periodically pulls the full bounty snapshot and forwards every record
/// through the notifier. A failed round is logged and retried on the next
/// tick; the store keeps serving the previous data in the meantime.
#[derive(Clone, TypedBuilder)]
pub struct SnapshotSynchronizer<C, N, S> {
    source: C,
    notifier: N,
    shutdown: S,
    interval: Duration,
}

#[async_trait::async_trait]
impl<C, N, S> Synchronizer for SnapshotSynchronizer<C, N, S>
where
    C: SnapshotSource + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    S: Shutdown + Send + Sync + 'static,
{
    async fn run(self) -> Result<(), AggregatorError> {
        let mut shutdown = self.shutdown.subscribe();

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("Received shutdown signal, stopping snapshot sync");
                    break;
                }
                result = self.sync_round() => {
                    if let Err(e) = result {
                        tracing::error!("Snapshot sync round failed: {:?}. Retrying on next round", e);
                    }
                }
            }

            tokio::time::sleep(self.interval).await;
        }

        Ok(())
    }
}

impl<C, N, S> SnapshotSynchronizer<C, N, S>
where
    C: SnapshotSource,
    N: Notifier,
{
    async fn sync_round(&self) -> Result<(), AggregatorError> {
        let snapshot = self.source.fetch().await?;

        tracing::info!(
            "Synchronizing snapshot: {} actions, {} transactions, {} channels",
            snapshot.actions.len(),
            snapshot.transactions.as_ref().map_or(0, Vec::len),
            snapshot.channels.len()
        );

        for channel in snapshot.channels {
            self.notifier.notify_channel(channel).await?;
        }

        for action in snapshot.actions {
            self.notifier.notify_action(action).await?;
        }

        if let Some(transactions) = snapshot.transactions {
            for transaction in transactions {
                self.notifier.notify_transaction(transaction).await?;
            }
        }

        Ok(())
    }
}
