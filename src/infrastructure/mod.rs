pub mod channel_notifier;
pub mod file_snapshot;
pub mod memory;
pub mod shutdown;
pub mod snapshot;
