//! Domain ports: the interfaces every outbound adapter implements.

mod notifier;
mod storage;

pub use self::notifier::{NoopNotifier, Notifier, NotifyError};
pub use self::storage::{Storage, StorageError};
