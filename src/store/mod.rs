pub mod sqlite;

use crate::app::Result;

pub use sqlite::SqliteStore;

/// Byte-oriented key-value storage partitioned into namespaces.
///
/// Every operation other than [`KvStore::create_namespace`] requires the
/// namespace to exist already and fails with `NamespaceNotFound` otherwise.
pub trait KvStore {
    /// Create `namespace` unless it already exists.
    fn create_namespace(&self, namespace: &[u8]) -> Result<()>;

    /// Insert or replace `key` in one write transaction.
    fn put(&self, namespace: &[u8], key: &[u8], value: &[u8]) -> Result<()>;

    /// `None` when the key is unset.
    fn get(&self, namespace: &[u8], key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Remove `key`; removing an unset key is not an error.
    fn delete(&self, namespace: &[u8], key: &[u8]) -> Result<()>;

    /// Visit every pair in ascending key order, as read by one transaction.
    /// The visitor runs after that read completes, so it may use the store.
    /// The first visitor error stops the walk and is returned.
    fn for_each(
        &self,
        namespace: &[u8],
        visitor: &mut dyn FnMut(&[u8], &[u8]) -> Result<()>,
    ) -> Result<()>;
}
