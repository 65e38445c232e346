pub mod provider;
pub mod reconciler;

pub use provider::SnapshotProvider;
pub use reconciler::{dedup, merge, Reconciler};
