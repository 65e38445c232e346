pub mod entry;
pub mod feed;
pub mod podcast;
pub mod subscription;

pub use entry::Entry;
pub use feed::{Feed, Image, Item, Person, Snapshot};
pub use podcast::{PodcastOptions, PodcastRecord};
pub use subscription::{SubscriptionOptions, SubscriptionState};
