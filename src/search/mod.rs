//! Catalog lookups for finding feed URLs. Stateless; one GET per query.

pub mod feed;
pub mod podcast;
