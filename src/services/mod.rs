pub(crate) mod aggregation;
pub(crate) mod classifier;
pub(crate) mod delta;
pub(crate) mod feed;
pub(crate) mod news;
pub(crate) mod query;
pub(crate) mod snapshot_store;
pub(crate) mod text;
