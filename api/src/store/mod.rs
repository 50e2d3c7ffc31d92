pub mod memory;
pub mod pg;

use crate::domain::{SortOrder, UnknownVariant};
use crate::search::pagination::Page;
use crate::search::predicate::Predicate;
use async_trait::async_trait;
use common::persistence::models::marketplace::PartRow;
use diesel_async::pooled_connection::deadpool::PoolError;
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryPartStore;
pub use pg::PgPartStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("diesel error: `{0}`")]
    Diesel(#[from] diesel::result::Error),
    #[error("postgres pool error: `{0}`")]
    PgPool(#[from] PoolError),
    #[error("invalid stored row: {0}")]
    InvalidRow(#[from] UnknownVariant),
}

/// Column a grouped count is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Make,
    Model,
    Condition,
}

/// Read access to the `part ⋈ vehicle ⋈ seller` relation.
///
/// Every call is independent; implementations must be safe to call concurrently from one
/// request.
#[async_trait]
pub trait PartStore: Send + Sync {
    async fn find(
        &self,
        predicate: &Predicate,
        sort: SortOrder,
        page: Page,
    ) -> Result<Vec<PartRow>, StoreError>;

    async fn count(&self, predicate: &Predicate) -> Result<u64, StoreError>;

    /// `(value, count)` pairs in no particular order. Make and model values are grouped
    /// case-insensitively and reported by their smallest stored spelling.
    async fn group_count(
        &self,
        predicate: &Predicate,
        field: GroupField,
    ) -> Result<Vec<(String, u64)>, StoreError>;

    /// Matching parts per price band over ascending `edges`. Band `0` is below `edges[0]`,
    /// band `i` is `[edges[i - 1], edges[i])` and the last band is at or above the final edge,
    /// so the result always has `edges.len() + 1` entries.
    async fn price_histogram(
        &self,
        predicate: &Predicate,
        edges: &[f64],
    ) -> Result<Vec<u64>, StoreError>;

    async fn find_one(&self, id: Uuid, predicate: &Predicate)
    -> Result<Option<PartRow>, StoreError>;
}
