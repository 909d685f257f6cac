//! Schedule repository interface

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use super::model::ScheduleEntry;
use crate::shared::errors::DomainResult;

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Entries ordered by day of week
    async fn get_by_restaurant(&self, restaurant_id: Uuid) -> DomainResult<Vec<ScheduleEntry>>;

    /// Discard every entry of the restaurant and install `entries`.
    ///
    /// Implementations must apply this as one atomic step: a concurrent
    /// reader sees either the old set or the new one, never an empty
    /// intermediate state.
    async fn replace_all(&self, restaurant_id: Uuid, entries: Vec<ScheduleEntry>)
        -> DomainResult<()>;

    /// Schedule-only check for the entry matching the day of `when`
    async fn is_open_at(&self, restaurant_id: Uuid, when: NaiveDateTime) -> DomainResult<bool>;
}
