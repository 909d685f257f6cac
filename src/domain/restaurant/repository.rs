//! Restaurant catalog repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{CuisineType, Restaurant, RestaurantStatus};
use crate::domain::geo::Coordinate;
use crate::shared::errors::DomainResult;

/// In-place change to one restaurant. Returning an error discards the change.
pub type RestaurantChange = Box<dyn FnOnce(&mut Restaurant) -> DomainResult<()> + Send>;

/// Read/write access to the restaurant catalog.
///
/// List queries return restaurants in catalog order (registration order) and
/// always carry the full location and schedule.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Restaurant>>;
    async fn exists(&self, id: Uuid) -> DomainResult<bool>;
    async fn get_all(&self) -> DomainResult<Vec<Restaurant>>;
    async fn get_active(&self) -> DomainResult<Vec<Restaurant>>;
    async fn get_by_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Restaurant>>;

    /// Active restaurants pre-filtered by text, cuisine and order acceptance.
    /// Geospatial filtering is left to the caller.
    async fn search(
        &self,
        text: Option<&str>,
        cuisine_type: Option<CuisineType>,
        accepting_orders: Option<bool>,
    ) -> DomainResult<Vec<Restaurant>>;

    /// Active restaurants within `radius_km` of `origin`
    async fn get_near(&self, origin: Coordinate, radius_km: f64) -> DomainResult<Vec<Restaurant>>;

    async fn save(&self, restaurant: Restaurant) -> DomainResult<()>;

    /// Apply `change` to the stored restaurant and return the result.
    ///
    /// The change runs against the current record, not a caller snapshot, so
    /// concurrent writes to other parts of the aggregate (a schedule
    /// replacement, say) are never rolled back.
    async fn modify(&self, id: Uuid, change: RestaurantChange) -> DomainResult<Restaurant>;

    /// Set the status; returns the previous one.
    async fn set_status(&self, id: Uuid, status: RestaurantStatus)
        -> DomainResult<RestaurantStatus>;

    /// Flip order acceptance; returns the new value.
    async fn toggle_order_acceptance(&self, id: Uuid) -> DomainResult<bool>;
}
