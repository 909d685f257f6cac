//! Restaurant registration and profile management

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::dto::{
    CreateRestaurant, OrderAcceptanceResponse, RestaurantCreated, RestaurantDetails,
    StatusChangeResponse, UpdateProfile,
};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, Restaurant, RestaurantStatus};

const MAX_RATING: u32 = 5;

/// Service for restaurant lifecycle operations
pub struct RestaurantService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RestaurantService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    fn not_found(id: Uuid) -> DomainError {
        warn!(restaurant_id = %id, "Restaurant not found");
        DomainError::restaurant_not_found(id)
    }

    fn log_not_found(id: Uuid, err: &DomainError) {
        if err.is_not_found() {
            warn!(restaurant_id = %id, "Restaurant not found");
        }
    }

    /// Register a restaurant. It starts pending approval, not accepting
    /// orders, with the default weekly schedule.
    pub async fn create(&self, request: CreateRestaurant) -> DomainResult<RestaurantCreated> {
        let restaurant = request.into_restaurant()?;
        let created = RestaurantCreated {
            id: restaurant.id,
            name: restaurant.name.clone(),
            message: "Restaurant created successfully and is pending approval".to_string(),
        };

        info!(
            restaurant_id = %restaurant.id,
            owner_id = %restaurant.owner_id,
            name = restaurant.name.as_str(),
            "Restaurant registered"
        );
        self.repos.restaurants().save(restaurant).await?;

        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<RestaurantDetails> {
        let restaurant = self
            .repos
            .restaurants()
            .get_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        Ok(RestaurantDetails::from(&restaurant))
    }

    /// Every restaurant in catalog order, whatever its status
    pub async fn list_all(&self) -> DomainResult<Vec<RestaurantDetails>> {
        let restaurants = self.repos.restaurants().get_all().await?;
        Ok(restaurants.iter().map(RestaurantDetails::from).collect())
    }

    pub async fn exists(&self, id: Uuid) -> DomainResult<bool> {
        self.repos.restaurants().exists(id).await
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> DomainResult<Vec<RestaurantDetails>> {
        let restaurants = self.repos.restaurants().get_by_owner(owner_id).await?;
        Ok(restaurants.iter().map(RestaurantDetails::from).collect())
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        update: UpdateProfile,
    ) -> DomainResult<RestaurantDetails> {
        let restaurant = self
            .repos
            .restaurants()
            .modify(
                id,
                Box::new(move |r: &mut Restaurant| {
                    update.apply_to(r);
                    r.validate()
                }),
            )
            .await
            .inspect_err(|e| Self::log_not_found(id, e))?;
        info!(restaurant_id = %id, "Restaurant profile updated");

        Ok(RestaurantDetails::from(&restaurant))
    }

    /// Set the status. Any transition is accepted.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: RestaurantStatus,
        reason: Option<&str>,
    ) -> DomainResult<StatusChangeResponse> {
        let previous = self
            .repos
            .restaurants()
            .set_status(id, status)
            .await
            .inspect_err(|e| Self::log_not_found(id, e))?;

        info!(
            restaurant_id = %id,
            from = %previous,
            to = %status,
            reason = reason.unwrap_or("-"),
            "Restaurant status updated"
        );

        Ok(StatusChangeResponse {
            id,
            status,
            message: format!("Restaurant status updated from {} to {}", previous, status),
        })
    }

    pub async fn toggle_order_acceptance(
        &self,
        id: Uuid,
        reason: Option<&str>,
    ) -> DomainResult<OrderAcceptanceResponse> {
        let accepting = self
            .repos
            .restaurants()
            .toggle_order_acceptance(id)
            .await
            .inspect_err(|e| Self::log_not_found(id, e))?;

        info!(
            restaurant_id = %id,
            accepting,
            reason = reason.unwrap_or("-"),
            "Order acceptance toggled"
        );

        let message = if accepting {
            "Restaurant is now accepting orders"
        } else {
            "Restaurant has stopped accepting orders"
        };
        Ok(OrderAcceptanceResponse {
            id,
            is_accepting_orders: accepting,
            message: message.to_string(),
        })
    }

    /// Replace the review aggregate. The average must lie in 0..=5.
    pub async fn update_rating(
        &self,
        id: Uuid,
        average_rating: Decimal,
        total_reviews: u32,
    ) -> DomainResult<RestaurantDetails> {
        if average_rating < Decimal::ZERO || average_rating > Decimal::from(MAX_RATING) {
            return Err(DomainError::Validation(format!(
                "Average rating {} must be between 0 and {}",
                average_rating, MAX_RATING
            )));
        }

        let restaurant = self
            .repos
            .restaurants()
            .modify(
                id,
                Box::new(move |r: &mut Restaurant| {
                    r.update_rating(average_rating, total_reviews);
                    Ok(())
                }),
            )
            .await
            .inspect_err(|e| Self::log_not_found(id, e))?;
        debug!(restaurant_id = %id, %average_rating, total_reviews, "Rating updated");

        Ok(RestaurantDetails::from(&restaurant))
    }

    /// Count one more completed order
    pub async fn record_order(&self, id: Uuid) -> DomainResult<u32> {
        let restaurant = self
            .repos
            .restaurants()
            .modify(
                id,
                Box::new(|r: &mut Restaurant| {
                    r.increment_order_count();
                    Ok(())
                }),
            )
            .await
            .inspect_err(|e| Self::log_not_found(id, e))?;
        Ok(restaurant.total_orders)
    }

    /// Whether `owner_id` owns the restaurant. Unknown restaurants yield false.
    pub async fn owner_can_manage(&self, id: Uuid, owner_id: Uuid) -> DomainResult<bool> {
        let restaurant = self.repos.restaurants().get_by_id(id).await?;
        Ok(restaurant.is_some_and(|r| r.owner_id == owner_id))
    }
}

// ── Tests ──────────────────────────────────────────────────────
