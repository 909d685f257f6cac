//! Restaurant discovery: search, proximity ranking and opening checks

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::dto::{
    RestaurantDetails, RestaurantSummary, ScheduleEntryInput, SearchCriteria, UpdateLocation,
};
use crate::domain::availability::{self, Availability};
use crate::domain::schedule::validate_week;
use crate::domain::{
    Coordinate, DomainError, DomainResult, RepositoryProvider, Restaurant, RestaurantStatus,
};

/// Knobs for the discovery service
#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    /// Radius for `near_location` when the caller gives none
    pub default_radius_km: f64,
    /// Business wall clock used for day-of-week and time-of-day
    pub utc_offset: FixedOffset,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            default_radius_km: 10.0,
            utc_offset: FixedOffset::east_opt(7 * 3600).unwrap_or_else(|| Utc.fix()),
        }
    }
}

/// Service for catalog discovery.
///
/// Holds no mutable state of its own: every call reads a fresh snapshot from
/// the repositories and computes over it.
pub struct DiscoveryService {
    repos: Arc<dyn RepositoryProvider>,
    settings: DiscoverySettings,
    cancel: CancellationToken,
    clock: fn() -> DateTime<Utc>,
}

impl DiscoveryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self::with_settings(repos, DiscoverySettings::default())
    }

    pub fn with_settings(repos: Arc<dyn RepositoryProvider>, settings: DiscoverySettings) -> Self {
        Self {
            repos,
            settings,
            cancel: CancellationToken::new(),
            clock: Utc::now,
        }
    }

    /// Abort pending repository calls once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Replace the wall clock (used by tests and replays)
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    fn local_time(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.with_timezone(&self.settings.utc_offset).naive_local()
    }

    fn local_now(&self) -> NaiveDateTime {
        self.local_time((self.clock)())
    }

    /// Await a repository call unless the service has been cancelled.
    async fn fetch<T>(&self, call: impl Future<Output = DomainResult<T>>) -> DomainResult<T> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(DomainError::Cancelled),
            result = call => result,
        }
    }

    fn check_radius(radius_km: f64) -> DomainResult<()> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(DomainError::validation(format!(
                "radius {} must be a non-negative number of kilometres",
                radius_km
            )));
        }
        Ok(())
    }

    fn summarize(
        restaurant: &Restaurant,
        origin: Option<Coordinate>,
        at: NaiveDateTime,
    ) -> RestaurantSummary {
        let distance_km = origin.map(|o| restaurant.distance_to(o));
        let estimated_delivery = distance_km.map(|d| restaurant.quote_delivery(d).into());
        let availability = Availability::of(restaurant, at);

        RestaurantSummary {
            id: restaurant.id,
            name: restaurant.name.clone(),
            description: restaurant.description.clone(),
            cuisine_type: restaurant.cuisine_type,
            status: restaurant.status,
            is_accepting_orders: restaurant.is_accepting_orders,
            delivery_fee_per_km: restaurant.delivery_fee_per_km,
            location: (&restaurant.location).into(),
            distance_km,
            estimated_delivery,
            is_currently_open: availability.is_scheduled_open,
            is_available: availability.is_available(),
        }
    }

    /// Ascending by distance; a missing distance counts as 0.0 and the sort
    /// is stable, so equal keys keep catalog order.
    fn rank_by_distance(results: &mut [RestaurantSummary]) {
        results.sort_by(|a, b| {
            a.distance_km
                .unwrap_or(0.0)
                .total_cmp(&b.distance_km.unwrap_or(0.0))
        });
    }

    pub async fn search(&self, criteria: &SearchCriteria) -> DomainResult<Vec<RestaurantSummary>> {
        if let Some(radius_km) = criteria.radius_km {
            Self::check_radius(radius_km)?;
        }

        let candidates = self
            .fetch(self.repos.restaurants().search(
                criteria.text_term(),
                criteria.cuisine_type,
                criteria.accepting_orders,
            ))
            .await?;
        let candidate_count = candidates.len();
        let now = self.local_now();

        let mut results: Vec<RestaurantSummary> = candidates
            .iter()
            .filter(|r| criteria.matches(r))
            .map(|r| Self::summarize(r, criteria.origin, now))
            .filter(|s| match (s.distance_km, criteria.radius_km) {
                (Some(distance), Some(radius)) => distance <= radius,
                _ => true,
            })
            .collect();
        Self::rank_by_distance(&mut results);

        debug!(
            candidates = candidate_count,
            results = results.len(),
            has_origin = criteria.origin.is_some(),
            "Restaurant search completed"
        );
        Ok(results)
    }

    /// Active restaurants within `radius_km` (default from settings),
    /// nearest first.
    pub async fn near_location(
        &self,
        origin: Coordinate,
        radius_km: Option<f64>,
    ) -> DomainResult<Vec<RestaurantSummary>> {
        let radius_km = radius_km.unwrap_or(self.settings.default_radius_km);
        Self::check_radius(radius_km)?;

        let candidates = self
            .fetch(self.repos.restaurants().get_near(origin, radius_km))
            .await?;
        let now = self.local_now();

        let mut results: Vec<RestaurantSummary> = candidates
            .iter()
            .filter(|r| r.status == RestaurantStatus::Active)
            .map(|r| Self::summarize(r, Some(origin), now))
            .filter(|s| s.distance_km.is_some_and(|d| d <= radius_km))
            .collect();
        Self::rank_by_distance(&mut results);

        debug!(%origin, radius_km, results = results.len(), "Near-location query completed");
        Ok(results)
    }

    /// Active and accepting restaurants whose own delivery radius reaches
    /// `origin`, nearest first.
    pub async fn deliverable_to(&self, origin: Coordinate) -> DomainResult<Vec<RestaurantSummary>> {
        let candidates = self.fetch(self.repos.restaurants().get_active()).await?;
        let now = self.local_now();

        let mut results: Vec<RestaurantSummary> = candidates
            .iter()
            .filter(|r| r.is_accepting_orders && r.is_within_delivery_range(origin))
            .map(|r| Self::summarize(r, Some(origin), now))
            .collect();
        Self::rank_by_distance(&mut results);
        Ok(results)
    }

    /// Active restaurants in catalog order
    pub async fn list_active(&self) -> DomainResult<Vec<RestaurantSummary>> {
        let restaurants = self.fetch(self.repos.restaurants().get_active()).await?;
        let now = self.local_now();

        Ok(restaurants
            .iter()
            .map(|r| Self::summarize(r, None, now))
            .collect())
    }

    /// Active restaurants whose schedule is open at `when`, in catalog order
    pub async fn open_at(&self, when: DateTime<Utc>) -> DomainResult<Vec<RestaurantSummary>> {
        let restaurants = self.fetch(self.repos.restaurants().get_active()).await?;
        let at = self.local_time(when);

        Ok(restaurants
            .iter()
            .filter(|r| availability::is_scheduled_open(&r.schedule, at))
            .map(|r| Self::summarize(r, None, at))
            .collect())
    }

    /// Schedule-only check for one restaurant, at `at` or now.
    pub async fn is_open_now(
        &self,
        restaurant_id: Uuid,
        at: Option<DateTime<Utc>>,
    ) -> DomainResult<bool> {
        self.ensure_exists(restaurant_id).await?;
        let when = self.local_time(at.unwrap_or_else(self.clock));
        self.fetch(self.repos.schedules().is_open_at(restaurant_id, when))
            .await
    }

    /// Swap the whole weekly schedule in one step.
    ///
    /// Cancellation is honoured up to the write. Once `replace_all` has
    /// committed, the reload of the result runs to completion.
    pub async fn replace_schedule(
        &self,
        restaurant_id: Uuid,
        entries: Vec<ScheduleEntryInput>,
    ) -> DomainResult<RestaurantDetails> {
        self.ensure_exists(restaurant_id).await?;

        let entries = entries
            .into_iter()
            .map(|input| input.into_entry(restaurant_id))
            .collect::<DomainResult<Vec<_>>>()?;
        validate_week(&entries)?;
        let day_count = entries.len();

        self.fetch(self.repos.schedules().replace_all(restaurant_id, entries))
            .await?;
        info!(%restaurant_id, days = day_count, "Schedule replaced");

        let restaurant = self
            .repos
            .restaurants()
            .get_by_id(restaurant_id)
            .await?
            .ok_or_else(|| DomainError::restaurant_not_found(restaurant_id))?;
        Ok(RestaurantDetails::from(&restaurant))
    }

    /// Move the restaurant. Only the location and timestamps are written.
    pub async fn update_location(
        &self,
        restaurant_id: Uuid,
        update: UpdateLocation,
    ) -> DomainResult<RestaurantDetails> {
        let location = update.into_location()?;
        let coordinate = location.coordinate;

        let restaurant = self
            .fetch(self.repos.restaurants().modify(
                restaurant_id,
                Box::new(move |r: &mut Restaurant| {
                    r.update_location(location);
                    Ok(())
                }),
            ))
            .await
            .inspect_err(|e| {
                if e.is_not_found() {
                    warn!(%restaurant_id, "Restaurant not found");
                }
            })?;

        info!(%restaurant_id, to = %coordinate, "Restaurant location updated");
        Ok(RestaurantDetails::from(&restaurant))
    }

    async fn ensure_exists(&self, restaurant_id: Uuid) -> DomainResult<()> {
        if self.fetch(self.repos.restaurants().exists(restaurant_id)).await? {
            Ok(())
        } else {
            warn!(%restaurant_id, "Restaurant not found");
            Err(DomainError::restaurant_not_found(restaurant_id))
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
