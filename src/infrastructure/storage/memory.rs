//! In-memory catalog implementation

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::availability;
use crate::domain::{
    Coordinate, CuisineType, DomainError, DomainResult, RepositoryProvider, Restaurant,
    RestaurantChange, RestaurantRepository, RestaurantStatus, ScheduleEntry, ScheduleRepository,
};

struct CatalogRecord {
    /// Registration sequence, defines catalog order
    seq: u64,
    restaurant: Restaurant,
}

/// In-memory catalog for development and testing.
///
/// Each restaurant is stored together with its location and schedule, so a
/// schedule replacement is a single swap under the entry lock.
pub struct InMemoryCatalog {
    restaurants: DashMap<Uuid, CatalogRecord>,
    seq_counter: AtomicU64,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            restaurants: DashMap::new(),
            seq_counter: AtomicU64::new(1),
        }
    }

    /// Catalog pre-populated with `restaurants`, in the given order
    pub fn with_restaurants(restaurants: impl IntoIterator<Item = Restaurant>) -> Self {
        let catalog = Self::new();
        for restaurant in restaurants {
            catalog.insert(restaurant);
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    fn insert(&self, restaurant: Restaurant) {
        let seq = self.seq_counter.fetch_add(1, Ordering::SeqCst);
        self.restaurants
            .insert(restaurant.id, CatalogRecord { seq, restaurant });
    }

    /// Snapshot of restaurants matching `filter`, in catalog order
    fn collect(&self, filter: impl Fn(&Restaurant) -> bool) -> Vec<Restaurant> {
        let mut rows: Vec<(u64, Restaurant)> = self
            .restaurants
            .iter()
            .filter(|e| filter(&e.value().restaurant))
            .map(|e| (e.value().seq, e.value().restaurant.clone()))
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, r)| r).collect()
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RestaurantRepository for InMemoryCatalog {
    async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Restaurant>> {
        Ok(self.restaurants.get(&id).map(|e| e.restaurant.clone()))
    }

    async fn exists(&self, id: Uuid) -> DomainResult<bool> {
        Ok(self.restaurants.contains_key(&id))
    }

    async fn get_all(&self) -> DomainResult<Vec<Restaurant>> {
        Ok(self.collect(|_| true))
    }

    async fn get_active(&self) -> DomainResult<Vec<Restaurant>> {
        Ok(self.collect(|r| r.status == RestaurantStatus::Active))
    }

    async fn get_by_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Restaurant>> {
        Ok(self.collect(|r| r.owner_id == owner_id))
    }

    async fn search(
        &self,
        text: Option<&str>,
        cuisine_type: Option<CuisineType>,
        accepting_orders: Option<bool>,
    ) -> DomainResult<Vec<Restaurant>> {
        Ok(self.collect(|r| {
            r.status == RestaurantStatus::Active
                && text.map_or(true, |t| {
                    r.name.contains(t)
                        || r.description.contains(t)
                        || r.location.address.contains(t)
                })
                && cuisine_type.map_or(true, |c| r.cuisine_type == c)
                && accepting_orders.map_or(true, |a| r.is_accepting_orders == a)
        }))
    }

    async fn get_near(&self, origin: Coordinate, radius_km: f64) -> DomainResult<Vec<Restaurant>> {
        Ok(self.collect(|r| {
            r.status == RestaurantStatus::Active && r.distance_to(origin) <= radius_km
        }))
    }

    async fn save(&self, restaurant: Restaurant) -> DomainResult<()> {
        if self.restaurants.contains_key(&restaurant.id) {
            return Err(DomainError::Conflict(format!(
                "restaurant {}",
                restaurant.id
            )));
        }
        self.insert(restaurant);
        Ok(())
    }

    async fn modify(&self, id: Uuid, change: RestaurantChange) -> DomainResult<Restaurant> {
        let mut record = self
            .restaurants
            .get_mut(&id)
            .ok_or_else(|| DomainError::restaurant_not_found(id))?;

        // Work on a copy so a rejected change leaves the record untouched
        let mut updated = record.restaurant.clone();
        change(&mut updated)?;
        updated.id = id;
        record.restaurant = updated.clone();
        Ok(updated)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: RestaurantStatus,
    ) -> DomainResult<RestaurantStatus> {
        let mut record = self
            .restaurants
            .get_mut(&id)
            .ok_or_else(|| DomainError::restaurant_not_found(id))?;
        Ok(record.restaurant.update_status(status))
    }

    async fn toggle_order_acceptance(&self, id: Uuid) -> DomainResult<bool> {
        let mut record = self
            .restaurants
            .get_mut(&id)
            .ok_or_else(|| DomainError::restaurant_not_found(id))?;
        Ok(record.restaurant.toggle_order_acceptance())
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryCatalog {
    async fn get_by_restaurant(&self, restaurant_id: Uuid) -> DomainResult<Vec<ScheduleEntry>> {
        self.restaurants
            .get(&restaurant_id)
            .map(|e| e.restaurant.schedule.clone())
            .ok_or_else(|| DomainError::restaurant_not_found(restaurant_id))
    }

    async fn replace_all(
        &self,
        restaurant_id: Uuid,
        entries: Vec<ScheduleEntry>,
    ) -> DomainResult<()> {
        let mut record = self
            .restaurants
            .get_mut(&restaurant_id)
            .ok_or_else(|| DomainError::restaurant_not_found(restaurant_id))?;
        record.restaurant.replace_schedule(entries);
        Ok(())
    }

    async fn is_open_at(&self, restaurant_id: Uuid, when: NaiveDateTime) -> DomainResult<bool> {
        self.restaurants
            .get(&restaurant_id)
            .map(|e| availability::is_scheduled_open(&e.restaurant.schedule, when))
            .ok_or_else(|| DomainError::restaurant_not_found(restaurant_id))
    }
}

impl RepositoryProvider for InMemoryCatalog {
    fn restaurants(&self) -> &dyn RestaurantRepository {
        self
    }

    fn schedules(&self) -> &dyn ScheduleRepository {
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayStatus, Location};
    use chrono::{NaiveDate, NaiveTime};

    fn restaurant(name: &str, status: RestaurantStatus) -> Restaurant {
        let location = Location::new("1 Le Loi", Coordinate::new(10.7769, 106.7009).unwrap());
        let mut r = Restaurant::new(Uuid::new_v4(), name, CuisineType::Vietnamese, location);
        r.update_status(status);
        r
    }

    #[tokio::test]
    async fn lists_follow_registration_order() {
        let names = ["A", "B", "C", "D", "E"];
        let catalog = InMemoryCatalog::with_restaurants(
            names.iter().map(|n| restaurant(n, RestaurantStatus::Active)),
        );

        let active = catalog.get_active().await.unwrap();
        let got: Vec<&str> = active.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(got, names);
    }

    #[tokio::test]
    async fn get_active_skips_other_statuses() {
        let catalog = InMemoryCatalog::with_restaurants([
            restaurant("Open", RestaurantStatus::Active),
            restaurant("Waiting", RestaurantStatus::Pending),
            restaurant("Gone", RestaurantStatus::Closed),
        ]);
        let active = catalog.get_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Open");
    }

    #[tokio::test]
    async fn save_rejects_duplicate_id() {
        let catalog = InMemoryCatalog::new();
        let r = restaurant("Dup", RestaurantStatus::Active);
        catalog.save(r.clone()).await.unwrap();
        let err = catalog.save(r).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn writes_to_unknown_id_are_not_found() {
        let catalog = InMemoryCatalog::new();
        let id = Uuid::new_v4();
        let err = catalog
            .modify(id, Box::new(|_: &mut Restaurant| Ok(())))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(catalog
            .set_status(id, RestaurantStatus::Active)
            .await
            .unwrap_err()
            .is_not_found());
        assert!(catalog.toggle_order_acceptance(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn get_all_includes_every_status() {
        let catalog = InMemoryCatalog::with_restaurants([
            restaurant("Open", RestaurantStatus::Active),
            restaurant("Waiting", RestaurantStatus::Pending),
            restaurant("Gone", RestaurantStatus::Closed),
        ]);
        let names: Vec<String> = catalog
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["Open", "Waiting", "Gone"]);
    }

    #[tokio::test]
    async fn rejected_modify_leaves_record_alone() {
        let r = restaurant("Stable", RestaurantStatus::Active);
        let id = r.id;
        let catalog = InMemoryCatalog::with_restaurants([r]);

        let err = catalog
            .modify(
                id,
                Box::new(|r: &mut Restaurant| {
                    r.name = "Half written".into();
                    Err(DomainError::validation("nope"))
                }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(catalog.get_by_id(id).await.unwrap().unwrap().name, "Stable");
    }

    #[tokio::test]
    async fn modify_keeps_schedule_replaced_meanwhile() {
        let r = restaurant("Pho", RestaurantStatus::Active);
        let id = r.id;
        let catalog = InMemoryCatalog::with_restaurants([r]);

        // A snapshot taken before the schedule replacement
        let stale = catalog.get_by_id(id).await.unwrap().unwrap();
        catalog
            .replace_all(id, vec![ScheduleEntry::default_for_day(id, 1)])
            .await
            .unwrap();

        let location = stale.location.clone();
        catalog
            .modify(id, Box::new(move |r: &mut Restaurant| {
                r.update_location(location);
                Ok(())
            }))
            .await
            .unwrap();
        assert_eq!(catalog.get_by_restaurant(id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn modify_keeps_catalog_position() {
        let first = restaurant("First", RestaurantStatus::Active);
        let second = restaurant("Second", RestaurantStatus::Active);
        let second_id = second.id;
        let catalog = InMemoryCatalog::with_restaurants([first, second]);

        catalog
            .modify(second_id, Box::new(|r: &mut Restaurant| {
                r.name = "Second (renamed)".into();
                Ok(())
            }))
            .await
            .unwrap();

        let names: Vec<String> = catalog
            .get_active()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["First", "Second (renamed)"]);
    }

    #[tokio::test]
    async fn replace_all_swaps_whole_schedule() {
        let r = restaurant("Pho", RestaurantStatus::Active);
        let id = r.id;
        let catalog = InMemoryCatalog::with_restaurants([r]);

        let entry = ScheduleEntry::new(
            id,
            1,
            DayStatus::Open,
            NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        )
        .unwrap();
        catalog.replace_all(id, vec![entry.clone()]).await.unwrap();
        catalog.replace_all(id, vec![entry]).await.unwrap();

        let schedule = catalog.get_by_restaurant(id).await.unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].day_of_week, 1);

        // 2024-06-03 is a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert!(catalog
            .is_open_at(id, monday.and_hms_opt(7, 0, 0).unwrap())
            .await
            .unwrap());
        assert!(!catalog
            .is_open_at(id, monday.and_hms_opt(12, 0, 0).unwrap())
            .await
            .unwrap());
        // No entry for Tuesday any more
        assert!(!catalog
            .is_open_at(id, monday.succ_opt().unwrap().and_hms_opt(7, 0, 0).unwrap())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn schedule_calls_on_unknown_restaurant_fail() {
        let catalog = InMemoryCatalog::new();
        let id = Uuid::new_v4();
        assert!(catalog.replace_all(id, vec![]).await.unwrap_err().is_not_found());
        assert!(catalog.get_by_restaurant(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn search_prefilters_active_rows() {
        let mut sushi = restaurant("Sushi Tei", RestaurantStatus::Active);
        sushi.cuisine_type = CuisineType::Japanese;
        let catalog = InMemoryCatalog::with_restaurants([
            sushi,
            restaurant("Pho Hoa", RestaurantStatus::Active),
            restaurant("Pho Pending", RestaurantStatus::Pending),
        ]);

        let pho = catalog.search(Some("Pho"), None, None).await.unwrap();
        assert_eq!(pho.len(), 1);
        let jp = catalog
            .search(None, Some(CuisineType::Japanese), None)
            .await
            .unwrap();
        assert_eq!(jp[0].name, "Sushi Tei");
        assert!(catalog.search(None, None, Some(true)).await.unwrap().is_empty());
    }
}
