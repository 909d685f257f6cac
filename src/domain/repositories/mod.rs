//! Repository provider for the domain layer

use super::restaurant::RestaurantRepository;
use super::schedule::ScheduleRepository;

/// Provides access to the catalog ports.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let r = repos.restaurants().get_by_id(id).await?;
///     let week = repos.schedules().get_by_restaurant(id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn restaurants(&self) -> &dyn RestaurantRepository;
    fn schedules(&self) -> &dyn ScheduleRepository;
}
