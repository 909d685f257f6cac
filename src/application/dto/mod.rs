//! Inputs and projections of the application services

pub mod restaurant;
pub mod search;

pub use restaurant::{
    CreateRestaurant, DeliveryEstimate, LocationView, OrderAcceptanceResponse, RestaurantCreated,
    RestaurantDetails, RestaurantSummary, ScheduleEntryInput, ScheduleEntryView,
    StatusChangeResponse, UpdateLocation, UpdateProfile,
};
pub use search::SearchCriteria;
