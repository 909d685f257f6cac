//! Search criteria

use crate::domain::{Coordinate, CuisineType, Restaurant, RestaurantStatus};

/// Filters for a catalog search. Every field is optional; an empty criteria
/// matches every active restaurant.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    /// Case-sensitive substring of name, description or street address
    pub text: Option<String>,
    pub cuisine_type: Option<CuisineType>,
    pub accepting_orders: Option<bool>,
    /// Caller position; enables distance and fee estimation
    pub origin: Option<Coordinate>,
    /// Only honoured together with `origin`
    pub radius_km: Option<f64>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, term: impl Into<String>) -> Self {
        self.text = Some(term.into());
        self
    }

    pub fn cuisine(mut self, cuisine_type: CuisineType) -> Self {
        self.cuisine_type = Some(cuisine_type);
        self
    }

    pub fn accepting_orders(mut self, accepting: bool) -> Self {
        self.accepting_orders = Some(accepting);
        self
    }

    pub fn near(mut self, origin: Coordinate) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn within_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    /// Text term with blank input treated as absent
    pub fn text_term(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Non-geographic filters, including the active-only rule
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        if restaurant.status != RestaurantStatus::Active {
            return false;
        }

        if let Some(term) = self.text_term() {
            let hit = restaurant.name.contains(term)
                || restaurant.description.contains(term)
                || restaurant.location.address.contains(term);
            if !hit {
                return false;
            }
        }

        if let Some(cuisine) = self.cuisine_type {
            if restaurant.cuisine_type != cuisine {
                return false;
            }
        }

        if let Some(accepting) = self.accepting_orders {
            if restaurant.is_accepting_orders != accepting {
                return false;
            }
        }

        true
    }
}

// ── Tests ──────────────────────────────────────────────────────
