//! Delivery fee calculation

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Outcome of pricing a delivery over a given distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryQuote {
    /// Delivery possible at this fee, in the restaurant's currency unit (unrounded)
    Fee(Decimal),
    /// Destination lies beyond the restaurant's delivery radius
    OutOfRange,
}

impl DeliveryQuote {
    pub fn fee(&self) -> Option<Decimal> {
        match self {
            Self::Fee(fee) => Some(*fee),
            Self::OutOfRange => None,
        }
    }

    pub fn is_deliverable(&self) -> bool {
        matches!(self, Self::Fee(_))
    }
}

impl std::fmt::Display for DeliveryQuote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fee(fee) => write!(f, "{}", fee),
            Self::OutOfRange => write!(f, "out of range"),
        }
    }
}

/// Price a delivery of `distance_km`.
///
/// A zero or negative distance is free. Anything past `max_distance_km` is
/// out of range, and so is a distance that is not a finite number.
pub fn quote(distance_km: f64, fee_per_km: Decimal, max_distance_km: f64) -> DeliveryQuote {
    if !distance_km.is_finite() {
        return DeliveryQuote::OutOfRange;
    }
    if distance_km <= 0.0 {
        return DeliveryQuote::Fee(Decimal::ZERO);
    }
    if distance_km > max_distance_km {
        return DeliveryQuote::OutOfRange;
    }

    match Decimal::from_f64(distance_km) {
        Some(distance) => DeliveryQuote::Fee(fee_per_km * distance),
        None => DeliveryQuote::OutOfRange,
    }
}

// ── Tests ──────────────────────────────────────────────────────
