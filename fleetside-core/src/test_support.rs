//! Deterministic fixtures and collaborator stubs used by unit, behaviour and
//! downstream adapter tests.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::fleet::{FetchError, FleetSnapshot, FleetSource};
use crate::routing::{RawRoute, RouteProvider, RoutingProviderError};
use crate::vehicle::{Position, Vehicle, VehicleId};

/// Epsilon for floating-point coordinate comparisons in tests.
const COORDINATE_EPSILON: f64 = 1.0e-9;

/// Build a vehicle with placeholder attributes at the given position.
#[must_use]
pub fn vehicle_at(id: &str, latitude: f64, longitude: f64) -> Vehicle {
    Vehicle {
        id: VehicleId::from(id),
        display_name: format!("Car {id}"),
        brand: "BMW".to_owned(),
        model_name: "MINI".to_owned(),
        fuel_type: "D".to_owned(),
        transmission_type: "M".to_owned(),
        image_url: "https://example.org/car.webp".to_owned(),
        position: Position::new(latitude, longitude),
        license_plate: None,
        fuel_level: None,
    }
}

/// Three vehicles around central Munich, in listing order.
#[must_use]
pub fn sample_fleet() -> FleetSnapshot {
    FleetSnapshot::new(vec![
        vehicle_at("WMWSW31030T222518", 48.134_557, 11.576_921),
        vehicle_at("WMWSU31070T077232", 48.114_988, 11.598_359),
        vehicle_at("WMWSW31070T222269", 48.167_011, 11.590_008),
    ])
    .unwrap_or_default()
}

/// A JSON listing body in the fleet endpoint's wire format.
#[must_use]
pub fn sample_listing_json() -> &'static str {
    r#"[
  {
    "id": "WMWSW31030T222518",
    "modelId": "mini",
    "modelName": "MINI",
    "name": "Vanessa",
    "brand": "BMW",
    "group": "MINI",
    "series": "MINI",
    "fuelType": "D",
    "fuelLevel": 0.7,
    "transmission": "M",
    "licensePlate": "M-VO0259",
    "latitude": "48.134557",
    "longitude": "11.576921",
    "innerCleanliness": "REGULAR",
    "carImageUrl": "https://app.check24.de/img/purple.webp"
  },
  {
    "id": "WMWSU31070T077232",
    "modelId": "mini",
    "modelName": "MINI",
    "name": "Regine",
    "brand": "BMW",
    "group": "MINI",
    "series": "MINI",
    "fuelType": "P",
    "fuelLevel": 0.55,
    "transmission": "M",
    "licensePlate": "M-I7425",
    "latitude": "48.114988",
    "longitude": "11.598359",
    "innerCleanliness": "CLEAN",
    "carImageUrl": "https://app.check24.de/img/purple.webp"
  },
  {
    "id": "WMWSW31070T222269",
    "modelId": "mini",
    "modelName": "MINI",
    "name": "Hans",
    "brand": "BMW",
    "group": "MINI",
    "series": "MINI",
    "fuelType": "D",
    "fuelLevel": 0.9,
    "transmission": "A",
    "licensePlate": "M-C3578",
    "latitude": "48.167011",
    "longitude": "11.590008",
    "innerCleanliness": "VERY_CLEAN",
    "carImageUrl": "https://app.check24.de/img/purple.webp"
  }
]"#
}

/// Compare floating-point values within a small epsilon.
///
/// # Panics
///
/// Panics when the values differ by more than the epsilon.
#[expect(
    clippy::float_arithmetic,
    reason = "test delta computation requires float maths"
)]
pub fn assert_close(actual: f64, expected: f64) {
    let delta = (actual - expected).abs();
    assert!(
        delta <= COORDINATE_EPSILON,
        "expected {expected}, got {actual} (|Δ| = {delta})"
    );
}

/// Stub [`FleetSource`] returning a pre-configured response.
#[derive(Debug, Clone)]
pub struct StubFleetSource {
    response: Result<FleetSnapshot, FetchError>,
    calls: Arc<Mutex<usize>>,
}

impl StubFleetSource {
    /// Return `snapshot` on every fetch.
    #[must_use]
    pub fn with_snapshot(snapshot: FleetSnapshot) -> Self {
        Self {
            response: Ok(snapshot),
            calls: Arc::default(),
        }
    }

    /// Return `error` on every fetch.
    #[must_use]
    pub fn with_error(error: FetchError) -> Self {
        Self {
            response: Err(error),
            calls: Arc::default(),
        }
    }

    /// Number of fetches performed so far, across clones.
    #[must_use]
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl FleetSource for StubFleetSource {
    async fn fetch_fleet(&self) -> Result<FleetSnapshot, FetchError> {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        self.response.clone()
    }
}

/// Stub [`RouteProvider`] returning a pre-configured response and recording
/// every request.
#[derive(Debug, Clone)]
pub struct StubRouteProvider {
    response: Result<RawRoute, RoutingProviderError>,
    requests: Arc<Mutex<Vec<(Position, Position)>>>,
}

impl StubRouteProvider {
    /// Return `route` for every request.
    #[must_use]
    pub fn with_route(route: RawRoute) -> Self {
        Self {
            response: Ok(route),
            requests: Arc::default(),
        }
    }

    /// Return `error` for every request.
    #[must_use]
    pub fn with_error(error: RoutingProviderError) -> Self {
        Self {
            response: Err(error),
            requests: Arc::default(),
        }
    }

    /// Requests received so far, across clones, as `(from, to)` pairs.
    #[must_use]
    pub fn requests(&self) -> Vec<(Position, Position)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl RouteProvider for StubRouteProvider {
    async fn walking_route(
        &self,
        from: Position,
        to: Position,
    ) -> Result<RawRoute, RoutingProviderError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((from, to));
        self.response.clone()
    }
}
