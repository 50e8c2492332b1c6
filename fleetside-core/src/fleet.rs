//! Fleet snapshots and the source that produces them.
//!
//! A [`FleetSnapshot`] is the complete, ordered set of vehicles returned by one
//! successful fetch. Snapshots are immutable and cheap to clone; a new fetch
//! replaces the previous snapshot wholesale.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use geo::{Centroid, MultiPoint, Point};
use thiserror::Error;

use crate::vehicle::{Position, Vehicle, VehicleId};

/// Errors raised while turning a listing body into a [`FleetSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetDecodeError {
    /// The body did not match the vehicle listing schema.
    #[error("fleet listing does not match the vehicle schema: {message}")]
    Schema {
        /// Message from the JSON decoder.
        message: String,
    },
    /// Two listed vehicles share an identifier.
    #[error("fleet listing contains duplicate vehicle id {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: VehicleId,
    },
}

/// Ordered, immutable set of vehicles in server order.
///
/// # Examples
///
/// ```
/// use fleetside_core::FleetSnapshot;
///
/// let body = br#"[{
///     "id": "id0", "name": "Car1", "brand": "BMW", "modelName": "MINI",
///     "fuelType": "D", "transmission": "M",
///     "latitude": "48.0", "longitude": "11.0",
///     "carImageUrl": "https://example.org/car.webp"
/// }]"#;
/// let snapshot = FleetSnapshot::from_json_slice(body)?;
/// assert_eq!(snapshot.len(), 1);
/// # Ok::<(), fleetside_core::FleetDecodeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FleetSnapshot {
    vehicles: Arc<[Vehicle]>,
}

impl FleetSnapshot {
    /// Build a snapshot, rejecting duplicate identifiers.
    pub fn new(vehicles: Vec<Vehicle>) -> Result<Self, FleetDecodeError> {
        let mut seen = HashSet::with_capacity(vehicles.len());
        if let Some(duplicate) = vehicles.iter().find(|vehicle| !seen.insert(&vehicle.id)) {
            return Err(FleetDecodeError::DuplicateId {
                id: duplicate.id.clone(),
            });
        }
        Ok(Self {
            vehicles: vehicles.into(),
        })
    }

    /// A snapshot with no vehicles.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a JSON array of vehicle records.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, FleetDecodeError> {
        let vehicles: Vec<Vehicle> =
            serde_json::from_slice(body).map_err(|err| FleetDecodeError::Schema {
                message: err.to_string(),
            })?;
        Self::new(vehicles)
    }

    /// Vehicles in server order.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Iterate vehicles in server order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vehicle> {
        self.vehicles.iter()
    }

    /// Number of vehicles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the snapshot holds no vehicles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// The first vehicle in server order.
    #[must_use]
    pub fn first(&self) -> Option<&Vehicle> {
        self.vehicles.first()
    }

    /// Look up a vehicle by identifier.
    #[must_use]
    pub fn get(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| &vehicle.id == id)
    }

    /// Arithmetic mean of all vehicle positions, or [`Position::ORIGIN`] when
    /// the snapshot is empty.
    #[must_use]
    pub fn centroid(&self) -> Position {
        let points: Vec<Point<f64>> = self
            .vehicles
            .iter()
            .map(|vehicle| Point::from(vehicle.position))
            .collect();
        MultiPoint::new(points)
            .centroid()
            .map_or(Position::ORIGIN, Position::from)
    }
}

impl<'a> IntoIterator for &'a FleetSnapshot {
    type Item = &'a Vehicle;
    type IntoIter = std::slice::Iter<'a, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Failures while fetching the fleet listing.
///
/// Every variant is surfaced to the presentation layer as "fleet unavailable".
/// None of them is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No usable response was received.
    #[error("fleet request to {url} failed: {message}")]
    Transport {
        /// Endpoint that was queried.
        url: String,
        /// HTTP status, when the server answered with a failure status.
        status: Option<u16>,
        /// Description of the transport failure.
        message: String,
    },
    /// The response carried no body.
    #[error("fleet response from {url} was empty")]
    Empty {
        /// Endpoint that was queried.
        url: String,
    },
    /// The body could not be decoded into a fleet snapshot.
    #[error("failed to decode fleet listing: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },
}

impl From<FleetDecodeError> for FetchError {
    fn from(err: FleetDecodeError) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

/// Fetch the complete fleet listing.
///
/// Implementations issue one request per call and neither retry nor cache.
#[async_trait]
pub trait FleetSource: Send + Sync {
    /// Fetch and decode the current fleet.
    async fn fetch_fleet(&self) -> Result<FleetSnapshot, FetchError>;
}

#[async_trait]
impl<S> FleetSource for Arc<S>
where
    S: FleetSource + ?Sized,
{
    async fn fetch_fleet(&self) -> Result<FleetSnapshot, FetchError> {
        (**self).fetch_fleet().await
    }
}
