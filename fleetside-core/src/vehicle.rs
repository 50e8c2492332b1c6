//! Vehicle records and geographic positions.
//!
//! Vehicles are decoded from the fleet listing. Coordinates arrive as decimal
//! strings; an unparsable or non-finite coordinate decodes to `0.0` instead of
//! failing the whole listing.

use std::fmt;

use geo::{Coord, Point};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a vehicle within a fleet snapshot.
///
/// # Examples
///
/// ```
/// use fleetside_core::VehicleId;
///
/// let id = VehicleId::from("WMWSW31030T222518");
/// assert_eq!(id.as_str(), "WMWSW31030T222518");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VehicleId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for VehicleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A WGS84 position.
///
/// Converts to [`geo::Coord`] with `x = longitude` and `y = latitude`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Position {
    /// The `(0, 0)` position used for empty fleets and unparsable coordinates.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Construct a position from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Position> for Coord<f64> {
    fn from(position: Position) -> Self {
        Self {
            x: position.longitude,
            y: position.latitude,
        }
    }
}

impl From<Coord<f64>> for Position {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<Position> for Point<f64> {
    fn from(position: Position) -> Self {
        Self::from(Coord::from(position))
    }
}

impl From<Point<f64>> for Position {
    fn from(point: Point<f64>) -> Self {
        Self::from(point.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// A shareable vehicle as listed by the fleet endpoint.
///
/// # Examples
///
/// ```
/// use fleetside_core::{Position, Vehicle};
///
/// let json = r#"{
///     "id": "id0", "name": "Car1", "brand": "BMW", "modelName": "MINI",
///     "fuelType": "D", "transmission": "M",
///     "latitude": "48.134557", "longitude": "not-a-number",
///     "carImageUrl": "https://example.org/purple.webp"
/// }"#;
/// let vehicle: Vehicle = serde_json::from_str(json)?;
/// assert_eq!(vehicle.position, Position::new(48.134557, 0.0));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "VehicleRecord")]
pub struct Vehicle {
    /// Identifier, unique within a snapshot.
    pub id: VehicleId,
    /// Human-readable vehicle name.
    pub display_name: String,
    /// Manufacturer brand.
    pub brand: String,
    /// Model name.
    pub model_name: String,
    /// Fuel type code as listed (for example `"D"` or `"E"`).
    pub fuel_type: String,
    /// Transmission code as listed (for example `"M"` or `"A"`).
    pub transmission_type: String,
    /// Image URL for the vehicle marker.
    pub image_url: String,
    /// Parked position.
    pub position: Position,
    /// Licence plate, when listed.
    pub license_plate: Option<String>,
    /// Fuel level in `[0, 1]`, when listed.
    pub fuel_level: Option<f64>,
}

/// Wire shape of one entry in the fleet listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VehicleRecord {
    id: String,
    name: String,
    brand: String,
    model_name: String,
    fuel_type: String,
    transmission: String,
    latitude: String,
    longitude: String,
    car_image_url: String,
    #[serde(default, deserialize_with = "lenient_extra")]
    license_plate: Option<String>,
    #[serde(default, deserialize_with = "lenient_extra")]
    fuel_level: Option<f64>,
}

impl From<VehicleRecord> for Vehicle {
    fn from(record: VehicleRecord) -> Self {
        let latitude = parse_coordinate(&record.latitude, "latitude", &record.id);
        let longitude = parse_coordinate(&record.longitude, "longitude", &record.id);
        Self {
            id: VehicleId(record.id),
            display_name: record.name,
            brand: record.brand,
            model_name: record.model_name,
            fuel_type: record.fuel_type,
            transmission_type: record.transmission,
            image_url: record.car_image_url,
            position: Position::new(latitude, longitude),
            license_plate: record.license_plate,
            fuel_level: record.fuel_level,
        }
    }
}

/// Decode an optional listing extra, treating a mistyped value as absent.
fn lenient_extra<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value)
        .map_err(|err| warn!("ignoring malformed optional vehicle field: {err}"))
        .ok())
}

fn parse_coordinate(raw: &str, field: &str, vehicle_id: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!("vehicle {vehicle_id}: {field} {raw:?} is not a number; using 0.0");
            0.0
        }
    }
}
