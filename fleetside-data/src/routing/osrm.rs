//! OSRM API response types for the Route service.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
///
/// Only the fields the engine reads are modelled; everything else in the
/// body is ignored.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route found between the coordinates
    /// - `"NoSegment"` - A coordinate could not be snapped to the network
    /// - `"InvalidQuery"` - Invalid query parameters
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    pub routes: Option<Vec<OsrmRoute>>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Whether the service reported that the positions are not connected.
    #[must_use]
    pub fn is_unroutable(&self) -> bool {
        matches!(self.code.as_str(), "NoRoute" | "NoSegment")
    }
}

/// One route of a [`RouteResponse`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OsrmRoute {
    /// Route length in metres.
    pub distance: f64,
    /// Travel time in seconds.
    pub duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [
                {"distance": 1234.5, "duration": 125.0, "weight": 125.0, "legs": []},
                {"distance": 1500.0, "duration": 160.0}
            ],
            "waypoints": []
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        let routes = response.routes.expect("should have routes");
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].distance, 1234.5);
        assert_eq!(routes[0].duration, 125.0);
    }

    #[test]
    fn deserialise_no_route_response() {
        let json = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert!(response.is_unroutable());
        assert!(response.routes.is_none());
    }

    #[test]
    fn invalid_query_is_not_unroutable() {
        let json = r#"{"code": "InvalidQuery", "message": "Query string malformed"}"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_unroutable());
        assert_eq!(response.message.as_deref(), Some("Query string malformed"));
    }
}
