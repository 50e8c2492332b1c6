//! End-to-end tests for the HTTP adapters against loopback servers.

mod support;

use std::time::Duration;

use fleetside_core::test_support::sample_listing_json;
use fleetside_core::{
    FetchError, FleetSource, Position, RawRoute, RouteError, RouteProvider, RouteResolver,
    RoutingProviderError,
};
use fleetside_data::fleet::{HttpFleetClient, HttpFleetClientConfig};
use fleetside_data::routing::{OsrmRouteProvider, OsrmRouteProviderConfig};
use rstest::rstest;
use support::{refusing_url, serve_once, serve_silently};

const SHORT_TIMEOUT: Duration = Duration::from_millis(250);

const ROUTE_BODY: &str = r#"{
    "code": "Ok",
    "routes": [{"distance": 1234.5, "duration": 125.0, "weight": 125.0, "legs": []}],
    "waypoints": []
}"#;

fn fleet_client(base: &str) -> HttpFleetClient {
    HttpFleetClient::with_config(
        HttpFleetClientConfig::new(format!("{base}/cars.json")).with_timeout(SHORT_TIMEOUT),
    )
    .expect("client should build")
}

fn osrm(base: &str) -> OsrmRouteProvider {
    OsrmRouteProvider::with_config(OsrmRouteProviderConfig::new(base).with_timeout(SHORT_TIMEOUT))
        .expect("provider should build")
}

fn walk() -> (Position, Position) {
    (
        Position::new(48.137_154, 11.576_124),
        Position::new(48.134_557, 11.576_921),
    )
}

#[rstest]
#[tokio::test]
async fn fleet_client_decodes_listing_in_server_order() {
    let base = serve_once("200 OK", sample_listing_json()).await;

    let fleet = fleet_client(&base).fetch_fleet().await.expect("fleet loads");

    let ids: Vec<&str> = fleet.iter().map(|vehicle| vehicle.id.as_str()).collect();
    assert_eq!(
        ids,
        ["WMWSW31030T222518", "WMWSU31070T077232", "WMWSW31070T222269"]
    );
    let first = fleet.first().expect("first vehicle");
    assert_eq!(first.display_name, "Vanessa");
    assert_eq!(first.position, Position::new(48.134_557, 11.576_921));
}

#[rstest]
#[tokio::test]
async fn fleet_client_reports_failure_status_as_transport() {
    let base = serve_once("503 Service Unavailable", "").await;

    let err = fleet_client(&base)
        .fetch_fleet()
        .await
        .expect_err("503 should fail");

    match err {
        FetchError::Transport { url, status, .. } => {
            assert_eq!(url, format!("{base}/cars.json"));
            assert_eq!(status, Some(503));
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn fleet_client_reports_blank_body_as_empty() {
    let base = serve_once("200 OK", "").await;

    let err = fleet_client(&base)
        .fetch_fleet()
        .await
        .expect_err("blank body should fail");

    assert_eq!(
        err,
        FetchError::Empty {
            url: format!("{base}/cars.json")
        }
    );
}

#[rstest]
#[case("{}")]
#[case(r#"[{"id": "only-an-id"}]"#)]
#[tokio::test]
async fn fleet_client_reports_schema_mismatch_as_decode(#[case] body: &'static str) {
    let base = serve_once("200 OK", body).await;

    let err = fleet_client(&base)
        .fetch_fleet()
        .await
        .expect_err("schema mismatch should fail");

    assert!(matches!(err, FetchError::Decode { .. }), "got {err:?}");
}

#[rstest]
#[tokio::test]
async fn fleet_client_reports_refused_connection_as_transport() {
    let base = refusing_url().await;

    let err = fleet_client(&base)
        .fetch_fleet()
        .await
        .expect_err("refused connection should fail");

    assert!(
        matches!(err, FetchError::Transport { status: None, .. }),
        "got {err:?}"
    );
}

#[rstest]
#[tokio::test]
async fn fleet_client_reports_timeout_as_transport() {
    let base = serve_silently().await;

    let err = fleet_client(&base)
        .fetch_fleet()
        .await
        .expect_err("silent server should time out");

    match err {
        FetchError::Transport {
            status: None,
            message,
            ..
        } => assert!(message.contains("timed out"), "message: {message}"),
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn osrm_returns_first_route() {
    let base = serve_once("200 OK", ROUTE_BODY).await;
    let (from, to) = walk();

    let route = osrm(&base)
        .walking_route(from, to)
        .await
        .expect("route resolves");

    assert_eq!(route, RawRoute::new(1234.5, 125.0));
}

#[rstest]
#[tokio::test]
async fn osrm_reads_no_route_from_error_body() {
    let base = serve_once(
        "400 Bad Request",
        r#"{"code": "NoRoute", "message": "Impossible route between points"}"#,
    )
    .await;
    let (from, to) = walk();

    let err = osrm(&base)
        .walking_route(from, to)
        .await
        .expect_err("no route");

    assert_eq!(err, RoutingProviderError::NoRoute);
}

#[rstest]
#[tokio::test]
async fn osrm_reports_opaque_failure_status() {
    let base = serve_once("502 Bad Gateway", "<html>upstream down</html>").await;
    let (from, to) = walk();

    let err = osrm(&base)
        .walking_route(from, to)
        .await
        .expect_err("bad gateway");

    assert!(
        matches!(err, RoutingProviderError::HttpStatus { status: 502, .. }),
        "got {err:?}"
    );
}

#[rstest]
#[tokio::test]
async fn osrm_reports_unparsable_success_body() {
    let base = serve_once("200 OK", "not json").await;
    let (from, to) = walk();

    let err = osrm(&base)
        .walking_route(from, to)
        .await
        .expect_err("garbage body");

    assert!(
        matches!(err, RoutingProviderError::Parse { .. }),
        "got {err:?}"
    );
}

#[rstest]
#[tokio::test]
async fn osrm_reports_refused_connection_as_network() {
    let base = refusing_url().await;
    let (from, to) = walk();

    let err = osrm(&base)
        .walking_route(from, to)
        .await
        .expect_err("refused");

    assert!(
        matches!(err, RoutingProviderError::Network { .. }),
        "got {err:?}"
    );
}

#[rstest]
#[tokio::test]
async fn osrm_reports_timeout() {
    let base = serve_silently().await;
    let (from, to) = walk();

    let err = osrm(&base)
        .walking_route(from, to)
        .await
        .expect_err("timeout");

    assert!(
        matches!(err, RoutingProviderError::Timeout { .. }),
        "got {err:?}"
    );
}

#[rstest]
#[tokio::test]
async fn resolver_formats_osrm_route() {
    let base = serve_once("200 OK", ROUTE_BODY).await;
    let (from, to) = walk();

    let route = RouteResolver::new(osrm(&base))
        .resolve_route(from, to)
        .await
        .expect("route resolves");

    assert_eq!(route.distance_label(), "1.23 km");
    assert_eq!(route.travel_time_label(), "2 minutes");
}

#[rstest]
#[tokio::test]
async fn resolver_collapses_osrm_failures() {
    let base = serve_once("400 Bad Request", r#"{"code": "NoRoute"}"#).await;
    let (from, to) = walk();

    let err = RouteResolver::new(osrm(&base))
        .resolve_route(from, to)
        .await
        .expect_err("no route");

    assert_eq!(
        err,
        RouteError::Unavailable {
            source: RoutingProviderError::NoRoute
        }
    );
}
