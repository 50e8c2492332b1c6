//! Tests for the session runtime using in-process collaborators.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use fleetside_core::test_support::{StubFleetSource, StubRouteProvider, sample_fleet};
use fleetside_core::{
    FetchError, FixedLocation, FleetSnapshot, FleetSource, Position, RawRoute, ReservationPolicy,
    RoutingProviderError, VehicleId,
};
use fleetside_data::session::{
    FleetSession, FleetStatus, SessionCollaborators, SessionConfig, SessionHandle, SessionView,
};
use fleetside_data::test_support::GatedRouteProvider;
use rstest::{fixture, rstest};

/// Fleet source answering from a queue of canned responses.
#[derive(Debug, Clone, Default)]
struct QueuedFleetSource {
    responses: Arc<Mutex<VecDeque<Result<FleetSnapshot, FetchError>>>>,
}

impl QueuedFleetSource {
    fn new(responses: impl IntoIterator<Item = Result<FleetSnapshot, FetchError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().collect())),
        }
    }
}

#[async_trait]
impl FleetSource for QueuedFleetSource {
    async fn fetch_fleet(&self) -> Result<FleetSnapshot, FetchError> {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(FleetSnapshot::empty()))
    }
}

/// Fleet source whose fetches after the first never complete.
#[derive(Debug, Default)]
struct StallingFleetSource {
    fetched: AtomicBool,
}

#[async_trait]
impl FleetSource for StallingFleetSource {
    async fn fetch_fleet(&self) -> Result<FleetSnapshot, FetchError> {
        if self.fetched.swap(true, Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        Ok(sample_fleet())
    }
}

#[fixture]
fn here() -> Position {
    Position::new(48.137_154, 11.576_124)
}

fn transport_failure() -> FetchError {
    FetchError::Transport {
        url: "http://fleet.test/cars.json".to_owned(),
        status: Some(503),
        message: "service unavailable".to_owned(),
    }
}

fn listed(index: usize) -> (VehicleId, Position) {
    let fleet = sample_fleet();
    let vehicle = fleet.vehicles().get(index).expect("vehicle index within fleet");
    (vehicle.id.clone(), vehicle.position)
}

async fn ready(handle: &mut SessionHandle) -> SessionView {
    handle
        .wait_for(|view| view.fleet == FleetStatus::Ready)
        .await
        .expect("session should load the fleet")
}

fn gated_session(here: Position, routes: GatedRouteProvider) -> SessionHandle {
    FleetSession::spawn(
        SessionConfig::default(),
        SessionCollaborators::new(
            StubFleetSource::with_snapshot(sample_fleet()),
            routes,
            FixedLocation::at(here),
        ),
    )
}

#[rstest]
#[tokio::test]
async fn loads_fleet_on_start(here: Position) {
    let source = StubFleetSource::with_snapshot(sample_fleet());
    let mut handle = FleetSession::spawn(
        SessionConfig::default(),
        SessionCollaborators::new(
            source.clone(),
            StubRouteProvider::with_route(RawRoute::new(1.0, 1.0)),
            FixedLocation::at(here),
        ),
    );

    let view = ready(&mut handle).await;

    assert_eq!(view.vehicles, sample_fleet());
    assert_eq!(view.centroid, sample_fleet().centroid());
    assert!(view.reserved.is_none());
    assert!(view.selection.is_idle());
    assert_eq!(source.calls(), 1);
    handle.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn first_vehicle_policy_reserves_first_listed(here: Position) {
    let mut handle = FleetSession::spawn(
        SessionConfig::default().with_reservation_policy(ReservationPolicy::FirstVehicle),
        SessionCollaborators::new(
            StubFleetSource::with_snapshot(sample_fleet()),
            StubRouteProvider::with_route(RawRoute::new(1.0, 1.0)),
            FixedLocation::at(here),
        ),
    );

    let view = ready(&mut handle).await;

    assert_eq!(view.reserved, Some(listed(0).0));
    handle.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn failed_fetch_is_reported_and_refresh_recovers(here: Position) {
    let mut handle = FleetSession::spawn(
        SessionConfig::default(),
        SessionCollaborators::new(
            QueuedFleetSource::new([Err(transport_failure()), Ok(sample_fleet())]),
            StubRouteProvider::with_route(RawRoute::new(1.0, 1.0)),
            FixedLocation::at(here),
        ),
    );

    let view = handle
        .wait_for(|view| matches!(view.fleet, FleetStatus::Unavailable(_)))
        .await
        .expect("failure should be published");
    assert_eq!(view.fleet, FleetStatus::Unavailable(transport_failure()));
    assert!(view.vehicles.is_empty());

    handle.refresh().await.expect("session running");
    let view = ready(&mut handle).await;
    assert_eq!(view.vehicles.len(), 3);
    handle.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn failed_refresh_keeps_previous_fleet(here: Position) {
    let mut handle = FleetSession::spawn(
        SessionConfig::default(),
        SessionCollaborators::new(
            QueuedFleetSource::new([Ok(sample_fleet()), Err(transport_failure())]),
            StubRouteProvider::with_route(RawRoute::new(1.0, 1.0)),
            FixedLocation::at(here),
        ),
    );
    ready(&mut handle).await;

    handle.refresh().await.expect("session running");
    let view = handle
        .wait_for(|view| matches!(view.fleet, FleetStatus::Unavailable(_)))
        .await
        .expect("failure should be published");

    assert_eq!(view.vehicles, sample_fleet());
    handle.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn refresh_in_flight_reports_loading_and_keeps_fleet(here: Position) {
    let mut handle = FleetSession::spawn(
        SessionConfig::default(),
        SessionCollaborators::new(
            StallingFleetSource::default(),
            StubRouteProvider::with_route(RawRoute::new(1.0, 1.0)),
            FixedLocation::at(here),
        ),
    );
    ready(&mut handle).await;

    handle.refresh().await.expect("session running");
    let view = handle
        .wait_for(|view| view.fleet == FleetStatus::Loading)
        .await
        .expect("refresh should be published");

    assert_eq!(view.vehicles, sample_fleet());
    handle.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn tap_resolves_walking_route_from_user_position(here: Position) {
    let routes = StubRouteProvider::with_route(RawRoute::new(1234.5, 125.0));
    let mut handle = FleetSession::spawn(
        SessionConfig::default(),
        SessionCollaborators::new(
            StubFleetSource::with_snapshot(sample_fleet()),
            routes.clone(),
            FixedLocation::at(here),
        ),
    );
    ready(&mut handle).await;
    let (id, destination) = listed(1);

    handle.tap_vehicle(id.clone()).await.expect("session running");
    let view = handle
        .wait_for(|view| view.selection.detail_panel_visible())
        .await
        .expect("route should be shown");

    let route = view.selection.route().expect("route shown");
    assert_eq!(route.distance_label(), "1.23 km");
    assert_eq!(route.travel_time_label(), "2 minutes");
    assert_eq!(view.shown_vehicle().map(|vehicle| &vehicle.id), Some(&id));
    assert_eq!(routes.requests(), vec![(here, destination)]);
    handle.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn failed_route_returns_to_idle(here: Position) {
    let routes = GatedRouteProvider::default();
    let mut handle = gated_session(here, routes.clone());
    ready(&mut handle).await;
    let (id, destination) = listed(0);

    handle.tap_vehicle(id).await.expect("session running");
    handle
        .wait_for(|view| view.selection.route_pending())
        .await
        .expect("resolution should start");
    routes
        .answer(destination, Err(RoutingProviderError::NoRoute))
        .await;
    let view = handle
        .wait_for(|view| !view.selection.route_pending())
        .await
        .expect("failure should be applied");

    assert!(view.selection.is_idle());
    assert!(view.selection.route().is_none());
    assert!(!view.selection.detail_panel_visible());
    handle.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn superseded_route_is_never_shown(here: Position) {
    let routes = GatedRouteProvider::default();
    let mut handle = gated_session(here, routes.clone());
    ready(&mut handle).await;
    let (first, first_position) = listed(0);
    let (second, second_position) = listed(1);

    handle.tap_vehicle(first).await.expect("session running");
    handle.tap_vehicle(second.clone()).await.expect("session running");
    handle
        .wait_for(|view| view.selection.selected_vehicle_id() == Some(&second))
        .await
        .expect("second tap should be applied");
    routes
        .answer(second_position, Ok(RawRoute::new(2000.0, 1500.0)))
        .await;
    routes
        .answer(first_position, Ok(RawRoute::new(100.0, 60.0)))
        .await;

    let view = handle
        .wait_for(|view| view.selection.route().is_some())
        .await
        .expect("second route should be shown");
    assert_eq!(view.selection.route_vehicle_id(), Some(&second));
    assert_eq!(
        view.selection.route().map(|route| route.distance_label()),
        Some("2.00 km".to_owned())
    );
    assert_eq!(routes.outstanding(), 0);
    handle.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn reservation_and_dismissal_act_on_shown_vehicle(here: Position) {
    let mut handle = FleetSession::spawn(
        SessionConfig::default(),
        SessionCollaborators::new(
            StubFleetSource::with_snapshot(sample_fleet()),
            StubRouteProvider::with_route(RawRoute::new(500.0, 400.0)),
            FixedLocation::at(here),
        ),
    );
    ready(&mut handle).await;
    let (id, _) = listed(2);
    handle.tap_vehicle(id.clone()).await.expect("session running");
    handle
        .wait_for(|view| view.selection.detail_panel_visible())
        .await
        .expect("route should be shown");

    handle.toggle_reservation().await.expect("session running");
    let view = handle
        .wait_for(|view| view.reserved.is_some())
        .await
        .expect("reservation should be applied");
    assert!(view.is_reserved(&id));

    handle.toggle_reservation().await.expect("session running");
    handle
        .wait_for(|view| view.reserved.is_none())
        .await
        .expect("reservation should be released");

    handle.dismiss_panel().await.expect("session running");
    let view = handle
        .wait_for(|view| !view.selection.detail_panel_visible())
        .await
        .expect("panel should be hidden");
    assert_eq!(view.selection.selected_vehicle_id(), Some(&id));
    handle.shutdown().await;
}

#[rstest]
#[tokio::test]
async fn observers_see_session_stop(here: Position) {
    let handle = gated_session(here, GatedRouteProvider::default());
    let mut observer = handle.subscribe();

    handle.shutdown().await;

    while observer.changed().await.is_ok() {}
    assert!(observer.has_changed().is_err());
}
