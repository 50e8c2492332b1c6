//! Collaborators that let tests control when background work completes.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use fleetside_core::{Position, RawRoute, RouteProvider, RoutingProviderError};
use tokio::sync::{Notify, oneshot};

#[derive(Debug, Default)]
struct Gate {
    pending: Mutex<Vec<(Position, oneshot::Sender<Result<RawRoute, RoutingProviderError>>)>>,
    arrived: Notify,
}

/// [`RouteProvider`] whose requests block until the test answers them.
///
/// Requests are matched by destination, so answers can be released in any
/// order regardless of when the requests were issued.
///
/// # Examples
///
/// ```
/// use fleetside_core::{Position, RawRoute, RouteProvider};
/// use fleetside_data::test_support::GatedRouteProvider;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let provider = GatedRouteProvider::default();
/// let to = Position::new(48.1, 11.5);
/// let request = tokio::spawn({
///     let provider = provider.clone();
///     async move { provider.walking_route(Position::ORIGIN, to).await }
/// });
/// provider.answer(to, Ok(RawRoute::new(100.0, 60.0))).await;
/// assert_eq!(request.await.unwrap(), Ok(RawRoute::new(100.0, 60.0)));
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct GatedRouteProvider {
    gate: Arc<Gate>,
}

impl GatedRouteProvider {
    /// Answer the oldest outstanding request heading to `to`, waiting for one
    /// to arrive if necessary.
    pub async fn answer(&self, to: Position, result: Result<RawRoute, RoutingProviderError>) {
        loop {
            let arrived = self.gate.arrived.notified();
            if let Some(sender) = self.take_pending(to) {
                // The requester may have been dropped with its session.
                drop(sender.send(result));
                return;
            }
            arrived.await;
        }
    }

    /// Number of requests still waiting for an answer.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.gate
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn take_pending(
        &self,
        to: Position,
    ) -> Option<oneshot::Sender<Result<RawRoute, RoutingProviderError>>> {
        let mut pending = self
            .gate
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let index = pending.iter().position(|(target, _)| *target == to)?;
        Some(pending.remove(index).1)
    }
}

#[async_trait]
impl RouteProvider for GatedRouteProvider {
    async fn walking_route(
        &self,
        _from: Position,
        to: Position,
    ) -> Result<RawRoute, RoutingProviderError> {
        let (sender, receiver) = oneshot::channel();
        self.gate
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((to, sender));
        self.gate.arrived.notify_waiters();
        receiver.await.unwrap_or_else(|_| {
            Err(RoutingProviderError::Network {
                url: "gated://route".to_owned(),
                message: "gate dropped before answering".to_owned(),
            })
        })
    }
}
