//! Route overlay: fetches a navigable path between the viewer and a selected
//! destination and tracks its lifecycle.
//!
//! Lifecycle: `NoRoute -> Requesting -> Active -> NoRoute` on clear or new
//! destination, and `Active -> Requesting` when the travel mode changes with
//! a destination set. There is no error state: a failed fetch logs and falls
//! back to `NoRoute`.
//!
//! Fetches run on detached threads (the directions client blocks) and report
//! back over a channel; results are applied only inside [`RouteOverlay::poll`],
//! so the owning UI thread never blocks. Each request carries a generation
//! number and only the latest generation may mutate state, which keeps a
//! stale in-flight response from overwriting a newer request's result.

pub mod directions;

pub use directions::{DirectionsClient, RouteInfo, RouteStep, TravelMode};

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread;

use crate::core::geo::{GeoBounds, GeoPoint};
use crate::core::zoom;
use crate::Result;

/// Current phase of the route lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteState {
    NoRoute,
    Requesting,
    Active(RouteInfo),
}

/// Events surfaced to the UI from [`RouteOverlay::poll`] and
/// [`RouteOverlay::clear`].
#[derive(Debug, Clone, PartialEq)]
pub enum RouteEvent {
    /// A route arrived: recenter and rezoom the camera to frame it.
    Activated {
        info: RouteInfo,
        center: GeoPoint,
        zoom: f64,
    },
    /// Route state was reset; drop the route line and info panel.
    Cleared,
}

struct FetchResult {
    generation: u64,
    outcome: Result<RouteInfo>,
}

/// Owns the route lifecycle for one map screen.
pub struct RouteOverlay {
    client: DirectionsClient,
    mode: TravelMode,
    destination: Option<GeoPoint>,
    state: RouteState,
    generation: u64,
    tx: Sender<FetchResult>,
    rx: Receiver<FetchResult>,
}

impl RouteOverlay {
    pub fn new(client: DirectionsClient) -> Self {
        let (tx, rx) = unbounded();
        Self {
            client,
            mode: TravelMode::Walking,
            destination: None,
            state: RouteState::NoRoute,
            generation: 0,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &RouteState {
        &self.state
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.mode
    }

    pub fn route_info(&self) -> Option<&RouteInfo> {
        match &self.state {
            RouteState::Active(info) => Some(info),
            _ => None,
        }
    }

    /// Requests a route from the viewer to a destination. Replaces any
    /// previous route or in-flight request. The viewer location is passed in
    /// per call; the overlay never reads shared state.
    pub fn request(&mut self, viewer: GeoPoint, destination: GeoPoint) {
        if !viewer.is_valid() || !destination.is_valid() {
            log::warn!("ignoring route request with invalid coordinates");
            return;
        }
        self.destination = Some(destination);
        self.spawn_fetch(viewer, destination);
    }

    /// Switches travel mode. Re-fetches with the new mode if a destination is
    /// set, otherwise just records the mode.
    pub fn set_travel_mode(&mut self, mode: TravelMode, viewer: GeoPoint) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        if let Some(destination) = self.destination {
            self.spawn_fetch(viewer, destination);
        }
    }

    /// Resets all route state atomically. Bumping the generation invalidates
    /// any in-flight request. Returns `Cleared` if there was anything to
    /// clear.
    pub fn clear(&mut self) -> Option<RouteEvent> {
        self.generation += 1;
        self.destination = None;
        if self.state == RouteState::NoRoute {
            return None;
        }
        self.state = RouteState::NoRoute;
        Some(RouteEvent::Cleared)
    }

    /// Drains completed fetches and applies the latest-generation result.
    /// Call once per frame/update tick.
    pub fn poll(&mut self) -> Option<RouteEvent> {
        while let Ok(result) = self.rx.try_recv() {
            if result.generation != self.generation {
                log::debug!(
                    "discarding stale directions response (generation {} != {})",
                    result.generation,
                    self.generation
                );
                continue;
            }
            match result.outcome {
                Ok(info) => {
                    // parse_response guarantees a non-empty path
                    let bounds = GeoBounds::from_points(&info.path);
                    let center = bounds.map(|b| b.center()).unwrap_or_default();
                    let frame_zoom = zoom::zoom_for_route_bounds(&info.path);
                    self.state = RouteState::Active(info.clone());
                    return Some(RouteEvent::Activated {
                        info,
                        center,
                        zoom: frame_zoom,
                    });
                }
                Err(err) => {
                    log::warn!("directions request failed: {err}");
                    self.state = RouteState::NoRoute;
                }
            }
        }
        None
    }

    fn spawn_fetch(&mut self, viewer: GeoPoint, destination: GeoPoint) {
        self.generation += 1;
        self.state = RouteState::Requesting;

        let generation = self.generation;
        let tx = self.tx.clone();
        let client = self.client.clone();
        let mode = self.mode;

        thread::spawn(move || {
            let outcome = client.fetch(mode, viewer, destination);
            let _ = tx.send(FetchResult {
                generation,
                outcome,
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn sample_route() -> RouteInfo {
        RouteInfo {
            distance_m: 2500.0,
            duration_s: 1800.0,
            path: vec![GeoPoint::new(40.0, 10.0), GeoPoint::new(41.0, 10.5)],
            steps: Vec::new(),
        }
    }

    fn overlay() -> RouteOverlay {
        RouteOverlay::new(DirectionsClient::new("test-token"))
    }

    #[test]
    fn test_initial_state() {
        let overlay = overlay();
        assert_eq!(*overlay.state(), RouteState::NoRoute);
        assert_eq!(overlay.travel_mode(), TravelMode::Walking);
        assert!(overlay.route_info().is_none());
    }

    #[test]
    fn test_poll_applies_current_generation() {
        let mut overlay = overlay();
        overlay.generation = 3;
        overlay.state = RouteState::Requesting;
        overlay
            .tx
            .send(FetchResult {
                generation: 3,
                outcome: Ok(sample_route()),
            })
            .unwrap();

        let event = overlay.poll().unwrap();
        match event {
            RouteEvent::Activated { center, zoom, .. } => {
                assert!((center.lat - 40.5).abs() < 1e-9);
                assert!((center.lng - 10.25).abs() < 1e-9);
                // same bounds as the route framing scenario: clamped to 11
                assert_eq!(zoom, 11.0);
            }
            other => panic!("expected Activated, got {other:?}"),
        }
        assert!(overlay.route_info().is_some());
    }

    #[test]
    fn test_poll_discards_stale_generation() {
        let mut overlay = overlay();
        overlay.generation = 5;
        overlay.state = RouteState::Requesting;
        overlay
            .tx
            .send(FetchResult {
                generation: 4,
                outcome: Ok(sample_route()),
            })
            .unwrap();

        assert!(overlay.poll().is_none());
        assert_eq!(*overlay.state(), RouteState::Requesting);
    }

    #[test]
    fn test_stale_result_does_not_overwrite_newer_one() {
        let mut overlay = overlay();
        overlay.generation = 2;
        overlay.state = RouteState::Requesting;

        // old response arrives first, then the current one
        let stale = RouteInfo {
            distance_m: 1.0,
            ..sample_route()
        };
        overlay
            .tx
            .send(FetchResult {
                generation: 1,
                outcome: Ok(stale),
            })
            .unwrap();
        overlay
            .tx
            .send(FetchResult {
                generation: 2,
                outcome: Ok(sample_route()),
            })
            .unwrap();

        overlay.poll();
        assert_eq!(overlay.route_info().unwrap().distance_m, 2500.0);
    }

    #[test]
    fn test_failure_falls_back_to_no_route() {
        let mut overlay = overlay();
        overlay.generation = 1;
        overlay.state = RouteState::Requesting;
        overlay
            .tx
            .send(FetchResult {
                generation: 1,
                outcome: Err(Error::Directions("empty route list".to_string())),
            })
            .unwrap();

        assert!(overlay.poll().is_none());
        assert_eq!(*overlay.state(), RouteState::NoRoute);
    }

    #[test]
    fn test_clear_resets_and_invalidates() {
        let mut overlay = overlay();
        overlay.generation = 1;
        overlay.destination = Some(GeoPoint::new(41.0, 10.5));
        overlay.state = RouteState::Active(sample_route());

        assert_eq!(overlay.clear(), Some(RouteEvent::Cleared));
        assert_eq!(*overlay.state(), RouteState::NoRoute);
        assert!(overlay.destination.is_none());

        // a response from before the clear is now stale
        overlay
            .tx
            .send(FetchResult {
                generation: 1,
                outcome: Ok(sample_route()),
            })
            .unwrap();
        assert!(overlay.poll().is_none());
        assert_eq!(*overlay.state(), RouteState::NoRoute);

        // clearing an already-clear overlay emits nothing
        assert_eq!(overlay.clear(), None);
    }

    #[test]
    fn test_invalid_coordinates_ignored() {
        let mut overlay = overlay();
        overlay.request(GeoPoint::new(f64::NAN, 0.0), GeoPoint::new(40.0, 10.0));
        assert_eq!(*overlay.state(), RouteState::NoRoute);
        assert!(overlay.destination.is_none());
    }

    #[test]
    fn test_set_travel_mode_without_destination() {
        let mut overlay = overlay();
        overlay.set_travel_mode(TravelMode::Driving, GeoPoint::new(40.0, 10.0));
        assert_eq!(overlay.travel_mode(), TravelMode::Driving);
        // no destination set, so no request was issued
        assert_eq!(*overlay.state(), RouteState::NoRoute);
    }
}
