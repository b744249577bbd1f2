//! # postmap
//!
//! Clustering and adaptive marker rendering for location-tagged posts.
//!
//! This library implements the map-facing core of a photo-sharing client:
//! radius filtering around the viewer, zoom-adaptive proximity clustering,
//! marker style resolution (color, size, spiral offsets, z-order), zoom
//! derivation from radii and route bounds, and a route overlay backed by an
//! external directions service.

pub mod core;
pub mod layers;
pub mod prelude;
pub mod route;
pub mod spatial;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    geo::{GeoBounds, GeoPoint, Point},
    zoom,
};

pub use crate::spatial::{
    clustering::{group_posts, BucketKey, Cluster, Post},
    filter::RadiusFilter,
};

pub use crate::layers::marker::{
    render_clusters, MarkerColor, MarkerPayload, MarkerVisualState, RenderedMarker,
};

pub use crate::route::{
    DirectionsClient, RouteEvent, RouteInfo, RouteOverlay, RouteState, RouteStep, TravelMode,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Directions error: {0}")]
    Directions(String),
}
