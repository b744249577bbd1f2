//! Prelude module for common postmap types
//!
//! Re-exports the most commonly used types and functions for easy importing
//! with `use postmap::prelude::*;`

pub use crate::core::{
    constants,
    geo::{GeoBounds, GeoPoint, Point},
    zoom,
};

pub use crate::spatial::{
    clustering::{bucket_threshold, group_posts, BucketKey, Cluster, Post},
    filter::RadiusFilter,
};

pub use crate::layers::marker::{
    render_clusters, MarkerColor, MarkerPayload, MarkerVisualState, RenderedMarker,
};

pub use crate::route::{
    DirectionsClient, RouteEvent, RouteInfo, RouteOverlay, RouteState, RouteStep, TravelMode,
};

pub use crate::{Error, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
