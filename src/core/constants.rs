//! Core constants for clustering, marker styling, and camera framing.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// Lowest zoom level the camera may be driven to.
pub const MIN_ZOOM: f64 = 3.0;

/// Highest zoom level the camera may be driven to.
pub const MAX_ZOOM: f64 = 18.0;

/// Zoom levels are snapped to multiples of this step.
pub const ZOOM_STEP: f64 = 0.5;

/// Base term of the radius-to-zoom formula.
pub const BASE_ZOOM_FACTOR: f64 = 14.0;

/// Scales the configured radius before it enters the radius-to-zoom log term.
pub const RADIUS_MULTIPLIER: f64 = 2.0;

/// Radii below this (km) are framed as if they were this large.
pub const MIN_FRAMED_RADIUS_KM: f64 = 0.1;

/// Bucket threshold (degrees) at the neutral zoom adjustment of 1.0.
pub const BASE_BUCKET_THRESHOLD: f64 = 0.0001;

/// Zoom level at which the bucket adjustment is exactly 1.0.
pub const BUCKET_NEUTRAL_ZOOM: f64 = 15.0;

/// Clusters larger than one post explode into sub-markers above this zoom.
pub const EXPLODE_ZOOM: f64 = 14.0;

/// Approximate kilometers per degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Base term of the route-framing zoom formula, tuned independently of
/// `BASE_ZOOM_FACTOR`.
pub const ROUTE_FRAME_ZOOM_BASE: f64 = 14.0;

/// Zoom bounds used when framing a route; narrower than the camera-wide
/// `[MIN_ZOOM, MAX_ZOOM]` range.
pub const ROUTE_MIN_ZOOM: f64 = 11.0;
pub const ROUTE_MAX_ZOOM: f64 = 16.0;

/// Fraction added to each axis of a route bounding box before framing.
pub const ROUTE_FRAME_PADDING: f64 = 0.10;

/// Angle step (degrees) between consecutive spiral sub-markers.
pub const SPIRAL_ANGLE_STEP_DEG: f64 = 60.0;

/// Spiral radius as a fraction of the rendered marker size.
pub const SPIRAL_RADIUS_FACTOR: f64 = 0.8;
