//! Zoom derivation: from a desired visible radius, and from route bounds.
//!
//! The two formulas are tuned independently. Radius framing drives the whole
//! `[MIN_ZOOM, MAX_ZOOM]` range and answers "show everything within my
//! notification radius"; route framing uses a narrower `[11, 16]` band that
//! keeps a rendered path readable.

use crate::core::constants::{
    BASE_ZOOM_FACTOR, KM_PER_DEGREE, MAX_ZOOM, MIN_FRAMED_RADIUS_KM, MIN_ZOOM,
    RADIUS_MULTIPLIER, ROUTE_FRAME_PADDING, ROUTE_FRAME_ZOOM_BASE, ROUTE_MAX_ZOOM,
    ROUTE_MIN_ZOOM, ZOOM_STEP,
};
use crate::core::geo::{GeoBounds, GeoPoint};

/// Snaps a zoom level to the nearest `ZOOM_STEP` multiple.
pub fn quantize(zoom: f64) -> f64 {
    (zoom / ZOOM_STEP).round() * ZOOM_STEP
}

/// Derives a camera zoom from a visible radius in kilometers. Larger radius
/// means a lower (more zoomed-out) result. Output is clamped to
/// `[MIN_ZOOM, MAX_ZOOM]` and quantized, for any positive input including
/// extremes near zero and infinity.
pub fn zoom_for_radius(radius_km: f64) -> f64 {
    let radius = radius_km.max(MIN_FRAMED_RADIUS_KM);
    let zoom = BASE_ZOOM_FACTOR - (radius * RADIUS_MULTIPLIER).log2();
    quantize(zoom.clamp(MIN_ZOOM, MAX_ZOOM))
}

/// Derives a camera zoom that frames a route's coordinate list: bounding box,
/// 10% padding per axis, then a log-scale fit of the larger span. An empty
/// path falls back to `ROUTE_MIN_ZOOM`.
pub fn zoom_for_route_bounds(path: &[GeoPoint]) -> f64 {
    let bounds = match GeoBounds::from_points(path) {
        Some(bounds) => bounds.padded(ROUTE_FRAME_PADDING),
        None => return ROUTE_MIN_ZOOM,
    };
    // Span floor keeps log2 finite for single-point "routes"
    let max_diff = bounds.lat_span().max(bounds.lng_span()).max(1e-6);
    let zoom = (ROUTE_FRAME_ZOOM_BASE - (max_diff * KM_PER_DEGREE).log2()).round();
    zoom.clamp(ROUTE_MIN_ZOOM, ROUTE_MAX_ZOOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(11.68), 11.5);
        assert_eq!(quantize(11.76), 12.0);
        assert_eq!(quantize(14.0), 14.0);
    }

    #[test]
    fn test_zoom_for_radius_clamped() {
        for radius in [0.0, 1e-9, 0.1, 1.0, 5.0, 50.0, 1e6, f64::INFINITY] {
            let zoom = zoom_for_radius(radius);
            assert!(zoom >= MIN_ZOOM, "zoom {zoom} below MIN for radius {radius}");
            assert!(zoom <= MAX_ZOOM, "zoom {zoom} above MAX for radius {radius}");
        }
    }

    #[test]
    fn test_zoom_for_radius_monotone() {
        let radii = [0.1, 0.5, 1.0, 2.0, 10.0, 100.0];
        let zooms: Vec<f64> = radii.iter().map(|r| zoom_for_radius(*r)).collect();
        for pair in zooms.windows(2) {
            assert!(pair[1] <= pair[0], "zoom must not increase with radius");
        }
    }

    #[test]
    fn test_zoom_for_radius_known_value() {
        // 14 - log2(1 * 2) = 13
        assert_eq!(zoom_for_radius(1.0), 13.0);
        // 14 - log2(8 * 2) = 10
        assert_eq!(zoom_for_radius(8.0), 10.0);
    }

    #[test]
    fn test_zoom_for_route_bounds_scenario() {
        // Route spanning 1 degree of latitude and 0.5 of longitude: after 10%
        // padding maxDiff is 1.1 degrees, and
        // round(14 - log2(1.1 * 111)) = round(7.07) = 7, clamped up to 11.
        let path = vec![GeoPoint::new(40.0, 10.0), GeoPoint::new(41.0, 10.5)];
        assert_eq!(zoom_for_route_bounds(&path), 11.0);
    }

    #[test]
    fn test_zoom_for_route_bounds_short_route() {
        // ~0.002 degrees of span frames close to the upper bound
        let path = vec![GeoPoint::new(40.0, 10.0), GeoPoint::new(40.002, 10.001)];
        let zoom = zoom_for_route_bounds(&path);
        assert!(zoom >= ROUTE_MIN_ZOOM && zoom <= ROUTE_MAX_ZOOM);
        assert_eq!(zoom, ROUTE_MAX_ZOOM);
    }

    #[test]
    fn test_zoom_for_route_bounds_degenerate() {
        assert_eq!(zoom_for_route_bounds(&[]), ROUTE_MIN_ZOOM);
        // A single point must not panic or produce a non-finite zoom
        let zoom = zoom_for_route_bounds(&[GeoPoint::new(40.0, 10.0)]);
        assert!(zoom.is_finite());
        assert_eq!(zoom, ROUTE_MAX_ZOOM);
    }
}
