//! Marker style resolution and cluster explosion.
//!
//! Everything here is a pure function of (cluster, zoom, selection) and is
//! recomputed on every render pass; nothing is persisted. A cluster renders
//! either as one aggregate marker or, above the explosion threshold, as
//! spiral-offset sub-markers, one per post.

use crate::core::constants::{
    EXPLODE_ZOOM, SPIRAL_ANGLE_STEP_DEG, SPIRAL_RADIUS_FACTOR,
};
use crate::core::geo::{GeoPoint, Point};
use crate::spatial::clustering::{Cluster, Post};

/// Marker color, keyed on cluster size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
}

impl MarkerColor {
    /// Size-to-color map, ascending thresholds, first match wins:
    /// 1 blue, 2-3 green, 4-5 yellow, 6-10 orange, above that purple.
    pub fn for_cluster_size(size: usize) -> Self {
        match size {
            0..=1 => Self::Blue,
            2..=3 => Self::Green,
            4..=5 => Self::Yellow,
            6..=10 => Self::Orange,
            _ => Self::Purple,
        }
    }

    /// CSS hex string for the host renderer.
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Blue => "#4a90d9",
            Self::Green => "#2ecc71",
            Self::Yellow => "#f1c40f",
            Self::Orange => "#e67e22",
            Self::Purple => "#9b59b6",
        }
    }
}

/// Base marker size in pixels, stepped on the same breakpoints as the color.
pub fn base_size_px(cluster_size: usize) -> u32 {
    match cluster_size {
        0..=1 => 12,
        2..=3 => 14,
        4..=5 => 16,
        6..=10 => 18,
        _ => 20,
    }
}

/// Zoom scaling factor applied to the base size.
pub fn zoom_factor(zoom: f64) -> f64 {
    ((zoom - 8.0) / 10.0).clamp(0.5, 1.5)
}

/// Rendered marker size: base size scaled by the zoom factor.
pub fn scaled_size_px(cluster_size: usize, zoom: f64) -> u32 {
    let base = base_size_px(cluster_size) as f64;
    (base * (0.8 + zoom_factor(zoom) * 0.5)).round() as u32
}

/// Pixel offset from the cluster center for the sub-marker at `index` when a
/// cluster is exploded. Index 0 sits at the center; the rest fan out at 60
/// degree steps.
pub fn spiral_offset(index: usize, marker_size_px: u32) -> Point {
    if index == 0 {
        return Point::default();
    }
    let angle = (index as f64 * SPIRAL_ANGLE_STEP_DEG).to_radians();
    let distance = SPIRAL_RADIUS_FACTOR * marker_size_px as f64;
    Point::new(angle.cos() * distance, angle.sin() * distance)
}

/// Stacking order: smaller clusters above larger ones, selected markers above
/// everything.
pub fn z_index(cluster_size: usize, selected: bool) -> i32 {
    let base = 1000 - cluster_size as i32;
    if selected {
        base + 1000
    } else {
        base
    }
}

/// Derived visual state for one marker in one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerVisualState {
    pub color: MarkerColor,
    pub size_px: u32,
    /// Pixel offset from the cluster center (spiral placement when exploded).
    pub offset: Point,
    pub z_index: i32,
}

/// What a marker press/long-press hands to the UI: a single post for
/// unclustered or exploded markers, the whole member list for an aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerPayload<T> {
    Single(Post<T>),
    Group(Vec<Post<T>>),
}

/// One marker ready for the host map layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMarker<T> {
    /// Geographic anchor (cluster center).
    pub position: GeoPoint,
    pub style: MarkerVisualState,
    pub payload: MarkerPayload<T>,
}

/// A multi-post cluster explodes into sub-markers past the zoom threshold, or
/// as soon as it contains the selected post.
pub fn should_explode<T>(cluster: &Cluster<T>, zoom: f64, selected: Option<&str>) -> bool {
    cluster.len() > 1
        && (zoom > EXPLODE_ZOOM || selected.is_some_and(|id| cluster.contains(id)))
}

/// Resolves every cluster to its rendered markers for the current zoom and
/// selection.
pub fn render_clusters<T: Clone>(
    clusters: &[Cluster<T>],
    zoom: f64,
    selected: Option<&str>,
) -> Vec<RenderedMarker<T>> {
    let mut markers = Vec::with_capacity(clusters.len());

    for cluster in clusters {
        if should_explode(cluster, zoom, selected) {
            let center = cluster.center();
            let size_px = scaled_size_px(1, zoom);
            for (index, post) in cluster.posts.iter().enumerate() {
                let is_selected = selected == Some(post.id.as_str());
                markers.push(RenderedMarker {
                    position: center,
                    style: MarkerVisualState {
                        color: MarkerColor::for_cluster_size(1),
                        size_px,
                        offset: spiral_offset(index, size_px),
                        z_index: z_index(1, is_selected),
                    },
                    payload: MarkerPayload::Single(post.clone()),
                });
            }
        } else {
            let size = cluster.len();
            let is_selected = selected.is_some_and(|id| cluster.contains(id));
            let payload = if cluster.is_single() {
                MarkerPayload::Single(cluster.posts[0].clone())
            } else {
                MarkerPayload::Group(cluster.posts.clone())
            };
            markers.push(RenderedMarker {
                position: cluster.center(),
                style: MarkerVisualState {
                    color: MarkerColor::for_cluster_size(size),
                    size_px: scaled_size_px(size, zoom),
                    offset: Point::default(),
                    z_index: z_index(size, is_selected),
                },
                payload,
            });
        }
    }

    markers
}
