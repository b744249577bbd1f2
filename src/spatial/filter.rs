//! Radius filtering of posts around the viewer.

use crate::core::geo::GeoPoint;
use crate::spatial::clustering::Post;

/// Restricts a post set to those within a configurable radius of the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusFilter {
    pub enabled: bool,
    pub radius_km: f64,
}

impl RadiusFilter {
    pub fn new(radius_km: f64) -> Self {
        Self {
            enabled: true,
            radius_km,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            radius_km: 0.0,
        }
    }

    /// Filters posts to those within `radius_km` of the viewer, preserving
    /// input order. When filtering is disabled or the viewer location is
    /// unknown the input is returned unchanged. Idempotent at a fixed radius.
    ///
    /// A post with NaN coordinates never satisfies the distance comparison
    /// and is dropped, which matches the degrade-to-show-less error model.
    pub fn filter<T: Clone>(&self, posts: &[Post<T>], viewer: Option<GeoPoint>) -> Vec<Post<T>> {
        let viewer = match (self.enabled, viewer) {
            (true, Some(viewer)) => viewer,
            _ => return posts.to_vec(),
        };

        posts
            .iter()
            .filter(|post| viewer.distance_to(&post.location) <= self.radius_km)
            .cloned()
            .collect()
    }
}

impl Default for RadiusFilter {
    fn default() -> Self {
        Self::new(10.0)
    }
}
