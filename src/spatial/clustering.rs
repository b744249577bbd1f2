//! Proximity clustering of posts, with bucket size adapted to zoom.
//!
//! Posts are grouped by a derived `BucketKey`: latitude and longitude divided
//! by the current threshold and rounded. Clusters are recomputed from scratch
//! on every call; nothing here is persisted or incrementally updated.

use crate::core::constants::{BASE_BUCKET_THRESHOLD, BUCKET_NEUTRAL_ZOOM};
use crate::core::geo::GeoPoint;
use crate::prelude::HashMap;

/// A location-tagged post. The payload carries display data (image, caption)
/// that is irrelevant to clustering; posts are supplied externally and this
/// module does not own their lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Post<T> {
    pub id: String,
    pub location: GeoPoint,
    pub place_name: String,
    pub payload: T,
}

impl<T> Post<T> {
    pub fn new(
        id: impl Into<String>,
        location: GeoPoint,
        place_name: impl Into<String>,
        payload: T,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            place_name: place_name.into(),
            payload,
        }
    }
}

/// Grid cell key derived from a location and the current bucket threshold.
/// A computation artifact, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketKey(pub i64, pub i64);

impl BucketKey {
    pub fn for_location(location: &GeoPoint, threshold: f64) -> Self {
        Self(
            (location.lat / threshold).round() as i64,
            (location.lng / threshold).round() as i64,
        )
    }
}

/// Computes the bucket threshold in degrees for a zoom level. Higher zoom
/// shrinks the threshold (finer clusters); the clamp prevents degenerate
/// thresholds at extreme zoom.
pub fn bucket_threshold(zoom: f64) -> f64 {
    let adjustment = (zoom / BUCKET_NEUTRAL_ZOOM).clamp(0.5, 2.0);
    BASE_BUCKET_THRESHOLD / adjustment
}

/// A non-empty group of posts sharing a bucket. Size 1 is the common case at
/// high zoom, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster<T> {
    pub key: BucketKey,
    pub posts: Vec<Post<T>>,
}

impl<T> Cluster<T> {
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.posts.len() == 1
    }

    /// Mean coordinate of the member posts.
    pub fn center(&self) -> GeoPoint {
        let n = self.posts.len() as f64;
        let (lat, lng) = self
            .posts
            .iter()
            .fold((0.0, 0.0), |(lat, lng), post| {
                (lat + post.location.lat, lng + post.location.lng)
            });
        GeoPoint::new(lat / n, lng / n)
    }

    pub fn contains(&self, post_id: &str) -> bool {
        self.posts.iter().any(|post| post.id == post_id)
    }
}

/// Buckets posts into clusters for the given zoom level.
///
/// Clusters come out in first-seen bucket order, so identical input yields
/// identical output: required for stable marker identity across re-renders.
/// Every post with finite coordinates lands in exactly one cluster; posts
/// with non-finite coordinates are dropped and logged.
pub fn group_posts<T: Clone>(posts: &[Post<T>], zoom: f64) -> Vec<Cluster<T>> {
    let threshold = bucket_threshold(zoom);
    let mut clusters: Vec<Cluster<T>> = Vec::new();
    let mut index: HashMap<BucketKey, usize> = HashMap::default();

    for post in posts {
        if !post.location.lat.is_finite() || !post.location.lng.is_finite() {
            log::warn!("dropping post {} with non-finite coordinates", post.id);
            continue;
        }

        let key = BucketKey::for_location(&post.location, threshold);
        match index.get(&key) {
            Some(&slot) => clusters[slot].posts.push(post.clone()),
            None => {
                index.insert(key, clusters.len());
                clusters.push(Cluster {
                    key,
                    posts: vec![post.clone()],
                });
            }
        }
    }

    clusters
}
