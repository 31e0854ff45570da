//! Read-only feature database.
//!
//! The store is an ordered sequence of [`Feature`]s, loaded once from a JSON
//! file at process start and never mutated afterwards. Because it is
//! immutable for the process lifetime, the service shares it across all
//! concurrent calls behind an `Arc` without any locking.
//!
//! A point with no matching feature is a lookup miss, not an error; the
//! handlers decide how to represent that on the wire.

use routeguide_tonic_core::proto::{Feature, Point};
use routeguide_tonic_core::{Error, Result, geo};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// On-disk representation of a feature location.
#[derive(Deserialize)]
struct RawLocation {
    latitude: i32,
    longitude: i32,
}

/// On-disk representation of a feature database entry.
#[derive(Deserialize)]
struct RawFeature {
    name: String,
    location: RawLocation,
}

/// Ordered, immutable collection of named point features.
pub struct FeatureStore {
    features: Vec<Feature>,
}

impl FeatureStore {
    /// Loads the feature database from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseLoad`] if the file cannot be read or parsed.
    /// This is a startup error; it is never surfaced on a per-call basis.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| Error::DatabaseLoad {
            context: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_json(&data)
    }

    /// Parses a feature database from its JSON representation: an array of
    /// `{"name": ..., "location": {"latitude": ..., "longitude": ...}}`
    /// entries. Entry order is preserved.
    pub fn from_json(data: &str) -> Result<Self> {
        let raw: Vec<RawFeature> = serde_json::from_str(data).map_err(|e| Error::DatabaseLoad {
            context: format!("malformed feature database: {e}"),
        })?;

        let features = raw
            .into_iter()
            .map(|f| Feature {
                name: f.name,
                location: Some(Point {
                    latitude: f.location.latitude,
                    longitude: f.location.longitude,
                }),
            })
            .collect();

        Ok(Self::from_features(features))
    }

    /// Builds a store directly from features, preserving their order.
    pub fn from_features(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Returns the first feature located exactly at `point`, if any.
    ///
    /// Linear scan in store order; duplicate locations in the source data are
    /// tolerated and the earliest entry wins.
    pub fn lookup(&self, point: &Point) -> Option<&Feature> {
        self.features.iter().find(|feature| {
            feature
                .location
                .as_ref()
                .is_some_and(|location| geo::points_equal(location, point))
        })
    }

    /// All features, in load order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
