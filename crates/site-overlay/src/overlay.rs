// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Overlay layer: the renderable collection of site markers.
//!
//! A layer is filled once from the catalog and then only read by the
//! renderer. Sites whose coordinates fail to project are skipped and
//! reported; they never stop the rest of the catalog from being drawn.

use log::{info, warn};
use serde::Serialize;

use crate::catalog::SiteCatalog;
use crate::error::OverlayError;
use crate::marker::{MarkerFactory, MarkerFeature};
use crate::projection::{ProjectedPoint, Projector};

/// Default name given to the site overlay.
pub const DEFAULT_OVERLAY_NAME: &str = "sites";

/// Axis-aligned bounds of a set of projected points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    #[must_use]
    pub fn center(&self) -> ProjectedPoint {
        ProjectedPoint::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Ordered, append-only sequence of marker features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLayer {
    name: String,
    features: Vec<MarkerFeature>,
}

impl Default for OverlayLayer {
    fn default() -> Self {
        Self::new(DEFAULT_OVERLAY_NAME)
    }
}

impl OverlayLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: Vec::new(),
        }
    }

    /// Populate a new layer with one marker per site that projects.
    pub fn build<P: Projector>(catalog: &SiteCatalog, factory: &MarkerFactory<P>) -> OverlayBuild {
        let mut layer = Self::default();
        let mut skipped = Vec::new();

        if catalog.is_empty() {
            info!("Site catalog is empty, overlay has no markers");
            return OverlayBuild {
                layer,
                skipped,
                catalog_len: 0,
            };
        }

        for site in catalog.entries() {
            match factory.build(site) {
                Ok(feature) => layer.add_feature(feature),
                Err(error) => {
                    warn!("Skipping site {} ({}): {}", site.id, site.owner, error);
                    skipped.push(SkippedSite {
                        site_id: site.id,
                        error,
                    });
                }
            }
        }

        info!(
            "Built overlay '{}' with {} markers ({} skipped)",
            layer.name,
            layer.len(),
            skipped.len()
        );

        OverlayBuild {
            layer,
            skipped,
            catalog_len: catalog.len(),
        }
    }

    pub fn add_feature(&mut self, feature: MarkerFeature) {
        self.features.push(feature);
    }

    #[must_use]
    pub fn features(&self) -> &[MarkerFeature] {
        &self.features
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Bounds of all marker points, or `None` for an empty layer.
    #[must_use]
    pub fn extent(&self) -> Option<Extent> {
        let mut points = self.features.iter().map(MarkerFeature::point);
        let first = points.next()?;
        let init = Extent {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };

        Some(points.fold(init, |e, p| Extent {
            min_x: e.min_x.min(p.x),
            min_y: e.min_y.min(p.y),
            max_x: e.max_x.max(p.x),
            max_y: e.max_y.max(p.y),
        }))
    }
}

/// A site that produced no marker, with the reason.
#[derive(Debug)]
pub struct SkippedSite {
    pub site_id: i64,
    pub error: OverlayError,
}

/// Result of the single catalog to overlay pass.
#[derive(Debug)]
pub struct OverlayBuild {
    pub layer: OverlayLayer,
    pub skipped: Vec<SkippedSite>,
    catalog_len: usize,
}

impl OverlayBuild {
    /// True when there were no sites to build from at all.
    #[must_use]
    pub fn is_catalog_empty(&self) -> bool {
        self.catalog_len == 0
    }

    #[must_use]
    pub fn catalog_len(&self) -> usize {
        self.catalog_len
    }
}
