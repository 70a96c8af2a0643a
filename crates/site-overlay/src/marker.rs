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


//! Marker factory: turns a [`Site`] into a styled point feature.

use serde::Serialize;

use crate::catalog::Site;
use crate::error::OverlayError;
use crate::projection::{ProjectedPoint, Projector, WebMercator};
use crate::style::{MarkerStyle, StyleOverrides};

/// A projected, styled point for one site.
///
/// Features are immutable once built; a changed catalog means building
/// a new overlay rather than patching existing markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerFeature {
    point: ProjectedPoint,
    style: MarkerStyle,
    source_site_id: i64,
}

impl MarkerFeature {
    #[must_use]
    pub fn point(&self) -> ProjectedPoint {
        self.point
    }

    #[must_use]
    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    #[must_use]
    pub fn source_site_id(&self) -> i64 {
        self.source_site_id
    }
}

/// Builds marker features using a projector and optional colour overrides.
#[derive(Debug, Clone, Default)]
pub struct MarkerFactory<P = WebMercator> {
    projector: P,
    overrides: StyleOverrides,
}

impl<P: Projector> MarkerFactory<P> {
    pub fn new(projector: P) -> Self {
        Self {
            projector,
            overrides: StyleOverrides::default(),
        }
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: StyleOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn projector(&self) -> &P {
        &self.projector
    }

    /// Project the site and attach its style.
    ///
    /// Fails only when the projector rejects the coordinate, in which case
    /// no feature exists for the site.
    pub fn build(&self, site: &Site) -> Result<MarkerFeature, OverlayError> {
        let point = self.projector.project(site.longitude, site.latitude)?;
        let style = MarkerStyle::for_site(site).with_overrides(&self.overrides);

        Ok(MarkerFeature {
            point,
            style,
            source_site_id: site.id,
        })
    }
}
