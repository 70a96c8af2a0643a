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


//! Projection and marker overlay model for plotting labeled sites on a
//! tiled, pannable map.
//!
//! The crate covers the part of a site map that carries actual decisions:
//!
//! - **Projection**: geographic degrees to EPSG:3857 planar metres
//! - **Catalog**: the ordered table of sites to plot
//! - **Markers**: one styled point feature per site
//! - **Overlay**: the renderable marker layer, built once
//! - **Composition**: base tiles, overlay, initial view and controls
//!
//! Tile fetching, gestures and drawing belong to whatever map engine
//! displays the resulting [`MapComposition`].
//!
//! # Quick Start
//!
//! ```
//! use site_overlay::{setup, MapOptions, MarkerFactory, SiteCatalog, WebMercator};
//!
//! let catalog = SiteCatalog::sample();
//! let factory = MarkerFactory::new(WebMercator);
//! let result = setup(&catalog, &factory, MapOptions::default());
//!
//! let overlay = result.map.overlay().unwrap();
//! assert_eq!(overlay.len(), 16);
//! assert_eq!(overlay.features()[0].style().label_text, "2162: dbaker");
//! ```

pub mod catalog;
pub mod composition;
pub mod error;
pub mod marker;
pub mod overlay;
pub mod projection;
pub mod style;

pub use catalog::{Site, SiteCatalog};
pub use composition::{
    default_controls, setup, Layer, LayerRole, MapComposition, MapControl, MapOptions, MapSetup,
    ScaleUnits, TileLayer, TileSourceKind, ViewState,
};
pub use error::OverlayError;
pub use marker::{MarkerFactory, MarkerFeature};
pub use overlay::{Extent, OverlayBuild, OverlayLayer, SkippedSite};
pub use projection::{resolution_at, ProjectedPoint, Projector, WebMercator};
pub use style::{Color, MarkerStyle, StyleOverrides};
