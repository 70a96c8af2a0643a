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


//! Map composition: base tiles, site overlay, initial view and controls.
//!
//! [`setup`] is the single linear construction pass from catalog to
//! finished map description. It holds no global state; every call
//! returns its own [`MapComposition`] which the map engine then displays.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::SiteCatalog;
use crate::marker::MarkerFactory;
use crate::overlay::{Extent, OverlayLayer, SkippedSite};
use crate::projection::{Projector, HALF_SIZE, TILE_SIZE};

/// Mount point name used when none is configured.
pub const DEFAULT_TARGET: &str = "map_canvas";

/// Highest zoom level the view will pick when fitting markers.
pub const MAX_FIT_ZOOM: u8 = 18;

/// Raster tile providers the base layer can draw from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileSourceKind {
    #[default]
    OpenStreetMap,
    CartoDark,
}

impl TileSourceKind {
    /// Short stable identifier, also used as the layer name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "osm",
            Self::CartoDark => "carto-dark",
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "OpenStreetMap",
            Self::CartoDark => "CARTO Dark",
        }
    }
}

impl std::str::FromStr for TileSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "osm" | "openstreetmap" => Ok(Self::OpenStreetMap),
            "carto" | "carto-dark" | "dark" => Ok(Self::CartoDark),
            other => Err(format!("unknown tile source '{other}'")),
        }
    }
}

/// Role a layer plays in the layer stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRole {
    Base,
    Overlay,
}

/// Tile-backed background layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub source: TileSourceKind,
    pub name: String,
    pub title: String,
    pub role: LayerRole,
}

impl TileLayer {
    /// Base layer for the given tile provider.
    #[must_use]
    pub fn base(source: TileSourceKind) -> Self {
        Self {
            source,
            name: source.as_str().to_string(),
            title: source.display_name().to_string(),
            role: LayerRole::Base,
        }
    }

    /// OpenStreetMap base layer named `osm`.
    #[must_use]
    pub fn osm() -> Self {
        Self::base(TileSourceKind::OpenStreetMap)
    }
}

/// One entry of the ordered layer stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    Tile(TileLayer),
    Vector(OverlayLayer),
}

/// Initial camera: centre in degrees and integer zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub center_lon: f64,
    pub center_lat: f64,
    pub zoom: u8,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            center_lon: 5.0,
            center_lat: 0.0,
            zoom: 7,
        }
    }
}

impl ViewState {
    /// Centre on `extent` at the deepest zoom that still shows all of it in
    /// a `width` x `height` pixel viewport.
    #[must_use]
    pub fn fit<P: Projector>(extent: &Extent, projector: &P, width: f64, height: f64) -> Self {
        let (center_lon, center_lat) = projector.unproject(extent.center());

        // Metres per pixel needed on each axis, against zoom 0 world resolution.
        let world_res = 2.0 * HALF_SIZE / TILE_SIZE;
        let needed = (extent.width() / width.max(1.0)).max(extent.height() / height.max(1.0));

        let zoom = if needed > 0.0 {
            (world_res / needed).log2().floor().clamp(0.0, f64::from(MAX_FIT_ZOOM))
        } else {
            f64::from(MAX_FIT_ZOOM)
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "clamped to 0..=MAX_FIT_ZOOM")]
        let zoom = zoom as u8;

        Self {
            center_lon,
            center_lat,
            zoom,
        }
    }
}

/// Distance units shown by the scale line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleUnits {
    #[default]
    Metric,
    Imperial,
    Nautical,
}

impl std::str::FromStr for ScaleUnits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" => Ok(Self::Metric),
            "imperial" | "us" => Ok(Self::Imperial),
            "nautical" => Ok(Self::Nautical),
            other => Err(format!("unknown scale units '{other}'")),
        }
    }
}

/// Interaction controls mounted on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum MapControl {
    Zoom,
    Rotate,
    ScaleLine { units: ScaleUnits },
}

impl fmt::Display for MapControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zoom => write!(f, "zoom"),
            Self::Rotate => write!(f, "rotate"),
            Self::ScaleLine { units } => write!(f, "scale line ({units:?})"),
        }
    }
}

/// Zoom, rotate and a metric scale line.
#[must_use]
pub fn default_controls() -> Vec<MapControl> {
    vec![
        MapControl::Zoom,
        MapControl::Rotate,
        MapControl::ScaleLine {
            units: ScaleUnits::Metric,
        },
    ]
}

/// Finished map description handed to the rendering engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapComposition {
    target: String,
    layers: Vec<Layer>,
    view: ViewState,
    controls: Vec<MapControl>,
    load_tiles_while_animating: bool,
    load_tiles_while_interacting: bool,
}

impl MapComposition {
    /// Stack `base` below `overlay`; the overlay always renders on top.
    pub fn compose(
        target: impl Into<String>,
        base: TileLayer,
        overlay: OverlayLayer,
        view: ViewState,
        controls: Vec<MapControl>,
    ) -> Self {
        Self {
            target: target.into(),
            layers: vec![Layer::Tile(base), Layer::Vector(overlay)],
            view,
            controls,
            load_tiles_while_animating: true,
            load_tiles_while_interacting: true,
        }
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    #[must_use]
    pub fn controls(&self) -> &[MapControl] {
        &self.controls
    }

    #[must_use]
    pub fn load_tiles_while_animating(&self) -> bool {
        self.load_tiles_while_animating
    }

    #[must_use]
    pub fn load_tiles_while_interacting(&self) -> bool {
        self.load_tiles_while_interacting
    }

    /// First tile layer in the stack.
    #[must_use]
    pub fn base_layer(&self) -> Option<&TileLayer> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Tile(tile) => Some(tile),
            Layer::Vector(_) => None,
        })
    }

    /// The site overlay.
    #[must_use]
    pub fn overlay(&self) -> Option<&OverlayLayer> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Vector(overlay) => Some(overlay),
            Layer::Tile(_) => None,
        })
    }

    #[must_use]
    pub fn has_control(&self, control: MapControl) -> bool {
        self.controls.contains(&control)
    }
}

/// Knobs for [`setup`].
#[derive(Debug, Clone)]
pub struct MapOptions {
    pub target: String,
    pub base: TileLayer,
    pub view: ViewState,
    /// Replace `view` with one that frames every marker.
    pub fit_to_markers: bool,
    /// Viewport size in pixels, used when fitting.
    pub viewport: (f64, f64),
    pub controls: Vec<MapControl>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            base: TileLayer::osm(),
            view: ViewState::default(),
            fit_to_markers: false,
            viewport: (1400.0, 800.0),
            controls: default_controls(),
        }
    }
}

/// Output of [`setup`]: the map plus any sites that could not be placed.
#[derive(Debug)]
pub struct MapSetup {
    pub map: MapComposition,
    pub skipped: Vec<SkippedSite>,
}

/// Build the complete map in one pass: catalog, markers, overlay, map.
pub fn setup<P: Projector>(catalog: &SiteCatalog, factory: &MarkerFactory<P>, options: MapOptions) -> MapSetup {
    let build = OverlayLayer::build(catalog, factory);

    let view = match build.layer.extent() {
        Some(extent) if options.fit_to_markers => {
            let (width, height) = options.viewport;
            ViewState::fit(&extent, factory.projector(), width, height)
        }
        _ => options.view,
    };

    let map = MapComposition::compose(options.target, options.base, build.layer, view, options.controls);

    MapSetup {
        map,
        skipped: build.skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Site;
    use crate::projection::WebMercator;

    fn sample_setup(options: MapOptions) -> MapSetup {
        setup(&SiteCatalog::sample(), &MarkerFactory::new(WebMercator), options)
    }

    #[test]
    fn test_base_layer_comes_before_overlay() {
        let setup = sample_setup(MapOptions::default());
        let layers = setup.map.layers();
        assert_eq!(layers.len(), 2);
        assert!(matches!(&layers[0], Layer::Tile(t) if t.role == LayerRole::Base));
        assert!(matches!(&layers[1], Layer::Vector(_)));
    }

    #[test]
    fn test_osm_base_layer_fields() {
        let base = TileLayer::osm();
        assert_eq!(base.name, "osm");
        assert_eq!(base.title, "OpenStreetMap");
        assert_eq!(base.role, LayerRole::Base);
        assert_eq!(base.source, TileSourceKind::OpenStreetMap);
    }

    #[test]
    fn test_default_view_and_controls() {
        let setup = sample_setup(MapOptions::default());
        let map = &setup.map;
        assert_eq!(map.target(), "map_canvas");
        assert_eq!(map.view(), ViewState { center_lon: 5.0, center_lat: 0.0, zoom: 7 });
        assert!(map.has_control(MapControl::Zoom));
        assert!(map.has_control(MapControl::Rotate));
        assert!(map.has_control(MapControl::ScaleLine { units: ScaleUnits::Metric }));
        assert!(map.load_tiles_while_animating());
        assert!(map.load_tiles_while_interacting());
    }

    #[test]
    fn test_setup_overlay_has_all_sample_markers() {
        let setup = sample_setup(MapOptions::default());
        assert_eq!(setup.map.overlay().map(OverlayLayer::len), Some(16));
        assert!(setup.skipped.is_empty());
    }

    #[test]
    fn test_setup_is_independent_per_call() {
        let first = sample_setup(MapOptions::default());
        let second = setup(&SiteCatalog::new(), &MarkerFactory::new(WebMercator), MapOptions::default());
        assert_eq!(first.map.overlay().map(OverlayLayer::len), Some(16));
        assert_eq!(second.map.overlay().map(OverlayLayer::len), Some(0));
    }

    #[test]
    fn test_fit_to_markers_centres_on_houston() {
        let setup = sample_setup(MapOptions {
            fit_to_markers: true,
            ..MapOptions::default()
        });
        let view = setup.map.view();
        assert!(view.center_lon < -94.0 && view.center_lon > -96.0);
        assert!(view.center_lat > 28.0 && view.center_lat < 31.0);
        assert!(view.zoom >= 7 && view.zoom <= 10);
    }

    #[test]
    fn test_fit_single_point_uses_max_zoom() {
        let catalog: SiteCatalog = std::iter::once(Site::new(1, 10.0, 10.0, "a")).collect();
        let setup = setup(
            &catalog,
            &MarkerFactory::new(WebMercator),
            MapOptions {
                fit_to_markers: true,
                ..MapOptions::default()
            },
        );
        assert_eq!(setup.map.view().zoom, MAX_FIT_ZOOM);
    }

    #[test]
    fn test_fit_ignored_for_empty_overlay() {
        let setup = setup(
            &SiteCatalog::new(),
            &MarkerFactory::new(WebMercator),
            MapOptions {
                fit_to_markers: true,
                ..MapOptions::default()
            },
        );
        assert_eq!(setup.map.view(), ViewState::default());
    }

    #[test]
    fn test_tile_source_parsing() {
        assert_eq!("osm".parse::<TileSourceKind>(), Ok(TileSourceKind::OpenStreetMap));
        assert_eq!("carto-dark".parse::<TileSourceKind>(), Ok(TileSourceKind::CartoDark));
        assert!("bing".parse::<TileSourceKind>().is_err());
    }
}
