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


//! Site catalog: the table of labeled locations to plot.
//!
//! Sites keep the order they were defined or loaded in. Ids are not
//! required to be unique and no deduplication happens here.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// A single geographically located, owner-labeled site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    pub owner: String,
}

impl Site {
    pub fn new(id: i64, latitude: f64, longitude: f64, owner: impl Into<String>) -> Self {
        Self {
            id,
            latitude,
            longitude,
            owner: owner.into(),
        }
    }
}

/// Reference site table: (id, latitude, longitude, owner).
const SAMPLE_SITES: [(i64, f64, f64, &str); 16] = [
    (2162, 29.155_161_224_973_3, -95.017_321_709_262_1, "dbaker"),
    (2512, 29.733_251_540_917_3, -95.434_438_660_049_4, "jsulak"),
    (4205, 29.755_938_469_611_6, -95.411_956_555_603, "dbaker"),
    (5993, 29.733_097_068_812_8, -95.434_577_465_057_4, "karl"),
    (7151, 29.781_319_294_809, -95.638_858_079_910_3, "karl"),
    (7187, 30.355_630_754_562_3, -95.264_279_842_376_7, "karl"),
    (13370, 29.751_111_144_549_7, -95.398_013_177_871_7, "nugget"),
    (14213, 29.806_181_435_702_3, -95.561_736_676_334_7, "cbw"),
    (14408, 29.733_037_910_127_7, -95.434_426_546_096_7, "dbaker"),
    (20170, 29.750_232_6, -95.382_848, "ericcarlson"),
    (24294, 29.702, -95.526, "lkowolowksi"),
    (25611, 29.733_032, -95.4344, "ericcarlson"),
    (27732, 29.733_151_504_100_2, -95.434_611_642_837_5, "lkowolowksi"),
    (27840, 29.753_412_968_007_7, -95.619_836_091_995_2, "michael179"),
    (28243, 29.733_032, -95.4344, "ericcarlson"),
    (30139, 28.805_038, -95.658_935, "ashleyguinard"),
];

/// Ordered, read-only collection of sites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteCatalog {
    sites: Vec<Site>,
}

impl SiteCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in 16-site table, in ascending id order.
    #[must_use]
    pub fn sample() -> Self {
        SAMPLE_SITES
            .iter()
            .map(|&(id, lat, lon, owner)| Site::new(id, lat, lon, owner))
            .collect()
    }

    /// Load sites from CSV with an `id,latitude,longitude,owner` header.
    ///
    /// Coordinates are not range checked here; the projector rejects bad
    /// ones when markers are built.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, OverlayError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut catalog = Self::new();
        for result in csv_reader.deserialize::<Site>() {
            let site = result.map_err(|e| OverlayError::Catalog {
                row: e.position().map_or(0, csv::Position::line),
                message: e.to_string(),
            })?;
            catalog.push(site);
        }

        debug!("Loaded {} sites from CSV", catalog.len());
        Ok(catalog)
    }

    /// Load sites from a CSV file on disk.
    pub fn from_csv_path(path: &Path) -> Result<Self, OverlayError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Append a site; used while loading, never at render time.
    pub fn push(&mut self, site: Site) {
        self.sites.push(site);
    }

    /// Sites in definition order.
    #[must_use]
    pub fn entries(&self) -> &[Site] {
        &self.sites
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl FromIterator<Site> for SiteCatalog {
    fn from_iter<I: IntoIterator<Item = Site>>(iter: I) -> Self {
        Self {
            sites: iter.into_iter().collect(),
        }
    }
}
