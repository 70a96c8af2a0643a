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

//! Error type shared by every layer of the overlay model.

use thiserror::Error;

/// Errors produced while loading sites or building markers.
///
/// An empty catalog is deliberately not represented here: it yields an
/// empty overlay, see [`crate::overlay::OverlayBuild::is_catalog_empty`].
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("coordinate out of range: longitude {longitude}, latitude {latitude}")]
    InvalidCoordinate { longitude: f64, latitude: f64 },

    #[error("catalog row {row}: {message}")]
    Catalog { row: u64, message: String },

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl OverlayError {
    /// Whether this error came from the projector rejecting a coordinate.
    #[must_use]
    pub fn is_invalid_coordinate(&self) -> bool {
        matches!(self, Self::InvalidCoordinate { .. })
    }
}
