// Copyright 2025 eraflo
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

use crate::math::Vec2;
use std::fmt;

/// The built-in 15 x 11 map. `1` is a wall, `0` is free floor.
pub const DEFAULT_MAP: [[u8; 15]; 11] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// An error describing why a tile map was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// The map has no rows or its first row has no columns.
    Empty,
    /// A row does not have the same length as the first one.
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Expected number of columns.
        expected: usize,
        /// Actual number of columns.
        found: usize,
    },
    /// The tile size is not a finite, strictly positive number.
    InvalidTileSize(f32),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Empty => write!(f, "Map must have at least one row and one column"),
            MapError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "Map row {row} has {found} columns, expected {expected}"
            ),
            MapError::InvalidTileSize(size) => {
                write!(f, "Tile size must be a positive number, got {size}")
            }
        }
    }
}

impl std::error::Error for MapError {}

/// A rectangular tile map, measured in pixels through its tile size.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    tiles: Vec<u8>,
    rows: usize,
    cols: usize,
    tile_size: f32,
}

impl Grid {
    /// Builds a grid from row-major tile data.
    ///
    /// # Errors
    /// Returns a [`MapError`] if the map is empty, ragged, or the tile size is invalid.
    pub fn new(rows: &[Vec<u8>], tile_size: f32) -> Result<Self, MapError> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(MapError::InvalidTileSize(tile_size));
        }
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(MapError::Empty);
        }
        let mut tiles = Vec::with_capacity(rows.len() * cols);
        for (row, data) in rows.iter().enumerate() {
            if data.len() != cols {
                return Err(MapError::RaggedRow {
                    row,
                    expected: cols,
                    found: data.len(),
                });
            }
            tiles.extend_from_slice(data);
        }
        Ok(Self {
            tiles,
            rows: rows.len(),
            cols,
            tile_size,
        })
    }

    /// Builds the built-in map with the given tile size.
    ///
    /// # Errors
    /// Returns [`MapError::InvalidTileSize`] for a non-positive tile size.
    pub fn default_map(tile_size: f32) -> Result<Self, MapError> {
        let rows: Vec<Vec<u8>> = DEFAULT_MAP.iter().map(|r| r.to_vec()).collect();
        Self::new(&rows, tile_size)
    }

    /// Number of tile rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of tile columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Side length of one tile in pixels.
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Map width in pixels.
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.tile_size
    }

    /// Map height in pixels.
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Pixel position of the center of the map.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width() / 2.0, self.height() / 2.0)
    }

    /// Returns the tile value at `(row, col)`, or `None` outside the map.
    pub fn tile(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.rows && col < self.cols {
            Some(self.tiles[row * self.cols + col])
        } else {
            None
        }
    }

    /// Returns `true` if `position` lies inside the map, far edges included.
    pub fn is_in_bounds(&self, position: Vec2) -> bool {
        position.x >= 0.0
            && position.x <= self.width()
            && position.y >= 0.0
            && position.y <= self.height()
    }

    /// Returns `true` if a wall occupies the pixel `position`.
    ///
    /// Anything outside the map counts as wall, including the far edges where
    /// the tile index would be one past the last row or column.
    pub fn has_wall_at(&self, position: Vec2) -> bool {
        if !self.is_in_bounds(position) {
            return true;
        }
        let col = (position.x / self.tile_size).floor() as usize;
        let row = (position.y / self.tile_size).floor() as usize;
        self.tile(row, col).is_none_or(|t| t != 0)
    }
}
