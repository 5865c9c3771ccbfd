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

//! Engine configuration.
//!
//! Every section deserializes with defaults, so a configuration file only
//! needs to name the values it changes. Defaults reproduce the classic
//! 15 x 11 map with 60 pixel tiles in a 900 x 660 borderless window.

use crate::math::{degrees_to_radians, Vec2};
use crate::platform::WindowPosition;
use crate::world::{Grid, MapError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The complete configuration of a raycaster run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window creation settings.
    pub window: WindowConfig,
    /// Map and projection settings.
    pub world: WorldConfig,
    /// Player movement settings.
    pub player: PlayerConfig,
    /// Drawing settings.
    pub render: RenderConfig,
}

/// Settings for the window created during bootstrap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Inner width in logical pixels. Also the width of the rendered frame.
    pub width: u32,
    /// Inner height in logical pixels. Also the height of the rendered frame.
    pub height: u32,
    /// Create the window without decorations.
    pub borderless: bool,
    /// Initial placement of the window.
    pub position: WindowPosition,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Pikuma Raycasting".to_string(),
            width: 900,
            height: 660,
            borderless: true,
            position: WindowPosition::Centered,
        }
    }
}

/// Settings for the tile map and the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of one tile in map pixels.
    pub tile_size: f32,
    /// Horizontal field of view in degrees.
    pub fov_degrees: f32,
    /// Custom row-major tile map. The built-in map is used when absent.
    pub map: Option<Vec<Vec<u8>>>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: 60.0,
            fov_degrees: 60.0,
            map: None,
        }
    }
}

impl WorldConfig {
    /// Returns the field of view in radians.
    pub fn fov(&self) -> f32 {
        degrees_to_radians(self.fov_degrees)
    }

    /// Builds the grid described by this configuration.
    ///
    /// # Errors
    /// Returns a [`MapError`] if the custom map or the tile size is invalid.
    pub fn build_grid(&self) -> Result<Grid, MapError> {
        match &self.map {
            Some(rows) => Grid::new(rows, self.tile_size),
            None => Grid::default_map(self.tile_size),
        }
    }
}

/// Settings for the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Pixels moved per update for a unit movement offset.
    pub move_speed: f32,
    /// Radians turned per unit of horizontal mouse motion.
    pub rotation_speed: f32,
    /// Minimap radius of the player marker, in map pixels.
    pub radius: f32,
    /// Initial view direction in degrees (90 looks down the map).
    pub angle_degrees: f32,
    /// Spawn position in map pixels. Defaults to the map center.
    pub spawn: Option<[f32; 2]>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            rotation_speed: 0.01,
            radius: 5.0,
            angle_degrees: 90.0,
            spawn: None,
        }
    }
}

/// Settings for the software renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width in frame pixels of the wall strip produced by one ray.
    pub ray_width: u32,
    /// Draw the minimap overlay.
    pub minimap: bool,
    /// Scale of the minimap relative to map pixels.
    pub minimap_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ray_width: 1,
            minimap: true,
            minimap_scale: 0.2,
        }
    }
}

impl RenderConfig {
    /// Number of rays needed to cover a frame of `width` pixels.
    pub fn ray_count(&self, width: u32) -> usize {
        (width / self.ray_width.max(1)) as usize
    }
}

/// An error describing an invalid configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The window would have a zero dimension.
    InvalidWindowSize {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// The field of view is outside the open `(0, 180)` degree range.
    InvalidFov(f32),
    /// The ray width is zero.
    InvalidRayWidth,
    /// The minimap scale is not strictly positive.
    InvalidMinimapScale(f32),
    /// The tile map could not be built.
    Map(MapError),
    /// The spawn point lies outside the map or inside a wall.
    InvalidSpawn([f32; 2]),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWindowSize { width, height } => {
                write!(f, "Window size must be non-zero, got {width}x{height}")
            }
            ConfigError::InvalidFov(fov) => {
                write!(f, "Field of view must be between 0 and 180 degrees, got {fov}")
            }
            ConfigError::InvalidRayWidth => write!(f, "Ray width must be at least 1 pixel"),
            ConfigError::InvalidMinimapScale(scale) => {
                write!(f, "Minimap scale must be positive, got {scale}")
            }
            ConfigError::Map(e) => write!(f, "Invalid map: {e}"),
            ConfigError::InvalidSpawn([x, y]) => {
                write!(f, "Spawn point ({x}, {y}) is outside the map or inside a wall")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Map(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MapError> for ConfigError {
    fn from(e: MapError) -> Self {
        ConfigError::Map(e)
    }
}

impl EngineConfig {
    /// Checks every value and returns the grid the configuration describes.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<Grid, ConfigError> {
        let WindowConfig { width, height, .. } = self.window;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidWindowSize { width, height });
        }
        let fov = self.world.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::InvalidFov(fov));
        }
        if self.render.ray_width == 0 {
            return Err(ConfigError::InvalidRayWidth);
        }
        let scale = self.render.minimap_scale;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::InvalidMinimapScale(scale));
        }

        let grid = self.world.build_grid()?;
        let spawn = self.spawn_point(&grid);
        if grid.has_wall_at(spawn) {
            return Err(ConfigError::InvalidSpawn([spawn.x, spawn.y]));
        }
        Ok(grid)
    }

    /// Returns the spawn point, falling back to the center of `grid`.
    pub fn spawn_point(&self, grid: &Grid) -> Vec2 {
        self.player.spawn.map(Vec2::from).unwrap_or_else(|| grid.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = EngineConfig::default();
        let grid = config.validate().expect("defaults must be valid");
        assert_eq!(config.render.ray_count(config.window.width), 900);
        assert_eq!(config.spawn_point(&grid), Vec2::new(450.0, 330.0));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.world.fov_degrees = 180.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidFov(180.0)));

        let mut config = EngineConfig::default();
        config.window.height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWindowSize { .. })
        ));

        let mut config = EngineConfig::default();
        config.render.ray_width = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidRayWidth));
    }

    #[test]
    fn test_rejects_spawn_in_wall() {
        let mut config = EngineConfig::default();
        config.player.spawn = Some([10.0, 10.0]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSpawn([10.0, 10.0]))
        );
    }

    #[test]
    fn test_rejects_map_with_walled_center() {
        let mut config = EngineConfig::default();
        config.world.map = Some(vec![vec![1, 1, 1], vec![1, 1, 1], vec![0, 0, 0]]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSpawn([90.0, 90.0]))
        );

        config.player.spawn = Some([90.0, 150.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            [window]
            title = "Custom"
            position = { at = { x = 10, y = 20 } }

            [world]
            map = [[1, 1, 1], [1, 0, 1], [1, 1, 1]]
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.window.title, "Custom");
        assert_eq!(config.window.width, 900);
        assert_eq!(config.window.position, WindowPosition::At { x: 10, y: 20 });
        assert_eq!(config.world.tile_size, 60.0);
        let grid = config.validate().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (3, 3));
    }
}
