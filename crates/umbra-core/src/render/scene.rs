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

//! Draws the first-person view and the minimap into a [`Frame`].

use super::Frame;
use crate::config::RenderConfig;
use crate::math::{map_range, Color, Vec2};
use crate::world::{Grid, Player, Ray};

/// Color of the floor gradient at the horizon.
const FLOOR_SHADOW: Color = Color::DARK;
/// Color of the ray and player markers on the minimap.
const MARKER: Color = Color::RED;
/// Brightness drop, in levels, over one projection distance.
const DISTANCE_FALLOFF: f32 = 150.0;
/// Extra brightness of faces hit on a vertical grid line.
const VERTICAL_FACE_BONUS: f32 = 50.0;
/// Half-length of the crosshair arms, in pixels.
const CROSSHAIR_SIZE: f32 = 10.0;

/// Projection parameters shared by every strip of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    width: f32,
    height: f32,
    fov: f32,
    projection_distance: f32,
}

impl Scene {
    /// Prepares a scene for frames of `width` x `height` pixels and a horizontal `fov`.
    pub fn new(width: u32, height: u32, fov: f32) -> Self {
        let width = width as f32;
        Self {
            width,
            height: height as f32,
            fov,
            projection_distance: (width / 2.0) / (fov / 2.0).tan(),
        }
    }

    /// Distance from the eye to the projection plane, in pixels.
    pub fn projection_distance(&self) -> f32 {
        self.projection_distance
    }

    /// Horizontal field of view in radians.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Height on screen of a wall strip seen at `ray`, corrected for fish-eye.
    pub fn strip_height(&self, ray: &Ray, player: &Player, tile_size: f32) -> f32 {
        let distance = self.corrected_distance(ray, player);
        tile_size / distance * self.projection_distance
    }

    /// Brightness of a wall strip: darker with distance, brighter on vertical faces.
    pub fn strip_shade(&self, ray: &Ray, player: &Player) -> u8 {
        let distance = self.corrected_distance(ray, player);
        let bonus = if ray.hit_vertical {
            VERTICAL_FACE_BONUS
        } else {
            0.0
        };
        let level = 255.0 - distance * DISTANCE_FALLOFF / self.projection_distance + bonus;
        level.round().clamp(0.0, 255.0) as u8
    }

    fn corrected_distance(&self, ray: &Ray, player: &Player) -> f32 {
        (ray.distance * (ray.angle - player.angle).cos()).max(f32::EPSILON)
    }

    /// Draws a complete frame.
    pub fn draw(
        &self,
        frame: &mut Frame,
        grid: &Grid,
        player: &Player,
        rays: &[Ray],
        config: &RenderConfig,
    ) {
        frame.clear(Color::DARK);
        self.draw_floor(frame);
        self.draw_walls(frame, grid, player, rays, config.ray_width as f32);
        self.draw_crosshair(frame);
        if config.minimap {
            draw_minimap(frame, grid, player, rays, config.minimap_scale);
        }
    }

    fn draw_floor(&self, frame: &mut Frame) {
        let horizon = (self.height / 2.0).floor() as i32;
        let bottom = self.height as i32;
        for y in horizon..bottom {
            let t = 0.5 + map_range(y as f32, self.height / 2.0, self.height, 0.0, 0.5);
            let color = FLOOR_SHADOW.lerp(Color::LIGHT, t);
            frame.fill_rect(0.0, y as f32, self.width, 1.0, color);
        }
    }

    fn draw_walls(
        &self,
        frame: &mut Frame,
        grid: &Grid,
        player: &Player,
        rays: &[Ray],
        ray_width: f32,
    ) {
        let half_height = self.height / 2.0;
        let mut previous_vertical = None;

        for (i, ray) in rays.iter().enumerate() {
            if !ray.has_hit() {
                previous_vertical = None;
                continue;
            }
            let x = i as f32 * ray_width;
            let strip = self.strip_height(ray, player, grid.tile_size()).min(self.height * 4.0);
            let top = half_height - strip / 2.0;

            frame.fill_rect(x, top - 1.0, ray_width, strip + 2.0, Color::BLACK);

            // A change of face orientation marks a wall corner: outline it.
            let color = match previous_vertical {
                Some(prev) if prev != ray.hit_vertical => Color::BLACK,
                _ => Color::gray(self.strip_shade(ray, player)),
            };
            frame.fill_rect(x, top, ray_width, strip, color);
            previous_vertical = Some(ray.hit_vertical);
        }
    }

    fn draw_crosshair(&self, frame: &mut Frame) {
        let center = Vec2::new(self.width / 2.0, self.height / 2.0);
        frame.fill_rect(
            center.x - 0.5,
            center.y - CROSSHAIR_SIZE / 2.0,
            1.0,
            CROSSHAIR_SIZE,
            Color::BLACK,
        );
        frame.fill_rect(
            center.x - CROSSHAIR_SIZE / 2.0,
            center.y - 0.5,
            CROSSHAIR_SIZE,
            1.0,
            Color::BLACK,
        );
    }
}

/// Draws the top-down minimap in the top-left corner.
fn draw_minimap(frame: &mut Frame, grid: &Grid, player: &Player, rays: &[Ray], scale: f32) {
    let tile = grid.tile_size() * scale;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let wall = grid.tile(row, col).is_some_and(|t| t != 0);
            let (x, y) = (col as f32 * tile, row as f32 * tile);
            frame.fill_rect(x, y, tile, tile, if wall { Color::DARK } else { Color::LIGHT });
            frame.stroke_rect(x, y, tile, tile, Color::DARK);
        }
    }

    let eye = player.position * scale;
    for ray in rays.iter().filter(|r| r.has_hit()) {
        frame.draw_line(eye, ray.hit * scale, MARKER);
    }
    frame.fill_circle(eye, (player.radius * scale).max(1.0), MARKER);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, PlayerConfig};
    use crate::world::cast_all_rays;
    use approx::assert_relative_eq;

    fn ray_at(distance: f32, hit_vertical: bool) -> Ray {
        Ray {
            angle: 0.0,
            hit: Vec2::ZERO,
            distance,
            hit_vertical,
        }
    }

    fn player_facing_zero() -> Player {
        let mut player = Player::new(Vec2::ZERO, &PlayerConfig::default());
        player.angle = 0.0;
        player
    }

    #[test]
    fn test_projection_distance_default() {
        let scene = Scene::new(900, 660, 60f32.to_radians());
        // 450 / tan(30 deg)
        assert_relative_eq!(scene.projection_distance(), 779.4229, epsilon = 1e-2);
    }

    #[test]
    fn test_strip_height_and_shade() {
        let scene = Scene::new(900, 660, 60f32.to_radians());
        let player = player_facing_zero();
        let ray = ray_at(scene.projection_distance(), false);
        assert_relative_eq!(scene.strip_height(&ray, &player, 60.0), 60.0, epsilon = 1e-3);
        assert_eq!(scene.strip_shade(&ray, &player), 105);
        assert_eq!(scene.strip_shade(&ray_at(1.0, true), &player), 255);
    }

    #[test]
    fn test_full_frame_draws_walls_and_minimap() {
        let config = EngineConfig::default();
        let grid = config.validate().unwrap();
        let player = Player::new(config.spawn_point(&grid), &config.player);
        let scene = Scene::new(config.window.width, config.window.height, config.world.fov());
        let rays = cast_all_rays(&player, &grid, scene.fov(), config.render.ray_count(900));

        let mut frame = Frame::new(900, 660);
        scene.draw(&mut frame, &grid, &player, &rays, &config.render);

        // Minimap top-left tile is a wall; the bottom row is floor gradient.
        assert_eq!(frame.pixel(5, 5), Some(Color::DARK));
        let bottom = frame.pixel(899, 659).unwrap();
        assert!(bottom.r > 200, "floor should brighten towards the bottom: {bottom:?}");
        // The crosshair sits in the middle of the view.
        assert_eq!(frame.pixel(450, 330), Some(Color::BLACK));
    }
}
