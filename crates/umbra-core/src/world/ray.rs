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

use super::{Grid, Player};
use crate::math::{normalize_angle, Vec2, FRAC_PI_2, PI};

/// One ray cast from the player's eye into the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Direction of the ray in radians, in `[0, 2π)`.
    pub angle: f32,
    /// The point where the ray met a wall. Equals the origin when nothing was hit.
    pub hit: Vec2,
    /// Euclidean distance from the origin to `hit`, or `f32::MAX` when nothing was hit.
    pub distance: f32,
    /// `true` when the wall was hit on a vertical grid line (an east/west face).
    pub hit_vertical: bool,
}

/// Which grid lines an intersection search walks along.
#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Ray {
    /// Casts a ray from `origin` at `angle` and returns its nearest wall hit.
    ///
    /// Two searches run independently: one stepping across horizontal grid
    /// lines and one across vertical grid lines. Each stops at the first wall
    /// or when the probe leaves the map. The nearer hit wins.
    pub fn cast(angle: f32, origin: Vec2, grid: &Grid) -> Self {
        let angle = normalize_angle(angle);
        let horizontal = find_wall(angle, origin, grid, Axis::Horizontal);
        let vertical = find_wall(angle, origin, grid, Axis::Vertical);

        let distance_to = |hit: Option<Vec2>| hit.map_or(f32::MAX, |p| origin.distance(p));
        let horizontal_distance = distance_to(horizontal);
        let vertical_distance = distance_to(vertical);

        let hit_vertical = vertical_distance < horizontal_distance;
        let (hit, distance) = if hit_vertical {
            (vertical, vertical_distance)
        } else {
            (horizontal, horizontal_distance)
        };

        Self {
            angle,
            hit: hit.unwrap_or(origin),
            distance,
            hit_vertical,
        }
    }

    /// Returns `true` when the ray met a wall.
    pub fn has_hit(&self) -> bool {
        self.distance < f32::MAX
    }
}

/// Walks grid lines of one orientation until a wall is found.
fn find_wall(angle: f32, origin: Vec2, grid: &Grid, axis: Axis) -> Option<Vec2> {
    let tile = grid.tile_size();
    let facing_down = angle > 0.0 && angle < PI;
    let facing_right = angle > PI + FRAC_PI_2 || angle < FRAC_PI_2;
    let tan = angle.tan();

    let (mut next, step, probe_offset) = match axis {
        Axis::Horizontal => {
            let mut y = (origin.y / tile).floor() * tile;
            if facing_down {
                y += tile;
            }
            let x = origin.x + (y - origin.y) / tan;

            let mut step_x = tile / tan;
            if (!facing_right && step_x > 0.0) || (facing_right && step_x < 0.0) {
                step_x = -step_x;
            }
            let step_y = if facing_down { tile } else { -tile };
            // A probe exactly on the line belongs to the tile below it, so
            // look one pixel up when the ray travels upwards.
            let probe = Vec2::new(0.0, if facing_down { 0.0 } else { -1.0 });
            (Vec2::new(x, y), Vec2::new(step_x, step_y), probe)
        }
        Axis::Vertical => {
            let mut x = (origin.x / tile).floor() * tile;
            if facing_right {
                x += tile;
            }
            let y = origin.y + (x - origin.x) * tan;

            let step_x = if facing_right { tile } else { -tile };
            let mut step_y = tile * tan;
            if (!facing_down && step_y > 0.0) || (facing_down && step_y < 0.0) {
                step_y = -step_y;
            }
            let probe = Vec2::new(if facing_right { 0.0 } else { -1.0 }, 0.0);
            (Vec2::new(x, y), Vec2::new(step_x, step_y), probe)
        }
    };

    while grid.is_in_bounds(next) {
        if grid.has_wall_at(next + probe_offset) {
            return Some(next);
        }
        next += step;
    }
    None
}

/// Casts `count` rays spread evenly across `fov` radians, centered on the player's view.
pub fn cast_all_rays(player: &Player, grid: &Grid, fov: f32, count: usize) -> Vec<Ray> {
    if count == 0 {
        return Vec::new();
    }
    let start = player.angle - fov / 2.0;
    let step = fov / count as f32;
    (0..count)
        .map(|i| Ray::cast(start + i as f32 * step, player.position, grid))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid() -> Grid {
        Grid::default_map(60.0).unwrap()
    }

    #[test]
    fn test_cast_straight_right_hits_vertical_wall() {
        // Row 1 is open from col 1 to col 11; col 12 is a wall.
        let ray = Ray::cast(0.0, Vec2::new(90.0, 90.0), &grid());
        assert!(ray.has_hit());
        assert!(ray.hit_vertical);
        assert_relative_eq!(ray.hit.x, 720.0, epsilon = 1e-3);
        assert_relative_eq!(ray.distance, 630.0, epsilon = 1e-3);
    }

    #[test]
    fn test_cast_straight_up_hits_horizontal_wall() {
        let ray = Ray::cast(3.0 * FRAC_PI_2, Vec2::new(90.0, 90.0), &grid());
        assert!(!ray.hit_vertical);
        assert_relative_eq!(ray.hit.y, 60.0, epsilon = 1e-3);
        assert_relative_eq!(ray.distance, 30.0, epsilon = 1e-3);
    }

    #[test]
    fn test_cast_left_probes_previous_tile() {
        // Standing in row 1, col 3. Col 0 is the border wall.
        let ray = Ray::cast(PI, Vec2::new(210.0, 90.0), &grid());
        assert!(ray.hit_vertical);
        assert_relative_eq!(ray.hit.x, 60.0, epsilon = 1e-3);
        assert_relative_eq!(ray.distance, 150.0, epsilon = 1e-3);
    }

    #[test]
    fn test_diagonal_ray_hits_something_inside_map() {
        let g = grid();
        let ray = Ray::cast(0.7, g.center(), &g);
        assert!(ray.has_hit());
        assert!(g.is_in_bounds(ray.hit));
        assert_relative_eq!(ray.distance, g.center().distance(ray.hit), epsilon = 1e-3);
    }

    #[test]
    fn test_cast_all_rays_spans_fov() {
        let g = grid();
        let mut player = Player::new(g.center(), &Default::default());
        player.angle = 1.0;
        let rays = cast_all_rays(&player, &g, 0.5, 10);
        assert_eq!(rays.len(), 10);
        assert_relative_eq!(rays[0].angle, 0.75, epsilon = 1e-5);
        assert_relative_eq!(rays[9].angle, 0.75 + 0.45, epsilon = 1e-5);
        assert!(rays.iter().all(Ray::has_hit));
        assert!(cast_all_rays(&player, &g, 0.5, 0).is_empty());
    }
}
