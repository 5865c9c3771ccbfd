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

use super::Grid;
use crate::config::PlayerConfig;
use crate::math::{degrees_to_radians, normalize_angle, Vec2, FRAC_PI_2};

/// The viewer walking through the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Position in map pixels.
    pub position: Vec2,
    /// Requested movement: `y` forward/backward, `x` strafe (positive = left).
    pub offset: Vec2,
    /// View direction in radians, kept in `[0, 2π)`.
    pub angle: f32,
    /// Distance covered per update for a unit offset.
    pub move_speed: f32,
    /// Radians turned per unit of horizontal mouse motion.
    pub rotation_speed: f32,
    /// Radius used when drawing the player on the minimap.
    pub radius: f32,
}

impl Player {
    /// Spawns a player at `position` with the given settings.
    pub fn new(position: Vec2, config: &PlayerConfig) -> Self {
        Self {
            position,
            offset: Vec2::ZERO,
            angle: normalize_angle(degrees_to_radians(config.angle_degrees)),
            move_speed: config.move_speed,
            rotation_speed: config.rotation_speed,
            radius: config.radius,
        }
    }

    /// Turns the player by `delta` units of mouse motion.
    pub fn rotate(&mut self, delta: f32) {
        self.angle = normalize_angle(self.angle + delta * self.rotation_speed);
    }

    /// Moves the player by one step along its current offset.
    ///
    /// The step is rejected as a whole when its destination is inside a wall.
    pub fn update(&mut self, grid: &Grid) {
        if self.offset == Vec2::ZERO {
            return;
        }
        let step = self.offset * self.move_speed;
        let tangent = self.angle - FRAC_PI_2;
        let movement = Vec2::new(
            self.angle.cos() * step.y + tangent.cos() * step.x,
            self.angle.sin() * step.y + tangent.sin() * step.x,
        );
        let destination = self.position + movement;

        if grid.has_wall_at(destination) {
            log::trace!("Movement to {destination:?} blocked by a wall.");
        } else {
            self.position = destination;
        }
    }
}
