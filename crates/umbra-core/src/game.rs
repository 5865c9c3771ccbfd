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

//! The raycaster's game state and its three per-frame phases:
//! input processing, update and rendering.

use crate::config::{ConfigError, EngineConfig, RenderConfig};
use crate::platform::{InputEvent, InputState};
use crate::render::{Frame, Scene};
use crate::world::{cast_all_rays, Grid, Player, Ray};

/// Everything that changes from one frame to the next.
#[derive(Debug)]
pub struct Game {
    grid: Grid,
    player: Player,
    rays: Vec<Ray>,
    input: InputState,
    scene: Scene,
    render_config: RenderConfig,
    ray_count: usize,
}

impl Game {
    /// Builds the initial game state from a configuration.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the configuration does not validate.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        let grid = config.validate()?;
        let player = Player::new(config.spawn_point(&grid), &config.player);
        let scene = Scene::new(config.window.width, config.window.height, config.world.fov());
        let ray_count = config.render.ray_count(config.window.width);

        log::info!(
            "Game ready: {}x{} map, {} rays, spawn at ({:.1}, {:.1}).",
            grid.cols(),
            grid.rows(),
            ray_count,
            player.position.x,
            player.position.y
        );

        let mut game = Self {
            grid,
            player,
            rays: Vec::with_capacity(ray_count),
            input: InputState::new(),
            scene,
            render_config: config.render.clone(),
            ray_count,
        };
        game.cast_rays();
        Ok(game)
    }

    /// Feeds one input event into the game.
    pub fn process_input(&mut self, event: &InputEvent) {
        self.input.handle(event);
    }

    /// Advances the simulation by one frame: applies input, moves the player, recasts rays.
    pub fn update(&mut self) {
        let turn = self.input.take_mouse_delta();
        if turn != 0.0 {
            self.player.rotate(turn);
        }
        self.player.offset = self.input.movement_offset();
        self.player.update(&self.grid);
        self.cast_rays();
    }

    fn cast_rays(&mut self) {
        self.rays = cast_all_rays(&self.player, &self.grid, self.scene.fov(), self.ray_count);
    }

    /// Draws the current state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        self.scene.draw(
            frame,
            &self.grid,
            &self.player,
            &self.rays,
            &self.render_config,
        );
    }

    /// Returns `true` once the player asked to quit.
    pub fn wants_quit(&self) -> bool {
        self.input.quit_requested()
    }

    /// Returns and clears a pending cursor capture (`true`) or release (`false`) request.
    pub fn take_capture_request(&mut self) -> Option<bool> {
        self.input.take_capture_request()
    }

    /// Records whether the cursor is captured by the window.
    pub fn set_cursor_captured(&mut self, captured: bool) {
        self.input.set_cursor_captured(captured);
    }

    /// Drops every held key, e.g. after the window lost focus.
    pub fn release_inputs(&mut self) {
        self.input.release_all();
    }

    /// The tile map.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The rays cast during the last update.
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }
}
