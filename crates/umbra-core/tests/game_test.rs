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

use approx::assert_relative_eq;
use umbra_core::math::Color;
use umbra_core::platform::{InputEvent, MouseButton};
use umbra_core::render::Frame;
use umbra_core::{EngineConfig, Game};

fn key(pressed: bool, code: &str) -> InputEvent {
    let key_code = code.to_string();
    if pressed {
        InputEvent::KeyPressed { key_code }
    } else {
        InputEvent::KeyReleased { key_code }
    }
}

#[test]
fn test_new_game_casts_one_ray_per_column() {
    let config = EngineConfig::default();
    let game = Game::new(&config).expect("defaults must build");
    assert_eq!(game.rays().len(), 900);
    assert!(game.rays().iter().all(|r| r.has_hit()));
    assert_eq!(game.player().position.x, 450.0);
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = EngineConfig::default();
    config.render.ray_width = 0;
    assert!(Game::new(&config).is_err());
}

#[test]
fn test_held_key_moves_player_each_update() {
    let mut game = Game::new(&EngineConfig::default()).unwrap();

    game.process_input(&key(true, "KeyW"));
    game.update();
    game.update();
    assert_relative_eq!(game.player().position.y, 336.0, epsilon = 1e-3);

    game.process_input(&key(false, "KeyW"));
    game.update();
    assert_relative_eq!(game.player().position.y, 336.0, epsilon = 1e-3);
}

#[test]
fn test_focus_loss_stops_movement() {
    let mut game = Game::new(&EngineConfig::default()).unwrap();
    game.process_input(&key(true, "KeyS"));
    game.release_inputs();
    game.update();
    assert_relative_eq!(game.player().position.y, 330.0, epsilon = 1e-3);
}

#[test]
fn test_mouse_turns_player_only_when_captured() {
    let mut game = Game::new(&EngineConfig::default()).unwrap();
    let start = game.player().angle;
    let motion = InputEvent::MouseMotion {
        delta_x: 50.0,
        delta_y: 0.0,
    };

    game.process_input(&motion);
    game.update();
    assert_eq!(game.player().angle, start);

    game.process_input(&InputEvent::MouseButtonPressed {
        button: MouseButton::Left,
    });
    assert_eq!(game.take_capture_request(), Some(true));
    game.set_cursor_captured(true);

    game.process_input(&motion);
    game.update();
    assert_relative_eq!(game.player().angle, start + 0.5, epsilon = 1e-4);
}

#[test]
fn test_escape_without_capture_requests_quit() {
    let mut game = Game::new(&EngineConfig::default()).unwrap();
    assert!(!game.wants_quit());
    game.process_input(&key(true, "Escape"));
    assert!(game.wants_quit());
}

#[test]
fn test_render_fills_whole_frame() {
    let config = EngineConfig::default();
    let game = Game::new(&config).unwrap();
    let mut frame = Frame::new(config.window.width, config.window.height);
    game.render(&mut frame);

    // The crosshair sits at the center, the floor runs to the bottom edge.
    assert_eq!(frame.pixel(450, 330), Some(Color::BLACK));
    let floor = frame.pixel(450, 659).expect("inside the frame");
    assert!(floor.r > Color::DARK.r);
    assert_eq!(frame.as_bytes().len(), 900 * 660 * 4);
}
