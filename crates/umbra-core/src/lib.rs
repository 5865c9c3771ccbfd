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

//! # Umbra Core
//!
//! Foundational crate of the Umbra raycaster: the bootstrap context and the
//! platform contracts it drives, configuration, math, the tile world and the
//! software renderer. Nothing in here depends on a concrete windowing or
//! graphics backend.

#![warn(missing_docs)]

pub mod bootstrap;
pub mod config;
pub mod game;
pub mod math;
pub mod platform;
pub mod render;
pub mod utils;
pub mod world;

pub use bootstrap::{BootstrapError, GameContext, Platform};
pub use config::EngineConfig;
pub use game::Game;
pub use utils::timer::{FrameClock, Stopwatch};
