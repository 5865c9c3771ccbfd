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

//! The tile map, the player and the ray casting that connects them.

pub mod grid;
pub mod player;
pub mod ray;

pub use grid::{Grid, MapError, DEFAULT_MAP};
pub use player::Player;
pub use ray::{cast_all_rays, Ray};
