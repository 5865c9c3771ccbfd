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

//! The resource-acquisition chain that brings the game up and down.
//!
//! Bootstrapping is a straight line of fallible steps:
//!
//! 1. initialize the windowing/graphics subsystem,
//! 2. create the window,
//! 3. create a renderer bound to that window,
//! 4. switch the renderer to alpha blending.
//!
//! The first failure stops the chain. [`GameContext`] owns whatever was
//! acquired and releases it in reverse order, both on early failure and at
//! teardown. A [`Platform`] implementation supplies the concrete steps.

pub mod context;
pub mod error;

pub use context::GameContext;
pub use error::BootstrapError;

use crate::config::WindowConfig;
use crate::render::Renderer;

/// The windowing/graphics library seen as a set of fallible factories.
///
/// Every handle returned by a factory is released by dropping it, so the
/// owner controls release order through drop order.
pub trait Platform {
    /// Proof that the subsystem is up. Dropping it shuts the subsystem down.
    type Subsystem;
    /// An on-screen window.
    type Window;
    /// A drawing context bound to a window.
    type Renderer: Renderer;
    /// The error reported by any of the factories.
    type Error: std::fmt::Display;

    /// Initializes the windowing/graphics subsystem.
    fn init_subsystem(&mut self) -> Result<Self::Subsystem, Self::Error>;

    /// Creates the window described by `config`.
    fn create_window(
        &mut self,
        subsystem: &Self::Subsystem,
        config: &WindowConfig,
    ) -> Result<Self::Window, Self::Error>;

    /// Creates a renderer that presents into `window`.
    fn create_renderer(
        &mut self,
        subsystem: &Self::Subsystem,
        window: &Self::Window,
    ) -> Result<Self::Renderer, Self::Error>;
}
