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

use std::fmt;

/// A resource initialization failure, tagged with the step that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    /// The windowing/graphics subsystem could not be initialized.
    Subsystem(String),
    /// The window could not be created.
    Window(String),
    /// The renderer could not be created for the window.
    Renderer(String),
    /// `initialize` was called on a context that already holds resources.
    AlreadyInitialized,
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::Subsystem(details) => {
                write!(f, "Error in subsystem initialization: {details}")
            }
            BootstrapError::Window(details) => {
                write!(f, "Error in window initialization: {details}")
            }
            BootstrapError::Renderer(details) => {
                write!(f, "Error in renderer initialization: {details}")
            }
            BootstrapError::AlreadyInitialized => {
                write!(f, "The game context is already initialized")
            }
        }
    }
}

impl std::error::Error for BootstrapError {}
