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

//! Loading an [`EngineConfig`] from a TOML file.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use umbra_core::EngineConfig;

/// Reads the configuration at `path`, or returns the defaults when no path is given.
///
/// Sections and keys missing from the file keep their default values.
///
/// # Errors
/// Fails if the file cannot be read or is not a valid configuration.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        log::info!("No configuration file given, using defaults.");
        return Ok(EngineConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("Failed to parse configuration file {}", path.display()))?;
    log::info!("Loaded configuration from {}.", path.display());
    Ok(config)
}
