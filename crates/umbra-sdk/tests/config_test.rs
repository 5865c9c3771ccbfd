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

use std::fs;
use tempfile::tempdir;
use umbra_sdk::load_config;
use umbra_sdk::prelude::EngineConfig;

#[test]
fn test_no_path_yields_defaults() -> anyhow::Result<()> {
    assert_eq!(load_config(None)?, EngineConfig::default());
    Ok(())
}

#[test]
fn test_partial_file_keeps_other_defaults() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("umbra.toml");
    fs::write(
        &path,
        r#"
[window]
title = "Test"
borderless = false

[render]
minimap = false
"#,
    )?;

    let config = load_config(Some(&path))?;
    assert_eq!(config.window.title, "Test");
    assert!(!config.window.borderless);
    assert_eq!(config.window.width, 900);
    assert!(!config.render.minimap);
    assert_eq!(config.world, EngineConfig::default().world);
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempdir().expect("temp dir");
    let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn test_malformed_file_is_an_error() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[window]\nwidth = \"wide\"\n")?;

    let err = load_config(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Failed to parse"));
    Ok(())
}
