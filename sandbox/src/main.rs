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

// Umbra launcher
// Run with: cargo run -p sandbox -- [--config umbra.toml] [--no-minimap]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use umbra_sdk::{load_config, Engine};

#[derive(Parser)]
#[command(name = "umbra", version)]
#[command(about = "A first-person raycaster on a tile map")]
struct Args {
    /// TOML configuration file; missing keys keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hide the minimap overlay
    #[arg(long)]
    no_minimap: bool,

    /// Log filter, e.g. "debug" or "umbra_core=trace" (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    let args = Args::parse();

    let mut logger = Builder::from_env(Env::default().default_filter_or("info"));
    logger.filter_module("wgpu_hal", log::LevelFilter::Error);
    if let Some(filter) = &args.log {
        logger.parse_filters(filter);
    }
    logger.init();

    let mut config = load_config(args.config.as_deref())?;
    if args.no_minimap {
        config.render.minimap = false;
    }

    Engine::run(config)?;
    Ok(())
}
