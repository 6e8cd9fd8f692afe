// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use anyhow::Result;
use bevy::prelude::*;
use clap::Parser;

use ball_playground::app::game::{PlaygroundPlugin, StartupReport};
use ball_playground::core::config::GameConfig;
use ball_playground::interaction::session::config_hot_reload::ConfigReloadSettings;

#[derive(Parser, Debug)]
#[command(about = "Tap to spawn balls, drag to fling them, tilt for gravity", version)]
struct Args {
    /// Config layers, later files override earlier ones.
    #[arg(long = "config", default_values = ["assets/config/game.ron", "assets/config/game.local.ron"])]
    configs: Vec<PathBuf>,
    /// Fixed seed for ball colors.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    #[cfg(not(target_arch = "wasm32"))]
    let args = Args::parse();
    #[cfg(target_arch = "wasm32")]
    let args = Args::try_parse_from(["ball_playground"])?;

    let (mut cfg, used, errors) = GameConfig::load_layered(&args.configs);
    if let Some(seed) = args.seed {
        cfg.balls.seed = Some(seed);
    }
    if cfg.window.width <= 0.0 || cfg.window.height <= 0.0 {
        anyhow::bail!(
            "window size must be positive, got {}x{}",
            cfg.window.width,
            cfg.window.height
        );
    }

    App::new()
        .insert_resource(ClearColor(cfg.background.to_color()))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(StartupReport { used, errors })
        .insert_resource(ConfigReloadSettings::for_layers(args.configs.iter().cloned()))
        .insert_resource(cfg)
        .add_plugins(PlaygroundPlugin)
        .run();
    Ok(())
}
