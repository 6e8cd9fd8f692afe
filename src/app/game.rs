// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::config::GameConfig;
use crate::core::system::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
use crate::debug::DebugPlugin;
use crate::interaction::playground::InteractionPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::camera::CameraPlugin;
use crate::rendering::materials::materials::{BallMaterialsInitSet, MaterialsPlugin};

/// Outcome of the layered config load, logged once at startup.
#[derive(Resource, Debug, Default, Clone)]
pub struct StartupReport {
    pub used: Vec<String>,
    pub errors: Vec<String>,
}

pub struct PlaygroundPlugin;

impl Plugin for PlaygroundPlugin {
    fn build(&self, app: &mut App) {
        if app.world().get_resource::<GameConfig>().is_none() {
            app.init_resource::<GameConfig>();
        }
        app.init_state::<AppState>()
            .init_resource::<StartupReport>()
            .configure_sets(
                Update,
                (PrePhysicsSet, PostPhysicsAdjustSet.after(PrePhysicsSet)),
            )
            .add_plugins((
                CameraPlugin,
                MaterialsPlugin,
                PhysicsSetupPlugin,
                InteractionPlugin,
                DebugPlugin,
                ConfigHotReloadPlugin,
                AutoClosePlugin,
            ))
            .add_systems(
                Startup,
                (log_startup_report, enter_playground_when_ready)
                    .chain()
                    .after(BallMaterialsInitSet),
            );
    }
}

fn log_startup_report(report: Res<StartupReport>, cfg: Res<GameConfig>) {
    if report.used.is_empty() {
        warn!("No config files loaded; using defaults");
    } else {
        info!("Loaded config layers (in order): {:?}", report.used);
    }
    for e in &report.errors {
        warn!("Config load issue: {e}");
    }
    for w in cfg.validate() {
        warn!("Config warning: {w}");
    }
}

fn enter_playground_when_ready(mut next: ResMut<NextState<AppState>>) {
    next.set(AppState::Playground);
}
