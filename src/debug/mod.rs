// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Debug module: feature gated runtime stats/logging and the Rapier wireframe toggle.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
pub mod keys; // pub for testing
#[cfg(feature = "debug")]
mod logging;
#[cfg(feature = "debug")]
mod modes;
#[cfg(feature = "debug")]
mod stats;

#[cfg(feature = "debug")]
pub use modes::*;

#[cfg(feature = "debug")]
use crate::core::config::GameConfig;
#[cfg(feature = "debug")]
use crate::core::system::system_order::PostPhysicsAdjustSet;
#[cfg(feature = "debug")]
use crate::interaction::controller::{DragState, InteractionController};
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub struct DebugPlugin;
#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use bevy_rapier2d::render::DebugRenderContext;
        use keys::debug_key_input_system;
        use logging::debug_logging_system;
        use stats::debug_stats_collect_system;

        fn toggle_rapier_debug(state: Res<DebugState>, ctx: Option<ResMut<DebugRenderContext>>) {
            if let Some(mut c) = ctx {
                if c.enabled != state.wireframe {
                    c.enabled = state.wireframe;
                }
            }
        }

        fn drag_gizmos(
            controller: Option<Res<InteractionController>>,
            balls: Query<&GlobalTransform>,
            mut gizmos: Gizmos,
        ) {
            let Some(controller) = controller else {
                return;
            };
            if let DragState::Dragging(ball) = controller.drag_state() {
                if let Ok(tf) = balls.get(ball) {
                    gizmos.circle_2d(tf.translation().truncate(), 8.0, Color::srgb(1.0, 1.0, 0.2));
                }
            }
        }

        let log_interval = app
            .world()
            .get_resource::<GameConfig>()
            .map(|c| c.debug.log_interval)
            .unwrap_or(2.0);

        app.insert_resource(DebugState {
            log_interval,
            ..default()
        })
        .init_resource::<DebugStats>()
        .add_systems(
            Update,
            (
                debug_key_input_system,
                debug_stats_collect_system,
                debug_logging_system,
                toggle_rapier_debug,
                drag_gizmos,
            )
                .chain()
                .after(PostPhysicsAdjustSet),
        );
    }
}

// Stub plugin when debug feature disabled so callers can unconditionally add it.
#[cfg(not(feature = "debug"))]
pub struct DebugPlugin;
#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}
