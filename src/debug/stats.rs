// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::core::components::Ball;
#[cfg(feature = "debug")]
use crate::interaction::controller::InteractionController;
#[cfg(feature = "debug")]
use crate::physics::rapier::rapier_physics::WorldGravity;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    q_balls: Query<(), With<Ball>>,
    gravity: Option<Res<WorldGravity>>,
    controller: Option<Res<InteractionController>>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    if stats.fps == 0.0 {
        stats.fps = inst_fps;
    } else {
        stats.fps = stats.fps * 0.9 + inst_fps * 0.1;
    }
    let inst_ms = dt * 1000.0;
    if stats.frame_time_ms == 0.0 {
        stats.frame_time_ms = inst_ms;
    } else {
        stats.frame_time_ms = stats.frame_time_ms * 0.9 + inst_ms * 0.1;
    }
    stats.ball_count = q_balls.iter().count();
    stats.gravity = gravity.map(|g| g.0).unwrap_or(Vec2::ZERO);
    stats.gravity_enabled = controller.as_ref().is_some_and(|c| c.gravity_enabled());
    stats.dragging = controller.as_ref().is_some_and(|c| c.dragged_ball().is_some());
}
