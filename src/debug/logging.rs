// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};

#[cfg(feature = "debug")]
pub fn debug_logging_system(time: Res<Time>, mut state: ResMut<DebugState>, stats: Res<DebugStats>) {
    if stats.ball_count != state.last_ball_count {
        debug!(from = state.last_ball_count, to = stats.ball_count, "ball count changed");
        state.last_ball_count = stats.ball_count;
    }
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!("SIM frame={} t={:.3}s fps={:.1} ft_ms={:.1} balls={} gravity_mode={} gravity=({:.2},{:.2}) dragging={}",
            state.frame_counter,
            time.elapsed_secs(),
            stats.fps,
            stats.frame_time_ms,
            stats.ball_count,
            stats.gravity_enabled,
            stats.gravity.x,
            stats.gravity.y,
            stats.dragging);
    }
}
