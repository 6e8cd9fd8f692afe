// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
pub struct DebugState {
    /// Rapier collider wireframes (needs `physics.debug_render` to have any effect).
    pub wireframe: bool,
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
    pub last_ball_count: usize,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            wireframe: true,
            log_interval: 2.0,
            time_accum: 0.0,
            frame_counter: 0,
            last_ball_count: 0,
        }
    }
}

#[cfg(feature = "debug")]
#[derive(Resource, Debug, Default)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub ball_count: usize,
    pub gravity_enabled: bool,
    pub gravity: Vec2,
    pub dragging: bool,
}
