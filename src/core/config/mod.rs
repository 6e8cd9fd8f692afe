// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod config;

pub use config::{
    BallConfig, ControlsConfig, DebugConfig, GameConfig, InteractionConfig, Offset,
    PhysicsConfig, Rgb, WindowConfig,
};
