// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

/// High-level app lifecycle state.
/// Loading -> Playground
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Startup assets (ball visuals) being created.
    #[default]
    Loading,
    /// Interactive session; owns the motion stream and the playground entities.
    Playground,
}
