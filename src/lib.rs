// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod app;
pub mod core;
pub mod debug;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use app::game::PlaygroundPlugin;
pub use core::components::{Ball, BallCircleVisual, BallRadius};
pub use core::config::{GameConfig, WindowConfig};
pub use interaction::controller::{ControllerSettings, DragState, InteractionController};
pub use interaction::hosts::{MotionHost, PhysicsHost, SceneHost};
