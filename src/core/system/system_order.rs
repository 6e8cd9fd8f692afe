// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 1. PreUpdate: input → gesture events
//! 2. PrePhysics (gesture handling, tilt gravity, manual velocity edits before Rapier)
//! 3. PostPhysicsAdjust (after PrePhysics in Update: mirror world gravity into Rapier before its PostUpdate step)
//! 4. Rendering (implicit)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet; // velocity / position edits applied before physics simulation step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PostPhysicsAdjustSet; // runs after PrePhysicsSet
