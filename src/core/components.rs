// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::interaction::hosts::ControlKind;

#[derive(Component)]
pub struct Ball;

#[derive(Component, Debug, Deref, DerefMut, Copy, Clone)]
pub struct BallRadius(pub f32);

/// Child entity carrying the circle mesh of a ball (scaled by radius).
#[derive(Component)]
pub struct BallCircleVisual;

/// Static edge loop around the visible frame.
#[derive(Component)]
pub struct Boundary;

#[derive(Component, Debug, Copy, Clone)]
pub struct ControlButton {
    pub kind: ControlKind,
    pub half_extents: Vec2,
}

#[derive(Component, Debug, Deref, Copy, Clone)]
pub struct ControlLabel(pub ControlKind);

/// Monotonic spawn counter; breaks z ties in hit testing (later spawn wins).
#[derive(Component, Debug, Deref, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpawnOrder(pub u64);

/// Marks everything spawned for a playground session so it can be torn down on exit.
#[derive(Component)]
pub struct PlaygroundEntity;
