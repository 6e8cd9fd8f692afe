// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Centralized ball color palette & helpers.
//! Single source of truth for ball visuals and the controller's random pick.

use bevy::prelude::*;
use rand::Rng;

/// Base SRGB palette for spawned balls. Update here only.
pub const BASE_COLORS: [Color; 8] = [
    Color::srgb(1.00, 1.00, 1.00), // white
    Color::srgb(0.00, 0.00, 0.00), // black
    Color::srgb(0.90, 0.20, 0.25), // red
    Color::srgb(0.20, 0.55, 0.90), // blue
    Color::srgb(0.95, 0.75, 0.15), // yellow
    Color::srgb(0.20, 0.80, 0.45), // green
    Color::srgb(0.65, 0.45, 0.95), // purple
    Color::srgb(0.95, 0.50, 0.15), // orange
];

/// A palette entry: index (for shared material lookup) plus its color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub index: usize,
    pub color: Color,
}

/// Uniform pick over the whole palette.
pub fn random_swatch(rng: &mut impl Rng) -> Swatch {
    let index = rng.gen_range(0..BASE_COLORS.len());
    Swatch {
        index,
        color: BASE_COLORS[index],
    }
}
