// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 768.0,
            height: 1024.0,
            title: "Ball Playground".into(),
            auto_close: 0.0,
        }
    }
}

/// Plain RGB triple as written in RON: `(r, g, b)`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);
impl Rgb {
    pub fn to_color(self) -> Color {
        Color::srgb(self.0, self.1, self.2)
    }
}

/// 2D offset in world units, RON form `(x: .., y: ..)`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}
impl Default for Offset {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}
impl From<Offset> for Vec2 {
    fn from(o: Offset) -> Self {
        Vec2::new(o.x, o.y)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// World units per physics meter. Gravity set by the controller is in meters/s^2.
    pub pixels_per_meter: f32,
    pub debug_render: bool,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: 150.0,
            debug_render: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    /// Extra collider radius on top of the visual radius.
    pub collider_padding: f32,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    /// Fixed RNG seed for palette picks. None = seeded from entropy.
    pub seed: Option<u64>,
}
impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            collider_padding: 2.0,
            restitution: 0.6,
            friction: 0.2,
            linear_damping: 0.1,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// Velocity per unit of touch delta applied on drag and release.
    pub fling_scale: f32,
    /// Accelerometer g -> gravity (m/s^2) multiplier.
    pub tilt_scale: f32,
}
impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            fling_scale: 70.0,
            tilt_scale: 20.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    pub size: f32,
    /// Positions are measured from the bottom-left corner of the frame.
    pub delete_position: Offset,
    pub gravity_position: Offset,
    pub z: f32,
    pub fill: Rgb,
    pub fill_alpha: f32,
    pub font_size: f32,
    pub label_dim_alpha: f32,
    pub label_lit_alpha: f32,
}
impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            size: 44.0,
            delete_position: Offset { x: 44.0, y: 44.0 },
            gravity_position: Offset { x: 100.0, y: 44.0 },
            z: 1000.0,
            fill: Rgb(0.0, 0.0, 0.0),
            fill_alpha: 0.5,
            font_size: 28.0,
            label_dim_alpha: 0.1,
            label_lit_alpha: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Seconds between periodic state log lines (debug feature only).
    pub log_interval: f32,
}
impl Default for DebugConfig {
    fn default() -> Self {
        Self { log_interval: 2.0 }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub background: Rgb,
    pub physics: PhysicsConfig,
    pub balls: BallConfig,
    pub interactions: InteractionConfig,
    pub controls: ControlsConfig,
    pub debug: DebugConfig,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            background: Rgb(0.33, 0.33, 0.33),
            physics: Default::default(),
            balls: Default::default(),
            interactions: Default::default(),
            controls: Default::default(),
            debug: Default::default(),
        }
    }
}

fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
    use ron::value::Value;
    match (base, overlay) {
        (Value::Map(bm), Value::Map(om)) => {
            for (k, v) in om.into_iter() {
                let mut incoming = Some(v);
                for (ek, ev) in bm.iter_mut() {
                    if *ek == k {
                        if let Some(val) = incoming.take() {
                            merge_value(ev, val);
                        }
                        break;
                    }
                }
                if let Some(val) = incoming {
                    bm.insert(k, val);
                }
            }
        }
        (b, o) => *b = o,
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Load multiple config layers, later files overriding earlier ones (deep merge of maps).
    /// Missing files are skipped; returns (config, list_of_layer_paths_used, list_of_errors).
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        let mut merged: Option<ron::value::Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();

        for p in paths {
            let path_ref = p.as_ref();
            let txt = match fs::read_to_string(path_ref) {
                Ok(txt) => txt,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    errors.push(format!("{}: read error: {e}", path_ref.display()));
                    continue;
                }
            };
            match ron::from_str::<ron::value::Value>(&txt) {
                Ok(val) => {
                    if let Some(cur) = &mut merged {
                        merge_value(cur, val);
                    } else {
                        merged = Some(val);
                    }
                    used.push(path_ref.display().to_string());
                }
                Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
            }
        }

        let Some(val) = merged else {
            return (GameConfig::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (GameConfig::default(), used, errors)
            }
        }
    }

    /// Validate the configuration returning a list of human‑readable warning strings.
    /// These represent suspicious / potentially unintended values but are not hard errors.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        } else if self.window.auto_close > 0.0 && self.window.auto_close < 0.01 {
            w.push(format!(
                "window.autoClose {} very small; closes almost immediately",
                self.window.auto_close
            ));
        }
        if self.physics.pixels_per_meter <= 0.0 {
            w.push("physics.pixels_per_meter must be > 0".into());
        }
        if self.balls.radius <= 0.0 {
            w.push("balls.radius must be > 0".into());
        }
        if self.balls.collider_padding < 0.0 {
            w.push("balls.collider_padding negative -> collider smaller than visual".into());
        }
        if !(0.0..=1.0).contains(&self.balls.restitution) {
            w.push(format!(
                "balls.restitution {} outside 0..1 (energy gain on bounce)",
                self.balls.restitution
            ));
        }
        if self.interactions.fling_scale <= 0.0 {
            w.push("interactions.fling_scale must be > 0 or flings stop the ball".into());
        }
        if self.interactions.tilt_scale == 0.0 {
            w.push("interactions.tilt_scale is zero; gravity mode has no effect".into());
        }
        if self.controls.size <= 0.0 {
            w.push("controls.size must be > 0".into());
        }
        let gap = Vec2::from(self.controls.delete_position)
            .distance(self.controls.gravity_position.into());
        if gap < self.controls.size {
            w.push(format!(
                "controls overlap: delete/gravity centers {gap:.1} apart, size {}",
                self.controls.size
            ));
        }
        for (name, a) in [
            ("controls.label_dim_alpha", self.controls.label_dim_alpha),
            ("controls.label_lit_alpha", self.controls.label_lit_alpha),
            ("controls.fill_alpha", self.controls.fill_alpha),
        ] {
            if !(0.0..=1.0).contains(&a) {
                w.push(format!("{name} {a} outside 0..1"));
            }
        }
        if self.controls.label_dim_alpha >= self.controls.label_lit_alpha {
            w.push("controls.label_dim_alpha >= label_lit_alpha; gravity mode not visible".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_playground_constants() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.balls.radius, 20.0);
        assert_eq!(cfg.balls.collider_padding, 2.0);
        assert_eq!(cfg.balls.restitution, 0.6);
        assert_eq!(cfg.interactions.fling_scale, 70.0);
        assert_eq!(cfg.interactions.tilt_scale, 20.0);
        assert_eq!(cfg.controls.size, 44.0);
        assert_eq!(cfg.controls.label_dim_alpha, 0.1);
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    }

    #[test]
    fn partial_ron_keeps_defaults_for_missing_sections() {
        let cfg: GameConfig = ron::from_str("(balls: (radius: 12.0))").expect("parse");
        assert_eq!(cfg.balls.radius, 12.0);
        assert_eq!(cfg.balls.restitution, 0.6);
        assert_eq!(cfg.controls, ControlsConfig::default());
    }

    #[test]
    fn validate_flags_overlapping_controls() {
        let mut cfg = GameConfig::default();
        cfg.controls.gravity_position = cfg.controls.delete_position;
        assert!(cfg.validate().iter().any(|w| w.contains("controls overlap")));
    }
}
