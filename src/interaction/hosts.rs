// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Narrow seams between the interaction controller and whatever provides
//! the scene graph, the physics world and the motion sensor.
//!
//! Node handles are plain `Entity` ids: the Bevy host hands out real entities,
//! in-memory hosts mint them with `Entity::from_raw`.

use bevy::prelude::*;

use crate::rendering::palette::palette::Swatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Delete,
    Gravity,
}

impl ControlKind {
    pub fn glyph(self) -> &'static str {
        match self {
            ControlKind::Delete => "x",
            ControlKind::Gravity => "G",
        }
    }
}

/// What a hit test found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Ball,
    Control(ControlKind),
    Boundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneNode {
    pub entity: Entity,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub collision_radius: f32,
    pub restitution: f32,
    pub dynamic: bool,
    pub affected_by_gravity: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSpec {
    pub position: Vec2,
    pub radius: f32,
    /// Fill and stroke share the swatch.
    pub swatch: Swatch,
    pub body: BodySpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlSpec {
    pub kind: ControlKind,
    pub center: Vec2,
    pub size: Vec2,
    pub z: f32,
    pub fill: Color,
    pub label: &'static str,
    pub label_alpha: f32,
    pub font_size: f32,
}

pub trait SceneHost {
    fn set_background(&mut self, color: Color);
    fn spawn_boundary(&mut self, frame: Rect) -> Entity;
    fn spawn_control(&mut self, control: ControlSpec) -> Entity;
    fn spawn_ball(&mut self, ball: BallSpec) -> Entity;
    /// Topmost node whose shape contains `point`.
    fn node_at(&self, point: Vec2) -> Option<SceneNode>;
    fn set_position(&mut self, node: Entity, point: Vec2);
    fn ball_nodes(&self) -> Vec<Entity>;
    fn remove_node(&mut self, node: Entity);
    fn set_control_label_alpha(&mut self, control: ControlKind, alpha: f32);
}

pub trait PhysicsHost {
    fn gravity(&self) -> Vec2;
    fn set_gravity(&mut self, gravity: Vec2);
    fn velocity(&self, body: Entity) -> Option<Vec2>;
    fn set_velocity(&mut self, body: Entity, velocity: Vec2);
}

pub trait MotionHost {
    fn start_updates(&mut self);
    fn stop_updates(&mut self);
    /// Most recent accelerometer reading in g, if one has arrived.
    fn latest_sample(&self) -> Option<Vec3>;
}

/// Hit-testable footprint of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeShape {
    Circle { center: Vec2, radius: f32 },
    Rect { center: Vec2, half_extents: Vec2 },
}

impl NodeShape {
    pub fn contains(&self, point: Vec2) -> bool {
        match *self {
            NodeShape::Circle { center, radius } => point.distance_squared(center) <= radius * radius,
            NodeShape::Rect {
                center,
                half_extents,
            } => {
                let d = (point - center).abs();
                d.x <= half_extents.x && d.y <= half_extents.y
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitCandidate {
    pub node: SceneNode,
    pub shape: NodeShape,
    pub z: f32,
    pub order: u64,
}

/// Topmost candidate containing `point`: highest z, then latest spawn.
pub fn topmost_at(
    candidates: impl IntoIterator<Item = HitCandidate>,
    point: Vec2,
) -> Option<SceneNode> {
    candidates
        .into_iter()
        .filter(|c| c.shape.contains(point))
        .max_by(|a, b| a.z.total_cmp(&b.z).then(a.order.cmp(&b.order)))
        .map(|c| c.node)
}
