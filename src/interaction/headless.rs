// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory scene + physics host. No rendering and no integration step:
//! positions and velocities only change when the controller sets them.
//! Drives the controller in tests and headless tooling.

use bevy::prelude::*;

use super::hosts::{
    topmost_at, BallSpec, ControlKind, ControlSpec, HitCandidate, NodeKind, NodeShape,
    PhysicsHost, SceneHost, SceneNode,
};
use crate::rendering::palette::palette::Swatch;

#[derive(Debug, Clone, PartialEq)]
pub enum HeadlessNode {
    Boundary {
        frame: Rect,
    },
    Control {
        spec: ControlSpec,
        label_alpha: f32,
    },
    Ball {
        spec: BallSpec,
        position: Vec2,
        velocity: Vec2,
    },
}

#[derive(Debug, Default)]
pub struct HeadlessScene {
    nodes: Vec<(Entity, HeadlessNode)>,
    next_id: u32,
    background: Option<Color>,
    gravity: Vec2,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, node: HeadlessNode) -> Entity {
        let entity = Entity::from_raw(self.next_id);
        self.next_id += 1;
        self.nodes.push((entity, node));
        entity
    }

    fn node_mut(&mut self, entity: Entity) -> Option<&mut HeadlessNode> {
        self.nodes
            .iter_mut()
            .find(|(e, _)| *e == entity)
            .map(|(_, n)| n)
    }

    fn node(&self, entity: Entity) -> Option<&HeadlessNode> {
        self.nodes.iter().find(|(e, _)| *e == entity).map(|(_, n)| n)
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn ball_count(&self) -> usize {
        self.ball_nodes().len()
    }

    pub fn non_ball_count(&self) -> usize {
        self.nodes.len() - self.ball_count()
    }

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        match self.node(entity)? {
            HeadlessNode::Ball { position, .. } => Some(*position),
            HeadlessNode::Control { spec, .. } => Some(spec.center),
            HeadlessNode::Boundary { frame } => Some(frame.center()),
        }
    }

    pub fn ball_spec(&self, entity: Entity) -> Option<&BallSpec> {
        match self.node(entity)? {
            HeadlessNode::Ball { spec, .. } => Some(spec),
            _ => None,
        }
    }

    pub fn swatch(&self, entity: Entity) -> Option<Swatch> {
        self.ball_spec(entity).map(|s| s.swatch)
    }

    pub fn label_alpha(&self, kind: ControlKind) -> Option<f32> {
        self.nodes.iter().find_map(|(_, n)| match n {
            HeadlessNode::Control { spec, label_alpha } if spec.kind == kind => Some(*label_alpha),
            _ => None,
        })
    }

    pub fn control(&self, kind: ControlKind) -> Option<&ControlSpec> {
        self.nodes.iter().find_map(|(_, n)| match n {
            HeadlessNode::Control { spec, .. } if spec.kind == kind => Some(spec),
            _ => None,
        })
    }

    fn candidates(&self) -> impl Iterator<Item = HitCandidate> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(order, (entity, node))| {
                let (kind, shape, z) = match node {
                    // An edge loop has no area to hit.
                    HeadlessNode::Boundary { .. } => return None,
                    HeadlessNode::Control { spec, .. } => (
                        NodeKind::Control(spec.kind),
                        NodeShape::Rect {
                            center: spec.center,
                            half_extents: spec.size * 0.5,
                        },
                        spec.z,
                    ),
                    HeadlessNode::Ball { spec, position, .. } => (
                        NodeKind::Ball,
                        NodeShape::Circle {
                            center: *position,
                            radius: spec.radius,
                        },
                        0.0,
                    ),
                };
                Some(HitCandidate {
                    node: SceneNode {
                        entity: *entity,
                        kind,
                    },
                    shape,
                    z,
                    order: order as u64,
                })
            })
    }
}

impl SceneHost for HeadlessScene {
    fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    fn spawn_boundary(&mut self, frame: Rect) -> Entity {
        self.insert(HeadlessNode::Boundary { frame })
    }

    fn spawn_control(&mut self, control: ControlSpec) -> Entity {
        let label_alpha = control.label_alpha;
        self.insert(HeadlessNode::Control {
            spec: control,
            label_alpha,
        })
    }

    fn spawn_ball(&mut self, ball: BallSpec) -> Entity {
        self.insert(HeadlessNode::Ball {
            position: ball.position,
            velocity: Vec2::ZERO,
            spec: ball,
        })
    }

    fn node_at(&self, point: Vec2) -> Option<SceneNode> {
        topmost_at(self.candidates(), point)
    }

    fn set_position(&mut self, node: Entity, point: Vec2) {
        if let Some(HeadlessNode::Ball { position, .. }) = self.node_mut(node) {
            *position = point;
        }
    }

    fn ball_nodes(&self) -> Vec<Entity> {
        self.nodes
            .iter()
            .filter(|(_, n)| matches!(n, HeadlessNode::Ball { .. }))
            .map(|(e, _)| *e)
            .collect()
    }

    fn remove_node(&mut self, node: Entity) {
        self.nodes.retain(|(e, _)| *e != node);
    }

    fn set_control_label_alpha(&mut self, control: ControlKind, alpha: f32) {
        for (_, n) in self.nodes.iter_mut() {
            if let HeadlessNode::Control { spec, label_alpha } = n {
                if spec.kind == control {
                    *label_alpha = alpha;
                }
            }
        }
    }
}

impl PhysicsHost for HeadlessScene {
    fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn velocity(&self, body: Entity) -> Option<Vec2> {
        match self.node(body)? {
            HeadlessNode::Ball { velocity, .. } => Some(*velocity),
            _ => None,
        }
    }

    fn set_velocity(&mut self, body: Entity, v: Vec2) {
        if let Some(HeadlessNode::Ball { velocity, .. }) = self.node_mut(body) {
            *velocity = v;
        }
    }
}
