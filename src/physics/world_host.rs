// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bevy + Rapier implementation of the scene and physics host traits.
//! Spawns and despawns go through `Commands`, so they land at the next sync point.

use bevy::color::Alpha;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::rapier::rapier_physics::WorldGravity;
use crate::core::components::{
    Ball, BallCircleVisual, BallRadius, Boundary, ControlButton, ControlLabel, PlaygroundEntity,
    SpawnOrder,
};
use crate::core::config::GameConfig;
use crate::interaction::hosts::{
    topmost_at, BallSpec, ControlKind, ControlSpec, HitCandidate, NodeKind, NodeShape,
    PhysicsHost, SceneHost, SceneNode,
};
use crate::rendering::materials::materials::BallVisuals;

/// Last handed-out `SpawnOrder`.
#[derive(Resource, Debug, Default)]
pub struct SpawnSequence(pub u64);

#[derive(SystemParam)]
pub struct PlaygroundWorld<'w, 's> {
    commands: Commands<'w, 's>,
    cfg: Res<'w, GameConfig>,
    visuals: Option<Res<'w, BallVisuals>>,
    clear_color: ResMut<'w, ClearColor>,
    gravity: ResMut<'w, WorldGravity>,
    sequence: ResMut<'w, SpawnSequence>,
    balls: Query<
        'w,
        's,
        (
            Entity,
            &'static mut Transform,
            &'static mut Velocity,
            &'static BallRadius,
            &'static SpawnOrder,
        ),
        With<Ball>,
    >,
    controls: Query<
        'w,
        's,
        (Entity, &'static Transform, &'static ControlButton, &'static SpawnOrder),
        Without<Ball>,
    >,
    labels: Query<'w, 's, (&'static ControlLabel, &'static mut TextColor)>,
}

impl<'w, 's> PlaygroundWorld<'w, 's> {
    pub fn commands(&mut self) -> &mut Commands<'w, 's> {
        &mut self.commands
    }

    fn next_order(&mut self) -> SpawnOrder {
        self.sequence.0 += 1;
        SpawnOrder(self.sequence.0)
    }

    fn candidates(&self) -> impl Iterator<Item = HitCandidate> + '_ {
        let balls = self.balls.iter().map(|(entity, tf, _, radius, order)| HitCandidate {
            node: SceneNode {
                entity,
                kind: NodeKind::Ball,
            },
            shape: NodeShape::Circle {
                center: tf.translation.truncate(),
                radius: radius.0,
            },
            z: tf.translation.z,
            order: order.0,
        });
        let controls = self
            .controls
            .iter()
            .map(|(entity, tf, button, order)| HitCandidate {
                node: SceneNode {
                    entity,
                    kind: NodeKind::Control(button.kind),
                },
                shape: NodeShape::Rect {
                    center: tf.translation.truncate(),
                    half_extents: button.half_extents,
                },
                z: tf.translation.z,
                order: order.0,
            });
        balls.chain(controls)
    }
}

impl SceneHost for PlaygroundWorld<'_, '_> {
    fn set_background(&mut self, color: Color) {
        self.clear_color.0 = color;
    }

    fn spawn_boundary(&mut self, frame: Rect) -> Entity {
        let loop_vertices = vec![
            frame.min,
            Vec2::new(frame.max.x, frame.min.y),
            frame.max,
            Vec2::new(frame.min.x, frame.max.y),
            frame.min,
        ];
        self.commands
            .spawn((
                Boundary,
                PlaygroundEntity,
                RigidBody::Fixed,
                Collider::polyline(loop_vertices, None),
                Transform::IDENTITY,
                Name::new("Boundary"),
            ))
            .id()
    }

    fn spawn_control(&mut self, control: ControlSpec) -> Entity {
        let order = self.next_order();
        let label = ControlLabel(control.kind);
        let label_color = Color::WHITE.with_alpha(control.label_alpha);
        self.commands
            .spawn((
                ControlButton {
                    kind: control.kind,
                    half_extents: control.size * 0.5,
                },
                order,
                PlaygroundEntity,
                Sprite::from_color(control.fill, control.size),
                Transform::from_translation(control.center.extend(control.z)),
                Name::new(format!("{:?}Control", control.kind)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    label,
                    Text2d::new(control.label),
                    TextFont {
                        font_size: control.font_size,
                        ..default()
                    },
                    TextColor(label_color),
                    Transform::from_xyz(0.0, 0.0, 1.0),
                ));
            })
            .id()
    }

    fn spawn_ball(&mut self, ball: BallSpec) -> Entity {
        let order = self.next_order();
        let body = ball.body;
        let rigid_body = if body.dynamic {
            RigidBody::Dynamic
        } else {
            RigidBody::Fixed
        };
        let gravity_scale = if body.affected_by_gravity { 1.0 } else { 0.0 };
        let mut entity = self.commands.spawn((
            Ball,
            BallRadius(ball.radius),
            order,
            PlaygroundEntity,
            Transform::from_translation(ball.position.extend(0.0)),
            rigid_body,
            Collider::ball(body.collision_radius),
            Restitution::coefficient(body.restitution),
            Friction::coefficient(self.cfg.balls.friction),
            Damping {
                linear_damping: self.cfg.balls.linear_damping,
                angular_damping: 0.0,
            },
            GravityScale(gravity_scale),
            Velocity::zero(),
            Name::new("Ball"),
        ));
        match self.visuals.as_deref() {
            Some(visuals) => {
                let mesh = visuals.circle.clone();
                let material = visuals.material(ball.swatch.index);
                entity.with_children(|parent| {
                    parent.spawn((
                        BallCircleVisual,
                        Mesh2d(mesh),
                        MeshMaterial2d(material),
                        // Child scale only; scaling the body would scale its collider too.
                        Transform::from_scale(Vec3::splat(ball.radius)),
                    ));
                });
            }
            None => warn!("ball visuals not ready; spawning invisible ball"),
        }
        entity.id()
    }

    fn node_at(&self, point: Vec2) -> Option<SceneNode> {
        topmost_at(self.candidates(), point)
    }

    fn set_position(&mut self, node: Entity, point: Vec2) {
        if let Ok((_, mut tf, ..)) = self.balls.get_mut(node) {
            tf.translation.x = point.x;
            tf.translation.y = point.y;
        }
    }

    fn ball_nodes(&self) -> Vec<Entity> {
        self.balls.iter().map(|(entity, ..)| entity).collect()
    }

    fn remove_node(&mut self, node: Entity) {
        if self.balls.contains(node) || self.controls.contains(node) {
            self.commands.entity(node).despawn();
        }
    }

    fn set_control_label_alpha(&mut self, control: ControlKind, alpha: f32) {
        for (label, mut color) in self.labels.iter_mut() {
            if label.0 == control {
                color.0.set_alpha(alpha);
            }
        }
    }
}

impl PhysicsHost for PlaygroundWorld<'_, '_> {
    fn gravity(&self) -> Vec2 {
        self.gravity.0
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        if self.gravity.0 != gravity {
            self.gravity.0 = gravity;
        }
    }

    fn velocity(&self, body: Entity) -> Option<Vec2> {
        self.balls.get(body).ok().map(|(_, _, v, ..)| v.linvel)
    }

    fn set_velocity(&mut self, body: Entity, velocity: Vec2) {
        if let Ok((_, _, mut v, ..)) = self.balls.get_mut(body) {
            v.linvel = velocity;
        }
    }
}
