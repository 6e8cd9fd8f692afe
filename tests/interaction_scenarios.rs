// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end touch scenarios against the in-memory scene host.

use ball_playground::interaction::controller::{ControllerSettings, DragState, InteractionController};
use ball_playground::interaction::headless::HeadlessScene;
use ball_playground::interaction::hosts::{ControlKind, MotionHost, PhysicsHost, SceneHost};
use ball_playground::interaction::motion::{MotionSession, SharedAccelerometer};
use bevy::prelude::*;

const DELETE: Vec2 = Vec2::new(44.0, 44.0);
const GRAVITY: Vec2 = Vec2::new(100.0, 44.0);

fn playground() -> (InteractionController, HeadlessScene, MotionSession<SharedAccelerometer>) {
    let mut ctl = InteractionController::new(ControllerSettings::default(), Some(7));
    let mut scene = HeadlessScene::new();
    let session = ctl.initialize(
        &mut scene,
        Rect::new(0.0, 0.0, 400.0, 600.0),
        SharedAccelerometer::new(),
    );
    (ctl, scene, session)
}

fn tap(ctl: &mut InteractionController, scene: &mut HeadlessScene, p: Vec2) {
    ctl.on_touch_begin(scene, p);
    ctl.on_touch_end(scene, p, p);
}

#[test]
fn tap_drag_and_fling() {
    let (mut ctl, mut scene, _session) = playground();

    ctl.on_touch_begin(&mut scene, Vec2::new(100.0, 100.0));
    assert_eq!(scene.ball_count(), 1);
    let ball = scene.ball_nodes()[0];
    assert_eq!(ctl.drag_state(), DragState::Idle);

    // First move adopts the ball under the finger without moving it.
    ctl.on_touch_move(&mut scene, Vec2::new(110.0, 100.0), Vec2::new(100.0, 100.0));
    assert_eq!(ctl.drag_state(), DragState::Dragging(ball));
    assert_eq!(scene.position(ball), Some(Vec2::new(100.0, 100.0)));

    ctl.on_touch_move(&mut scene, Vec2::new(150.0, 100.0), Vec2::new(110.0, 100.0));
    ctl.on_touch_move(&mut scene, Vec2::new(200.0, 100.0), Vec2::new(150.0, 100.0));
    assert_eq!(scene.position(ball), Some(Vec2::new(200.0, 100.0)));
    assert_eq!(scene.velocity(ball), Some(Vec2::new(3500.0, 0.0)));

    ctl.on_touch_end(&mut scene, Vec2::new(220.0, 100.0), Vec2::new(200.0, 100.0));
    assert_eq!(scene.velocity(ball), Some(Vec2::new(1400.0, 0.0)));
    assert_eq!(ctl.drag_state(), DragState::Idle);
    assert_eq!(scene.ball_count(), 1);
}

#[test]
fn every_new_ball_uses_the_configured_body() {
    let (mut ctl, mut scene, _session) = playground();
    for x in [150.0, 200.0, 250.0] {
        tap(&mut ctl, &mut scene, Vec2::new(x, 300.0));
    }
    assert_eq!(scene.ball_count(), 3);
    for ball in scene.ball_nodes() {
        let spec = scene.ball_spec(ball).expect("ball");
        assert_eq!(spec.radius, 20.0);
        assert_eq!(spec.body.collision_radius, 22.0);
        assert_eq!(spec.body.restitution, 0.6);
        assert!(spec.body.dynamic && spec.body.affected_by_gravity);
    }
}

#[test]
fn delete_leaves_only_boundary_and_controls() {
    let (mut ctl, mut scene, _session) = playground();
    for x in [150.0, 200.0, 250.0, 300.0] {
        tap(&mut ctl, &mut scene, Vec2::new(x, 300.0));
    }
    assert_eq!(scene.ball_count(), 4);

    ctl.on_touch_begin(&mut scene, DELETE);
    ctl.on_touch_end(&mut scene, DELETE, DELETE);
    assert_eq!(scene.ball_count(), 0);
    assert_eq!(scene.non_ball_count(), 3);
}

#[test]
fn releasing_a_drag_over_delete_removes_the_dragged_ball_too() {
    let (mut ctl, mut scene, _session) = playground();
    ctl.on_touch_begin(&mut scene, Vec2::new(200.0, 200.0));
    ctl.on_touch_begin(&mut scene, Vec2::new(200.0, 200.0));
    assert!(ctl.dragged_ball().is_some());
    ctl.on_touch_end(&mut scene, DELETE, Vec2::new(50.0, 50.0));
    assert_eq!(scene.ball_count(), 0);
    assert_eq!(ctl.drag_state(), DragState::Idle);
}

#[test]
fn toggling_twice_restores_zero_gravity_and_dim_label() {
    let (mut ctl, mut scene, session) = playground();
    session.host().publish(Vec3::new(0.3, 0.6, -0.7));

    tap(&mut ctl, &mut scene, GRAVITY);
    assert!(ctl.gravity_enabled());
    ctl.per_frame_update(&mut scene, &session, 0.016);
    assert_ne!(scene.gravity(), Vec2::ZERO);

    tap(&mut ctl, &mut scene, GRAVITY);
    assert!(!ctl.gravity_enabled());
    assert_eq!(scene.gravity(), Vec2::ZERO);
    assert_eq!(scene.label_alpha(ControlKind::Gravity), Some(0.1));
    assert_eq!(scene.label_alpha(ControlKind::Delete), Some(1.0));
    assert_eq!(scene.ball_count(), 0);
}

#[test]
fn tilt_maps_device_axes_onto_screen_gravity() {
    let (mut ctl, mut scene, session) = playground();
    ctl.toggle_gravity_mode(&mut scene);
    for (ax, ay) in [(0.0, -1.0), (1.0, 0.0), (-0.5, 0.25)] {
        session.host().publish(Vec3::new(ax, ay, 0.0));
        ctl.per_frame_update(&mut scene, &session, 0.0);
        assert_eq!(scene.gravity(), Vec2::new(20.0 * ay, 20.0 * ax));
    }
}

#[test]
fn sensor_stream_lives_as_long_as_the_session() {
    let (_ctl, _scene, session) = playground();
    let sensor = session.host().clone();
    assert!(sensor.is_active());
    sensor.publish(Vec3::X);
    assert_eq!(session.latest_sample(), Some(Vec3::X));

    drop(session);
    assert!(!sensor.is_active());
    sensor.publish(Vec3::Y);
    assert_eq!(sensor.latest_sample(), None);
}
