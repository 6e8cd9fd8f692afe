// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::input::InputSystem;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::controller::{ControllerSettings, InteractionController};
use super::hosts::PhysicsHost;
use super::input::pointer::{emit_touch_gestures, GesturePhase, GestureTracker, TouchGesture};
use super::motion::{feed_keyboard_tilt, ActiveMotion, SharedAccelerometer};
use crate::app::state::AppState;
use crate::core::components::PlaygroundEntity;
use crate::core::config::GameConfig;
use crate::core::system::system_order::PrePhysicsSet;
use crate::physics::world_host::{PlaygroundWorld, SpawnSequence};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TouchGesture>()
            .init_resource::<GestureTracker>()
            .init_resource::<SpawnSequence>()
            .add_systems(OnEnter(AppState::Playground), enter_playground)
            .add_systems(OnExit(AppState::Playground), exit_playground)
            .add_systems(
                PreUpdate,
                emit_touch_gestures
                    .after(InputSystem)
                    .run_if(in_state(AppState::Playground)),
            )
            .add_systems(
                Update,
                (feed_keyboard_tilt, handle_touch_gestures, apply_tilt_gravity)
                    .chain()
                    .in_set(PrePhysicsSet)
                    .run_if(in_state(AppState::Playground)),
            );
    }
}

fn enter_playground(
    cfg: Res<GameConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut world: PlaygroundWorld,
) {
    let size = windows
        .single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::new(cfg.window.width, cfg.window.height));
    let frame = Rect::from_center_size(Vec2::ZERO, size);

    let mut controller = InteractionController::new(ControllerSettings::from(&*cfg), cfg.balls.seed);
    let session = controller.initialize(&mut world, frame, SharedAccelerometer::new());
    world.commands().insert_resource(controller);
    world.commands().insert_resource(ActiveMotion(session));
}

fn exit_playground(
    mut commands: Commands,
    entities: Query<Entity, (With<PlaygroundEntity>, Without<ChildOf>)>,
) {
    // Dropping the session stops the sensor stream.
    commands.remove_resource::<ActiveMotion>();
    commands.remove_resource::<InteractionController>();
    let mut count = 0usize;
    for e in &entities {
        commands.entity(e).despawn();
        count += 1;
    }
    info!(count, "playground torn down");
}

fn handle_touch_gestures(
    mut gestures: EventReader<TouchGesture>,
    mut controller: ResMut<InteractionController>,
    mut world: PlaygroundWorld,
) {
    for g in gestures.read() {
        match g.phase {
            GesturePhase::Began => controller.on_touch_begin(&mut world, g.position),
            GesturePhase::Moved => controller.on_touch_move(&mut world, g.position, g.previous),
            GesturePhase::Ended => controller.on_touch_end(&mut world, g.position, g.previous),
        }
    }
}

fn apply_tilt_gravity(
    time: Res<Time>,
    motion: Res<ActiveMotion>,
    mut controller: ResMut<InteractionController>,
    mut world: PlaygroundWorld,
) {
    let before = world.gravity();
    controller.per_frame_update(&mut world, &motion.0, time.elapsed_secs_f64());
    let after = world.gravity();
    if before != after {
        trace!(x = after.x, y = after.y, "tilt gravity");
    }
}
