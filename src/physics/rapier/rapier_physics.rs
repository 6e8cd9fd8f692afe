// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;
use crate::core::system::system_order::PostPhysicsAdjustSet;

/// Global gravity as the controller sees it (meters/s^2).
/// Mirrored into Rapier's configuration, scaled by pixels per meter.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct WorldGravity(pub Vec2);

pub struct PhysicsSetupPlugin; // our wrapper to configure Rapier & world gravity

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        let (ppm, debug_render) = app
            .world()
            .get_resource::<GameConfig>()
            .map(|c| (c.physics.pixels_per_meter, c.physics.debug_render))
            .unwrap_or((150.0, false));
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(ppm))
            .init_resource::<WorldGravity>()
            .add_systems(Update, sync_world_gravity.in_set(PostPhysicsAdjustSet));
        if debug_render {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

pub fn sync_world_gravity(
    gravity: Res<WorldGravity>,
    cfg: Res<GameConfig>,
    mut rapier: Query<&mut RapierConfiguration>,
) {
    let target = gravity.0 * cfg.physics.pixels_per_meter;
    for mut rc in rapier.iter_mut() {
        if rc.gravity != target {
            rc.gravity = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_is_scaled_into_rapier() {
        let mut app = App::new();
        app.insert_resource(GameConfig::default())
            .insert_resource(WorldGravity(Vec2::new(0.0, -2.0)))
            .add_systems(Update, sync_world_gravity);
        let ctx = app.world_mut().spawn(RapierConfiguration::new(1.0)).id();
        app.update();
        let rc = app.world().get::<RapierConfiguration>(ctx).expect("config");
        assert_eq!(rc.gravity, Vec2::new(0.0, -300.0));
    }
}
