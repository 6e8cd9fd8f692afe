// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::rendering::palette::palette::BASE_COLORS;
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct BallMaterialsInitSet;

/// Shared unit-circle mesh plus one material per palette entry.
#[derive(Resource)]
pub struct BallVisuals {
    pub circle: Handle<Mesh>,
    pub materials: Vec<Handle<ColorMaterial>>,
}

impl BallVisuals {
    pub fn material(&self, palette_index: usize) -> Handle<ColorMaterial> {
        self.materials[palette_index % self.materials.len()].clone()
    }
}

pub struct MaterialsPlugin;
impl Plugin for MaterialsPlugin {
    fn build(&self, app: &mut App) {
        // Tests often run with only MinimalPlugins; ensure required asset storages exist.
        if app.world().get_resource::<Assets<Mesh>>().is_none() {
            app.init_resource::<Assets<Mesh>>();
        }
        if app.world().get_resource::<Assets<ColorMaterial>>().is_none() {
            app.init_resource::<Assets<ColorMaterial>>();
        }
        app.add_systems(Startup, setup_ball_visuals.in_set(BallMaterialsInitSet));
    }
}

fn setup_ball_visuals(
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut commands: Commands,
) {
    let circle = meshes.add(Circle::new(1.0));
    let handles = BASE_COLORS.iter().map(|c| materials.add(*c)).collect();
    commands.insert_resource(BallVisuals {
        circle,
        materials: handles,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_material_per_palette_entry() {
        let mut app = App::new();
        app.add_plugins(MaterialsPlugin);
        app.update();
        let visuals = app.world().resource::<BallVisuals>();
        assert_eq!(visuals.materials.len(), BASE_COLORS.len());
        assert_eq!(visuals.material(BASE_COLORS.len()), visuals.materials[0]);
    }
}
