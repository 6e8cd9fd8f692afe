// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Touch/sensor → scene & physics translation.
//!
//! The controller owns only interaction state (mode flag, drag reference, RNG).
//! Everything it touches lives behind the host traits, so the same logic runs
//! against Bevy/Rapier or the in-memory host used by tests.

use bevy::color::Alpha;
use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use super::hosts::{
    BallSpec, BodySpec, ControlKind, ControlSpec, MotionHost, NodeKind, PhysicsHost, SceneHost,
};
use super::motion::MotionSession;
use crate::core::config::GameConfig;
use crate::rendering::palette::palette::random_swatch;

/// Tunables read by the controller. Built from `GameConfig`; replaceable at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    pub background: Color,
    pub ball_radius: f32,
    pub collider_padding: f32,
    pub restitution: f32,
    pub fling_scale: f32,
    pub tilt_scale: f32,
    pub control_size: f32,
    /// Control centers relative to the frame's bottom-left corner.
    pub delete_position: Vec2,
    pub gravity_position: Vec2,
    pub control_z: f32,
    pub control_fill: Color,
    pub control_font_size: f32,
    pub label_dim_alpha: f32,
    pub label_lit_alpha: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

impl From<&GameConfig> for ControllerSettings {
    fn from(cfg: &GameConfig) -> Self {
        let c = &cfg.controls;
        Self {
            background: cfg.background.to_color(),
            ball_radius: cfg.balls.radius,
            collider_padding: cfg.balls.collider_padding,
            restitution: cfg.balls.restitution,
            fling_scale: cfg.interactions.fling_scale,
            tilt_scale: cfg.interactions.tilt_scale,
            control_size: c.size,
            delete_position: c.delete_position.into(),
            gravity_position: c.gravity_position.into(),
            control_z: c.z,
            control_fill: c.fill.to_color().with_alpha(c.fill_alpha),
            control_font_size: c.font_size,
            label_dim_alpha: c.label_dim_alpha,
            label_lit_alpha: c.label_lit_alpha,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Non-owning: the scene may have removed the ball; hosts ignore stale ids.
    Dragging(Entity),
}

#[derive(Resource, Debug)]
pub struct InteractionController {
    settings: ControllerSettings,
    gravity_enabled: bool,
    drag: DragState,
    rng: StdRng,
}

impl InteractionController {
    pub fn new(settings: ControllerSettings, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            settings,
            gravity_enabled: false,
            drag: DragState::Idle,
            rng,
        }
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Swap tunables without touching mode or drag state.
    pub fn set_settings(&mut self, settings: ControllerSettings) {
        self.settings = settings;
    }

    pub fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn dragged_ball(&self) -> Option<Entity> {
        match self.drag {
            DragState::Idle => None,
            DragState::Dragging(e) => Some(e),
        }
    }

    /// Populate the scene (boundary + two controls), zero gravity and start the
    /// sensor stream. The stream lives exactly as long as the returned session.
    pub fn initialize<H, M>(&mut self, host: &mut H, frame: Rect, motion: M) -> MotionSession<M>
    where
        H: SceneHost + PhysicsHost,
        M: MotionHost,
    {
        let s = &self.settings;
        host.set_background(s.background);
        host.set_gravity(Vec2::ZERO);
        host.spawn_boundary(frame);

        let size = Vec2::splat(s.control_size);
        for (kind, offset, alpha) in [
            (ControlKind::Delete, s.delete_position, s.label_lit_alpha),
            (ControlKind::Gravity, s.gravity_position, s.label_dim_alpha),
        ] {
            host.spawn_control(ControlSpec {
                kind,
                center: frame.min + offset,
                size,
                z: s.control_z,
                fill: s.control_fill,
                label: kind.glyph(),
                label_alpha: alpha,
                font_size: s.control_font_size,
            });
        }
        info!(
            width = frame.width(),
            height = frame.height(),
            "playground initialized"
        );
        MotionSession::begin(motion)
    }

    pub fn on_touch_begin<H: SceneHost>(&mut self, host: &mut H, point: Vec2) {
        match host.node_at(point) {
            None => self.spawn_ball(host, point),
            Some(node) if node.kind == NodeKind::Ball => {
                self.drag = DragState::Dragging(node.entity);
            }
            Some(_) => {}
        }
    }

    pub fn on_touch_move<H>(&mut self, host: &mut H, point: Vec2, previous: Vec2)
    where
        H: SceneHost + PhysicsHost,
    {
        match self.drag {
            DragState::Idle => {
                if let Some(node) = host.node_at(point).filter(|n| n.kind == NodeKind::Ball) {
                    trace!(entity = ?node.entity, "drag adopted mid-gesture");
                    self.drag = DragState::Dragging(node.entity);
                }
            }
            DragState::Dragging(ball) => {
                host.set_position(ball, point);
                self.fling(host, ball, point - previous);
            }
        }
    }

    pub fn on_touch_end<H>(&mut self, host: &mut H, point: Vec2, previous: Vec2)
    where
        H: SceneHost + PhysicsHost,
    {
        match host.node_at(point).map(|n| n.kind) {
            Some(NodeKind::Control(ControlKind::Delete)) => self.remove_all_balls(host),
            Some(NodeKind::Control(ControlKind::Gravity)) => self.toggle_gravity_mode(host),
            _ => {
                if let DragState::Dragging(ball) = self.drag {
                    self.fling(host, ball, point - previous);
                }
            }
        }
        self.drag = DragState::Idle;
    }

    /// Turning the mode off zeroes gravity at once; turning it on only lights
    /// the label and leaves the vector to the next `per_frame_update`.
    pub fn toggle_gravity_mode<H>(&mut self, host: &mut H)
    where
        H: SceneHost + PhysicsHost,
    {
        self.gravity_enabled = !self.gravity_enabled;
        if self.gravity_enabled {
            host.set_control_label_alpha(ControlKind::Gravity, self.settings.label_lit_alpha);
        } else {
            host.set_gravity(Vec2::ZERO);
            host.set_control_label_alpha(ControlKind::Gravity, self.settings.label_dim_alpha);
        }
        info!(enabled = self.gravity_enabled, "gravity mode toggled");
    }

    /// Device x/y are swapped onto the screen plane. A missing sample keeps
    /// whatever gravity is currently set.
    pub fn per_frame_update<P, M>(&mut self, physics: &mut P, motion: &M, _time: f64)
    where
        P: PhysicsHost,
        M: MotionHost,
    {
        if !self.gravity_enabled {
            return;
        }
        let Some(sample) = motion.latest_sample() else {
            return;
        };
        let k = self.settings.tilt_scale;
        physics.set_gravity(Vec2::new(sample.y * k, -sample.x * -k));
    }

    fn spawn_ball<H: SceneHost>(&mut self, host: &mut H, point: Vec2) {
        let s = &self.settings;
        let swatch = random_swatch(&mut self.rng);
        let entity = host.spawn_ball(BallSpec {
            position: point,
            radius: s.ball_radius,
            swatch,
            body: BodySpec {
                collision_radius: s.ball_radius + s.collider_padding,
                restitution: s.restitution,
                dynamic: true,
                affected_by_gravity: true,
            },
        });
        debug!(?entity, x = point.x, y = point.y, color = swatch.index, "ball spawned");
    }

    fn remove_all_balls<H: SceneHost>(&mut self, host: &mut H) {
        let balls = host.ball_nodes();
        let count = balls.len();
        for ball in balls {
            host.remove_node(ball);
        }
        info!(count, "balls removed");
    }

    fn fling<P: PhysicsHost>(&self, physics: &mut P, ball: Entity, delta: Vec2) {
        physics.set_velocity(ball, delta * self.settings.fling_scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::headless::HeadlessScene;
    use crate::interaction::motion::SharedAccelerometer;

    fn setup() -> (InteractionController, HeadlessScene, MotionSession<SharedAccelerometer>) {
        let mut ctl = InteractionController::new(ControllerSettings::default(), Some(1));
        let mut scene = HeadlessScene::new();
        let frame = Rect::new(0.0, 0.0, 768.0, 1024.0);
        let session = ctl.initialize(&mut scene, frame, SharedAccelerometer::new());
        (ctl, scene, session)
    }

    #[test]
    fn initialize_creates_three_fixed_nodes_and_zero_gravity() {
        let (_, scene, session) = setup();
        assert_eq!(scene.non_ball_count(), 3);
        assert_eq!(scene.ball_count(), 0);
        assert_eq!(scene.gravity(), Vec2::ZERO);
        assert!(session.host().is_active());
        assert_eq!(scene.label_alpha(ControlKind::Gravity), Some(0.1));
    }

    #[test]
    fn initialize_lays_out_controls_from_bottom_left() {
        let (_, scene, _session) = setup();
        assert_eq!(scene.background(), Some(Color::srgb(0.33, 0.33, 0.33)));

        let delete = scene.control(ControlKind::Delete).expect("delete control");
        assert_eq!(delete.center, Vec2::new(44.0, 44.0));
        assert_eq!(delete.size, Vec2::splat(44.0));
        assert_eq!(delete.label, "x");
        assert_eq!(delete.z, 1000.0);
        assert_eq!(delete.fill, Color::srgba(0.0, 0.0, 0.0, 0.5));

        let gravity = scene.control(ControlKind::Gravity).expect("gravity control");
        assert_eq!(gravity.center, Vec2::new(100.0, 44.0));
        assert_eq!(gravity.label, "G");
        assert_eq!(gravity.label_alpha, 0.1);
    }

    #[test]
    fn tap_on_control_neither_spawns_nor_drags() {
        let (mut ctl, mut scene, _s) = setup();
        ctl.on_touch_begin(&mut scene, Vec2::new(44.0, 44.0));
        assert_eq!(scene.ball_count(), 0);
        assert_eq!(ctl.drag_state(), DragState::Idle);
    }

    #[test]
    fn begin_over_ball_starts_drag_without_spawning() {
        let (mut ctl, mut scene, _s) = setup();
        ctl.on_touch_begin(&mut scene, Vec2::new(300.0, 300.0));
        ctl.on_touch_begin(&mut scene, Vec2::new(305.0, 300.0));
        assert_eq!(scene.ball_count(), 1);
        assert!(matches!(ctl.drag_state(), DragState::Dragging(_)));
    }

    #[test]
    fn move_without_drag_adopts_ball_but_does_not_move_it() {
        let (mut ctl, mut scene, _s) = setup();
        ctl.on_touch_begin(&mut scene, Vec2::new(300.0, 300.0));
        let ball = scene.ball_nodes()[0];
        ctl.on_touch_move(&mut scene, Vec2::new(310.0, 300.0), Vec2::new(300.0, 300.0));
        assert_eq!(ctl.dragged_ball(), Some(ball));
        assert_eq!(scene.position(ball), Some(Vec2::new(300.0, 300.0)));
        assert_eq!(scene.velocity(ball), Some(Vec2::ZERO));
    }

    #[test]
    fn toggle_on_lags_gravity_until_frame_update() {
        let (mut ctl, mut scene, session) = setup();
        session.host().publish(Vec3::new(0.5, -0.25, -0.8));
        ctl.toggle_gravity_mode(&mut scene);
        assert_eq!(scene.gravity(), Vec2::ZERO);
        assert_eq!(scene.label_alpha(ControlKind::Gravity), Some(1.0));
        ctl.per_frame_update(&mut scene, &session, 0.0);
        assert_eq!(scene.gravity(), Vec2::new(-5.0, 10.0));
    }

    #[test]
    fn frame_update_ignored_when_mode_off() {
        let (mut ctl, mut scene, session) = setup();
        session.host().publish(Vec3::new(1.0, 1.0, 0.0));
        ctl.per_frame_update(&mut scene, &session, 0.0);
        assert_eq!(scene.gravity(), Vec2::ZERO);
    }

    #[test]
    fn missing_sample_keeps_previous_gravity() {
        let (mut ctl, mut scene, session) = setup();
        ctl.toggle_gravity_mode(&mut scene);
        session.host().publish(Vec3::new(0.0, 1.0, 0.0));
        ctl.per_frame_update(&mut scene, &session, 0.0);
        assert_eq!(scene.gravity(), Vec2::new(20.0, 0.0));

        let mut no_sensor = SharedAccelerometer::new();
        no_sensor.start_updates();
        ctl.per_frame_update(&mut scene, &no_sensor, 0.016);
        assert_eq!(scene.gravity(), Vec2::new(20.0, 0.0));
    }

    #[test]
    fn settings_swap_keeps_mode_and_drag() {
        let (mut ctl, mut scene, _s) = setup();
        ctl.on_touch_begin(&mut scene, Vec2::new(300.0, 300.0));
        ctl.on_touch_begin(&mut scene, Vec2::new(300.0, 300.0));
        ctl.toggle_gravity_mode(&mut scene);
        let mut next = ctl.settings().clone();
        next.fling_scale = 10.0;
        ctl.set_settings(next);
        assert!(ctl.gravity_enabled());
        assert!(ctl.dragged_ball().is_some());

        let ball = scene.ball_nodes()[0];
        ctl.on_touch_move(&mut scene, Vec2::new(302.0, 300.0), Vec2::new(300.0, 300.0));
        assert_eq!(scene.velocity(ball), Some(Vec2::new(20.0, 0.0)));
    }

    #[test]
    fn same_seed_same_colors() {
        let pick = |seed| {
            let mut ctl = InteractionController::new(ControllerSettings::default(), Some(seed));
            let mut scene = HeadlessScene::new();
            let frame = Rect::new(0.0, 0.0, 500.0, 500.0);
            let _session = ctl.initialize(&mut scene, frame, SharedAccelerometer::new());
            for i in 0..5 {
                ctl.on_touch_begin(&mut scene, Vec2::new(150.0 + 60.0 * i as f32, 300.0));
            }
            scene
                .ball_nodes()
                .into_iter()
                .filter_map(|b| scene.swatch(b).map(|s| s.index))
                .collect::<Vec<_>>()
        };
        assert_eq!(pick(42), pick(42));
    }
}
