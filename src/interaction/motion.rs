// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Accelerometer plumbing: a last-sample-wins buffer that any thread can
//! publish into, and a scoped session that keeps the stream running only
//! while it is alive.

use bevy::prelude::*;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use super::hosts::MotionHost;

/// Device lying flat, screen up.
pub const RESTING_SAMPLE: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Cloneable handle to one accelerometer stream. Clones share the buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedAccelerometer {
    latest: Arc<Mutex<Option<Vec3>>>,
    active: Arc<AtomicBool>,
}

impl SharedAccelerometer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Producer side. Samples are dropped while the stream is stopped.
    pub fn publish(&self, sample: Vec3) {
        if !self.is_active() {
            return;
        }
        if let Ok(mut latest) = self.latest.lock() {
            *latest = Some(sample);
        }
    }
}

impl MotionHost for SharedAccelerometer {
    fn start_updates(&mut self) {
        self.active.store(true, Ordering::Release);
    }

    fn stop_updates(&mut self) {
        self.active.store(false, Ordering::Release);
        if let Ok(mut latest) = self.latest.lock() {
            *latest = None;
        }
    }

    fn latest_sample(&self) -> Option<Vec3> {
        self.latest.lock().ok().and_then(|s| *s)
    }
}

/// Running sensor stream. Started on construction, stopped on drop.
#[derive(Debug)]
pub struct MotionSession<M: MotionHost> {
    host: M,
}

impl<M: MotionHost> MotionSession<M> {
    pub fn begin(mut host: M) -> Self {
        host.start_updates();
        debug!("motion stream started");
        Self { host }
    }

    pub fn host(&self) -> &M {
        &self.host
    }
}

impl<M: MotionHost> MotionHost for MotionSession<M> {
    fn start_updates(&mut self) {
        self.host.start_updates();
    }

    fn stop_updates(&mut self) {
        self.host.stop_updates();
    }

    fn latest_sample(&self) -> Option<Vec3> {
        self.host.latest_sample()
    }
}

impl<M: MotionHost> Drop for MotionSession<M> {
    fn drop(&mut self) {
        self.host.stop_updates();
        debug!("motion stream stopped");
    }
}

/// The playground's live sensor session. Removing the resource stops the stream.
#[derive(Resource, Deref)]
pub struct ActiveMotion(pub MotionSession<SharedAccelerometer>);

/// Simulated tilt from held arrow keys, for hosts without an accelerometer.
/// Axes follow the device convention consumed by the controller:
/// `x` tilts gravity along screen y, `y` along screen x.
pub fn keyboard_tilt(keys: &ButtonInput<KeyCode>) -> Vec3 {
    let axis = |neg: KeyCode, pos: KeyCode| {
        (keys.pressed(pos) as i32 - keys.pressed(neg) as i32) as f32
    };
    let toward_x = axis(KeyCode::ArrowLeft, KeyCode::ArrowRight);
    let toward_y = axis(KeyCode::ArrowDown, KeyCode::ArrowUp);
    let planar = Vec2::new(toward_y, toward_x).clamp_length_max(1.0);
    let z = -(1.0 - planar.length_squared()).max(0.0).sqrt();
    Vec3::new(planar.x, planar.y, z)
}

pub(crate) fn feed_keyboard_tilt(keys: Res<ButtonInput<KeyCode>>, motion: Option<Res<ActiveMotion>>) {
    let Some(motion) = motion else {
        return;
    };
    motion.host().publish(keyboard_tilt(&keys));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_scopes_the_stream() {
        let sensor = SharedAccelerometer::new();
        {
            let _session = MotionSession::begin(sensor.clone());
            assert!(sensor.is_active());
            sensor.publish(Vec3::X);
            assert_eq!(sensor.latest_sample(), Some(Vec3::X));
        }
        assert!(!sensor.is_active());
        assert_eq!(sensor.latest_sample(), None);
    }

    #[test]
    fn samples_while_stopped_are_dropped() {
        let sensor = SharedAccelerometer::new();
        sensor.publish(Vec3::Y);
        assert_eq!(sensor.latest_sample(), None);
    }

    #[test]
    fn last_sample_wins() {
        let session = MotionSession::begin(SharedAccelerometer::new());
        session.host().publish(Vec3::X);
        session.host().publish(Vec3::Y);
        assert_eq!(session.latest_sample(), Some(Vec3::Y));
    }

    #[test]
    fn publishing_from_another_thread() {
        let session = MotionSession::begin(SharedAccelerometer::new());
        let producer = session.host().clone();
        std::thread::spawn(move || producer.publish(Vec3::new(0.5, -0.5, -0.7)))
            .join()
            .expect("producer thread");
        assert_eq!(session.latest_sample(), Some(Vec3::new(0.5, -0.5, -0.7)));
    }

    #[test]
    fn keyboard_tilt_rests_flat_and_tilts_with_arrows() {
        let mut keys = ButtonInput::<KeyCode>::default();
        assert_eq!(keyboard_tilt(&keys), RESTING_SAMPLE);
        keys.press(KeyCode::ArrowRight);
        let s = keyboard_tilt(&keys);
        // gravity.x follows sample.y
        assert_eq!(s.y, 1.0);
        assert_eq!(s.x, 0.0);
    }

    #[test]
    fn removing_resource_stops_stream() {
        let sensor = SharedAccelerometer::new();
        let mut app = App::new();
        app.insert_resource(ActiveMotion(MotionSession::begin(sensor.clone())));
        assert!(sensor.is_active());
        app.world_mut().remove_resource::<ActiveMotion>();
        assert!(!sensor.is_active());
    }
}
