// This file is part of Ball Playground.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bevy touch / mouse input → world-space gesture events for the controller.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Moved,
    Ended,
}

/// One step of the primary pointer's gesture, in world coordinates.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TouchGesture {
    pub phase: GesturePhase,
    pub position: Vec2,
    pub previous: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerSource {
    Touch(u64),
    Mouse,
}

/// Tracks the single pointer that owns the current gesture.
#[derive(Resource, Debug, Default)]
pub struct GestureTracker {
    source: Option<PointerSource>,
    last: Option<Vec2>,
}

impl GestureTracker {
    pub fn is_tracking(&self) -> bool {
        self.source.is_some()
    }

    fn press(&mut self, source: PointerSource, pos: Vec2) -> Option<TouchGesture> {
        if self.source.is_some() {
            return None;
        }
        self.source = Some(source);
        self.last = Some(pos);
        Some(TouchGesture {
            phase: GesturePhase::Began,
            position: pos,
            previous: pos,
        })
    }

    fn drag(&mut self, source: PointerSource, pos: Vec2) -> Option<TouchGesture> {
        if self.source != Some(source) {
            return None;
        }
        let previous = self.last?;
        if previous == pos {
            return None;
        }
        self.last = Some(pos);
        Some(TouchGesture {
            phase: GesturePhase::Moved,
            position: pos,
            previous,
        })
    }

    fn release(&mut self, source: PointerSource, pos: Vec2) -> Option<TouchGesture> {
        if self.source != Some(source) {
            return None;
        }
        let previous = self.last.unwrap_or(pos);
        self.source = None;
        self.last = None;
        Some(TouchGesture {
            phase: GesturePhase::Ended,
            position: pos,
            previous,
        })
    }

    pub fn touch_pressed(&mut self, id: u64, pos: Vec2) -> Option<TouchGesture> {
        self.press(PointerSource::Touch(id), pos)
    }

    pub fn touch_moved(&mut self, id: u64, pos: Vec2) -> Option<TouchGesture> {
        self.drag(PointerSource::Touch(id), pos)
    }

    /// Release or cancel.
    pub fn touch_ended(&mut self, id: u64, pos: Vec2) -> Option<TouchGesture> {
        self.release(PointerSource::Touch(id), pos)
    }

    pub fn mouse_pressed(&mut self, pos: Vec2) -> Option<TouchGesture> {
        self.press(PointerSource::Mouse, pos)
    }

    pub fn mouse_moved(&mut self, pos: Vec2) -> Option<TouchGesture> {
        self.drag(PointerSource::Mouse, pos)
    }

    pub fn mouse_released(&mut self, pos: Vec2) -> Option<TouchGesture> {
        self.release(PointerSource::Mouse, pos)
    }

    pub fn mouse_lost(&mut self) -> Option<TouchGesture> {
        let pos = self.last?;
        self.release(PointerSource::Mouse, pos)
    }
}

/// Convert a window position (logical pixels, top-left origin) to world coordinates.
fn to_world(camera_q: &Query<(&Camera, &GlobalTransform)>, screen_pos: Vec2) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?; // single camera assumption
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

pub fn emit_touch_gestures(
    touches: Res<Touches>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut tracker: ResMut<GestureTracker>,
    mut writer: EventWriter<TouchGesture>,
) {
    let mut emit = |g: Option<TouchGesture>| {
        if let Some(g) = g {
            trace!(phase = ?g.phase, x = g.position.x, y = g.position.y, "gesture");
            writer.write(g);
        }
    };

    // Touches take priority over the mouse.
    for touch in touches.iter_just_pressed() {
        if let Some(pos) = to_world(&camera_q, touch.position()) {
            emit(tracker.touch_pressed(touch.id(), pos));
        }
    }
    for touch in touches.iter() {
        if let Some(pos) = to_world(&camera_q, touch.position()) {
            emit(tracker.touch_moved(touch.id(), pos));
        }
    }
    for touch in touches.iter_just_released().chain(touches.iter_just_canceled()) {
        if let Some(pos) = to_world(&camera_q, touch.position()) {
            emit(tracker.touch_ended(touch.id(), pos));
        }
    }

    let cursor = windows
        .single()
        .ok()
        .and_then(|w| w.cursor_position())
        .and_then(|c| to_world(&camera_q, c));
    if let Some(pos) = cursor {
        if buttons.just_pressed(MouseButton::Left) {
            emit(tracker.mouse_pressed(pos));
        }
        if buttons.pressed(MouseButton::Left) {
            emit(tracker.mouse_moved(pos));
        }
    }
    if buttons.just_released(MouseButton::Left) {
        match cursor {
            Some(pos) => emit(tracker.mouse_released(pos)),
            // Released outside the window: end where the pointer was last seen.
            None => emit(tracker.mouse_lost()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_drag_release_sequence() {
        let mut t = GestureTracker::default();
        let began = t.touch_pressed(1, Vec2::new(100.0, 100.0)).expect("began");
        assert_eq!(began.phase, GesturePhase::Began);
        assert_eq!(began.previous, began.position);

        let moved = t.touch_moved(1, Vec2::new(150.0, 100.0)).expect("moved");
        assert_eq!(moved.previous, Vec2::new(100.0, 100.0));
        let moved = t.touch_moved(1, Vec2::new(200.0, 100.0)).expect("moved");
        assert_eq!(moved.previous, Vec2::new(150.0, 100.0));

        let ended = t.touch_ended(1, Vec2::new(220.0, 100.0)).expect("ended");
        assert_eq!(ended.phase, GesturePhase::Ended);
        assert_eq!(ended.previous, Vec2::new(200.0, 100.0));
        assert!(!t.is_tracking());
    }

    #[test]
    fn stationary_pointer_emits_no_move() {
        let mut t = GestureTracker::default();
        t.mouse_pressed(Vec2::ZERO);
        assert!(t.mouse_moved(Vec2::ZERO).is_none());
    }

    #[test]
    fn mouse_lost_ends_at_last_position() {
        let mut t = GestureTracker::default();
        t.mouse_pressed(Vec2::ZERO);
        t.mouse_moved(Vec2::new(10.0, 0.0));
        let ended = t.mouse_lost().expect("ended");
        assert_eq!(ended.position, Vec2::new(10.0, 0.0));
        assert!(!t.is_tracking());
    }

    #[test]
    fn second_pointer_is_ignored_while_tracking() {
        let mut t = GestureTracker::default();
        t.touch_pressed(1, Vec2::ZERO);
        assert!(t.touch_pressed(2, Vec2::ONE).is_none());
        assert!(t.mouse_pressed(Vec2::ONE).is_none());
        assert!(t.touch_moved(2, Vec2::X).is_none());
        assert!(t.touch_ended(2, Vec2::X).is_none());
        assert!(t.is_tracking());
    }

    #[test]
    fn events_flow_through_app() {
        let mut app = App::new();
        app.add_event::<TouchGesture>();
        let mut t = GestureTracker::default();
        let g = t.mouse_pressed(Vec2::new(3.0, 4.0)).expect("began");
        app.world_mut().send_event(g);
        let events = app.world().resource::<Events<TouchGesture>>();
        let mut reader = events.get_cursor();
        let got: Vec<_> = reader.read(events).copied().collect();
        assert_eq!(got, vec![g]);
    }
}
