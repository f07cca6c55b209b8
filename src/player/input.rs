use bevy::{
    input::touch::{Touch, Touches},
    prelude::*,
    utils::HashMap,
    window::{PrimaryWindow, WindowFocused},
};

use super::{
    settings::PlayerSettings,
    touch::{TouchPhase, TouchSample, TouchTracker},
    Player,
};

/// Last position seen for every finger still on the screen.
///
/// Bevy only refreshes a touch's previous position when it receives a move
/// event, so its `delta()` goes stale once the finger stops. Deltas are
/// recomputed here against the previous frame instead.
#[derive(Resource, Default, Debug)]
pub struct TouchHistory {
    last: HashMap<u64, Vec2>,
}

impl TouchHistory {
    pub fn began(&mut self, id: u64, position: Vec2) -> TouchSample {
        self.last.insert(id, position);
        TouchSample::new(id, position, Vec2::ZERO, TouchPhase::Began)
    }

    pub fn held(&mut self, id: u64, position: Vec2) -> TouchSample {
        let previous = self.last.insert(id, position).unwrap_or(position);
        let delta = position - previous;
        let phase = if delta == Vec2::ZERO {
            TouchPhase::Stationary
        } else {
            TouchPhase::Moved
        };
        TouchSample::new(id, position, delta, phase)
    }

    pub fn lifted(&mut self, id: u64, position: Vec2, canceled: bool) -> TouchSample {
        let previous = self.last.remove(&id).unwrap_or(position);
        let phase = if canceled {
            TouchPhase::Canceled
        } else {
            TouchPhase::Ended
        };
        TouchSample::new(id, position, position - previous, phase)
    }

    pub fn clear(&mut self) {
        self.last.clear();
    }

    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}

/// Converts a window position (origin top-left, y down) into screen space
/// (origin bottom-left, y up).
pub fn to_screen_space(position: Vec2, screen_height: f32) -> Vec2 {
    Vec2::new(position.x, screen_height - position.y)
}

fn collect_samples(
    touches: &Touches,
    history: &mut TouchHistory,
    screen_height: f32,
) -> Vec<TouchSample> {
    let position = |touch: &Touch| to_screen_space(touch.position(), screen_height);
    let mut samples = Vec::new();

    for touch in touches.iter_just_pressed() {
        samples.push(history.began(touch.id(), position(touch)));
    }
    for touch in touches.iter() {
        if !touches.just_pressed(touch.id()) {
            samples.push(history.held(touch.id(), position(touch)));
        }
    }
    for touch in touches.iter_just_released() {
        samples.push(history.lifted(touch.id(), position(touch), false));
    }
    for touch in touches.iter_just_canceled() {
        samples.push(history.lifted(touch.id(), position(touch), true));
    }

    samples
}

pub fn touch_input(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    settings: Res<PlayerSettings>,
    mut history: ResMut<TouchHistory>,
    mut player: Query<&mut TouchTracker, With<Player>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok(mut tracker) = player.get_single_mut() else {
        return;
    };

    let samples = collect_samples(&touches, &mut history, window.height());
    tracker.process(
        samples,
        settings.0.camera_sensitivity,
        time.delta_seconds(),
    );
}

/// Touch end events are lost when the app is backgrounded, so fingers are
/// released as soon as focus goes away, and their last positions forgotten.
pub fn release_on_focus_lost(
    mut focus_events: EventReader<WindowFocused>,
    mut history: ResMut<TouchHistory>,
    mut player: Query<&mut TouchTracker, With<Player>>,
) {
    if focus_events.read().any(|event| !event.focused) {
        history.clear();
        for mut tracker in player.iter_mut() {
            tracker.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_space_flips_y() {
        assert_eq!(
            to_screen_space(Vec2::new(120.0, 100.0), 800.0),
            Vec2::new(120.0, 700.0)
        );
    }

    #[test]
    fn held_touch_without_travel_is_stationary() {
        let mut history = TouchHistory::default();
        history.began(9, Vec2::new(10.0, 10.0));

        let sample = history.held(9, Vec2::new(10.0, 10.0));
        assert_eq!(sample.phase, TouchPhase::Stationary);
        assert_eq!(sample.delta, Vec2::ZERO);
    }

    #[test]
    fn held_touch_reports_delta_since_last_frame() {
        let mut history = TouchHistory::default();
        history.began(9, Vec2::new(10.0, 10.0));
        history.held(9, Vec2::new(15.0, 10.0));

        let sample = history.held(9, Vec2::new(18.0, 6.0));
        assert_eq!(sample.phase, TouchPhase::Moved);
        assert_eq!(sample.delta, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn lifted_touch_is_forgotten() {
        let mut history = TouchHistory::default();
        history.began(1, Vec2::new(10.0, 10.0));
        history.began(2, Vec2::new(500.0, 10.0));

        assert_eq!(
            history.lifted(1, Vec2::new(12.0, 10.0), false).phase,
            TouchPhase::Ended
        );
        assert_eq!(
            history.lifted(2, Vec2::new(500.0, 10.0), true).phase,
            TouchPhase::Canceled
        );

        // A finger reusing the id starts fresh.
        let sample = history.held(1, Vec2::new(40.0, 40.0));
        assert_eq!(sample.delta, Vec2::ZERO);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn cleared_history_forgets_every_finger() {
        let mut history = TouchHistory::default();
        history.began(1, Vec2::new(10.0, 10.0));
        history.began(2, Vec2::new(500.0, 10.0));

        history.clear();
        assert!(history.is_empty());

        // A finger still down after the clear restarts without a jump.
        let sample = history.held(2, Vec2::new(560.0, 30.0));
        assert_eq!(sample.delta, Vec2::ZERO);
        assert_eq!(sample.phase, TouchPhase::Stationary);
    }
}
