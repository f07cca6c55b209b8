use bevy::prelude::*;

/// Phase of a single touch point for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

/// One touch point as seen by the tracker.
///
/// Positions are in logical pixels with the origin at the bottom-left corner
/// of the screen, so a finger dragged upwards has a positive `delta.y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub id: u64,
    pub position: Vec2,
    pub delta: Vec2,
    pub phase: TouchPhase,
}

impl TouchSample {
    pub fn new(id: u64, position: Vec2, delta: Vec2, phase: TouchPhase) -> Self {
        Self {
            id,
            position,
            delta,
            phase,
        }
    }
}

/// Splits the screen into a move half (left) and a look half (right) and
/// follows at most one finger on each side.
#[derive(Component, Debug, Clone, Default)]
pub struct TouchTracker {
    half_width: f32,
    move_finger: Option<u64>,
    look_finger: Option<u64>,
    move_origin: Vec2,
    move_input: Vec2,
    look_input: Vec2,
}

impl TouchTracker {
    pub fn new(screen_width: f32) -> Self {
        Self {
            half_width: screen_width / 2.0,
            ..default()
        }
    }

    /// Applies every sample of the frame in order.
    ///
    /// `sensitivity` and `delta_seconds` only scale look input.
    pub fn process<I>(&mut self, samples: I, sensitivity: f32, delta_seconds: f32)
    where
        I: IntoIterator<Item = TouchSample>,
    {
        for sample in samples {
            match sample.phase {
                TouchPhase::Began => self.begin(sample.id, sample.position),
                TouchPhase::Ended | TouchPhase::Canceled => self.release(sample.id),
                TouchPhase::Moved => {
                    if Some(sample.id) == self.look_finger {
                        self.look_input = sample.delta * sensitivity * delta_seconds;
                    }
                    if Some(sample.id) == self.move_finger {
                        self.move_input = sample.position - self.move_origin;
                    }
                }
                TouchPhase::Stationary => {
                    if Some(sample.id) == self.look_finger {
                        self.look_input = Vec2::ZERO;
                    }
                }
            }
        }
    }

    fn begin(&mut self, id: u64, position: Vec2) {
        if position.x < self.half_width && self.move_finger.is_none() {
            self.move_finger = Some(id);
            self.move_origin = position;
            self.move_input = Vec2::ZERO;
            debug!("Tracking move finger {id} from {position}");
        } else if position.x > self.half_width && self.look_finger.is_none() {
            self.look_finger = Some(id);
            self.look_input = Vec2::ZERO;
            debug!("Tracking look finger {id}");
        }
    }

    fn release(&mut self, id: u64) {
        if Some(id) == self.move_finger {
            self.move_finger = None;
            self.move_input = Vec2::ZERO;
            debug!("Stopped tracking move finger {id}");
        } else if Some(id) == self.look_finger {
            self.look_finger = None;
            self.look_input = Vec2::ZERO;
            debug!("Stopped tracking look finger {id}");
        }
    }

    /// Drops both fingers, e.g. when the window loses focus and the end
    /// events will never arrive.
    pub fn reset(&mut self) {
        if self.move_finger.is_some() || self.look_finger.is_some() {
            debug!("Releasing all tracked fingers");
        }
        self.move_finger = None;
        self.look_finger = None;
        self.move_input = Vec2::ZERO;
        self.look_input = Vec2::ZERO;
    }

    pub fn move_finger(&self) -> Option<u64> {
        self.move_finger
    }

    pub fn look_finger(&self) -> Option<u64> {
        self.look_finger
    }

    pub fn move_origin(&self) -> Vec2 {
        self.move_origin
    }

    /// Displacement of the move finger from where it first touched.
    pub fn move_input(&self) -> Vec2 {
        self.move_input
    }

    /// Look rotation in degrees requested this frame.
    pub fn look_input(&self) -> Vec2 {
        self.look_input
    }

    pub fn is_moving(&self) -> bool {
        self.move_finger.is_some()
    }

    pub fn is_looking(&self) -> bool {
        self.look_finger.is_some()
    }
}
