use bevy::prelude::*;

use super::{touch::TouchTracker, Player};

/// Pitch limit in degrees, both up and down.
pub const PITCH_LIMIT: f32 = 90.0;

/// First person camera, parented to the player body.
///
/// `pitch` is in degrees; positive values tilt the view downwards.
#[derive(Component, Debug, Default)]
pub struct FPSCamera {
    pub pitch: f32,
}

impl FPSCamera {
    /// Turns the body by `look.x` degrees and tilts the camera by `look.y`.
    ///
    /// Yaw is composed onto the body's current rotation so small increments
    /// accumulate. The camera only ever carries pitch; it inherits yaw from
    /// its parent.
    pub fn look(&mut self, look: Vec2, body: &mut Transform, camera: &mut Transform) {
        self.pitch = (self.pitch - look.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        // Positive x turns right, which is a clockwise turn around +Y.
        body.rotation *= Quat::from_rotation_y(-look.x.to_radians());
        camera.rotation = Quat::from_rotation_x(-self.pitch.to_radians());
    }
}

pub fn look(
    mut player: Query<(&TouchTracker, &mut Transform), With<Player>>,
    mut camera: Query<(&mut FPSCamera, &mut Transform), Without<Player>>,
) {
    let Ok((tracker, mut body)) = player.get_single_mut() else {
        return;
    };
    if !tracker.is_looking() {
        return;
    }
    let Ok((mut fps_camera, mut camera_transform)) = camera.get_single_mut() else {
        return;
    };

    fps_camera.look(tracker.look_input(), &mut body, &mut camera_transform);
}
