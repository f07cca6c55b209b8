use bevy::prelude::*;
use bevy_rapier3d::prelude::{
    Collider, CollisionGroups, Group, KinematicCharacterController, QueryFilter, RapierContext,
    Rot,
};

use super::{
    settings::{ControllerSettings, GroundStick, PlayerSettings},
    touch::TouchTracker,
    Player,
};

/// Movement state shared between the frame update and the fixed step.
///
/// `intent` is written every frame from touch input and read by every fixed
/// step until the next frame replaces it. Both run on the main schedule
/// thread one after the other, never at the same time.
#[derive(Component, Debug, Default, Clone)]
pub struct Motion {
    /// Squared dead zone radius in pixels, fixed when the player spawns.
    pub dead_zone_squared: f32,
    pub intent: MoveIntent,
    pub vertical_velocity: f32,
    pub grounded: bool,
}

/// Horizontal velocity requested by the move finger, in world space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MoveIntent {
    pub horizontal: Vec3,
}

impl MoveIntent {
    /// Maps the move finger displacement onto the body's ground plane.
    ///
    /// Screen up drives the body forward, screen right drives it right.
    /// Anything inside the dead zone is dropped entirely.
    pub fn from_touch(
        tracker: &TouchTracker,
        dead_zone_squared: f32,
        move_speed: f32,
        body: &Transform,
    ) -> Self {
        let input = tracker.move_input();
        if !tracker.is_moving() || input.length_squared() <= dead_zone_squared {
            return Self::default();
        }

        let direction = input.normalize() * move_speed;
        Self {
            horizontal: body.forward() * direction.y + body.right() * direction.x,
        }
    }
}

impl Motion {
    pub fn new(dead_zone_squared: f32) -> Self {
        Self {
            dead_zone_squared,
            ..default()
        }
    }

    /// Integrates vertical velocity for one fixed step.
    pub fn integrate_vertical(&mut self, grounded: bool, settings: &ControllerSettings, dt: f32) {
        self.grounded = grounded;

        if grounded && self.vertical_velocity <= 0.0 {
            self.vertical_velocity = -settings.ground_stick_bias;
            if settings.ground_stick == GroundStick::ResetOnly {
                return;
            }
        }

        self.vertical_velocity -= settings.gravity * dt;
    }

    /// Runs one fixed step and returns the displacement to hand to the
    /// character controller.
    pub fn fixed_step(&mut self, grounded: bool, settings: &ControllerSettings, dt: f32) -> Vec3 {
        self.integrate_vertical(grounded, settings, dt);
        (self.intent.horizontal + Vec3::Y * self.vertical_velocity) * dt
    }
}

/// Sphere overlap against the walkable collision groups, ignoring `exclude`.
pub fn check_ground(
    rapier_context: &RapierContext,
    center: Vec3,
    radius: f32,
    groups: Group,
    exclude: Entity,
) -> bool {
    let filter = QueryFilter::new()
        .groups(CollisionGroups::new(Group::ALL, groups))
        .exclude_collider(exclude);

    rapier_context
        .intersection_with_shape(center, Rot::IDENTITY, &Collider::ball(radius), filter)
        .is_some()
}

pub fn ground_check_center(body: &Transform, settings: &ControllerSettings) -> Vec3 {
    body.translation + body.rotation * settings.ground_check.offset()
}

pub fn movement_input(
    settings: Res<PlayerSettings>,
    mut player: Query<(&TouchTracker, &Transform, &mut Motion), With<Player>>,
) {
    for (tracker, body, mut motion) in player.iter_mut() {
        let dead_zone_squared = motion.dead_zone_squared;
        motion.intent =
            MoveIntent::from_touch(tracker, dead_zone_squared, settings.0.move_speed, body);
    }
}

pub fn movement_step(
    settings: Res<PlayerSettings>,
    time: Res<Time>,
    rapier_context: Res<RapierContext>,
    mut player: Query<
        (
            Entity,
            &Transform,
            &mut Motion,
            &mut KinematicCharacterController,
        ),
        With<Player>,
    >,
) {
    let settings = &settings.0;
    let dt = time.delta_seconds();

    for (entity, body, mut motion, mut controller) in player.iter_mut() {
        let grounded = check_ground(
            &rapier_context,
            ground_check_center(body, settings),
            settings.ground_check.radius,
            settings.ground_check.groups(),
            entity,
        );
        if grounded != motion.grounded {
            trace!("Player grounded: {grounded}");
        }

        controller.translation = Some(motion.fixed_step(grounded, settings, dt));
    }
}

#[cfg(debug_assertions)]
pub fn draw_ground_check(
    mut gizmos: Gizmos,
    settings: Res<PlayerSettings>,
    player: Query<(&Transform, &Motion), With<Player>>,
) {
    for (body, motion) in player.iter() {
        let color = if motion.grounded {
            Color::GREEN
        } else {
            Color::RED
        };
        gizmos.sphere(
            ground_check_center(body, &settings.0),
            Quat::IDENTITY,
            settings.0.ground_check.radius,
            color,
        );
    }
}
