use bevy::prelude::*;
use bevy_atmosphere::prelude::AtmosphereCamera;
use bevy_rapier3d::prelude::*;

use super::{camera::FPSCamera, movement::Motion, touch::TouchTracker, Player};

/// Half the height of the capsule's cylindrical part.
const CAPSULE_HALF_HEIGHT: f32 = 0.5;
const CAPSULE_RADIUS: f32 = 0.4;
/// Camera height above the body center.
pub const EYE_HEIGHT: f32 = 0.7;

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: Player,
    pub name: Name,
    pub tracker: TouchTracker,
    pub motion: Motion,
    pub spatial: SpatialBundle,
    pub collider: ColliderBundle,
}

impl PlayerBundle {
    pub fn new(position: Vec3, screen_size: Vec2, dead_zone_squared: f32) -> Self {
        Self {
            player: Player,
            name: Name::new("Player"),
            tracker: TouchTracker::new(screen_size.x),
            motion: Motion::new(dead_zone_squared),
            spatial: SpatialBundle {
                transform: Transform::from_translation(position),
                ..default()
            },
            collider: ColliderBundle::default(),
        }
    }
}

#[derive(Bundle)]
pub struct ColliderBundle {
    pub collider: Collider,
    pub rigid_body: RigidBody,
    pub controller: KinematicCharacterController,
    pub collision_groups: CollisionGroups,
}

impl Default for ColliderBundle {
    fn default() -> Self {
        Self {
            collider: Collider::capsule_y(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS),
            rigid_body: RigidBody::KinematicPositionBased,
            controller: KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                autostep: Some(CharacterAutostep {
                    max_height: CharacterLength::Absolute(0.3),
                    min_width: CharacterLength::Absolute(0.2),
                    include_dynamic_bodies: false,
                }),
                filter_groups: Some(CollisionGroups::new(Group::GROUP_1, Group::GROUP_2)),
                ..default()
            },
            collision_groups: CollisionGroups::new(Group::GROUP_1, Group::GROUP_2),
        }
    }
}

#[derive(Bundle)]
pub struct CameraBundle {
    pub fps_camera: FPSCamera,
    pub name: Name,
    pub camera: Camera3dBundle,
    pub atmosphere: AtmosphereCamera,
}

impl Default for CameraBundle {
    fn default() -> Self {
        Self {
            fps_camera: FPSCamera::default(),
            name: Name::new("Player Camera"),
            camera: Camera3dBundle {
                projection: Projection::Perspective(PerspectiveProjection {
                    fov: 75.0_f32.to_radians(),
                    near: 0.05,
                    ..default()
                }),
                transform: Transform::from_xyz(0.0, EYE_HEIGHT, 0.0),
                ..default()
            },
            atmosphere: AtmosphereCamera::default(),
        }
    }
}
