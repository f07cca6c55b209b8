use std::f32::consts::FRAC_PI_4;

use bevy::prelude::*;
use bevy_atmosphere::prelude::*;

#[derive(Component)]
pub struct Sun;

pub fn setup_sky(mut commands: Commands) {
    let sun_direction = Vec3::new(1.0, 1.0, 0.5).normalize();

    commands.insert_resource(AtmosphereModel::new(Nishita {
        sun_position: sun_direction,
        ..default()
    }));

    commands.spawn((
        DirectionalLightBundle {
            directional_light: DirectionalLight {
                shadows_enabled: true,
                ..default()
            },
            transform: Transform::from_rotation(Quat::from_euler(
                EulerRot::YXZ,
                FRAC_PI_4,
                -sun_direction.y.asin(),
                0.0,
            )),
            ..default()
        },
        Name::new("Sun"),
        Sun,
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.2,
    });
}
