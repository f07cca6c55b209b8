use bevy::{prelude::*, reflect::TypePath};
use bevy_asset_loader::prelude::*;
use bevy_rapier3d::prelude::Group;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(AssetCollection, Resource)]
pub struct SettingsAssets {
    #[asset(path = "settings/player.controller.ron")]
    pub controller: Handle<ControllerSettings>,
}

/// How the vertical velocity behaves on a step where the body is grounded
/// and not moving upwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundStick {
    /// Snap to the ground-stick bias and skip gravity for that step.
    #[default]
    ResetOnly,
    /// Snap to the ground-stick bias, then apply gravity for that step too.
    ResetThenIntegrate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundCheck {
    /// Sphere center relative to the body, in body space.
    pub offset: [f32; 3],
    pub radius: f32,
    /// Rapier collision group bits considered walkable.
    pub groups: u32,
}

impl Default for GroundCheck {
    fn default() -> Self {
        Self {
            offset: [0.0, -0.9, 0.0],
            radius: 0.3,
            groups: Group::GROUP_2.bits(),
        }
    }
}

impl GroundCheck {
    pub fn offset(&self) -> Vec3 {
        Vec3::from_array(self.offset)
    }

    pub fn groups(&self) -> Group {
        Group::from_bits_truncate(self.groups)
    }
}

/// Tuning values of the touch controller, loaded from a `.controller.ron` asset.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Degrees of rotation per pixel of look-finger travel per second.
    pub camera_sensitivity: f32,
    pub move_speed: f32,
    /// Dead zone radius as a fraction of the screen height.
    pub dead_zone_percent: f32,
    /// Downward speed kept while standing on the ground.
    pub ground_stick_bias: f32,
    pub gravity: f32,
    pub ground_stick: GroundStick,
    pub ground_check: GroundCheck,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            camera_sensitivity: 10.0,
            move_speed: 5.0,
            dead_zone_percent: 0.1,
            ground_stick_bias: 2.0,
            gravity: 9.81,
            ground_stick: GroundStick::default(),
            ground_check: GroundCheck::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("`{name}` must be a finite, non-negative number, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("`dead_zone_percent` must lie within [0, 1], got {0}")]
    DeadZone(f32),
}

impl ControllerSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("camera_sensitivity", self.camera_sensitivity),
            ("move_speed", self.move_speed),
            ("ground_stick_bias", self.ground_stick_bias),
            ("gravity", self.gravity),
            ("ground_check.radius", self.ground_check.radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Negative { name, value });
            }
        }

        if !(0.0..=1.0).contains(&self.dead_zone_percent) {
            return Err(SettingsError::DeadZone(self.dead_zone_percent));
        }

        Ok(())
    }

    /// Squared dead zone radius in pixels for a screen of the given height.
    pub fn dead_zone_squared(&self, screen_height: f32) -> f32 {
        let dead_zone = screen_height * self.dead_zone_percent;
        dead_zone * dead_zone
    }
}

/// The settings the controller runs with, resolved once assets are loaded.
#[derive(Resource, Debug, Clone)]
pub struct PlayerSettings(pub ControllerSettings);

impl FromWorld for PlayerSettings {
    fn from_world(world: &mut World) -> Self {
        let loaded = world
            .get_resource::<SettingsAssets>()
            .zip(world.get_resource::<Assets<ControllerSettings>>())
            .and_then(|(handles, assets)| assets.get(&handles.controller))
            .cloned();

        let Some(settings) = loaded else {
            warn!("Controller settings asset missing, using defaults");
            return Self(ControllerSettings::default());
        };

        match settings.validate() {
            Ok(()) => {
                info!("Loaded controller settings: {settings:?}");
                Self(settings)
            }
            Err(err) => {
                error!("Invalid controller settings ({err}), using defaults");
                Self(ControllerSettings::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ControllerSettings::default().validate(), Ok(()));
    }

    #[test]
    fn negative_speed_is_rejected() {
        let settings = ControllerSettings {
            move_speed: -1.0,
            ..default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::Negative {
                name: "move_speed",
                value: -1.0
            })
        );
    }

    #[test]
    fn nan_gravity_is_rejected() {
        let settings = ControllerSettings {
            gravity: f32::NAN,
            ..default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Negative { name: "gravity", .. })
        ));
    }

    #[test]
    fn dead_zone_out_of_range_is_rejected() {
        let settings = ControllerSettings {
            dead_zone_percent: 1.5,
            ..default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::DeadZone(1.5)));
    }

    #[test]
    fn dead_zone_is_squared_fraction_of_height() {
        let settings = ControllerSettings::default();
        assert_eq!(settings.dead_zone_squared(600.0), 3600.0);
    }

    #[test]
    fn shipped_settings_parse() {
        let text = include_str!("../../assets/settings/player.controller.ron");
        let settings: ControllerSettings = ron::from_str(text).expect("settings should parse");
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.ground_check.groups(), Group::GROUP_2);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: ControllerSettings =
            ron::from_str("(move_speed: 8.0)").expect("partial settings should parse");
        assert_eq!(settings.move_speed, 8.0);
        assert_eq!(settings.gravity, ControllerSettings::default().gravity);
        assert_eq!(settings.ground_check, GroundCheck::default());
    }
}
