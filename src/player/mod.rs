use bevy::{input::InputSystem, prelude::*, time::Fixed, window::PrimaryWindow};
use bevy_asset_loader::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use bevy_rapier3d::prelude::{
    NoUserData, PhysicsSet, RapierConfiguration, RapierPhysicsPlugin, TimestepMode,
};

use crate::states::GameStates;

pub mod bundle;
pub mod camera;
pub mod input;
pub mod movement;
pub mod settings;
pub mod touch;

use settings::{ControllerSettings, PlayerSettings, SettingsAssets};

/// Physics and ground checks run at this rate, independent of the frame rate.
pub const FIXED_HZ: f64 = 50.0;
const SPAWN_POINT: Vec3 = Vec3::new(0.0, 2.0, 0.0);

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControllerSet {
    /// Touch sampling, look and move intent. Runs in `PreUpdate` once the
    /// input systems are done, so every fixed step of the frame sees it.
    Frame,
    /// Ground check, gravity and the write to the character controller.
    Fixed,
}

/// Schedules the controller systems and nothing else: no physics, assets or
/// states, so they also run in a bare `App`.
pub struct ControllerSystemsPlugin;

impl Plugin for ControllerSystemsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<input::TouchHistory>()
            .configure_sets(PreUpdate, ControllerSet::Frame.after(InputSystem))
            .configure_sets(
                FixedUpdate,
                ControllerSet::Fixed.before(PhysicsSet::SyncBackend),
            );

        app.add_systems(
            PreUpdate,
            (
                input::release_on_focus_lost,
                input::touch_input,
                camera::look,
                movement::movement_input,
            )
                .chain()
                .in_set(ControllerSet::Frame),
        );
        app.add_systems(
            FixedUpdate,
            movement::movement_step.in_set(ControllerSet::Fixed),
        );
    }
}

/// Touch driven first person controller.
///
/// The left half of the screen is a floating joystick for walking, the right
/// half drags the view around. Gravity and the ground check are applied in
/// `FixedUpdate`, right before rapier resolves the character's motion.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
            .insert_resource(RapierConfiguration {
                timestep_mode: TimestepMode::Fixed {
                    dt: 1.0 / FIXED_HZ as f32,
                    substeps: 1,
                },
                ..default()
            })
            .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ));

        app.add_plugins(RonAssetPlugin::<ControllerSettings>::new(&[
            "controller.ron",
        ]));
        app.add_collection_to_loading_state::<_, SettingsAssets>(GameStates::AssetLoading)
            .init_resource_after_loading_state::<_, PlayerSettings>(GameStates::AssetLoading);

        app.add_systems(OnEnter(GameStates::InGame), spawn_player);

        app.add_plugins(ControllerSystemsPlugin)
            .configure_sets(
                PreUpdate,
                ControllerSet::Frame.run_if(in_state(GameStates::InGame)),
            )
            .configure_sets(
                FixedUpdate,
                ControllerSet::Fixed.run_if(in_state(GameStates::InGame)),
            );

        #[cfg(debug_assertions)]
        {
            use bevy_rapier3d::render::RapierDebugRenderPlugin;

            app.add_plugins(RapierDebugRenderPlugin::default().disabled());
            app.add_systems(
                Update,
                (
                    toggle_debug_render,
                    movement::draw_ground_check.run_if(in_state(GameStates::InGame)),
                ),
            );
        }
    }
}

#[derive(Component, Default)]
pub struct Player;

pub fn spawn_player(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    settings: Res<PlayerSettings>,
) {
    let Ok(window) = windows.get_single() else {
        error!("No primary window, can't size the touch zones");
        return;
    };

    // Screen size is sampled once: rotating the device keeps the old split.
    let screen_size = Vec2::new(window.width(), window.height());
    let dead_zone_squared = settings.0.dead_zone_squared(screen_size.y);
    info!("Spawning player for a {screen_size} screen, dead zone² {dead_zone_squared}");

    commands
        .spawn(bundle::PlayerBundle::new(
            SPAWN_POINT,
            screen_size,
            dead_zone_squared,
        ))
        .with_children(|c| {
            c.spawn(bundle::CameraBundle::default());
        });
}

#[cfg(debug_assertions)]
fn toggle_debug_render(
    mut debug_render: ResMut<bevy_rapier3d::render::DebugRenderContext>,
    keys: Res<Input<KeyCode>>,
) {
    if keys.just_pressed(KeyCode::F2) {
        debug_render.enabled = !debug_render.enabled;
    }
}
