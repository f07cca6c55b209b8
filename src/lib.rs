use bevy::{prelude::*, window::PresentMode};
use bevy_asset_loader::prelude::*;
use states::GameStates;

mod environment;
pub mod player;
pub mod states;

pub fn app() -> App {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Touch FPS".into(),
            resolution: (1280., 720.).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(Msaa::Sample4);

    #[cfg(debug_assertions)]
    {
        use bevy::{
            diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
            input::common_conditions::input_toggle_active,
        };
        use bevy_inspector_egui::quick::WorldInspectorPlugin;

        app.add_plugins(
            WorldInspectorPlugin::default().run_if(input_toggle_active(false, KeyCode::F3)),
        );

        app.add_plugins((
            FrameTimeDiagnosticsPlugin::default(),
            LogDiagnosticsPlugin::default(),
        ));
    }

    app.add_state::<GameStates>().add_loading_state(
        LoadingState::new(GameStates::AssetLoading).continue_to_state(GameStates::InGame),
    );

    app.add_plugins((player::PlayerPlugin, environment::EnvironmentPlugin));

    app
}
