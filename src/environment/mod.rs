use bevy::prelude::*;
use bevy_atmosphere::prelude::*;

use crate::states::GameStates;

mod level;
mod sky;

pub struct EnvironmentPlugin;

impl Plugin for EnvironmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AtmospherePlugin);

        app.add_systems(Startup, sky::setup_sky);
        app.add_systems(OnEnter(GameStates::InGame), level::spawn_level);
    }
}
