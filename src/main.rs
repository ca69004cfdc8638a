use bevy::prelude::*;
use bevy::window::WindowResolution;

use flurry::config;
use flurry::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use flurry::input::InputPlugin;
use flurry::menu::MenuPlugin;
use flurry::particles::ParticlesPlugin;
use flurry::rendering::{self, RenderingPlugin};
use flurry::simulation::SimulationPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Flurry".into(),
                resolution: WindowResolution::new(ARENA_WIDTH as u32, ARENA_HEIGHT as u32),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        // Winter sky backdrop behind everything.
        .insert_resource(ClearColor(Color::srgb(0.51, 0.84, 1.0)))
        // SimulationPlugin registers GameState; it must come before the
        // plugins whose systems run under in_state conditions.
        .add_plugins(SimulationPlugin)
        .add_plugins((InputPlugin, MenuPlugin, ParticlesPlugin, RenderingPlugin))
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the
                // final values.
                config::load_game_config,
                rendering::setup_camera.after(config::load_game_config),
                rendering::init_visual_assets.after(config::load_game_config),
                rendering::setup_hud_score.after(config::load_game_config),
                rendering::setup_ability_hud.after(config::load_game_config),
            ),
        )
        .run();
}
