//! Top-level state machine and the menu / game-over overlays.
//!
//! ## States
//!
//! | State      | Description                                          |
//! |------------|------------------------------------------------------|
//! | `Menu`     | Title screen; no gameplay entities exist             |
//! | `Playing`  | Simulation running; all fixed-tick systems active    |
//! | `GameOver` | World frozen in place; score card shown over it      |
//!
//! Transitions: `Menu -> Playing` and `GameOver -> Playing` on Enter, Space,
//! or a mouse click (each runs the full session reset registered in
//! [`crate::simulation`]); `Playing -> GameOver` is requested by the combat
//! resolver when the player is struck without a shield. Nothing else moves
//! the state. Escape on the title screen quits.
//!
//! The state type itself is registered by
//! [`crate::simulation::SimulationPlugin`] so headless tests get it without
//! pulling in any UI.

use crate::player::PlayerScore;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level application state machine.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Title screen; shown on startup.
    #[default]
    Menu,
    /// Active gameplay.
    Playing,
    /// Player struck without a shield; world frozen, restart prompt shown.
    GameOver,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the title overlay; despawned on `OnExit(Menu)`.
#[derive(Component)]
pub struct MenuRoot;

/// Root node of the game-over overlay; despawned on `OnExit(GameOver)`.
#[derive(Component)]
pub struct GameOverRoot;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the two overlays and their keyboard/mouse handlers.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Menu), setup_menu)
            .add_systems(OnExit(GameState::Menu), cleanup_menu)
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(OnExit(GameState::GameOver), cleanup_game_over)
            .add_systems(
                Update,
                (
                    menu_input_system.run_if(in_state(GameState::Menu)),
                    game_over_input_system.run_if(in_state(GameState::GameOver)),
                ),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn title_color() -> Color {
    Color::WHITE
}
fn subtitle_color() -> Color {
    Color::srgb(0.88, 0.96, 1.0)
}
fn hint_color() -> Color {
    Color::srgb(0.20, 0.30, 0.42)
}
fn card_bg() -> Color {
    Color::srgba(0.0, 0.0, 0.0, 0.62)
}
fn score_color() -> Color {
    Color::srgb(1.0, 0.89, 0.41)
}

// ── Title overlay ─────────────────────────────────────────────────────────────

/// Spawn the full-screen title overlay (transparent background; the sky
/// clear-colour shows through).
pub fn setup_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            MenuRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("FLURRY"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 8.0);

            root.spawn((
                Text::new("A snowball arcade shooter"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));

            spacer(root, 46.0);

            root.spawn((
                Text::new("Press Enter or click to start"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 30.0);

            root.spawn((
                Text::new("Arrows/WASD move  ·  Space throw  ·  X burst  ·  C shield"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

/// Despawn the title overlay.
pub fn cleanup_menu(mut commands: Commands, query: Query<Entity, With<MenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Start the game on Enter/Space/click; quit on Escape.
pub fn menu_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    if keys.just_pressed(KeyCode::Enter)
        || keys.just_pressed(KeyCode::Space)
        || mouse.just_pressed(MouseButton::Left)
    {
        next_state.set(GameState::Playing);
    }
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(bevy::app::AppExit::Success);
    }
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

/// Spawn the game-over card centred over the frozen world.
pub fn setup_game_over(mut commands: Commands, score: Res<PlayerScore>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(card_bg()),
            ZIndex(100),
            GameOverRoot,
        ))
        .with_children(|overlay| {
            overlay.spawn((
                Text::new("GAME OVER"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.25, 0.25)),
            ));

            spacer(overlay, 12.0);

            overlay.spawn((
                Text::new(format!(
                    "Score: {}   ({} destroyed)",
                    score.points, score.destroyed
                )),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(score_color()),
            ));

            spacer(overlay, 28.0);

            overlay.spawn((
                Text::new("Press Enter or click to play again"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(title_color()),
            ));
        });
}

/// Despawn the game-over overlay.
pub fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Restart on Enter/Space/click; `OnEnter(Playing)` performs the reset.
pub fn game_over_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Enter)
        || keys.just_pressed(KeyCode::Space)
        || mouse.just_pressed(MouseButton::Left)
    {
        next_state.set(GameState::Playing);
    }
}

/// Spawn a fixed-height invisible spacer node.
fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}
