//! Input intent layer.
//!
//! Keyboard state is sampled once per rendered frame into [`IntentState`];
//! the fixed-tick simulation consumes intents from the resource and never
//! touches `ButtonInput` directly. This keeps the simulation headless-testable
//! (tests write the resource) and makes edge-triggered presses robust across
//! the frame/tick rate mismatch: `burst`/`shield` are OR-accumulated here and
//! cleared by the consuming system, so a press between two fixed ticks is
//! never dropped.
//!
//! Bindings: arrows or WASD move, Space/Z fires, X/F triggers the burst,
//! C raises the shield. Start/restart keys are handled by the menu overlays
//! in [`crate::menu`], not here.

use bevy::prelude::*;

/// Per-tick input intents consumed by the simulation.
///
/// Movement and `fire` are level-triggered (true while held); `burst` and
/// `shield` are edge-triggered and cleared by
/// [`crate::abilities::ability_activation_system`].
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct IntentState {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub fire: bool,
    pub burst: bool,
    pub shield: bool,
}

/// Registers the keyboard sampler.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<IntentState>()
            .add_systems(Update, keyboard_intent_system);
    }
}

/// Translate the current keyboard state into [`IntentState`].
pub fn keyboard_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut intents: ResMut<IntentState>,
) {
    intents.move_left = keys.pressed(KeyCode::ArrowLeft) || keys.pressed(KeyCode::KeyA);
    intents.move_right = keys.pressed(KeyCode::ArrowRight) || keys.pressed(KeyCode::KeyD);
    intents.move_up = keys.pressed(KeyCode::ArrowUp) || keys.pressed(KeyCode::KeyW);
    intents.move_down = keys.pressed(KeyCode::ArrowDown) || keys.pressed(KeyCode::KeyS);
    intents.fire = keys.pressed(KeyCode::Space) || keys.pressed(KeyCode::KeyZ);
    intents.burst |= keys.just_pressed(KeyCode::KeyX) || keys.just_pressed(KeyCode::KeyF);
    intents.shield |= keys.just_pressed(KeyCode::KeyC);
}
