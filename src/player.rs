//! Player avatar: spawn/reset, intent-driven movement, and snowball firing.

use crate::bullet::spawn_standard_bullet;
use crate::config::GameConfig;
use crate::input::IntentState;
use crate::simulation::Pos;
use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct Player;

/// Ticks until the player may fire again. Set to `fire_cooldown_ticks` on
/// the firing tick and decremented the same tick, like the rest of the
/// countdown bookkeeping.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PlayerFireCooldown {
    pub ticks: u32,
}

/// Session score.
///
/// `points` only grows (by `kill_score` per bullet kill); `destroyed` also
/// counts shield-contact kills and exists for the game-over readout.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PlayerScore {
    pub points: u32,
    pub destroyed: u32,
}

/// Spawn the player centred horizontally, near the arena bottom.
pub fn spawn_player(mut commands: Commands, config: Res<GameConfig>) {
    commands.spawn((
        Player,
        Pos(Vec2::new(
            config.arena_width / 2.0,
            config.arena_height - config.player_start_bottom_offset,
        )),
    ));
}

/// Apply movement intents, then clamp to the arena with half-extent margins
/// so the player square never leaves the screen.
pub fn player_move_system(
    intents: Res<IntentState>,
    config: Res<GameConfig>,
    mut q_player: Query<&mut Pos, With<Player>>,
) {
    let Ok(mut pos) = q_player.single_mut() else {
        return;
    };

    if intents.move_left {
        pos.0.x -= config.player_speed;
    }
    if intents.move_right {
        pos.0.x += config.player_speed;
    }
    if intents.move_up {
        pos.0.y -= config.player_speed;
    }
    if intents.move_down {
        pos.0.y += config.player_speed;
    }

    let half = config.player_size / 2.0;
    pos.0.x = pos.0.x.clamp(half, config.arena_width - half);
    pos.0.y = pos.0.y.clamp(half, config.arena_height - half);
}

/// Fire a standard bullet from the muzzle when the fire intent is held and
/// the cooldown has elapsed. The cooldown always counts down if positive,
/// including on the firing tick itself.
pub fn player_fire_system(
    mut commands: Commands,
    intents: Res<IntentState>,
    config: Res<GameConfig>,
    mut cooldown: ResMut<PlayerFireCooldown>,
    q_player: Query<&Pos, With<Player>>,
) {
    let Ok(pos) = q_player.single() else {
        return;
    };

    if intents.fire && cooldown.ticks == 0 {
        let muzzle = Vec2::new(
            pos.0.x,
            pos.0.y - config.player_size / 2.0 - config.muzzle_offset,
        );
        spawn_standard_bullet(&mut commands, muzzle, &config);
        cooldown.ticks = config.fire_cooldown_ticks;
    }
    if cooldown.ticks > 0 {
        cooldown.ticks -= 1;
    }
}
