//! Descending raiders: probabilistic spawn scheduling, descent, and pruning.

use crate::config::GameConfig;
use crate::rng::GameRng;
use crate::simulation::Pos;
use bevy::prelude::*;
use rand::Rng;

/// Cosmetic enemy flavour; picks the sprite tint, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyVariant {
    Raider,
    Lurker,
    Brute,
}

/// A descending enemy. Speed is rolled once at spawn time.
#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    /// Arena units per tick, straight down.
    pub speed: f32,
    pub hp: i32,
    pub variant: EnemyVariant,
}

/// Countdown until the next spawn, in (fractional) ticks.
///
/// Starts at zero so the first enemy appears on the first simulation tick of
/// a session.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct EnemySpawnState {
    pub countdown: f32,
}

/// When the countdown has elapsed, spawn one enemy just above the top edge
/// at a random x and re-arm the countdown; otherwise count down by one.
pub fn enemy_spawn_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    mut state: ResMut<EnemySpawnState>,
) {
    if state.countdown <= 0.0 {
        let margin = config.enemy_spawn_margin;
        let x = rng.0.gen_range(margin..config.arena_width - margin);
        let speed = rng.0.gen_range(config.enemy_speed_min..config.enemy_speed_max);
        let variant = match rng.0.gen_range(0..3) {
            0 => EnemyVariant::Raider,
            1 => EnemyVariant::Lurker,
            _ => EnemyVariant::Brute,
        };
        commands.spawn((
            Pos(Vec2::new(x, config.enemy_spawn_y)),
            Enemy {
                speed,
                hp: config.enemy_hp,
                variant,
            },
        ));
        state.countdown = rng
            .0
            .gen_range(config.spawn_cooldown_min..config.spawn_cooldown_max);
    } else {
        state.countdown -= 1.0;
    }
}

/// Advance every enemy one tick and despawn those past the bottom edge.
///
/// The prune test uses the full enemy height of slack, so an enemy is well
/// below the visible arena before it is removed.
pub fn enemy_advance_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut q_enemies: Query<(Entity, &mut Pos, &Enemy)>,
) {
    for (entity, mut pos, enemy) in q_enemies.iter_mut() {
        pos.0.y += enemy.speed;
        if pos.0.y - config.enemy_height >= config.arena_height {
            commands.entity(entity).despawn();
        }
    }
}
