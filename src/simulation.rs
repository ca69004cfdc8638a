//! Simulation plugin: the fixed-tick game loop and session lifecycle.
//!
//! Every gameplay system runs in `FixedUpdate` at [`TICK_RATE_HZ`]; one
//! schedule pass is one game tick, and all counters are integer ticks. No
//! simulation system reads the clock, which makes a tick fully deterministic
//! given the [`crate::rng::GameRng`] seed and the
//! [`crate::input::IntentState`] contents.
//!
//! ## Tick order
//!
//! 1. Ability activation (burst ring emission) and ability timers
//! 2. Player movement + clamp, then firing
//! 3. Bullet movement and pruning
//! 4. Enemy spawning, then enemy descent and pruning
//! 5. Bullets-vs-enemies, then player-vs-enemies resolution
//! 6. Explosion / particle update
//!
//! The chain order matters: collisions must test post-movement positions,
//! and the command-queue flushes between chained systems mean a same-tick
//! spawn is advanced on its spawn tick and a same-tick kill is gone before
//! the player-contact pass.
//!
//! Everything is gated on [`GameState::Playing`], so entering `GameOver`
//! freezes the world mid-flight while the render side keeps drawing it.

use crate::abilities::{ability_activation_system, ability_tick_system, AbilityTimer, BurstAbility, ShieldAbility};
use crate::bullet::{bullet_update_system, Bullet};
use crate::combat::{bullet_enemy_collision_system, player_enemy_collision_system};
use crate::config::GameConfig;
use crate::enemy::{enemy_advance_system, enemy_spawn_system, Enemy, EnemySpawnState};
use crate::input::IntentState;
use crate::menu::GameState;
use crate::particles::{explosion_update_system, Explosion, ExplosionParticle};
use crate::player::{player_fire_system, player_move_system, spawn_player, Player, PlayerFireCooldown, PlayerScore};
use crate::rng::GameRng;
use bevy::prelude::*;

/// Simulation ticks per second. One tick per rendered frame at 60 Hz.
pub const TICK_RATE_HZ: f64 = 60.0;

/// Logical arena-space position (origin top-left, y grows downward).
///
/// All gameplay arithmetic happens in this space;
/// [`crate::rendering::sync_transform_system`] maps it to Bevy world space
/// once per frame.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Pos(pub Vec2);

/// Registers the state machine, every simulation resource, the session
/// reset, and the fixed-tick system chain.
///
/// This plugin is deliberately presentation-free: together with
/// `MinimalPlugins` and Bevy's `StatesPlugin` it drives a complete headless
/// game, which is exactly how the integration tests run it.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            .init_resource::<GameConfig>()
            .init_resource::<IntentState>()
            .init_resource::<PlayerScore>()
            .init_resource::<PlayerFireCooldown>()
            .init_resource::<BurstAbility>()
            .init_resource::<ShieldAbility>()
            .init_resource::<EnemySpawnState>()
            .insert_resource(GameRng::from_entropy())
            .add_systems(
                OnEnter(GameState::Playing),
                (clear_session_system, spawn_player).chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    ability_activation_system,
                    ability_tick_system,
                    player_move_system,
                    player_fire_system,
                    bullet_update_system,
                    enemy_spawn_system,
                    enemy_advance_system,
                    bullet_enemy_collision_system,
                    player_enemy_collision_system,
                    explosion_update_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Reset all mutable session state when gameplay (re)starts: despawn every
/// gameplay entity, zero the score and cooldowns, re-arm both abilities from
/// the current config, and drop any stale input edges. `spawn_player` runs
/// right after this in the `OnEnter(Playing)` chain.
#[allow(clippy::too_many_arguments)]
pub fn clear_session_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    q_cleanup: Query<
        Entity,
        Or<(
            With<Player>,
            With<Bullet>,
            With<Enemy>,
            With<Explosion>,
            With<ExplosionParticle>,
        )>,
    >,
    mut score: ResMut<PlayerScore>,
    mut cooldown: ResMut<PlayerFireCooldown>,
    mut burst: ResMut<BurstAbility>,
    mut shield: ResMut<ShieldAbility>,
    mut spawner: ResMut<EnemySpawnState>,
    mut intents: ResMut<IntentState>,
) {
    for entity in q_cleanup.iter() {
        commands.entity(entity).despawn();
    }
    *score = PlayerScore::default();
    cooldown.ticks = 0;
    burst.0 = AbilityTimer::new(config.burst_cooldown_ticks, config.burst_duration_ticks);
    shield.0 = AbilityTimer::new(config.shield_cooldown_ticks, config.shield_duration_ticks);
    spawner.countdown = 0.0;
    *intents = IntentState::default();
}
