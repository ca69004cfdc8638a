//! Runtime gameplay configuration loaded from `assets/gameplay.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`]. At startup, [`load_game_config`] reads
//! `assets/gameplay.toml` and overwrites the defaults with any values present
//! in the file. Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.player_speed`, `config.fire_cooldown_ticks`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the authoritative default
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{validate_count, validate_positive, validate_range, ConfigResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`. Override any subset by setting the value in
/// `assets/gameplay.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena ────────────────────────────────────────────────────────────────
    pub arena_width: f32,
    pub arena_height: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_size: f32,
    pub player_speed: f32,
    pub player_start_bottom_offset: f32,
    pub fire_cooldown_ticks: u32,
    pub muzzle_offset: f32,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_radius: f32,
    pub bullet_speed: f32,
    pub burst_bullet_radius: f32,
    pub burst_bullet_speed: f32,
    pub burst_bullet_life: i32,
    pub burst_bullet_count: u32,
    pub bullet_oob_margin: f32,

    // ── Abilities ────────────────────────────────────────────────────────────
    pub burst_cooldown_ticks: u32,
    pub burst_duration_ticks: u32,
    pub shield_cooldown_ticks: u32,
    pub shield_duration_ticks: u32,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_spawn_margin: f32,
    pub enemy_spawn_y: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub spawn_cooldown_min: f32,
    pub spawn_cooldown_max: f32,
    pub enemy_hp: i32,

    // ── Combat ───────────────────────────────────────────────────────────────
    pub player_hit_tolerance: f32,
    pub burst_hit_margin: f32,
    pub kill_score: u32,

    // ── HUD ──────────────────────────────────────────────────────────────────
    pub hud_font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Arena
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            // Player
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_start_bottom_offset: PLAYER_START_BOTTOM_OFFSET,
            fire_cooldown_ticks: FIRE_COOLDOWN_TICKS,
            muzzle_offset: MUZZLE_OFFSET,
            // Bullets
            bullet_radius: BULLET_RADIUS,
            bullet_speed: BULLET_SPEED,
            burst_bullet_radius: BURST_BULLET_RADIUS,
            burst_bullet_speed: BURST_BULLET_SPEED,
            burst_bullet_life: BURST_BULLET_LIFE,
            burst_bullet_count: BURST_BULLET_COUNT,
            bullet_oob_margin: BULLET_OOB_MARGIN,
            // Abilities
            burst_cooldown_ticks: BURST_COOLDOWN_TICKS,
            burst_duration_ticks: BURST_DURATION_TICKS,
            shield_cooldown_ticks: SHIELD_COOLDOWN_TICKS,
            shield_duration_ticks: SHIELD_DURATION_TICKS,
            // Enemies
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            enemy_spawn_margin: ENEMY_SPAWN_MARGIN,
            enemy_spawn_y: ENEMY_SPAWN_Y,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            spawn_cooldown_min: SPAWN_COOLDOWN_MIN,
            spawn_cooldown_max: SPAWN_COOLDOWN_MAX,
            enemy_hp: ENEMY_HP,
            // Combat
            player_hit_tolerance: PLAYER_HIT_TOLERANCE,
            burst_hit_margin: BURST_HIT_MARGIN,
            kill_score: KILL_SCORE,
            // HUD
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

impl GameConfig {
    /// Reject configurations that would produce degenerate gameplay: empty
    /// random ranges, non-positive dimensions, or a zero-bullet burst.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_positive("arena_width", self.arena_width)?;
        validate_positive("arena_height", self.arena_height)?;
        validate_positive("player_size", self.player_size)?;
        validate_positive("player_speed", self.player_speed)?;
        validate_positive("bullet_speed", self.bullet_speed)?;
        validate_positive("enemy_width", self.enemy_width)?;
        validate_positive("enemy_height", self.enemy_height)?;
        validate_range("enemy_speed", self.enemy_speed_min, self.enemy_speed_max)?;
        validate_range(
            "spawn_cooldown",
            self.spawn_cooldown_min,
            self.spawn_cooldown_max,
        )?;
        validate_count("burst_bullet_count", self.burst_bullet_count)?;
        Ok(())
    }
}

/// Startup system: attempt to load `assets/gameplay.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults. Parse or validation errors
/// are printed to stderr and the defaults kept. A missing file is silently
/// ignored (defaults are already in place from `init_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/gameplay.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => match loaded.validate() {
                Ok(()) => {
                    *config = loaded;
                    println!("✓ Loaded gameplay config from {path}");
                }
                Err(e) => {
                    eprintln!("⚠ Rejected {path}: {e}; using defaults");
                }
            },
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}
