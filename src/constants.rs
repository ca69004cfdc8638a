//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! Every constant below is mirrored by a field on
//! [`crate::config::GameConfig`], so any of them can be overridden at startup
//! via `assets/gameplay.toml` without recompiling.

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Logical arena width in arena units (origin top-left, y grows downward).
///
/// The window is created at this size; a unit is one pixel at 1:1 scale.
pub const ARENA_WIDTH: f32 = 480.0;

/// Logical arena height in arena units.
pub const ARENA_HEIGHT: f32 = 640.0;

// ── Player ────────────────────────────────────────────────────────────────────

/// Player square edge length. Half of this is the clamp margin that keeps the
/// player fully inside the arena.
pub const PLAYER_SIZE: f32 = 38.0;

/// Arena units the player moves per tick while a movement intent is held.
pub const PLAYER_SPEED: f32 = 5.0;

/// How far above the arena bottom the player starts (and respawns).
pub const PLAYER_START_BOTTOM_OFFSET: f32 = 60.0;

/// Ticks between two consecutive shots. The cooldown is set on the firing
/// tick and decremented the same tick, so at 12 the effective fire interval
/// is exactly 12 ticks.
pub const FIRE_COOLDOWN_TICKS: u32 = 12;

/// Gap between the player's top edge and a freshly spawned bullet.
pub const MUZZLE_OFFSET: f32 = 4.0;

// ── Bullets ───────────────────────────────────────────────────────────────────

/// Standard bullet radius.
pub const BULLET_RADIUS: f32 = 7.0;

/// Standard bullet upward speed in arena units per tick.
pub const BULLET_SPEED: f32 = 8.0;

/// Radius of a burst-ring bullet.
pub const BURST_BULLET_RADIUS: f32 = 11.0;

/// Speed of a burst-ring bullet along its fixed radial direction.
pub const BURST_BULLET_SPEED: f32 = 12.0;

/// Lifetime of a burst-ring bullet in ticks.
pub const BURST_BULLET_LIFE: i32 = 32;

/// Number of bullets emitted by one burst activation, evenly spaced around a
/// full circle.
pub const BURST_BULLET_COUNT: u32 = 24;

/// How far outside the arena a burst bullet may travel before it is pruned.
/// Standard bullets instead despawn as soon as they fully clear the top edge.
pub const BULLET_OOB_MARGIN: f32 = 30.0;

// ── Abilities ─────────────────────────────────────────────────────────────────

/// Ticks the burst ability stays unavailable after its active phase ends
/// (~5 s at 60 Hz).
pub const BURST_COOLDOWN_TICKS: u32 = 300;

/// Ticks the burst ability counts as active after triggering. The bullet
/// ring is emitted once on activation; the active phase only drives the HUD
/// and re-activation gating.
pub const BURST_DURATION_TICKS: u32 = 28;

/// Ticks the shield stays unavailable after it drops (~8 s at 60 Hz).
pub const SHIELD_COOLDOWN_TICKS: u32 = 480;

/// Ticks of invulnerability per shield activation (1.5 s at 60 Hz).
pub const SHIELD_DURATION_TICKS: u32 = 90;

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Enemy hitbox width.
pub const ENEMY_WIDTH: f32 = 32.0;

/// Enemy hitbox height. Also the spawn offset above the top edge, and the
/// full-height slack used by the bottom-edge prune test.
pub const ENEMY_HEIGHT: f32 = 38.0;

/// Horizontal margin kept clear of the arena edges when rolling a spawn x.
pub const ENEMY_SPAWN_MARGIN: f32 = 30.0;

/// Spawn y-coordinate: enemies materialise just above the top edge and
/// descend into view.
pub const ENEMY_SPAWN_Y: f32 = -32.0;

/// Per-spawn descent speed is drawn uniformly from
/// `[ENEMY_SPEED_MIN, ENEMY_SPEED_MAX)`.
///
/// At the fastest roll an enemy crosses the arena in ~200 ticks; bullets move
/// 8 units per tick, so the discrete overlap tests cannot tunnel at these
/// speeds.
pub const ENEMY_SPEED_MIN: f32 = 2.0;
pub const ENEMY_SPEED_MAX: f32 = 3.2;

/// After each spawn the countdown is re-armed uniformly from
/// `[SPAWN_COOLDOWN_MIN, SPAWN_COOLDOWN_MAX)` ticks.
pub const SPAWN_COOLDOWN_MIN: f32 = 34.0;
pub const SPAWN_COOLDOWN_MAX: f32 = 58.0;

/// Starting hit-points per enemy.
pub const ENEMY_HP: i32 = 1;

// ── Combat ────────────────────────────────────────────────────────────────────

/// Per-axis shrink applied to the player-vs-enemy overlap test, so grazing
/// sprite corners do not end the run.
pub const PLAYER_HIT_TOLERANCE: f32 = 4.0;

/// Per-axis expansion of the enemy hitbox when testing burst bullets, which
/// splash over a larger area than a direct snowball.
pub const BURST_HIT_MARGIN: f32 = 9.0;

/// Points awarded per enemy destroyed by a bullet. Shield contact kills
/// award nothing.
pub const KILL_SCORE: u32 = 100;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Font size for the score readout and ability labels.
pub const HUD_FONT_SIZE: f32 = 20.0;
