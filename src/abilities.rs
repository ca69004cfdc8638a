//! Cooldown-gated special abilities: the radial snowball burst and the
//! invulnerability shield.
//!
//! Both abilities share one state machine, [`AbilityTimer`]:
//!
//! ```text
//! ready ──activate()──> active ──duration elapsed──> cooling ──cooldown elapsed──> ready
//! ```
//!
//! `ready` and `active` are never simultaneously true, and the cooldown only
//! counts while the ability is neither ready nor active. Activation with bad
//! preconditions is a silent no-op; forgiving input handling, not an error.

use crate::bullet::spawn_burst_ring;
use crate::config::GameConfig;
use crate::constants::{
    BURST_COOLDOWN_TICKS, BURST_DURATION_TICKS, SHIELD_COOLDOWN_TICKS, SHIELD_DURATION_TICKS,
};
use crate::input::IntentState;
use crate::player::Player;
use crate::simulation::Pos;
use bevy::prelude::*;

// ── State machine ─────────────────────────────────────────────────────────────

/// Tick-counted ability lifecycle shared by both abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityTimer {
    ready: bool,
    active: bool,
    cooldown_left: u32,
    active_left: u32,
    max_cooldown: u32,
    max_active: u32,
}

impl AbilityTimer {
    /// A freshly armed ability: ready, inactive, no pending cooldown.
    pub fn new(max_cooldown: u32, max_active: u32) -> Self {
        Self {
            ready: true,
            active: false,
            cooldown_left: 0,
            active_left: 0,
            max_cooldown,
            max_active,
        }
    }

    /// Trigger the ability. Returns `true` if it fired; a call while not
    /// ready or already active changes nothing and returns `false`.
    pub fn activate(&mut self) -> bool {
        if !self.ready || self.active {
            return false;
        }
        self.ready = false;
        self.active = true;
        self.active_left = self.max_active;
        true
    }

    /// Advance one tick. Exactly one of the two countdowns moves: the active
    /// duration while active, otherwise the cooldown while not ready.
    pub fn tick(&mut self) {
        if self.active {
            self.active_left = self.active_left.saturating_sub(1);
            if self.active_left == 0 {
                self.active = false;
                self.cooldown_left = self.max_cooldown;
            }
        } else if !self.ready {
            if self.cooldown_left > 0 {
                self.cooldown_left -= 1;
            } else {
                self.ready = true;
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Remaining cooldown as a fraction of the full cooldown, in `[0, 1]`.
    pub fn cooldown_fraction(&self) -> f32 {
        if self.max_cooldown == 0 {
            0.0
        } else {
            self.cooldown_left as f32 / self.max_cooldown as f32
        }
    }

    /// Remaining active time as a fraction of the full duration, in `[0, 1]`.
    pub fn active_fraction(&self) -> f32 {
        if self.max_active == 0 {
            0.0
        } else {
            self.active_left as f32 / self.max_active as f32
        }
    }
}

// ── Resources ─────────────────────────────────────────────────────────────────

/// The radial snowball burst. Activation emits one full ring of bullets
/// (see [`spawn_burst_ring`]); the active window only gates re-activation.
#[derive(Resource, Debug, Clone, Copy)]
pub struct BurstAbility(pub AbilityTimer);

impl Default for BurstAbility {
    fn default() -> Self {
        Self(AbilityTimer::new(BURST_COOLDOWN_TICKS, BURST_DURATION_TICKS))
    }
}

/// The invulnerability shield. Purely defensive: while active, enemy contact
/// destroys the enemy instead of the player (see
/// [`crate::combat::player_enemy_collision_system`]).
#[derive(Resource, Debug, Clone, Copy)]
pub struct ShieldAbility(pub AbilityTimer);

impl Default for ShieldAbility {
    fn default() -> Self {
        Self(AbilityTimer::new(
            SHIELD_COOLDOWN_TICKS,
            SHIELD_DURATION_TICKS,
        ))
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Consume edge-triggered ability intents. A successful burst activation
/// emits its bullet ring at the player's position, once.
pub fn ability_activation_system(
    mut commands: Commands,
    mut intents: ResMut<IntentState>,
    config: Res<GameConfig>,
    mut burst: ResMut<BurstAbility>,
    mut shield: ResMut<ShieldAbility>,
    q_player: Query<&Pos, With<Player>>,
) {
    let want_burst = std::mem::take(&mut intents.burst);
    let want_shield = std::mem::take(&mut intents.shield);

    if want_burst {
        if let Ok(pos) = q_player.single() {
            if burst.0.activate() {
                spawn_burst_ring(&mut commands, pos.0, &config);
            }
        }
    }
    if want_shield {
        shield.0.activate();
    }
}

/// Advance both ability timers exactly once per simulation tick.
pub fn ability_tick_system(mut burst: ResMut<BurstAbility>, mut shield: ResMut<ShieldAbility>) {
    burst.0.tick();
    shield.0.tick();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_and_active_are_never_both_true() {
        let mut timer = AbilityTimer::new(300, 28);
        for i in 0..2000 {
            if i % 7 == 0 {
                timer.activate();
            }
            timer.tick();
            assert!(
                !(timer.is_ready() && timer.is_active()),
                "invariant broken at tick {i}"
            );
        }
    }

    #[test]
    fn full_cycle_timing_is_exact() {
        let mut timer = AbilityTimer::new(300, 28);
        assert!(timer.activate());
        assert!(!timer.is_ready());
        assert!(timer.is_active());

        // 28 active ticks, then 300 cooldown ticks, then one tick to re-arm.
        for _ in 0..28 {
            assert!(timer.is_active());
            timer.tick();
        }
        assert!(!timer.is_active());
        assert!(!timer.is_ready());

        for _ in 0..300 {
            assert!(!timer.is_ready());
            timer.tick();
        }
        assert!(!timer.is_ready());
        timer.tick();
        assert!(timer.is_ready());
    }

    #[test]
    fn activation_is_a_noop_unless_ready() {
        let mut timer = AbilityTimer::new(10, 3);
        assert!(timer.activate());
        // Already active.
        assert!(!timer.activate());
        for _ in 0..3 {
            timer.tick();
        }
        // Cooling down.
        assert!(!timer.activate());
        for _ in 0..11 {
            timer.tick();
        }
        assert!(timer.is_ready());
        assert!(timer.activate());
    }

    #[test]
    fn fractions_stay_in_unit_range() {
        let mut timer = AbilityTimer::new(480, 90);
        timer.activate();
        for _ in 0..600 {
            timer.tick();
            let cd = timer.cooldown_fraction();
            let act = timer.active_fraction();
            assert!((0.0..=1.0).contains(&cd));
            assert!((0.0..=1.0).contains(&act));
        }
    }

    #[test]
    fn zero_duration_ability_cools_down_immediately() {
        let mut timer = AbilityTimer::new(5, 0);
        assert!(timer.activate());
        timer.tick();
        assert!(!timer.is_active());
        assert!(!timer.is_ready());
    }
}
