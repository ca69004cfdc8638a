//! Player projectiles: standard snowballs and burst-ring shots.

use crate::config::GameConfig;
use crate::simulation::Pos;
use bevy::prelude::*;

/// Discriminates the two projectile behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletKind {
    /// Fired from the muzzle, travels straight up, despawns past the top
    /// edge, consumed by the first enemy it hits.
    Standard,
    /// Emitted by the burst ability along a fixed radial direction; pierces
    /// enemies and despawns on life expiry or far outside the arena.
    Burst,
}

/// A live projectile. `life` is only meaningful for [`BulletKind::Burst`].
#[derive(Component, Debug, Clone, Copy)]
pub struct Bullet {
    pub kind: BulletKind,
    pub radius: f32,
    /// Arena-space displacement applied every tick.
    pub velocity: Vec2,
    /// Remaining ticks before a burst bullet expires.
    pub life: i32,
}

/// Spawn one standard bullet at the muzzle position.
pub fn spawn_standard_bullet(commands: &mut Commands, muzzle: Vec2, config: &GameConfig) {
    commands.spawn((
        Pos(muzzle),
        Bullet {
            kind: BulletKind::Standard,
            radius: config.bullet_radius,
            velocity: Vec2::new(0.0, -config.bullet_speed),
            life: 0,
        },
    ));
}

/// Emit the full burst ring: `burst_bullet_count` bullets evenly spaced
/// around the circle, all starting at `origin`.
pub fn spawn_burst_ring(commands: &mut Commands, origin: Vec2, config: &GameConfig) {
    let count = config.burst_bullet_count;
    for i in 0..count {
        let angle = std::f32::consts::TAU * i as f32 / count as f32;
        commands.spawn((
            Pos(origin),
            Bullet {
                kind: BulletKind::Burst,
                radius: config.burst_bullet_radius,
                velocity: Vec2::new(angle.cos(), angle.sin()) * config.burst_bullet_speed,
                life: config.burst_bullet_life,
            },
        ));
    }
}

/// Advance every bullet one tick and prune the expired ones.
///
/// Standard bullets die exactly when their bottom edge clears the top of the
/// arena (`y + r < 0`); burst bullets die on life expiry or once outside the
/// arena grown by `bullet_oob_margin` on every side.
pub fn bullet_update_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut q_bullets: Query<(Entity, &mut Pos, &mut Bullet)>,
) {
    let margin = config.bullet_oob_margin;
    for (entity, mut pos, mut bullet) in q_bullets.iter_mut() {
        pos.0 += bullet.velocity;
        match bullet.kind {
            BulletKind::Standard => {
                if pos.0.y + bullet.radius < 0.0 {
                    commands.entity(entity).despawn();
                }
            }
            BulletKind::Burst => {
                bullet.life -= 1;
                if bullet.life <= 0
                    || pos.0.x < -margin
                    || pos.0.x > config.arena_width + margin
                    || pos.0.y < -margin
                    || pos.0.y > config.arena_height + margin
                {
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}
