//! Collision and damage resolution.
//!
//! Both resolvers run after all movement for the tick, so overlaps are
//! tested against post-movement positions. Collision is frame-discrete; no
//! swept tests. Entity removal goes through the command queue, which is
//! flushed between the chained systems, so a kill in the bullet pass is
//! already gone by the player pass.

use crate::abilities::ShieldAbility;
use crate::bullet::{Bullet, BulletKind};
use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::menu::GameState;
use crate::particles::spawn_explosion;
use crate::player::{Player, PlayerScore};
use crate::rng::GameRng;
use crate::simulation::Pos;
use bevy::prelude::*;
use std::collections::HashSet;

// ── Overlap predicates ────────────────────────────────────────────────────────

/// Bullet-centre-in-enemy-box test. Burst bullets get the box grown by
/// `burst_margin` on both axes; standard bullets use the bare half-extents.
pub fn bullet_overlaps_enemy(
    bullet_pos: Vec2,
    kind: BulletKind,
    enemy_pos: Vec2,
    enemy_half: Vec2,
    burst_margin: f32,
) -> bool {
    let margin = if kind == BulletKind::Burst {
        burst_margin
    } else {
        0.0
    };
    (bullet_pos.x - enemy_pos.x).abs() < enemy_half.x + margin
        && (bullet_pos.y - enemy_pos.y).abs() < enemy_half.y + margin
}

/// Box-vs-box overlap with a per-axis `tolerance` subtracted from the summed
/// half-extents (the player-contact forgiveness margin).
pub fn boxes_overlap(a: Vec2, a_half: Vec2, b: Vec2, b_half: Vec2, tolerance: f32) -> bool {
    (a.x - b.x).abs() < a_half.x + b_half.x - tolerance
        && (a.y - b.y).abs() < a_half.y + b_half.y - tolerance
}

// ── Resolvers ─────────────────────────────────────────────────────────────────

/// Bullets vs enemies.
///
/// For each enemy, scan bullets in iteration order and apply **at most one**
/// bullet's effect per enemy per tick: the first overlapping bullet
/// decrements hp and ends the scan for that enemy whether or not the hit was
/// lethal. Standard bullets are consumed by the hit; burst bullets pierce
/// and stay live for other enemies. A lethal hit spawns an explosion,
/// removes the enemy, and awards `kill_score` points.
pub fn bullet_enemy_collision_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    mut score: ResMut<PlayerScore>,
    mut q_enemies: Query<(Entity, &Pos, &mut Enemy)>,
    q_bullets: Query<(Entity, &Pos, &Bullet)>,
) {
    let enemy_half = Vec2::new(config.enemy_width / 2.0, config.enemy_height / 2.0);
    // Bullets despawn via commands (deferred), so consumed ones are tracked
    // here to keep them from hitting a second enemy in the same pass.
    let mut spent: HashSet<Entity> = HashSet::new();

    for (enemy_entity, enemy_pos, mut enemy) in q_enemies.iter_mut() {
        for (bullet_entity, bullet_pos, bullet) in q_bullets.iter() {
            if spent.contains(&bullet_entity) {
                continue;
            }
            if !bullet_overlaps_enemy(
                bullet_pos.0,
                bullet.kind,
                enemy_pos.0,
                enemy_half,
                config.burst_hit_margin,
            ) {
                continue;
            }

            enemy.hp -= 1;
            if bullet.kind != BulletKind::Burst {
                spent.insert(bullet_entity);
                commands.entity(bullet_entity).despawn();
            }
            if enemy.hp <= 0 {
                spawn_explosion(&mut commands, &mut rng.0, enemy_pos.0, enemy.variant);
                commands.entity(enemy_entity).despawn();
                score.points += config.kill_score;
                score.destroyed += 1;
            }
            // One bullet effect per enemy per tick, lethal or not.
            break;
        }
    }
}

/// Player vs enemies.
///
/// Without an active shield, contact ends the run: the state machine is sent
/// to `GameOver` and the world freezes in place (no despawns, no reset).
/// With the shield up, the enemy is destroyed outright; an explosion plays
/// but no points are awarded.
pub fn player_enemy_collision_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    mut score: ResMut<PlayerScore>,
    shield: Res<ShieldAbility>,
    q_player: Query<&Pos, With<Player>>,
    q_enemies: Query<(Entity, &Pos, &Enemy)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Ok(player_pos) = q_player.single() else {
        return;
    };
    let player_half = Vec2::splat(config.player_size / 2.0);
    let enemy_half = Vec2::new(config.enemy_width / 2.0, config.enemy_height / 2.0);

    for (enemy_entity, enemy_pos, enemy) in q_enemies.iter() {
        if !boxes_overlap(
            player_pos.0,
            player_half,
            enemy_pos.0,
            enemy_half,
            config.player_hit_tolerance,
        ) {
            continue;
        }
        if shield.0.is_active() {
            spawn_explosion(&mut commands, &mut rng.0, enemy_pos.0, enemy.variant);
            commands.entity(enemy_entity).despawn();
            score.destroyed += 1;
        } else {
            next_state.set(GameState::GameOver);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENEMY_HALF: Vec2 = Vec2::new(16.0, 19.0);

    #[test]
    fn standard_bullet_hit_is_strict_at_the_edge() {
        let enemy = Vec2::new(100.0, 100.0);
        let on_edge = Vec2::new(116.0, 100.0);
        let inside = Vec2::new(115.9, 100.0);
        assert!(!bullet_overlaps_enemy(
            on_edge,
            BulletKind::Standard,
            enemy,
            ENEMY_HALF,
            9.0
        ));
        assert!(bullet_overlaps_enemy(
            inside,
            BulletKind::Standard,
            enemy,
            ENEMY_HALF,
            9.0
        ));
    }

    #[test]
    fn burst_bullet_uses_expanded_box() {
        let enemy = Vec2::new(100.0, 100.0);
        // 16 + 9 = 25 units of horizontal reach for burst, 16 for standard.
        let between = Vec2::new(120.0, 100.0);
        assert!(bullet_overlaps_enemy(
            between,
            BulletKind::Burst,
            enemy,
            ENEMY_HALF,
            9.0
        ));
        assert!(!bullet_overlaps_enemy(
            between,
            BulletKind::Standard,
            enemy,
            ENEMY_HALF,
            9.0
        ));
        assert!(!bullet_overlaps_enemy(
            Vec2::new(125.0, 100.0),
            BulletKind::Burst,
            enemy,
            ENEMY_HALF,
            9.0
        ));
    }

    #[test]
    fn player_contact_tolerance_shrinks_the_overlap() {
        let player_half = Vec2::splat(19.0);
        let enemy = Vec2::new(100.0, 100.0);
        // Summed x half-extents 19 + 16 = 35, minus tolerance 4 = 31.
        assert!(boxes_overlap(
            Vec2::new(130.9, 100.0),
            player_half,
            enemy,
            ENEMY_HALF,
            4.0
        ));
        assert!(!boxes_overlap(
            Vec2::new(131.0, 100.0),
            player_half,
            enemy,
            ENEMY_HALF,
            4.0
        ));
    }
}
