//! Headless whole-simulation tests.
//!
//! The harness runs the real [`SimulationPlugin`] under `MinimalPlugins`
//! with a seeded RNG and a paused virtual clock, then drives ticks by
//! running the `FixedUpdate` schedule by hand — one call, one tick,
//! deterministically. `app.update()` after each tick applies pending state
//! transitions without ever firing a spurious fixed step (the virtual clock
//! never advances).
//!
//! Tests write [`IntentState`] directly instead of synthesising key events,
//! which is the input layer's contract.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use flurry::abilities::{BurstAbility, ShieldAbility};
use flurry::bullet::{Bullet, BulletKind};
use flurry::enemy::{Enemy, EnemySpawnState, EnemyVariant};
use flurry::input::IntentState;
use flurry::menu::GameState;
use flurry::particles::{Explosion, ExplosionParticle, ParticleKind};
use flurry::player::{Player, PlayerFireCooldown, PlayerScore};
use flurry::rng::GameRng;
use flurry::simulation::{Pos, SimulationPlugin};

// ── Harness ───────────────────────────────────────────────────────────────────

fn sim_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.add_plugins(SimulationPlugin);
    app.insert_resource(GameRng::seeded(seed));
    // Freeze the virtual clock so app.update() never runs fixed steps of its
    // own; ticks only happen through tick() below.
    app.world_mut().resource_mut::<Time<Virtual>>().pause();
    app.update();
    app
}

/// Request `Playing` and apply the transition (runs the session reset).
fn start(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();
}

/// Run exactly one simulation tick, then apply any state transition it
/// requested.
fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
    app.update();
}

fn ticks(app: &mut App, n: usize) {
    for _ in 0..n {
        tick(app);
    }
}

/// Push the spawner countdown out of reach for tests that need an
/// enemy-free arena.
fn suppress_spawner(app: &mut App) {
    app.world_mut().resource_mut::<EnemySpawnState>().countdown = f32::MAX;
}

fn current_state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

fn count<C: Component>(app: &mut App) -> usize {
    let mut query = app.world_mut().query_filtered::<(), With<C>>();
    query.iter(app.world()).count()
}

fn player_pos(app: &mut App) -> Vec2 {
    let mut query = app.world_mut().query_filtered::<&Pos, With<Player>>();
    query.single(app.world()).unwrap().0
}

fn score(app: &App) -> PlayerScore {
    *app.world().resource::<PlayerScore>()
}

fn particle_counts(app: &mut App) -> (usize, usize) {
    let mut query = app.world_mut().query::<&ExplosionParticle>();
    let mut blood = 0;
    let mut bone = 0;
    for particle in query.iter(app.world()) {
        match particle.kind {
            ParticleKind::Blood { .. } => blood += 1,
            ParticleKind::Bone { .. } => bone += 1,
        }
    }
    (blood, bone)
}

fn spawn_enemy(app: &mut App, pos: Vec2, speed: f32, hp: i32) {
    app.world_mut().spawn((
        Pos(pos),
        Enemy {
            speed,
            hp,
            variant: EnemyVariant::Raider,
        },
    ));
}

fn spawn_standard_bullet_at(app: &mut App, pos: Vec2) {
    app.world_mut().spawn((
        Pos(pos),
        Bullet {
            kind: BulletKind::Standard,
            radius: 7.0,
            velocity: Vec2::new(0.0, -8.0),
            life: 0,
        },
    ));
}

// ── Session lifecycle ─────────────────────────────────────────────────────────

#[test]
fn starting_a_session_resets_everything() {
    let mut app = sim_app(1);
    start(&mut app);

    assert_eq!(current_state(&app), GameState::Playing);
    assert_eq!(player_pos(&mut app), Vec2::new(240.0, 580.0));
    assert_eq!(score(&app).points, 0);
    assert_eq!(count::<Bullet>(&mut app), 0);
    assert_eq!(count::<Enemy>(&mut app), 0);
    assert_eq!(count::<Explosion>(&mut app), 0);
    assert!(app.world().resource::<BurstAbility>().0.is_ready());
    assert!(app.world().resource::<ShieldAbility>().0.is_ready());
    assert_eq!(app.world().resource::<PlayerFireCooldown>().ticks, 0);
}

#[test]
fn restart_after_game_over_clears_the_world() {
    let mut app = sim_app(2);
    start(&mut app);
    suppress_spawner(&mut app);

    // Force a game over by dropping an enemy onto the player.
    spawn_enemy(&mut app, Vec2::new(240.0, 580.0), 2.5, 1);
    tick(&mut app);
    assert_eq!(current_state(&app), GameState::GameOver);
    assert_eq!(count::<Enemy>(&mut app), 1);

    start(&mut app);
    assert_eq!(current_state(&app), GameState::Playing);
    assert_eq!(count::<Enemy>(&mut app), 0);
    assert_eq!(count::<Bullet>(&mut app), 0);
    assert_eq!(count::<Explosion>(&mut app), 0);
    assert_eq!(count::<ExplosionParticle>(&mut app), 0);
    assert_eq!(score(&app).points, 0);
    assert_eq!(player_pos(&mut app), Vec2::new(240.0, 580.0));
    assert!(app.world().resource::<BurstAbility>().0.is_ready());
    assert!(app.world().resource::<ShieldAbility>().0.is_ready());
}

// ── Movement & firing ─────────────────────────────────────────────────────────

#[test]
fn player_clamps_to_arena_bounds() {
    let mut app = sim_app(3);
    start(&mut app);
    suppress_spawner(&mut app);

    {
        let mut intents = app.world_mut().resource_mut::<IntentState>();
        intents.move_left = true;
        intents.move_up = true;
    }
    ticks(&mut app, 140);
    assert_eq!(player_pos(&mut app), Vec2::new(19.0, 19.0));

    {
        let mut intents = app.world_mut().resource_mut::<IntentState>();
        *intents = IntentState {
            move_right: true,
            move_down: true,
            ..Default::default()
        };
    }
    ticks(&mut app, 200);
    assert_eq!(player_pos(&mut app), Vec2::new(461.0, 621.0));
}

#[test]
fn fire_cooldown_spaces_shots_exactly_twelve_ticks() {
    let mut app = sim_app(4);
    start(&mut app);
    suppress_spawner(&mut app);

    app.world_mut().resource_mut::<IntentState>().fire = true;
    tick(&mut app);
    assert_eq!(count::<Bullet>(&mut app), 1);
    // Set to 12 on the firing tick and decremented the same tick.
    assert_eq!(app.world().resource::<PlayerFireCooldown>().ticks, 11);

    ticks(&mut app, 11);
    assert_eq!(count::<Bullet>(&mut app), 1, "no shot while cooling down");
    assert_eq!(app.world().resource::<PlayerFireCooldown>().ticks, 0);

    tick(&mut app);
    assert_eq!(count::<Bullet>(&mut app), 2, "second shot on tick 13");
}

#[test]
fn standard_bullet_despawns_exactly_when_it_clears_the_top() {
    let mut app = sim_app(5);
    start(&mut app);
    suppress_spawner(&mut app);

    app.world_mut().resource_mut::<IntentState>().fire = true;
    tick(&mut app);
    app.world_mut().resource_mut::<IntentState>().fire = false;

    // Muzzle y = 557; pruned when y + r < 0, i.e. on the 71st movement tick.
    ticks(&mut app, 69);
    assert_eq!(count::<Bullet>(&mut app), 1);
    tick(&mut app);
    assert_eq!(count::<Bullet>(&mut app), 0);
}

// ── Burst ability ─────────────────────────────────────────────────────────────

#[test]
fn burst_activation_emits_one_full_ring() {
    let mut app = sim_app(6);
    start(&mut app);
    suppress_spawner(&mut app);

    app.world_mut().resource_mut::<IntentState>().burst = true;
    tick(&mut app);

    let world = app.world_mut();
    let mut query = world.query::<(&Bullet, &Pos)>();
    let bullets: Vec<Bullet> = query.iter(world).map(|(b, _)| *b).collect();
    assert_eq!(bullets.len(), 24);
    for bullet in &bullets {
        assert_eq!(bullet.kind, BulletKind::Burst);
        assert_eq!(bullet.radius, 11.0);
        assert_eq!(bullet.life, 31, "one life tick elapsed on the spawn tick");
        assert!((bullet.velocity.length() - 12.0).abs() < 1e-3);
    }
    // Ring includes the zero-angle direction.
    assert!(bullets
        .iter()
        .any(|b| (b.velocity - Vec2::new(12.0, 0.0)).length() < 1e-3));

    let burst = app.world().resource::<BurstAbility>();
    assert!(burst.0.is_active());
    assert!(!burst.0.is_ready());

    // Re-activation before the cooldown completes is a silent no-op.
    app.world_mut().resource_mut::<IntentState>().burst = true;
    tick(&mut app);
    assert_eq!(count::<Bullet>(&mut app), 24);
}

// ── Collision resolution ──────────────────────────────────────────────────────

#[test]
fn bullet_kill_awards_score_and_spawns_explosion() {
    let mut app = sim_app(7);
    start(&mut app);
    suppress_spawner(&mut app);

    spawn_enemy(&mut app, Vec2::new(240.0, 300.0), 0.0, 1);
    spawn_standard_bullet_at(&mut app, Vec2::new(240.0, 308.0));
    tick(&mut app);

    assert_eq!(count::<Enemy>(&mut app), 0);
    assert_eq!(count::<Bullet>(&mut app), 0, "standard bullet is consumed");
    assert_eq!(score(&app).points, 100);
    assert_eq!(count::<Explosion>(&mut app), 1);

    let (blood, bone) = particle_counts(&mut app);
    assert!((18..=24).contains(&blood), "blood count {blood}");
    assert!((3..=5).contains(&bone), "bone count {bone}");
}

#[test]
fn at_most_one_bullet_applies_per_enemy_per_tick() {
    let mut app = sim_app(8);
    start(&mut app);
    suppress_spawner(&mut app);

    spawn_enemy(&mut app, Vec2::new(240.0, 300.0), 0.0, 2);
    spawn_standard_bullet_at(&mut app, Vec2::new(240.0, 308.0));
    spawn_standard_bullet_at(&mut app, Vec2::new(240.0, 310.0));
    tick(&mut app);

    // Both bullets overlapped, but only the first in iteration order landed.
    assert_eq!(count::<Enemy>(&mut app), 1);
    assert_eq!(count::<Bullet>(&mut app), 1);
    assert_eq!(score(&app).points, 0);

    let world = app.world_mut();
    let mut query = world.query::<&Enemy>();
    assert_eq!(query.single(world).unwrap().hp, 1);
}

#[test]
fn burst_bullets_pierce_through_kills() {
    let mut app = sim_app(9);
    start(&mut app);
    suppress_spawner(&mut app);

    spawn_enemy(&mut app, Vec2::new(240.0, 300.0), 0.0, 1);
    app.world_mut().spawn((
        Pos(Vec2::new(240.0, 300.0)),
        Bullet {
            kind: BulletKind::Burst,
            radius: 11.0,
            velocity: Vec2::ZERO,
            life: 5,
        },
    ));
    tick(&mut app);

    assert_eq!(count::<Enemy>(&mut app), 0);
    assert_eq!(count::<Bullet>(&mut app), 1, "burst bullet survives the kill");
    assert_eq!(score(&app).points, 100);
}

#[test]
fn shield_contact_destroys_enemy_without_score() {
    let mut app = sim_app(10);
    start(&mut app);
    suppress_spawner(&mut app);

    app.world_mut()
        .resource_mut::<ShieldAbility>()
        .0
        .activate();
    spawn_enemy(&mut app, Vec2::new(240.0, 580.0), 0.0, 1);
    tick(&mut app);

    assert_eq!(current_state(&app), GameState::Playing);
    assert_eq!(count::<Enemy>(&mut app), 0);
    assert_eq!(count::<Explosion>(&mut app), 1);
    assert_eq!(score(&app).points, 0);
    assert_eq!(score(&app).destroyed, 1);
}

#[test]
fn unshielded_contact_freezes_the_world_in_game_over() {
    let mut app = sim_app(11);
    start(&mut app);
    suppress_spawner(&mut app);

    spawn_enemy(&mut app, Vec2::new(240.0, 580.0), 2.5, 1);
    tick(&mut app);

    assert_eq!(current_state(&app), GameState::GameOver);
    assert_eq!(count::<Enemy>(&mut app), 1, "no despawn on a lethal hit");

    let frozen_pos = {
        let world = app.world_mut();
        let mut query = world.query_filtered::<&Pos, With<Enemy>>();
        query.single(world).unwrap().0
    };
    ticks(&mut app, 5);
    let after = {
        let world = app.world_mut();
        let mut query = world.query_filtered::<&Pos, With<Enemy>>();
        query.single(world).unwrap().0
    };
    assert_eq!(frozen_pos, after, "nothing moves after game over");
}

// ── Spawner ───────────────────────────────────────────────────────────────────

#[test]
fn spawner_rolls_parameters_and_rearms_its_countdown() {
    let mut app = sim_app(12);
    start(&mut app);

    tick(&mut app);
    assert_eq!(count::<Enemy>(&mut app), 1, "countdown starts at zero");

    {
        let world = app.world_mut();
        let mut query = world.query::<(&Enemy, &Pos)>();
        let (enemy, pos) = query.single(world).unwrap();
        assert!((2.0..3.2).contains(&enemy.speed));
        assert_eq!(enemy.hp, 1);
        assert!((30.0..450.0).contains(&pos.0.x));
        // Spawned at y = -32 and advanced once on the spawn tick.
        assert!((-30.0..-28.7).contains(&pos.0.y), "y = {}", pos.0.y);
    }
    let countdown = app.world().resource::<EnemySpawnState>().countdown;
    assert!((34.0..58.0).contains(&countdown), "countdown {countdown}");

    // No second spawn can happen before the countdown elapses...
    ticks(&mut app, 30);
    assert_eq!(count::<Enemy>(&mut app), 1);
    // ...and one must have happened once it has.
    ticks(&mut app, 30);
    assert!(count::<Enemy>(&mut app) >= 2);
}

// ── Explosions ────────────────────────────────────────────────────────────────

#[test]
fn explosion_is_removed_at_its_age_cap() {
    let mut app = sim_app(13);
    start(&mut app);
    suppress_spawner(&mut app);

    spawn_enemy(&mut app, Vec2::new(240.0, 300.0), 0.0, 1);
    spawn_standard_bullet_at(&mut app, Vec2::new(240.0, 308.0));
    tick(&mut app);
    assert_eq!(count::<Explosion>(&mut app), 1);

    // All particle lives start at 16+, so the effect is certainly alive here.
    ticks(&mut app, 9);
    assert_eq!(count::<Explosion>(&mut app), 1);

    // By age 33 the cap has removed the explosion and any stray particles.
    ticks(&mut app, 23);
    assert_eq!(count::<Explosion>(&mut app), 0);
    assert_eq!(count::<ExplosionParticle>(&mut app), 0);
}
