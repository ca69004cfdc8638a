//! Explosion effects: blood droplets and bone fragments.
//!
//! ## Design
//!
//! An explosion is one [`Explosion`] entity plus a batch of flat
//! [`ExplosionParticle`] entities that back-reference it. Particles are not
//! transform children: arena-space positions stay absolute, and the whole
//! effect can be swept in a single pass when the explosion expires.
//!
//! [`spawn_explosion`] takes only `&mut Commands` and the shared [`StdRng`];
//! no render assets are touched at spawn time. The visual side
//! ([`attach_particle_visual_system`]) supplies meshes and sprites one frame
//! later from a shared-circle-mesh resource, so the simulation runs headless
//! in tests.

use crate::config::GameConfig;
use crate::enemy::EnemyVariant;
use crate::rendering::arena_to_world;
use crate::simulation::Pos;
use bevy::color::Alpha;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashMap;
use std::f32::consts::TAU;

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Blood droplets per explosion: `18 + rng(0..7)`.
const BLOOD_COUNT_MIN: u32 = 18;
const BLOOD_COUNT_SPREAD: u32 = 7;
/// Alpha reference lifetime for blood; droplets rolled above this render at
/// full opacity until they decay under it.
const BLOOD_MAX_LIFE: f32 = 24.0;

/// Bone fragments per explosion: `3 + rng(0..3)`.
const BONE_COUNT_MIN: u32 = 3;
const BONE_COUNT_SPREAD: u32 = 3;
const BONE_MAX_LIFE: f32 = 22.0;

/// Horizontal drag applied to particle velocity each tick.
const PARTICLE_DRAG_X: f32 = 0.96;
/// Vertical drag, lighter than horizontal so arcs stay elongated.
const PARTICLE_DRAG_Y: f32 = 0.98;
/// Downward pull added to vy each tick (arena y grows downward).
const PARTICLE_GRAVITY: f32 = 0.12;

/// Hard cap on explosion age in ticks; the whole effect is removed past
/// this even if stray particles are still alive.
const EXPLOSION_MAX_AGE: u32 = 32;

/// sRGB blood tints, picked uniformly per droplet.
const BLOOD_COLORS: [[f32; 3]; 4] = [
    [0.784, 0.000, 0.098],
    [0.627, 0.000, 0.067],
    [0.878, 0.212, 0.212],
    [0.576, 0.133, 0.133],
];

const BONE_COLOR: [f32; 3] = [0.973, 0.973, 0.965];

// ── Components ────────────────────────────────────────────────────────────────

/// Root entity of one explosion effect.
#[derive(Component, Debug, Clone, Copy)]
pub struct Explosion {
    /// Ticks since the explosion was spawned.
    pub age: u32,
    /// Variant of the enemy that died here (kept for flavour/tooling).
    pub variant: EnemyVariant,
}

/// Shape data distinguishing the two particle flavours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    Blood { size: f32, color: [f32; 3] },
    Bone { size: f32, length: f32, angle: f32 },
}

/// One short-lived explosion fragment.
#[derive(Component, Debug, Clone, Copy)]
pub struct ExplosionParticle {
    /// The [`Explosion`] entity this particle belongs to.
    pub explosion: Entity,
    pub velocity: Vec2,
    /// Remaining life in ticks; fractional because it is rolled uniformly.
    pub life: f32,
    pub max_life: f32,
    pub kind: ParticleKind,
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Spawn a full explosion effect at `pos`: the root entity, a splash of
/// blood droplets, and a few bone fragments, all rolled from `rng`.
pub fn spawn_explosion(commands: &mut Commands, rng: &mut StdRng, pos: Vec2, variant: EnemyVariant) {
    let explosion = commands.spawn((Explosion { age: 0, variant }, Pos(pos))).id();

    let blood_count = BLOOD_COUNT_MIN + rng.gen_range(0..BLOOD_COUNT_SPREAD);
    for _ in 0..blood_count {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(2.0..5.0);
        let jitter = Vec2::new(rng.gen_range(-4.0..4.0), rng.gen_range(-3.5..3.5));
        commands.spawn((
            Pos(pos + jitter),
            ExplosionParticle {
                explosion,
                velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: rng.gen_range(16.0..36.0),
                max_life: BLOOD_MAX_LIFE,
                kind: ParticleKind::Blood {
                    size: rng.gen_range(2.5..5.2),
                    color: BLOOD_COLORS[rng.gen_range(0..BLOOD_COLORS.len())],
                },
            },
        ));
    }

    let bone_count = BONE_COUNT_MIN + rng.gen_range(0..BONE_COUNT_SPREAD);
    for _ in 0..bone_count {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(2.0..4.5);
        let jitter = Vec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-4.0..4.0));
        commands.spawn((
            Pos(pos + jitter),
            ExplosionParticle {
                explosion,
                velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: rng.gen_range(20.0..34.0),
                max_life: BONE_MAX_LIFE,
                kind: ParticleKind::Bone {
                    size: rng.gen_range(2.2..3.5),
                    length: rng.gen_range(10.0..18.0),
                    angle: rng.gen_range(0.0..TAU),
                },
            },
        ));
    }
}

// ── Fixed-tick update ─────────────────────────────────────────────────────────

/// Advance all explosion effects one tick.
///
/// Particles integrate velocity with drag and gravity and lose one life per
/// tick; dead particles are pruned. An explosion is removed, along with any
/// particles it still owns, once its particle set is empty or its age
/// exceeds [`EXPLOSION_MAX_AGE`], whichever comes first.
pub fn explosion_update_system(
    mut commands: Commands,
    mut q_explosions: Query<(Entity, &mut Explosion)>,
    mut q_particles: Query<(Entity, &mut Pos, &mut ExplosionParticle)>,
) {
    let mut survivors: HashMap<Entity, Vec<Entity>> = HashMap::new();

    for (entity, mut pos, mut particle) in q_particles.iter_mut() {
        pos.0 += particle.velocity;
        particle.velocity.x *= PARTICLE_DRAG_X;
        particle.velocity.y *= PARTICLE_DRAG_Y;
        particle.velocity.y += PARTICLE_GRAVITY;
        particle.life -= 1.0;
        if particle.life <= 0.0 {
            commands.entity(entity).despawn();
        } else {
            survivors.entry(particle.explosion).or_default().push(entity);
        }
    }

    for (entity, mut explosion) in q_explosions.iter_mut() {
        explosion.age += 1;
        let live = survivors.get(&entity).map_or(0, Vec::len);
        if live == 0 || explosion.age > EXPLOSION_MAX_AGE {
            if let Some(particles) = survivors.get(&entity) {
                for &particle in particles {
                    commands.entity(particle).despawn();
                }
            }
            commands.entity(entity).despawn();
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Shared unit-circle mesh used by every blood droplet (created once at
/// startup); each droplet scales it via its `Transform`.
#[derive(Resource)]
pub struct ParticleMesh(pub Handle<Mesh>);

/// Registers the particle visual pipeline: mesh-resource startup plus the
/// attach and fade systems. The simulation side (spawn + update) is
/// registered by [`crate::simulation::SimulationPlugin`] instead, so
/// headless apps skip this plugin entirely.
pub struct ParticlesPlugin;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_particle_mesh).add_systems(
            Update,
            (attach_particle_visual_system, particle_fade_system).chain(),
        );
    }
}

/// Create the shared circle mesh and store it as a [`ParticleMesh`] resource.
fn init_particle_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let handle = meshes.add(circle_mesh(1.0, 8));
    commands.insert_resource(ParticleMesh(handle));
}

/// Attach visuals to every newly spawned particle: a scaled circle mesh with
/// a unique fade-able material for blood, a rotated elongated sprite for
/// bone. Runs on `Added<ExplosionParticle>` only.
pub fn attach_particle_visual_system(
    mut commands: Commands,
    particle_mesh: Res<ParticleMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<GameConfig>,
    query: Query<(Entity, &Pos, &ExplosionParticle), Added<ExplosionParticle>>,
) {
    for (entity, pos, particle) in query.iter() {
        let translation = arena_to_world(pos.0, &config);
        match particle.kind {
            ParticleKind::Blood { size, color } => {
                let material =
                    materials.add(ColorMaterial::from_color(Color::srgb(color[0], color[1], color[2])));
                commands.entity(entity).insert((
                    Mesh2d(particle_mesh.0.clone()),
                    MeshMaterial2d(material),
                    Transform {
                        translation: translation.extend(0.9),
                        scale: Vec3::new(size, size, 1.0),
                        ..default()
                    },
                ));
            }
            ParticleKind::Bone {
                size,
                length,
                angle,
            } => {
                commands.entity(entity).insert((
                    Sprite::from_color(
                        Color::srgb(BONE_COLOR[0], BONE_COLOR[1], BONE_COLOR[2]),
                        Vec2::new(length, size),
                    ),
                    Transform {
                        translation: translation.extend(0.91),
                        // Arena y is flipped relative to world y.
                        rotation: Quat::from_rotation_z(-angle),
                        ..default()
                    },
                ));
            }
        }
    }
}

/// Fade every particle's alpha with `life / max_life` (clamped; long-rolled
/// droplets stay opaque until they decay under the reference lifetime).
pub fn particle_fade_system(
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(
        &ExplosionParticle,
        Option<&MeshMaterial2d<ColorMaterial>>,
        Option<&mut Sprite>,
    )>,
) {
    for (particle, material, sprite) in query.iter_mut() {
        let alpha = (particle.life / particle.max_life).clamp(0.0, 1.0);
        if let Some(handle) = material {
            if let Some(material) = materials.get_mut(&handle.0) {
                material.color.set_alpha(alpha);
            }
        }
        if let Some(mut sprite) = sprite {
            sprite.color.set_alpha(alpha);
        }
    }
}

/// Build a filled circle fan mesh of `sides` segments.
pub(crate) fn circle_mesh(radius: f32, sides: u32) -> Mesh {
    let n = sides as usize;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(n + 1);

    // Centre vertex.
    positions.push([0.0, 0.0, 0.0]);
    normals.push([0.0, 0.0, 1.0]);
    uvs.push([0.5, 0.5]);

    for i in 0..n {
        let angle = TAU * i as f32 / n as f32;
        let x = radius * angle.cos();
        let y = radius * angle.sin();
        positions.push([x, y, 0.0]);
        normals.push([0.0, 0.0, 1.0]);
        uvs.push([x / (2.0 * radius) + 0.5, y / (2.0 * radius) + 0.5]);
    }

    let mut indices: Vec<u32> = Vec::with_capacity(n * 3);
    for i in 0..n as u32 {
        let v1 = i + 1;
        let v2 = (i + 1) % n as u32 + 1;
        indices.extend_from_slice(&[0, v1, v2]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}
