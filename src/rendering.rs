//! Presentation: camera, arena-to-world mapping, entity visuals, and the HUD.
//!
//! ## Layer model
//!
//! | Layer            | Technology | z    |
//! |------------------|------------|------|
//! | Enemies          | `Sprite`   | 0.4  |
//! | Player           | `Sprite`   | 0.5  |
//! | Shield bubble    | `Mesh2d`   | 0.55 |
//! | Bullets          | `Mesh2d`   | 0.6  |
//! | Blood droplets   | `Mesh2d`   | 0.9  |
//! | Bone fragments   | `Sprite`   | 0.91 |
//! | Score / abilities| Bevy UI    | —    |
//!
//! Simulation entities are spawned data-only (`Pos` + a logic component);
//! the `attach_*` systems here supply visuals one frame later via `Added<T>`
//! queries, so the simulation never needs render assets and runs headless in
//! tests. [`sync_transform_system`] then copies arena positions into
//! `Transform` translations every frame.

use crate::abilities::{AbilityTimer, BurstAbility, ShieldAbility};
use crate::bullet::{Bullet, BulletKind};
use crate::config::GameConfig;
use crate::enemy::{Enemy, EnemyVariant};
use crate::particles::circle_mesh;
use crate::player::{Player, PlayerScore};
use crate::simulation::Pos;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

// ── Resources & markers ───────────────────────────────────────────────────────

/// Shared meshes and materials for bullets and the shield bubble, created
/// once at startup.
#[derive(Resource)]
pub struct VisualAssets {
    pub standard_bullet_mesh: Handle<Mesh>,
    pub burst_bullet_mesh: Handle<Mesh>,
    pub standard_bullet_material: Handle<ColorMaterial>,
    pub burst_bullet_material: Handle<ColorMaterial>,
    pub bubble_mesh: Handle<Mesh>,
    pub bubble_material: Handle<ColorMaterial>,
}

/// Marker for the translucent shield bubble child of the player entity.
#[derive(Component)]
pub struct ShieldBubble;

/// Marker for the permanent score HUD node.
#[derive(Component)]
pub struct HudScoreDisplay;

/// Which ability a HUD element reflects.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilitySlot {
    Burst,
    Shield,
}

/// Marker for an ability recharge-bar fill node.
#[derive(Component)]
pub struct AbilityBarFill;

/// Marker for an ability label text node.
#[derive(Component)]
pub struct AbilityLabel;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the per-frame render systems. Startup systems (camera, assets,
/// HUD) are registered from `main.rs` so their ordering against the config
/// loader is explicit in one place.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                attach_player_visual_system,
                attach_enemy_visual_system,
                attach_bullet_visual_system,
                sync_transform_system,
                shield_bubble_visibility_system,
                hud_score_display_system,
                ability_hud_system,
            )
                .chain(),
        );
    }
}

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Map an arena-space position (origin top-left, y down) to Bevy world space
/// (origin centre, y up).
pub fn arena_to_world(pos: Vec2, config: &GameConfig) -> Vec2 {
    Vec2::new(
        pos.x - config.arena_width / 2.0,
        config.arena_height / 2.0 - pos.y,
    )
}

/// Copy every entity's arena position into its `Transform` translation,
/// preserving z and scale.
pub fn sync_transform_system(
    config: Res<GameConfig>,
    mut query: Query<(&Pos, &mut Transform)>,
) {
    for (pos, mut transform) in query.iter_mut() {
        let world = arena_to_world(pos.0, &config);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}

// ── Startup systems ───────────────────────────────────────────────────────────

/// Setup camera for 2D rendering. The window matches the logical arena, so
/// the default orthographic scale is 1:1.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    println!("✓ Camera spawned");
}

/// Create the shared bullet and bubble meshes/materials.
pub fn init_visual_assets(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.insert_resource(VisualAssets {
        standard_bullet_mesh: meshes.add(circle_mesh(config.bullet_radius, 12)),
        burst_bullet_mesh: meshes.add(circle_mesh(config.burst_bullet_radius, 12)),
        standard_bullet_material: materials.add(ColorMaterial::from_color(Color::WHITE)),
        burst_bullet_material: materials
            .add(ColorMaterial::from_color(Color::srgb(0.37, 0.20, 0.07))),
        bubble_mesh: meshes.add(circle_mesh(config.player_size * 0.78, 20)),
        bubble_material: materials
            .add(ColorMaterial::from_color(Color::srgba(1.0, 0.89, 0.41, 0.35))),
    });
}

/// Spawn the permanent top-left score HUD.
pub fn setup_hud_score(mut commands: Commands, config: Res<GameConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            HudScoreDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Score: 0"),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Spawn the two bottom-corner ability indicators: a label plus a recharge
/// bar that drains while the ability is active and refills over its
/// cooldown.
pub fn setup_ability_hud(mut commands: Commands, config: Res<GameConfig>) {
    ability_indicator(
        &mut commands,
        config.hud_font_size,
        AbilitySlot::Burst,
        "BURST [X]",
        Val::Px(10.0),
        None,
    );
    ability_indicator(
        &mut commands,
        config.hud_font_size,
        AbilitySlot::Shield,
        "SHIELD [C]",
        Val::Px(10.0),
        Some(Val::Px(10.0)),
    );
}

fn ability_indicator(
    commands: &mut Commands,
    font_size: f32,
    slot: AbilitySlot,
    label: &str,
    bottom: Val,
    right: Option<Val>,
) {
    let mut node = Node {
        position_type: PositionType::Absolute,
        bottom,
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(4.0),
        ..default()
    };
    match right {
        Some(r) => node.right = r,
        None => node.left = Val::Px(10.0),
    }

    commands.spawn(node).with_children(|root| {
        root.spawn((
            Text::new(label),
            TextFont {
                font_size: font_size * 0.65,
                ..default()
            },
            TextColor(slot_color(slot)),
            slot,
            AbilityLabel,
        ));
        bar(root, slot);
    });
}

fn bar(parent: &mut ChildSpawnerCommands<'_>, slot: AbilitySlot) {
    parent
        .spawn((
            Node {
                width: Val::Px(72.0),
                height: Val::Px(7.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.45)),
        ))
        .with_children(|background| {
            background.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(slot_color(slot)),
                slot,
                AbilityBarFill,
            ));
        });
}

fn slot_color(slot: AbilitySlot) -> Color {
    match slot {
        AbilitySlot::Burst => Color::srgb(0.60, 0.38, 0.16),
        AbilitySlot::Shield => Color::srgb(1.0, 0.89, 0.41),
    }
}

// ── Visual attachment ─────────────────────────────────────────────────────────

fn variant_color(variant: EnemyVariant) -> Color {
    match variant {
        EnemyVariant::Raider => Color::srgb(0.95, 0.55, 0.12),
        EnemyVariant::Lurker => Color::srgb(0.22, 0.36, 0.80),
        EnemyVariant::Brute => Color::srgb(0.26, 0.62, 0.26),
    }
}

/// Give a freshly spawned player its sprite and shield-bubble child.
pub fn attach_player_visual_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    assets: Res<VisualAssets>,
    query: Query<(Entity, &Pos), Added<Player>>,
) {
    for (entity, pos) in query.iter() {
        commands
            .entity(entity)
            .insert((
                Sprite::from_color(
                    Color::srgb(0.82, 0.17, 0.17),
                    Vec2::splat(config.player_size),
                ),
                Transform::from_translation(arena_to_world(pos.0, &config).extend(0.5)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    ShieldBubble,
                    Mesh2d(assets.bubble_mesh.clone()),
                    MeshMaterial2d(assets.bubble_material.clone()),
                    Transform::from_xyz(0.0, 0.0, 0.05),
                    Visibility::Hidden,
                ));
            });
    }
}

/// Give each freshly spawned enemy its variant-tinted sprite.
pub fn attach_enemy_visual_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    query: Query<(Entity, &Pos, &Enemy), Added<Enemy>>,
) {
    for (entity, pos, enemy) in query.iter() {
        commands.entity(entity).insert((
            Sprite::from_color(
                variant_color(enemy.variant),
                Vec2::new(config.enemy_width, config.enemy_height),
            ),
            Transform::from_translation(arena_to_world(pos.0, &config).extend(0.4)),
        ));
    }
}

/// Give each freshly spawned bullet its circle mesh.
pub fn attach_bullet_visual_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    assets: Res<VisualAssets>,
    query: Query<(Entity, &Pos, &Bullet), Added<Bullet>>,
) {
    for (entity, pos, bullet) in query.iter() {
        let (mesh, material) = match bullet.kind {
            BulletKind::Standard => (
                assets.standard_bullet_mesh.clone(),
                assets.standard_bullet_material.clone(),
            ),
            BulletKind::Burst => (
                assets.burst_bullet_mesh.clone(),
                assets.burst_bullet_material.clone(),
            ),
        };
        commands.entity(entity).insert((
            Mesh2d(mesh),
            MeshMaterial2d(material),
            Transform::from_translation(arena_to_world(pos.0, &config).extend(0.6)),
        ));
    }
}

/// Show the bubble only while the shield is up.
pub fn shield_bubble_visibility_system(
    shield: Res<ShieldAbility>,
    mut query: Query<&mut Visibility, With<ShieldBubble>>,
) {
    let target = if shield.0.is_active() {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut visibility in query.iter_mut() {
        *visibility = target;
    }
}

// ── HUD refresh ───────────────────────────────────────────────────────────────

/// Refresh the score HUD when the score changes.
pub fn hud_score_display_system(
    score: Res<PlayerScore>,
    parent_query: Query<&Children, With<HudScoreDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    if !score.is_changed() {
        return;
    }
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!("Score: {}", score.points));
            }
        }
    }
}

/// Charge shown by an ability bar: full while ready, draining over the
/// active window, refilling over the cooldown.
fn charge_fraction(timer: &AbilityTimer) -> f32 {
    if timer.is_active() {
        timer.active_fraction()
    } else if timer.is_ready() {
        1.0
    } else {
        1.0 - timer.cooldown_fraction()
    }
}

/// Drive the ability bars and dim the labels while recharging.
pub fn ability_hud_system(
    burst: Res<BurstAbility>,
    shield: Res<ShieldAbility>,
    mut bars: Query<(&AbilitySlot, &mut Node), With<AbilityBarFill>>,
    mut labels: Query<(&AbilitySlot, &mut TextColor), (With<AbilityLabel>, Without<AbilityBarFill>)>,
) {
    let timer_for = |slot: AbilitySlot| -> AbilityTimer {
        match slot {
            AbilitySlot::Burst => burst.0,
            AbilitySlot::Shield => shield.0,
        }
    };

    for (slot, mut node) in bars.iter_mut() {
        node.width = Val::Percent(charge_fraction(&timer_for(*slot)) * 100.0);
    }
    for (slot, mut color) in labels.iter_mut() {
        let timer = timer_for(*slot);
        *color = if timer.is_ready() || timer.is_active() {
            TextColor(slot_color(*slot))
        } else {
            TextColor(Color::srgba(0.35, 0.35, 0.35, 0.9))
        };
    }
}
