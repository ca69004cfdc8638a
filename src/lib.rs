//! Flurry - a single-screen arcade snowball shooter.
//!
//! The player holds the bottom of a 480x640 arena, pelting descending
//! raiders with snowballs while juggling two cooldown-gated abilities: a
//! radial snowball burst and a short invulnerability shield. The whole
//! simulation is a deterministic 60 Hz fixed-tick loop over plain data
//! components; rendering and input are thin layers on either side of it.

pub mod abilities;
pub mod bullet;
pub mod combat;
pub mod config;
pub mod constants;
pub mod enemy;
pub mod error;
pub mod input;
pub mod menu;
pub mod particles;
pub mod player;
pub mod rendering;
pub mod rng;
pub mod simulation;
