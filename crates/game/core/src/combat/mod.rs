//! Combat resolution system.
//!
//! Pure functions for resolving attacks. The dice stream is the game's only
//! source of randomness and is replayed identically by every party that
//! evaluates a transition.
//!
//! # Core Functions
//!
//! - `resolve_damage`: defender hp after a seeded attack
//! - `roll_damage`: the same with a full [`DamageRoll`] breakdown
//! - `apply_damage`: HP reduction (clamped to 0)

pub mod damage;
pub mod dice;

pub use damage::{CombatResolver, DamageRoll, apply_damage, resolve_damage, roll_damage};
pub use dice::{DiceRng, PcgStream};
