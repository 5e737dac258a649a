//! Combat resolution.
//!
//! Pure functions turning an incoming hit into a health change:
//!
//! - `calculate_damage`: resistance → vulnerability → invulnerability
//! - `calculate_stun`: invulnerability cancels stun
//! - `apply_damage`: HP change floored at 0 and capped at maximum

pub mod damage;

pub use damage::{Affinities, apply_damage, calculate_damage, calculate_stun};
