//! Combat resolution - dodge rolls, damage intake, healing and looting
//!
//! Everything here mutates a [`GameState`](crate::state::GameState) and keeps
//! its alive counters and terminal flags in step with every health change.

mod dodge;
mod loot;
mod resolution;
mod result;

pub use dodge::{dodge_coefficient, dodged};
pub use result::DamageOutcome;
