//! Dodge probability from relative speed

use crate::stats::round2;
use rand::Rng;

/// How much faster the defender is than the attacker, relative to its own speed
///
/// 0.5 means the defender is twice as fast. Rounded to two decimals.
pub fn dodge_coefficient(self_speed: f64, source_speed: f64) -> f64 {
    round2((self_speed - source_speed) / self_speed)
}

/// Roll whether an attack is dodged
///
/// Draws uniformly from `[floor, coefficient]` and dodges on a non-negative
/// draw. No roll happens when either speed is missing, when the defender has
/// no positive speed, or when the range is empty.
pub fn dodged(
    self_speed: Option<f64>,
    source_speed: Option<f64>,
    floor: f64,
    rng: &mut impl Rng,
) -> bool {
    let (Some(own), Some(source)) = (self_speed, source_speed) else {
        return false;
    };
    if own <= 0.0 {
        return false;
    }

    let coefficient = dodge_coefficient(own, source);
    if coefficient <= floor {
        return false;
    }
    rng.gen_range(floor..=coefficient) >= 0.0
}
