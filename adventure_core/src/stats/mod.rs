//! Stats - Optional numeric attributes shared by players and enemies
//!
//! Every field is optional. An absent field is never treated as zero: it is
//! skipped when modifiers are applied and skipped when stats are shown.

mod modifier;

pub use modifier::Modifier;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Named stat attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatField {
    MaxHealth,
    AttackPower,
    Speed,
    HealingPower,
}

impl StatField {
    /// All fields in display order
    pub fn all() -> &'static [StatField] {
        &[
            StatField::MaxHealth,
            StatField::AttackPower,
            StatField::Speed,
            StatField::HealingPower,
        ]
    }

    /// Human readable label ("Max Health")
    pub fn label(&self) -> &'static str {
        match self {
            StatField::MaxHealth => "Max Health",
            StatField::AttackPower => "Attack Power",
            StatField::Speed => "Speed",
            StatField::HealingPower => "Healing Power",
        }
    }
}

/// Stat record for an actor (or, wrapped in [`Modifier`], a set of factors)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_health: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_power: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healing_power: Option<f64>,
}

impl Stats {
    /// Create an empty record (every field absent)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, field: StatField, value: f64) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: StatField) -> Option<f64> {
        match field {
            StatField::MaxHealth => self.max_health,
            StatField::AttackPower => self.attack_power,
            StatField::Speed => self.speed,
            StatField::HealingPower => self.healing_power,
        }
    }

    pub fn set(&mut self, field: StatField, value: f64) {
        *self.slot_mut(field) = Some(value);
    }

    fn slot_mut(&mut self, field: StatField) -> &mut Option<f64> {
        match field {
            StatField::MaxHealth => &mut self.max_health,
            StatField::AttackPower => &mut self.attack_power,
            StatField::Speed => &mut self.speed,
            StatField::HealingPower => &mut self.healing_power,
        }
    }

    /// Iterate over present fields in display order
    pub fn present(&self) -> impl Iterator<Item = (StatField, f64)> + '_ {
        StatField::all()
            .iter()
            .filter_map(move |field| self.get(*field).map(|value| (*field, value)))
    }

    /// Scale every field the modifier names by its factor, rounding to 1 decimal
    pub fn apply_modifier(&mut self, modifier: &Modifier) {
        for (field, factor) in modifier.factors() {
            if let Some(value) = self.slot_mut(field).as_mut() {
                *value = round1(*value * factor);
            }
        }
    }

    /// Divide every field the modifier names by its factor, rounding to 1 decimal
    ///
    /// Only the inverse of [`Stats::apply_modifier`] up to that rounding.
    pub fn revert_modifier(&mut self, modifier: &Modifier) {
        for (field, factor) in modifier.factors() {
            if factor == 0.0 {
                continue;
            }
            if let Some(value) = self.slot_mut(field).as_mut() {
                *value = round1(*value / factor);
            }
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, value) in self.present() {
            writeln!(f, "{}: {}", field.label(), value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_absent_fields_are_not_zero() {
        let stats = Stats::new().with(StatField::Speed, 5.0);
        assert_eq!(stats.get(StatField::Speed), Some(5.0));
        assert_eq!(stats.get(StatField::AttackPower), None);
        assert_eq!(stats.present().count(), 1);
    }

    #[test]
    fn test_apply_modifier_rounds_to_one_decimal() {
        let mut stats = Stats::new()
            .with(StatField::Speed, 5.0)
            .with(StatField::AttackPower, 15.0);
        stats.apply_modifier(
            &Modifier::new()
                .with(StatField::Speed, 0.65)
                .with(StatField::AttackPower, 1.2),
        );
        // 5.0 * 0.65 = 3.25, halves round away from zero
        assert!((stats.speed.unwrap() - 3.3).abs() < 1e-9);
        assert!((stats.attack_power.unwrap() - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_modifier_on_absent_field_is_noop() {
        let mut stats = Stats::new().with(StatField::AttackPower, 12.0);
        stats.apply_modifier(&Modifier::new().with(StatField::HealingPower, 2.0));
        assert_eq!(stats.healing_power, None);
        assert_eq!(stats.attack_power, Some(12.0));
    }

    #[test]
    fn test_display_skips_absent() {
        let stats = Stats::new()
            .with(StatField::MaxHealth, 80.0)
            .with(StatField::Speed, 6.5);
        let text = stats.to_string();
        assert!(text.contains("Max Health: 80"));
        assert!(text.contains("Speed: 6.5"));
        assert!(!text.contains("Healing"));
    }

    #[test]
    fn test_round_helpers() {
        assert!((round1(12.345) - 12.3).abs() < 1e-9);
        assert!((round2(-0.456) - -0.46).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_apply_then_revert_within_rounding(
            base in 1.0f64..500.0,
            factor in 0.5f64..2.5,
        ) {
            let base = round1(base);
            let factor = round2(factor);
            let mut stats = Stats::new().with(StatField::AttackPower, base);
            let modifier = Modifier::new().with(StatField::AttackPower, factor);

            stats.apply_modifier(&modifier);
            stats.revert_modifier(&modifier);

            // One rounding step of 0.05 on the scaled value, magnified by 1/factor,
            // plus the final rounding step.
            let tolerance = 0.05 / factor + 0.05 + 1e-9;
            prop_assert!((stats.attack_power.unwrap() - base).abs() <= tolerance);
        }
    }
}
