//! Modifier - Multiplicative stat factors carried by equipment

use super::{StatField, Stats};
use serde::{Deserialize, Serialize};

/// A Stats-shaped set of multiplicative factors
///
/// `Modifier::new().with(StatField::Speed, 1.3)` scales speed by 30% when
/// applied and divides it back out when reverted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifier(Stats);

impl Modifier {
    /// Create an identity modifier (no factors)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a factor for a field
    pub fn with(mut self, field: StatField, factor: f64) -> Self {
        self.0.set(field, factor);
        self
    }

    /// Factor for a field, if this modifier touches it
    pub fn factor(&self, field: StatField) -> Option<f64> {
        self.0.get(field)
    }

    /// All (field, factor) pairs this modifier carries
    pub fn factors(&self) -> impl Iterator<Item = (StatField, f64)> + '_ {
        self.0.present()
    }

    pub fn is_identity(&self) -> bool {
        self.0.present().next().is_none()
    }
}

impl From<Stats> for Modifier {
    fn from(factors: Stats) -> Self {
        Modifier(factors)
    }
}
