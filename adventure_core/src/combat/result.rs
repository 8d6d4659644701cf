//! DamageOutcome - What one hit did to its target

/// Result of delivering damage to an actor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DamageOutcome {
    /// Damage subtracted from health (0 when dodged)
    pub applied: f64,
    pub dodged: bool,
    /// This hit took the target from alive to down
    pub defeated: bool,
}

impl DamageOutcome {
    pub fn hit(applied: f64, defeated: bool) -> Self {
        DamageOutcome {
            applied,
            dodged: false,
            defeated,
        }
    }

    pub fn dodge() -> Self {
        DamageOutcome {
            applied: 0.0,
            dodged: true,
            defeated: false,
        }
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        if self.dodged {
            "dodged".to_string()
        } else if self.defeated {
            format!("{:.1} damage, defeated", self.applied)
        } else {
            format!("{:.1} damage", self.applied)
        }
    }
}
