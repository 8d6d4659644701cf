//! Prelude module for convenient imports
//!
//! ```rust
//! use adventure_core::prelude::*;
//! ```

// State and identifiers
pub use crate::state::GameState;
pub use crate::types::{ActorId, ActorKind, EnemyKind, EquipSlot, ItemId, PlayerClass};

// Commands and events
pub use crate::command::{ActionCost, Command};
pub use crate::error::ActionError;
pub use crate::event::GameEvent;

// Flow
pub use crate::battle::{run_battle, BattleOutcome};
pub use crate::campaign::{run_campaign, CampaignOutcome};
pub use crate::controller::{Controller, ScriptedController};
pub use crate::interaction::run_interaction;

// Config
pub use crate::config::{default_world, load_world, WorldConfig};
