//! Recoverable, user-facing command failures

use thiserror::Error;

/// Why a command could not be carried out
///
/// None of these are fatal: the failure is reported and control goes back to
/// the command loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Unknown target: {0}")]
    UnknownTarget(String),
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("{0} is already dead!")]
    AlreadyDefeated(String),
    #[error("All targets already dead!")]
    AllTargetsDefeated,
    #[error("Can't loot {0} just yet!")]
    NotLootable(String),
    #[error("Nothing equipped in the {0} slot!")]
    EmptySlot(String),
    #[error("Can only equip {item} to {class} class")]
    WrongClass { item: String, class: String },
    #[error("{0} is not in the shared inventory!")]
    NotAvailable(String),
    #[error("Cannot pick up {0}")]
    NotPickable(String),
    #[error("No potions left!")]
    NoPotionsLeft,
    #[error("{0} is already at full health!")]
    AlreadyFull(String),
    #[error("{0} can only be used in battle")]
    NotInBattle(String),
    #[error("{0} is already defending")]
    AlreadyDefending(String),
    #[error("Cannot change players in battle.")]
    CannotChangeInBattle,
    #[error("Can only change {0}'s own equipment in battle")]
    OnlySelfInBattle(String),
    #[error("{0} is incapacitated!")]
    Incapacitated(String),
}

impl ActionError {
    /// Failures that still use up the action
    ///
    /// Trying to heal someone already at full health wastes the turn.
    pub fn consumes_budget(&self) -> bool {
        matches!(self, ActionError::AlreadyFull(_))
    }
}
