//! World-interaction events delivered by the host, and the gate verdict the
//! engine hands back.
//!
//! The host forwards every block-break/interact/item-use event here; the
//! reply tells it whether to let the world mutation through and optionally
//! carries a chat notice for the acting player.

use crate::geometry::Point;

/// Block-action subtypes the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    StartBreak,
    ContinueBreak,
    InteractBlock,
}

/// Inventory-transaction subtypes the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemUseKind {
    UseItem,
    UseItemOn,
    Destroy,
}

/// A world-modifying event with its target position, dispatched by explicit
/// discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    Action { kind: ActionKind, pos: Point },
    ItemUse { kind: ItemUseKind, pos: Point },
}

impl WorldEvent {
    /// The world position the event targets.
    #[must_use]
    pub const fn position(&self) -> Point {
        match self {
            Self::Action { pos, .. } | Self::ItemUse { pos, .. } => *pos,
        }
    }
}

/// Whether the underlying world mutation may proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Allow,
    /// Blocked; the reason string is handed to the host's cancellation token.
    Deny(String),
}

impl Gate {
    #[must_use]
    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::Deny(_))
    }
}

/// Reply to a world-interaction event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionReply {
    /// Chat notice for the acting player (selection progress, price quote).
    pub notice: Option<String>,
    pub gate: Gate,
}

impl InteractionReply {
    #[must_use]
    pub const fn allow() -> Self {
        Self {
            notice: None,
            gate: Gate::Allow,
        }
    }

    #[must_use]
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            notice: None,
            gate: Gate::Deny(reason.into()),
        }
    }
}
