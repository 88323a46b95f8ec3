//! Per-actor point-picking state for an in-progress claim.

use std::collections::HashMap;

use uuid::Uuid;

use crate::geometry::Point;

/// Current claim interaction mode for one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    None,
    Create,
    Buy,
    Sell,
    Give,
    Exit,
}

/// Two-corner picking state, exclusively owned by one actor's session.
/// Never persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection {
    pub point_a: Option<Point>,
    pub point_b: Option<Point>,
    pub mode: Mode,
}

impl Selection {
    /// Both corners picked.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.point_a.is_some() && self.point_b.is_some()
    }

    /// Clear both points. A hard reset also drops the mode back to
    /// [`Mode::None`]; a soft reset keeps it, used when (re)entering
    /// `Create` so the next interaction starts a fresh pick.
    ///
    /// Call sites: hard on buy success, sell, give, exit and error cleanup;
    /// soft on `land create`.
    pub fn reset(&mut self, hard: bool) {
        self.point_a = None;
        self.point_b = None;
        if hard {
            self.mode = Mode::None;
        }
    }
}

/// All live selections, keyed by the acting player's session id.
#[derive(Debug, Default)]
pub struct SelectionStore {
    selections: HashMap<Uuid, Selection>,
}

impl SelectionStore {
    /// Snapshot of an actor's selection (default state if none yet).
    #[must_use]
    pub fn get(&self, actor: Uuid) -> Selection {
        self.selections.get(&actor).copied().unwrap_or_default()
    }

    pub fn set(&mut self, actor: Uuid, selection: Selection) {
        self.selections.insert(actor, selection);
    }

    /// Drop an actor's state entirely (on disconnect).
    pub fn remove(&mut self, actor: &Uuid) {
        self.selections.remove(actor);
    }
}
