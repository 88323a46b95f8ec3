//! The claim workflow: create/buy/sell/give/exit plus the write-protection
//! gate for world events.
//!
//! One engine serves every actor; per-actor picking state lives in the
//! [`SelectionStore`](crate::selection::SelectionStore) keyed by session id.
//! The host's command layer maps `land create|buy|sell|exit|give <target>`
//! onto the methods here 1:1 and forwards world events to
//! [`handle_world_event`](ClaimEngine::handle_world_event).

use std::sync::RwLock;

use uuid::Uuid;

use crate::config::LandConfig;
use crate::error::ClaimError;
use crate::events::{Gate, InteractionReply, WorldEvent};
use crate::geometry::{Cuboid, Point};
use crate::region::{OwnerId, Region};
use crate::selection::{Mode, Selection, SelectionStore};
use crate::store::LandStore;

const DENY_REASON: &str = "Blocked by LandManager";

/// Stable identity record for a live actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEntry {
    pub id: OwnerId,
    pub display_name: String,
}

/// Maps a live game-actor reference to its identity record.
pub trait PlayerRegistry {
    fn resolve(&self, actor: Uuid) -> Option<PlayerEntry>;
}

/// The economy ledger the purchase debits against.
pub trait Economy {
    fn balance(&self, id: OwnerId) -> i64;
    fn update_balance(&self, id: OwnerId, new_balance: i64, memo: &str) -> Result<(), String>;
}

/// Orchestrates claim purchases, sales and transfers against the region
/// store and the external economy/registry collaborators.
pub struct ClaimEngine<R, E> {
    store: LandStore,
    registry: R,
    economy: E,
    config: LandConfig,
    selections: RwLock<SelectionStore>,
}

impl<R: PlayerRegistry, E: Economy> ClaimEngine<R, E> {
    #[must_use]
    pub fn new(store: LandStore, registry: R, economy: E, config: LandConfig) -> Self {
        Self {
            store,
            registry,
            economy,
            config,
            selections: RwLock::new(SelectionStore::default()),
        }
    }

    fn selection(&self, actor: Uuid) -> Selection {
        self.selections
            .read()
            .map_or_else(|_| Selection::default(), |s| s.get(actor))
    }

    fn set_selection(&self, actor: Uuid, selection: Selection) {
        if let Ok(mut store) = self.selections.write() {
            store.set(actor, selection);
        }
    }

    fn reset_selection(&self, actor: Uuid, hard: bool) {
        let mut sel = self.selection(actor);
        sel.reset(hard);
        self.set_selection(actor, sel);
    }

    /// `land create` — begin point-picking. Clears any previous corners but
    /// stays in create mode (soft reset).
    pub fn create(&self, actor: Uuid) -> String {
        let mut sel = self.selection(actor);
        sel.reset(false);
        sel.mode = Mode::Create;
        self.set_selection(actor, sel);
        "Select the first point, or leave with 'land exit'.".to_owned()
    }

    /// `land exit` — drop the selection and return to idle.
    pub fn exit(&self, actor: Uuid) {
        self.reset_selection(actor, true);
    }

    /// Drop an actor's picking state entirely (on disconnect).
    pub fn forget(&self, actor: &Uuid) {
        if let Ok(mut store) = self.selections.write() {
            store.remove(actor);
        }
    }

    /// `land buy` — purchase the selected cuboid.
    ///
    /// Every precondition aborts without touching any state. The commit
    /// itself debits first and inserts second; an insert failure after a
    /// successful debit triggers a compensating refund before the error is
    /// surfaced, since the two stores share no transaction boundary.
    pub async fn buy(&self, actor: Uuid) -> Result<String, ClaimError> {
        let sel = self.selection(actor);
        let (Some(a), Some(b)) = (sel.point_a, sel.point_b) else {
            return Err(ClaimError::NoSelection);
        };

        let entry = self
            .registry
            .resolve(actor)
            .ok_or(ClaimError::IdentityResolution)?;

        let cuboid = Cuboid::new(a, b);
        let price = cuboid.volume() * self.config.block_price;
        let balance = self.economy.balance(entry.id);
        if price > balance {
            return Err(ClaimError::InsufficientFunds { price, balance });
        }

        let owned = self.store.count_by_owner(entry.id).await?;
        if owned >= self.config.limit {
            return Err(ClaimError::ClaimLimitReached {
                limit: self.config.limit,
            });
        }

        // Coarse prefilter over both corners' buckets, then the exact test.
        // Boundary-touching regions reject too.
        let mut candidates = self.store.find_by_chunk_bucket(a.chunk()).await?;
        if b.chunk() != a.chunk() {
            candidates.extend(self.store.find_by_chunk_bucket(b.chunk()).await?);
        }
        if candidates
            .iter()
            .any(|(_, region)| region.cuboid().intersects(&cuboid))
        {
            return Err(ClaimError::Overlap);
        }

        self.economy
            .update_balance(entry.id, balance - price, "Land bought.")
            .map_err(|e| {
                log::warn!("landmanager: Debit failed for {}: {e}", entry.id);
                ClaimError::Transaction
            })?;

        let region = Region::new(entry.id, a, b);
        match self.store.insert(&region).await {
            Ok(id) => {
                self.reset_selection(actor, true);
                log::info!(
                    "landmanager: {} bought region {id} for {price} ({} blocks)",
                    entry.display_name,
                    cuboid.volume()
                );
                Ok(format!("You bought this claim for {price}."))
            }
            Err(e) => {
                log::error!("landmanager: Region insert failed after debit: {e}");
                if let Err(refund) =
                    self.economy
                        .update_balance(entry.id, balance, "Land purchase refund.")
                {
                    // The one case left needing manual reconciliation.
                    log::error!(
                        "landmanager: Refund of {price} to {} failed: {refund}",
                        entry.id
                    );
                }
                Err(ClaimError::Transaction)
            }
        }
    }

    /// `land sell` — delete the claim the actor is standing in. Owner-scoped:
    /// only the actor's own claims qualify.
    pub async fn sell(&self, actor: Uuid, position: Point) -> Result<String, ClaimError> {
        let entry = self
            .registry
            .resolve(actor)
            .ok_or(ClaimError::IdentityResolution)?;

        let ids = self.store.find_containing(position, Some(entry.id)).await?;
        let Some(&id) = ids.first() else {
            return Err(ClaimError::NotStandingInClaim);
        };

        self.store.delete(id).await?;
        self.reset_selection(actor, true);
        log::info!("landmanager: {} sold region {id}", entry.display_name);
        Ok("You sold this claim.".to_owned())
    }

    /// `land give <target>` — transfer the claim the *issuer* is standing in
    /// to the target identity. The target must resolve before the store is
    /// touched.
    pub async fn give(
        &self,
        actor: Uuid,
        target: Uuid,
        position: Point,
    ) -> Result<String, ClaimError> {
        let target_entry = self
            .registry
            .resolve(target)
            .ok_or(ClaimError::TargetNotFound)?;
        let entry = self
            .registry
            .resolve(actor)
            .ok_or(ClaimError::IdentityResolution)?;

        let ids = self.store.find_containing(position, Some(entry.id)).await?;
        let Some(&id) = ids.first() else {
            return Err(ClaimError::NotStandingInClaim);
        };

        self.store.reassign_owner(id, target_entry.id).await?;
        self.reset_selection(actor, true);
        log::info!(
            "landmanager: {} transferred region {id} to {}",
            entry.display_name,
            target_entry.display_name
        );
        Ok(format!(
            "You transferred this claim to {}.",
            target_entry.display_name
        ))
    }

    /// Whether the actor may modify a block at the position. A region owned
    /// by someone else (and not trusting the actor) denies; store or
    /// identity failures deny too — the gate fails safe.
    pub async fn has_permission(&self, actor: Uuid, point: Point) -> bool {
        let Some(entry) = self.registry.resolve(actor) else {
            return false;
        };
        let candidates = match self.store.find_by_chunk_bucket(point.chunk()).await {
            Ok(c) => c,
            Err(e) => {
                log::error!("landmanager: Permission lookup failed: {e}");
                return false;
            }
        };
        candidates
            .iter()
            .all(|(_, region)| !region.cuboid().contains(point) || region.allows(entry.id))
    }

    /// World-event hook. While the actor is picking corners this consumes
    /// the event (and blocks the underlying mutation); otherwise it is the
    /// write-protection gate.
    pub async fn handle_world_event(&self, actor: Uuid, event: WorldEvent) -> InteractionReply {
        match event {
            WorldEvent::Action { pos, .. } => {
                let mut sel = self.selection(actor);
                if sel.mode == Mode::Create {
                    let notice = if sel.point_a.is_none() {
                        sel.point_a = Some(pos);
                        self.set_selection(actor, sel);
                        Some(
                            "First point selected. Pick the second point or leave with \
                             'land exit'."
                                .to_owned(),
                        )
                    } else if sel.point_b.is_none() {
                        sel.point_b = Some(pos);
                        self.set_selection(actor, sel);
                        let volume = Cuboid::new(sel.point_a.unwrap_or(pos), pos).volume();
                        let price = volume * self.config.block_price;
                        Some(format!(
                            "Volume: {volume} blocks - Price: {price}. Buy this claim with \
                             'land buy' or leave with 'land exit'."
                        ))
                    } else {
                        // Both corners set: nothing more is consumed until
                        // buy or exit, but the mutation still gets blocked.
                        None
                    };
                    return InteractionReply {
                        notice,
                        gate: Gate::Deny(DENY_REASON.to_owned()),
                    };
                }

                if self.has_permission(actor, pos).await {
                    InteractionReply::allow()
                } else {
                    InteractionReply::deny(DENY_REASON)
                }
            }
            WorldEvent::ItemUse { pos, .. } => {
                // Item use is blocked outright while picking corners.
                if self.selection(actor).mode == Mode::Create {
                    return InteractionReply::deny(DENY_REASON);
                }
                if self.has_permission(actor, pos).await {
                    InteractionReply::allow()
                } else {
                    InteractionReply::deny(DENY_REASON)
                }
            }
        }
    }
}
