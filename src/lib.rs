//! LandManager — chunk-indexed land claims bought from an economy balance.
//!
//! This crate is the engine only; the hosting server wires up commands, chat
//! and events around it:
//! - **[geometry]** — cuboid math and chunk-bucket mapping
//! - **[region]** — the persisted claim entity
//! - **[store]** — SQLite-backed region table with chunk-bucket lookup
//! - **[selection]** — per-actor two-corner picking state
//! - **[engine]** — buy/sell/give workflow and the write-protection gate
//! - **[events]** — world-event input and gate verdicts
//! - **[config]** — block price, claim limit, database path
//!
//! The host maps `land create|buy|sell|exit|give <target>` onto
//! [`ClaimEngine`] methods and forwards block-break/interact/item-use events
//! to [`ClaimEngine::handle_world_event`]; the reply says whether to cancel
//! the world mutation. The economy ledger and player registry stay external,
//! behind the [`Economy`] and [`PlayerRegistry`] traits.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod region;
pub mod selection;
pub mod store;

pub use config::LandConfig;
pub use engine::{ClaimEngine, Economy, PlayerEntry, PlayerRegistry};
pub use error::{ClaimError, StoreError};
pub use events::{ActionKind, Gate, InteractionReply, ItemUseKind, WorldEvent};
pub use geometry::{ChunkPos, Cuboid, Point, CHUNK_SIZE};
pub use region::{OwnerId, Region, RegionId};
pub use selection::{Mode, Selection, SelectionStore};
pub use store::LandStore;
