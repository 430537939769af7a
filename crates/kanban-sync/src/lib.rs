//! Keeps the in-memory board store and the remote API in agreement.
//!
//! Every user mutation is applied to the store first and confirmed against
//! the remote side afterwards. Structural mutations (moves, deletes) are
//! undone when the remote side refuses them; field edits are kept and the
//! failure is reported.

pub mod column_map;
pub mod coordinator;
pub mod drag;
pub mod loader;
pub mod sequencer;

pub use column_map::ColumnRefMap;
pub use coordinator::SyncCoordinator;
pub use drag::DragSession;
pub use sequencer::{EntityKey, Sequencer, Ticket};
