//! Game state store — reactive cells for score, round, countdown time and the
//! current page, plus the two reset helpers. State lives in WASM memory
//! (thread_local) for the lifetime of the Web Worker.

pub mod cell;
pub mod state;

pub use cell::{SubscriberId, Writable};
pub use state::{CellName, GameStore, StoreSnapshot};
