//! Actor Model: Running a player on its own thread.
//!
//! The player itself never sleeps; this module gives it a thread that waits
//! on a crossbeam channel with the player's next deadline as timeout:
//!
//! ```text
//! ┌──────────────┐    PlayerCommand    ┌───────────────┐
//! │  Application │ ─────────────────▶  │ Player Thread │ ── ops ──▶ Surface
//! │              │ ◀─────────────────  │ (recv_deadline)│
//! └──────────────┘     PlayerEvent     └───────────────┘
//! ```
//!
//! A `Run` arriving mid-animation preempts the current run before the next
//! op fires.

mod messages;
mod player;

pub use messages::{PlayerCommand, PlayerEvent};
pub use player::PlayerActor;
