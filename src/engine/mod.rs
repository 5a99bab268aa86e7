//! Round engine
//!
//! All game logic lives here. This module must stay pure:
//! - Seeded RNG only (one per session)
//! - No timers; the caller owns the settle delay between `submit_choice`
//!   and `advance`
//! - No speech, ads or storage dependencies

pub mod round;
pub mod state;

pub use state::{Advance, Outcome, Phase, Round, RoundId, Session, SessionError};
