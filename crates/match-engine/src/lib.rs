//! Rock-Paper-Scissors match engine
//!
//! Pure match state and notifications for a browser-rendered game.
//! This crate is compiled to:
//! - Native (engine, tests)
//! - WASM (the `wasm` feature exposes `RpsGame` to the page)
//!
//! Rendering lives behind the [`Presenter`] trait; the engine never touches
//! the DOM.

mod config;
mod engine;
mod error;
mod events;
mod piece;
mod random;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{MatchConfig, PlayerType, Seat, DEFAULT_ROUND_LIMIT};
pub use engine::{
    judge, scores, tally, MatchEngine, MatchOutcome, MatchSnapshot, MatchStatus, RoundOutcome,
    RoundRecord,
};
pub use error::{ConfigError, MatchError};
pub use events::{Event, EventLog, NullPresenter, Presenter};
pub use piece::{Catalog, Piece, WinRelation};
pub use random::{RandomSource, SeededRng};
