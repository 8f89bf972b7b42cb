//! Notifications the engine pushes to its presentation adapter

use serde::{Deserialize, Serialize};

use crate::config::Seat;
use crate::engine::{MatchOutcome, RoundOutcome};
use crate::piece::{Catalog, Piece};

/// Anything that can render a match.
///
/// All methods default to doing nothing, so an adapter only implements
/// what it displays.
pub trait Presenter {
    /// The moves a seat can choose from. Sent once per seat on construction.
    fn on_controls(&mut self, _seat: Seat, _catalog: &Catalog) {}

    /// A seat's hand: `None` while hidden or pending.
    fn on_hand_revealed(&mut self, _seat: Seat, _piece: Option<&Piece>) {}

    /// A log line. Adapters show the newest line first.
    fn on_message(&mut self, _text: &str) {}

    fn on_round_resolved(&mut self, _round: u32, _outcome: RoundOutcome) {}

    fn on_match_finished(&mut self, _outcome: MatchOutcome) {}
}

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// A recorded notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    Controls { seat: Seat, pieces: Vec<Piece> },
    HandRevealed { seat: Seat, piece: Option<Piece> },
    Message { text: String },
    RoundResolved { round: u32, outcome: RoundOutcome },
    MatchFinished { outcome: MatchOutcome },
}

/// Presenter that records everything it is told.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in emission order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Message lines, most recent first.
    pub fn messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .rev()
            .filter_map(|e| match e {
                Event::Message { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn round_results(&self) -> Vec<(u32, RoundOutcome)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::RoundResolved { round, outcome } => Some((*round, *outcome)),
                _ => None,
            })
            .collect()
    }

    pub fn match_results(&self) -> Vec<MatchOutcome> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::MatchFinished { outcome } => Some(*outcome),
                _ => None,
            })
            .collect()
    }

    /// Last hand shown for a seat, if any was shown.
    pub fn last_hand(&self, seat: Seat) -> Option<Option<&Piece>> {
        self.events.iter().rev().find_map(|e| match e {
            Event::HandRevealed { seat: s, piece } if *s == seat => Some(piece.as_ref()),
            _ => None,
        })
    }
}

impl Presenter for EventLog {
    fn on_controls(&mut self, seat: Seat, catalog: &Catalog) {
        self.events.push(Event::Controls {
            seat,
            pieces: catalog.pieces().cloned().collect(),
        });
    }

    fn on_hand_revealed(&mut self, seat: Seat, piece: Option<&Piece>) {
        self.events.push(Event::HandRevealed { seat, piece: piece.cloned() });
    }

    fn on_message(&mut self, text: &str) {
        self.events.push(Event::Message { text: text.to_string() });
    }

    fn on_round_resolved(&mut self, round: u32, outcome: RoundOutcome) {
        self.events.push(Event::RoundResolved { round, outcome });
    }

    fn on_match_finished(&mut self, outcome: MatchOutcome) {
        self.events.push(Event::MatchFinished { outcome });
    }
}
