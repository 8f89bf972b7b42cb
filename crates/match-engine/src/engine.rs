//! Match engine: commits, round resolution and match outcome
//!
//! A round resolves as soon as both seats hold a committed piece. Computer
//! seats commit during a progression step, which runs on construction, on
//! reset, after every accepted commit and on `request_progress`.
//!
//! When both seats are Computer a progression step resolves one round,
//! unless the configuration asks for `auto_advance`, in which case the
//! step plays the match out.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::{MatchConfig, PlayerType, Seat};
use crate::error::MatchError;
use crate::events::{NullPresenter, Presenter};
use crate::piece::{Piece, WinRelation};
use crate::random::{RandomSource, SeededRng};

/// Result of a single round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    Seat1Wins,
    Seat2Wins,
    Draw,
}

impl RoundOutcome {
    pub fn winner(self) -> Option<Seat> {
        match self {
            RoundOutcome::Seat1Wins => Some(Seat::Seat1),
            RoundOutcome::Seat2Wins => Some(Seat::Seat2),
            RoundOutcome::Draw => None,
        }
    }
}

/// Result of a complete match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Seat1,
    Seat2,
    Draw,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Seat> {
        match self {
            MatchOutcome::Seat1 => Some(Seat::Seat1),
            MatchOutcome::Seat2 => Some(Seat::Seat2),
            MatchOutcome::Draw => None,
        }
    }
}

/// A resolved round with both pieces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub seat1: Piece,
    pub seat2: Piece,
    pub outcome: RoundOutcome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    InProgress { round: u32 },
    Finished(MatchOutcome),
}

/// Serializable view of the match for adapters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub round: u32,
    pub round_limit: u32,
    pub players: [PlayerType; 2],
    /// Whether each seat has committed this round. Pieces stay hidden.
    pub committed: [bool; 2],
    pub rounds: Vec<RoundRecord>,
    /// Seat1 wins, Seat2 wins, draws.
    pub scores: (u32, u32, u32),
    pub status: MatchStatus,
}

/// Decide a round. Equal pieces draw; otherwise Seat1 wins exactly when
/// its piece defeats Seat2's.
pub fn judge(rules: &WinRelation, seat1: &Piece, seat2: &Piece) -> RoundOutcome {
    if seat1 == seat2 {
        RoundOutcome::Draw
    } else if rules.beats(seat1, seat2) {
        RoundOutcome::Seat1Wins
    } else {
        RoundOutcome::Seat2Wins
    }
}

/// Count (Seat1 wins, Seat2 wins, draws).
pub fn scores(log: &[RoundOutcome]) -> (u32, u32, u32) {
    log.iter().fold((0, 0, 0), |(s1, s2, d), outcome| match outcome {
        RoundOutcome::Seat1Wins => (s1 + 1, s2, d),
        RoundOutcome::Seat2Wins => (s1, s2 + 1, d),
        RoundOutcome::Draw => (s1, s2, d + 1),
    })
}

/// Overall winner of a log of rounds. Draws do not count for either seat.
pub fn tally(log: &[RoundOutcome]) -> MatchOutcome {
    let (seat1, seat2, _) = scores(log);
    match seat1.cmp(&seat2) {
        std::cmp::Ordering::Equal => MatchOutcome::Draw,
        std::cmp::Ordering::Greater => MatchOutcome::Seat1,
        std::cmp::Ordering::Less => MatchOutcome::Seat2,
    }
}

const WELCOME: [&str; 3] = [
    "Initialising game",
    "Going to find a rock, a piece of papyrus and scissors",
    "Life advice: Never run with scissors!",
];

/// Caller-owned engine for one match at a time.
pub struct MatchEngine<P: Presenter = NullPresenter, R: RandomSource = SeededRng> {
    config: MatchConfig,
    presenter: P,
    rng: R,
    hands: [Option<Piece>; 2],
    /// Current round, 1-based. Exceeds `round_limit` once finished.
    round: u32,
    rounds: Vec<RoundRecord>,
    outcome: Option<MatchOutcome>,
}

impl<P: Presenter> MatchEngine<P, SeededRng> {
    /// Engine whose computer seats draw from a `SeededRng`.
    pub fn seeded(config: MatchConfig, presenter: P, seed: &[u8; 32]) -> Result<Self, MatchError> {
        Self::new(config, presenter, SeededRng::new(seed))
    }
}

impl<P: Presenter, R: RandomSource> MatchEngine<P, R> {
    /// Validate the configuration, render the table and run the first
    /// progression step.
    pub fn new(config: MatchConfig, presenter: P, rng: R) -> Result<Self, MatchError> {
        config.validate()?;

        let mut engine = Self {
            config,
            presenter,
            rng,
            hands: [None, None],
            round: 1,
            rounds: Vec::new(),
            outcome: None,
        };

        for line in WELCOME {
            engine.presenter.on_message(line);
        }
        for seat in Seat::ALL {
            engine.presenter.on_controls(seat, &engine.config.catalog);
        }
        engine.hide_hands();
        debug!(
            "new match: players={:?} pieces={} rounds={}",
            engine.config.players,
            engine.config.catalog.len(),
            engine.config.round_limit
        );

        engine.advance();
        Ok(engine)
    }

    /// Lock in `piece` for `seat` this round, then progress.
    ///
    /// Returns the rounds resolved by this call. A rejected commit leaves
    /// the match untouched.
    pub fn commit(&mut self, seat: Seat, piece: impl Into<Piece>) -> Result<Vec<RoundRecord>, MatchError> {
        let piece = piece.into();

        if self.is_finished() {
            debug!("{} tried to commit after the match finished", seat);
            return Err(MatchError::MatchAlreadyFinished);
        }
        if !self.config.catalog.contains(&piece) {
            debug!("{} tried to commit unknown piece '{}'", seat, piece);
            return Err(MatchError::InvalidMove(piece));
        }
        if self.hands[seat.index()].is_some() {
            debug!("{} tried to commit twice in round {}", seat, self.round);
            return Err(MatchError::DuplicateCommit(seat));
        }

        self.record(seat, piece);
        Ok(self.advance())
    }

    /// Run a progression step: computer seats commit and a ready round
    /// resolves.
    pub fn request_progress(&mut self) -> Result<Vec<RoundRecord>, MatchError> {
        if self.is_finished() {
            return Err(MatchError::MatchAlreadyFinished);
        }
        Ok(self.advance())
    }

    /// Start a new match with the same configuration.
    pub fn reset(&mut self) {
        debug!("reset after {} rounds", self.rounds.len());
        self.hands = [None, None];
        self.round = 1;
        self.rounds.clear();
        self.outcome = None;

        self.presenter.on_message("Starting a new match");
        self.hide_hands();
        self.advance();
    }

    /// Push an adapter-supplied line through the message sink.
    pub fn announce(&mut self, text: &str) {
        self.presenter.on_message(text);
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn round_limit(&self) -> u32 {
        self.config.round_limit
    }

    /// Committed piece for a seat in the current round.
    pub fn hand(&self, seat: Seat) -> Option<&Piece> {
        self.hands[seat.index()].as_ref()
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Outcome of every resolved round, in order.
    pub fn match_log(&self) -> Vec<RoundOutcome> {
        self.rounds.iter().map(|r| r.outcome).collect()
    }

    pub fn scores(&self) -> (u32, u32, u32) {
        scores(&self.match_log())
    }

    /// Winner over the rounds played so far.
    pub fn match_winner(&self) -> MatchOutcome {
        tally(&self.match_log())
    }

    /// Final outcome, once the round limit has been played.
    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_full_auto(&self) -> bool {
        self.config.is_full_auto()
    }

    pub fn status(&self) -> MatchStatus {
        match self.outcome {
            Some(outcome) => MatchStatus::Finished(outcome),
            None => MatchStatus::InProgress { round: self.round },
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            round: self.round,
            round_limit: self.config.round_limit,
            players: self.config.players,
            committed: [self.hands[0].is_some(), self.hands[1].is_some()],
            rounds: self.rounds.clone(),
            scores: self.scores(),
            status: self.status(),
        }
    }

    fn hide_hands(&mut self) {
        for seat in Seat::ALL {
            self.presenter.on_hand_revealed(seat, None);
        }
    }

    fn record(&mut self, seat: Seat, piece: Piece) {
        trace!("{} commits {} in round {}", seat, piece, self.round);
        let line = match self.config.player(seat) {
            PlayerType::Human => format!("{} has chosen", seat),
            PlayerType::Computer => format!("{} (computer) has chosen", seat),
        };
        self.hands[seat.index()] = Some(piece);
        self.presenter.on_message(&line);
    }

    /// Seats commit in order, Seat1 then Seat2.
    fn auto_commit(&mut self) {
        for seat in Seat::ALL {
            if self.config.player(seat) != PlayerType::Computer || self.hands[seat.index()].is_some() {
                continue;
            }
            if let Some(piece) = self.rng.pick(&self.config.catalog).cloned() {
                self.record(seat, piece);
            }
        }
    }

    fn advance(&mut self) -> Vec<RoundRecord> {
        let mut resolved = Vec::new();

        while !self.is_finished() {
            self.auto_commit();
            let Some(record) = self.try_resolve() else {
                break;
            };
            resolved.push(record);
            if self.config.is_full_auto() && !self.config.auto_advance {
                break;
            }
        }

        resolved
    }

    fn try_resolve(&mut self) -> Option<RoundRecord> {
        if self.hands.iter().any(Option::is_none) {
            return None;
        }
        let seat1 = self.hands[0].take()?;
        let seat2 = self.hands[1].take()?;

        let outcome = judge(&self.config.rules, &seat1, &seat2);
        let record = RoundRecord {
            round: self.round,
            seat1,
            seat2,
            outcome,
        };
        debug!(
            "round {}: {} vs {} -> {:?}",
            record.round, record.seat1, record.seat2, outcome
        );

        self.presenter.on_hand_revealed(Seat::Seat1, Some(&record.seat1));
        self.presenter.on_hand_revealed(Seat::Seat2, Some(&record.seat2));
        self.presenter.on_round_resolved(record.round, outcome);
        let verdict = match outcome.winner() {
            Some(seat) => format!("{} wins the round", seat),
            None => "It's a draw".to_string(),
        };
        self.presenter.on_message(&format!(
            "Round {}: {} vs {}. {}",
            record.round, record.seat1, record.seat2, verdict
        ));

        self.rounds.push(record.clone());
        self.round += 1;

        if self.round > self.config.round_limit {
            self.finish();
        } else {
            self.hide_hands();
        }

        Some(record)
    }

    fn finish(&mut self) {
        let outcome = self.match_winner();
        let (seat1, seat2, _) = self.scores();
        self.outcome = Some(outcome);
        debug!("match finished: {:?} ({}-{})", outcome, seat1, seat2);

        self.presenter.on_match_finished(outcome);
        let line = match outcome.winner() {
            Some(seat) => format!("{} wins the match {}-{}", seat, seat1, seat2),
            None => format!("The match is a draw {}-{}", seat1, seat2),
        };
        self.presenter.on_message(&line);
    }
}
