//! Property tests over random configurations and move sequences.

use proptest::prelude::*;
use rps_match_engine::{
    judge, tally, Catalog, ConfigError, MatchConfig, MatchEngine, MatchError, MatchOutcome,
    NullPresenter, Piece, PlayerType, RoundOutcome, Seat, WinRelation,
};

const CLASSIC: [&str; 3] = ["rock", "paper", "scissors"];

fn any_outcome() -> impl Strategy<Value = RoundOutcome> {
    prop_oneof![
        Just(RoundOutcome::Seat1Wins),
        Just(RoundOutcome::Seat2Wins),
        Just(RoundOutcome::Draw),
    ]
}

/// A complete tournament relation on `n` pieces: for i < j the bit
/// decides whether i beats j or j beats i.
fn tournament(n: usize, bits: &[bool]) -> (Catalog, WinRelation) {
    let names: Vec<String> = (0..n).map(|i| format!("p{}", i)).collect();
    let catalog: Catalog = names.iter().map(|name| (name.clone(), format!("{}.png", name))).collect();
    let mut rules = WinRelation::new();
    for name in &names {
        rules = rules.with(name.as_str(), Vec::<Piece>::new());
    }
    let mut k = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            let (winner, loser) = if bits[k] { (i, j) } else { (j, i) };
            rules = rules.with(names[winner].as_str(), [names[loser].as_str()]);
            k += 1;
        }
    }
    (catalog, rules)
}

proptest! {
    #[test]
    fn full_auto_resolves_one_round_per_step(seed in any::<[u8; 32]>(), limit in 1u32..8) {
        let config = MatchConfig::classic([PlayerType::Computer; 2]).with_round_limit(limit);
        let mut engine = MatchEngine::seeded(config, NullPresenter, &seed).unwrap();
        prop_assert_eq!(engine.match_log().len(), 1);

        let mut previous = engine.round();
        while !engine.is_finished() {
            let resolved = engine.request_progress().unwrap();
            prop_assert_eq!(resolved.len(), 1);
            prop_assert_eq!(engine.round(), previous + 1);
            previous = engine.round();
        }

        prop_assert_eq!(engine.round(), limit + 1);
        prop_assert_eq!(engine.match_log().len(), limit as usize);
        prop_assert_eq!(engine.request_progress(), Err(MatchError::MatchAlreadyFinished));
    }

    #[test]
    fn equal_pieces_always_draw(index in 0usize..3) {
        let rules = MatchConfig::default().rules;
        let piece = Piece::new(CLASSIC[index]);
        prop_assert_eq!(judge(&rules, &piece, &piece), RoundOutcome::Draw);
    }

    #[test]
    fn draws_never_move_the_tally(log in prop::collection::vec(any_outcome(), 0..20), draws in 0usize..5) {
        let mut padded = log.clone();
        padded.extend(std::iter::repeat(RoundOutcome::Draw).take(draws));
        prop_assert_eq!(tally(&padded), tally(&log));
    }

    #[test]
    fn tally_matches_counts(log in prop::collection::vec(any_outcome(), 0..20)) {
        let seat1 = log.iter().filter(|o| **o == RoundOutcome::Seat1Wins).count();
        let seat2 = log.iter().filter(|o| **o == RoundOutcome::Seat2Wins).count();
        let expected = if seat1 == seat2 {
            MatchOutcome::Draw
        } else if seat1 > seat2 {
            MatchOutcome::Seat1
        } else {
            MatchOutcome::Seat2
        };
        prop_assert_eq!(tally(&log), expected);
    }

    #[test]
    fn valid_relations_decide_every_pair(bits in prop::collection::vec(any::<bool>(), 10)) {
        let (catalog, rules) = tournament(5, &bits);
        prop_assert_eq!(rules.validate(&catalog), Ok(()));

        let pieces: Vec<&Piece> = catalog.pieces().collect();
        for a in &pieces {
            for b in &pieces {
                if a != b {
                    prop_assert!(rules.beats(a, b) != rules.beats(b, a));
                    let forward = judge(&rules, a, b);
                    let backward = judge(&rules, b, a);
                    prop_assert_ne!(forward, RoundOutcome::Draw);
                    prop_assert_ne!(backward, RoundOutcome::Draw);
                    prop_assert_ne!(forward.winner(), backward.winner());
                }
            }
        }
    }

    #[test]
    fn mutual_wins_are_rejected(bits in prop::collection::vec(any::<bool>(), 10), pair in 0usize..10) {
        let (catalog, rules) = tournament(5, &bits);
        // Find the pair for this bit and add the reverse edge.
        let mut k = 0;
        let mut reversed = None;
        for i in 0..5 {
            for j in (i + 1)..5 {
                if k == pair {
                    reversed = Some(if bits[k] { (j, i) } else { (i, j) });
                }
                k += 1;
            }
        }
        let (winner, loser) = reversed.unwrap();
        let rules = rules.with(format!("p{}", winner), [format!("p{}", loser)]);

        let config = MatchConfig {
            catalog,
            rules,
            ..MatchConfig::default()
        };
        let result = MatchEngine::seeded(config, NullPresenter, &[0u8; 32]);
        prop_assert!(matches!(
            result,
            Err(MatchError::InvalidConfiguration(ConfigError::MutualWin(_, _)))
        ));
    }

    #[test]
    fn second_commit_is_rejected(first in 0usize..3, second in 0usize..3) {
        let config = MatchConfig::classic([PlayerType::Human; 2]);
        let mut engine = MatchEngine::seeded(config, NullPresenter, &[5u8; 32]).unwrap();

        engine.commit(Seat::Seat1, CLASSIC[first]).unwrap();
        let before = engine.snapshot();
        prop_assert_eq!(
            engine.commit(Seat::Seat1, CLASSIC[second]),
            Err(MatchError::DuplicateCommit(Seat::Seat1))
        );
        let kept = Piece::new(CLASSIC[first]);
        prop_assert_eq!(engine.hand(Seat::Seat1), Some(&kept));
        prop_assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn human_moves_play_out(moves in prop::collection::vec(0usize..3, 1..10), seed in any::<[u8; 32]>()) {
        let limit = moves.len() as u32;
        let config = MatchConfig::default().with_round_limit(limit);
        let mut engine = MatchEngine::seeded(config, NullPresenter, &seed).unwrap();

        for (i, m) in moves.iter().enumerate() {
            prop_assert_eq!(engine.round(), i as u32 + 1);
            let resolved = engine.commit(Seat::Seat1, CLASSIC[*m]).unwrap();
            prop_assert_eq!(resolved.len(), 1);
            let record = &resolved[0];
            prop_assert_eq!(record.outcome, judge(&engine.config().rules, &record.seat1, &record.seat2));
        }

        prop_assert!(engine.is_finished());
        prop_assert_eq!(engine.outcome(), Some(tally(&engine.match_log())));
    }
}
