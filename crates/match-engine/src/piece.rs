//! Pieces, the piece catalog and the win relation between pieces

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A game element a seat can commit to, e.g. `"rock"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Piece(String);

impl Piece {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Piece {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Piece {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Piece {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Piece → display asset reference (an image URL for the browser adapter).
///
/// The key set is the set of valid pieces. Iteration order is the sorted
/// piece order, which is also the order random picks index into.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(BTreeMap<Piece, String>);

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, piece: impl Into<Piece>, asset: impl Into<String>) -> Self {
        self.insert(piece, asset);
        self
    }

    pub fn insert(&mut self, piece: impl Into<Piece>, asset: impl Into<String>) {
        self.0.insert(piece.into(), asset.into());
    }

    pub fn contains(&self, piece: &Piece) -> bool {
        self.0.contains_key(piece)
    }

    pub fn asset(&self, piece: &Piece) -> Option<&str> {
        self.0.get(piece).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Piece at `index` in catalog order.
    pub fn nth(&self, index: usize) -> Option<&Piece> {
        self.0.keys().nth(index)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Piece, &str)> {
        self.0.iter().map(|(piece, asset)| (piece, asset.as_str()))
    }
}

impl<P: Into<Piece>, A: Into<String>> FromIterator<(P, A)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (P, A)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(p, a)| (p.into(), a.into())).collect())
    }
}

/// Piece → set of pieces it defeats.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WinRelation(BTreeMap<Piece, BTreeSet<Piece>>);

impl WinRelation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: `winner` defeats every piece in `losers`.
    pub fn with<I, P>(mut self, winner: impl Into<Piece>, losers: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Piece>,
    {
        let entry = self.0.entry(winner.into()).or_default();
        entry.extend(losers.into_iter().map(Into::into));
        self
    }

    /// True when `b` is in `a`'s win-set.
    pub fn beats(&self, a: &Piece, b: &Piece) -> bool {
        self.0.get(a).is_some_and(|defeated| defeated.contains(b))
    }

    /// Check the relation against the catalog it will be used with.
    ///
    /// Every catalog piece needs an entry, no entry may name a piece
    /// outside the catalog and no piece may beat itself. For two distinct
    /// pieces exactly one must beat the other, so every round has a winner
    /// unless both seats picked the same piece.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), ConfigError> {
        for piece in catalog.pieces() {
            if !self.0.contains_key(piece) {
                return Err(ConfigError::MissingRule(piece.clone()));
            }
        }

        for (winner, defeated) in &self.0 {
            if !catalog.contains(winner) {
                return Err(ConfigError::UnknownPiece(winner.clone()));
            }
            for loser in defeated {
                if !catalog.contains(loser) {
                    return Err(ConfigError::UnknownPiece(loser.clone()));
                }
                if loser == winner {
                    return Err(ConfigError::Reflexive(winner.clone()));
                }
                if self.beats(loser, winner) {
                    return Err(ConfigError::MutualWin(winner.clone(), loser.clone()));
                }
            }
        }

        for a in catalog.pieces() {
            for b in catalog.pieces().filter(|b| *b > a) {
                if !self.beats(a, b) && !self.beats(b, a) {
                    return Err(ConfigError::Undecided(a.clone(), b.clone()));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rps() -> (Catalog, WinRelation) {
        let catalog = Catalog::new()
            .with("rock", "rock.png")
            .with("paper", "paper.png")
            .with("scissors", "scissors.png");
        let rules = WinRelation::new()
            .with("rock", ["scissors"])
            .with("paper", ["rock"])
            .with("scissors", ["paper"]);
        (catalog, rules)
    }

    #[test]
    fn test_beats_is_directional() {
        let (_, rules) = rps();
        assert!(rules.beats(&"rock".into(), &"scissors".into()));
        assert!(!rules.beats(&"scissors".into(), &"rock".into()));
        assert!(!rules.beats(&"rock".into(), &"rock".into()));
    }

    #[test]
    fn test_standard_relation_is_valid() {
        let (catalog, rules) = rps();
        assert_eq!(rules.validate(&catalog), Ok(()));
    }

    #[test]
    fn test_catalog_order_is_sorted() {
        let (catalog, _) = rps();
        let names: Vec<_> = catalog.pieces().map(Piece::as_str).collect();
        assert_eq!(names, ["paper", "rock", "scissors"]);
        assert_eq!(catalog.nth(1), Some(&Piece::new("rock")));
        assert_eq!(catalog.nth(3), None);
        assert_eq!(catalog.asset(&"paper".into()), Some("paper.png"));
    }

    #[test]
    fn test_missing_rule_entry() {
        let (catalog, _) = rps();
        let rules = WinRelation::new()
            .with("rock", ["scissors"])
            .with("paper", ["rock"]);
        assert_eq!(
            rules.validate(&catalog),
            Err(ConfigError::MissingRule("scissors".into()))
        );
    }

    #[test]
    fn test_rule_names_unknown_piece() {
        let (catalog, rules) = rps();
        let rules = rules.with("rock", ["lizard"]);
        assert_eq!(
            rules.validate(&catalog),
            Err(ConfigError::UnknownPiece("lizard".into()))
        );
    }

    #[test]
    fn test_reflexive_rule_rejected() {
        let (catalog, rules) = rps();
        let rules = rules.with("paper", ["paper"]);
        assert_eq!(
            rules.validate(&catalog),
            Err(ConfigError::Reflexive("paper".into()))
        );
    }

    #[test]
    fn test_mutual_win_rejected() {
        let (catalog, rules) = rps();
        let rules = rules.with("scissors", ["rock"]);
        assert!(matches!(
            rules.validate(&catalog),
            Err(ConfigError::MutualWin(_, _))
        ));
    }

    #[test]
    fn test_undecided_pair_rejected() {
        let catalog = Catalog::new().with("a", "").with("b", "").with("c", "");
        let rules = WinRelation::new()
            .with("a", ["b"])
            .with("b", Vec::<Piece>::new())
            .with("c", ["b"]);
        assert_eq!(
            rules.validate(&catalog),
            Err(ConfigError::Undecided("a".into(), "c".into()))
        );
    }

    #[test]
    fn test_serde_shape() {
        let (catalog, rules) = rps();
        let json = serde_json::to_string(&rules).unwrap();
        assert_eq!(
            json,
            r#"{"paper":["rock"],"rock":["scissors"],"scissors":["paper"]}"#
        );
        let back: Catalog = serde_json::from_str(&serde_json::to_string(&catalog).unwrap()).unwrap();
        assert_eq!(back, catalog);
    }
}
