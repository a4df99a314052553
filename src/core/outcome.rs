//! Outcome codes reported by state actions.
//!
//! The outcome set is closed. Resolvers match on it exhaustively, so a new
//! variant means revisiting every resolver and every action contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of executing a state's action.
///
/// # Example
///
/// ```rust
/// use switchyard::Outcome;
///
/// assert_eq!(Outcome::Ok.to_string(), "ok");
/// assert_eq!(Outcome::ALL.len(), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The action succeeded
    Ok,
    /// The action failed
    Fail,
    /// The action wants to run again from the same state
    Repeat,
}

impl Outcome {
    /// Every outcome, in declaration order.
    pub const ALL: [Outcome; 3] = [Outcome::Ok, Outcome::Fail, Outcome::Repeat];

    /// Lowercase name used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Fail => "fail",
            Self::Repeat => "repeat",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Ok => 0b001,
            Self::Fail => 0b010,
            Self::Repeat => 0b100,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcomes a state declares its action can produce.
///
/// Table validation uses it to decide which `(state, outcome)` pairs need a
/// row. It defaults to every outcome.
///
/// ```rust
/// use switchyard::{Outcome, OutcomeSet};
///
/// let set = OutcomeSet::of(&[Outcome::Ok, Outcome::Fail]);
/// assert!(set.contains(Outcome::Fail));
/// assert!(!set.contains(Outcome::Repeat));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutcomeSet(u8);

impl OutcomeSet {
    pub const EMPTY: OutcomeSet = OutcomeSet(0);
    pub const ALL: OutcomeSet = OutcomeSet(0b111);

    pub fn of(outcomes: &[Outcome]) -> Self {
        outcomes.iter().copied().collect()
    }

    pub fn with(self, outcome: Outcome) -> Self {
        Self(self.0 | outcome.bit())
    }

    pub fn contains(self, outcome: Outcome) -> bool {
        self.0 & outcome.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Outcome> {
        Outcome::ALL.into_iter().filter(move |o| self.contains(*o))
    }
}

impl Default for OutcomeSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl FromIterator<Outcome> for OutcomeSet {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, OutcomeSet::with)
    }
}

impl fmt::Debug for OutcomeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
