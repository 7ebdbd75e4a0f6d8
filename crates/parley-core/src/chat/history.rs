//! History normalization.
//!
//! Conversational model APIs reject a history that opens with a model turn
//! or that contains two consecutive turns from the same speaker. The
//! normalizer reshapes whatever the caller sent into that strict form by
//! trimming leading model turns and merging same-role runs. It never
//! reorders and never drops text from a retained turn.

use parley_types::chat::{RawTurn, Role, Turn};

/// Separator used when merging consecutive same-role turns.
const MERGE_SEPARATOR: &str = "\n";

/// An ordered turn sequence that is empty or starts with a user turn and
/// strictly alternates roles thereafter.
///
/// Only [`HistoryNormalizer`] can build one, so holders can rely on the
/// invariant without re-checking it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedHistory {
    turns: Vec<Turn>,
}

impl NormalizedHistory {
    /// The empty history.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn into_turns(self) -> Vec<Turn> {
        self.turns
    }
}

impl<'a> IntoIterator for &'a NormalizedHistory {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

/// Stateless history normalizer.
///
/// Works on borrowed input and builds a fresh sequence, so the caller's
/// history is never mutated.
pub struct HistoryNormalizer;

impl HistoryNormalizer {
    /// Normalize caller-supplied turns into the alternating form.
    pub fn normalize(raw: &[RawTurn]) -> NormalizedHistory {
        let turns = raw.iter().map(RawTurn::to_turn);
        let trimmed = Self::trim_leading_model(turns);
        let merged = Self::merge_runs(trimmed);

        if merged.len() != raw.len() {
            tracing::debug!(
                received = raw.len(),
                normalized = merged.len(),
                "History reshaped for strict role alternation"
            );
        }

        NormalizedHistory { turns: merged }
    }

    /// Drop entries from the front while the first remaining one is a model turn.
    fn trim_leading_model(turns: impl Iterator<Item = Turn>) -> impl Iterator<Item = Turn> {
        turns.skip_while(|turn| turn.role == Role::Model)
    }

    /// Collapse consecutive same-role turns into one, joining text with a newline.
    fn merge_runs(turns: impl Iterator<Item = Turn>) -> Vec<Turn> {
        let mut merged: Vec<Turn> = Vec::new();
        for turn in turns {
            match merged.last_mut() {
                Some(last) if last.role == turn.role => {
                    last.text.push_str(MERGE_SEPARATOR);
                    last.text.push_str(&turn.text);
                }
                _ => merged.push(turn),
            }
        }
        merged
    }
}
