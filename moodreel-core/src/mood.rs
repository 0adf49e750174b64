//! Mood resolution
//!
//! Maps free-text moods onto the genre keyword that is actually sent to the
//! catalog. The table is fixed; several moods deliberately share a keyword.

use serde::Serialize;

/// Built-in mood table in display order.
const MOODS: [(&str, &str); 25] = [
    ("sad", "drama"),
    ("demotivated", "sports"),
    ("angry", "slice of life"),
    ("stressed", "animation"),
    ("bored", "thriller"),
    ("lonely", "romance"),
    ("empty", "drama"),
    ("happy", "adventure"),
    ("romantic", "romantic comedy"),
    ("overthinking", "documentary"),
    ("curious", "educational"),
    ("tired", "action"),
    ("excited", "fantasy"),
    ("nostalgic", "classic"),
    ("confused", "mystery"),
    ("adventurous", "exploration"),
    ("playful", "family"),
    ("anxious", "psychological thriller"),
    ("relaxed", "feel-good"),
    ("motivated", "biography"),
    ("hungry", "food & travel"),
    ("hopeful", "uplifting"),
    ("gloomy", "horror"),
    ("energetic", "musical"),
    ("creative", "art & experimental"),
];

/// Reasons a mood cannot be turned into a search keyword.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoodError {
    /// Input was blank once whitespace was removed.
    #[error("Please enter a mood")]
    Empty,

    /// Input is not one of the known moods.
    #[error("Mood not recognized: '{input}'")]
    Unmapped {
        /// The input as the user typed it
        input: String,
    },
}

/// One row of the mood table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodEntry {
    pub mood: &'static str,
    pub keyword: &'static str,
}

/// Immutable lookup table from normalized mood to genre keyword.
#[derive(Debug, Clone, Copy)]
pub struct MoodTable {
    entries: &'static [(&'static str, &'static str)],
}

impl MoodTable {
    /// Returns the built-in table.
    pub const fn builtin() -> Self {
        Self { entries: &MOODS }
    }

    /// Resolves user input to the catalog keyword for that mood.
    ///
    /// Input is trimmed, internal whitespace runs are collapsed and the result
    /// is lowercased before lookup, so `"  Happy "` resolves like `"happy"`.
    ///
    /// # Errors
    ///
    /// - `MoodError::Empty` - Input is blank
    /// - `MoodError::Unmapped` - Input does not name a known mood
    pub fn resolve(&self, input: &str) -> Result<&'static str, MoodError> {
        let normalized = normalize(input);
        if normalized.is_empty() {
            return Err(MoodError::Empty);
        }

        self.entries
            .iter()
            .find(|(mood, _)| *mood == normalized)
            .map(|(_, keyword)| *keyword)
            .ok_or_else(|| MoodError::Unmapped {
                input: input.to_string(),
            })
    }

    /// Iterates over all moods in display order.
    pub fn moods(&self) -> impl Iterator<Item = MoodEntry> + '_ {
        self.entries
            .iter()
            .map(|&(mood, keyword)| MoodEntry { mood, keyword })
    }

    /// Number of moods in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no moods.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MoodTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Resolves a mood against the built-in table.
///
/// # Errors
///
/// See [`MoodTable::resolve`].
pub fn resolve(input: &str) -> Result<&'static str, MoodError> {
    MoodTable::builtin().resolve(input)
}

/// Lowercases input and collapses whitespace to single spaces.
pub fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
