use serde::{Deserialize, Serialize};

use crate::note::{Instrument, Note};

/// Regulation round length in guesses.
pub const REGULATION_ATTEMPTS: u32 = 10;
/// Points awarded per correct guess.
pub const POINTS_PER_CORRECT: u32 = 10;
/// Score required at the regulation length to enter extended play.
pub const PERFECT_SCORE: u32 = 100;

/// Where the round is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundMode {
    /// Counting up to the regulation ten guesses.
    #[default]
    Normal,
    /// Past regulation with a perfect score; continues until the first miss.
    ExtendedPlay,
    /// Terminated; no further guesses accepted.
    Ended,
}

/// Complete state of one play-through.
///
/// Every piece of round bookkeeping lives in this one value, and it changes
/// only through the transitions in [`crate::round`]. There is no other
/// writer, so a transition either applies whole or leaves the state intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub instrument: Instrument,
    /// The note currently live for guessing. Set only after playback of the
    /// pending note has completed.
    pub current_note: Option<Note>,
    /// Chosen by `request_play`, awaiting playback confirmation.
    pub pending_note: Option<Note>,
    /// Answer of the previous round; excluded from the next draw.
    pub previous_note: Option<Note>,
    pub score: u32,
    pub attempts: u32,
    pub mode: RoundMode,
    /// Best score on record, seeded from the score store at round start.
    /// The round proposes updates; it never writes storage itself.
    pub high_score: u32,
}

impl RoundState {
    pub fn new(instrument: Instrument, high_score: u32) -> Self {
        Self {
            instrument,
            current_note: None,
            pending_note: None,
            previous_note: None,
            score: 0,
            attempts: 0,
            mode: RoundMode::Normal,
            high_score,
        }
    }

    /// True when a guess would be accepted right now.
    pub fn has_live_note(&self) -> bool {
        self.current_note.is_some() && self.mode != RoundMode::Ended
    }
}

/// Per-note accuracy counters, accumulated across rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStats {
    pub correct: u32,
    pub total: u32,
}
