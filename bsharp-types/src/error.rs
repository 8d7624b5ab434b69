//! Typed, recoverable errors surfaced to the presentation layer.

use crate::note::Note;

/// Everything that can go wrong while driving a round.
///
/// All variants are local, recoverable conditions meant for display (a
/// dismissible notice, say); none of them ends the round by itself. Round
/// continuation is governed only by the round's mode and guess outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// A note is already in play (live or awaiting playback confirmation).
    AlreadyLive,
    /// The round has ended; reset to keep playing.
    RoundOver,
    /// A playback confirmation arrived for a superseded play request.
    StalePlayback,
    /// No note is in play; play one before guessing.
    NoLiveNote,
    /// Replay requested before anything was played.
    NoClipLoaded,
    /// The sample for this note could not be loaded or played.
    PlaybackFailed(Note),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyLive => write!(f, "a note is already in play"),
            Self::RoundOver => write!(f, "the round is over"),
            Self::StalePlayback => write!(f, "stale playback confirmation"),
            Self::NoLiveNote => write!(f, "no note is in play"),
            Self::NoClipLoaded => write!(f, "nothing has been played yet"),
            Self::PlaybackFailed(note) => write!(f, "could not play the sample for {}", note),
        }
    }
}

impl std::error::Error for GameError {}
