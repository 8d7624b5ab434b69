//! Command and feedback types for the player thread.

use bsharp_types::Note;

use crate::clips::Clip;

/// Commands sent from the session handle to the player thread.
pub(crate) enum PlayerCmd {
    /// Release whatever is playing, then start `clip`.
    Play { generation: u64, clip: Clip },
    /// Stop playback and release the stream; the session stays usable.
    Stop,
    /// Exit the player thread.
    Shutdown,
}

/// Feedback from the player thread.
///
/// Each event carries the generation of the play request that produced it,
/// so results arriving after that request was superseded can be discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The clip's stream is running; the note is audible.
    Started { generation: u64, note: Note },
    /// The clip ran to completion.
    Finished { generation: u64, note: Note },
    /// The clip could not be played.
    Failed {
        generation: u64,
        note: Note,
        reason: String,
    },
}

impl PlaybackEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Started { generation, .. }
            | Self::Finished { generation, .. }
            | Self::Failed { generation, .. } => *generation,
        }
    }

    pub fn note(&self) -> Note {
        match self {
            Self::Started { note, .. } | Self::Finished { note, .. } | Self::Failed { note, .. } => {
                *note
            }
        }
    }
}
