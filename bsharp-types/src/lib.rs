//! # bsharp-types
//!
//! Shared type definitions for the B# or Bb! note quiz.
//! Pure data and pure state transitions: no audio, no storage, no I/O.

pub mod error;
pub mod note;
pub mod round;
pub mod state;

pub use error::GameError;
pub use note::{Instrument, Note};
pub use round::{GuessOutcome, GuessReport};
pub use state::{
    NoteStats, RoundMode, RoundState, PERFECT_SCORE, POINTS_PER_CORRECT, REGULATION_ATTEMPTS,
};
