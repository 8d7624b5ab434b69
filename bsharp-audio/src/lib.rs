//! # bsharp-audio
//!
//! Clip loading and playback for the B# or Bb! note quiz.
//!
//! One clip is in flight at a time: [`session::PlaybackSession`] is the
//! main-thread handle, and a dedicated player thread owns the only native
//! audio stream, driven over channels.

pub mod clips;
pub mod commands;
mod player;
pub mod session;

pub use clips::{Clip, ClipStore};
pub use commands::PlaybackEvent;
pub use session::{PlaybackSession, PlaybackState};
