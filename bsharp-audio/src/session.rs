//! PlaybackSession: main-thread handle to the player thread.
//!
//! Owns the command/feedback channels; the cpal stream itself lives on the
//! player thread and is never touched from here.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender as CrossbeamSender;

use bsharp_types::{GameError, Note};

use crate::clips::Clip;
use crate::commands::{PlaybackEvent, PlayerCmd};
use crate::player::PlayerThread;

/// Whether a clip is currently audible. This, not a timer, gates the
/// Replay control's availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// One-clip-at-a-time playback with safe replacement.
///
/// Exactly one clip can be in flight. A new `play` supersedes the previous
/// one: the player thread releases the old stream before acquiring the new
/// one, and feedback from the superseded request is discarded here by
/// comparing generation ids.
pub struct PlaybackSession {
    cmd_tx: CrossbeamSender<PlayerCmd>,
    feedback_rx: Receiver<PlaybackEvent>,
    state: PlaybackState,
    generation: u64,
    last_clip: Option<Clip>,
    join_handle: Option<JoinHandle<()>>,
}

impl PlaybackSession {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
        let (feedback_tx, feedback_rx) = mpsc::channel();

        let join_handle = thread::spawn(move || {
            PlayerThread::new(cmd_rx, feedback_tx).run();
        });

        Self {
            cmd_tx,
            feedback_rx,
            state: PlaybackState::Idle,
            generation: 0,
            last_clip: None,
            join_handle: Some(join_handle),
        }
    }

    /// Begin playing `clip`. Success or failure arrives as a
    /// [`PlaybackEvent`] through [`PlaybackSession::drain_feedback`].
    pub fn play(&mut self, clip: Clip) {
        self.generation += 1;
        self.last_clip = Some(clip.clone());
        self.state = PlaybackState::Playing;
        self.send(PlayerCmd::Play {
            generation: self.generation,
            clip,
        });
    }

    /// Replay the most recently loaded clip without selecting a new note.
    pub fn replay(&mut self) -> Result<(), GameError> {
        let clip = self.last_clip.clone().ok_or(GameError::NoClipLoaded)?;
        self.generation += 1;
        self.state = PlaybackState::Playing;
        self.send(PlayerCmd::Play {
            generation: self.generation,
            clip,
        });
        Ok(())
    }

    /// Collect playback feedback, dropping events from superseded requests.
    /// Call once per UI frame.
    pub fn drain_feedback(&mut self) -> Vec<PlaybackEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.feedback_rx.try_recv() {
            if let Some(event) = self.apply_event(event) {
                out.push(event);
            }
        }
        out
    }

    /// Apply one feedback event, returning it unless it is stale.
    fn apply_event(&mut self, event: PlaybackEvent) -> Option<PlaybackEvent> {
        if event.generation() != self.generation {
            log::debug!(target: "audio", "discarding stale playback event for {}", event.note());
            return None;
        }
        match &event {
            PlaybackEvent::Started { .. } => self.state = PlaybackState::Playing,
            PlaybackEvent::Finished { .. } => self.state = PlaybackState::Idle,
            PlaybackEvent::Failed { note, reason, .. } => {
                log::warn!(target: "audio", "playback of {} failed: {}", note, reason);
                self.state = PlaybackState::Idle;
            }
        }
        Some(event)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// The note of the most recently played clip, if any.
    pub fn loaded_note(&self) -> Option<Note> {
        self.last_clip.as_ref().map(|c| c.note)
    }

    /// Stop playback and release the stream. Safe to call when idle.
    /// Anything still in flight becomes stale.
    pub fn dispose(&mut self) {
        self.generation += 1;
        self.state = PlaybackState::Idle;
        self.send(PlayerCmd::Stop);
    }

    fn send(&self, cmd: PlayerCmd) {
        if self.cmd_tx.send(cmd).is_err() {
            log::warn!(target: "audio", "player command dropped: thread disconnected");
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(PlayerCmd::Shutdown);
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new()
    }
}
