//! Game coordinator: wires the round engine to clips, playback, and the
//! score store, and applies the side effects of each outcome.
//!
//! The presentation layer sends user intents here and renders the returned
//! reports. It must not decide round continuation itself; only the round's
//! mode and guess outcomes govern that.

use std::collections::HashMap;

use bsharp_audio::{ClipStore, PlaybackEvent, PlaybackSession};
use bsharp_types::{GameError, GuessReport, Note, NoteStats, RoundState};

use crate::engine::RoundEngine;
use crate::store::ScoreDb;

/// One running game: the engine plus its collaborators.
pub struct Game {
    engine: RoundEngine,
    clips: ClipStore,
    playback: PlaybackSession,
    scores: ScoreDb,
}

impl Game {
    /// Start a game on the instrument the clip store was loaded for, seeding
    /// the high score from the store.
    pub fn new(clips: ClipStore, scores: ScoreDb) -> Result<Self, String> {
        let instrument = clips.instrument();
        let high_score = scores.high_score().map_err(|e| e.to_string())?;
        Ok(Self {
            engine: RoundEngine::new(instrument, high_score),
            clips,
            playback: PlaybackSession::new(),
            scores,
        })
    }

    pub fn state(&self) -> &RoundState {
        self.engine.state()
    }

    /// Whether a clip is audible right now; gates the Replay control.
    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// Draw the next note and start its clip. The note becomes guessable
    /// only once [`Game::pump`] sees its playback complete.
    pub fn play(&mut self) -> Result<Note, GameError> {
        let note = self.engine.request_play()?;
        match self.clips.clip(note) {
            Some(clip) => {
                self.playback.play(clip.clone());
                Ok(note)
            }
            None => {
                self.engine.playback_failed(note);
                Err(GameError::PlaybackFailed(note))
            }
        }
    }

    /// Replay the current clip without drawing a new note.
    pub fn replay(&mut self) -> Result<(), GameError> {
        self.playback.replay()
    }

    /// Pump playback feedback into the engine. Call once per UI frame.
    /// Returns the applied events (stale ones are already dropped).
    pub fn pump(&mut self) -> Vec<PlaybackEvent> {
        let events = self.playback.drain_feedback();
        for event in &events {
            self.apply_playback_event(event);
        }
        events
    }

    fn apply_playback_event(&mut self, event: &PlaybackEvent) {
        match event {
            PlaybackEvent::Started { .. } => {}
            PlaybackEvent::Finished { note, .. } => {
                // A confirmation for a superseded request is rejected by the
                // engine; nothing to do beyond noting it.
                if let Err(e) = self.engine.confirm_played(*note) {
                    log::debug!(target: "game", "ignoring playback confirmation: {}", e);
                }
            }
            PlaybackEvent::Failed { note, .. } => self.engine.playback_failed(*note),
        }
    }

    /// Score a guess and apply its side effects: statistics exactly once per
    /// guess, the high score only on a new-high-score game over.
    pub fn guess(&mut self, note: Note) -> Result<GuessReport, GameError> {
        let report = self.engine.submit_guess(note)?;

        if let Err(e) = self.scores.record_guess(report.answer, report.correct) {
            log::warn!(target: "game", "failed to record statistics: {}", e);
        }
        if let Some(score) = report.new_high_score {
            if let Err(e) = self.scores.set_high_score(score) {
                log::warn!(target: "game", "failed to persist high score: {}", e);
            }
        }

        Ok(report)
    }

    /// Restart the round. The high score and statistics survive; anything
    /// still in flight on the player thread is released and invalidated.
    pub fn reset(&mut self) {
        self.playback.dispose();
        self.engine.reset();
    }

    /// Lifetime per-note accuracy, for the statistics screen.
    pub fn note_stats(&self) -> HashMap<Note, NoteStats> {
        self.scores.note_stats().unwrap_or_else(|e| {
            log::warn!(target: "game", "failed to read statistics: {}", e);
            HashMap::new()
        })
    }
}
