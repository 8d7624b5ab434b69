//! Pure state transitions for one round.
//!
//! These functions are the single source of truth for round-state mutation.
//! They do not touch audio, storage, or logging; callers own all side
//! effects. On error the state is left unchanged.

use crate::error::GameError;
use crate::note::{Instrument, Note};
use crate::state::{RoundMode, RoundState, PERFECT_SCORE, POINTS_PER_CORRECT, REGULATION_ATTEMPTS};

/// How a submitted guess resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
    /// Regulation length reached with a perfect score; extended play begins.
    PerfectScoreReached,
    GameOver,
    /// Terminal, and the final score beat the stored high score.
    GameOverNewHighScore,
}

impl GuessOutcome {
    /// Terminal outcomes end the round; the caller must not request another
    /// note afterwards.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver | Self::GameOverNewHighScore)
    }
}

/// Result of one submitted guess, for the caller to render and to derive
/// store side effects from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessReport {
    pub outcome: GuessOutcome,
    /// The note that was live. Statistics are recorded against this, not
    /// against the pressed button.
    pub answer: Note,
    pub correct: bool,
    /// Set when the final score should be written back as the new high score.
    pub new_high_score: Option<u32>,
}

/// Initialize a fresh round. Does not trigger playback; the caller must
/// follow up with `request_play`.
pub fn start(instrument: Instrument, high_score: u32) -> RoundState {
    RoundState::new(instrument, high_score)
}

/// Pick the next note to play, uniformly among all notes except the previous
/// answer, and record it as pending. `roll` must be in `[0, 1)`; the engine
/// derives it from its seeded generator so selection stays deterministic
/// under test.
pub fn request_play(state: &mut RoundState, roll: f32) -> Result<Note, GameError> {
    if state.mode == RoundMode::Ended {
        return Err(GameError::RoundOver);
    }
    if state.current_note.is_some() || state.pending_note.is_some() {
        return Err(GameError::AlreadyLive);
    }

    let eligible: Vec<Note> = Note::ALL
        .iter()
        .copied()
        .filter(|n| Some(*n) != state.previous_note)
        .collect();
    let idx = ((roll * eligible.len() as f32) as usize).min(eligible.len() - 1);
    let note = eligible[idx];

    state.pending_note = Some(note);
    Ok(note)
}

/// Promote the pending note to live after its playback completed.
///
/// A confirmation for anything other than the pending note is a late
/// callback from a superseded play request: rejected, state unchanged.
pub fn confirm_played(state: &mut RoundState, note: Note) -> Result<(), GameError> {
    if state.pending_note != Some(note) {
        return Err(GameError::StalePlayback);
    }
    state.pending_note = None;
    state.current_note = Some(note);
    Ok(())
}

/// Clear a pending note whose playback failed, so play can be retried.
/// Failures for anything other than the pending note are ignored.
pub fn playback_failed(state: &mut RoundState, note: Note) {
    if state.pending_note == Some(note) {
        state.pending_note = None;
    }
}

/// Score one guess and advance the round.
pub fn submit_guess(state: &mut RoundState, guess: Note) -> Result<GuessReport, GameError> {
    if state.mode == RoundMode::Ended {
        return Err(GameError::RoundOver);
    }
    let answer = state.current_note.ok_or(GameError::NoLiveNote)?;

    let correct = guess == answer;
    if correct {
        state.score += POINTS_PER_CORRECT;
    }
    state.attempts += 1;

    let outcome = advance_mode(state, correct);

    state.previous_note = Some(answer);
    state.current_note = None;

    let new_high_score = if outcome == GuessOutcome::GameOverNewHighScore {
        state.high_score = state.score;
        Some(state.score)
    } else {
        None
    };

    Ok(GuessReport {
        outcome,
        answer,
        correct,
        new_high_score,
    })
}

/// Termination / extension policy, applied exactly once per guess, with
/// `score` and `attempts` already updated.
fn advance_mode(state: &mut RoundState, correct: bool) -> GuessOutcome {
    match state.mode {
        RoundMode::Normal => {
            if state.attempts == REGULATION_ATTEMPTS {
                if state.score >= PERFECT_SCORE {
                    state.mode = RoundMode::ExtendedPlay;
                    GuessOutcome::PerfectScoreReached
                } else {
                    end_round(state)
                }
            } else if correct {
                GuessOutcome::Correct
            } else {
                GuessOutcome::Incorrect
            }
        }
        RoundMode::ExtendedPlay => {
            if correct {
                GuessOutcome::Correct
            } else {
                end_round(state)
            }
        }
        // Guarded by submit_guess; a finished round never gets here.
        RoundMode::Ended => GuessOutcome::GameOver,
    }
}

/// The high-score comparison runs at the moment of termination, against the
/// post-update score.
fn end_round(state: &mut RoundState) -> GuessOutcome {
    state.mode = RoundMode::Ended;
    if state.score > state.high_score {
        GuessOutcome::GameOverNewHighScore
    } else {
        GuessOutcome::GameOver
    }
}

/// Restart in place: progress is discarded, the high score and the chosen
/// instrument survive.
pub fn reset(state: &mut RoundState) {
    *state = RoundState::new(state.instrument, state.high_score);
}
