//! Stateful wrapper over the pure round transitions.

use bsharp_types::{round, GameError, GuessReport, Instrument, Note, RoundState};

fn next_random(state: &mut u64) -> f32 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    ((*state >> 32) as u32 as f32) / (u32::MAX as f32)
}

/// Drives one play-through: owns the [`RoundState`] and the seeded note
/// generator, and exposes the round transitions.
///
/// Pure with respect to audio and storage; [`crate::game::Game`] owns those
/// collaborators and applies the side effects of each report.
pub struct RoundEngine {
    state: RoundState,
    rng_state: u64,
}

impl RoundEngine {
    /// Start a round for `instrument`. `high_score` comes from the score
    /// store; the engine only proposes updates to it.
    pub fn new(instrument: Instrument, high_score: u32) -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5eed)
            | 1;
        Self::with_seed(instrument, high_score, seed)
    }

    /// Deterministic constructor for tests.
    pub fn with_seed(instrument: Instrument, high_score: u32, seed: u64) -> Self {
        Self {
            state: round::start(instrument, high_score),
            rng_state: seed,
        }
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Pick the next note for the caller to hand to playback. The note stays
    /// pending (not guessable) until [`RoundEngine::confirm_played`] accepts
    /// the playback confirmation.
    pub fn request_play(&mut self) -> Result<Note, GameError> {
        let roll = next_random(&mut self.rng_state);
        round::request_play(&mut self.state, roll)
    }

    pub fn confirm_played(&mut self, note: Note) -> Result<(), GameError> {
        round::confirm_played(&mut self.state, note)
    }

    pub fn playback_failed(&mut self, note: Note) {
        round::playback_failed(&mut self.state, note);
    }

    pub fn submit_guess(&mut self, guess: Note) -> Result<GuessReport, GameError> {
        round::submit_guess(&mut self.state, guess)
    }

    /// Discard round progress; high score and instrument survive.
    pub fn reset(&mut self) {
        round::reset(&mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsharp_types::GuessOutcome;

    #[test]
    fn seeded_engines_pick_the_same_notes() {
        let mut a = RoundEngine::with_seed(Instrument::Piano, 0, 42);
        let mut b = RoundEngine::with_seed(Instrument::Piano, 0, 42);
        for _ in 0..20 {
            let note_a = a.request_play().unwrap();
            let note_b = b.request_play().unwrap();
            assert_eq!(note_a, note_b);
            a.confirm_played(note_a).unwrap();
            b.confirm_played(note_b).unwrap();
            a.submit_guess(note_a).unwrap();
            b.submit_guess(note_b).unwrap();
        }
    }

    #[test]
    fn never_draws_the_previous_answer() {
        let mut engine = RoundEngine::with_seed(Instrument::Piano, 0, 7);
        let mut previous: Option<Note> = None;
        for _ in 0..200 {
            let note = engine.request_play().unwrap();
            if let Some(previous) = previous {
                assert_ne!(note, previous);
            }
            engine.confirm_played(note).unwrap();
            engine.submit_guess(note).unwrap();
            previous = Some(note);
            if engine.state().mode == bsharp_types::RoundMode::Ended {
                engine.reset();
                previous = None;
            }
        }
    }

    #[test]
    fn every_note_is_eventually_drawn() {
        let mut engine = RoundEngine::with_seed(Instrument::Piano, 0, 3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            let note = engine.request_play().unwrap();
            seen.insert(note);
            engine.confirm_played(note).unwrap();
            // Always guess right: the round rolls into extended play and
            // never ends, so drawing continues.
            engine.submit_guess(note).unwrap();
        }
        assert_eq!(seen.len(), Note::ALL.len());
    }

    #[test]
    fn ten_correct_guesses_reach_extended_play() {
        let mut engine = RoundEngine::with_seed(Instrument::Violin, 0, 99);
        for i in 0..10 {
            let note = engine.request_play().unwrap();
            engine.confirm_played(note).unwrap();
            let report = engine.submit_guess(note).unwrap();
            if i < 9 {
                assert_eq!(report.outcome, GuessOutcome::Correct);
            } else {
                assert_eq!(report.outcome, GuessOutcome::PerfectScoreReached);
            }
        }
        assert_eq!(engine.state().mode, bsharp_types::RoundMode::ExtendedPlay);
    }
}
