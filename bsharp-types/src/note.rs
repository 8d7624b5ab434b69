use serde::{Deserialize, Serialize};

/// A pitch name the player can guess.
///
/// The set matches the game's answer buttons: twelve names with mixed
/// enharmonic spellings (Eb and Bb rather than D# and A#).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs,
    D,
    Eb,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    Bb,
    B,
}

impl Note {
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Eb,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::Bb,
        Note::B,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Eb => "Eb",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::Bb => "Bb",
            Note::B => "B",
        }
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Instrument whose sample set a play session uses. Chosen once at round
/// start and fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Instrument {
    #[default]
    Piano,
    Violin,
    Saxophone,
}

impl Instrument {
    pub const ALL: [Instrument; 3] = [Instrument::Piano, Instrument::Violin, Instrument::Saxophone];

    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Piano => "Piano",
            Instrument::Violin => "Violin",
            Instrument::Saxophone => "Saxophone",
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_distinct_notes() {
        assert_eq!(Note::ALL.len(), 12);
        for (i, a) in Note::ALL.iter().enumerate() {
            for b in &Note::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_uses_button_labels() {
        assert_eq!(Note::Cs.to_string(), "C#");
        assert_eq!(Note::Eb.to_string(), "Eb");
        assert_eq!(Note::Bb.to_string(), "Bb");
        assert_eq!(Note::B.to_string(), "B");
    }

    #[test]
    fn instrument_names() {
        assert_eq!(Instrument::ALL.len(), 3);
        assert_eq!(Instrument::Saxophone.name(), "Saxophone");
        assert_eq!(Instrument::default(), Instrument::Piano);
    }
}
