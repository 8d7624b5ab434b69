//! WAV clip decoding and the per-instrument clip store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bsharp_types::{Instrument, Note};

/// One decoded audio clip: interleaved f32 samples plus format info.
///
/// Samples sit behind an `Arc` so handing a clip to the player thread (and
/// replaying it) never copies the audio data.
#[derive(Debug, Clone)]
pub struct Clip {
    pub note: Note,
    pub samples: Arc<Vec<f32>>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl Clip {
    pub fn duration_secs(&self) -> f32 {
        let frames = self.samples.len() / self.channels.max(1) as usize;
        frames as f32 / self.sample_rate as f32
    }
}

/// Read-only mapping from note to decoded clip for one instrument's sample
/// set, loaded up front at round start so a missing or corrupt file surfaces
/// before the first play press.
#[derive(Debug)]
pub struct ClipStore {
    instrument: Instrument,
    clips: HashMap<Note, Clip>,
}

impl ClipStore {
    /// Load the full twelve-note sample set for `instrument` from `dir`.
    /// Fails naming the offending path if any file is missing or undecodable.
    pub fn load(dir: &Path, instrument: Instrument) -> Result<Self, String> {
        let mut clips = HashMap::new();
        for note in Note::ALL {
            let path = clip_path(dir, instrument, note);
            let clip =
                load_wav(&path, note).map_err(|e| format!("{}: {}", path.display(), e))?;
            clips.insert(note, clip);
        }
        log::info!(target: "audio::clips", "loaded {} clips for {}", clips.len(), instrument);
        Ok(Self { instrument, clips })
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    pub fn clip(&self, note: Note) -> Option<&Clip> {
        self.clips.get(&note)
    }
}

/// Asset naming convention: lowercase note name plus instrument, e.g.
/// `c#_piano.wav`, `eb_violin.wav`, `bb_saxophone.wav`.
pub fn clip_path(dir: &Path, instrument: Instrument, note: Note) -> PathBuf {
    dir.join(format!(
        "{}_{}.wav",
        note.name().to_lowercase(),
        instrument.name().to_lowercase()
    ))
}

fn load_wav(path: &Path, note: Note) -> Result<Clip, String> {
    let mut reader = hound::WavReader::open(path).map_err(|e| e.to_string())?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| e.to_string())?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| e.to_string())?
        }
    };

    if samples.is_empty() {
        return Err("empty clip".to_string());
    }

    Ok(Clip {
        note,
        samples: Arc::new(samples),
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav_i16(path: &Path, frames: usize) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames {
            writer.write_sample((i as i16) * 100).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn write_wav_f32(path: &Path, frames: usize) {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames * 2 {
            writer.write_sample(i as f32 / 1000.0).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn write_full_set(dir: &Path, instrument: Instrument) {
        for note in Note::ALL {
            write_wav_i16(&clip_path(dir, instrument, note), 64);
        }
    }

    #[test]
    fn clip_paths_use_lowercase_button_names() {
        let dir = Path::new("/tmp/clips");
        assert_eq!(
            clip_path(dir, Instrument::Piano, Note::Cs),
            dir.join("c#_piano.wav")
        );
        assert_eq!(
            clip_path(dir, Instrument::Violin, Note::Eb),
            dir.join("eb_violin.wav")
        );
        assert_eq!(
            clip_path(dir, Instrument::Saxophone, Note::Bb),
            dir.join("bb_saxophone.wav")
        );
    }

    #[test]
    fn loads_a_full_instrument_set() {
        let dir = tempfile::tempdir().unwrap();
        write_full_set(dir.path(), Instrument::Piano);

        let store = ClipStore::load(dir.path(), Instrument::Piano).unwrap();
        assert_eq!(store.instrument(), Instrument::Piano);
        for note in Note::ALL {
            let clip = store.clip(note).expect("clip loaded");
            assert_eq!(clip.note, note);
            assert_eq!(clip.sample_rate, 44100);
            assert_eq!(clip.samples.len(), 64);
        }
    }

    #[test]
    fn int_samples_are_scaled_to_unit_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c_piano.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        writer.write_sample(i16::MAX).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.finalize().unwrap();

        let clip = load_wav(&path, Note::C).unwrap();
        assert!((clip.samples[0] - 1.0).abs() < 0.001);
        assert_eq!(clip.samples[1], 0.0);
    }

    #[test]
    fn float_wavs_decode_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a_violin.wav");
        write_wav_f32(&path, 32);

        let clip = load_wav(&path, Note::A).unwrap();
        assert_eq!(clip.channels, 2);
        assert_eq!(clip.sample_rate, 48000);
        assert_eq!(clip.samples.len(), 64);
        assert!((clip.duration_secs() - 32.0 / 48000.0).abs() < 1e-6);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        // Leave out f#_violin.wav.
        for note in Note::ALL {
            if note != Note::Fs {
                write_wav_i16(&clip_path(dir.path(), Instrument::Violin, note), 8);
            }
        }
        let err = ClipStore::load(dir.path(), Instrument::Violin).unwrap_err();
        assert!(err.contains("f#_violin.wav"), "unexpected error: {}", err);
    }
}
