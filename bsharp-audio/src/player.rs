//! Player thread: owns the single active output stream.
//!
//! A plain worker loop: receive a command or time out, then poll the active
//! clip for completion. All cpal objects live and die on this thread.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use crossbeam_channel::{Receiver, RecvTimeoutError};

use bsharp_types::Note;

use crate::clips::Clip;
use crate::commands::{PlaybackEvent, PlayerCmd};

/// An in-flight clip playback: the stream plus the shared read cursor the
/// output callback advances.
struct ActivePlayback {
    generation: u64,
    note: Note,
    _stream: Stream,
    cursor: Arc<AtomicUsize>,
    len: usize,
}

pub(crate) struct PlayerThread {
    cmd_rx: Receiver<PlayerCmd>,
    feedback_tx: Sender<PlaybackEvent>,
    active: Option<ActivePlayback>,
}

impl PlayerThread {
    pub(crate) fn new(cmd_rx: Receiver<PlayerCmd>, feedback_tx: Sender<PlaybackEvent>) -> Self {
        Self {
            cmd_rx,
            feedback_tx,
            active: None,
        }
    }

    pub(crate) fn run(mut self) {
        const POLL_INTERVAL: Duration = Duration::from_millis(10);
        loop {
            match self.cmd_rx.recv_timeout(POLL_INTERVAL) {
                Ok(PlayerCmd::Play { generation, clip }) => self.start(generation, clip),
                Ok(PlayerCmd::Stop) => self.release(),
                Ok(PlayerCmd::Shutdown) => break,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            self.poll_completion();
        }
        self.release();
    }

    /// Release the current stream before acquiring the next one; a new play
    /// must never stack a second native stream on top of the first.
    fn start(&mut self, generation: u64, clip: Clip) {
        self.release();
        let note = clip.note;
        match build_output_stream(&clip) {
            Ok((stream, cursor)) => {
                self.active = Some(ActivePlayback {
                    generation,
                    note,
                    _stream: stream,
                    cursor,
                    len: clip.samples.len(),
                });
                self.send(PlaybackEvent::Started { generation, note });
            }
            Err(reason) => {
                log::warn!(target: "audio::player", "playback of {} failed: {}", note, reason);
                self.send(PlaybackEvent::Failed {
                    generation,
                    note,
                    reason,
                });
            }
        }
    }

    fn poll_completion(&mut self) {
        let done = self
            .active
            .as_ref()
            .map(|a| a.cursor.load(Ordering::Relaxed) >= a.len)
            .unwrap_or(false);
        if done {
            if let Some(active) = self.active.take() {
                self.send(PlaybackEvent::Finished {
                    generation: active.generation,
                    note: active.note,
                });
            }
        }
    }

    /// Dropping the stream stops playback and frees the native handle.
    fn release(&mut self) {
        self.active = None;
    }

    fn send(&self, event: PlaybackEvent) {
        if self.feedback_tx.send(event).is_err() {
            log::warn!(target: "audio::player", "feedback dropped: session handle gone");
        }
    }
}

/// Build and start an output stream that feeds the clip's samples once and
/// then silence. Returns the stream and the shared sample cursor.
///
/// TODO: resample when the device rate differs from the clip rate; today a
/// 44.1k clip on a 48k device plays slightly sharp.
fn build_output_stream(clip: &Clip) -> Result<(Stream, Arc<AtomicUsize>), String> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| "no output device available".to_string())?;
    let config = device
        .default_output_config()
        .map_err(|e| format!("failed to get output config: {}", e))?;

    if config.sample_format() != cpal::SampleFormat::F32 {
        return Err(format!(
            "unsupported sample format: {:?}",
            config.sample_format()
        ));
    }

    let device_channels = config.channels().max(1) as usize;
    let stream_config: StreamConfig = config.into();

    let samples = Arc::clone(&clip.samples);
    let clip_channels = clip.channels.max(1) as usize;
    let cursor = Arc::new(AtomicUsize::new(0));
    let cb_cursor = Arc::clone(&cursor);

    let stream = device
        .build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut pos = cb_cursor.load(Ordering::Relaxed);
                for frame in data.chunks_mut(device_channels) {
                    if pos >= samples.len() {
                        for out in frame.iter_mut() {
                            *out = 0.0;
                        }
                        continue;
                    }
                    // Mono clips fan out to every device channel; extra
                    // device channels repeat the clip's last channel.
                    for (i, out) in frame.iter_mut().enumerate() {
                        let offset = i.min(clip_channels - 1);
                        *out = samples.get(pos + offset).copied().unwrap_or(0.0);
                    }
                    pos += clip_channels;
                }
                cb_cursor.store(pos, Ordering::Relaxed);
            },
            move |err| {
                log::error!(target: "audio::player", "output stream error: {}", err);
            },
            None,
        )
        .map_err(|e| format!("failed to build output stream: {}", e))?;

    stream
        .play()
        .map_err(|e| format!("failed to start output stream: {}", e))?;

    Ok((stream, cursor))
}
