use crate::{MorseBlinkError, Result};

/// Audio clip playing the encoded message.
///
/// The player only asks the source to start, stop and report where it is.
/// Decoding and output belong to the implementation.
pub trait AudioSource {
    /// Starts or resumes playback. May be rejected by the host, e.g. by an
    /// autoplay policy.
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    fn position_seconds(&self) -> f64;

    fn set_position_seconds(&mut self, seconds: f64);

    /// Returns `true` once after playback reaches the natural end of the clip.
    fn take_finished(&mut self) -> bool;
}

/// Monotonic playback position in seconds.
#[derive(Debug, Default, Clone)]
pub struct AudioClock {
    pub time_seconds: f64,
}

impl AudioClock {
    pub fn reset(&mut self) {
        self.time_seconds = 0.0;
    }

    pub fn advance(&mut self, delta: f64) {
        self.time_seconds = (self.time_seconds + delta).max(0.0);
    }
}

/// In-memory stand-in for the clip. The host advances it explicitly, either
/// from a wall clock or from a test.
#[derive(Debug, Clone)]
pub struct SimulatedAudio {
    clock: AudioClock,
    duration_seconds: f64,
    playing: bool,
    finished_pending: bool,
    reject_play: bool,
    play_requests: usize,
}

impl SimulatedAudio {
    pub fn new(duration_seconds: f64) -> Self {
        Self {
            clock: AudioClock::default(),
            duration_seconds: duration_seconds.max(0.0),
            playing: false,
            finished_pending: false,
            reject_play: false,
            play_requests: 0,
        }
    }

    /// Makes every `play` call fail the way a blocked autoplay would.
    pub fn rejecting_play(mut self) -> Self {
        self.reject_play = true;
        self
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play_requests(&self) -> usize {
        self.play_requests
    }

    /// Moves the playhead forward while playing. Reaching the end stops
    /// playback and latches the finished notification.
    pub fn advance(&mut self, delta_seconds: f64) {
        if !self.playing {
            return;
        }

        self.clock.advance(delta_seconds);
        if self.clock.time_seconds >= self.duration_seconds {
            self.clock.time_seconds = self.duration_seconds;
            self.playing = false;
            self.finished_pending = true;
            tracing::trace!(position = self.clock.time_seconds, "simulated clip ended");
        }
    }
}

impl AudioSource for SimulatedAudio {
    fn play(&mut self) -> Result<()> {
        self.play_requests += 1;
        if self.reject_play {
            return Err(MorseBlinkError::PlaybackRejected(
                "autoplay is not allowed".to_string(),
            ));
        }

        if self.clock.time_seconds >= self.duration_seconds {
            self.clock.reset();
        }
        // A new run owes no notification for the previous one.
        self.finished_pending = false;
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn position_seconds(&self) -> f64 {
        self.clock.time_seconds
    }

    fn set_position_seconds(&mut self, seconds: f64) {
        self.clock.time_seconds = seconds.clamp(0.0, self.duration_seconds);
        if self.clock.time_seconds < self.duration_seconds {
            self.finished_pending = false;
        }
    }

    fn take_finished(&mut self) -> bool {
        std::mem::take(&mut self.finished_pending)
    }
}
