//! Core library for the Morse blink application.
//!
//! A fixed message is turned into a schedule of on/off segments using Morse
//! timing units, placed on the time axis of a pre-recorded clip, and then
//! replayed against the clip's playhead to drive a blinking indicator. The
//! audio source, indicator and control are traits so that a browser page, a
//! terminal or a test can host the same state machine.

pub mod alphabet;
pub mod audio;
pub mod config;
pub mod error;
pub mod player;
pub mod render;
pub mod schedule;
pub mod timeline;

pub use alphabet::{code_for, render_code, symbols_for, Symbol, MORSE_TABLE};
pub use audio::{AudioClock, AudioSource, SimulatedAudio};
pub use config::{AppConfig, LabelConfig, TimingConfig};
pub use error::{MorseBlinkError, Result};
pub use player::{MorsePlayer, PlaybackState};
pub use render::{ControlSurface, Indicator, Panel};
pub use schedule::{build_schedule, total_units, Segment, SegmentKind};
pub use timeline::{Interval, PollTimer, Timeline};
