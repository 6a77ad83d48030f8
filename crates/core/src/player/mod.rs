use std::time::Duration;

use crate::{
    audio::AudioSource,
    config::{AppConfig, LabelConfig},
    render::{ControlSurface, Indicator},
    timeline::{PollTimer, Timeline},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// How playback reached the end of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    /// The reconciliation pass saw the playhead at or past the end.
    Polled,
    /// The audio source reported its natural end.
    Ended,
}

/// Keeps an indicator in step with the clip's playback position.
///
/// The player is the only owner of the poll timer: every transition out of
/// `Playing` cancels it.
#[derive(Debug)]
pub struct MorsePlayer<A, P> {
    timeline: Timeline,
    audio: A,
    panel: P,
    labels: LabelConfig,
    state: PlaybackState,
    timer: PollTimer,
}

impl<A, P> MorsePlayer<A, P>
where
    A: AudioSource,
    P: Indicator + ControlSurface,
{
    pub fn new(
        timeline: Timeline,
        audio: A,
        mut panel: P,
        labels: LabelConfig,
        poll_interval: Duration,
    ) -> Self {
        panel.set_active(false);
        panel.set_label(&labels.start);

        Self {
            timeline,
            audio,
            panel,
            labels,
            state: PlaybackState::Idle,
            timer: PollTimer::new(poll_interval),
        }
    }

    /// Builds the timeline for the configured message.
    pub fn from_config(config: &AppConfig, audio: A, panel: P) -> Self {
        let timeline = Timeline::from_message(&config.message, config.timing.unit_seconds);
        Self::new(
            timeline,
            audio,
            panel,
            config.labels.clone(),
            config.timing.poll_interval(),
        )
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whether the periodic reconciliation is currently scheduled.
    pub fn is_polling(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Handles a press of the play/pause control at host time `now`.
    pub fn press(&mut self, now: Duration) {
        match self.state {
            PlaybackState::Idle => self.start(now),
            PlaybackState::Playing => self.pause(),
        }
    }

    /// Runs one reconciliation pass if the poll timer is due at `now`.
    pub fn tick(&mut self, now: Duration) {
        if self.timer.fire_if_due(now) {
            self.reconcile();
        }
    }

    /// Compares the playhead against the timeline and updates the indicator,
    /// or resets everything once the message is over. Does nothing while idle.
    pub fn reconcile(&mut self) {
        if !self.is_playing() {
            return;
        }

        let position = self.audio.position_seconds();
        if self.timeline.is_finished_at(position) {
            self.finish(Completion::Polled);
            return;
        }

        let lit = self.timeline.light_state_at(position).is_on();
        tracing::trace!(position, lit, "reconciled indicator");
        self.panel.set_active(lit);
    }

    /// Handles the audio source's end-of-clip notification.
    pub fn on_audio_ended(&mut self) {
        if self.is_playing() {
            self.finish(Completion::Ended);
        }
    }

    /// Forwards a pending end-of-clip notification from the audio source.
    pub fn pump_audio_events(&mut self) {
        if self.audio.take_finished() {
            self.on_audio_ended();
        }
    }

    fn start(&mut self, now: Duration) {
        self.state = PlaybackState::Playing;

        if let Err(err) = self.audio.play() {
            tracing::debug!(error = %err, "ignoring rejected playback start");
        }

        self.reconcile();
        // The first pass may already have hit the end, e.g. for an empty message.
        if !self.is_playing() {
            return;
        }

        self.timer.start(now);
        self.panel.set_label(&self.labels.playing);
        tracing::debug!(
            total_seconds = self.timeline.total_duration_seconds(),
            "playback started"
        );
    }

    fn pause(&mut self) {
        self.audio.pause();
        self.timer.cancel();
        self.state = PlaybackState::Idle;
        self.panel.set_label(&self.labels.start);
        tracing::debug!(position = self.audio.position_seconds(), "playback paused");
    }

    fn finish(&mut self, completion: Completion) {
        self.timer.cancel();
        self.state = PlaybackState::Idle;
        self.panel.set_active(false);
        self.panel.set_label(&self.labels.start);

        if completion == Completion::Polled {
            self.audio.pause();
            self.audio.set_position_seconds(0.0);
        }

        tracing::debug!(?completion, "playback completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{audio::SimulatedAudio, render::Panel};

    const POLL: Duration = Duration::from_millis(50);

    fn player(message: &str) -> MorsePlayer<SimulatedAudio, Panel> {
        let timeline = Timeline::from_message(message, 0.1);
        let audio = SimulatedAudio::new(timeline.total_duration_seconds());
        MorsePlayer::new(timeline, audio, Panel::new(), LabelConfig::default(), POLL)
    }

    #[test]
    fn starts_idle_with_start_label() {
        let player = player("SOS");
        assert_eq!(player.state(), PlaybackState::Idle);
        assert_eq!(player.panel().label(), "Play Morse Code");
        assert!(!player.panel().is_active());
        assert!(!player.is_polling());
    }

    #[test]
    fn press_lights_immediately_and_starts_polling() {
        let mut player = player("SOS");
        player.press(Duration::ZERO);

        assert!(player.is_playing());
        assert!(player.is_polling());
        assert!(player.audio().is_playing());
        assert_eq!(player.panel().label(), "Pause");
        // First dot of S is lit without waiting for a tick.
        assert!(player.panel().is_active());
    }

    #[test]
    fn tick_follows_playhead() {
        let mut player = player("E E");
        player.press(Duration::ZERO);

        player.audio_mut().advance(0.15);
        player.tick(POLL);
        assert!(!player.panel().is_active());

        player.audio_mut().advance(0.70);
        player.tick(POLL * 2);
        assert!(player.panel().is_active());
    }

    #[test]
    fn tick_before_due_does_nothing() {
        let mut player = player("E E");
        player.press(Duration::ZERO);
        player.audio_mut().advance(0.15);

        player.tick(Duration::from_millis(10));
        assert!(player.panel().is_active());
    }

    #[test]
    fn manual_pause_leaves_light_as_is() {
        let mut player = player("SOS");
        player.press(Duration::ZERO);
        player.press(Duration::from_millis(20));

        assert_eq!(player.state(), PlaybackState::Idle);
        assert!(!player.is_polling());
        assert!(!player.audio().is_playing());
        assert_eq!(player.panel().label(), "Play Morse Code");
        assert!(player.panel().is_active());
    }

    #[test]
    fn resume_continues_from_paused_position() {
        let mut player = player("SOS");
        player.press(Duration::ZERO);
        player.audio_mut().advance(0.3);
        player.press(Duration::from_millis(300));
        player.press(Duration::from_millis(900));

        assert!(player.is_playing());
        assert!((player.audio().position_seconds() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn polled_completion_resets_and_rewinds() {
        let mut player = player("E");
        player.press(Duration::ZERO);
        player.audio_mut().set_position_seconds(0.1);

        player.tick(POLL);

        assert_eq!(player.state(), PlaybackState::Idle);
        assert!(!player.is_polling());
        assert!(!player.panel().is_active());
        assert_eq!(player.panel().label(), "Play Morse Code");
        assert_eq!(player.audio().position_seconds(), 0.0);
        assert!(!player.audio().is_playing());
    }

    #[test]
    fn ended_notification_resets_without_rewinding() {
        let mut player = player("E");
        player.press(Duration::ZERO);
        player.audio_mut().advance(0.5);

        player.pump_audio_events();

        assert_eq!(player.state(), PlaybackState::Idle);
        assert!(!player.is_polling());
        assert!(!player.panel().is_active());
        assert_eq!(player.panel().label(), "Play Morse Code");
        assert_eq!(player.audio().position_seconds(), 0.1);
    }

    #[test]
    fn ended_notification_while_idle_is_ignored() {
        let mut player = player("SOS");
        player.on_audio_ended();
        assert_eq!(player.state(), PlaybackState::Idle);
        assert_eq!(player.panel().transitions(), 0);
    }

    #[test]
    fn rejected_play_is_swallowed() {
        let timeline = Timeline::from_message("SOS", 0.1);
        let audio = SimulatedAudio::new(timeline.total_duration_seconds()).rejecting_play();
        let mut player =
            MorsePlayer::new(timeline, audio, Panel::new(), LabelConfig::default(), POLL);

        player.press(Duration::ZERO);

        assert!(player.is_playing());
        assert!(player.is_polling());
        assert_eq!(player.panel().label(), "Pause");
        assert_eq!(player.audio().play_requests(), 1);
    }

    #[test]
    fn empty_message_completes_on_first_pass() {
        let mut player = player("");
        player.press(Duration::ZERO);

        assert_eq!(player.state(), PlaybackState::Idle);
        assert!(!player.is_polling());
        assert_eq!(player.panel().label(), "Play Morse Code");
    }

    #[test]
    fn reconcile_while_idle_does_not_touch_panel() {
        let mut player = player("SOS");
        player.reconcile();
        assert!(!player.panel().is_active());
        assert_eq!(player.panel().transitions(), 0);
    }

    #[test]
    fn builds_from_config() {
        let config = AppConfig {
            message: "HI".to_string(),
            ..AppConfig::default()
        };
        let timeline = Timeline::from_message(&config.message, config.timing.unit_seconds);
        let audio = SimulatedAudio::new(timeline.total_duration_seconds());
        let player = MorsePlayer::from_config(&config, audio, Panel::new());

        // H(7) + gap(3) + I(3) units
        assert!((player.timeline().total_duration_seconds() - 1.3).abs() < 1e-9);
    }
}
