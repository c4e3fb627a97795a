/*!
Audio playback sampling and transition detection.

The audio stream itself belongs to the embedding media subsystem and
runs on its own clock. Once per frame the engine snapshots it and, from
the snapshot plus the externally controlled play value, derives at most
one discrete transition. Detection is level-triggered: nothing here
registers callbacks, the levels are simply compared against what they
were the last time anyone looked.
*/

use crate::Logger;

/// An audio stream owned by the embedding media subsystem.
///
/// The engine samples the getters once per frame and never blocks on
/// them; `play`/`pause` are fire-and-forget requests.
pub trait AudioSource {
    /// Seconds of audio played so far.
    fn current_time(&self) -> f32;
    /// Whether the stream is paused.
    fn paused(&self) -> bool;
    /// Whether the stream has played to completion.
    fn ended(&self) -> bool;
    /// Begins or resumes playback from the current position.
    fn play(&mut self);
    /// Halts playback, keeping the current position.
    fn pause(&mut self);
}

/// Snapshot of an audio stream. Rebuilt every frame, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackState {
    pub current_time: f32,
    pub is_playing: bool,
    pub has_ended: bool,
}

impl PlaybackState {
    /// Reads a snapshot off the stream.
    pub fn sample(source: &dyn AudioSource) -> Self {
        let has_ended = source.ended();
        Self {
            current_time: source.current_time(),
            is_playing: !source.paused() && !has_ended,
            has_ended,
        }
    }
}

/// A discrete playback transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The play control went high.
    Started,
    /// The play control went low while the stream was active.
    Stopped,
    /// The stream ran out on its own.
    Ended,
}

/// Turns sampled levels into playback transitions.
///
/// Each transition is delivered exactly once; sampling the same levels
/// again yields nothing, so callers can run detection every frame
/// without guarding against re-entry.
#[derive(Debug)]
pub struct PlaybackMonitor {
    logger: Logger,

    play_requested: bool,
    /// Whether a started stream is being watched for its natural end.
    watching: bool,
}

impl Default for PlaybackMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackMonitor {
    pub fn new() -> Self {
        Self {
            logger: Logger::create("PlaybackMonitor"),
            play_requested: false,
            watching: false,
        }
    }

    /// Folds the play control level and the frame's stream snapshot
    /// into at most one transition.
    ///
    /// A control edge always wins over a natural end observed in the
    /// same frame; the end would be detected next frame anyway if it
    /// still holds.
    pub fn detect(&mut self, play: bool, state: PlaybackState) -> Option<PlaybackEvent> {
        if play != self.play_requested {
            self.play_requested = play;
            self.watching = play;

            let event = if play {
                PlaybackEvent::Started
            } else {
                PlaybackEvent::Stopped
            };
            self.logger.debug(format!("{event:?}"));
            return Some(event);
        }

        if self.watching && (!state.is_playing || state.has_ended) {
            self.watching = false;
            self.logger.debug("Ended");
            return Some(PlaybackEvent::Ended);
        }

        None
    }
}
