/*!
The per-frame driver that keeps mouth, body, and gaze in sync with the
selected script's audio.

A runner owns one puppet, one mixer, and the audio + cue timeline of
whichever script is currently selected. The surrounding application
owns the controls (a play flag and a script selection), the camera, and
the dialogue bubble; the runner samples the former each tick and only
ever toggles the latter's visibility.
*/

use std::path::PathBuf;

use glam::Vec3;

use crate::animation::{AnimationMixer, AnimationState};
use crate::error::Error;
use crate::model::cues::CueTimeline;
use crate::model::{AvatarConfig, ScriptId};
use crate::puppets::Puppet3d;
use crate::receivers::playback::{AudioSource, PlaybackEvent, PlaybackMonitor, PlaybackState};
use crate::Logger;

/// Supplies the audio stream and cue timeline for a script.
///
/// Acquisition is scoped: the runner asks again whenever the selection
/// changes and drops whatever it held for the previous script.
pub trait ScriptSource {
    fn audio(&self, script: &ScriptId) -> Result<Box<dyn AudioSource>, Error>;
    fn timeline(&self, script: &ScriptId) -> Result<CueTimeline, Error>;
}

/// Shows or hides the avatar's dialogue line.
///
/// Message text and placement are the presenter's business; the runner
/// only flips visibility.
pub trait DialoguePresenter {
    fn set_visible(&mut self, visible: bool);
}

/// Externally controlled levels, sampled once per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    /// Whether audio should be playing.
    pub play: bool,
    /// Which script is selected.
    pub script: ScriptId,
}

/// Drives one avatar.
pub struct AvatarRunner {
    logger: Logger,

    config: AvatarConfig,
    scripts: Box<dyn ScriptSource>,
    dialogue: Box<dyn DialoguePresenter>,

    puppet: Puppet3d,
    mixer: AnimationMixer,
    monitor: PlaybackMonitor,

    script: ScriptId,
    audio: Box<dyn AudioSource>,
    timeline: CueTimeline,
}

impl AvatarRunner {
    /// Builds a runner with `script` selected, acquiring its audio and
    /// timeline up front and putting the puppet into its rest pose.
    pub fn new(
        config: AvatarConfig,
        mut puppet: Puppet3d,
        mixer: AnimationMixer,
        scripts: Box<dyn ScriptSource>,
        dialogue: Box<dyn DialoguePresenter>,
        script: ScriptId,
    ) -> Result<Self, Error> {
        let audio = scripts.audio(&script)?;
        let timeline = scripts.timeline(&script)?;

        puppet.ready(config.initial_mouth_shape.as_deref());

        Ok(Self {
            logger: Logger::create("AvatarRunner"),
            config,
            scripts,
            dialogue,
            puppet,
            mixer,
            monitor: PlaybackMonitor::new(),
            script,
            audio,
            timeline,
        })
    }

    pub fn puppet(&self) -> &Puppet3d {
        &self.puppet
    }

    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    pub fn script(&self) -> &ScriptId {
        &self.script
    }

    pub fn config(&self) -> &AvatarConfig {
        &self.config
    }

    /// Swaps in a newly selected script.
    ///
    /// The old audio stream and timeline are dropped together; a script
    /// is either fully selected or not at all.
    fn select_script(&mut self, script: &ScriptId) -> Result<(), Error> {
        if *script == self.script {
            return Ok(());
        }

        let audio = self.scripts.audio(script)?;
        let timeline = self.scripts.timeline(script)?;

        self.audio = audio;
        self.timeline = timeline;
        self.script = script.clone();
        self.logger.info(format!("Selected script {script}"));

        Ok(())
    }

    /// One frame.
    ///
    /// Fixed order: sample playback, handle transitions, move the
    /// mouth, advance the body animation, aim the head. Morph weights
    /// must reflect this frame's audio time before the frame is
    /// presented, and the head pose must be computed after the body
    /// animation has been advanced.
    pub fn tick(&mut self, controls: &Controls, camera_position: Vec3, dt: f32) {
        if let Err(e) = self.select_script(&controls.script) {
            self.logger
                .error(format!("Unable to select script {}: {e}", controls.script));
        }

        let state = PlaybackState::sample(self.audio.as_ref());

        match self.monitor.detect(controls.play, state) {
            Some(PlaybackEvent::Started) => {
                self.audio.play();
                self.dialogue.set_visible(true);

                if controls.script == self.config.gesture_script {
                    self.mixer.request(AnimationState::Gesture);
                } else {
                    self.mixer.request(AnimationState::Idle);
                }
            }
            Some(PlaybackEvent::Stopped) => {
                self.audio.pause();
                self.dialogue.set_visible(false);
                self.mixer.request(AnimationState::Idle);
            }
            Some(PlaybackEvent::Ended) => {
                self.dialogue.set_visible(false);
                self.mixer.request(AnimationState::Idle);
            }
            None => {}
        }

        let shape = self.timeline.active_shape(state.current_time);
        self.puppet.apply_mouth_shape(shape);

        self.mixer.update(dt);
        self.puppet.look_at(camera_position);
    }
}

/// A directory of script assets.
///
/// Cue documents live at `<dir>/<script>.json`, matching the layout the
/// timeline tool writes next to its audio files. Audio decoding stays
/// with the embedder, so streams come from a factory it supplies.
pub struct ScriptLibrary {
    dir: PathBuf,
    open_audio: Box<dyn Fn(&ScriptId) -> Result<Box<dyn AudioSource>, Error>>,
}

impl ScriptLibrary {
    pub fn new(
        dir: impl Into<PathBuf>,
        open_audio: Box<dyn Fn(&ScriptId) -> Result<Box<dyn AudioSource>, Error>>,
    ) -> Self {
        Self {
            dir: dir.into(),
            open_audio,
        }
    }
}

impl ScriptSource for ScriptLibrary {
    fn audio(&self, script: &ScriptId) -> Result<Box<dyn AudioSource>, Error> {
        (self.open_audio)(script)
    }

    fn timeline(&self, script: &ScriptId) -> Result<CueTimeline, Error> {
        CueTimeline::from_path(self.dir.join(format!("{script}.json")))
    }
}
