/*!
Body animation playback: two clips, one active state, crossfaded
transitions.

The host engine samples clip poses itself; what lives here is the
bookkeeping it samples from: which clip owns the avatar, how far into
the clip playback is, and how much influence each clip carries while a
crossfade is in flight.
*/

use crate::Logger;

/// Which body animation owns the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Default stance; re-entered on every stop and natural end.
    #[default]
    Idle,
    /// Greeting gesture; entered when a qualifying playback starts.
    Gesture,
}

/// Fade bookkeeping for one action.
///
/// Weights move linearly from the weight at fade start towards the
/// target, so an interrupted fade never snaps.
#[derive(Debug, Clone, Copy)]
struct Fade {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

/// Playback state for one clip.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    /// Name of the clip this action plays, e.g. `Idle` or `Salute`.
    pub clip: String,
    time: f32,
    weight: f32,
    playing: bool,
    fade: Option<Fade>,
}

impl AnimationAction {
    fn new(clip: impl Into<String>) -> Self {
        Self {
            clip: clip.into(),
            time: 0.0,
            weight: 0.0,
            playing: false,
            fade: None,
        }
    }

    /// Seconds into the clip.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Current influence in `[0, 1]`.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    fn reset(&mut self) {
        self.time = 0.0;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn fade_in(&mut self, duration: f32) {
        self.fade = Some(Fade {
            from: self.weight,
            to: 1.0,
            duration,
            elapsed: 0.0,
        });
    }

    fn fade_out(&mut self, duration: f32) {
        self.fade = Some(Fade {
            from: self.weight,
            to: 0.0,
            duration,
            elapsed: 0.0,
        });
    }

    /// Advances clip time and any in-flight fade.
    ///
    /// The outgoing clip keeps playing until its fade completes; only
    /// then does it stop advancing.
    fn update(&mut self, dt: f32) {
        if self.playing {
            self.time += dt;
        }

        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += dt;
            let t = if fade.duration > 0.0 {
                (fade.elapsed / fade.duration).clamp(0.0, 1.0)
            } else {
                1.0
            };
            self.weight = fade.from + (fade.to - fade.from) * t;

            if t >= 1.0 {
                let faded_out = fade.to == 0.0;
                self.fade = None;
                if faded_out {
                    self.playing = false;
                }
            }
        }
    }
}

/// Crossfades between the idle and gesture clips.
///
/// Requests are level-tolerant: re-requesting the active state does
/// nothing, and a request landing mid-fade supersedes the previous one
/// with a fresh fade timer. At most one action is fading in and one
/// fading out at any moment.
#[derive(Debug)]
pub struct AnimationMixer {
    logger: Logger,

    idle: AnimationAction,
    gesture: AnimationAction,
    current: AnimationState,
    fade_duration: f32,
}

impl AnimationMixer {
    /// Creates the mixer and enters `Idle`, fading it in from nothing
    /// the same way any later transition would.
    pub fn new(
        idle_clip: impl Into<String>,
        gesture_clip: impl Into<String>,
        fade_duration: f32,
    ) -> Self {
        let mut idle = AnimationAction::new(idle_clip);
        idle.reset();
        idle.fade_in(fade_duration);
        idle.play();

        Self {
            logger: Logger::create("AnimationMixer"),
            idle,
            gesture: AnimationAction::new(gesture_clip),
            current: AnimationState::Idle,
            fade_duration,
        }
    }

    pub fn current(&self) -> AnimationState {
        self.current
    }

    pub fn action(&self, state: AnimationState) -> &AnimationAction {
        match state {
            AnimationState::Idle => &self.idle,
            AnimationState::Gesture => &self.gesture,
        }
    }

    /// Makes `state` the active body animation.
    ///
    /// Re-entry is a no-op: the active clip keeps its time and weight
    /// and no fade restarts. A change of state rewinds the incoming
    /// clip, fades it in, and fades the outgoing clip out without
    /// interrupting it.
    pub fn request(&mut self, state: AnimationState) {
        if state == self.current {
            return;
        }

        self.logger
            .debug(format!("Crossfading {:?} -> {:?}", self.current, state));

        let (incoming, outgoing) = match state {
            AnimationState::Idle => (&mut self.idle, &mut self.gesture),
            AnimationState::Gesture => (&mut self.gesture, &mut self.idle),
        };

        outgoing.fade_out(self.fade_duration);
        incoming.reset();
        incoming.fade_in(self.fade_duration);
        incoming.play();

        self.current = state;
    }

    /// Advances both actions by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.idle.update(dt);
        self.gesture.update(dt);
    }
}
