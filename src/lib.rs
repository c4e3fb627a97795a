/*!
Real-time lip sync and body animation for a talking 3D avatar.

The engine maps elapsed audio playback time onto mouth blend shapes,
crossfades between the idle and greeting body animations as playback
starts and stops, and keeps the avatar's head oriented towards the
camera. Everything engine-specific (asset loading, rendering, the audio
backend, dialogue layout) stays outside, behind the traits in
[`runner`] and [`receivers`].
*/

mod logger;

pub use logger::Logger;
pub mod animation;
pub mod error;
pub mod model;
pub mod puppets;
pub mod receivers;
pub mod runner;

pub use animation::{AnimationMixer, AnimationState};
pub use error::Error;
pub use model::cues::CueTimeline;
pub use model::{AvatarConfig, ScriptId};
pub use puppets::{Bone, MeshHandle, MorphMesh, Puppet3d, Skeleton};
pub use receivers::{AudioSource, PlaybackEvent, PlaybackMonitor, PlaybackState};
pub use runner::{AvatarRunner, Controls, DialoguePresenter, ScriptSource};
