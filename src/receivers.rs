/*!
Samplers for externally owned playback state.

Receivers never block the frame loop; they read whatever the outside
world currently says and hand back plain values.
*/

pub mod playback;

pub use playback::{AudioSource, PlaybackEvent, PlaybackMonitor, PlaybackState};
