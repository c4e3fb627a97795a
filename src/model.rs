pub mod cues;
pub mod viseme;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A newtype that identifies a selectable script.
///
/// A script names one audio clip and the cue timeline generated for it;
/// the surrounding application decides which scripts exist.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScriptId(String);

impl std::ops::Deref for ScriptId {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for ScriptId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ScriptId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ScriptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-avatar configuration.
///
/// The defaults describe the stock greeter model; embedders with other
/// rigs override the bone and mesh names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Name of the skeletal node kept oriented towards the camera.
    pub head_bone: String,
    /// Meshes whose morph weights are driven by the lip sync pass.
    pub mouth_meshes: Vec<String>,
    /// Crossfade duration for body animation transitions, in seconds.
    pub fade_duration: f32,
    /// The script whose playback start triggers the greeting gesture.
    /// Every other script keeps the avatar idling.
    pub gesture_script: ScriptId,
    /// Mouth shape held while the puppet rests before any playback.
    pub initial_mouth_shape: Option<String>,
    /// Dialogue line shown while audio is playing.
    pub dialogue_message: String,
    /// World-space anchor of the dialogue bubble.
    pub dialogue_anchor: Vec3,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            head_bone: "Head".to_string(),
            mouth_meshes: vec!["Wolf3D_Head".to_string(), "Wolf3D_Teeth".to_string()],
            fade_duration: 0.5,
            gesture_script: ScriptId::from("newMessage"),
            initial_mouth_shape: Some("viseme_O".to_string()),
            dialogue_message: "Hi! This is Shawn, I have something to share with you.".to_string(),
            dialogue_anchor: Vec3::new(0.5, 0.2, 5.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AvatarConfig::default();

        assert_eq!(config.head_bone, "Head");
        assert_eq!(config.mouth_meshes.len(), 2);
        assert_eq!(config.gesture_script, ScriptId::from("newMessage"));
        assert_eq!(config.fade_duration, 0.5);
    }

    #[test]
    fn test_config_partial_override() {
        let config: AvatarConfig =
            serde_json::from_str(r#"{ "head_bone": "Neck", "fade_duration": 0.25 }"#).unwrap();

        assert_eq!(config.head_bone, "Neck");
        assert_eq!(config.fade_duration, 0.25);
        // Unspecified fields keep their defaults.
        assert_eq!(config.mouth_meshes, vec!["Wolf3D_Head", "Wolf3D_Teeth"]);
    }
}
