/*!
Timed mouth cues, loaded once per selected script.

A cue document is JSON keyed by `mouthCues`; each entry spans an
interval of audio playback time and carries the cue code active over
it. The document comes from the same offline tool that produced the
audio, so it is taken exactly as given: no re-sorting, no overlap
validation. When intervals do overlap, the earliest entry wins.
*/

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::viseme;
use crate::error::Error;

/// A single timed cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouthCue {
    /// Playback time at which the cue begins, in seconds.
    pub start: f32,
    /// Playback time at which the cue ends, in seconds.
    pub end: f32,
    /// The cue code, see [`viseme::MOUTH_CUE_MAPPING`].
    pub value: String,
}

/// The ordered cue sequence for one audio clip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CueTimeline {
    #[serde(rename = "mouthCues")]
    pub mouth_cues: Vec<MouthCue>,
}

impl CueTimeline {
    /// Parses a cue document.
    pub fn from_json(data: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(data)?)
    }

    /// Reads and parses a cue document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// The cue whose interval contains `time`, if any.
    ///
    /// Scans in document order; the first match wins. Times before the
    /// first cue or after the last simply find nothing.
    pub fn cue_at(&self, time: f32) -> Option<&MouthCue> {
        self.mouth_cues
            .iter()
            .find(|cue| time >= cue.start && time <= cue.end)
    }

    /// The blend shape active at `time`.
    ///
    /// `None` during silence and for cue codes with no mapped shape.
    pub fn active_shape(&self, time: f32) -> Option<&'static str> {
        self.cue_at(time)
            .and_then(|cue| viseme::shape_for(&cue.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(cues: &[(f32, f32, &str)]) -> CueTimeline {
        CueTimeline {
            mouth_cues: cues
                .iter()
                .map(|(start, end, value)| MouthCue {
                    start: *start,
                    end: *end,
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_from_json() {
        let parsed = CueTimeline::from_json(
            r#"{
                "metadata": { "soundFile": "newMessage.wav", "duration": 0.6 },
                "mouthCues": [
                    { "start": 0.0, "end": 0.3, "value": "A" },
                    { "start": 0.3, "end": 0.6, "value": "D" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(parsed.mouth_cues.len(), 2);
        assert_eq!(parsed.mouth_cues[1].value, "D");
    }

    #[test]
    fn test_malformed_document() {
        assert!(CueTimeline::from_json("not json").is_err());
        assert!(CueTimeline::from_json(r#"{ "mouthCues": [{ "start": "x" }] }"#).is_err());
    }

    #[test]
    fn test_time_outside_every_cue() {
        let t = timeline(&[(0.1, 0.3, "A"), (0.4, 0.6, "B")]);

        assert_eq!(t.active_shape(0.0), None);
        assert_eq!(t.active_shape(0.35), None);
        assert_eq!(t.active_shape(7.0), None);
        assert_eq!(t.active_shape(-1.0), None);
    }

    #[test]
    fn test_time_within_one_cue() {
        let t = timeline(&[(0.0, 0.3, "A"), (0.3, 0.6, "D")]);

        assert_eq!(t.active_shape(0.45), Some("viseme_AA"));
        assert_eq!(t.cue_at(0.1).unwrap().value, "A");
    }

    #[test]
    fn test_interval_bounds_are_inclusive() {
        let t = timeline(&[(0.2, 0.5, "E")]);

        assert_eq!(t.active_shape(0.2), Some("viseme_O"));
        assert_eq!(t.active_shape(0.5), Some("viseme_O"));
    }

    #[test]
    fn test_overlap_earliest_entry_wins() {
        let t = timeline(&[(0.0, 1.0, "B"), (0.5, 1.5, "C")]);

        assert_eq!(t.active_shape(0.7), Some("viseme_kk"));
        assert_eq!(t.active_shape(1.2), Some("viseme_I"));
    }

    #[test]
    fn test_unsorted_document_order_is_kept() {
        let t = timeline(&[(0.5, 1.0, "F"), (0.0, 0.7, "G")]);

        // 0.6 sits in both; the document's first entry wins even though
        // it starts later.
        assert_eq!(t.active_shape(0.6), Some("viseme_U"));
    }

    #[test]
    fn test_unmapped_code_is_silence() {
        let t = timeline(&[(0.0, 1.0, "Q")]);

        assert!(t.cue_at(0.5).is_some());
        assert_eq!(t.active_shape(0.5), None);
    }
}
