use thiserror::Error;

/// Errors surfaced while acquiring script assets.
///
/// Per-frame operations never return these. A missing blend shape or an
/// odd cue document degrades to a no-op on the affected mesh or frame,
/// so the frame loop keeps running.
#[derive(Debug, Error)]
pub enum Error {
    /// The cue timeline document could not be parsed.
    #[error("malformed cue timeline: {0}")]
    Timeline(#[from] serde_json::Error),

    /// Reading a cue timeline document failed.
    #[error("unable to read cue timeline: {0}")]
    Io(#[from] std::io::Error),

    /// Audio or a timeline was requested for a script nobody provides.
    #[error("unknown script: {0}")]
    UnknownScript(String),
}
