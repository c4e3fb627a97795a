/*!
The mouth-cue alphabet and its mapping onto blend shape names.

Cue codes follow the eight-plus-rest alphabet that phoneme extraction
tools emit; shape names are shared by every mouth-bearing mesh on the
avatar, even though each mesh indexes them differently.
*/

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Mapping of cue codes to the blend shape each one activates.
///
/// `A` (closed lips) and `X` (rest) share a shape.
pub static MOUTH_CUE_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("A", "viseme_PP"),
        ("B", "viseme_kk"),
        ("C", "viseme_I"),
        ("D", "viseme_AA"),
        ("E", "viseme_O"),
        ("F", "viseme_U"),
        ("G", "viseme_FF"),
        ("H", "viseme_TH"),
        ("X", "viseme_PP"),
    ])
});

/// Looks up the blend shape for a cue code.
///
/// Codes outside the alphabet have no shape; callers treat that the
/// same as silence.
pub fn shape_for(code: &str) -> Option<&'static str> {
    MOUTH_CUE_MAPPING.get(code).copied()
}

/// Every blend shape the lip sync pass manages.
///
/// May yield the same shape more than once, since several codes can
/// share one; resets iterate this and zeroing twice is harmless.
pub fn managed_shapes() -> impl Iterator<Item = &'static str> {
    MOUTH_CUE_MAPPING.values().copied()
}
