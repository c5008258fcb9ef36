//! Narration voice identifiers.
//!
//! The speech-synthesis service exposes a fixed set of voices.  The set is
//! closed at build time so an unknown identifier can be rejected locally,
//! before any remote call is made.

use serde::{Deserialize, Serialize};

/// A narration voice accepted by the speech-synthesis service.
///
/// Serialized in lowercase on the wire (`"tara"`, `"jess"`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrationVoice {
    Tara,
    Leah,
    Jess,
    Leo,
    Dan,
    Mia,
    Zac,
    Zoe,
}

impl NarrationVoice {
    /// Every supported voice, in menu order.
    pub const ALL: [NarrationVoice; 8] = [
        NarrationVoice::Tara,
        NarrationVoice::Leah,
        NarrationVoice::Jess,
        NarrationVoice::Leo,
        NarrationVoice::Dan,
        NarrationVoice::Mia,
        NarrationVoice::Zac,
        NarrationVoice::Zoe,
    ];

    /// The wire identifier for this voice.
    pub fn id(&self) -> &'static str {
        match self {
            NarrationVoice::Tara => "tara",
            NarrationVoice::Leah => "leah",
            NarrationVoice::Jess => "jess",
            NarrationVoice::Leo => "leo",
            NarrationVoice::Dan => "dan",
            NarrationVoice::Mia => "mia",
            NarrationVoice::Zac => "zac",
            NarrationVoice::Zoe => "zoe",
        }
    }

    /// Parse a user-supplied identifier.
    ///
    /// Case-insensitive; surrounding whitespace is ignored.  Returns `None`
    /// for anything outside the fixed set.
    pub fn from_id(id: &str) -> Option<NarrationVoice> {
        let id = id.trim().to_ascii_lowercase();
        NarrationVoice::ALL.into_iter().find(|v| v.id() == id)
    }
}

impl std::fmt::Display for NarrationVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_id_accepts_every_listed_voice() {
        for voice in NarrationVoice::ALL {
            assert_eq!(NarrationVoice::from_id(voice.id()), Some(voice));
        }
    }

    #[test]
    fn from_id_is_case_insensitive_and_trims() {
        assert_eq!(NarrationVoice::from_id("  JESS "), Some(NarrationVoice::Jess));
        assert_eq!(NarrationVoice::from_id("Tara"), Some(NarrationVoice::Tara));
    }

    #[test]
    fn from_id_rejects_unknown_identifiers() {
        assert_eq!(NarrationVoice::from_id("morgan"), None);
        assert_eq!(NarrationVoice::from_id(""), None);
    }

    #[test]
    fn serializes_lowercase_on_the_wire() {
        let json = serde_json::to_string(&NarrationVoice::Jess).unwrap();
        assert_eq!(json, "\"jess\"");

        let back: NarrationVoice = serde_json::from_str("\"leo\"").unwrap();
        assert_eq!(back, NarrationVoice::Leo);
    }

    #[test]
    fn display_matches_wire_id() {
        assert_eq!(NarrationVoice::Zoe.to_string(), "zoe");
    }
}
