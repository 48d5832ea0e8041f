//! Reward payload decoding
//!
//! The reward text ships base64-encoded so it does not show up in a plain
//! string scan of the binary. Decoding never fails outward: a malformed
//! payload degrades to an empty string and the reveal renders blank.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::models::{Markup, Tone};

const ENCODED_HEADLINE: &str = "R2lmdCBsb2NhdGlvbiBkZWNpcGhlcmVkIQ==";
const ENCODED_INSTRUCTION: &str =
    "TmF2aWdhdGUgdG8gdGhlIEhSIE1hbmFnZXIgYW5kIHdoaXNwZXIgdGhpcyBhY2Nlc3MgY29kZTo=";
const ENCODED_CODE: &str = "UVVBQ0sgUVVBQ0sgUVVBQ0s=";

/// Decode an obfuscated payload, or return an empty string
pub fn decode(encoded: &str) -> String {
    let bytes = match STANDARD.decode(encoded.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Payload is not valid base64: {}", e);
            return String::new();
        }
    };

    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug!("Payload is not valid UTF-8: {}", e);
            String::new()
        }
    }
}

/// The decoded reward shown after a successful decryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub headline: String,
    pub instruction: String,
    pub code: String,
}

impl Reveal {
    /// Decode the built-in reward payloads
    pub fn decode() -> Self {
        Self {
            headline: decode(ENCODED_HEADLINE),
            instruction: decode(ENCODED_INSTRUCTION),
            code: decode(ENCODED_CODE),
        }
    }

    /// Assemble the reward display
    pub fn to_markup(&self) -> Markup {
        Markup::Column(vec![
            Markup::styled(Tone::Headline, self.headline.clone()),
            Markup::Row(vec![
                Markup::text(self.instruction.clone()),
                Markup::styled(Tone::Highlight, self.code.clone()),
            ]),
        ])
    }
}
