//! Bio-scan code integrity check
//!
//! The secret phrase is never stored. Candidates are folded through a
//! 31-multiplier string hash with wrapping 32-bit signed arithmetic and the
//! result is compared against a fixed checksum. This is an obfuscation
//! device, not a security boundary.

/// Checksum of the normalized secret phrase
const SECRET_CHECKSUM: i32 = 3_094_713;

/// Normalize raw input the way the challenge prompt expects it
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Fold a phrase into its 32-bit checksum over UTF-16 code units
pub fn checksum(phrase: &str) -> i32 {
    phrase.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Check an already normalized candidate against the secret checksum
pub fn verify(candidate: &str) -> bool {
    checksum(candidate) == SECRET_CHECKSUM
}
