// This is part of hargassner-telnet.rs.
// Copyright (c) 2026, the hargassner-telnet authors.
// See README.md and LICENSE.txt for details.

//! Text decoding for raw frame bytes.
//!
//! The boiler transmits frames in an 8-bit encoding that is not reliably
//! known in advance; it differs between firmware builds and display language
//! settings. Decoding attempts the candidate encodings from most specific to
//! most permissive and never fails: UTF-8 first, then Windows-1252 (which
//! rejects five unassigned code points), then ISO-8859-1, which maps every
//! byte value. A garbled umlaut in a label is preferable to dropping a whole
//! reading.

use std::borrow::Cow;

/// Windows-1252 mappings for the 0x80..=0x9F block. `'\0'` marks the five
/// code points the encoding leaves unassigned.
const CP1252_80_9F: [char; 32] = [
    '\u{20AC}', '\0', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\0', '\u{017D}', '\0',
    '\0', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\0', '\u{017E}', '\u{0178}',
];

/// Decodes raw frame bytes into text, trying UTF-8, Windows-1252 and
/// ISO-8859-1 in that order. The last attempt is total, so this function
/// always produces a result.
pub fn decode_frame_bytes(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    if let Some(text) = decode_windows_1252(bytes) {
        return Cow::Owned(text);
    }

    Cow::Owned(decode_latin_1(bytes))
}

fn decode_windows_1252(bytes: &[u8]) -> Option<String> {
    let mut text = String::with_capacity(bytes.len());

    for &byte in bytes {
        let ch = match byte {
            0x80..=0x9F => {
                let ch = CP1252_80_9F[(byte - 0x80) as usize];
                if ch == '\0' {
                    return None;
                }
                ch
            }
            _ => byte as char,
        };
        text.push(ch);
    }

    Some(text)
}

fn decode_latin_1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| byte as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ascii_borrows() {
        let text = decode_frame_bytes(b"pm 1 0 8,7 62,5");

        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!("pm 1 0 8,7 62,5", text);
    }

    #[test]
    fn test_valid_utf8() {
        let text = decode_frame_bytes("Zündung".as_bytes());

        assert_eq!("Zündung", text);
    }

    #[test]
    fn test_falls_back_to_windows_1252() {
        // 0xFC is "ü" in Windows-1252 but an invalid UTF-8 start byte.
        let text = decode_frame_bytes(b"Z\xFCndung");

        assert_eq!("Zündung", text);
    }

    #[test]
    fn test_euro_sign_needs_windows_1252() {
        let text = decode_frame_bytes(b"\x80");

        assert_eq!("\u{20AC}", text);
    }

    #[test]
    fn test_falls_back_to_latin_1() {
        // 0x81 is unassigned in Windows-1252, so the permissive fallback
        // takes over and maps every byte verbatim.
        let text = decode_frame_bytes(b"\x81\xFC");

        assert_eq!("\u{81}\u{FC}", text);
    }

    #[test]
    fn test_never_fails() {
        for byte in 0u8..=255 {
            let bytes = [byte];
            let text = decode_frame_bytes(&bytes);
            assert_eq!(1, text.chars().count());
        }
    }
}
