// This is part of hargassner-telnet.rs.
// Copyright (c) 2026, the hargassner-telnet authors.
// See README.md and LICENSE.txt for details.

//! Decodes one telemetry frame into a `Reading` using a firmware template.
//!
//! Decoding is a pure function of (template, tokens) and is total over any
//! token sequence: a token that fails to parse makes the channels positioned
//! at it `Unavailable` and nothing else. Frames shorter or longer than the
//! template expects decode best-effort, since firmware point-releases add
//! trailing reserved fields before the templates catch up.

use std::collections::BTreeMap;

use chrono::Utc;
use log::debug;

use crate::{
    firmware::{FirmwareTemplate, FAULT_FIELD_INDEX, STATE_FIELD_INDEX},
    reading::{Reading, FAULT_CHANNEL, STATE_CHANNEL},
    value::Value,
};

/// The keyword that opens every telemetry frame.
const FRAME_KEYWORD: &str = "pm";

/// Splits a raw frame line into its payload tokens.
///
/// Returns `None` for lines that are not telemetry frames (the boiler
/// interleaves other output, e.g. its login banner, on the same stream).
/// The `pm` keyword itself is not part of the payload; channel indices count
/// from the token after it.
pub fn tokenize_frame(line: &str) -> Option<Vec<&str>> {
    let mut tokens = line.split_ascii_whitespace();

    if tokens.next()? != FRAME_KEYWORD {
        return None;
    }

    Some(tokens.collect())
}

/// Decodes the payload tokens of one frame into a `Reading`.
///
/// # Examples
///
/// ```rust
/// use hargassner_telnet::{firmware, message_decoder, Value};
///
/// let template = firmware::lookup("V14_0HAR_q1").unwrap();
/// let tokens = message_decoder::tokenize_frame(
///     "pm 2 0 8,7 62,5 118 71 65 58 48,2 3,1 100 65 124,6 8031,4 5 0",
/// )
/// .unwrap();
///
/// let reading = message_decoder::decode(template, &tokens);
/// assert_eq!(Some(&Value::Decimal(62.5)), reading.get("TK"));
/// assert_eq!(Some(&Value::Flag(true)), reading.get("HKP1"));
/// assert_eq!(None, reading.fault());
/// ```
pub fn decode(template: &FirmwareTemplate, tokens: &[&str]) -> Reading {
    if tokens.len() != template.expected_fields {
        debug!(
            "frame carries {} fields, template {} expects {}; decoding best-effort",
            tokens.len(),
            template.id,
            template.expected_fields
        );
    }

    let mut values = BTreeMap::new();

    values.insert(STATE_CHANNEL, decode_code(tokens, STATE_FIELD_INDEX));
    values.insert(FAULT_CHANNEL, decode_code(tokens, FAULT_FIELD_INDEX));

    for channel in template.analog {
        let value = match tokens.get(channel.index).and_then(|t| parse_decimal(t)) {
            Some(number) => Value::Decimal(number),
            None => Value::Unavailable,
        };
        values.insert(channel.name, value);
    }

    for channel in template.digital {
        let value = match tokens.get(channel.index).and_then(|t| parse_word(t)) {
            Some(word) => Value::Flag(word & (1 << channel.bit) != 0),
            None => Value::Unavailable,
        };
        values.insert(channel.name, value);
    }

    Reading::from_values(Utc::now(), values)
}

fn decode_code(tokens: &[&str], index: usize) -> Value {
    match tokens.get(index).and_then(|t| parse_word(t)) {
        Some(code) => Value::Code(code),
        None => Value::Unavailable,
    }
}

/// Parses a decimal number, accepting both the comma and the dot as the
/// decimal separator. Older firmware builds follow the display language
/// setting here.
fn parse_decimal(token: &str) -> Option<f64> {
    let token = token.trim();

    if token.contains(',') {
        token.replace(',', ".").parse().ok()
    } else {
        token.parse().ok()
    }
}

fn parse_word(token: &str) -> Option<u16> {
    token.trim().parse().ok()
}
