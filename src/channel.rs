// This is part of hargassner-telnet.rs.
// Copyright (c) 2026, the hargassner-telnet authors.
// See README.md and LICENSE.txt for details.

/// Describes one analog (numeric) channel within a firmware template.
///
/// The `index` is the 0-based position of the channel's token within the
/// payload of a `pm` frame. Cumulative counters (pellet consumption) are
/// regular analog channels from the decoder's point of view; delta
/// computation and unit conversion are the consumer's concern.
#[derive(Debug, PartialEq)]
pub struct AnalogChannel {
    /// 0-based token position within the frame payload.
    pub index: usize,

    /// Stable short code, e.g. `"TK"` for the boiler temperature.
    pub name: &'static str,

    /// Physical unit, may be empty.
    pub unit: &'static str,

    /// German display label.
    pub label_de: &'static str,

    /// English display label.
    pub label_en: &'static str,
}

/// Describes one digital (boolean) channel within a firmware template.
///
/// Digital channels are packed into integer bitmask words; `index` names the
/// word's token position and `bit` the offset within that word.
#[derive(Debug, PartialEq)]
pub struct DigitalChannel {
    /// 0-based token position of the word this flag lives in.
    pub index: usize,

    /// Bit offset within the word.
    pub bit: u8,

    /// Stable short code, e.g. `"HKP1"` for heating circuit pump 1.
    pub name: &'static str,

    /// German display label.
    pub label_de: &'static str,

    /// English display label.
    pub label_en: &'static str,
}
