// This is part of hargassner-telnet.rs.
// Copyright (c) 2026, the hargassner-telnet authors.
// See README.md and LICENSE.txt for details.

//! Firmware templates mapping frame positions to named channels.
//!
//! Every Hargassner firmware build ships its own telemetry layout. A
//! template is pure static data; adding support for a new firmware version
//! means adding one more table here, nothing in the decoder or client
//! changes.
//!
//! Frame payload convention shared by all firmware builds: token 0 is the
//! boiler state word, token 1 is the fault number, firmware-specific
//! channels occupy tokens 2 and up. Some builds carry reserved trailing
//! tokens with no channel assigned; these are left out of the template
//! entirely, which never shifts the indices of real channels.

use crate::channel::{AnalogChannel, DigitalChannel};

/// Payload token position of the boiler state word, identical across
/// firmware builds.
pub const STATE_FIELD_INDEX: usize = 0;

/// Payload token position of the fault number, identical across firmware
/// builds.
pub const FAULT_FIELD_INDEX: usize = 1;

/// The ordered parameter layout for one firmware build.
#[derive(Debug)]
pub struct FirmwareTemplate {
    /// The firmware version identifier, e.g. `"V14_1HAR_q1"`.
    pub id: &'static str,

    /// The payload token count frames of this firmware are expected to
    /// carry, including the fixed state/fault fields and any reserved
    /// trailing tokens.
    pub expected_fields: usize,

    /// The analog channel definitions, in frame order.
    pub analog: &'static [AnalogChannel],

    /// The digital channel definitions, grouped by word, in frame order.
    pub digital: &'static [DigitalChannel],
}

impl FirmwareTemplate {
    /// Returns the number of distinct digital words referenced by this
    /// template.
    pub fn digital_word_count(&self) -> usize {
        let mut count = 0;
        let mut last_index = None;
        for channel in self.digital {
            if last_index != Some(channel.index) {
                last_index = Some(channel.index);
                count += 1;
            }
        }
        count
    }
}

macro_rules! analog {
    ($index:expr, $name:expr, $unit:expr, $de:expr, $en:expr) => {
        AnalogChannel {
            index: $index,
            name: $name,
            unit: $unit,
            label_de: $de,
            label_en: $en,
        }
    };
}

macro_rules! digital {
    ($index:expr, $bit:expr, $name:expr, $de:expr, $en:expr) => {
        DigitalChannel {
            index: $index,
            bit: $bit,
            name: $name,
            label_de: $de,
            label_en: $en,
        }
    };
}

const ANALOG_V14_0: &[AnalogChannel] = &[
    analog!(2, "O2", "%", "Restsauerstoff", "Residual oxygen"),
    analog!(3, "TK", "°C", "Kesseltemperatur", "Boiler temperature"),
    analog!(4, "TRG", "°C", "Rauchgastemperatur", "Flue gas temperature"),
    analog!(5, "TPo", "°C", "Puffer oben", "Buffer top temperature"),
    analog!(6, "TPm", "°C", "Puffer Mitte", "Buffer middle temperature"),
    analog!(7, "TPu", "°C", "Puffer unten", "Buffer bottom temperature"),
    analog!(8, "TRL", "°C", "Rücklauftemperatur", "Return temperature"),
    analog!(9, "TA", "°C", "Außentemperatur", "Outside temperature"),
    analog!(10, "Leistung", "%", "Kesselleistung", "Boiler output"),
    analog!(11, "Saugzug", "%", "Saugzuggebläse", "Induced draught fan"),
    analog!(12, "VerbrT", "kg", "Verbrauch heute", "Consumption today"),
    analog!(13, "VerbrG", "kg", "Verbrauchszähler gesamt", "Total consumption counter"),
];

const DIGITAL_V14_0: &[DigitalChannel] = &[
    digital!(14, 0, "HKP1", "Heizkreispumpe 1", "Heating circuit pump 1"),
    digital!(14, 1, "HKP2", "Heizkreispumpe 2", "Heating circuit pump 2"),
    digital!(14, 2, "BLP1", "Boilerladepumpe 1", "DHW tank charge pump 1"),
    digital!(14, 3, "PLP", "Pufferladepumpe", "Buffer charge pump"),
    digital!(14, 4, "ZUEND", "Zündung", "Ignition"),
    digital!(15, 0, "ASCHE", "Ascheaustragung", "Ash removal"),
    digital!(15, 1, "RAUM", "Raumaustragung", "Pellet store discharge"),
    digital!(15, 2, "REIN", "Abreinigung", "Heat exchanger cleaning"),
    digital!(15, 3, "STB", "STB ausgelöst", "Safety temperature limiter tripped"),
];

const ANALOG_V14_1: &[AnalogChannel] = &[
    analog!(2, "O2", "%", "Restsauerstoff", "Residual oxygen"),
    analog!(3, "TK", "°C", "Kesseltemperatur", "Boiler temperature"),
    analog!(4, "TRG", "°C", "Rauchgastemperatur", "Flue gas temperature"),
    analog!(5, "TPo", "°C", "Puffer oben", "Buffer top temperature"),
    analog!(6, "TPm", "°C", "Puffer Mitte", "Buffer middle temperature"),
    analog!(7, "TPu", "°C", "Puffer unten", "Buffer bottom temperature"),
    analog!(8, "TRL", "°C", "Rücklauftemperatur", "Return temperature"),
    analog!(9, "TA", "°C", "Außentemperatur", "Outside temperature"),
    analog!(10, "Leistung", "%", "Kesselleistung", "Boiler output"),
    analog!(11, "Saugzug", "%", "Saugzuggebläse", "Induced draught fan"),
    analog!(12, "VerbrT", "kg", "Verbrauch heute", "Consumption today"),
    analog!(13, "VerbrG", "kg", "Verbrauchszähler gesamt", "Total consumption counter"),
    analog!(14, "TB1", "°C", "Boilertemperatur 1", "DHW tank temperature 1"),
    analog!(15, "ES", "%", "Einschub", "Stoker feed"),
];

const DIGITAL_V14_1: &[DigitalChannel] = &[
    digital!(16, 0, "HKP1", "Heizkreispumpe 1", "Heating circuit pump 1"),
    digital!(16, 1, "HKP2", "Heizkreispumpe 2", "Heating circuit pump 2"),
    digital!(16, 2, "BLP1", "Boilerladepumpe 1", "DHW tank charge pump 1"),
    digital!(16, 3, "PLP", "Pufferladepumpe", "Buffer charge pump"),
    digital!(16, 4, "ZUEND", "Zündung", "Ignition"),
    digital!(17, 0, "ASCHE", "Ascheaustragung", "Ash removal"),
    digital!(17, 1, "RAUM", "Raumaustragung", "Pellet store discharge"),
    digital!(17, 2, "REIN", "Abreinigung", "Heat exchanger cleaning"),
    digital!(17, 3, "STB", "STB ausgelöst", "Safety temperature limiter tripped"),
];

const ANALOG_V14_3: &[AnalogChannel] = &[
    analog!(2, "O2", "%", "Restsauerstoff", "Residual oxygen"),
    analog!(3, "TK", "°C", "Kesseltemperatur", "Boiler temperature"),
    analog!(4, "TRG", "°C", "Rauchgastemperatur", "Flue gas temperature"),
    analog!(5, "TPo", "°C", "Puffer oben", "Buffer top temperature"),
    analog!(6, "TPm", "°C", "Puffer Mitte", "Buffer middle temperature"),
    analog!(7, "TPu", "°C", "Puffer unten", "Buffer bottom temperature"),
    analog!(8, "TRL", "°C", "Rücklauftemperatur", "Return temperature"),
    analog!(9, "TA", "°C", "Außentemperatur", "Outside temperature"),
    analog!(10, "Leistung", "%", "Kesselleistung", "Boiler output"),
    analog!(11, "Saugzug", "%", "Saugzuggebläse", "Induced draught fan"),
    analog!(12, "VerbrT", "kg", "Verbrauch heute", "Consumption today"),
    analog!(13, "VerbrG", "kg", "Verbrauchszähler gesamt", "Total consumption counter"),
    analog!(14, "TB1", "°C", "Boilertemperatur 1", "DHW tank temperature 1"),
    analog!(15, "ES", "%", "Einschub", "Stoker feed"),
    // The V14_1 reserved slot at 18 became the flow temperature in V14_3.
    analog!(18, "TVL1", "°C", "Vorlauf Heizkreis 1", "Flow temperature circuit 1"),
];

const DIGITAL_V14_3: &[DigitalChannel] = &[
    digital!(16, 0, "HKP1", "Heizkreispumpe 1", "Heating circuit pump 1"),
    digital!(16, 1, "HKP2", "Heizkreispumpe 2", "Heating circuit pump 2"),
    digital!(16, 2, "BLP1", "Boilerladepumpe 1", "DHW tank charge pump 1"),
    digital!(16, 3, "PLP", "Pufferladepumpe", "Buffer charge pump"),
    digital!(16, 4, "ZUEND", "Zündung", "Ignition"),
    digital!(17, 0, "ASCHE", "Ascheaustragung", "Ash removal"),
    digital!(17, 1, "RAUM", "Raumaustragung", "Pellet store discharge"),
    digital!(17, 2, "REIN", "Abreinigung", "Heat exchanger cleaning"),
    digital!(17, 3, "STB", "STB ausgelöst", "Safety temperature limiter tripped"),
    digital!(19, 0, "M1AUF", "Mischer 1 auf", "Mixer 1 open"),
    digital!(19, 1, "M1ZU", "Mischer 1 zu", "Mixer 1 close"),
];

const TEMPLATES: &[FirmwareTemplate] = &[
    FirmwareTemplate {
        id: "V14_0HAR_q1",
        expected_fields: 16,
        analog: ANALOG_V14_0,
        digital: DIGITAL_V14_0,
    },
    FirmwareTemplate {
        id: "V14_1HAR_q1",
        // Token 18 is a reserved slot in this build.
        expected_fields: 19,
        analog: ANALOG_V14_1,
        digital: DIGITAL_V14_1,
    },
    FirmwareTemplate {
        id: "V14_3HAR_q7",
        expected_fields: 20,
        analog: ANALOG_V14_3,
        digital: DIGITAL_V14_3,
    },
];

/// Looks up the template for a firmware identifier by exact string match.
///
/// # Examples
///
/// ```rust
/// use hargassner_telnet::firmware;
///
/// let template = firmware::lookup("V14_1HAR_q1").unwrap();
/// assert_eq!("V14_1HAR_q1", template.id);
/// assert!(firmware::lookup("V99_UNKNOWN").is_none());
/// ```
pub fn lookup(id: &str) -> Option<&'static FirmwareTemplate> {
    TEMPLATES.iter().find(|template| template.id == id)
}

/// Returns the identifiers of all known firmware builds, for use by a
/// setup flow.
pub fn ids() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|template| template.id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_lookup() {
        let template = lookup("V14_0HAR_q1").unwrap();
        assert_eq!("V14_0HAR_q1", template.id);
        assert_eq!(16, template.expected_fields);

        assert!(lookup("V99_UNKNOWN").is_none());
        assert!(lookup("").is_none());
        assert!(lookup("v14_0har_q1").is_none());
    }

    #[test]
    fn test_lookup_is_idempotent() {
        for id in ids() {
            let first = lookup(id).unwrap();
            let second = lookup(id).unwrap();
            assert!(std::ptr::eq(first, second));
        }
    }

    #[test]
    fn test_ids() {
        let ids: Vec<_> = ids().collect();
        assert_eq!(vec!["V14_0HAR_q1", "V14_1HAR_q1", "V14_3HAR_q7"], ids);
    }

    #[test]
    fn test_digital_word_count() {
        assert_eq!(2, lookup("V14_0HAR_q1").unwrap().digital_word_count());
        assert_eq!(3, lookup("V14_3HAR_q7").unwrap().digital_word_count());
    }

    #[test]
    fn test_templates_have_unique_channel_names() {
        for template in TEMPLATES {
            let mut names = HashSet::new();
            for channel in template.analog {
                assert!(
                    names.insert(channel.name),
                    "duplicate analog channel {:?} in {}",
                    channel.name,
                    template.id
                );
            }

            let mut names = HashSet::new();
            for channel in template.digital {
                assert!(
                    names.insert(channel.name),
                    "duplicate digital channel {:?} in {}",
                    channel.name,
                    template.id
                );
            }
        }
    }

    #[test]
    fn test_templates_stay_within_expected_fields() {
        for template in TEMPLATES {
            for channel in template.analog {
                assert!(channel.index >= 2, "{} overlaps a fixed field", channel.name);
                assert!(
                    channel.index < template.expected_fields,
                    "{} out of bounds in {}",
                    channel.name,
                    template.id
                );
            }
            for channel in template.digital {
                assert!(channel.index >= 2, "{} overlaps a fixed field", channel.name);
                assert!(
                    channel.index < template.expected_fields,
                    "{} out of bounds in {}",
                    channel.name,
                    template.id
                );
                assert!(channel.bit < 16);
            }
        }
    }

    #[test]
    fn test_digital_channels_are_grouped_by_word() {
        // `digital_word_count` relies on word-grouped ordering.
        for template in TEMPLATES {
            let mut seen = HashSet::new();
            let mut last_index = None;
            for channel in template.digital {
                if last_index != Some(channel.index) {
                    assert!(seen.insert(channel.index), "word {} split in {}", channel.index, template.id);
                    last_index = Some(channel.index);
                }
            }
        }
    }
}
