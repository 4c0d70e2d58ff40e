// This is part of hargassner-telnet.rs.
// Copyright (c) 2026, the hargassner-telnet authors.
// See README.md and LICENSE.txt for details.

use std::collections::{btree_map, BTreeMap};

use chrono::{DateTime, Utc};

use crate::value::Value;

/// Symbolic name of the derived boiler state channel, present in every
/// `Reading` regardless of firmware.
pub const STATE_CHANNEL: &str = "ZK";

/// Symbolic name of the derived fault number channel, present in every
/// `Reading` regardless of firmware. A code of zero means "no fault".
pub const FAULT_CHANNEL: &str = "STOERUNG";

/// A point-in-time mapping from every defined channel name to its value.
///
/// A `Reading` is immutable once produced and is replaced wholesale by the
/// next successfully decoded frame; it is never merged or patched in place,
/// so a value from one frame can never survive into a semantically different
/// one.
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    /// The timestamp of receipt.
    pub timestamp: DateTime<Utc>,
    values: BTreeMap<&'static str, Value>,
}

impl Reading {
    pub(crate) fn from_values(
        timestamp: DateTime<Utc>,
        values: BTreeMap<&'static str, Value>,
    ) -> Reading {
        Reading { timestamp, values }
    }

    /// Returns the value of the channel with the given symbolic name, or
    /// `None` if the firmware template does not define it.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns an iterator over all channel name/value pairs in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, &'static str, Value> {
        self.values.iter()
    }

    /// Returns the number of channels in this reading.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if this reading contains no channels.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the raw boiler state code, if it was reported.
    pub fn state_code(&self) -> Option<u16> {
        self.get(STATE_CHANNEL).and_then(Value::as_code)
    }

    /// Returns the active fault number, or `None` when the boiler reports no
    /// fault or the fault field was unavailable.
    ///
    /// The code is surfaced verbatim; whether a given fault is fatal or a
    /// warning is a presentation concern.
    pub fn fault(&self) -> Option<u16> {
        match self.get(FAULT_CHANNEL).and_then(Value::as_code) {
            Some(0) | None => None,
            Some(code) => Some(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading_with(values: Vec<(&'static str, Value)>) -> Reading {
        Reading::from_values(Utc::now(), values.into_iter().collect())
    }

    #[test]
    fn test_get() {
        let reading = reading_with(vec![("TK", Value::Decimal(62.5))]);

        assert_eq!(Some(&Value::Decimal(62.5)), reading.get("TK"));
        assert_eq!(None, reading.get("O2"));
        assert_eq!(1, reading.len());
        assert!(!reading.is_empty());
    }

    #[test]
    fn test_fault() {
        let reading = reading_with(vec![(FAULT_CHANNEL, Value::Code(0))]);
        assert_eq!(None, reading.fault());

        let reading = reading_with(vec![(FAULT_CHANNEL, Value::Code(29))]);
        assert_eq!(Some(29), reading.fault());

        let reading = reading_with(vec![(FAULT_CHANNEL, Value::Unavailable)]);
        assert_eq!(None, reading.fault());
    }

    #[test]
    fn test_state_code() {
        let reading = reading_with(vec![(STATE_CHANNEL, Value::Code(7))]);
        assert_eq!(Some(7), reading.state_code());

        let reading = reading_with(vec![(STATE_CHANNEL, Value::Unavailable)]);
        assert_eq!(None, reading.state_code());
    }
}
